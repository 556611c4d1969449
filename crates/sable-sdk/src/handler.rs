//! Callback signatures for native accessors and methods
//!
//! Every callback slot in an [`ExternDecl`](crate::ExternDecl) uses one
//! of the function-pointer types defined here. The engine stores these
//! pointers verbatim; dispatch happens in the property-access and call
//! paths of the runtime, outside this crate.

use crate::error::NativeError;
use crate::value::{HostData, NativeValue};

/// Result of a native accessor or method call.
pub enum NativeCallResult {
    /// Call completed successfully with a value
    Value(NativeValue),
    /// Call failed with an error
    Error(String),
}

impl NativeCallResult {
    /// Create a successful result with null value
    #[inline]
    pub fn null() -> Self {
        Self::Value(NativeValue::null())
    }

    /// Create a successful result with an i32 value
    #[inline]
    pub fn i32(val: i32) -> Self {
        Self::Value(NativeValue::i32(val))
    }

    /// Create a successful result with an f64 value
    #[inline]
    pub fn f64(val: f64) -> Self {
        Self::Value(NativeValue::f64(val))
    }

    /// Create a successful result with a bool value
    #[inline]
    pub fn bool(val: bool) -> Self {
        Self::Value(NativeValue::bool(val))
    }

    /// Check if this result is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl From<NativeError> for NativeCallResult {
    fn from(err: NativeError) -> Self {
        NativeCallResult::Error(err.to_string())
    }
}

/// Property getter: reads the current value of the property from the
/// host object. `obj` is the bound host pointer, `data` the per-node
/// opaque data supplied at declaration time.
pub type ExternGetFn = fn(obj: HostData, data: HostData) -> NativeCallResult;

/// Property setter: writes a new value for the property on the host
/// object.
pub type ExternSetFn = fn(obj: HostData, data: HostData, value: NativeValue) -> NativeCallResult;

/// Keyed lookup: resolves a dynamically named entry on the host object
/// (for enumerable objects whose keys are not known at declaration
/// time).
pub type ExternFindFn = fn(obj: HostData, data: HostData, key: &str) -> NativeCallResult;

/// Enumeration start: produces an opaque cursor over the host object's
/// entries.
pub type ExternForeachFn = fn(obj: HostData, data: HostData) -> NativeCallResult;

/// Enumeration step: advances a cursor produced by the foreach
/// callback, yielding the next key or null when exhausted.
pub type ExternNextFn = fn(obj: HostData, data: HostData, cursor: NativeValue) -> NativeCallResult;

/// Native method implementation.
///
/// The engine always passes the owning external value as `args[0]`;
/// script-visible arguments start at the thunk's argument offset
/// (see `FunctionThunk` in sable-engine). A method that expects two
/// script arguments therefore receives `args.len() == 3`.
pub type NativeMethodFn = fn(args: &[NativeValue]) -> NativeCallResult;
