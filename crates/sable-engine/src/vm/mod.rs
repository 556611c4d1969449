//! Sable VM native binding runtime
//!
//! This module provides the per-VM state behind the native extension
//! binding layer:
//! - Prototype registrar and descriptor trees (`external`)
//! - Append-only host object binding table (`external`)
//! - Global symbol table for compile-time identifier resolution
//!   (`global`)
//! - Script value surface with the external variant (`value`)
//!
//! All state is owned by a [`Vm`] instance passed by reference to every
//! operation; nothing lives in ambient/global scope. A `Vm` and
//! everything bound into it belongs to one logical thread: registration
//! happens once during setup, after which the prototype forest and the
//! global symbol table are read-only and only the binding table grows.

pub mod defaults;
pub mod external;
pub mod global;
pub mod value;

pub use external::{ExternProto, ExternalObjects, FunctionThunk};
pub use global::{symbol_hash, GlobalBindings};
pub use value::{ExternalRef, Value};

use std::sync::Arc;

use sable_sdk::{ExternDecl, HostData, NativeMethodFn};

/// Native binding errors.
///
/// Not-found outcomes (`resolve_identifier`, `match_native_function`)
/// are `Option::None`, not errors: callers branch on them.
#[derive(Debug, thiserror::Error)]
pub enum ExternError {
    /// Binding table could not grow
    #[error("Out of memory")]
    Alloc,

    /// External value creation without a registered prototype
    #[error("Invalid external prototype")]
    InvalidPrototype,

    /// Only external values may be bound as named globals here
    #[error("Value is not an external object")]
    NotExternal,

    /// Name already bound at this level
    #[error("Duplicate binding: {0}")]
    DuplicateBinding(String),
}

/// Native binding result
pub type ExternResult<T> = Result<T, ExternError>;

/// VM construction options.
#[derive(Debug, Clone)]
pub struct VmOptions {
    /// Initial capacity of the host object binding table
    pub external_objects_capacity: usize,
}

impl Default for VmOptions {
    fn default() -> Self {
        VmOptions {
            external_objects_capacity: defaults::DEFAULT_EXTERNAL_OBJECTS_CAPACITY,
        }
    }
}

/// A Sable VM instance (the native-binding slice of it).
///
/// Owns the prototype forest, the host object binding table, and the
/// global symbol table; dropping the `Vm` releases all of them exactly
/// once.
#[derive(Debug)]
pub struct Vm {
    /// Top-level prototype trees, in registration order
    prototypes: Vec<Arc<ExternProto>>,
    /// Host object handles, densely indexed, append-only
    external_objects: ExternalObjects,
    /// Named pre-bound values consulted by identifier resolution
    externals: GlobalBindings,
}

impl Vm {
    /// Create a new VM with default options.
    pub fn new() -> Self {
        Self::with_options(VmOptions::default())
    }

    /// Create a new VM with the given options.
    pub fn with_options(options: VmOptions) -> Self {
        Vm {
            prototypes: Vec::new(),
            external_objects: ExternalObjects::with_capacity(
                options.external_objects_capacity,
            ),
            externals: GlobalBindings::new(),
        }
    }

    /// Register a top-level prototype tree from a host declaration.
    ///
    /// The whole tree is built bottom-up before the root is published;
    /// duplicate sibling names anywhere in the tree fail the
    /// registration. The root joins the VM's forest (searched by
    /// [`Vm::match_native_function`]) and is returned for
    /// [`Vm::create_external`] calls. Roots are positional: registering
    /// two roots with the same name is allowed, and searches visit them
    /// in registration order.
    pub fn register_prototype(&mut self, decl: &ExternDecl) -> ExternResult<Arc<ExternProto>> {
        let root = Arc::new(ExternProto::from_decl(decl)?);
        self.prototypes.push(Arc::clone(&root));
        Ok(root)
    }

    /// Bind a concrete host object against a registered prototype,
    /// producing the script-visible external value.
    ///
    /// Each call appends `object` to the binding table and yields a
    /// fresh dense index, so two bindings of the same prototype are
    /// distinct values. Fails with [`ExternError::InvalidPrototype`]
    /// when no prototype is supplied.
    pub fn create_external(
        &mut self,
        proto: Option<&Arc<ExternProto>>,
        object: HostData,
    ) -> ExternResult<Value> {
        let proto = proto.ok_or(ExternError::InvalidPrototype)?;
        let index = self.external_objects.push(object)?;
        Ok(Value::external(Arc::clone(proto), index))
    }

    /// Get the host pointer an external value designates.
    ///
    /// Returns `None` for non-external values. Used by accessor
    /// dispatch to recover the `obj` argument for callbacks.
    pub fn external_object(&self, value: &Value) -> Option<HostData> {
        let ext = value.as_external()?;
        self.external_objects.get(ext.index())
    }

    /// Bind an external value under a top-level name.
    ///
    /// Only external values take this path; the name must not already
    /// be bound (no overwrite, no merge).
    pub fn bind_global(&mut self, name: &str, value: &Value) -> ExternResult<()> {
        if !value.is_external() {
            return Err(ExternError::NotExternal);
        }
        self.externals.insert(name, value.clone())
    }

    /// Resolve a top-level identifier to its bound value.
    ///
    /// `hash` is the caller-precomputed [`symbol_hash`] of `name`,
    /// typically cached from tokenization. Pure lookup: no side
    /// effects, `None` when the name is not bound.
    pub fn resolve_identifier(&self, name: &str, hash: u64) -> Option<&Value> {
        self.externals.find(name, hash)
    }

    /// Recover the dotted access path of a native method for
    /// diagnostics (`"console.log."`, with trailing separator).
    ///
    /// Searches every registered prototype tree depth-first. `None`
    /// means the function is not exposed anywhere — the caller renders
    /// it as an anonymous native function.
    pub fn match_native_function(&self, func: NativeMethodFn) -> Option<String> {
        external::match_native_function(&self.prototypes, func)
    }

    /// The registered prototype forest, in registration order.
    pub fn prototypes(&self) -> &[Arc<ExternProto>] {
        &self.prototypes
    }

    /// The host object binding table.
    pub fn external_objects(&self) -> &ExternalObjects {
        &self.external_objects
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}
