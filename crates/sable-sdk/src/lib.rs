//! Sable SDK - Lightweight SDK for writing native extensions
//!
//! This crate provides the minimal types needed to expose host objects
//! into a Sable VM without depending on the full sable-engine:
//!
//! - [`NativeValue`]: the opaque tagged value handle crossing the native
//!   boundary
//! - [`HostData`]: an opaque host pointer carried through the binding
//!   layer unchanged
//! - [`ExternDecl`] / [`ExternKind`]: the declaration tree a host hands
//!   to the engine's prototype registrar
//! - Accessor and method callback signatures ([`ExternGetFn`],
//!   [`NativeMethodFn`], ...)
//!
//! # Example
//!
//! ```ignore
//! use sable_sdk::{ExternDecl, HostData, NativeCallResult, NativeValue};
//!
//! fn log(args: &[NativeValue]) -> NativeCallResult {
//!     // args[0] is the receiver external value
//!     NativeCallResult::null()
//! }
//!
//! let console = ExternDecl::object("console")
//!     .with_properties(vec![ExternDecl::method("log", log)]);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod decl;
mod error;
mod handler;
mod value;

pub use decl::{ExternDecl, ExternKind};
pub use error::NativeError;
pub use handler::{
    ExternFindFn, ExternForeachFn, ExternGetFn, ExternNextFn, ExternSetFn, NativeCallResult,
    NativeMethodFn,
};
pub use value::{HostData, NativeValue};
