//! Sable Language Engine — native extension binding layer
//!
//! This crate implements the mechanism by which a host program exposes
//! native objects into a Sable VM:
//! - **Prototype registrar**: turns host [`ExternDecl`] trees into
//!   immutable, name-indexed prototype nodes (`vm::external`)
//! - **Binding table**: append-only table of opaque host pointers
//!   addressed by dense index (`vm::external`)
//! - **Global symbol table**: name → value bindings consulted by
//!   compile-time identifier resolution (`vm::global`)
//! - **Reverse path matcher**: native function pointer → dotted access
//!   path, for diagnostics (`vm::external`)
//!
//! # Example
//!
//! ```rust,ignore
//! use sable_engine::{Vm, symbol_hash};
//! use sable_sdk::{ExternDecl, HostData, NativeCallResult, NativeValue};
//!
//! fn log(args: &[NativeValue]) -> NativeCallResult {
//!     NativeCallResult::null()
//! }
//!
//! let mut vm = Vm::new();
//! let decl = ExternDecl::object("console")
//!     .with_properties(vec![ExternDecl::method("log", log)]);
//! let proto = vm.register_prototype(&decl).unwrap();
//!
//! let value = vm.create_external(Some(&proto), HostData::null()).unwrap();
//! vm.bind_global("console", &value).unwrap();
//!
//! // Compile-time identifier resolution:
//! let bound = vm.resolve_identifier("console", symbol_hash("console"));
//! assert!(bound.is_some());
//!
//! // Diagnostics:
//! assert_eq!(vm.match_native_function(log).as_deref(), Some("console.log."));
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// VM module: prototype registrar, binding table, globals, path matcher
pub mod vm;

pub use vm::{
    // Value model
    ExternalRef, Value,
    // Prototype tree and binding table
    ExternProto, ExternalObjects, FunctionThunk,
    // Global symbol table
    symbol_hash,
    // VM instance
    ExternError, ExternResult, Vm, VmOptions,
};

// Re-export SDK types (canonical definitions live in sable-sdk)
pub use sable_sdk::{
    ExternDecl, ExternKind, HostData, NativeCallResult, NativeError, NativeMethodFn, NativeValue,
};
