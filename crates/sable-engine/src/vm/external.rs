//! Native extension prototypes and host object bindings
//!
//! A host exposes native objects by registering a declaration tree
//! once at VM setup. The registrar turns each declaration into an
//! [`ExternProto`] node with its own name-indexed child table, built
//! bottom-up so that every node owns its children outright. The trees
//! are immutable after registration.
//!
//! Concrete host objects are recorded in [`ExternalObjects`], an
//! append-only table of opaque pointers addressed by dense index; an
//! external script value pairs one prototype root with one table slot.
//!
//! For diagnostics, [`match_native_function`] walks the whole forest
//! depth-first to recover the dotted path under which a native method
//! was exposed.

use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use sable_sdk::{
    ExternDecl, ExternFindFn, ExternForeachFn, ExternGetFn, ExternKind, ExternNextFn, ExternSetFn,
    HostData, NativeMethodFn,
};

use crate::vm::{ExternError, ExternResult};

/// Argument-list offset applied by method thunks: the owning external
/// value occupies `args[0]`, script-visible arguments start here.
const RECEIVER_ARGS_OFFSET: usize = 1;

/// Callable record for a native method node.
///
/// Call dispatch reads `args_offset` instead of hard-coding the
/// receiver convention: the receiver is always passed as the implicit
/// first argument, so script argument `i` arrives at
/// `args[args_offset + i]`.
#[derive(Debug, Clone, Copy)]
pub struct FunctionThunk {
    native: NativeMethodFn,
    args_offset: usize,
}

impl FunctionThunk {
    /// The wrapped native function.
    pub fn native(&self) -> NativeMethodFn {
        self.native
    }

    /// Offset of the first script-visible argument.
    pub fn args_offset(&self) -> usize {
        self.args_offset
    }
}

/// One node of a registered prototype tree.
///
/// Immutable after registration: lookups and iteration only. The node
/// owns its child table; only tree roots are shared (via `Arc`) with
/// the external values bound against them.
#[derive(Debug)]
pub struct ExternProto {
    name: String,
    kind: ExternKind,
    get: Option<ExternGetFn>,
    set: Option<ExternSetFn>,
    find: Option<ExternFindFn>,
    foreach: Option<ExternForeachFn>,
    next: Option<ExternNextFn>,
    function: Option<FunctionThunk>,
    properties: FxHashMap<String, ExternProto>,
    data: HostData,
}

impl ExternProto {
    /// Build a prototype node (and, recursively, its whole subtree)
    /// from a host declaration.
    ///
    /// Children are built before the parent publishes them in its
    /// table; a duplicate sibling name fails the whole registration.
    pub(crate) fn from_decl(decl: &ExternDecl) -> ExternResult<Self> {
        let mut properties =
            FxHashMap::with_capacity_and_hasher(decl.properties.len(), Default::default());

        for child_decl in &decl.properties {
            let child = ExternProto::from_decl(child_decl)?;
            match properties.entry(child_decl.name.clone()) {
                Entry::Occupied(_) => {
                    return Err(ExternError::DuplicateBinding(child_decl.name.clone()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(child);
                }
            }
        }

        let function = decl.method.map(|native| FunctionThunk {
            native,
            args_offset: RECEIVER_ARGS_OFFSET,
        });

        Ok(ExternProto {
            name: decl.name.clone(),
            kind: decl.kind,
            get: decl.get,
            set: decl.set,
            find: decl.find,
            foreach: decl.foreach,
            next: decl.next,
            function,
            properties,
            data: decl.data,
        })
    }

    /// Script-visible member name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member kind.
    pub fn kind(&self) -> ExternKind {
        self.kind
    }

    /// Property getter, if declared.
    pub fn get(&self) -> Option<ExternGetFn> {
        self.get
    }

    /// Property setter, if declared.
    pub fn set(&self) -> Option<ExternSetFn> {
        self.set
    }

    /// Keyed lookup callback, if declared.
    pub fn find(&self) -> Option<ExternFindFn> {
        self.find
    }

    /// Enumeration start callback, if declared.
    pub fn foreach(&self) -> Option<ExternForeachFn> {
        self.foreach
    }

    /// Enumeration step callback, if declared.
    pub fn next(&self) -> Option<ExternNextFn> {
        self.next
    }

    /// The method thunk, if this node is callable.
    pub fn function(&self) -> Option<&FunctionThunk> {
        self.function.as_ref()
    }

    /// Opaque per-node data supplied at declaration time.
    pub fn data(&self) -> HostData {
        self.data
    }

    /// Look up a direct child by name.
    pub fn property(&self, name: &str) -> Option<&ExternProto> {
        self.properties.get(name)
    }

    /// Iterate over direct children, in no particular order.
    pub fn properties(&self) -> impl Iterator<Item = &ExternProto> {
        self.properties.values()
    }

    /// Number of direct children.
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

/// Append-only table of bound host object pointers.
///
/// Indices are dense, stable, and never reused; the table only grows
/// for the lifetime of the owning VM.
#[derive(Debug)]
pub struct ExternalObjects {
    items: Vec<HostData>,
}

impl ExternalObjects {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        ExternalObjects {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Append a host pointer, returning its new dense index.
    pub(crate) fn push(&mut self, object: HostData) -> ExternResult<u32> {
        self.items.try_reserve(1).map_err(|_| ExternError::Alloc)?;
        let index = self.items.len() as u32;
        self.items.push(object);
        Ok(index)
    }

    /// Get the host pointer recorded at `index`.
    pub fn get(&self, index: u32) -> Option<HostData> {
        self.items.get(index as usize).copied()
    }

    /// Number of bound host objects.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if no host objects have been bound.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Recover the dotted access path of a native method.
///
/// Depth-first search over every registered root, in registration
/// order; children are tried in their table's unspecified iteration
/// order. The reconstructed path carries a separator after every
/// segment including the last (`"console.log."`).
///
/// `None` means the function is not exposed anywhere in the forest —
/// the diagnostics renderer reports it as an anonymous native function.
pub(crate) fn match_native_function(
    prototypes: &[Arc<ExternProto>],
    func: NativeMethodFn,
) -> Option<String> {
    let mut trail: Vec<&str> = Vec::new();

    for root in prototypes {
        trail.push(root.name());
        if let Some(path) = match_node(root, func, &mut trail) {
            return Some(path);
        }
        trail.pop();
    }

    None
}

fn match_node<'a>(
    node: &'a ExternProto,
    func: NativeMethodFn,
    trail: &mut Vec<&'a str>,
) -> Option<String> {
    if let Some(thunk) = node.function() {
        if std::ptr::fn_addr_eq(thunk.native(), func) {
            return Some(join_trail(trail));
        }
    }

    for child in node.properties() {
        trail.push(child.name());
        if let Some(path) = match_node(child, func, trail) {
            return Some(path);
        }
        trail.pop();
    }

    None
}

fn join_trail(trail: &[&str]) -> String {
    let len: usize = trail.iter().map(|segment| segment.len() + 1).sum();
    let mut path = String::with_capacity(len);

    for segment in trail {
        path.push_str(segment);
        path.push('.');
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_sdk::{NativeCallResult, NativeValue};

    fn log_fn(_args: &[NativeValue]) -> NativeCallResult {
        NativeCallResult::null()
    }

    fn error_fn(_args: &[NativeValue]) -> NativeCallResult {
        NativeCallResult::Error("boom".to_string())
    }

    fn unregistered_fn(_args: &[NativeValue]) -> NativeCallResult {
        NativeCallResult::bool(false)
    }

    fn get_version(_obj: HostData, _data: HostData) -> NativeCallResult {
        NativeCallResult::i32(3)
    }

    fn console_decl() -> ExternDecl {
        ExternDecl::object("console").with_properties(vec![
            ExternDecl::method("log", log_fn),
            ExternDecl::method("error", error_fn),
            ExternDecl::property("version").with_get(get_version),
        ])
    }

    #[test]
    fn test_registrar_builds_child_tables() {
        let proto = ExternProto::from_decl(&console_decl()).unwrap();

        assert_eq!(proto.name(), "console");
        assert_eq!(proto.kind(), ExternKind::Object);
        assert_eq!(proto.property_count(), 3);

        // Every declared name resolves to its node
        let log = proto.property("log").unwrap();
        assert_eq!(log.kind(), ExternKind::Method);
        assert!(log.function().is_some());

        let version = proto.property("version").unwrap();
        assert_eq!(version.kind(), ExternKind::Property);
        assert!(version.get().is_some());
        assert!(version.function().is_none());

        // Undeclared names do not
        assert!(proto.property("warn").is_none());
        assert!(proto.property("").is_none());
    }

    #[test]
    fn test_registrar_deep_nesting() {
        let decl = ExternDecl::object("app").with_properties(vec![ExternDecl::object("db")
            .with_properties(vec![ExternDecl::method("query", log_fn)])]);

        let proto = ExternProto::from_decl(&decl).unwrap();
        let query = proto.property("db").unwrap().property("query").unwrap();
        assert!(query.function().is_some());
    }

    #[test]
    fn test_duplicate_sibling_rejected() {
        let decl = ExternDecl::object("console").with_properties(vec![
            ExternDecl::method("log", log_fn),
            ExternDecl::method("log", error_fn),
        ]);

        let err = ExternProto::from_decl(&decl).unwrap_err();
        assert!(matches!(err, ExternError::DuplicateBinding(name) if name == "log"));
    }

    #[test]
    fn test_method_thunk_receiver_offset() {
        let proto = ExternProto::from_decl(&console_decl()).unwrap();
        let thunk = proto.property("log").unwrap().function().unwrap();
        assert_eq!(thunk.args_offset(), 1);
    }

    #[test]
    fn test_opaque_data_passthrough() {
        let mut payload = 7u8;
        let data = HostData::from_ptr(&mut payload as *mut u8 as *mut ());

        let decl = ExternDecl::property("state").with_get(get_version).with_data(data);
        let proto = ExternProto::from_decl(&decl).unwrap();
        assert_eq!(proto.data(), data);
    }

    #[test]
    fn test_binding_table_dense_indices() {
        let mut objects = ExternalObjects::with_capacity(2);
        assert!(objects.is_empty());

        let mut a = 1u32;
        let mut b = 2u32;
        let pa = HostData::from_ptr(&mut a as *mut u32 as *mut ());
        let pb = HostData::from_ptr(&mut b as *mut u32 as *mut ());

        assert_eq!(objects.push(pa).unwrap(), 0);
        assert_eq!(objects.push(pb).unwrap(), 1);
        assert_eq!(objects.len(), 2);

        assert_eq!(objects.get(0), Some(pa));
        assert_eq!(objects.get(1), Some(pb));
        assert_eq!(objects.get(2), None);
    }

    #[test]
    fn test_match_nested_method_path() {
        let root = Arc::new(ExternProto::from_decl(&console_decl()).unwrap());
        let forest = vec![root];

        // Trailing separator after the last segment
        assert_eq!(
            match_native_function(&forest, log_fn).as_deref(),
            Some("console.log.")
        );
        assert_eq!(
            match_native_function(&forest, error_fn).as_deref(),
            Some("console.error.")
        );
    }

    #[test]
    fn test_match_unregistered_function() {
        let root = Arc::new(ExternProto::from_decl(&console_decl()).unwrap());
        assert_eq!(match_native_function(&[root], unregistered_fn), None);
    }

    #[test]
    fn test_match_empty_forest() {
        assert_eq!(match_native_function(&[], log_fn), None);
    }

    #[test]
    fn test_match_searches_whole_forest() {
        let console = Arc::new(ExternProto::from_decl(&console_decl()).unwrap());
        let timer = Arc::new(
            ExternProto::from_decl(
                &ExternDecl::object("timer")
                    .with_properties(vec![ExternDecl::method("start", unregistered_fn)]),
            )
            .unwrap(),
        );

        let forest = vec![console, timer];
        assert_eq!(
            match_native_function(&forest, unregistered_fn).as_deref(),
            Some("timer.start.")
        );
    }
}
