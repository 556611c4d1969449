//! Extension declarations
//!
//! A host exposes native objects by handing the engine a tree of
//! [`ExternDecl`] values at VM setup time. The engine's registrar turns
//! the tree into its internal prototype nodes; after that the
//! declarations are no longer needed.

use crate::handler::{
    ExternFindFn, ExternForeachFn, ExternGetFn, ExternNextFn, ExternSetFn, NativeMethodFn,
};
use crate::value::HostData;

/// What kind of script-visible member a declaration describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternKind {
    /// Plain named property
    Property,
    /// Object property with dynamically keyed / enumerable entries
    Object,
    /// Callable method
    Method,
}

/// One node of a host extension declaration tree.
///
/// `name` must be unique among siblings; the registrar rejects
/// duplicates. All callback slots are optional — a node may implement
/// any subset. An empty `properties` list makes the node a leaf.
#[derive(Debug, Clone)]
pub struct ExternDecl {
    /// Script-visible member name, unique among siblings
    pub name: String,
    /// Member kind
    pub kind: ExternKind,
    /// Property getter
    pub get: Option<ExternGetFn>,
    /// Property setter
    pub set: Option<ExternSetFn>,
    /// Keyed lookup for dynamic entries
    pub find: Option<ExternFindFn>,
    /// Enumeration start
    pub foreach: Option<ExternForeachFn>,
    /// Enumeration step
    pub next: Option<ExternNextFn>,
    /// Native method implementation; the engine wraps it in a thunk
    /// that passes the owning external value as the implicit first
    /// argument
    pub method: Option<NativeMethodFn>,
    /// Nested child declarations
    pub properties: Vec<ExternDecl>,
    /// Opaque per-node data passed through to accessor callbacks
    pub data: HostData,
}

impl ExternDecl {
    fn new(name: impl Into<String>, kind: ExternKind) -> Self {
        ExternDecl {
            name: name.into(),
            kind,
            get: None,
            set: None,
            find: None,
            foreach: None,
            next: None,
            method: None,
            properties: Vec::new(),
            data: HostData::null(),
        }
    }

    /// Declare a plain property.
    pub fn property(name: impl Into<String>) -> Self {
        Self::new(name, ExternKind::Property)
    }

    /// Declare an object property (dynamically keyed / enumerable).
    pub fn object(name: impl Into<String>) -> Self {
        Self::new(name, ExternKind::Object)
    }

    /// Declare a callable method.
    pub fn method(name: impl Into<String>, method: NativeMethodFn) -> Self {
        let mut decl = Self::new(name, ExternKind::Method);
        decl.method = Some(method);
        decl
    }

    /// Attach a property getter.
    pub fn with_get(mut self, get: ExternGetFn) -> Self {
        self.get = Some(get);
        self
    }

    /// Attach a property setter.
    pub fn with_set(mut self, set: ExternSetFn) -> Self {
        self.set = Some(set);
        self
    }

    /// Attach a keyed lookup callback.
    pub fn with_find(mut self, find: ExternFindFn) -> Self {
        self.find = Some(find);
        self
    }

    /// Attach enumeration callbacks (start + step).
    pub fn with_enumeration(mut self, foreach: ExternForeachFn, next: ExternNextFn) -> Self {
        self.foreach = Some(foreach);
        self.next = Some(next);
        self
    }

    /// Attach nested child declarations.
    pub fn with_properties(mut self, properties: Vec<ExternDecl>) -> Self {
        self.properties = properties;
        self
    }

    /// Attach opaque per-node data.
    pub fn with_data(mut self, data: HostData) -> Self {
        self.data = data;
        self
    }
}
