//! # Object Cache
//!
//! Every object the user has seen gets one `CachedObject` node. Nodes live
//! in an arena (`ObjectTree`) and refer to each other by `NodeId`, so the
//! parent link is a plain index and never keeps anything alive.
//!
//! ```text
//! ObjectTree
//! └── nodes: Vec<CachedObject>
//!     ├── [0] root            parent: None
//!     ├── [1] root.a          parent: Some(0)
//!     ├── [2] root._x         parent: Some(0)
//!     └── [3] root.a[0]       parent: Some(1)
//! ```
//!
//! Children are enumerated once, on first visit, and the resulting lists are
//! never reordered or shrunk afterwards. Filters only mask them.

use std::cell::OnceCell;
use std::rc::Rc;

use log::{debug, warn};

use crate::object::{AccessError, ObjectKind, ObjectRef, Repr, ReprLimits, render_repr};

/// Index of a node inside an [`ObjectTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// Names with a leading underscore are private.
    pub fn of(name: &str) -> Self {
        if name.starts_with('_') {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }
}

/// What a node points at: the object itself, or the reason it could not be read.
#[derive(Debug, Clone)]
pub enum Target {
    Resolved(ObjectRef),
    Inaccessible(AccessError),
}

/// Representation bounds for the preview pane and the full-screen pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLimits {
    pub preview: ReprLimits,
    pub pager: ReprLimits,
}

impl Default for DisplayLimits {
    fn default() -> Self {
        Self {
            preview: ReprLimits::default(),
            pager: ReprLimits {
                max_len: 65_536,
                max_depth: 32,
            },
        }
    }
}

/// Child lists produced by a single enumeration pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children {
    pub public: Vec<NodeId>,
    pub private: Vec<NodeId>,
    pub items: Vec<NodeId>,
    /// The object reported indexed entries, even if there were none.
    pub container: bool,
}

#[derive(Debug)]
pub struct CachedObject {
    pub name: String,
    pub dotpath: String,
    pub target: Target,
    pub type_name: String,
    pub kind: ObjectKind,
    pub visibility: Visibility,
    pub callable: bool,
    pub parent: Option<NodeId>,
    children: Option<Children>,
    limits: DisplayLimits,
    doc: OnceCell<Option<String>>,
    source: OnceCell<Option<String>>,
    repr: OnceCell<Repr>,
    full_repr: OnceCell<Repr>,
}

impl CachedObject {
    fn build(
        target: Target,
        name: String,
        dotpath: String,
        parent: Option<NodeId>,
        limits: DisplayLimits,
    ) -> Self {
        let (type_name, kind, callable) = match &target {
            Target::Resolved(obj) => (obj.type_name(), obj.kind(), obj.is_callable()),
            Target::Inaccessible(_) => ("inaccessible".to_string(), ObjectKind::Value, false),
        };
        Self {
            visibility: Visibility::of(&name),
            name,
            dotpath,
            target,
            type_name,
            kind,
            callable,
            parent,
            children: None,
            limits,
            doc: OnceCell::new(),
            source: OnceCell::new(),
            repr: OnceCell::new(),
            full_repr: OnceCell::new(),
        }
    }

    pub fn object(&self) -> Option<&ObjectRef> {
        match &self.target {
            Target::Resolved(obj) => Some(obj),
            Target::Inaccessible(_) => None,
        }
    }

    pub fn error(&self) -> Option<&AccessError> {
        match &self.target {
            Target::Resolved(_) => None,
            Target::Inaccessible(err) => Some(err),
        }
    }

    pub fn is_accessible(&self) -> bool {
        self.error().is_none()
    }

    pub fn is_cached(&self) -> bool {
        self.children.is_some()
    }

    pub fn children(&self) -> Option<&Children> {
        self.children.as_ref()
    }

    /// Whether descending makes sense. Only meaningful once children are cached.
    pub fn is_navigable(&self) -> bool {
        match &self.children {
            Some(c) => c.container || !c.public.is_empty() || !c.private.is_empty(),
            None => false,
        }
    }

    pub fn is_container(&self) -> bool {
        self.children.as_ref().is_some_and(|c| c.container)
    }

    /// Dedented docstring, computed once.
    pub fn docstring(&self) -> Option<&str> {
        self.doc
            .get_or_init(|| {
                let raw = self.object()?.doc()?;
                let text = textwrap::dedent(&raw).trim().to_string();
                (!text.is_empty()).then_some(text)
            })
            .as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source
            .get_or_init(|| self.object()?.source().filter(|s| !s.trim().is_empty()))
            .as_deref()
    }

    pub fn source_language(&self) -> &str {
        self.object().map_or("txt", |obj| obj.source_language())
    }

    /// Bounded one-line representation for the preview pane.
    pub fn repr(&self) -> &Repr {
        self.repr.get_or_init(|| self.render(self.limits.preview))
    }

    /// Representation with the larger pager bounds.
    pub fn full_repr(&self) -> &Repr {
        self.full_repr.get_or_init(|| self.render(self.limits.pager))
    }

    fn render(&self, limits: ReprLimits) -> Repr {
        match &self.target {
            Target::Resolved(obj) => render_repr(obj.as_ref(), limits),
            Target::Inaccessible(err) => Repr {
                text: format!("<inaccessible: {err}>"),
                truncated: false,
                fallback: true,
            },
        }
    }

    pub fn len(&self) -> Option<usize> {
        self.object().and_then(|obj| obj.len())
    }

    /// Null-ish and zero-length values are drawn dimmed.
    pub fn is_empty(&self) -> bool {
        self.object().is_none_or(|obj| obj.is_empty())
    }
}

/// Arena that owns every cached node of one session.
#[derive(Debug)]
pub struct ObjectTree {
    nodes: Vec<CachedObject>,
    limits: DisplayLimits,
}

impl ObjectTree {
    pub fn new(root: ObjectRef, name: &str, limits: DisplayLimits) -> Self {
        let node = CachedObject::build(
            Target::Resolved(root),
            name.to_string(),
            name.to_string(),
            None,
            limits,
        );
        Self {
            nodes: vec![node],
            limits,
        }
    }

    /// Panics on an id from a different tree. Ids are only minted here.
    pub fn get(&self, id: NodeId) -> &CachedObject {
        &self.nodes[id.0]
    }

    pub fn root(&self) -> &CachedObject {
        self.get(NodeId::ROOT)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ancestors from the root down to `id`, inclusive.
    pub fn lineage(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = vec![id];
        let mut cursor = self.get(id).parent;
        while let Some(parent) = cursor {
            chain.push(parent);
            cursor = self.get(parent).parent;
        }
        chain.reverse();
        chain
    }

    /// Enumerate the children of `id` once. Later calls are no-ops.
    ///
    /// A failing getter never aborts the pass: the attribute is kept as an
    /// inaccessible placeholder and the remaining names are still resolved.
    pub fn cache_children(&mut self, id: NodeId) -> &Children {
        if self.get(id).children.is_none() {
            let children = self.enumerate(id);
            self.nodes[id.0].children = Some(children);
        }
        self.nodes[id.0].children.get_or_insert_with(Children::default)
    }

    fn enumerate(&mut self, id: NodeId) -> Children {
        let parent = self.get(id);
        let mut children = Children::default();
        let Some(obj) = parent.object().map(Rc::clone) else {
            return children;
        };
        let dotpath = parent.dotpath.clone();

        let mut names = obj.attribute_names();
        names.sort();
        names.dedup();

        for name in names {
            let target = match obj.get_attribute(&name) {
                Ok(value) => Target::Resolved(value),
                Err(err) => {
                    warn!("{dotpath}.{name} is inaccessible: {err}");
                    Target::Inaccessible(err)
                }
            };
            let visibility = Visibility::of(&name);
            let path = format!("{dotpath}.{name}");
            let child = self.push(target, name, path, id);
            match visibility {
                Visibility::Public => children.public.push(child),
                Visibility::Private => children.private.push(child),
            }
        }

        if let Some(items) = obj.items() {
            children.container = true;
            for item in items {
                let label = format!("[{}]", item.key);
                let target = match item.value {
                    Ok(value) => Target::Resolved(value),
                    Err(err) => {
                        warn!("{dotpath}{label} is inaccessible: {err}");
                        Target::Inaccessible(err)
                    }
                };
                let path = format!("{dotpath}{label}");
                let child = self.push(target, label, path, id);
                children.items.push(child);
            }
        }

        debug!(
            "cached {dotpath}: {} public, {} private, {} items",
            children.public.len(),
            children.private.len(),
            children.items.len()
        );
        children
    }

    fn push(&mut self, target: Target, name: String, dotpath: String, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(CachedObject::build(
            target,
            name,
            dotpath,
            Some(parent),
            self.limits,
        ));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Record, value};
    use crate::test_support::{flaky_object, sample_object};
    use serde_json::json;

    fn names(tree: &ObjectTree, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|id| tree.get(*id).name.clone()).collect()
    }

    #[test]
    fn test_build_does_not_enumerate() {
        let tree = ObjectTree::new(sample_object(), "root", DisplayLimits::default());
        assert_eq!(tree.len(), 1);
        assert!(!tree.root().is_cached());
    }

    #[test]
    fn test_children_are_sorted_and_classified() {
        let mut tree = ObjectTree::new(sample_object(), "root", DisplayLimits::default());
        let children = tree.cache_children(NodeId::ROOT).clone();
        assert_eq!(names(&tree, &children.public), vec!["a", "b", "c"]);
        assert_eq!(names(&tree, &children.private), vec!["_x"]);
        assert_eq!(tree.get(children.public[1]).dotpath, "root.b");
        assert_eq!(tree.get(children.public[1]).parent, Some(NodeId::ROOT));
    }

    #[test]
    fn test_children_are_cached_once() {
        let mut tree = ObjectTree::new(sample_object(), "root", DisplayLimits::default());
        let first = tree.cache_children(NodeId::ROOT).clone();
        let size = tree.len();
        let second = tree.cache_children(NodeId::ROOT).clone();
        assert_eq!(first, second);
        assert_eq!(tree.len(), size);
    }

    #[test]
    fn test_raising_getter_becomes_placeholder() {
        let mut tree = ObjectTree::new(flaky_object(), "root", DisplayLimits::default());
        let children = tree.cache_children(NodeId::ROOT).clone();
        assert_eq!(names(&tree, &children.public), vec!["broken", "fine", "zeta"]);
        let broken = tree.get(children.public[0]);
        assert!(!broken.is_accessible());
        assert_eq!(broken.type_name, "inaccessible");
        assert!(broken.repr().text.starts_with("<inaccessible:"));
        assert!(tree.get(children.public[2]).is_accessible());
    }

    #[test]
    fn test_items_get_bracketed_dotpaths() {
        let mut tree = ObjectTree::new(value(json!({"k": [10, 20]})), "doc", DisplayLimits::default());
        let k = tree.cache_children(NodeId::ROOT).public[0];
        let children = tree.cache_children(k).clone();
        assert!(children.container);
        assert_eq!(tree.get(children.items[1]).dotpath, "doc.k[1]");
        assert_eq!(tree.get(children.items[1]).name, "[1]");
        assert_eq!(tree.lineage(children.items[1]), vec![NodeId::ROOT, k, children.items[1]]);
    }

    #[test]
    fn test_docstring_is_dedented_and_memoized() {
        let obj = Record::new("Thing").with_doc("\n    First line.\n      indented\n").into_ref();
        let tree = ObjectTree::new(obj, "t", DisplayLimits::default());
        assert_eq!(tree.root().docstring(), Some("First line.\n  indented"));
        assert!(std::ptr::eq(
            tree.root().docstring().unwrap(),
            tree.root().docstring().unwrap()
        ));
    }

    #[test]
    fn test_leaf_is_not_navigable() {
        let mut tree = ObjectTree::new(value(json!({"n": 1, "e": []})), "r", DisplayLimits::default());
        let children = tree.cache_children(NodeId::ROOT).clone();
        let (e, n) = (children.public[0], children.public[1]);
        tree.cache_children(n);
        tree.cache_children(e);
        assert!(!tree.get(n).is_navigable());
        assert!(tree.get(e).is_navigable());
        assert!(tree.get(e).is_empty());
    }
}
