//! # Overview
//!
//! Render-mode state for the right-hand pane, and the pages it can open
//! full-screen.
//!
//! ```text
//! content: All | Docstring | Value      // d / p
//! preview: Repr | Source                // { / }, callables only
//! ```

use std::fmt::Write as _;

use super::cached::{CachedObject, NodeId, ObjectTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentMode {
    #[default]
    All,
    Docstring,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewMode {
    #[default]
    Repr,
    Source,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overview {
    pub content: ContentMode,
    pub preview: PreviewMode,
}

impl Overview {
    pub fn toggle_docstring(&mut self) {
        self.content = match self.content {
            ContentMode::Docstring => ContentMode::All,
            _ => ContentMode::Docstring,
        };
    }

    pub fn toggle_value(&mut self) {
        self.content = match self.content {
            ContentMode::Value => ContentMode::All,
            _ => ContentMode::Value,
        };
    }

    /// Switch between repr and source. Ignored unless `selected` is callable.
    pub fn toggle_preview(&mut self, selected: Option<&CachedObject>) {
        if !selected.is_some_and(|node| node.callable) {
            return;
        }
        self.preview = match self.preview {
            PreviewMode::Repr => PreviewMode::Source,
            PreviewMode::Source => PreviewMode::Repr,
        };
    }

    /// The preview actually drawn for `node`. Source mode only applies to callables.
    pub fn preview_for(&self, node: &CachedObject) -> PreviewMode {
        if node.callable {
            self.preview
        } else {
            PreviewMode::Repr
        }
    }

    /// Full-screen page for the current preview of `node`.
    pub fn page_for(&self, node: &CachedObject) -> Page {
        if self.content == ContentMode::Docstring {
            return Page {
                title: format!("{} | docstring", node.dotpath),
                body: PageBody::Markdown(node.docstring().unwrap_or("None").to_string()),
            };
        }
        if self.preview_for(node) == PreviewMode::Source {
            if let Some(code) = node.source() {
                return Page {
                    title: format!("{} | source", node.dotpath),
                    body: PageBody::Source {
                        code: code.to_string(),
                        language: node.source_language().to_string(),
                    },
                };
            }
        }
        Page {
            title: format!("{} | repr", node.dotpath),
            body: PageBody::Text(node.full_repr().text.clone()),
        }
    }
}

/// Something shown in the full-screen pager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub body: PageBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageBody {
    Text(String),
    Markdown(String),
    Source { code: String, language: String },
}

/// Human-readable summary of a node and all of its children.
///
/// The node's children must already be cached.
pub fn inspect_report(tree: &ObjectTree, id: NodeId) -> Page {
    let node = tree.get(id);
    let mut out = String::new();

    let _ = writeln!(out, "{} : {}", node.dotpath, node.type_name);
    let _ = writeln!(out);
    let _ = writeln!(out, "  repr      {}", node.repr().text);
    if let Some(len) = node.len() {
        let _ = writeln!(out, "  len       {len}");
    }
    let _ = writeln!(out, "  callable  {}", if node.callable { "yes" } else { "no" });
    if let Some(err) = node.error() {
        let _ = writeln!(out, "  error     {err}");
    }
    if let Some(doc) = node.docstring() {
        let _ = writeln!(out);
        for line in doc.lines() {
            let _ = writeln!(out, "  {line}");
        }
    }

    if let Some(children) = node.children() {
        section(&mut out, tree, "public attributes", &children.public);
        section(&mut out, tree, "private attributes", &children.private);
        if children.container {
            section(&mut out, tree, "items", &children.items);
        }
    }

    Page {
        title: format!("{} | inspect", node.dotpath),
        body: PageBody::Text(out),
    }
}

fn section(out: &mut String, tree: &ObjectTree, heading: &str, ids: &[NodeId]) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{heading} ({})", ids.len());
    let width = ids
        .iter()
        .map(|id| tree.get(*id).name.chars().count())
        .max()
        .unwrap_or(0);
    for id in ids {
        let child = tree.get(*id);
        let marker = if child.callable { "()" } else { "  " };
        let _ = writeln!(
            out,
            "  {:<width$}{marker} {} = {}",
            child.name,
            child.type_name,
            child.repr().text,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cached::DisplayLimits;
    use crate::object::{ObjectKind, Record, value};
    use serde_json::json;

    fn node_of(obj: crate::object::ObjectRef) -> ObjectTree {
        ObjectTree::new(obj, "obj", DisplayLimits::default())
    }

    fn function() -> crate::object::ObjectRef {
        Record::new("fn")
            .with_kind(ObjectKind::Callable)
            .with_doc("Adds things.")
            .with_source("fn add(a: i32, b: i32) -> i32 { a + b }", "rs")
            .repr_text("<fn add>")
            .into_ref()
    }

    #[test]
    fn test_content_toggles_return_to_all() {
        let mut overview = Overview::default();
        overview.toggle_docstring();
        assert_eq!(overview.content, ContentMode::Docstring);
        overview.toggle_value();
        assert_eq!(overview.content, ContentMode::Value);
        overview.toggle_value();
        assert_eq!(overview.content, ContentMode::All);
    }

    #[test]
    fn test_preview_toggle_requires_callable() {
        let mut overview = Overview::default();
        let plain = node_of(value(json!(3)));
        overview.toggle_preview(Some(plain.root()));
        assert_eq!(overview.preview, PreviewMode::Repr);
        overview.toggle_preview(None);
        assert_eq!(overview.preview, PreviewMode::Repr);

        let f = node_of(function());
        overview.toggle_preview(Some(f.root()));
        assert_eq!(overview.preview, PreviewMode::Source);
        assert_eq!(overview.preview_for(plain.root()), PreviewMode::Repr);
    }

    #[test]
    fn test_page_follows_modes() {
        let f = node_of(function());
        let mut overview = Overview::default();
        assert_eq!(overview.page_for(f.root()).body, PageBody::Text("<fn add>".into()));

        overview.toggle_preview(Some(f.root()));
        assert!(matches!(
            overview.page_for(f.root()).body,
            PageBody::Source { ref language, .. } if language == "rs"
        ));

        overview.toggle_docstring();
        assert_eq!(
            overview.page_for(f.root()).body,
            PageBody::Markdown("Adds things.".into())
        );
    }

    #[test]
    fn test_source_mode_without_source_falls_back_to_repr() {
        let obj = Record::new("native")
            .with_kind(ObjectKind::Callable)
            .repr_text("<native>")
            .into_ref();
        let tree = node_of(obj);
        let overview = Overview {
            preview: PreviewMode::Source,
            ..Overview::default()
        };
        assert_eq!(overview.page_for(tree.root()).body, PageBody::Text("<native>".into()));
    }

    #[test]
    fn test_inspect_report_lists_children() {
        let mut tree = node_of(crate::test_support::sample_object());
        tree.cache_children(NodeId::ROOT);
        let page = inspect_report(&tree, NodeId::ROOT);
        let PageBody::Text(text) = page.body else {
            panic!("report should be plain text");
        };
        assert!(text.starts_with("obj : Sample"));
        assert!(text.contains("public attributes (3)"));
        assert!(text.contains("private attributes (1)"));
        assert!(text.contains("_x"));
        assert!(!text.contains("items ("));
    }
}
