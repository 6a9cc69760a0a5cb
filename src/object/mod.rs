//! # Object Model
//!
//! Anything that can be explored implements [`Inspect`]. The explorer only
//! ever holds [`ObjectRef`] handles to the objects it walks; it never copies
//! or mutates them.
//!
//! ```text
//! Inspect
//! ├── type_name / kind / is_callable   // classification
//! ├── attribute_names / get_attribute  // dir()-style enumeration
//! ├── items                            // indexed entries of containers
//! ├── doc / source                     // reflection metadata
//! └── write_repr                       // bounded representation
//! ```
//!
//! Attribute access is fallible on purpose: a getter may run arbitrary code,
//! and its failure is reported as an [`AccessError`] value instead of
//! unwinding through the enumeration.

pub mod json;
pub mod record;

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

pub use json::JsonNode;
pub use record::Record;

/// Shared handle to an explored object.
pub type ObjectRef = Rc<dyn Inspect>;

/// Suffix appended when a representation hit the length cap.
pub const TRUNCATION_MARKER: &str = "…";

/// Written in place of a nested value once the depth cap is reached.
pub const ELISION: &str = "...";

/// Coarse classification used for styling and for picking the initial view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Module,
    Type,
    Callable,
    Mapping,
    Sequence,
    Value,
}

/// Failure while resolving one attribute or item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The getter ran and reported an error.
    #[error("{0}")]
    Raised(String),
    /// The name was listed but could not be found on lookup.
    #[error("no attribute named `{0}`")]
    Missing(String),
    #[error("attribute access is not supported")]
    Unsupported,
}

/// Failure while producing a representation string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReprError {
    /// The length cap was reached; whatever was written so far is kept.
    #[error("representation truncated")]
    Truncated,
    #[error("representation failed: {0}")]
    Failed(String),
}

impl From<fmt::Error> for ReprError {
    fn from(_: fmt::Error) -> Self {
        ReprError::Failed("formatter error".to_string())
    }
}

/// Key of an indexed entry (`[0]`, `["name"]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKey {
    Index(usize),
    Key(String),
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Index(i) => write!(f, "{i}"),
            ItemKey::Key(k) => write!(f, "{k:?}"),
        }
    }
}

/// One indexed entry of a container, resolved or not.
pub struct Item {
    pub key: ItemKey,
    pub value: Result<ObjectRef, AccessError>,
}

/// Reflection surface of an explorable object.
///
/// Only `type_name` is required. Everything else defaults to "an opaque
/// value with no attributes".
pub trait Inspect {
    fn type_name(&self) -> String;

    fn kind(&self) -> ObjectKind {
        ObjectKind::Value
    }

    fn is_callable(&self) -> bool {
        self.kind() == ObjectKind::Callable
    }

    /// Attribute names, in any order. Callers sort and de-duplicate.
    fn attribute_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn get_attribute(&self, name: &str) -> Result<ObjectRef, AccessError> {
        Err(AccessError::Missing(name.to_string()))
    }

    /// Indexed entries, or `None` when this is not a container.
    fn items(&self) -> Option<Vec<Item>> {
        None
    }

    fn doc(&self) -> Option<String> {
        None
    }

    fn source(&self) -> Option<String> {
        None
    }

    /// Syntax token used to highlight [`Inspect::source`].
    fn source_language(&self) -> &str {
        "rs"
    }

    fn len(&self) -> Option<usize> {
        None
    }

    /// "Nothing here" values are rendered dimmed.
    fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Write the representation. Nested objects must go through
    /// [`ReprWriter::nested`] so the depth cap applies.
    fn write_repr(&self, out: &mut ReprWriter<'_>) -> Result<(), ReprError> {
        out.write_str(&placeholder(self))
    }
}

impl fmt::Debug for dyn Inspect + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.type_name())
    }
}

/// Generic stand-in used whenever a representation cannot be produced.
pub fn placeholder(object: &(impl Inspect + ?Sized)) -> String {
    format!("<{} object>", object.type_name())
}

/// Wrap a JSON value as an explorable object.
pub fn value(v: serde_json::Value) -> ObjectRef {
    JsonNode::new(v).into_ref()
}

/// Size and nesting bounds for one representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReprLimits {
    /// Maximum characters before the truncation marker.
    pub max_len: usize,
    /// Maximum nesting before children are elided.
    pub max_depth: usize,
}

impl Default for ReprLimits {
    fn default() -> Self {
        Self {
            max_len: 512,
            max_depth: 6,
        }
    }
}

/// Length- and depth-capped sink for [`Inspect::write_repr`].
pub struct ReprWriter<'a> {
    buf: &'a mut String,
    limits: ReprLimits,
    depth: usize,
    written: usize,
    truncated: bool,
}

impl<'a> ReprWriter<'a> {
    pub fn new(buf: &'a mut String, limits: ReprLimits) -> Self {
        Self {
            buf,
            limits,
            depth: 0,
            written: 0,
            truncated: false,
        }
    }

    /// Append text. Returns `Err(Truncated)` once the length cap is hit so
    /// callers using `?` stop early.
    pub fn write_str(&mut self, s: &str) -> Result<(), ReprError> {
        if self.truncated {
            return Err(ReprError::Truncated);
        }
        let remaining = self.limits.max_len.saturating_sub(self.written);
        let count = s.chars().count();
        if count <= remaining {
            self.buf.push_str(s);
            self.written += count;
            return Ok(());
        }
        self.buf.extend(s.chars().take(remaining));
        self.written = self.limits.max_len;
        self.truncated = true;
        Err(ReprError::Truncated)
    }

    /// Write a child object one level deeper, eliding it past the depth cap.
    pub fn nested(&mut self, child: &dyn Inspect) -> Result<(), ReprError> {
        if self.depth >= self.limits.max_depth {
            return self.write_str(ELISION);
        }
        self.depth += 1;
        let result = child.write_repr(self);
        self.depth -= 1;
        result
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// A finished representation string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repr {
    pub text: String,
    pub truncated: bool,
    /// True when the object's own routine failed and a placeholder was used.
    pub fallback: bool,
}

/// Produce a bounded representation, containing any failure.
pub fn render_repr(object: &dyn Inspect, limits: ReprLimits) -> Repr {
    let mut text = String::new();
    let (result, truncated) = {
        let mut writer = ReprWriter::new(&mut text, limits);
        let result = writer.nested(object);
        (result, writer.is_truncated())
    };
    match result {
        Err(ReprError::Failed(reason)) => {
            log::warn!("repr of {} failed: {}", object.type_name(), reason);
            Repr {
                text: placeholder(object),
                truncated: false,
                fallback: true,
            }
        }
        _ if truncated => {
            text.push_str(TRUNCATION_MARKER);
            Repr {
                text,
                truncated: true,
                fallback: false,
            }
        }
        _ => Repr {
            text,
            truncated: false,
            fallback: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Chatty;

    impl Inspect for Chatty {
        fn type_name(&self) -> String {
            "Chatty".into()
        }

        fn write_repr(&self, out: &mut ReprWriter<'_>) -> Result<(), ReprError> {
            loop {
                out.write_str("blah ")?;
            }
        }
    }

    struct Ouroboros;

    impl Inspect for Ouroboros {
        fn type_name(&self) -> String {
            "Ouroboros".into()
        }

        fn write_repr(&self, out: &mut ReprWriter<'_>) -> Result<(), ReprError> {
            out.write_str("[")?;
            out.nested(self)?;
            out.write_str("]")
        }
    }

    struct Broken;

    impl Inspect for Broken {
        fn type_name(&self) -> String {
            "Broken".into()
        }

        fn write_repr(&self, _out: &mut ReprWriter<'_>) -> Result<(), ReprError> {
            Err(ReprError::Failed("boom".into()))
        }
    }

    #[test]
    fn test_runaway_repr_is_truncated() {
        let limits = ReprLimits { max_len: 20, max_depth: 4 };
        let repr = render_repr(&Chatty, limits);
        assert!(repr.truncated);
        assert!(repr.text.ends_with(TRUNCATION_MARKER));
        assert_eq!(repr.text.chars().count(), 20 + TRUNCATION_MARKER.chars().count());
    }

    #[test]
    fn test_self_referential_repr_is_elided() {
        let limits = ReprLimits { max_len: 100, max_depth: 3 };
        let repr = render_repr(&Ouroboros, limits);
        assert_eq!(repr.text, "[[[...]]]");
        assert!(!repr.truncated);
    }

    #[test]
    fn test_failing_repr_falls_back_to_placeholder() {
        let repr = render_repr(&Broken, ReprLimits::default());
        assert!(repr.fallback);
        assert_eq!(repr.text, "<Broken object>");
    }

    #[test]
    fn test_item_key_display() {
        assert_eq!(ItemKey::Index(3).to_string(), "3");
        assert_eq!(ItemKey::Key("a b".into()).to_string(), "\"a b\"");
    }

    #[test]
    fn test_default_repr_is_placeholder() {
        struct Opaque;
        impl Inspect for Opaque {
            fn type_name(&self) -> String {
                "Opaque".into()
            }
        }
        let repr = render_repr(&Opaque, ReprLimits::default());
        assert_eq!(repr.text, "<Opaque object>");
        assert!(!repr.fallback);
    }
}
