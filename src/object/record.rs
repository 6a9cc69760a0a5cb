//! Hand-built objects.
//!
//! `Record` lets host code describe an object field by field, including
//! getters that may fail when read:
//!
//! ```
//! use objscope::object::{self, AccessError, Inspect, Record};
//!
//! let config = Record::new("Config")
//!     .with_doc("Runtime settings.")
//!     .attr("verbose", object::value(true.into()))
//!     .getter("token", || Err(AccessError::Raised("not logged in".into())))
//!     .into_ref();
//! assert_eq!(config.attribute_names(), vec!["verbose", "token"]);
//! ```

use std::rc::Rc;

use super::{
    AccessError, Inspect, Item, ItemKey, ObjectKind, ObjectRef, ReprError, ReprWriter,
};

type Getter = Rc<dyn Fn() -> Result<ObjectRef, AccessError>>;

#[derive(Clone)]
enum Slot {
    Value(ObjectRef),
    Getter(Getter),
}

#[derive(Clone)]
pub struct Record {
    type_name: String,
    kind: ObjectKind,
    doc: Option<String>,
    source: Option<(String, String)>,
    attrs: Vec<(String, Slot)>,
    items: Option<Vec<(ItemKey, ObjectRef)>>,
    repr: Option<String>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            kind: ObjectKind::Value,
            doc: None,
            source: None,
            attrs: Vec::new(),
            items: None,
            repr: None,
        }
    }

    pub fn with_kind(mut self, kind: ObjectKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Attach source text and the syntax token used to highlight it.
    pub fn with_source(mut self, code: impl Into<String>, language: impl Into<String>) -> Self {
        self.source = Some((code.into(), language.into()));
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: ObjectRef) -> Self {
        self.attrs.push((name.into(), Slot::Value(value)));
        self
    }

    /// Attribute whose value is computed on every read.
    pub fn getter<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> Result<ObjectRef, AccessError> + 'static,
    {
        self.attrs.push((name.into(), Slot::Getter(Rc::new(f))));
        self
    }

    /// Add an indexed entry. The first call turns the record into a container.
    pub fn item(mut self, key: ItemKey, value: ObjectRef) -> Self {
        self.items.get_or_insert_with(Vec::new).push((key, value));
        self
    }

    /// Fixed representation text instead of the generated `Type(a=..)` form.
    pub fn repr_text(mut self, text: impl Into<String>) -> Self {
        self.repr = Some(text.into());
        self
    }

    pub fn into_ref(self) -> ObjectRef {
        Rc::new(self)
    }
}

impl Inspect for Record {
    fn type_name(&self) -> String {
        self.type_name.clone()
    }

    fn kind(&self) -> ObjectKind {
        self.kind
    }

    fn attribute_names(&self) -> Vec<String> {
        self.attrs.iter().map(|(name, _)| name.clone()).collect()
    }

    fn get_attribute(&self, name: &str) -> Result<ObjectRef, AccessError> {
        match self.attrs.iter().find(|(n, _)| n == name) {
            Some((_, Slot::Value(v))) => Ok(Rc::clone(v)),
            Some((_, Slot::Getter(f))) => f(),
            None => Err(AccessError::Missing(name.to_string())),
        }
    }

    fn items(&self) -> Option<Vec<Item>> {
        self.items.as_ref().map(|entries| {
            entries
                .iter()
                .map(|(key, value)| Item {
                    key: key.clone(),
                    value: Ok(Rc::clone(value)),
                })
                .collect()
        })
    }

    fn doc(&self) -> Option<String> {
        self.doc.clone()
    }

    fn source(&self) -> Option<String> {
        self.source.as_ref().map(|(code, _)| code.clone())
    }

    fn source_language(&self) -> &str {
        self.source.as_ref().map_or("rs", |(_, lang)| lang.as_str())
    }

    fn len(&self) -> Option<usize> {
        self.items.as_ref().map(Vec::len)
    }

    fn write_repr(&self, out: &mut ReprWriter<'_>) -> Result<(), ReprError> {
        if let Some(text) = &self.repr {
            return out.write_str(text);
        }
        out.write_str(&self.type_name)?;
        out.write_str("(")?;
        let mut first = true;
        for (name, slot) in &self.attrs {
            // Getters are never run just to build a preview.
            let Slot::Value(value) = slot else {
                continue;
            };
            if !first {
                out.write_str(", ")?;
            }
            first = false;
            out.write_str(name)?;
            out.write_str("=")?;
            out.nested(value.as_ref())?;
        }
        out.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ReprLimits, render_repr, value};
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn test_getter_runs_on_each_read() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let record = Record::new("Counter").getter("n", move || {
            counter.set(counter.get() + 1);
            Ok(value(json!(counter.get())))
        });
        record.get_attribute("n").unwrap();
        record.get_attribute("n").unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_failing_getter_reports_error() {
        let record = Record::new("Flaky").getter("boom", || Err(AccessError::Raised("nope".into())));
        assert_eq!(
            record.get_attribute("boom").unwrap_err(),
            AccessError::Raised("nope".into())
        );
    }

    #[test]
    fn test_generated_repr_skips_getters() {
        let record = Record::new("Point")
            .attr("x", value(json!(1)))
            .getter("norm", || Ok(value(json!(1.0))))
            .attr("y", value(json!(2)));
        let repr = render_repr(&record, ReprLimits::default());
        assert_eq!(repr.text, "Point(x=1, y=2)");
    }

    #[test]
    fn test_items_make_a_container() {
        let record = Record::new("Bag")
            .with_kind(ObjectKind::Sequence)
            .item(ItemKey::Index(0), value(json!("a")));
        assert_eq!(record.len(), Some(1));
        assert_eq!(record.items().unwrap()[0].key, ItemKey::Index(0));
        assert!(Record::new("Plain").items().is_none());
    }

    #[test]
    fn test_source_language_defaults_to_rust() {
        assert_eq!(Record::new("F").source_language(), "rs");
        let f = Record::new("F").with_source("def f(): pass", "py");
        assert_eq!(f.source_language(), "py");
        assert_eq!(f.source().as_deref(), Some("def f(): pass"));
    }
}
