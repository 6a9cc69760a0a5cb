//! JSON documents as explorable objects.
//!
//! A `JsonNode` is a shared root plus a JSON pointer, so walking into a large
//! document never clones any part of it. Object keys become attributes (a
//! leading `_` makes them private) and arrays expose their elements as items.

use std::rc::Rc;

use serde_json::Value;

use super::{AccessError, Inspect, Item, ItemKey, ObjectKind, ObjectRef, ReprError, ReprWriter};

#[derive(Debug, Clone)]
pub struct JsonNode {
    root: Rc<Value>,
    pointer: String,
}

impl JsonNode {
    pub fn new(value: Value) -> Self {
        Self {
            root: Rc::new(value),
            pointer: String::new(),
        }
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(Self::new)
    }

    pub fn into_ref(self) -> ObjectRef {
        Rc::new(self)
    }

    /// JSON pointer of this node relative to the document root.
    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    fn value(&self) -> &Value {
        self.root.pointer(&self.pointer).unwrap_or(&Value::Null)
    }

    fn child(&self, token: &str) -> JsonNode {
        let escaped = token.replace('~', "~0").replace('/', "~1");
        JsonNode {
            root: Rc::clone(&self.root),
            pointer: format!("{}/{}", self.pointer, escaped),
        }
    }
}

impl Inspect for JsonNode {
    fn type_name(&self) -> String {
        match self.value() {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(n) if n.is_f64() => "float",
            Value::Number(_) => "integer",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
        .to_string()
    }

    fn kind(&self) -> ObjectKind {
        match self.value() {
            Value::Object(_) => ObjectKind::Mapping,
            Value::Array(_) => ObjectKind::Sequence,
            _ => ObjectKind::Value,
        }
    }

    fn attribute_names(&self) -> Vec<String> {
        match self.value() {
            Value::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    fn get_attribute(&self, name: &str) -> Result<ObjectRef, AccessError> {
        match self.value() {
            Value::Object(map) if map.contains_key(name) => Ok(self.child(name).into_ref()),
            Value::Object(_) => Err(AccessError::Missing(name.to_string())),
            _ => Err(AccessError::Unsupported),
        }
    }

    fn items(&self) -> Option<Vec<Item>> {
        let Value::Array(elements) = self.value() else {
            return None;
        };
        Some(
            (0..elements.len())
                .map(|i| Item {
                    key: ItemKey::Index(i),
                    value: Ok(self.child(&i.to_string()).into_ref()),
                })
                .collect(),
        )
    }

    fn len(&self) -> Option<usize> {
        match self.value() {
            Value::Array(a) => Some(a.len()),
            Value::Object(o) => Some(o.len()),
            Value::String(s) => Some(s.chars().count()),
            _ => None,
        }
    }

    fn is_empty(&self) -> bool {
        match self.value() {
            Value::Null => true,
            _ => self.len() == Some(0),
        }
    }

    fn write_repr(&self, out: &mut ReprWriter<'_>) -> Result<(), ReprError> {
        match self.value() {
            Value::Null => out.write_str("null"),
            Value::Bool(b) => out.write_str(if *b { "true" } else { "false" }),
            Value::Number(n) => out.write_str(&n.to_string()),
            Value::String(s) => out.write_str(&quoted(s)),
            Value::Array(elements) => {
                out.write_str("[")?;
                for i in 0..elements.len() {
                    if i > 0 {
                        out.write_str(", ")?;
                    }
                    out.nested(&self.child(&i.to_string()))?;
                }
                out.write_str("]")
            }
            Value::Object(map) => {
                out.write_str("{")?;
                for (i, key) in map.keys().enumerate() {
                    if i > 0 {
                        out.write_str(", ")?;
                    }
                    out.write_str(&quoted(key))?;
                    out.write_str(": ")?;
                    out.nested(&self.child(key))?;
                }
                out.write_str("}")
            }
        }
    }
}

fn quoted(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("{s:?}"))
}
