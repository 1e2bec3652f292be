use crate::{node::Node, value::Value};
use serde_json::Map;
use thiserror::Error as ThisError;

///
/// LoadError
///
/// Document-shape failures raised while building a `Node` tree.
/// Evaluation itself never fails; only loading does.
///

#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("document is not valid json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("document root must be a record or a list of records, found {found}")]
    NotARecordList { found: &'static str },

    #[error("expected a record, found {found}")]
    NotAnObject { found: &'static str },

    #[error("root entry {index} is not a record")]
    NotARecord { index: usize },

    #[error("field '{field}' mixes records with scalar values")]
    MixedArray { field: String },
}

/// Parse a JSON document into its root nodes.
///
/// A single top-level record is accepted as a one-element root list.
pub fn load_roots(document: &str) -> Result<Vec<Node>, LoadError> {
    let json: serde_json::Value = serde_json::from_str(document)?;

    match json {
        serde_json::Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                serde_json::Value::Object(map) => Node::from_json_map(map),
                _ => Err(LoadError::NotARecord { index }),
            })
            .collect(),
        serde_json::Value::Object(map) => Ok(vec![Node::from_json_map(&map)?]),
        other => Err(LoadError::NotARecordList {
            found: json_kind(&other),
        }),
    }
}

impl Node {
    /// Build a node from one JSON object.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, LoadError> {
        match json {
            serde_json::Value::Object(map) => Self::from_json_map(map),
            other => Err(LoadError::NotAnObject {
                found: json_kind(other),
            }),
        }
    }

    fn from_json_map(map: &Map<String, serde_json::Value>) -> Result<Self, LoadError> {
        let mut node = Self::new();

        for (field, json) in map {
            match json {
                serde_json::Value::Object(inner) => {
                    node = node.with_record(field.clone(), Self::from_json_map(inner)?);
                }
                // An empty array is both an empty child collection and an
                // empty list attribute, so the field still reads as present.
                serde_json::Value::Array(items) if items.is_empty() => {
                    node = node
                        .with_attr(field.clone(), Value::List(Vec::new()))
                        .with_children(field.clone(), Vec::new());
                }
                serde_json::Value::Array(items) if items.iter().all(is_object) => {
                    let children = items
                        .iter()
                        .filter_map(serde_json::Value::as_object)
                        .map(Self::from_json_map)
                        .collect::<Result<Vec<_>, _>>()?;
                    node = node.with_children(field.clone(), children);
                }
                _ => {
                    let value = Value::from_json(json).ok_or_else(|| LoadError::MixedArray {
                        field: field.clone(),
                    })?;
                    node = node.with_attr(field.clone(), value);
                }
            }
        }

        Ok(node)
    }

    /// Render the node as a JSON object, merging attributes and collections.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = Map::new();

        for (name, value) in self.attributes() {
            map.insert(name.clone(), value.to_json());
        }
        for name in self.collection_names() {
            let children = self
                .children(name)
                .iter()
                .map(Self::to_json)
                .collect::<Vec<_>>();
            map.insert(name.to_string(), serde_json::Value::Array(children));
        }

        serde_json::Value::Object(map)
    }
}

const fn is_object(json: &serde_json::Value) -> bool {
    matches!(json, serde_json::Value::Object(_))
}

const fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
