//! Example document synthesis
//!
//! Produces a representative value for every node of a parameter tree:
//! leaves get a default for their type (or their `example` metadata),
//! collections a one-element array, maps a single entry.

use paramdoc_common::{ParamNode, ScalarKind};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

const MAP_KEY_FALLBACK: &str = "key";

/// Build the example object for a list of sibling nodes
///
/// Nodes that have no representable value (opaque or cyclic leaves) are
/// left out rather than emitted as `null`. A composite without visible
/// fields is still an object, `{}`.
pub fn synthesize(nodes: &[ParamNode]) -> Value {
    let mut object = Map::new();
    for node in nodes {
        let value = node_value(node);
        if !value.is_null() {
            object.insert(node.name.clone(), value);
        }
    }
    Value::Object(object)
}

/// Example value for a single node
pub fn node_value(node: &ParamNode) -> Value {
    if node.is_collection {
        let element = node.children.first().map(node_value).unwrap_or(Value::Null);
        return if element.is_null() {
            Value::Array(Vec::new())
        } else {
            Value::Array(vec![element])
        };
    }

    if node.is_map {
        let mut entry = Map::new();
        if let [key, value, ..] = node.children.as_slice() {
            let value = node_value(value);
            if !value.is_null() {
                entry.insert(map_key(key), value);
            }
        }
        return Value::Object(entry);
    }

    if node.is_composite || node.has_children() {
        return synthesize(&node.children);
    }

    leaf_value(node)
}

fn leaf_value(node: &ParamNode) -> Value {
    match (&node.example, node.scalar) {
        (Some(example), Some(kind)) => kind.parse_example(example),
        (Some(example), None) => Value::String(example.clone()),
        (None, Some(kind)) => kind.sample(),
        (None, None) => Value::Null,
    }
}

fn map_key(node: &ParamNode) -> String {
    let text = match leaf_value(node) {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    };
    if text.is_empty() {
        MAP_KEY_FALLBACK.to_string()
    } else {
        text
    }
}

/// Serialize with a four-space indent
pub fn to_pretty_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    // Writing a `Value` into memory cannot fail
    if value.serialize(&mut serializer).is_err() {
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}

/// JSON example fenced as a Markdown code block
///
/// An empty tree yields an empty string.
pub fn json_example(nodes: &[ParamNode]) -> String {
    if nodes.is_empty() {
        return String::new();
    }
    format!("```JSON\n{}\n```", to_pretty_json(&synthesize(nodes)))
}

/// `name:value` lines for flat form parameters, fenced
pub fn form_example(nodes: &[ParamNode]) -> String {
    if nodes.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = nodes
        .iter()
        .map(|node| format!("{}:{}", node.name, form_value(node)))
        .collect();
    format!("```Form\n{}\n```", lines.join("\n"))
}

fn form_value(node: &ParamNode) -> String {
    if let Some(example) = &node.example {
        return example.clone();
    }
    match node.scalar.map(ScalarKind::sample) {
        Some(Value::String(s)) => s,
        Some(value) => value.to_string(),
        None => String::new(),
    }
}
