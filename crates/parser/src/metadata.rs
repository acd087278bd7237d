//! Copies field documentation onto parameter nodes

use paramdoc_common::{FieldDoc, ParamNode, VERSION_NONE};
use tracing::debug;

const SINCE_TAG: &str = "@since";
const VERSION_TAG: &str = "@version";

/// Populate a node's documentation fields and flags from a field descriptor
///
/// Blank values take their defaults (empty description, [`VERSION_NONE`]).
/// A description that still contains a raw `@since` or `@version` tag came
/// from a malformed doc comment; both `desc` and `since` are cleared.
pub fn apply_field_doc(node: &mut ParamNode, doc: &FieldDoc) {
    node.required = doc.required;
    node.filterable = doc.filterable;
    node.updateable = doc.updateable;
    node.exists_in_storage = doc.exists_in_storage;
    node.is_primary_key = doc.primary_key;
    node.is_json = doc.json;
    node.example = doc.example.clone();

    node.desc = non_blank(doc.desc.as_deref()).unwrap_or_default();
    node.since = non_blank(doc.since.as_deref()).unwrap_or_default();
    node.version = non_blank(doc.version.as_deref()).unwrap_or_else(|| VERSION_NONE.to_string());

    if node.desc.contains(SINCE_TAG) || node.desc.contains(VERSION_TAG) {
        debug!(field = %node.name, "description contains stray doc tags, clearing");
        node.desc.clear();
        node.since.clear();
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}
