//! Parameter tree nodes

use crate::scalar::ScalarKind;
use serde::{Deserialize, Serialize};

/// Version value used when a field carries no version metadata
pub const VERSION_NONE: &str = "none";

/// One node of a parameter tree
///
/// A node is a field, a request parameter, a header, or one of the synthetic
/// children standing for a collection element or a map key/value type.
/// Children are owned by their parent and kept in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamNode {
    pub name: String,
    /// Human-readable type label (e.g. "List<Order>")
    pub declared_type: String,
    pub required: bool,
    pub filterable: bool,
    pub updateable: bool,
    pub desc: String,
    pub since: String,
    pub version: String,
    /// Explicit example value (header value, or a field's example metadata)
    pub example: Option<String>,
    /// Scalar family of the node's type, `None` for anything that is not a scalar
    pub scalar: Option<ScalarKind>,
    /// Composite object expanded into its fields (possibly none)
    pub is_composite: bool,
    pub is_collection: bool,
    pub is_map: bool,
    pub is_json: bool,
    pub exists_in_storage: bool,
    pub is_primary_key: bool,
    /// Nesting marker set once a node sits below a composite object
    pub prefix_symbol_1: String,
    /// Nesting marker accumulated per composite-object level
    pub prefix_symbol_2: String,
    pub children: Vec<ParamNode>,
}

impl ParamNode {
    /// Create a childless node with default metadata
    ///
    /// The scalar kind is guessed from the type label; the tree builder
    /// overwrites it with the classifier's answer.
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        let declared_type = declared_type.into();
        Self {
            name: name.into(),
            scalar: ScalarKind::of(&declared_type).map(|(kind, _)| kind),
            is_composite: false,
            declared_type,
            required: false,
            filterable: false,
            updateable: false,
            desc: String::new(),
            since: String::new(),
            version: VERSION_NONE.to_string(),
            example: None,
            is_collection: false,
            is_map: false,
            is_json: false,
            exists_in_storage: true,
            is_primary_key: false,
            prefix_symbol_1: String::new(),
            prefix_symbol_2: String::new(),
            children: Vec::new(),
        }
    }

    /// Create a request header row
    pub fn header(
        name: impl Into<String>,
        value: impl Into<String>,
        required: bool,
        desc: impl Into<String>,
    ) -> Self {
        let mut node = Self::new(name, "String");
        node.example = Some(value.into());
        node.required = required;
        node.desc = desc.into();
        node
    }

    /// Whether the node has any children
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Name prefixed by both nesting markers
    pub fn name_cell(&self) -> String {
        format!("{}{}{}", self.prefix_symbol_1, self.prefix_symbol_2, self.name)
    }

    /// `since` and `version` joined with `-`, skipping blank values
    pub fn version_cell(&self) -> String {
        [self.since.as_str(), self.version.as_str()]
            .iter()
            .filter(|s| !s.trim().is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Number of nodes in this subtree, the node itself included
    pub fn subtree_len(&self) -> usize {
        1 + Self::tree_len(&self.children)
    }

    /// Number of nodes in a forest, counted in pre-order
    pub fn tree_len(nodes: &[ParamNode]) -> usize {
        nodes.iter().map(ParamNode::subtree_len).sum()
    }
}
