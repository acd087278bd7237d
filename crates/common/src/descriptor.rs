//! Structural descriptions of source types
//!
//! These are the inputs supplied by the type-descriptor provider: the
//! fields of a type in declaration order, their declared types, and the
//! documentation metadata attached to each field.

use crate::TypeRef;
use serde::{Deserialize, Serialize};

/// Kind of a described type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// A class or record with fields
    #[default]
    Class,
    /// An enumeration with named constants
    Enum,
}

/// Description of a single source type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Fully-qualified type name (e.g. "com.acme.Order")
    pub name: String,

    #[serde(default)]
    pub kind: TypeKind,

    /// Generic parameter names in declaration order (e.g. ["T"])
    #[serde(default)]
    pub type_params: Vec<String>,

    /// Supertype; may mention this type's own generic parameters
    #[serde(default)]
    pub extends: Option<TypeRef>,

    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,

    /// Enum constants in declaration order
    #[serde(default)]
    pub constants: Vec<String>,

    /// Raw type doc comment
    #[serde(default)]
    pub doc: Option<String>,

    /// Storage table name override for DDL output
    #[serde(default)]
    pub table_name: Option<String>,

    /// Set when the field list is not accessible (e.g. a binary-only type)
    #[serde(default)]
    pub opaque: bool,
}

impl TypeDescriptor {
    /// Create an empty class descriptor
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            type_params: Vec::new(),
            extends: None,
            fields: Vec::new(),
            constants: Vec::new(),
            doc: None,
            table_name: None,
            opaque: false,
        }
    }

    /// Builder-style: add a field
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Builder-style: declare generic parameters
    pub fn with_type_params(mut self, params: &[&str]) -> Self {
        self.type_params = params.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Name without package qualifier
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Table name for DDL output: explicit override, else the simple name
    pub fn table(&self) -> &str {
        self.table_name.as_deref().unwrap_or_else(|| self.simple_name())
    }

    /// Doc comment collapsed to a single line
    pub fn comment(&self) -> String {
        self.doc.as_deref().map(clean_doc_comment).unwrap_or_default()
    }
}

/// Description of a single field (or method parameter)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,

    /// Declared type
    #[serde(rename = "type")]
    pub field_type: TypeRef,

    /// Excluded from documentation altogether (e.g. `@JsonIgnore`, static fields)
    #[serde(default)]
    pub excluded: bool,

    /// Hidden from request documentation
    #[serde(default)]
    pub ignore_request: bool,

    /// Hidden from response documentation
    #[serde(default)]
    pub ignore_response: bool,

    #[serde(flatten)]
    pub doc: FieldDoc,
}

impl FieldDescriptor {
    /// Create a field with default documentation
    pub fn new(name: impl Into<String>, field_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            field_type,
            excluded: false,
            ignore_request: false,
            ignore_response: false,
            doc: FieldDoc::default(),
        }
    }

    /// Builder-style: replace the documentation metadata
    pub fn with_doc(mut self, doc: FieldDoc) -> Self {
        self.doc = doc;
        self
    }
}

/// Documentation metadata attached to a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDoc {
    pub desc: Option<String>,
    pub since: Option<String>,
    pub version: Option<String>,
    pub required: bool,
    pub filterable: bool,
    pub updateable: bool,
    /// Whether the field is persisted (a column in DDL output)
    pub exists_in_storage: bool,
    pub primary_key: bool,
    /// Stored as a JSON column
    pub json: bool,
    /// Explicit example value
    pub example: Option<String>,
}

impl Default for FieldDoc {
    fn default() -> Self {
        Self {
            desc: None,
            since: None,
            version: None,
            required: false,
            filterable: false,
            updateable: false,
            exists_in_storage: true,
            primary_key: false,
            json: false,
            example: None,
        }
    }
}

/// Collapse a `/** ... */` doc comment into one line of text
///
/// Comment delimiters and leading `*` are removed and lines are joined with
/// single spaces.
pub fn clean_doc_comment(raw: &str) -> String {
    let stripped = raw.replace("/**", "").replace("*/", "").replace('*', "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
