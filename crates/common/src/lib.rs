//! Common types and utilities for paramdoc
//!
//! This crate contains the shared data structures, error types, and
//! settings used across the parser, generator, and CLI components:
//! - `TypeRef`: parsed type expressions (`List<Order>`, `Page<T>`, `Item[]`)
//! - `TypeDescriptor` / `FieldDescriptor`: the structural description of a source type
//! - `ParamNode`: the parameter tree every renderer consumes
//! - `Settings`: indentation markers, Markdown layout and locale

mod descriptor;
mod param;
mod scalar;
mod settings;
mod type_ref;

pub use descriptor::{clean_doc_comment, FieldDescriptor, FieldDoc, TypeDescriptor, TypeKind};
pub use param::{ParamNode, VERSION_NONE};
pub use scalar::{ScalarForm, ScalarKind};
pub use settings::{Locale, Settings};
pub use type_ref::TypeRef;

use thiserror::Error;

/// Errors that can occur while loading descriptors or rendering documents
#[derive(Error, Debug)]
pub enum DocError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for paramdoc operations
pub type Result<T> = std::result::Result<T, DocError>;
