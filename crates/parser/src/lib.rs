//! Type classification and parameter tree extraction
//!
//! This crate turns structural type descriptions into parameter trees
//! (`Vec<ParamNode>`) for the renderers in `paramdoc-generator`.
//!
//! ## Pipeline
//!
//! - [`TypeCatalog`] (or any [`TypeProvider`]) supplies type descriptors
//! - [`TypeClassifier`] decides what a declared type is: scalar, collection,
//!   map, enum, composite object, or opaque
//! - [`TreeBuilder`] expands composite objects field by field, substituting
//!   generic parameters and cutting cycles
//! - [`flatten_form_params`] produces the single-level list used for
//!   query/form parameters

mod builder;
mod catalog;
mod classifier;
mod form;
mod metadata;

pub use builder::{Direction, TreeBuilder, VisitedPath, COLLECTION_ELEMENT, MAP_KEY, MAP_VALUE};
pub use catalog::{CatalogFile, TypeCatalog, TypeProvider};
pub use classifier::{Classification, GenericBindings, TypeClassifier};
pub use form::flatten_form_params;
pub use metadata::apply_field_doc;

use paramdoc_common::{ParamNode, Result, Settings, TypeRef};

/// Build the parameter tree of a type given as text
///
/// # Arguments
/// * `provider` - Source of type descriptors
/// * `settings` - Supplies the nesting markers
/// * `root` - Type expression of the root (e.g. "com.acme.Page<com.acme.User>")
///
/// # Returns
/// * The root's fields as a tree; empty when the root is not a composite type
pub fn build_tree<P: TypeProvider + ?Sized>(
    provider: &P,
    settings: &Settings,
    root: &str,
) -> Result<Vec<ParamNode>> {
    let root = TypeRef::parse(root)?;
    Ok(TreeBuilder::new(provider, settings).build(&root))
}
