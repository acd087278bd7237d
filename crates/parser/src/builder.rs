//! Parameter tree construction
//!
//! Walks the fields of a composite type and produces an ordered tree of
//! [`ParamNode`]s:
//! - scalars, enums and opaque types become childless leaves
//! - a collection becomes one node with a single synthetic child for its
//!   element type
//! - a map becomes one node with two synthetic children, key then value
//! - a composite object recurses into its fields, unless the same type
//!   already appears on the path from the root, in which case it stays a leaf
//!
//! The builder is pure: visited types and generic bindings are passed down as
//! values, and a new tree is returned on every call.

use crate::catalog::TypeProvider;
use crate::classifier::{Classification, GenericBindings, TypeClassifier};
use crate::metadata::apply_field_doc;
use paramdoc_common::{FieldDescriptor, FieldDoc, ParamNode, Settings, TypeDescriptor, TypeRef};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Name of the synthetic child standing for a collection element
pub const COLLECTION_ELEMENT: &str = "item";
/// Name of the synthetic child standing for a map key
pub const MAP_KEY: &str = "key";
/// Name of the synthetic child standing for a map value
pub const MAP_VALUE: &str = "value";

/// Which side of an API call the tree documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Request,
    Response,
}

/// Composite types on the path from the root to the current node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedPath(Vec<String>);

impl VisitedPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.0.iter().any(|visited| visited == type_name)
    }

    /// A copy of this path extended by one type
    pub fn with(&self, type_name: &str) -> Self {
        let mut next = self.0.clone();
        next.push(type_name.to_string());
        Self(next)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

/// Row-name markers for one nesting level
#[derive(Debug, Clone, Default)]
struct Markers {
    first: String,
    second: String,
}

impl Markers {
    /// Markers for the fields of a nested composite object
    fn descend(&self, settings: &Settings) -> Self {
        Self {
            first: settings.prefix_symbol_1.clone(),
            second: format!("{}{}", self.second, settings.prefix_symbol_2),
        }
    }
}

/// Builds parameter trees from type descriptors
pub struct TreeBuilder<'a, P: TypeProvider + ?Sized> {
    classifier: TypeClassifier<'a, P>,
    settings: &'a Settings,
    direction: Option<Direction>,
}

impl<'a, P: TypeProvider + ?Sized> TreeBuilder<'a, P> {
    /// Create a builder over a type provider
    pub fn new(provider: &'a P, settings: &'a Settings) -> Self {
        Self {
            classifier: TypeClassifier::new(provider),
            settings,
            direction: None,
        }
    }

    /// Hide fields flagged `ignore_request` / `ignore_response` for this side
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Build the field tree of a composite root type
    ///
    /// Non-composite roots produce an empty list; use
    /// [`build_parameter`](Self::build_parameter) for those.
    pub fn build(&self, root: &TypeRef) -> Vec<ParamNode> {
        self.build_with(root, &GenericBindings::new(), &VisitedPath::new())
    }

    /// Build the field tree of `root` under explicit bindings and visited path
    pub fn build_with(
        &self,
        root: &TypeRef,
        bindings: &GenericBindings,
        visited: &VisitedPath,
    ) -> Vec<ParamNode> {
        match self.classifier.classify(root, bindings) {
            Classification::Object {
                descriptor,
                bindings,
            } => {
                if visited.contains(&descriptor.name) {
                    debug!(type_name = %descriptor.name, "root already visited");
                    return Vec::new();
                }
                let path = visited.with(&descriptor.name);
                self.object_fields(&descriptor, &bindings, &path, &Markers::default())
            }
            _ => {
                debug!(root = %root, "root type is not a composite object");
                Vec::new()
            }
        }
    }

    /// Build the nodes for one method parameter
    ///
    /// A composite parameter expands to its fields; any other parameter
    /// becomes a single node (with synthetic children for containers).
    pub fn build_parameter(&self, param: &FieldDescriptor) -> Vec<ParamNode> {
        if self.is_hidden(param) {
            return Vec::new();
        }
        match self.classifier.classify_resolved(&param.field_type) {
            Classification::Object { .. } => self.build(&param.field_type),
            _ => vec![self.node(
                &param.name,
                &param.field_type,
                Some(&param.doc),
                &VisitedPath::new(),
                &Markers::default(),
            )],
        }
    }

    fn is_hidden(&self, field: &FieldDescriptor) -> bool {
        field.excluded
            || match self.direction {
                Some(Direction::Request) => field.ignore_request,
                Some(Direction::Response) => field.ignore_response,
                None => false,
            }
    }

    fn object_fields(
        &self,
        descriptor: &Arc<TypeDescriptor>,
        bindings: &GenericBindings,
        visited: &VisitedPath,
        markers: &Markers,
    ) -> Vec<ParamNode> {
        declared_fields(&self.classifier, descriptor, bindings)
            .into_iter()
            .filter(|(field, _)| !self.is_hidden(field))
            .map(|(field, field_bindings)| {
                let resolved = field_bindings.resolve(&field.field_type);
                self.node(&field.name, &resolved, Some(&field.doc), visited, markers)
            })
            .collect()
    }

    /// Build one node for an already-resolved type
    fn node(
        &self,
        name: &str,
        resolved: &TypeRef,
        doc: Option<&FieldDoc>,
        visited: &VisitedPath,
        markers: &Markers,
    ) -> ParamNode {
        let mut node = ParamNode::new(name, resolved.label());
        node.prefix_symbol_1 = markers.first.clone();
        node.prefix_symbol_2 = markers.second.clone();
        if let Some(doc) = doc {
            apply_field_doc(&mut node, doc);
        }

        let classification = self.classifier.classify_resolved(resolved);
        trace!(field = name, type_label = %node.declared_type, depth = visited.depth(), "classified field");

        node.scalar = None;
        match classification {
            Classification::Primitive(kind) | Classification::BoxedScalar(kind) => {
                node.scalar = Some(kind);
            }
            Classification::Opaque => {}
            Classification::Enum(descriptor) => {
                if node.example.is_none() {
                    node.example = descriptor.constants.first().cloned();
                }
            }
            Classification::Collection(element) => {
                node.is_collection = true;
                node.children
                    .push(self.node(COLLECTION_ELEMENT, &element, None, visited, markers));
            }
            Classification::Map(key, value) => {
                node.is_map = true;
                node.children
                    .push(self.node(MAP_KEY, &key, None, visited, markers));
                node.children
                    .push(self.node(MAP_VALUE, &value, None, visited, markers));
            }
            Classification::Object {
                descriptor,
                bindings,
            } => {
                if visited.contains(&descriptor.name) {
                    debug!(
                        field = name,
                        type_name = %descriptor.name,
                        "cyclic type reference, emitting leaf"
                    );
                } else {
                    node.is_composite = true;
                    node.children = self.object_fields(
                        &descriptor,
                        &bindings,
                        &visited.with(&descriptor.name),
                        &markers.descend(self.settings),
                    );
                }
            }
        }

        node
    }
}

/// Fields of a type followed by those of its supertypes
///
/// Each field is paired with the bindings of the type declaring it. Names
/// are de-duplicated across the whole chain, first occurrence wins.
pub(crate) fn declared_fields<P: TypeProvider + ?Sized>(
    classifier: &TypeClassifier<'_, P>,
    descriptor: &Arc<TypeDescriptor>,
    bindings: &GenericBindings,
) -> Vec<(FieldDescriptor, GenericBindings)> {
    let mut seen = HashSet::new();
    let mut chain = HashSet::new();
    let mut fields = Vec::new();
    let mut current = Some((Arc::clone(descriptor), bindings.clone()));

    while let Some((ty, ty_bindings)) = current.take() {
        if !chain.insert(ty.name.clone()) {
            debug!(type_name = %ty.name, "inheritance cycle, stopping");
            break;
        }

        for field in &ty.fields {
            if seen.insert(field.name.clone()) {
                fields.push((field.clone(), ty_bindings.clone()));
            }
        }

        current = ty.extends.as_ref().and_then(|parent| {
            match classifier.classify(parent, &ty_bindings) {
                Classification::Object {
                    descriptor,
                    bindings,
                } => Some((descriptor, bindings)),
                _ => None,
            }
        });
    }

    fields
}
