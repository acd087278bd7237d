//! Flat request parameters (query string / form fields)
//!
//! Form parameters are documented as a single level: an object parameter
//! contributes its scalar fields and nothing deeper.

use crate::builder::declared_fields;
use crate::catalog::TypeProvider;
use crate::classifier::{Classification, GenericBindings, TypeClassifier};
use crate::metadata::apply_field_doc;
use paramdoc_common::{FieldDescriptor, ParamNode};
use std::collections::HashSet;
use tracing::debug;

/// Flatten method parameters into a list of leaf nodes
///
/// Names are de-duplicated across all parameters and expanded fields; the
/// first occurrence wins. Excluded and request-ignored fields are skipped.
pub fn flatten_form_params<P: TypeProvider + ?Sized>(
    provider: &P,
    params: &[FieldDescriptor],
) -> Vec<ParamNode> {
    let classifier = TypeClassifier::new(provider);
    let mut seen = HashSet::new();
    let mut nodes = Vec::new();

    for param in params {
        if is_hidden(param) || !seen.insert(param.name.clone()) {
            continue;
        }

        match classifier.classify_resolved(&param.field_type) {
            Classification::Object {
                descriptor,
                bindings,
            } => {
                for (field, field_bindings) in declared_fields(&classifier, &descriptor, &bindings)
                {
                    if is_hidden(&field) || !seen.insert(field.name.clone()) {
                        continue;
                    }
                    match classifier.classify(&field.field_type, &field_bindings) {
                        Classification::Primitive(kind) | Classification::BoxedScalar(kind) => {
                            let mut node = leaf(&field, &field_bindings);
                            node.scalar = Some(kind);
                            nodes.push(node);
                        }
                        _ => debug!(field = %field.name, "skipping non-scalar form field"),
                    }
                }
            }
            classification => {
                let mut node = leaf(param, &GenericBindings::new());
                node.scalar = match classification {
                    Classification::Primitive(kind) | Classification::BoxedScalar(kind) => {
                        Some(kind)
                    }
                    _ => None,
                };
                node.is_collection = matches!(classification, Classification::Collection(_));
                node.is_map = matches!(classification, Classification::Map(..));
                if let Classification::Enum(descriptor) = classification {
                    if node.example.is_none() {
                        node.example = descriptor.constants.first().cloned();
                    }
                }
                nodes.push(node);
            }
        }
    }

    nodes
}

fn is_hidden(field: &FieldDescriptor) -> bool {
    field.excluded || field.ignore_request
}

fn leaf(field: &FieldDescriptor, bindings: &GenericBindings) -> ParamNode {
    let mut node = ParamNode::new(&field.name, bindings.resolve(&field.field_type).label());
    apply_field_doc(&mut node, &field.doc);
    node
}
