//! Type classification
//!
//! Maps a declared type, after generic substitution, to the category that
//! decides how the tree builder expands it. Categories are tried in order:
//! primitive, boxed scalar, collection, map, enum, composite object, opaque.
//! Unknown types never fail; they classify as [`Classification::Opaque`].

use crate::catalog::TypeProvider;
use paramdoc_common::{ScalarForm, ScalarKind, TypeDescriptor, TypeKind, TypeRef};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

const COLLECTION_TYPES: &[&str] = &[
    "Iterable",
    "Collection",
    "List",
    "ArrayList",
    "LinkedList",
    "CopyOnWriteArrayList",
    "Vector",
    "Stack",
    "Set",
    "HashSet",
    "LinkedHashSet",
    "SortedSet",
    "NavigableSet",
    "TreeSet",
    "Queue",
    "Deque",
    "ArrayDeque",
];

const MAP_TYPES: &[&str] = &[
    "Map",
    "HashMap",
    "LinkedHashMap",
    "SortedMap",
    "NavigableMap",
    "TreeMap",
    "ConcurrentMap",
    "ConcurrentHashMap",
    "Hashtable",
];

/// Mapping from generic parameter name to concrete type
///
/// Threaded explicitly through every recursive step of the tree builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericBindings(HashMap<String, TypeRef>);

impl GenericBindings {
    /// No bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: bind one parameter
    pub fn with(mut self, param: impl Into<String>, ty: TypeRef) -> Self {
        self.0.insert(param.into(), ty);
        self
    }

    /// Bind a type's declared parameters to the arguments of a reference to it
    ///
    /// Parameters without a matching argument stay unbound.
    pub fn for_type(descriptor: &TypeDescriptor, args: &[TypeRef]) -> Self {
        Self(
            descriptor
                .type_params
                .iter()
                .cloned()
                .zip(args.iter().cloned())
                .collect(),
        )
    }

    pub fn get(&self, param: &str) -> Option<&TypeRef> {
        self.0.get(param)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Substitute bound parameters, one level deep
    ///
    /// Every occurrence of a bound parameter (including inside generic
    /// arguments and under array dimensions) is replaced by its binding; the
    /// replacement itself is not substituted again.
    pub fn resolve(&self, ty: &TypeRef) -> TypeRef {
        if ty.args.is_empty() {
            if let Some(bound) = self.0.get(&ty.name) {
                let mut resolved = bound.clone();
                resolved.array_dims += ty.array_dims;
                return resolved;
            }
        }
        TypeRef {
            name: ty.name.clone(),
            args: ty.args.iter().map(|arg| self.resolve(arg)).collect(),
            array_dims: ty.array_dims,
        }
    }
}

/// Category of a resolved type
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// Language primitive (`int`, `boolean`, ...)
    Primitive(ScalarKind),
    /// Boxed or well-known library scalar (`Integer`, `String`, `LocalDate`, ...)
    BoxedScalar(ScalarKind),
    /// Collection or array with its element type
    Collection(TypeRef),
    /// Map with key and value types
    Map(TypeRef, TypeRef),
    /// Enumeration
    Enum(Arc<TypeDescriptor>),
    /// Type with accessible fields, plus the bindings for its own parameters
    Object {
        descriptor: Arc<TypeDescriptor>,
        bindings: GenericBindings,
    },
    /// Type whose fields are unknown or inaccessible
    Opaque,
}

impl Classification {
    /// Whether the type renders as a single value
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Primitive(_) | Self::BoxedScalar(_))
    }
}

/// Classifies declared types against a type provider
pub struct TypeClassifier<'a, P: TypeProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: TypeProvider + ?Sized> TypeClassifier<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Substitute generic parameters, then classify
    pub fn classify(&self, declared: &TypeRef, bindings: &GenericBindings) -> Classification {
        self.classify_resolved(&bindings.resolve(declared))
    }

    /// Classify a type whose generic parameters are already substituted
    pub fn classify_resolved(&self, ty: &TypeRef) -> Classification {
        if let Some(element) = ty.element() {
            return Classification::Collection(element);
        }

        if ty.args.is_empty() {
            if let Some((kind, form)) = ScalarKind::of(&ty.name) {
                return match form {
                    ScalarForm::Primitive => Classification::Primitive(kind),
                    ScalarForm::Boxed => Classification::BoxedScalar(kind),
                };
            }
        }

        let simple = ty.simple_name();
        if is_library_type(&ty.name) && COLLECTION_TYPES.contains(&simple) {
            return Classification::Collection(type_arg(ty, 0));
        }
        if is_library_type(&ty.name) && MAP_TYPES.contains(&simple) {
            return Classification::Map(type_arg(ty, 0), type_arg(ty, 1));
        }

        match self.provider.lookup(&ty.name) {
            Some(descriptor) if descriptor.kind == TypeKind::Enum => {
                Classification::Enum(descriptor)
            }
            Some(descriptor) if !descriptor.opaque => {
                let bindings = GenericBindings::for_type(&descriptor, &ty.args);
                Classification::Object {
                    descriptor,
                    bindings,
                }
            }
            _ => {
                debug!(type_name = %ty, "type has no accessible fields, treating as opaque");
                Classification::Opaque
            }
        }
    }
}

/// Unqualified names and `java.*` names count as library types
fn is_library_type(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((package, _)) => package.starts_with("java"),
        None => true,
    }
}

/// Generic argument at `index`, `Object` when the reference is raw
fn type_arg(ty: &TypeRef, index: usize) -> TypeRef {
    ty.args
        .get(index)
        .cloned()
        .unwrap_or_else(|| TypeRef::named("Object"))
}
