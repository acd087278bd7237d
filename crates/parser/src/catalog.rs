//! Type descriptor catalog
//!
//! The tree builder never introspects source code itself; it asks a
//! [`TypeProvider`] for the structural description of a type. [`TypeCatalog`]
//! is the file-backed provider used by the CLI and the tests.
//!
//! ## Catalog file format
//! ```yaml
//! types:
//!   - name: com.acme.Order
//!     doc: "/** Customer order */"
//!     fields:
//!       - name: id
//!         type: Long
//!         primary_key: true
//!       - name: items
//!         type: List<com.acme.OrderItem>
//! ```

use paramdoc_common::{DocError, Result, TypeDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Source of type descriptors
///
/// Implementations must stay read-only for the duration of a build.
#[cfg_attr(test, mockall::automock)]
pub trait TypeProvider {
    /// Look up a type by name; `None` when its fields are unknown
    fn lookup(&self, name: &str) -> Option<Arc<TypeDescriptor>>;
}

/// On-disk catalog layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
}

/// In-memory catalog of type descriptors keyed by qualified name
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: HashMap<String, Arc<TypeDescriptor>>,
    /// Simple name -> qualified names sharing it
    simple_names: HashMap<String, Vec<String>>,
}

impl TypeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from descriptors
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        let mut catalog = Self::new();
        for descriptor in descriptors {
            catalog.insert(descriptor);
        }
        catalog
    }

    /// Load a catalog from a JSON or YAML file (chosen by extension)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DocError::Parse(format!(
                "Failed to read catalog file {}: {}",
                path.display(),
                e
            ))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Parse a catalog from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| DocError::Parse(format!("Failed to parse catalog JSON: {}", e)))?;
        Ok(Self::from_descriptors(file.types))
    }

    /// Parse a catalog from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(yaml)
            .map_err(|e| DocError::Parse(format!("Failed to parse catalog YAML: {}", e)))?;
        Ok(Self::from_descriptors(file.types))
    }

    /// Add a descriptor, replacing any previous one with the same name
    pub fn insert(&mut self, descriptor: TypeDescriptor) {
        let name = descriptor.name.clone();
        let simple = descriptor.simple_name().to_string();

        if self.types.insert(name.clone(), Arc::new(descriptor)).is_some() {
            warn!(type_name = %name, "duplicate type descriptor replaced");
            return;
        }
        self.simple_names.entry(simple).or_default().push(name);
    }

    /// Number of described types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Qualified names of all described types, sorted
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl TypeProvider for TypeCatalog {
    /// Exact qualified name first, then an unambiguous simple name
    fn lookup(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
        if let Some(descriptor) = self.types.get(name) {
            return Some(Arc::clone(descriptor));
        }

        let simple = name.rsplit('.').next().unwrap_or(name);
        match self.simple_names.get(simple).map(Vec::as_slice) {
            Some([only]) => self.types.get(only).cloned(),
            Some(candidates) if candidates.len() > 1 => {
                debug!(type_name = %name, ?candidates, "ambiguous simple type name");
                None
            }
            _ => None,
        }
    }
}
