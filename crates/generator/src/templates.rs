//! Template loading and management

use crate::ddl::camel4underline;
use paramdoc_common::{DocError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tera::{Tera, Value};

/// Name under which the document template is registered
pub const DOC_TEMPLATE: &str = "doc.md";

/// Load the built-in document template
pub fn load_templates() -> Result<Tera> {
    load_with(include_str!("../templates/doc.md.tera"))
}

/// Load a custom document template from disk
pub fn load_template_file(path: &Path) -> Result<Tera> {
    let content = fs::read_to_string(path).map_err(|e| {
        DocError::Config(format!("Failed to read template {:?}: {}", path, e))
    })?;
    load_with(&content)
}

fn load_with(source: &str) -> Result<Tera> {
    let mut tera = Tera::default();
    // Fragments are already Markdown
    tera.autoescape_on(vec![]);

    tera.register_filter("snake_case", snake_case_filter);
    tera.register_filter("fence", fence_filter);

    tera.add_raw_template(DOC_TEMPLATE, source)
        .map_err(|e| DocError::Render(format!("Failed to load {} template: {}", DOC_TEMPLATE, e)))?;

    Ok(tera)
}

/// Filter converting camelCase to snake_case
fn snake_case_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("snake_case filter expects a string"))?;

    Ok(Value::String(camel4underline(s)))
}

/// Filter wrapping text in a fenced code block: `{{ body | fence(lang="SQL") }}`
fn fence_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("fence filter expects a string"))?;

    if s.is_empty() {
        return Ok(Value::String(String::new()));
    }

    let lang = args.get("lang").and_then(Value::as_str).unwrap_or("");
    Ok(Value::String(format!("```{}\n{}\n```", lang, s)))
}
