//! Full API document assembly

use crate::example::{form_example, json_example};
use crate::markdown::{MarkdownRenderer, ParamRole};
use crate::templates::{self, DOC_TEMPLATE};
use paramdoc_common::{DocError, ParamNode, Result, Settings};
use serde::{Deserialize, Serialize};
use tera::Tera;
use tracing::debug;

/// Everything known about one API method, as parameter trees
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocView {
    pub name: String,
    pub desc: String,
    pub method: String,
    pub path: String,
    pub headers: Vec<ParamNode>,
    /// Flat query/form parameters
    pub request_params: Vec<ParamNode>,
    pub request_body: Vec<ParamNode>,
    pub response_body: Vec<ParamNode>,
}

/// Rendered fragments handed to the template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocFragments {
    pub name: String,
    pub desc: String,
    pub method: String,
    pub path: String,
    pub request_header: String,
    pub request_param: String,
    pub request_body: String,
    pub request_example: String,
    pub response_param: String,
    pub response_example: String,
}

/// Upper-cased, trimmed HTTP method
pub fn normalize_method(method: &str) -> String {
    method.trim().to_ascii_uppercase()
}

/// Path with exactly one leading `/` and no trailing `/`
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    format!("/{}", trimmed)
}

/// Form example and body example, separated by a blank line when both exist
pub fn request_example(form: &str, body: &str) -> String {
    match (form.trim().is_empty(), body.trim().is_empty()) {
        (true, _) => body.to_string(),
        (false, true) => form.to_string(),
        (false, false) => format!("{}\n\n{}", form, body),
    }
}

/// Renders [`DocView`]s through a document template
pub struct DocGenerator {
    settings: Settings,
    markdown: MarkdownRenderer,
    tera: Tera,
}

impl DocGenerator {
    /// Create a generator, loading the custom template named in the settings
    /// or the built-in one
    pub fn new(settings: Settings) -> Result<Self> {
        let tera = match &settings.template {
            Some(path) => {
                debug!(template = ?path, "loading custom document template");
                templates::load_template_file(path)?
            }
            None => templates::load_templates()?,
        };
        Ok(Self {
            markdown: MarkdownRenderer::new(settings.locale),
            settings,
            tera,
        })
    }

    /// Render every fragment of a view
    pub fn fragments(&self, view: &DocView) -> DocFragments {
        let separate = self.settings.separate_param;
        DocFragments {
            name: view.name.clone(),
            desc: view.desc.clone(),
            method: normalize_method(&view.method),
            path: normalize_path(&view.path),
            request_header: self.markdown.render(&view.headers, ParamRole::Header, false),
            request_param: self
                .markdown
                .render(&view.request_params, ParamRole::RequestParam, false),
            request_body: self
                .markdown
                .render(&view.request_body, ParamRole::RequestBody, separate),
            request_example: request_example(
                &form_example(&view.request_params),
                &json_example(&view.request_body),
            ),
            response_param: self
                .markdown
                .render(&view.response_body, ParamRole::ResponseBody, separate),
            response_example: json_example(&view.response_body),
        }
    }

    /// Render the full document
    pub fn render(&self, view: &DocView) -> Result<String> {
        let context = tera::Context::from_serialize(self.fragments(view))
            .map_err(|e| DocError::Render(format!("Template context error: {}", e)))?;

        self.tera
            .render(DOC_TEMPLATE, &context)
            .map_err(|e| DocError::Render(format!("Template error: {:?}", e)))
    }
}
