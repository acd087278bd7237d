//! Renderers for parameter trees
//!
//! Every renderer is a pure function of a `&[ParamNode]` tree:
//! - [`markdown`]: parameter tables, inline or separated
//! - [`example`]: JSON and form examples
//! - [`ddl`]: MySQL `CREATE TABLE` statements
//!
//! [`DocGenerator`] places the fragments into a `tera` document template.

pub mod ddl;
mod document;
pub mod example;
pub mod markdown;
mod templates;

pub use ddl::{camel4underline, sql_type, to_ddl};
pub use document::{
    normalize_method, normalize_path, request_example, DocFragments, DocGenerator, DocView,
};
pub use example::{form_example, json_example, synthesize};
pub use markdown::{MarkdownRenderer, ParamRole};
pub use templates::{load_template_file, load_templates, DOC_TEMPLATE};
