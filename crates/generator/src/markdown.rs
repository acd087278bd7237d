//! Markdown table rendering
//!
//! Two layouts are supported:
//! - inline: one table, nested rows in pre-order with their indentation
//!   markers in front of the name
//! - separated: one table of direct children, followed by a titled
//!   sub-section per child that has children of its own

use paramdoc_common::{Locale, ParamNode};
use serde::{Deserialize, Serialize};

/// What a table documents; decides its column set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamRole {
    /// Request headers: name, value, required, description, version
    Header,
    /// Query/form parameters
    RequestParam,
    /// Request body fields
    RequestBody,
    /// Response body fields: no filterable/updateable columns
    ResponseBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Name,
    Value,
    Type,
    Required,
    Filterable,
    Updateable,
    Description,
    Version,
}

impl ParamRole {
    fn columns(self) -> &'static [Column] {
        use Column::*;
        match self {
            Self::Header => &[Name, Value, Required, Description, Version],
            Self::RequestParam | Self::RequestBody => &[
                Name,
                Type,
                Required,
                Filterable,
                Updateable,
                Description,
                Version,
            ],
            Self::ResponseBody => &[Name, Type, Required, Description, Version],
        }
    }
}

/// Header labels and yes/no text for one locale
struct Labels {
    name: &'static str,
    value: &'static str,
    type_: &'static str,
    required: &'static str,
    header_required: &'static str,
    filterable: &'static str,
    updateable: &'static str,
    description: &'static str,
    version: &'static str,
    yes: &'static str,
    no: &'static str,
}

static EN: Labels = Labels {
    name: "Name",
    value: "Value",
    type_: "Type",
    required: "Required",
    header_required: "Required",
    filterable: "Filterable",
    updateable: "Updateable",
    description: "Description",
    version: "Version",
    yes: "Yes",
    no: "No",
};

static ZH: Labels = Labels {
    name: "参数名",
    value: "参数值",
    type_: "类型",
    required: "必选",
    header_required: "必填",
    filterable: "可筛选",
    updateable: "可更新",
    description: "描述",
    version: "版本",
    yes: "是",
    no: "否",
};

/// Renders parameter trees as Markdown tables
pub struct MarkdownRenderer {
    labels: &'static Labels,
}

impl MarkdownRenderer {
    pub fn new(locale: Locale) -> Self {
        let labels = match locale {
            Locale::En => &EN,
            Locale::Zh => &ZH,
        };
        Self { labels }
    }

    /// Render in the layout chosen by `separate`
    ///
    /// Headers are always flat and ignore the flag.
    pub fn render(&self, nodes: &[ParamNode], role: ParamRole, separate: bool) -> String {
        if separate && role != ParamRole::Header {
            self.separated(nodes, role)
        } else {
            self.inline(nodes, role)
        }
    }

    /// One table, every node in pre-order
    pub fn inline(&self, nodes: &[ParamNode], role: ParamRole) -> String {
        if nodes.is_empty() {
            return String::new();
        }
        let mut out = self.table_head(role);
        self.inline_rows(nodes, role, &mut out);
        out
    }

    fn inline_rows(&self, nodes: &[ParamNode], role: ParamRole, out: &mut String) {
        for node in nodes {
            let name = if role == ParamRole::Header {
                node.name.clone()
            } else {
                node.name_cell()
            };
            out.push_str(&self.row(node, &name, role));
            self.inline_rows(&node.children, role, out);
        }
    }

    /// A table of direct children followed by one sub-section per nested node
    pub fn separated(&self, nodes: &[ParamNode], role: ParamRole) -> String {
        if nodes.is_empty() {
            return String::new();
        }
        let mut out = self.table_head(role);
        for node in nodes {
            out.push_str(&self.row(node, &node.name, role));
        }
        for node in nodes.iter().filter(|n| n.has_children()) {
            out.push_str(&self.sub_section(node, role));
        }
        out
    }

    fn sub_section(&self, node: &ParamNode, role: ParamRole) -> String {
        // A lone collection of objects, or a map of objects in second
        // position, is what a wrapper type looks like; document the wrapped
        // node directly
        let broken_out = match node.children.as_slice() {
            [only] if only.is_collection && holds_object(only, 0) => Some(only),
            [_, second] if second.is_map && holds_object(second, 1) => Some(second),
            _ => None,
        };
        let target = broken_out.unwrap_or(node);
        format!(
            "\n- `{}` `{}`\n\n{}",
            target.declared_type,
            target.name,
            self.separated(&target.children, role)
        )
    }

    fn table_head(&self, role: ParamRole) -> String {
        let columns = role.columns();
        let labels: Vec<&str> = columns
            .iter()
            .map(|column| self.label(*column, role))
            .collect();
        format!(
            "|{}|\n|{}|\n",
            labels.join("|"),
            vec![":-----"; columns.len()].join("|")
        )
    }

    fn label(&self, column: Column, role: ParamRole) -> &'static str {
        let labels = self.labels;
        match column {
            Column::Name => labels.name,
            Column::Value => labels.value,
            Column::Type => labels.type_,
            Column::Required if role == ParamRole::Header => labels.header_required,
            Column::Required => labels.required,
            Column::Filterable => labels.filterable,
            Column::Updateable => labels.updateable,
            Column::Description => labels.description,
            Column::Version => labels.version,
        }
    }

    fn row(&self, node: &ParamNode, name: &str, role: ParamRole) -> String {
        let cells: Vec<String> = role
            .columns()
            .iter()
            .map(|column| match column {
                Column::Name => name.to_string(),
                Column::Value => node.example.clone().unwrap_or_default(),
                Column::Type => node.declared_type.clone(),
                Column::Required => self.flag(node.required),
                Column::Filterable => self.flag(node.filterable),
                Column::Updateable => self.flag(node.updateable),
                Column::Description => node.desc.clone(),
                Column::Version => node.version_cell(),
            })
            .collect();
        format!("|{}|\n", cells.join("|"))
    }

    fn flag(&self, value: bool) -> String {
        let text = if value { self.labels.yes } else { self.labels.no };
        text.to_string()
    }
}

/// Whether the synthetic child at `index` of a container has fields
fn holds_object(container: &ParamNode, index: usize) -> bool {
    container
        .children
        .get(index)
        .is_some_and(ParamNode::has_children)
}
