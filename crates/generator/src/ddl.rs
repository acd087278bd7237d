//! MySQL `CREATE TABLE` rendering from the top level of a parameter tree

use paramdoc_common::ParamNode;

const DEFAULT_SQL_TYPE: &str = "VARCHAR(50) DEFAULT ''";
const FALLBACK_PRIMARY_KEY: &str = "id";

/// Convert a camelCase identifier to snake_case
///
/// Every ASCII uppercase letter becomes `_` followed by its lowercase form;
/// a leading `_` produced this way is dropped. Input that is already
/// snake_case comes back unchanged.
pub fn camel4underline(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    if name.starts_with(|c: char| c.is_ascii_uppercase()) {
        out.remove(0);
    }
    out
}

/// SQL column type for a node
///
/// Only nodes the classifier recognised as scalars get a typed column.
pub fn sql_type(node: &ParamNode) -> &'static str {
    if node.is_json {
        return "JSON";
    }
    if node.scalar.is_none() {
        return DEFAULT_SQL_TYPE;
    }
    match node.declared_type.as_str() {
        "String" => DEFAULT_SQL_TYPE,
        "Integer" => "INT DEFAULT -1",
        "Long" => "BIGINT(15)",
        "Double" => "DOUBLE DEFAULT 0.0",
        "Float" => "FLOAT DEFAULT 0.0",
        "Boolean" => "TINYINT DEFAULT -1",
        "Date" | "Time" | "Timestamp" => "TIMESTAMP DEFAULT now()",
        _ => DEFAULT_SQL_TYPE,
    }
}

fn quote(text: &str) -> String {
    text.replace('\'', "''")
}

fn column(node: &ParamNode) -> String {
    let constraint = if node.is_primary_key {
        " NOT NULL AUTO_INCREMENT"
    } else if node.required {
        " NOT NULL"
    } else {
        ""
    };
    format!(
        "  {} {}{} COMMENT '{}',\n",
        camel4underline(&node.name),
        sql_type(node),
        constraint,
        quote(&node.desc)
    )
}

/// Render a `CREATE TABLE` statement
///
/// Only direct nodes become columns, in order, skipping those not stored.
/// The first primary-key node names the key; otherwise `id` is assumed.
pub fn to_ddl(table: &str, comment: &str, nodes: &[ParamNode]) -> String {
    let columns: String = nodes
        .iter()
        .filter(|node| node.exists_in_storage)
        .map(column)
        .collect();

    let primary_key = nodes
        .iter()
        .find(|node| node.is_primary_key)
        .map(|node| camel4underline(&node.name))
        .unwrap_or_else(|| FALLBACK_PRIMARY_KEY.to_string());

    format!(
        "-- auto Generated\n\
         -- DROP TABLE IF EXISTS {table};\n\
         CREATE TABLE {table}(\n\
         {columns}  PRIMARY KEY ({primary_key})\n\
         ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COMMENT '{comment}';",
        comment = quote(comment),
    )
}
