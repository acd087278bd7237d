//! End-to-end rendering tests: catalog -> tree -> renderers

use paramdoc_common::{FieldDescriptor, ParamNode, Settings, TypeRef};
use paramdoc_generator::{
    json_example, synthesize, to_ddl, DocGenerator, DocView, MarkdownRenderer, ParamRole,
};
use paramdoc_parser::{flatten_form_params, Direction, TreeBuilder, TypeCatalog};
use serde_json::json;
use std::io::Write;

const CATALOG: &str = r#"{
  "types": [
    {
      "name": "com.acme.Account",
      "doc": "/**\n * User account\n */",
      "table_name": "t_account",
      "fields": [
        { "name": "id", "type": "Long", "primary_key": true },
        { "name": "name", "type": "String", "required": true, "desc": "Display name" },
        { "name": "tags", "type": "List<String>" }
      ]
    },
    {
      "name": "com.acme.Result",
      "type_params": ["T"],
      "fields": [
        { "name": "code", "type": "int" },
        { "name": "data", "type": "T" }
      ]
    },
    {
      "name": "com.acme.Node",
      "fields": [
        { "name": "label", "type": "String" },
        { "name": "next", "type": "com.acme.Node" },
        { "name": "attrs", "type": "Map<String, com.acme.Node>" }
      ]
    }
  ]
}"#;

fn catalog() -> TypeCatalog {
    TypeCatalog::from_json(CATALOG).unwrap()
}

fn tree(catalog: &TypeCatalog, root: &str) -> Vec<ParamNode> {
    TreeBuilder::new(catalog, &Settings::default()).build(&TypeRef::parse(root).unwrap())
}

#[test]
fn test_account_example_json() {
    let nodes = tree(&catalog(), "com.acme.Account");
    assert_eq!(synthesize(&nodes), json!({"id": 0, "name": "", "tags": [""]}));
    assert_eq!(
        json_example(&nodes),
        "```JSON\n{\n    \"id\": 0,\n    \"name\": \"\",\n    \"tags\": [\n        \"\"\n    ]\n}\n```"
    );
}

#[test]
fn test_account_inline_markdown_rows() {
    let nodes = tree(&catalog(), "com.acme.Account");
    let text = MarkdownRenderer::new(Settings::default().locale).inline(&nodes, ParamRole::RequestBody);

    let rows: Vec<&str> = text.lines().skip(2).collect();
    assert_eq!(rows.len(), ParamNode::tree_len(&nodes));
    assert_eq!(rows.len(), 4);
    assert!(rows[1].starts_with("|name|String|Yes|"));
    assert!(rows[3].starts_with("|item|String|"));
}

#[test]
fn test_account_ddl() {
    let nodes = tree(&catalog(), "com.acme.Account");
    let ddl = to_ddl("t_account", "User account", &nodes);
    assert!(ddl.contains("  id BIGINT(15) NOT NULL AUTO_INCREMENT COMMENT '',\n"));
    assert!(ddl.contains("  name VARCHAR(50) DEFAULT '' NOT NULL COMMENT 'Display name',\n"));
    assert!(ddl.contains("  tags VARCHAR(50) DEFAULT '' COMMENT '',\n"));
    assert!(ddl.contains("  PRIMARY KEY (id)\n"));
    assert!(ddl.ends_with("COMMENT 'User account';"));
}

#[test]
fn test_renders_are_deterministic() {
    let catalog = catalog();
    let renderer = MarkdownRenderer::new(Settings::default().locale);
    for root in ["com.acme.Account", "com.acme.Node", "com.acme.Result<com.acme.Account>"] {
        let first = tree(&catalog, root);
        let second = tree(&catalog, root);
        for separate in [false, true] {
            assert_eq!(
                renderer.render(&first, ParamRole::ResponseBody, separate),
                renderer.render(&second, ParamRole::ResponseBody, separate)
            );
        }
        assert_eq!(json_example(&first), json_example(&second));
    }
}

#[test]
fn test_cyclic_type_is_finite_and_renders() {
    let nodes = tree(&catalog(), "com.acme.Node");
    assert_eq!(nodes.len(), 3);
    // next: cyclic leaf; attrs: key + value, value cyclic
    assert!(nodes[1].children.is_empty());
    assert_eq!(nodes[2].children.len(), 2);
    assert!(nodes[2].children[1].children.is_empty());

    // Cyclic leaves carry no example value
    assert_eq!(synthesize(&nodes), json!({"label": "", "attrs": {}}));
}

#[test]
fn test_document_render() {
    let catalog = catalog();
    let settings = Settings::default();

    let params = vec![FieldDescriptor::new("verbose", TypeRef::named("boolean"))];
    let view = DocView {
        name: "Create account".to_string(),
        desc: "Creates a new account".to_string(),
        method: "post".to_string(),
        path: "accounts/".to_string(),
        headers: vec![ParamNode::header("X-Token", "abc", true, "Auth token")],
        request_params: flatten_form_params(&catalog, &params),
        request_body: TreeBuilder::new(&catalog, &settings)
            .with_direction(Direction::Request)
            .build(&TypeRef::parse("com.acme.Account").unwrap()),
        response_body: TreeBuilder::new(&catalog, &settings)
            .with_direction(Direction::Response)
            .build(&TypeRef::parse("com.acme.Result<com.acme.Account>").unwrap()),
    };

    let text = DocGenerator::new(settings.clone()).unwrap().render(&view).unwrap();
    assert!(text.starts_with("# Create account\n\nCreates a new account\n"));
    assert!(text.contains("| POST | /accounts |"));
    assert!(text.contains("## Request Headers"));
    assert!(text.contains("|X-Token|abc|Yes|Auth token|none|"));
    assert!(text.contains("## Request Parameters"));
    assert!(text.contains("```Form\nverbose:false\n```\n\n```JSON\n"));
    assert!(text.contains("## Response Body"));
    assert!(text.contains("|data|Account|"));
    assert!(text.contains("|└─name|String|"));
}

#[test]
fn test_custom_template_from_settings() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{{{ method }}}} {{{{ path }}}}").unwrap();

    let settings = Settings {
        template: Some(file.path().to_path_buf()),
        ..Settings::default()
    };
    let view = DocView {
        method: "delete".to_string(),
        path: "/accounts/{id}/".to_string(),
        ..DocView::default()
    };
    let text = DocGenerator::new(settings).unwrap().render(&view).unwrap();
    assert_eq!(text, "DELETE /accounts/{id}");
}

const WRAPPERS: &str = r#"{
  "types": [
    { "name": "com.acme.Holder", "fields": [ { "name": "w", "type": "com.acme.Wrapper" } ] },
    { "name": "com.acme.Wrapper", "fields": [ { "name": "tags", "type": "List<String>" } ] },
    { "name": "com.acme.SHolder", "fields": [ { "name": "s", "type": "com.acme.Stats" } ] },
    {
      "name": "com.acme.Stats",
      "fields": [
        { "name": "total", "type": "int" },
        { "name": "labels", "type": "Map<String, Integer>" }
      ]
    },
    {
      "name": "com.acme.E",
      "fields": [
        { "name": "e", "type": "com.acme.Empty" },
        { "name": "n", "type": "int" },
        { "name": "at", "type": "com.vendor.Timestamp" }
      ]
    },
    { "name": "com.acme.Empty", "fields": [] }
  ]
}"#;

#[test]
fn test_separated_scalar_containers_keep_their_parent() {
    let catalog = TypeCatalog::from_json(WRAPPERS).unwrap();
    let renderer = MarkdownRenderer::new(Settings::default().locale);

    let text = renderer.separated(&tree(&catalog, "com.acme.Holder"), ParamRole::ResponseBody);
    assert!(text.contains("\n- `Wrapper` `w`\n\n"));
    assert!(text.contains("|tags|List<String>|"));

    let text = renderer.separated(&tree(&catalog, "com.acme.SHolder"), ParamRole::ResponseBody);
    assert!(text.contains("\n- `Stats` `s`\n\n"));
    assert!(text.contains("|total|int|"));
    assert!(text.contains("|labels|Map<String, Integer>|"));
}

#[test]
fn test_empty_object_and_foreign_scalar_in_example() {
    let catalog = TypeCatalog::from_json(WRAPPERS).unwrap();
    let nodes = tree(&catalog, "com.acme.E");
    assert_eq!(synthesize(&nodes), json!({"e": {}, "n": 0}));

    let ddl = to_ddl("t_e", "", &nodes);
    assert!(ddl.contains("  at VARCHAR(50) DEFAULT '' COMMENT '',\n"));
}
