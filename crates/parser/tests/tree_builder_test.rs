//! Integration tests for parameter tree construction

use paramdoc_common::{ParamNode, Settings, TypeRef};
use paramdoc_parser::{
    flatten_form_params, Direction, TreeBuilder, TypeCatalog, COLLECTION_ELEMENT, MAP_KEY,
    MAP_VALUE,
};

const CATALOG: &str = r#"
types:
  - name: com.acme.Result
    type_params: [T]
    fields:
      - name: code
        type: int
        required: true
      - name: data
        type: T
      - name: message
        type: String

  - name: com.acme.Page
    type_params: [E]
    fields:
      - name: records
        type: List<E>
      - name: total
        type: long

  - name: com.acme.BaseEntity
    type_params: [K]
    fields:
      - name: id
        type: K
        primary_key: true
      - name: createTime
        type: java.util.Date
        ignore_request: true

  - name: com.acme.User
    extends: com.acme.BaseEntity<Long>
    doc: "/** Registered user */"
    fields:
      - name: name
        type: String
        required: true
        desc: "User name"
        since: "1.2"
      - name: id
        type: String
        desc: "Shadowed by the subclass declaration order"
      - name: address
        type: com.acme.Address
      - name: tags
        type: List<String>
      - name: scores
        type: Map<String, com.acme.Score>
      - name: status
        type: com.acme.Status
      - name: password
        type: String
        excluded: true
      - name: token
        type: String
        ignore_response: true

  - name: com.acme.Address
    fields:
      - name: city
        type: String
        desc: "City @since 1.0"
        since: "1.0"
        version: "2.1"
      - name: geo
        type: com.acme.Geo

  - name: com.acme.Geo
    fields:
      - name: lat
        type: double
      - name: lng
        type: double

  - name: com.acme.Score
    fields:
      - name: value
        type: Integer

  - name: com.acme.Status
    kind: enum
    constants: [ACTIVE, LOCKED]

  - name: com.vendor.Blob
    opaque: true
"#;

fn catalog() -> TypeCatalog {
    TypeCatalog::from_yaml(CATALOG).unwrap()
}

fn ty(text: &str) -> TypeRef {
    TypeRef::parse(text).unwrap()
}

fn names(nodes: &[ParamNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.name.as_str()).collect()
}

#[test]
fn test_field_order_with_inheritance() {
    let catalog = catalog();
    let settings = Settings::default();
    let nodes = TreeBuilder::new(&catalog, &settings).build(&ty("com.acme.User"));

    // Own fields first, then supertype fields not already declared
    assert_eq!(
        names(&nodes),
        vec!["name", "id", "address", "tags", "scores", "status", "token", "createTime"]
    );
    // `id` keeps the subclass declaration
    assert_eq!(nodes[1].declared_type, "String");
}

#[test]
fn test_supertype_generic_binding() {
    let catalog = catalog();
    let settings = Settings::default();
    let nodes = TreeBuilder::new(&catalog, &settings).build(&ty("com.acme.BaseEntity<Long>"));
    assert_eq!(nodes[0].declared_type, "Long");
    assert!(nodes[0].is_primary_key);
}

#[test]
fn test_direction_filters() {
    let catalog = catalog();
    let settings = Settings::default();

    let request = TreeBuilder::new(&catalog, &settings)
        .with_direction(Direction::Request)
        .build(&ty("com.acme.User"));
    assert!(names(&request).contains(&"token"));
    assert!(!names(&request).contains(&"createTime"));

    let response = TreeBuilder::new(&catalog, &settings)
        .with_direction(Direction::Response)
        .build(&ty("com.acme.User"));
    assert!(!names(&response).contains(&"token"));
    assert!(names(&response).contains(&"createTime"));
}

#[test]
fn test_collection_and_map_children() {
    let catalog = catalog();
    let settings = Settings::default();
    let nodes = TreeBuilder::new(&catalog, &settings).build(&ty("com.acme.User"));

    let tags = &nodes[3];
    assert!(tags.is_collection);
    assert_eq!(tags.declared_type, "List<String>");
    assert_eq!(names(&tags.children), vec![COLLECTION_ELEMENT]);
    assert_eq!(tags.children[0].declared_type, "String");

    let scores = &nodes[4];
    assert!(scores.is_map);
    assert_eq!(names(&scores.children), vec![MAP_KEY, MAP_VALUE]);
    assert_eq!(scores.children[0].declared_type, "String");
    assert_eq!(scores.children[1].declared_type, "Score");
    assert_eq!(names(&scores.children[1].children), vec!["value"]);
}

#[test]
fn test_enum_leaf_example() {
    let catalog = catalog();
    let settings = Settings::default();
    let nodes = TreeBuilder::new(&catalog, &settings).build(&ty("com.acme.User"));
    let status = &nodes[5];
    assert!(status.children.is_empty());
    assert_eq!(status.example.as_deref(), Some("ACTIVE"));
}

#[test]
fn test_generic_wrapper_substitution() {
    let catalog = catalog();
    let settings = Settings::default();
    let nodes = TreeBuilder::new(&catalog, &settings)
        .build(&ty("com.acme.Result<com.acme.Page<com.acme.Score>>"));

    assert_eq!(names(&nodes), vec!["code", "data", "message"]);
    let data = &nodes[1];
    assert_eq!(data.declared_type, "Page<Score>");
    assert_eq!(names(&data.children), vec!["records", "total"]);

    let records = &data.children[0];
    assert_eq!(records.declared_type, "List<Score>");
    assert!(records.is_collection);
    assert_eq!(names(&records.children[0].children), vec!["value"]);
}

#[test]
fn test_unbound_and_opaque_types_are_leaves() {
    let catalog = catalog();
    let settings = Settings::default();
    let builder = TreeBuilder::new(&catalog, &settings);

    let raw = builder.build(&ty("com.acme.Result"));
    assert_eq!(raw[1].declared_type, "T");
    assert!(raw[1].children.is_empty());

    assert!(builder.build(&ty("com.vendor.Blob")).is_empty());
}

#[test]
fn test_prefix_markers() {
    let catalog = catalog();
    let settings = Settings {
        prefix_symbol_1: "└".to_string(),
        prefix_symbol_2: "─".to_string(),
        ..Settings::default()
    };
    let nodes = TreeBuilder::new(&catalog, &settings).build(&ty("com.acme.User"));

    let address = &nodes[2];
    assert_eq!(address.name_cell(), "address");
    let city = &address.children[0];
    assert_eq!(city.name_cell(), "└─city");
    let lat = &address.children[1].children[0];
    assert_eq!(lat.name_cell(), "└──lat");

    // Synthetic children sit at their container's level
    let scores = &nodes[4];
    assert_eq!(scores.children[1].name_cell(), "value");
    assert_eq!(scores.children[1].children[0].name_cell(), "└─value");
}

#[test]
fn test_doc_metadata_and_cleanup() {
    let catalog = catalog();
    let settings = Settings::default();
    let nodes = TreeBuilder::new(&catalog, &settings).build(&ty("com.acme.User"));

    let name = &nodes[0];
    assert!(name.required);
    assert_eq!(name.desc, "User name");
    assert_eq!(name.version_cell(), "1.2-none");

    let city = &nodes[2].children[0];
    assert_eq!(city.desc, "");
    assert_eq!(city.since, "");
    assert_eq!(city.version, "2.1");
}

#[test]
fn test_build_parameter_roots() {
    let catalog = catalog();
    let settings = Settings::default();
    let builder = TreeBuilder::new(&catalog, &settings);

    let scalar = builder.build_parameter(&paramdoc_common::FieldDescriptor::new("id", ty("Long")));
    assert_eq!(names(&scalar), vec!["id"]);

    let list = builder.build_parameter(&paramdoc_common::FieldDescriptor::new(
        "users",
        ty("List<com.acme.Geo>"),
    ));
    assert_eq!(list.len(), 1);
    assert!(list[0].is_collection);
    assert_eq!(names(&list[0].children[0].children), vec!["lat", "lng"]);

    let object = builder.build_parameter(&paramdoc_common::FieldDescriptor::new(
        "geo",
        ty("com.acme.Geo"),
    ));
    assert_eq!(names(&object), vec!["lat", "lng"]);
}

#[test]
fn test_builds_are_independent() {
    let catalog = catalog();
    let settings = Settings::default();
    let builder = TreeBuilder::new(&catalog, &settings);
    let first = builder.build(&ty("com.acme.User"));
    let second = builder.build(&ty("com.acme.User"));
    assert_eq!(first, second);
    assert_eq!(ParamNode::tree_len(&first), ParamNode::tree_len(&second));
}

#[test]
fn test_form_params_from_catalog() {
    let catalog = catalog();
    let params = vec![paramdoc_common::FieldDescriptor::new(
        "user",
        ty("com.acme.User"),
    )];
    let nodes = flatten_form_params(&catalog, &params);
    // Scalar fields only, supertype included
    assert_eq!(names(&nodes), vec!["name", "id", "token", "createTime"]);
}
