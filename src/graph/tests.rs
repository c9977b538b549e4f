#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use std::fs;

fn enum_decl(name: &str) -> EnumDecl {
    EnumDecl {
        name: name.to_string(),
        constants: vec![],
        comment: None,
    }
}

fn message(name: &str, fields: Vec<Field>) -> Message {
    Message {
        name: name.to_string(),
        fields,
        comment: None,
    }
}

fn sample_graph() -> Graph {
    let mut shop = ProtoFile::new("shop/shop.proto", "shop.v1", Ownership::Own);
    shop.enums.push(enum_decl("Color"));
    shop.enums.push(enum_decl("Order.State"));
    shop.messages.push(message("Order", vec![]));
    shop.messages.push(message("Order.Line", vec![]));

    let mut common = ProtoFile::new("common/money.proto", "common", Ownership::Imported);
    common.messages.push(message("Money", vec![]));

    Graph::new(vec![shop, common])
}

fn resolved_name(resolved: Option<ResolvedType<'_>>) -> String {
    match resolved {
        Some(ResolvedType::Declared(decl)) => decl.full_name(),
        Some(ResolvedType::Scalar(s)) => format!("scalar:{}", s.as_str()),
        None => "<none>".to_string(),
    }
}

#[test]
fn test_files_sorted_by_path() {
    let graph = sample_graph();
    let paths: Vec<_> = graph.files().iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["common/money.proto", "shop/shop.proto"]);
    assert!(graph.file("shop/shop.proto").is_some());
    assert!(graph.file("missing.proto").is_none());
}

#[test]
fn test_duplicate_file_path_keeps_last() {
    let first = ProtoFile::new("a.proto", "first", Ownership::Own);
    let second = ProtoFile::new("a.proto", "second", Ownership::Own);
    let graph = Graph::new(vec![first, second]);
    assert_eq!(graph.files().len(), 1);
    assert_eq!(graph.files()[0].package, "second");
}

#[test]
fn test_lookup_by_full_name() {
    let graph = sample_graph();
    let decl = graph.lookup("shop.v1.Order.Line").unwrap();
    assert_eq!(decl.kind(), DeclKind::Message);
    assert_eq!(decl.name(), "Order.Line");
    assert_eq!(decl.alias(), "shop.v1");
    assert!(decl.is_owned());
    assert!(graph.lookup("Order").is_none());
}

#[test]
fn test_resolve_scalar() {
    let graph = sample_graph();
    let ctx = graph.lookup("shop.v1.Order").unwrap();
    let resolved = graph.resolve_type(&ctx, "int32").unwrap();
    assert_eq!(resolved_name(resolved), "scalar:int32");
}

#[test]
fn test_resolve_relative_walks_enclosing_scopes() {
    let graph = sample_graph();
    let ctx = graph.lookup("shop.v1.Order.Line").unwrap();

    // Sibling nested in the parent message
    let state = graph.resolve_type(&ctx, "State").unwrap();
    assert_eq!(resolved_name(state), "shop.v1.Order.State");

    // Package-level declaration
    let color = graph.resolve_type(&ctx, "Color").unwrap();
    assert_eq!(resolved_name(color), "shop.v1.Color");

    // Partially qualified from the root
    let money = graph.resolve_type(&ctx, "common.Money").unwrap();
    assert_eq!(resolved_name(money), "common.Money");
}

#[test]
fn test_resolve_fully_qualified() {
    let graph = sample_graph();
    let ctx = graph.lookup("shop.v1.Order").unwrap();
    let resolved = graph.resolve_type(&ctx, ".shop.v1.Color").unwrap();
    assert_eq!(resolved_name(resolved), "shop.v1.Color");
}

#[test]
fn test_resolve_missing_is_error_by_default() {
    let graph = sample_graph();
    let ctx = graph.lookup("shop.v1.Order").unwrap();
    let err = graph.resolve_type(&ctx, "Nope").unwrap_err();
    match err {
        ResolveError::NotFound {
            type_name, file, ..
        } => {
            assert_eq!(type_name, "Nope");
            assert_eq!(file, "shop/shop.proto");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_resolve_missing_tolerated() {
    let graph = sample_graph().with_ignore_not_found(true);
    let ctx = graph.lookup("shop.v1.Order").unwrap();
    assert!(graph.resolve_type(&ctx, "Nope").unwrap().is_none());
}

#[test]
fn test_resolve_invalid_name_always_errors() {
    let graph = sample_graph().with_ignore_not_found(true);
    let ctx = graph.lookup("shop.v1.Order").unwrap();
    for bad in ["", ".", "a..b", "has space", "trailing."] {
        let err = graph.resolve_type(&ctx, bad).unwrap_err();
        assert!(
            matches!(err, ResolveError::InvalidName { .. }),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_field_first_tag() {
    let plain = |name: &str, tag| {
        Field::Plain(PlainField {
            name: name.to_string(),
            type_name: "string".to_string(),
            tag,
            required: false,
            repeated: false,
            optional: false,
            comment: None,
        })
    };
    let oneof = Field::Oneof(OneofField {
        name: "choice".to_string(),
        fields: vec![plain("a", 7), plain("b", 3)],
        comment: None,
    });
    assert_eq!(oneof.first_tag(), 7);
    let empty = Field::Oneof(OneofField {
        name: "empty".to_string(),
        fields: vec![],
        comment: None,
    });
    assert_eq!(empty.first_tag(), 0);
}

#[test]
fn test_owned_root_parse_and_logical_name() {
    let root = OwnedRoot::parse("protos;acme/api/");
    assert_eq!(root.dir, std::path::PathBuf::from("protos"));
    assert_eq!(root.prefix, "acme/api");
    assert_eq!(
        root.logical_name(std::path::Path::new("protos/v1/user.proto")),
        Some("acme/api/v1/user.proto".to_string())
    );

    let bare = OwnedRoot::parse("protos");
    assert_eq!(bare.prefix, "");
    assert_eq!(
        bare.logical_name(std::path::Path::new("protos/user.proto")),
        Some("user.proto".to_string())
    );
    assert_eq!(bare.logical_name(std::path::Path::new("other/user.proto")), None);
}

#[test]
fn test_load_graph_owned_and_imported() {
    let owned = tempfile::tempdir().unwrap();
    let include = tempfile::tempdir().unwrap();

    fs::write(
        include.path().join("money.proto"),
        "syntax = \"proto3\";\npackage common;\nmessage Money { int64 units = 1; }\n",
    )
    .unwrap();
    fs::write(
        owned.path().join("shop.proto"),
        r#"syntax = "proto3";
package shop;
import "money.proto";

// A sellable thing.
message Item {
  // Display name
  string name = 1;
  common.Money price = 2;
  map<string, int32> stock = 3;
  oneof discount {
    int32 percent = 4;
    common.Money amount = 5;
  }
  optional string note = 6;
  message Variant { string sku = 1; }
  enum Kind { KIND_UNSPECIFIED = 0; }
}

service Catalog {
  rpc GetItem(Item) returns (Item);
}
"#,
    )
    .unwrap();

    let graph = load_graph(&LoadOptions {
        include_dirs: vec![include.path().to_path_buf()],
        owned_roots: vec![OwnedRoot {
            dir: owned.path().to_path_buf(),
            prefix: String::new(),
        }],
        ignore_missing_imports: false,
    })
    .unwrap();

    let shop = graph.file("shop.proto").unwrap();
    assert!(shop.is_owned());
    assert_eq!(shop.package, "shop");
    let money = graph.file("money.proto").unwrap();
    assert_eq!(money.ownership, Ownership::Imported);

    let item = graph.lookup("shop.Item").unwrap();
    let DeclItem::Message(msg) = item.item else {
        panic!("expected message");
    };
    assert_eq!(
        item.comment().unwrap().lines.first().map(String::as_str),
        Some(" A sellable thing.")
    );

    let names: Vec<_> = msg.fields.iter().map(Field::name).collect();
    assert_eq!(names, vec!["name", "price", "stock", "discount", "note"]);

    match &msg.fields[1] {
        Field::Plain(f) => assert_eq!(f.type_name, ".common.Money"),
        other => panic!("unexpected field {other:?}"),
    }
    match &msg.fields[2] {
        Field::Map(f) => {
            assert_eq!(f.key_type, "string");
            assert_eq!(f.value_type, "int32");
        }
        other => panic!("unexpected field {other:?}"),
    }
    match &msg.fields[3] {
        Field::Oneof(f) => assert_eq!(f.fields.len(), 2),
        other => panic!("unexpected field {other:?}"),
    }
    match &msg.fields[4] {
        Field::Plain(f) => assert!(f.optional),
        other => panic!("unexpected field {other:?}"),
    }

    assert!(graph.lookup("shop.Item.Variant").is_some());
    assert!(graph.lookup("shop.Item.Kind").is_some());
    assert!(graph.lookup("shop.Item.StockEntry").is_none());
    assert!(graph.lookup("shop.Catalog").is_some());
}

#[test]
fn test_load_graph_tolerates_missing_import() {
    let owned = tempfile::tempdir().unwrap();
    fs::write(
        owned.path().join("a.proto"),
        r#"syntax = "proto3";
package shop;
import "vendor/ext.proto";

message Holder {
  ext.Thing thing = 1;
  Holder parent = 2;
}
"#,
    )
    .unwrap();
    let options = |ignore_missing_imports| LoadOptions {
        owned_roots: vec![OwnedRoot::parse(owned.path().to_str().unwrap())],
        ignore_missing_imports,
        ..LoadOptions::default()
    };

    assert!(load_graph(&options(false)).is_err());

    let graph = load_graph(&options(true)).unwrap();
    assert_eq!(graph.files().len(), 1);
    assert!(graph.file("vendor/ext.proto").is_none());

    let holder = graph.lookup("shop.Holder").unwrap();
    let DeclItem::Message(msg) = holder.item else {
        panic!("expected message");
    };
    let types: Vec<_> = msg
        .fields
        .iter()
        .map(|f| match f {
            Field::Plain(f) => f.type_name.as_str(),
            other => panic!("unexpected field {other:?}"),
        })
        .collect();
    assert_eq!(types, vec!["ext.Thing", "Holder"]);

    assert!(graph.resolve_type(&holder, "ext.Thing").unwrap().is_none());
    let parent = graph.resolve_type(&holder, "Holder").unwrap();
    assert_eq!(resolved_name(parent), "shop.Holder");
}

#[test]
fn test_load_graph_rejects_non_directory_root() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("not_a_dir.proto");
    fs::write(&file, "syntax = \"proto3\";\n").unwrap();

    let err = load_graph(&LoadOptions {
        owned_roots: vec![OwnedRoot {
            dir: file,
            prefix: String::new(),
        }],
        ..LoadOptions::default()
    })
    .unwrap_err();
    assert!(err.to_string().contains("isn't a directory"));
}
