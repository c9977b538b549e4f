#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::fixtures::{
    color_pixel_file, commented_message, constant, enum_decl, field, message, oneof,
};
use common::html::{anchors, content_pane, count, link_targets, nav_pane};
use common::protos;
use protodoc::generator::{declaration_anchor, Generator, RenderOptions};
use protodoc::graph::{
    load_graph, DeclKind, Graph, LoadOptions, Ownership, OwnedRoot, ProtoFile, Rpc, Service,
};

fn render(graph: &Graph) -> String {
    render_with(graph, RenderOptions::default())
}

fn render_with(graph: &Graph, options: RenderOptions) -> String {
    let mut out = Vec::new();
    Generator::new(options).generate(graph, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

/// Two packages over three owned files, plus an imported dependency.
fn catalog_graph() -> Graph {
    let mut common_types = ProtoFile::new("ext/common.proto", "ext", Ownership::Imported);
    common_types.messages.push(message("Timestamp", vec![]));

    let mut orders = ProtoFile::new("shop/orders.proto", "shop", Ownership::Own);
    orders.enums.push(enum_decl("Status", vec![constant("OPEN", 0)]));
    orders.messages.push(commented_message(
        "Order",
        " An order.\n\n Placed by a customer.\n",
        vec![
            field("id", "string", 1),
            field("status", "Status", 2),
            field("created", ".ext.Timestamp", 3),
            oneof(
                "payment",
                vec![field("card", "Card", 4), oneof("wallet", vec![field("token", "bytes", 5)])],
            ),
        ],
    ));
    orders.messages.push(message("Card", vec![field("number", "string", 1)]));
    orders.services.push(Service {
        name: "Orders".to_string(),
        rpcs: vec![Rpc {
            name: "Get".to_string(),
            request_type: "Order".to_string(),
            response_type: ".ext.Timestamp".to_string(),
            comment: None,
        }],
        comment: None,
    });

    let mut users = ProtoFile::new("users/users.proto", "users", Ownership::Own);
    users.messages.push(message(
        "User",
        vec![field("last_order", ".shop.Order", 1)],
    ));

    let mut more_users = ProtoFile::new("users/roles.proto", "users", Ownership::Own);
    more_users.enums.push(enum_decl("Role", vec![constant("ADMIN", 0)]));

    Graph::new(vec![common_types, orders, users, more_users])
}

#[test]
fn test_color_pixel_scenario() {
    let graph = Graph::new(vec![color_pixel_file()]);
    let html = render(&graph);
    let content = content_pane(&html);

    let color_anchor = declaration_anchor(DeclKind::Enum, "paint", "Color");
    assert_eq!(color_anchor, "content-Enum-paint-color");

    // One Enum entry "Color" with two rows
    assert_eq!(count(content, r#"<div class="definition enum">"#), 1);
    assert_eq!(
        count(content, &format!(r#"<a name="{color_anchor}">Color</a>"#)),
        1
    );
    assert_eq!(count(content, r#"<td class="fld-enum-name">"#), 2);
    let red = content.find(r#"<td class="fld-enum-name">RED</td>"#).unwrap();
    let green = content.find(r#"<td class="fld-enum-name">GREEN</td>"#).unwrap();
    assert!(red < green);
    assert!(content.contains(r#"<td class="fld-enum-value">0</td>"#));
    assert!(content.contains(r#"<td class="fld-enum-value">1</td>"#));

    // One Message entry "Pixel" with one field row linking to Color
    assert_eq!(count(content, r#"<div class="definition message">"#), 1);
    assert_eq!(count(content, r#"<td class="fld-msg-fieldname">"#), 1);
    assert!(content.contains(&format!(
        r##"<td class="fld-msg-type"><a href="#{color_anchor}">Color</a></td>"##
    )));

    // No services section entries
    assert_eq!(count(content, r#"<div class="definition service">"#), 0);
}

#[test]
fn test_output_is_deterministic() {
    let first = render(&catalog_graph());
    let second = render(&catalog_graph());
    assert_eq!(first, second);
}

#[test]
fn test_sections_in_fixed_order() {
    let html = render(&catalog_graph());
    let content = content_pane(&html);
    let services = content.find(r#"<a name="content-Service">Services</a>"#).unwrap();
    let enums = content.find(r#"<a name="content-Enum">Enums</a>"#).unwrap();
    let messages = content.find(r#"<a name="content-Message">Messages</a>"#).unwrap();
    assert!(services < enums && enums < messages);
}

#[test]
fn test_groups_open_and_close_once_per_alias_run() {
    let html = render(&catalog_graph());

    // Services: shop. Enums: shop, users. Messages: shop, users.
    let expected_groups = 5;
    for pane in [nav_pane(&html), content_pane(&html)] {
        assert_eq!(count(pane, r#"<section class="ns-group">"#), expected_groups);
        assert_eq!(count(pane, "</section>"), expected_groups);
    }

    // Both users files end up in one contiguous group
    let content = content_pane(&html);
    assert_eq!(count(content, r#"<a name="content-Enum-users">users</a>"#), 1);
}

#[test]
fn test_every_type_link_has_an_anchor() {
    let html = render(&catalog_graph());
    let anchors = anchors(&html);
    let links = link_targets(&html);
    assert!(!links.is_empty());
    for link in &links {
        assert!(anchors.contains(link), "dangling link #{link}");
    }
}

#[test]
fn test_scalars_and_imports_are_not_linked() {
    let html = render(&catalog_graph());
    let content = content_pane(&html);

    assert!(content.contains(r#"<td class="fld-msg-type">string</td>"#));
    assert!(content.contains(r#"<td class="fld-msg-type">ext.Timestamp</td>"#));
    assert!(content.contains(r#"<td class="fld-svc-ret">ext.Timestamp</td>"#));
    assert!(!html.contains("content-Message-ext-timestamp"));

    // Imported declarations get no block of their own
    assert!(!content.contains(">Timestamp</a>"));
}

#[test]
fn test_cross_file_references_use_full_names() {
    let html = render(&catalog_graph());
    assert!(html.contains(
        r##"<td class="fld-msg-type"><a href="#content-Message-shop-order">shop.Order</a></td>"##
    ));
    assert!(html.contains(
        r##"<td class="fld-svc-req"><a href="#content-Message-shop-order">Order</a></td>"##
    ));
}

#[test]
fn test_oneof_blocks_follow_message_in_pre_order() {
    let html = render(&catalog_graph());
    let content = content_pane(&html);

    let payment = content
        .find(r#"<a name="content-Oneof-shop-order-payment">Oneof Order.payment</a>"#)
        .unwrap();
    let wallet = content
        .find(r#"<a name="content-Oneof-shop-order-wallet">Oneof Order.wallet</a>"#)
        .unwrap();
    let order_block = content.find(r#"<a name="content-Message-shop-order">"#).unwrap();
    assert!(order_block < payment && payment < wallet);

    assert!(content.contains(
        r##"<a href="#content-Oneof-shop-order-payment">oneof (card, wallet)</a>"##
    ));
    assert_eq!(count(content, r#"<table class="oneof">"#), 2);
}

#[test]
fn test_comment_rendering() {
    let html = render(&catalog_graph());
    assert!(html.contains(
        r#"<div class="description"><p> An order.<br/><br/> Placed by a customer.</p></div>"#
    ));
}

#[test]
fn test_file_path_restriction() {
    let options = RenderOptions {
        file_paths: vec!["users/roles.proto".to_string()],
        ..RenderOptions::default()
    };
    let html = render_with(&catalog_graph(), options);
    let content = content_pane(&html);
    assert!(content.contains(r#"<a name="content-Enum-users-role">Role</a>"#));
    assert!(!content.contains("content-Message-shop-order"));
    assert_eq!(count(content, r#"<section class="ns-group">"#), 1);
}

#[test]
fn test_empty_package_round_trips() {
    let mut file = ProtoFile::new("bare.proto", "", Ownership::Own);
    file.enums.push(enum_decl("Kind", vec![constant("A", 0)]));
    file.messages.push(message("Thing", vec![field("kind", "Kind", 1)]));
    let html = render(&Graph::new(vec![file]));

    assert!(html.contains(r#"<a name="content-Enum-kind">Kind</a>"#));
    assert!(html.contains(r##"<a href="#content-Enum-kind">Kind</a>"##));
    assert_eq!(
        count(content_pane(&html), r#"<section class="ns-group">"#),
        count(content_pane(&html), "</section>")
    );
}

#[test]
fn test_loaded_protos_render_end_to_end() {
    let owned = tempfile::tempdir().unwrap();
    let include = tempfile::tempdir().unwrap();

    protos::write(
        include.path(),
        "ext/money.proto",
        "syntax = \"proto3\";\npackage ext;\nmessage Money { int64 units = 1; }\n",
    );
    protos::write(
        owned.path(),
        "v1/store.proto",
        r#"syntax = "proto3";
package acme.store.v1;

import "ext/money.proto";
import "google/protobuf/timestamp.proto";
import "does/not/exist.proto";

// Stock keeping unit.
message Sku {
  string code = 1;
  ext.Money price = 2;
  google.protobuf.Timestamp updated = 3;
  repeated Tag tags = 4;
  map<string, Sku> variants = 5;

  enum Tag {
    TAG_UNSPECIFIED = 0;
    TAG_SALE = 1;
  }
}

service Store {
  // Look up a SKU.
  rpc GetSku(Sku) returns (Sku);
}
"#,
    );

    let graph = load_graph(&LoadOptions {
        include_dirs: vec![include.path().to_path_buf()],
        owned_roots: vec![OwnedRoot {
            dir: owned.path().to_path_buf(),
            prefix: "acme".to_string(),
        }],
        ignore_missing_imports: true,
    })
    .unwrap();

    assert!(graph.file("acme/v1/store.proto").unwrap().is_owned());
    assert!(!graph.file("ext/money.proto").unwrap().is_owned());

    let html = render(&graph);
    let content = content_pane(&html);

    assert!(content.contains(r#"<span class="filename">[acme/v1/store.proto]</span>"#));
    assert!(content.contains(r#"<a name="content-Message-acme-store-v1-sku">Sku</a>"#));
    assert!(content.contains(r#"<a name="content-Enum-acme-store-v1-sku-tag">Sku.Tag</a>"#));
    assert!(content.contains(
        r##"<td class="fld-msg-type"><a href="#content-Enum-acme-store-v1-sku-tag">Sku.Tag[]</a></td>"##
    ));
    assert!(content.contains(r#"<td class="fld-msg-type">ext.Money</td>"#));
    assert!(content.contains(r#"<td class="fld-msg-type">google.protobuf.Timestamp</td>"#));
    assert!(content.contains(
        r##"map&#60;string, <a href="#content-Message-acme-store-v1-sku">Sku</a>&#62;"##
    ));
    assert!(content.contains(r#"<td class="fld-svc-doc"> Look up a SKU.</td>"#));
    assert!(content.contains("<p> Stock keeping unit.</p>"));
}

#[test]
fn test_missing_import_renders_unlinked_reference() {
    let owned = tempfile::tempdir().unwrap();
    protos::write(
        owned.path(),
        "shop/cart.proto",
        r#"syntax = "proto3";
package shop;

import "vendor/widget.proto";

message Cart {
  vendor.Widget widget = 1;
  repeated Line lines = 2;

  message Line { string sku = 1; }
}
"#,
    );

    let graph = load_graph(&LoadOptions {
        owned_roots: vec![OwnedRoot::parse(owned.path().to_str().unwrap())],
        ignore_missing_imports: true,
        ..LoadOptions::default()
    })
    .unwrap();

    let html = render(&graph);
    let content = content_pane(&html);
    assert!(content.contains(r#"<td class="fld-msg-type">vendor.Widget</td>"#));
    assert!(content.contains(
        r##"<td class="fld-msg-type"><a href="#content-Message-shop-cart-line">Cart.Line[]</a></td>"##
    ));
    assert!(!html.contains("content-Message-vendor"));
}

#[test]
fn test_strict_loading_rejects_missing_import() {
    let owned = tempfile::tempdir().unwrap();
    protos::write(
        owned.path(),
        "a.proto",
        "syntax = \"proto3\";\nimport \"missing/dep.proto\";\nmessage A {}\n",
    );
    let result = load_graph(&LoadOptions {
        owned_roots: vec![OwnedRoot::parse(owned.path().to_str().unwrap())],
        ..LoadOptions::default()
    });
    assert!(result.is_err());
}
