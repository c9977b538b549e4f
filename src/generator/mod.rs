//! # Generator Module
//!
//! Turns a [`Graph`](crate::graph::Graph) into one self-contained HTML page.
//!
//! ## Overview
//!
//! The page has two regions built from the same ordered declaration lists:
//!
//! - **Navigation** - kind sections (Services, Enums, Messages), package alias
//!   groups, then one link per declaration
//! - **Content** - the same outline, with a table per declaration: methods for
//!   services, constants for enums, fields for messages, plus a sub-block per
//!   `oneof`
//!
//! Type references in tables link to the referenced declaration when it is a
//! non-scalar type from an owned file. Everything else is plain text.
//!
//! ## Architecture
//!
//! ```text
//! Graph → catalog (filter, sort, group) → Generator → Layout → io::Write
//!                                              ↘ xref (type links)
//! ```
//!
//! The page skeleton (head, stylesheet, pane preambles, footer) comes from
//! Askama templates in `templates/`; rows are streamed by [`Layout`]. Every
//! write step returns a `Result`, so the first failure ends the run.
//!
//! ## Usage
//!
//! ```rust
//! use protodoc::generator::{Generator, RenderOptions};
//! use protodoc::graph::{EnumConstant, EnumDecl, Graph, Ownership, ProtoFile};
//!
//! let mut file = ProtoFile::new("color.proto", "paint", Ownership::Own);
//! file.enums.push(EnumDecl {
//!     name: "Color".into(),
//!     constants: vec![EnumConstant { name: "RED".into(), value: 0, comment: None }],
//!     comment: None,
//! });
//! let graph = Graph::new(vec![file]);
//!
//! let mut out = Vec::new();
//! Generator::new(RenderOptions::default()).generate(&graph, &mut out).unwrap();
//! let html = String::from_utf8(out).unwrap();
//! assert!(html.contains(r#"<a name="content-Enum-paint-color">Color</a>"#));
//! ```

mod anchors;
mod error;
mod layout;
mod options;
mod render;
mod templates;
mod xref;


pub use anchors::{
    declaration_anchor, group_anchor, oneof_anchor, section_anchor, slugify, type_anchor,
};
pub use error::RenderError;
pub use layout::{escape_html, render_comment, trim_comment_lines, Layout};
pub use options::{FieldOrder, MethodOrder, RenderOptions};
pub use render::Generator;
pub use xref::{oneof_type_ref, resolve_type_ref, TypeRef};
