//! In-document anchor identifiers
//!
//! Every identifier starts with `content-` followed by a kind tag. Slugs are
//! lowercase; letters, digits and `_` are kept and every other run of
//! characters is folded into a single `-`, so `slugify("a.b")` equals `slugify("a") + "-" + slugify("b")`. That
//! property is what lets a type link built from a fully-qualified name land on
//! the anchor built from the declaration's alias and name.

use crate::graph::{DeclKind, Declaration};

const PREFIX: &str = "content";

/// Deterministic anchor-safe form of `input`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_sep = false;
    for c in input.chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    slug
}

fn join(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("-")
}

/// Anchor of a whole kind section (`content-Enum`).
pub fn section_anchor(kind: DeclKind) -> String {
    join(&[PREFIX, kind.as_str()])
}

/// Anchor of a package alias group inside a section.
///
/// Always ends in `-<slug>`, even when the slug is empty, so it can never
/// equal the section anchor.
pub fn group_anchor(kind: DeclKind, alias: &str) -> String {
    format!("{}-{}", section_anchor(kind), slugify(alias))
}

/// Anchor of a declaration block, built from its alias and scoped name.
pub fn declaration_anchor(kind: DeclKind, alias: &str, name: &str) -> String {
    join(&[PREFIX, kind.as_str(), &slugify(alias), &slugify(name)])
}

/// Link target for a type reference to `decl`.
///
/// Enums link into the enum section; everything else links into messages.
pub fn type_anchor(decl: &Declaration<'_>) -> String {
    let bucket = match decl.kind() {
        DeclKind::Enum => DeclKind::Enum,
        DeclKind::Service | DeclKind::Message => DeclKind::Message,
    };
    join(&[PREFIX, bucket.as_str(), &slugify(&decl.full_name())])
}

/// Anchor of a oneof sub-block within the message `message_full_name`.
pub fn oneof_anchor(message_full_name: &str, oneof_name: &str) -> String {
    join(&[
        PREFIX,
        "Oneof",
        &slugify(message_full_name),
        &slugify(oneof_name),
    ])
}
