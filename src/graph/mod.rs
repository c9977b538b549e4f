//! # Declaration Graph
//!
//! In-memory view of a set of parsed Protocol Buffers files, each tagged as
//! owned by the documented project or imported from elsewhere.
//!
//! ## Overview
//!
//! The graph is the collaborator the documentation generator reads from:
//!
//! - **[`ProtoFile`]** - one schema file with its package alias and ownership
//! - **[`Declaration`]** - a borrowed service, enum or message plus its file
//! - **[`Graph::resolve_type`]** - protobuf name resolution relative to a
//!   declaration, including scalar recognition
//! - **[`load_graph`]** - builds a graph from `.proto` sources on disk
//!
//! Parsing and import resolution are delegated to [`protox`]; this module only
//! adapts its descriptors into the flat model the renderer consumes.
//!
//! ## Usage
//!
//! ```rust
//! use protodoc::graph::{Graph, Ownership, ProtoFile, EnumDecl};
//!
//! let mut file = ProtoFile::new("shop/color.proto", "shop", Ownership::Own);
//! file.enums.push(EnumDecl { name: "Color".into(), constants: vec![], comment: None });
//! let graph = Graph::new(vec![file]);
//! assert!(graph.lookup("shop.Color").is_some());
//! ```

mod error;
mod load;
mod resolve;
mod types;

#[cfg(test)]
mod tests;

pub use error::ResolveError;
pub use load::{load_graph, LoadOptions, OwnedRoot};
pub use types::*;

use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy)]
struct DeclLocator {
    file: usize,
    kind: DeclKind,
    item: usize,
}

/// Resolved set of schema files
#[derive(Debug, Clone)]
pub struct Graph {
    files: Vec<ProtoFile>,
    index: HashMap<String, DeclLocator>,
    ignore_not_found: bool,
}

impl Graph {
    /// Build a graph from files.
    ///
    /// Files are kept in ascending order of their logical path; when two files
    /// share a path the later one replaces the earlier one.
    pub fn new(files: Vec<ProtoFile>) -> Self {
        let by_path: BTreeMap<String, ProtoFile> = files
            .into_iter()
            .map(|file| (file.path.clone(), file))
            .collect();
        let files: Vec<ProtoFile> = by_path.into_values().collect();

        let mut index = HashMap::new();
        for (file_idx, file) in files.iter().enumerate() {
            let named = file
                .services
                .iter()
                .map(|s| (DeclKind::Service, s.name.as_str()))
                .enumerate()
                .chain(
                    file.enums
                        .iter()
                        .map(|e| (DeclKind::Enum, e.name.as_str()))
                        .enumerate(),
                )
                .chain(
                    file.messages
                        .iter()
                        .map(|m| (DeclKind::Message, m.name.as_str()))
                        .enumerate(),
                );
            for (item, (kind, name)) in named {
                index.insert(
                    file.qualify(name),
                    DeclLocator {
                        file: file_idx,
                        kind,
                        item,
                    },
                );
            }
        }

        Graph {
            files,
            index,
            ignore_not_found: false,
        }
    }

    /// Treat unresolvable type references as plain text instead of errors.
    pub fn with_ignore_not_found(mut self, ignore: bool) -> Self {
        self.ignore_not_found = ignore;
        self
    }

    pub fn ignore_not_found(&self) -> bool {
        self.ignore_not_found
    }

    /// All files, ascending by logical path
    pub fn files(&self) -> &[ProtoFile] {
        &self.files
    }

    pub fn file(&self, path: &str) -> Option<&ProtoFile> {
        self.files
            .binary_search_by(|f| f.path.as_str().cmp(path))
            .ok()
            .map(|idx| &self.files[idx])
    }

    /// Find a declaration by fully-qualified name (no leading dot).
    pub fn lookup(&self, full_name: &str) -> Option<Declaration<'_>> {
        let loc = self.index.get(full_name)?;
        let file = self.files.get(loc.file)?;
        let item = match loc.kind {
            DeclKind::Service => DeclItem::Service(file.services.get(loc.item)?),
            DeclKind::Enum => DeclItem::Enum(file.enums.get(loc.item)?),
            DeclKind::Message => DeclItem::Message(file.messages.get(loc.item)?),
        };
        Some(Declaration::new(file, item))
    }

    /// Every declaration of one kind, in file order then source order.
    pub fn declarations(&self, kind: DeclKind) -> impl Iterator<Item = Declaration<'_>> + '_ {
        self.files.iter().flat_map(move |file| file_declarations(file, kind))
    }
}

/// Declarations of one kind defined in a single file, in source order.
pub fn file_declarations(file: &ProtoFile, kind: DeclKind) -> Vec<Declaration<'_>> {
    match kind {
        DeclKind::Service => file
            .services
            .iter()
            .map(|s| Declaration::new(file, DeclItem::Service(s)))
            .collect(),
        DeclKind::Enum => file
            .enums
            .iter()
            .map(|e| Declaration::new(file, DeclItem::Enum(e)))
            .collect(),
        DeclKind::Message => file
            .messages
            .iter()
            .map(|m| Declaration::new(file, DeclItem::Message(m)))
            .collect(),
    }
}
