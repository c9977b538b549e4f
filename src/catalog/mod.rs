//! # Declaration Catalog
//!
//! Ordered, filtered views over a [`Graph`](crate::graph::Graph).
//!
//! Everything the renderer iterates comes from here: declaration lists per
//! kind, the oneof sub-blocks of a message, and the sorted field, method, file
//! and package listings.
//!
//! ## Ordering and collapse
//!
//! With [`SortKey::None`] declarations are returned in file order (ascending
//! logical path) and then source order. Any other sort key builds a composite
//! key per declaration and returns one declaration per distinct key in
//! ascending key order. When two declarations produce the same key, the one
//! seen last wins and the other is dropped:
//!
//! ```rust
//! use protodoc::catalog::{list_declarations, DeclFilter, SortKey};
//! use protodoc::graph::{DeclKind, EnumDecl, Graph, Ownership, ProtoFile};
//!
//! let color = || EnumDecl { name: "Color".into(), constants: vec![], comment: None };
//! let mut a = ProtoFile::new("a.proto", "shop", Ownership::Own);
//! a.enums.push(color());
//! let mut b = ProtoFile::new("b.proto", "shop", Ownership::Own);
//! b.enums.push(color());
//! let graph = Graph::new(vec![a, b]);
//!
//! let filter = DeclFilter::new(SortKey::AliasThenName, Default::default());
//! let decls = list_declarations(&graph, DeclKind::Enum, &filter);
//! assert_eq!(decls.len(), 1);
//! assert_eq!(decls[0].file_path(), "b.proto");
//! ```


use std::collections::{BTreeMap, BTreeSet};

use crate::graph::{file_declarations, DeclKind, Declaration, Field, Graph, OneofField, ProtoFile, Rpc};

/// Ordering applied by [`list_declarations`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// File order, then source order; nothing is collapsed
    #[default]
    None,
    /// Package alias, then scoped name
    AliasThenName,
    /// Scoped name only
    Name,
    /// Logical file path, then package alias, then scoped name
    FilepathThenAliasThenName,
}

/// Which files contribute to a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepFilter {
    #[default]
    All,
    OwnedOnly,
    ImportedOnly,
}

impl DepFilter {
    pub fn matches(self, file: &ProtoFile) -> bool {
        match self {
            DepFilter::All => true,
            DepFilter::OwnedOnly => file.is_owned(),
            DepFilter::ImportedOnly => !file.is_owned(),
        }
    }
}

/// Selection and ordering for [`list_declarations`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclFilter {
    pub sort: SortKey,
    pub deps: DepFilter,
    /// When non-empty, only files with exactly these logical paths contribute
    pub file_paths: Vec<String>,
}

impl DeclFilter {
    pub fn new(sort: SortKey, deps: DepFilter) -> Self {
        DeclFilter {
            sort,
            deps,
            file_paths: Vec::new(),
        }
    }

    pub fn with_file_paths(mut self, file_paths: Vec<String>) -> Self {
        self.file_paths = file_paths;
        self
    }

    fn includes(&self, file: &ProtoFile) -> bool {
        self.deps.matches(file)
            && (self.file_paths.is_empty() || self.file_paths.iter().any(|p| *p == file.path))
    }
}

/// Composite ordering key. Tuple comparison keeps names containing separator
/// characters from colliding with unrelated keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum CompositeKey<'g> {
    AliasName(&'g str, &'g str),
    Name(&'g str),
    PathAliasName(&'g str, &'g str, &'g str),
}

impl<'g> CompositeKey<'g> {
    fn of(sort: SortKey, decl: &Declaration<'g>) -> Option<Self> {
        match sort {
            SortKey::None => None,
            SortKey::AliasThenName => Some(CompositeKey::AliasName(decl.alias(), decl.name())),
            SortKey::Name => Some(CompositeKey::Name(decl.name())),
            SortKey::FilepathThenAliasThenName => Some(CompositeKey::PathAliasName(
                decl.file_path(),
                decl.alias(),
                decl.name(),
            )),
        }
    }
}

/// List the declarations of one kind selected by `filter`.
pub fn list_declarations<'g>(
    graph: &'g Graph,
    kind: DeclKind,
    filter: &DeclFilter,
) -> Vec<Declaration<'g>> {
    let candidates = graph
        .files()
        .iter()
        .filter(|file| filter.includes(file))
        .flat_map(|file| file_declarations(file, kind));

    if filter.sort == SortKey::None {
        return candidates.collect();
    }

    let mut collect: BTreeMap<CompositeKey<'g>, Declaration<'g>> = BTreeMap::new();
    for decl in candidates {
        if let Some(key) = CompositeKey::of(filter.sort, &decl) {
            collect.insert(key, decl);
        }
    }
    collect.into_values().collect()
}

/// Every oneof reachable from `fields`, parent before its nested oneofs.
pub fn flatten_oneof_fields(fields: &[Field]) -> Vec<&OneofField> {
    let mut out = Vec::new();
    collect_oneofs(fields, &mut out);
    out
}

fn collect_oneofs<'f>(fields: &'f [Field], out: &mut Vec<&'f OneofField>) {
    for field in fields {
        if let Field::Oneof(oneof) = field {
            out.push(oneof);
            collect_oneofs(&oneof.fields, out);
        }
    }
}

/// Fields ordered by name; a later field with a repeated name replaces the earlier one.
pub fn sorted_fields_by_name(fields: &[Field]) -> Vec<&Field> {
    let collect: BTreeMap<&str, &Field> = fields.iter().map(|f| (f.name(), f)).collect();
    collect.into_values().collect()
}

/// Fields ordered by tag number. Oneofs use the tag of their first member.
pub fn sorted_fields_by_tag(fields: &[Field]) -> Vec<&Field> {
    let collect: BTreeMap<i32, &Field> = fields.iter().map(|f| (f.first_tag(), f)).collect();
    collect.into_values().collect()
}

pub fn sorted_rpcs_by_name(rpcs: &[Rpc]) -> Vec<&Rpc> {
    let collect: BTreeMap<&str, &Rpc> = rpcs.iter().map(|r| (r.name.as_str(), r)).collect();
    collect.into_values().collect()
}

/// Logical paths of the files matching `deps`, ascending.
pub fn sorted_file_paths(graph: &Graph, deps: DepFilter) -> Vec<&str> {
    // Graph::files is already ordered by path
    graph
        .files()
        .iter()
        .filter(|f| deps.matches(f))
        .map(|f| f.path.as_str())
        .collect()
}

/// Package aliases with at least one file matching `deps`, ascending.
pub fn sorted_packages(graph: &Graph, deps: DepFilter) -> Vec<&str> {
    graph
        .files()
        .iter()
        .filter(|f| deps.matches(f))
        .map(|f| f.package.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
