//! Graph construction from `.proto` sources
//!
//! Parsing, import resolution and name checking are done by `protox`; this
//! file only decides which files are owned, wires up search paths and turns
//! the resulting descriptors into [`ProtoFile`]s.
//!
//! Two modes:
//!
//! - **strict**: the `protox` compiler checks every file, so a missing import
//!   or an undefined type name fails the load. Type names come back fully
//!   qualified (`.pkg.Name`).
//! - **tolerant**: every file is parsed on its own and imports are followed
//!   through the same search paths. Imports found nowhere are skipped and type
//!   names keep their written form; [`Graph::resolve_type`] does the scoping
//!   and leaves unknown names unlinked.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    ServiceDescriptorProto,
};
use protox::file::{ChainFileResolver, File, FileResolver, GoogleFileResolver, IncludeFileResolver};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::{
    Comment, EnumConstant, EnumDecl, Field, Graph, MapField, Message, OneofField, Ownership,
    PlainField, ProtoFile, Rpc, ScalarType, Service,
};

// Field numbers inside descriptor.proto, used to address SourceCodeInfo paths.
const FILE_MESSAGE_TYPE: i32 = 4;
const FILE_ENUM_TYPE: i32 = 5;
const FILE_SERVICE: i32 = 6;
const MESSAGE_FIELD: i32 = 2;
const MESSAGE_NESTED_TYPE: i32 = 3;
const MESSAGE_ENUM_TYPE: i32 = 4;
const MESSAGE_ONEOF_DECL: i32 = 8;
const ENUM_VALUE: i32 = 2;
const SERVICE_METHOD: i32 = 2;

/// Source directory whose files are documented
///
/// Files below `dir` get the logical name `prefix/<relative path>`, or just the
/// relative path when `prefix` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedRoot {
    pub dir: PathBuf,
    pub prefix: String,
}

impl OwnedRoot {
    /// Parse the `path[;prefix]` command-line form.
    pub fn parse(spec: &str) -> Self {
        let (dir, prefix) = match spec.split_once(';') {
            Some((dir, prefix)) => (dir, prefix),
            None => (spec, ""),
        };
        OwnedRoot {
            dir: PathBuf::from(dir),
            prefix: prefix.trim_matches('/').to_string(),
        }
    }

    /// Logical name of a file below this root.
    pub fn logical_name(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.dir).ok()?;
        let rel = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        if rel.is_empty() {
            return None;
        }
        if self.prefix.is_empty() {
            Some(rel)
        } else {
            Some(format!("{}/{}", self.prefix, rel))
        }
    }

    fn relative_name<'a>(&self, name: &'a str) -> Option<&'a str> {
        if self.prefix.is_empty() {
            Some(name)
        } else {
            name.strip_prefix(self.prefix.as_str())?.strip_prefix('/')
        }
    }
}

/// Inputs for [`load_graph`]
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Directories searched for imports only
    pub include_dirs: Vec<PathBuf>,
    /// Directories whose `.proto` files are documented
    pub owned_roots: Vec<OwnedRoot>,
    /// Skip imports that exist nowhere and render unresolved references as
    /// plain text
    pub ignore_missing_imports: bool,
}

/// Compile every `.proto` file under the owned roots and build a [`Graph`].
///
/// # Errors
///
/// Returns an error if an owned root is not a directory, cannot be walked, or
/// if `protox` rejects any file (syntax errors, unresolved names, missing
/// imports when they are not tolerated).
pub fn load_graph(options: &LoadOptions) -> anyhow::Result<Graph> {
    let mut owned_paths = Vec::new();
    let mut owned_names = BTreeSet::new();

    for root in &options.owned_roots {
        let meta = std::fs::metadata(&root.dir)
            .with_context(|| format!("Error reading proto_path {:?}", root.dir))?;
        if !meta.is_dir() {
            bail!("proto_path isn't a directory: {}", root.dir.display());
        }

        for entry in WalkDir::new(&root.dir).sort_by_file_name() {
            let entry =
                entry.with_context(|| format!("Error walking proto_path {:?}", root.dir))?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some("proto")
            {
                continue;
            }
            if let Some(name) = root.logical_name(path) {
                debug!(file = %name, path = %path.display(), "found owned proto file");
                owned_names.insert(name);
                owned_paths.push(path.to_path_buf());
            }
        }
    }

    let mut chain = ChainFileResolver::new();
    for root in &options.owned_roots {
        chain.add(RootedFileResolver { root: root.clone() });
    }
    for dir in &options.include_dirs {
        chain.add(IncludeFileResolver::new(dir.clone()));
    }
    chain.add(GoogleFileResolver::new());

    let descriptors = if options.ignore_missing_imports {
        parse_tolerant(&chain, &owned_names)?
    } else {
        compile_strict(chain, &owned_paths)?
    };

    let files: Vec<ProtoFile> = descriptors
        .iter()
        .map(|fd| {
            let ownership = if owned_names.contains(fd.name()) {
                Ownership::Own
            } else {
                Ownership::Imported
            };
            convert_file(fd, ownership)
        })
        .collect();

    let owned = files.iter().filter(|f| f.is_owned()).count();
    info!(
        owned,
        imported = files.len() - owned,
        "loaded dependency graph"
    );

    Ok(Graph::new(files).with_ignore_not_found(options.ignore_missing_imports))
}

/// Serves files below an owned root under their prefixed logical names.
struct RootedFileResolver {
    root: OwnedRoot,
}

impl FileResolver for RootedFileResolver {
    fn resolve_path(&self, path: &Path) -> Option<String> {
        self.root.logical_name(path)
    }

    fn open_file(&self, name: &str) -> Result<File, protox::Error> {
        let Some(rel) = self.root.relative_name(name) else {
            return Err(protox::Error::file_not_found(name));
        };
        let path = self.root.dir.join(rel);
        if path.is_file() {
            File::open(name, &path)
        } else {
            Err(protox::Error::file_not_found(name))
        }
    }
}

fn compile_strict(
    resolver: ChainFileResolver,
    owned_paths: &[PathBuf],
) -> anyhow::Result<Vec<FileDescriptorProto>> {
    let mut compiler = protox::Compiler::with_file_resolver(resolver);
    compiler.include_imports(true).include_source_info(true);
    compiler
        .open_files(owned_paths)
        .context("Error adding proto files to the dependency graph")?;
    Ok(compiler.file_descriptor_set().file)
}

/// Parse the owned files and everything they import, breadth first, without
/// cross-file name checking.
fn parse_tolerant(
    resolver: &ChainFileResolver,
    owned_names: &BTreeSet<String>,
) -> anyhow::Result<Vec<FileDescriptorProto>> {
    let mut seen = owned_names.clone();
    let mut pending: VecDeque<String> = owned_names.iter().cloned().collect();
    let mut descriptors = Vec::new();

    while let Some(name) = pending.pop_front() {
        let file = match resolver.open_file(&name) {
            Ok(file) => file,
            Err(err) if err.is_file_not_found() => {
                warn!(import = %name, "import not found, references into it stay unlinked");
                continue;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Error parsing proto file {}", name));
            }
        };

        let descriptor = file.file_descriptor_proto().clone();
        for dep in &descriptor.dependency {
            if seen.insert(dep.clone()) {
                pending.push_back(dep.clone());
            }
        }
        descriptors.push(descriptor);
    }

    Ok(descriptors)
}

fn convert_file(fd: &FileDescriptorProto, ownership: Ownership) -> ProtoFile {
    let comments = collect_comments(fd);
    let proto3 = matches!(fd.syntax(), "proto3" | "editions");
    let mut file = ProtoFile::new(fd.name(), fd.package(), ownership);

    let converter = Converter {
        comments: &comments,
        proto3,
    };

    for (idx, service) in fd.service.iter().enumerate() {
        let path = vec![FILE_SERVICE, idx as i32];
        file.services.push(converter.service(service, &path));
    }
    for (idx, en) in fd.enum_type.iter().enumerate() {
        let path = vec![FILE_ENUM_TYPE, idx as i32];
        file.enums.push(converter.enumeration(en, None, &path));
    }
    for (idx, msg) in fd.message_type.iter().enumerate() {
        let path = vec![FILE_MESSAGE_TYPE, idx as i32];
        converter.message(msg, None, &path, &mut file);
    }

    file
}

fn collect_comments(fd: &FileDescriptorProto) -> HashMap<Vec<i32>, Comment> {
    let mut comments = HashMap::new();
    let Some(info) = fd.source_code_info.as_ref() else {
        return comments;
    };
    for location in &info.location {
        let text = location
            .leading_comments
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .or_else(|| {
                location
                    .trailing_comments
                    .as_deref()
                    .filter(|c| !c.trim().is_empty())
            });
        if let Some(text) = text {
            comments
                .entry(location.path.clone())
                .or_insert_with(|| Comment::from_text(text));
        }
    }
    comments
}

struct Converter<'a> {
    comments: &'a HashMap<Vec<i32>, Comment>,
    proto3: bool,
}

impl Converter<'_> {
    fn comment(&self, path: &[i32]) -> Option<Comment> {
        self.comments.get(path).cloned()
    }

    fn service(&self, service: &ServiceDescriptorProto, path: &[i32]) -> Service {
        let rpcs = service
            .method
            .iter()
            .enumerate()
            .map(|(idx, method)| Rpc {
                name: method.name().to_string(),
                request_type: method.input_type().to_string(),
                response_type: method.output_type().to_string(),
                comment: self.comment(&child_path(path, SERVICE_METHOD, idx)),
            })
            .collect();
        Service {
            name: service.name().to_string(),
            rpcs,
            comment: self.comment(path),
        }
    }

    fn enumeration(&self, en: &EnumDescriptorProto, scope: Option<&str>, path: &[i32]) -> EnumDecl {
        let constants = en
            .value
            .iter()
            .enumerate()
            .map(|(idx, value)| EnumConstant {
                name: value.name().to_string(),
                value: value.number(),
                comment: self.comment(&child_path(path, ENUM_VALUE, idx)),
            })
            .collect();
        EnumDecl {
            name: scoped(scope, en.name()),
            constants,
            comment: self.comment(path),
        }
    }

    fn message(&self, msg: &DescriptorProto, scope: Option<&str>, path: &[i32], file: &mut ProtoFile) {
        let name = scoped(scope, msg.name());

        let map_entries: HashMap<&str, &DescriptorProto> = msg
            .nested_type
            .iter()
            .filter(|nested| nested.options.as_ref().is_some_and(|o| o.map_entry()))
            .map(|nested| (nested.name(), nested))
            .collect();

        let mut fields = Vec::new();
        let mut emitted_oneofs = BTreeSet::new();
        for (idx, field) in msg.field.iter().enumerate() {
            let field_path = child_path(path, MESSAGE_FIELD, idx);
            match real_oneof_index(field) {
                Some(oneof_idx) => {
                    if !emitted_oneofs.insert(oneof_idx) {
                        continue;
                    }
                    let members = msg
                        .field
                        .iter()
                        .enumerate()
                        .filter(|(_, f)| real_oneof_index(f) == Some(oneof_idx))
                        .map(|(member_idx, f)| {
                            self.field(f, &child_path(path, MESSAGE_FIELD, member_idx), &map_entries, true)
                        })
                        .collect();
                    let oneof_name = msg
                        .oneof_decl
                        .get(oneof_idx)
                        .map(|o| o.name().to_string())
                        .unwrap_or_default();
                    fields.push(Field::Oneof(OneofField {
                        name: oneof_name,
                        fields: members,
                        comment: self.comment(&child_path(path, MESSAGE_ONEOF_DECL, oneof_idx)),
                    }));
                }
                None => fields.push(self.field(field, &field_path, &map_entries, false)),
            }
        }

        file.messages.push(Message {
            name: name.clone(),
            fields,
            comment: self.comment(path),
        });

        for (idx, en) in msg.enum_type.iter().enumerate() {
            let en_path = child_path(path, MESSAGE_ENUM_TYPE, idx);
            file.enums.push(self.enumeration(en, Some(&name), &en_path));
        }
        for (idx, nested) in msg.nested_type.iter().enumerate() {
            if map_entries.contains_key(nested.name()) {
                continue;
            }
            let nested_path = child_path(path, MESSAGE_NESTED_TYPE, idx);
            self.message(nested, Some(&name), &nested_path, file);
        }
    }

    fn field(
        &self,
        field: &FieldDescriptorProto,
        path: &[i32],
        map_entries: &HashMap<&str, &DescriptorProto>,
        in_oneof: bool,
    ) -> Field {
        let comment = self.comment(path);
        let label = field.label();

        if label == Label::Repeated && field.r#type() == Type::Message {
            let entry_name = field.type_name().rsplit('.').next().unwrap_or_default();
            if let Some(entry) = map_entries.get(entry_name) {
                let key_type = entry.field.first().map(field_type_name).unwrap_or_default();
                let value_type = entry.field.get(1).map(field_type_name).unwrap_or_default();
                return Field::Map(MapField {
                    name: field.name().to_string(),
                    key_type,
                    value_type,
                    tag: field.number(),
                    comment,
                });
            }
        }

        let optional = field.proto3_optional()
            || (label == Label::Optional && !self.proto3 && !in_oneof);
        Field::Plain(PlainField {
            name: field.name().to_string(),
            type_name: field_type_name(field),
            tag: field.number(),
            required: label == Label::Required,
            repeated: label == Label::Repeated,
            optional,
            comment,
        })
    }
}

/// Oneof index of a field, ignoring the synthetic oneofs proto3 generates for
/// `optional` fields.
fn real_oneof_index(field: &FieldDescriptorProto) -> Option<usize> {
    if field.proto3_optional() {
        return None;
    }
    field.oneof_index.and_then(|idx| usize::try_from(idx).ok())
}

/// Type name as written in descriptors: a scalar keyword, or a type reference
/// that is fully qualified (`.package.Name`) only after strict compilation.
fn field_type_name(field: &FieldDescriptorProto) -> String {
    let scalar = match field.r#type() {
        Type::Double => Some(ScalarType::Double),
        Type::Float => Some(ScalarType::Float),
        Type::Int64 => Some(ScalarType::Int64),
        Type::Uint64 => Some(ScalarType::Uint64),
        Type::Int32 => Some(ScalarType::Int32),
        Type::Fixed64 => Some(ScalarType::Fixed64),
        Type::Fixed32 => Some(ScalarType::Fixed32),
        Type::Bool => Some(ScalarType::Bool),
        Type::String => Some(ScalarType::String),
        Type::Bytes => Some(ScalarType::Bytes),
        Type::Uint32 => Some(ScalarType::Uint32),
        Type::Sfixed32 => Some(ScalarType::Sfixed32),
        Type::Sfixed64 => Some(ScalarType::Sfixed64),
        Type::Sint32 => Some(ScalarType::Sint32),
        Type::Sint64 => Some(ScalarType::Sint64),
        Type::Group | Type::Message | Type::Enum => None,
    };
    match scalar {
        Some(scalar) if field.type_name().is_empty() => scalar.as_str().to_string(),
        _ => field.type_name().to_string(),
    }
}

fn scoped(scope: Option<&str>, name: &str) -> String {
    match scope {
        Some(scope) => format!("{scope}.{name}"),
        None => name.to_string(),
    }
}

fn child_path(parent: &[i32], field_number: i32, idx: usize) -> Vec<i32> {
    let mut path = parent.to_vec();
    path.push(field_number);
    path.push(idx as i32);
    path
}
