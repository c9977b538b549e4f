/// Whether a file belongs to the project being documented or was only pulled
/// in to resolve references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// File found under one of the owned source roots
    Own,
    /// File reached only through an `import` statement
    Imported,
}

/// Raw comment block attached to a declaration or member
///
/// Lines are kept verbatim (including leading whitespace and blank lines);
/// trimming is a rendering concern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    pub lines: Vec<String>,
}

impl Comment {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Comment {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a raw comment body on newlines.
    pub fn from_text(text: &str) -> Self {
        Comment::new(text.split('\n'))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// RPC method of a service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rpc {
    pub name: String,
    pub request_type: String,
    pub response_type: String,
    pub comment: Option<Comment>,
}

/// `service` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub rpcs: Vec<Rpc>,
    pub comment: Option<Comment>,
}

/// Enum constant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConstant {
    pub name: String,
    pub value: i32,
    pub comment: Option<Comment>,
}

/// `enum` declaration; `name` is scoped (`Outer.Kind` for nested enums)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    pub name: String,
    pub constants: Vec<EnumConstant>,
    pub comment: Option<Comment>,
}

/// `message` declaration; `name` is scoped (`Outer.Inner` for nested messages)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub name: String,
    pub fields: Vec<Field>,
    pub comment: Option<Comment>,
}

/// Scalar or message/enum typed field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainField {
    pub name: String,
    pub type_name: String,
    pub tag: i32,
    pub required: bool,
    pub repeated: bool,
    pub optional: bool,
    pub comment: Option<Comment>,
}

/// `map<K, V>` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapField {
    pub name: String,
    pub key_type: String,
    pub value_type: String,
    pub tag: i32,
    pub comment: Option<Comment>,
}

/// `oneof` group; nested fields may themselves be any variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneofField {
    pub name: String,
    pub fields: Vec<Field>,
    pub comment: Option<Comment>,
}

/// Message member
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Plain(PlainField),
    Map(MapField),
    Oneof(OneofField),
}

impl Field {
    pub fn name(&self) -> &str {
        match self {
            Field::Plain(f) => &f.name,
            Field::Map(f) => &f.name,
            Field::Oneof(f) => &f.name,
        }
    }

    pub fn comment(&self) -> Option<&Comment> {
        match self {
            Field::Plain(f) => f.comment.as_ref(),
            Field::Map(f) => f.comment.as_ref(),
            Field::Oneof(f) => f.comment.as_ref(),
        }
    }

    /// Tag number used for tag ordering. A oneof sorts by its first member,
    /// or 0 when it has none.
    pub fn first_tag(&self) -> i32 {
        match self {
            Field::Plain(f) => f.tag,
            Field::Map(f) => f.tag,
            Field::Oneof(f) => f.fields.first().map_or(0, Field::first_tag),
        }
    }
}

/// A parsed schema file as seen by the documentation generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoFile {
    /// Logical path (`prefix/dir/file.proto`), unique within a graph
    pub path: String,
    /// Package alias; empty for files without a `package` statement
    pub package: String,
    pub ownership: Ownership,
    pub services: Vec<Service>,
    pub enums: Vec<EnumDecl>,
    pub messages: Vec<Message>,
}

impl ProtoFile {
    pub fn new(path: impl Into<String>, package: impl Into<String>, ownership: Ownership) -> Self {
        ProtoFile {
            path: path.into(),
            package: package.into(),
            ownership,
            services: Vec::new(),
            enums: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn is_owned(&self) -> bool {
        self.ownership == Ownership::Own
    }

    /// Fully-qualified name of a declaration scoped inside this file.
    pub fn qualify(&self, scoped_name: &str) -> String {
        if self.package.is_empty() {
            scoped_name.to_string()
        } else {
            format!("{}.{}", self.package, scoped_name)
        }
    }
}

/// Declaration kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeclKind {
    Service,
    Enum,
    Message,
}

impl DeclKind {
    pub const ALL: [DeclKind; 3] = [DeclKind::Service, DeclKind::Enum, DeclKind::Message];

    /// Tag used in anchors and labels
    pub fn as_str(self) -> &'static str {
        match self {
            DeclKind::Service => "Service",
            DeclKind::Enum => "Enum",
            DeclKind::Message => "Message",
        }
    }

    /// Section heading
    pub fn title(self) -> &'static str {
        match self {
            DeclKind::Service => "Services",
            DeclKind::Enum => "Enums",
            DeclKind::Message => "Messages",
        }
    }
}

/// Borrowed view of one declaration
#[derive(Debug, Clone, Copy)]
pub enum DeclItem<'g> {
    Service(&'g Service),
    Enum(&'g EnumDecl),
    Message(&'g Message),
}

/// A declaration together with the file that defines it
#[derive(Debug, Clone, Copy)]
pub struct Declaration<'g> {
    pub file: &'g ProtoFile,
    pub item: DeclItem<'g>,
}

impl<'g> Declaration<'g> {
    pub fn new(file: &'g ProtoFile, item: DeclItem<'g>) -> Self {
        Declaration { file, item }
    }

    pub fn kind(&self) -> DeclKind {
        match self.item {
            DeclItem::Service(_) => DeclKind::Service,
            DeclItem::Enum(_) => DeclKind::Enum,
            DeclItem::Message(_) => DeclKind::Message,
        }
    }

    /// Scoped short name (no package)
    pub fn name(&self) -> &'g str {
        match self.item {
            DeclItem::Service(s) => &s.name,
            DeclItem::Enum(e) => &e.name,
            DeclItem::Message(m) => &m.name,
        }
    }

    /// Package alias of the defining file
    pub fn alias(&self) -> &'g str {
        &self.file.package
    }

    pub fn file_path(&self) -> &'g str {
        &self.file.path
    }

    pub fn full_name(&self) -> String {
        self.file.qualify(self.name())
    }

    pub fn is_owned(&self) -> bool {
        self.file.is_owned()
    }

    pub fn comment(&self) -> Option<&'g Comment> {
        match self.item {
            DeclItem::Service(s) => s.comment.as_ref(),
            DeclItem::Enum(e) => e.comment.as_ref(),
            DeclItem::Message(m) => m.comment.as_ref(),
        }
    }

    /// Two declarations come from the same file when their logical paths match.
    pub fn same_file(&self, other: &Declaration<'_>) -> bool {
        self.file.path == other.file.path
    }
}

/// Built-in protobuf scalar types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
}

impl ScalarType {
    pub fn parse(name: &str) -> Option<Self> {
        let scalar = match name {
            "double" => ScalarType::Double,
            "float" => ScalarType::Float,
            "int32" => ScalarType::Int32,
            "int64" => ScalarType::Int64,
            "uint32" => ScalarType::Uint32,
            "uint64" => ScalarType::Uint64,
            "sint32" => ScalarType::Sint32,
            "sint64" => ScalarType::Sint64,
            "fixed32" => ScalarType::Fixed32,
            "fixed64" => ScalarType::Fixed64,
            "sfixed32" => ScalarType::Sfixed32,
            "sfixed64" => ScalarType::Sfixed64,
            "bool" => ScalarType::Bool,
            "string" => ScalarType::String,
            "bytes" => ScalarType::Bytes,
            _ => return None,
        };
        Some(scalar)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::Double => "double",
            ScalarType::Float => "float",
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
            ScalarType::Uint32 => "uint32",
            ScalarType::Uint64 => "uint64",
            ScalarType::Sint32 => "sint32",
            ScalarType::Sint64 => "sint64",
            ScalarType::Fixed32 => "fixed32",
            ScalarType::Fixed64 => "fixed64",
            ScalarType::Sfixed32 => "sfixed32",
            ScalarType::Sfixed64 => "sfixed64",
            ScalarType::Bool => "bool",
            ScalarType::String => "string",
            ScalarType::Bytes => "bytes",
        }
    }
}

/// Result of resolving a type name
#[derive(Debug, Clone, Copy)]
pub enum ResolvedType<'g> {
    Scalar(ScalarType),
    Declared(Declaration<'g>),
}
