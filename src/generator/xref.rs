use tracing::debug;

use super::anchors::{oneof_anchor, type_anchor};
use super::layout::escape_html;
use crate::graph::{Declaration, Graph, OneofField, ResolveError, ResolvedType};

/// How a referenced type is shown in a table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Text shown to the reader, not yet escaped
    pub display: String,
    /// Anchor to jump to, if the target has a block in this document
    pub link: Option<String>,
}

impl TypeRef {
    pub fn plain(display: impl Into<String>) -> Self {
        TypeRef {
            display: display.into(),
            link: None,
        }
    }

    /// Escaped display text, wrapped in a link when there is one.
    pub fn to_html(&self) -> String {
        let text = escape_html(&self.display);
        match &self.link {
            Some(link) => format!(r##"<a href="#{}">{}</a>"##, link, text),
            None => text,
        }
    }
}

/// Resolve `type_name` as referenced from `context`.
///
/// A declaration in the same file is shown by its scoped name, anything else
/// by its fully-qualified name. Only non-scalar declarations from owned files
/// are linked; an unresolved name is shown verbatim.
///
/// # Errors
///
/// Propagates the graph's lookup failure.
pub fn resolve_type_ref(
    graph: &Graph,
    context: &Declaration<'_>,
    type_name: &str,
) -> Result<TypeRef, ResolveError> {
    let resolved = graph.resolve_type(context, type_name)?;
    let type_ref = match resolved {
        None => {
            debug!(type_name, context = %context.full_name(), "unresolved type reference");
            TypeRef::plain(type_name)
        }
        Some(ResolvedType::Scalar(scalar)) => TypeRef::plain(scalar.as_str()),
        Some(ResolvedType::Declared(target)) => {
            let display = if target.same_file(context) {
                target.name().to_string()
            } else {
                target.full_name()
            };
            let link = target.is_owned().then(|| type_anchor(&target));
            TypeRef { display, link }
        }
    };
    Ok(type_ref)
}

/// Pseudo-type shown for a oneof member row: `oneof (a, b)`, linked to the
/// oneof's own sub-block.
pub fn oneof_type_ref(context: &Declaration<'_>, oneof: &OneofField) -> TypeRef {
    let mut display = String::from("oneof ");
    if !oneof.fields.is_empty() {
        let names: Vec<&str> = oneof.fields.iter().map(|f| f.name()).collect();
        display.push('(');
        display.push_str(&names.join(", "));
        display.push(')');
    }
    TypeRef {
        display,
        link: Some(oneof_anchor(&context.full_name(), &oneof.name)),
    }
}
