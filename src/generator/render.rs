use std::io::Write;

use tracing::{debug, info};

use super::anchors::{declaration_anchor, group_anchor, section_anchor};
use super::layout::Layout;
use super::{RenderError, RenderOptions};
use crate::catalog::{flatten_oneof_fields, list_declarations, DeclFilter, DepFilter, SortKey};
use crate::graph::{DeclItem, DeclKind, Declaration, Graph};

/// Renders a [`Graph`] into a single HTML page
///
/// Owned services, enums and messages are listed in that order, each grouped
/// by package alias and sorted by alias then name. The same grouping drives
/// both the navigation pane and the content pane.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: RenderOptions,
}

struct Section<'g> {
    kind: DeclKind,
    decls: Vec<Declaration<'g>>,
}

impl Generator {
    pub fn new(options: RenderOptions) -> Self {
        Generator { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Write the whole document to `w`.
    ///
    /// Stops at the first failed write or failed type lookup. Whatever was
    /// written before the failure is left in `w`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] for sink, lookup or template failures.
    pub fn generate<W: Write>(&self, graph: &Graph, w: W) -> Result<(), RenderError> {
        let filter = DeclFilter::new(SortKey::AliasThenName, DepFilter::OwnedOnly)
            .with_file_paths(self.options.file_paths.clone());

        let sections: Vec<Section<'_>> = DeclKind::ALL
            .iter()
            .map(|&kind| Section {
                kind,
                decls: list_declarations(graph, kind, &filter),
            })
            .collect();

        for section in &sections {
            info!(
                kind = section.kind.as_str(),
                count = section.decls.len(),
                "documenting declarations"
            );
        }

        let mut layout = Layout::new(w, graph, &self.options);
        layout.write_header()?;
        write_nav(&mut layout, &sections)?;
        write_content(&mut layout, &sections)?;
        layout.write_footer()?;

        layout.flush()
    }
}

fn write_nav<W: Write>(layout: &mut Layout<'_, W>, sections: &[Section<'_>]) -> Result<(), RenderError> {
    layout.begin_nav()?;
    for section in sections {
        let kind = section.kind;
        layout.nav_item(kind.title(), &section_anchor(kind))?;

        let mut current: Option<&str> = None;
        for decl in &section.decls {
            if current != Some(decl.alias()) {
                if current.is_some() {
                    layout.end_nav_ns()?;
                }
                layout.begin_nav_ns(decl.alias(), &group_anchor(kind, decl.alias()))?;
                current = Some(decl.alias());
            }
            let anchor = declaration_anchor(kind, decl.alias(), decl.name());
            layout.nav_ns_item(decl.name(), &anchor)?;
        }
        if current.is_some() {
            layout.end_nav_ns()?;
        }
    }
    layout.end_nav()
}

fn write_content<W: Write>(layout: &mut Layout<'_, W>, sections: &[Section<'_>]) -> Result<(), RenderError> {
    layout.begin_content()?;
    for section in sections {
        let kind = section.kind;
        layout.content_item(kind.title(), &section_anchor(kind))?;

        let mut current: Option<&str> = None;
        for decl in &section.decls {
            if current != Some(decl.alias()) {
                if current.is_some() {
                    layout.end_content_ns()?;
                }
                layout.begin_content_ns(decl.alias(), &group_anchor(kind, decl.alias()))?;
                current = Some(decl.alias());
            }

            debug!(declaration = %decl.full_name(), file = decl.file_path(), "rendering declaration");
            let anchor = declaration_anchor(kind, decl.alias(), decl.name());
            layout.content_ns_item(decl, &anchor)?;
            match decl.item {
                DeclItem::Service(service) => layout.service(decl, service)?,
                DeclItem::Enum(en) => layout.enumeration(en)?,
                DeclItem::Message(message) => {
                    layout.message(decl, message)?;
                    layout.oneofs(decl, &flatten_oneof_fields(&message.fields))?;
                }
            }
        }
        if current.is_some() {
            layout.end_content_ns()?;
        }
    }
    layout.end_content()
}
