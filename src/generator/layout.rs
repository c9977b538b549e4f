//! Streaming HTML writer
//!
//! Each method writes one fragment and returns a `Result`; the caller stops at
//! the first failure with `?`. Nothing is buffered here beyond what the
//! underlying writer buffers.

use std::io::Write;

use askama::filters::{escape, Html};
use askama::Template;

use super::anchors::oneof_anchor;
use super::options::{FieldOrder, MethodOrder, RenderOptions};
use super::templates::{ContentBeginTemplate, NavBeginTemplate, PageFooterTemplate, PageHeaderTemplate};
use super::xref::{oneof_type_ref, resolve_type_ref};
use super::RenderError;
use crate::catalog::{sorted_fields_by_name, sorted_fields_by_tag, sorted_rpcs_by_name};
use crate::graph::{
    Comment, Declaration, EnumDecl, Field, Graph, Message, OneofField, Rpc, Service,
};

const NAV_END: &str = "\n        </div>\n    </div>\n";
const CONTENT_END: &str = "\n    </div>\n";
const GROUP_BEGIN: &str = "\n        <section class=\"ns-group\">";
const GROUP_END: &str = "\n        </section>";

/// Shown in place of an empty package alias
const DEFAULT_ALIAS_LABEL: &str = "(default package)";

pub struct Layout<'o, W: Write> {
    w: W,
    graph: &'o Graph,
    options: &'o RenderOptions,
}

impl<'o, W: Write> Layout<'o, W> {
    pub fn new(w: W, graph: &'o Graph, options: &'o RenderOptions) -> Self {
        Layout { w, graph, options }
    }

    pub fn flush(&mut self) -> Result<(), RenderError> {
        self.w.flush()?;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<(), RenderError> {
        self.w.write_all(s.as_bytes())?;
        Ok(())
    }

    fn write_template(&mut self, template: &impl Template) -> Result<(), RenderError> {
        let rendered = template.render()?;
        self.write_str(&rendered)
    }

    pub fn write_header(&mut self) -> Result<(), RenderError> {
        let title = self.options.title.as_str();
        self.write_template(&PageHeaderTemplate { title })
    }

    pub fn write_footer(&mut self) -> Result<(), RenderError> {
        self.write_template(&PageFooterTemplate)
    }

    // Navigation pane

    pub fn begin_nav(&mut self) -> Result<(), RenderError> {
        self.write_template(&NavBeginTemplate)
    }

    pub fn end_nav(&mut self) -> Result<(), RenderError> {
        self.write_str(NAV_END)
    }

    pub fn nav_item(&mut self, title: &str, link: &str) -> Result<(), RenderError> {
        let html = format!(
            "\n        <div class=\"item\">\n            <a href=\"#{}\">{}</a>\n        </div>",
            link,
            escape_html(title)
        );
        self.write_str(&html)
    }

    pub fn begin_nav_ns(&mut self, alias: &str, link: &str) -> Result<(), RenderError> {
        self.write_str(GROUP_BEGIN)?;
        let html = format!(
            "\n        <div class=\"ns\">\n            <a href=\"#{}\">{}</a>\n        </div>",
            link,
            escape_html(alias_label(alias))
        );
        self.write_str(&html)
    }

    pub fn end_nav_ns(&mut self) -> Result<(), RenderError> {
        self.write_str(GROUP_END)
    }

    pub fn nav_ns_item(&mut self, name: &str, link: &str) -> Result<(), RenderError> {
        let html = format!(
            "\n        <div class=\"ns-item\">\n            <a href=\"#{}\">{}</a>\n        </div>",
            link,
            escape_html(name)
        );
        self.write_str(&html)
    }

    // Content pane

    pub fn begin_content(&mut self) -> Result<(), RenderError> {
        let title = self.options.title.as_str();
        self.write_template(&ContentBeginTemplate { title })
    }

    pub fn end_content(&mut self) -> Result<(), RenderError> {
        self.write_str(CONTENT_END)
    }

    pub fn content_item(&mut self, title: &str, anchor: &str) -> Result<(), RenderError> {
        let html = format!(
            "\n        <div class=\"item\">\n            <a name=\"{}\">{}</a>\n        </div>",
            anchor,
            escape_html(title)
        );
        self.write_str(&html)
    }

    pub fn begin_content_ns(&mut self, alias: &str, anchor: &str) -> Result<(), RenderError> {
        self.write_str(GROUP_BEGIN)?;
        let html = format!(
            "\n        <div class=\"ns\">\n            <a name=\"{}\">{}</a>\n        </div>",
            anchor,
            escape_html(alias_label(alias))
        );
        self.write_str(&html)
    }

    pub fn end_content_ns(&mut self) -> Result<(), RenderError> {
        self.write_str(GROUP_END)
    }

    /// Heading of one declaration block, with its package and file.
    pub fn content_ns_item(&mut self, decl: &Declaration<'_>, anchor: &str) -> Result<(), RenderError> {
        let mut html = format!(
            "\n        <div class=\"ns-item\">\n            <a name=\"{}\">{}</a>",
            anchor,
            escape_html(decl.name())
        );
        if !decl.alias().is_empty() {
            html.push_str(&format!("<span class=\"pkg\">[{}]</span>", escape_html(decl.alias())));
        }
        if !decl.file_path().is_empty() {
            html.push_str(&format!(
                "<span class=\"filename\">[{}]</span>",
                escape_html(decl.file_path())
            ));
        }
        html.push_str("\n        </div>");
        self.write_str(&html)
    }

    fn description(&mut self, comment: Option<&Comment>) -> Result<(), RenderError> {
        let text = render_comment(comment);
        if text.is_empty() {
            return Ok(());
        }
        self.write_str(&format!("<div class=\"description\"><p>{}</p></div>", text))
    }

    pub fn service(&mut self, decl: &Declaration<'_>, service: &Service) -> Result<(), RenderError> {
        self.write_str("<div class=\"definition service\">")?;
        self.description(service.comment.as_ref())?;
        self.write_str(
            "<div class=\"list\">\n\t\t<table>\n\t\t\t<tr>\n\t\t\t\t\
             <th>Method name</th><th>Request Type</th><th>Response Type</th><th>Description</th>\n\t\t\t</tr>",
        )?;

        let rpcs: Vec<&Rpc> = match self.options.method_order {
            MethodOrder::Source => service.rpcs.iter().collect(),
            MethodOrder::Name => sorted_rpcs_by_name(&service.rpcs),
        };
        for rpc in rpcs {
            let request = resolve_type_ref(self.graph, decl, &rpc.request_type)?;
            let response = resolve_type_ref(self.graph, decl, &rpc.response_type)?;
            let row = format!(
                "\n\t\t<tr>\n\
                 \t\t\t<td class=\"fld-svc-method\">{}</td>\n\
                 \t\t\t<td class=\"fld-svc-req\">{}</td>\n\
                 \t\t\t<td class=\"fld-svc-ret\">{}</td>\n\
                 \t\t\t<td class=\"fld-svc-doc\">{}</td>\n\
                 \t\t</tr>",
                escape_html(&rpc.name),
                request.to_html(),
                response.to_html(),
                render_comment(rpc.comment.as_ref()),
            );
            self.write_str(&row)?;
        }

        self.write_str("</table>\n\t</div>\n\t</div>")
    }

    pub fn enumeration(&mut self, en: &EnumDecl) -> Result<(), RenderError> {
        self.write_str("<div class=\"definition enum\">")?;
        self.description(en.comment.as_ref())?;
        self.write_str(
            "<div class=\"list\">\n\t\t<table>\n\t\t\t<tr>\n\t\t\t\t\
             <th>Name</th><th>Value</th><th>Description</th>\n\t\t\t</tr>",
        )?;

        for constant in &en.constants {
            let row = format!(
                "\n\t\t<tr>\n\
                 \t\t\t<td class=\"fld-enum-name\">{}</td>\n\
                 \t\t\t<td class=\"fld-enum-value\">{}</td>\n\
                 \t\t\t<td class=\"fld-enum-doc\">{}</td>\n\
                 \t\t</tr>",
                escape_html(&constant.name),
                constant.value,
                render_comment(constant.comment.as_ref()),
            );
            self.write_str(&row)?;
        }

        self.write_str("</table>\n\t</div>\n\t</div>")
    }

    pub fn message(&mut self, decl: &Declaration<'_>, message: &Message) -> Result<(), RenderError> {
        self.write_str("<div class=\"definition message\">")?;
        self.description(message.comment.as_ref())?;
        self.fields(decl, &message.fields, None)?;
        self.write_str("</div>")
    }

    /// One sub-block per oneof, in the order given.
    pub fn oneofs(&mut self, decl: &Declaration<'_>, oneofs: &[&OneofField]) -> Result<(), RenderError> {
        let full_name = decl.full_name();
        for oneof in oneofs {
            let heading = format!(
                "<div class=\"ns-itemsub\">\n\t\t\t\t<a name=\"{}\">Oneof {}.{}</a>\n\t\t\t</div>",
                oneof_anchor(&full_name, &oneof.name),
                escape_html(decl.name()),
                escape_html(&oneof.name),
            );
            self.write_str(&heading)?;
            self.write_str("<div class=\"definition oneof\">")?;
            self.description(oneof.comment.as_ref())?;
            self.fields(decl, &oneof.fields, Some("oneof"))?;
            self.write_str("</div>")?;
        }
        Ok(())
    }

    fn fields(
        &mut self,
        decl: &Declaration<'_>,
        fields: &[Field],
        table_class: Option<&str>,
    ) -> Result<(), RenderError> {
        let class_attr = table_class
            .map(|c| format!(" class=\"{}\"", c))
            .unwrap_or_default();
        self.write_str(&format!(
            "<div class=\"list\">\n\t\t<table{}>\n\t\t\t<tr>\n\t\t\t\t\
             <th>Fieldname</th><th>Type</th><th>Flags</th><th>Description</th>\n\t\t\t</tr>",
            class_attr
        ))?;

        let ordered: Vec<&Field> = match self.options.field_order {
            FieldOrder::Source => fields.iter().collect(),
            FieldOrder::Name => sorted_fields_by_name(fields),
            FieldOrder::Tag => sorted_fields_by_tag(fields),
        };

        for field in ordered {
            let (type_html, flags) = match field {
                Field::Plain(plain) => {
                    let mut type_ref = resolve_type_ref(self.graph, decl, &plain.type_name)?;
                    let mut flags = Vec::new();
                    if plain.required {
                        flags.push("required");
                    }
                    if plain.repeated {
                        type_ref.display.push_str("[]");
                        flags.push("repeated");
                    }
                    if plain.optional {
                        flags.push("optional");
                    }
                    (type_ref.to_html(), flags.join(","))
                }
                Field::Map(map) => {
                    let key = resolve_type_ref(self.graph, decl, &map.key_type)?;
                    let value = resolve_type_ref(self.graph, decl, &map.value_type)?;
                    (
                        format!("map&#60;{}, {}&#62;", key.to_html(), value.to_html()),
                        String::new(),
                    )
                }
                Field::Oneof(oneof) => (oneof_type_ref(decl, oneof).to_html(), String::new()),
            };

            let row = format!(
                "\n\t\t\t<tr>\n\
                 \t\t\t\t<td class=\"fld-msg-fieldname\">{}</td>\n\
                 \t\t\t\t<td class=\"fld-msg-type\">{}</td>\n\
                 \t\t\t\t<td class=\"fld-msg-opt\">{}</td>\n\
                 \t\t\t\t<td class=\"fld-msg-doc\">{}</td>\n\
                 \t\t\t</tr>",
                escape_html(field.name()),
                type_html,
                flags,
                render_comment(field.comment()),
            );
            self.write_str(&row)?;
        }

        self.write_str("</table>\n\t</div>")
    }
}

fn alias_label(alias: &str) -> &str {
    if alias.is_empty() {
        DEFAULT_ALIAS_LABEL
    } else {
        alias
    }
}

/// Escape text for element content and double- or single-quoted attributes.
///
/// Uses askama's HTML escaper so hand-built markup matches the templates.
pub fn escape_html(text: &str) -> String {
    match escape(text, Html) {
        Ok(escaped) => escaped.to_string(),
        Err(never) => match never {},
    }
}

/// Drop blank lines at both ends; interior blank lines stay.
pub fn trim_comment_lines(lines: &[String]) -> &[String] {
    let is_blank = |line: &String| line.trim().is_empty();
    let Some(start) = lines.iter().position(|l| !is_blank(l)) else {
        return &[];
    };
    let end = lines.iter().rposition(|l| !is_blank(l)).map_or(start, |i| i + 1);
    &lines[start..end]
}

/// Comment lines trimmed, escaped and joined with `<br/>`; empty for no comment.
pub fn render_comment(comment: Option<&Comment>) -> String {
    let Some(comment) = comment else {
        return String::new();
    };
    trim_comment_lines(&comment.lines)
        .iter()
        .map(|line| escape_html(line))
        .collect::<Vec<_>>()
        .join("<br/>")
}
