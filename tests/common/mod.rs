#![allow(dead_code, clippy::unwrap_used)]

pub mod fixtures {
    use protodoc::graph::{
        Comment, EnumConstant, EnumDecl, Field, Message, OneofField, Ownership, PlainField,
        ProtoFile,
    };

    pub fn constant(name: &str, value: i32) -> EnumConstant {
        EnumConstant {
            name: name.to_string(),
            value,
            comment: None,
        }
    }

    pub fn enum_decl(name: &str, constants: Vec<EnumConstant>) -> EnumDecl {
        EnumDecl {
            name: name.to_string(),
            constants,
            comment: None,
        }
    }

    pub fn field(name: &str, type_name: &str, tag: i32) -> Field {
        Field::Plain(PlainField {
            name: name.to_string(),
            type_name: type_name.to_string(),
            tag,
            required: false,
            repeated: false,
            optional: false,
            comment: None,
        })
    }

    pub fn oneof(name: &str, fields: Vec<Field>) -> Field {
        Field::Oneof(OneofField {
            name: name.to_string(),
            fields,
            comment: None,
        })
    }

    pub fn message(name: &str, fields: Vec<Field>) -> Message {
        Message {
            name: name.to_string(),
            fields,
            comment: None,
        }
    }

    pub fn commented_message(name: &str, comment: &str, fields: Vec<Field>) -> Message {
        Message {
            name: name.to_string(),
            fields,
            comment: Some(Comment::from_text(comment)),
        }
    }

    /// One owned file with `enum Color { RED = 0; GREEN = 1; }` and
    /// `message Pixel { Color c = 1; }`.
    pub fn color_pixel_file() -> ProtoFile {
        let mut file = ProtoFile::new("paint/pixel.proto", "paint", Ownership::Own);
        file.enums.push(enum_decl(
            "Color",
            vec![constant("RED", 0), constant("GREEN", 1)],
        ));
        file.messages.push(message("Pixel", vec![field("c", "Color", 1)]));
        file
    }
}

pub mod html {
    /// Count non-overlapping occurrences of `needle`.
    pub fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    /// Every `href="#..."` target in the document.
    pub fn link_targets(html: &str) -> Vec<String> {
        html.split("href=\"#")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .map(str::to_string)
            .collect()
    }

    /// Every `name="..."` anchor in the document.
    pub fn anchors(html: &str) -> Vec<String> {
        html.split("<a name=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .map(str::to_string)
            .collect()
    }

    /// The content pane only (everything after the navigation pane).
    pub fn content_pane(html: &str) -> &str {
        html.find("<div class=\"content\">")
            .map_or(html, |idx| &html[idx..])
    }

    pub fn nav_pane(html: &str) -> &str {
        let start = html.find("<div class=\"nav\">").unwrap_or(0);
        let end = html.find("<div class=\"content\">").unwrap_or(html.len());
        &html[start..end]
    }
}

pub mod protos {
    use std::fs;
    use std::path::Path;

    /// Write `contents` to `dir/rel`, creating parent directories.
    pub fn write(dir: &Path, rel: &str, contents: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
}
