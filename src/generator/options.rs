use serde::Deserialize;

/// Row order of message and oneof field tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FieldOrder {
    /// As declared in the schema
    #[default]
    Source,
    /// Ascending field name
    Name,
    /// Ascending tag number
    Tag,
}

/// Row order of service method tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MethodOrder {
    #[default]
    Source,
    Name,
}

/// Presentation settings for one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Page `<title>` and content heading
    pub title: String,
    pub field_order: FieldOrder,
    pub method_order: MethodOrder,
    /// Restrict the document to these owned files; empty means all of them
    pub file_paths: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            title: "Documentation".to_string(),
            field_order: FieldOrder::default(),
            method_order: MethodOrder::default(),
            file_paths: Vec::new(),
        }
    }
}
