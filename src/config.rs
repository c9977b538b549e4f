//! Generation settings loaded from a TOML file
//!
//! Every key is optional; command-line flags are merged on top with
//! [`DocConfig::merge`]. Example:
//!
//! ```toml
//! inc_paths = ["third_party/protos"]
//! proto_paths = ["api;acme/api"]
//! output_path = "target/doc-html"
//! title = "Acme API"
//! ignore_missing_imports = true
//! field_order = "tag"
//! method_order = "name"
//! files = ["acme/api/v1/orders.proto"]
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::generator::{FieldOrder, MethodOrder, RenderOptions};
use crate::graph::{LoadOptions, OwnedRoot};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DocConfig {
    /// Directories searched for imports only
    #[serde(default)]
    pub inc_paths: Vec<PathBuf>,
    /// Documented roots in `path[;prefix]` form
    #[serde(default)]
    pub proto_paths: Vec<String>,
    #[serde(default)]
    pub output_path: Option<PathBuf>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_ignore_missing_imports")]
    pub ignore_missing_imports: bool,
    #[serde(default)]
    pub field_order: Option<FieldOrder>,
    #[serde(default)]
    pub method_order: Option<MethodOrder>,
    /// Restrict the document to these logical file paths
    #[serde(default)]
    pub files: Vec<String>,
}

fn default_ignore_missing_imports() -> bool {
    true
}

impl Default for DocConfig {
    fn default() -> Self {
        DocConfig {
            inc_paths: Vec::new(),
            proto_paths: Vec::new(),
            output_path: None,
            title: None,
            ignore_missing_imports: default_ignore_missing_imports(),
            field_order: None,
            method_order: None,
            files: Vec::new(),
        }
    }
}

/// Values given on the command line, layered over a [`DocConfig`]
#[derive(Debug, Clone, Default)]
pub struct DocOverrides {
    pub inc_paths: Vec<PathBuf>,
    pub proto_paths: Vec<String>,
    pub output_path: Option<PathBuf>,
    pub title: Option<String>,
    pub strict_imports: bool,
    pub field_order: Option<FieldOrder>,
    pub method_order: Option<MethodOrder>,
    pub files: Vec<String>,
}

impl DocConfig {
    /// Load a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid config TOML.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Layer command-line values on top: lists are extended after the file's
    /// entries, scalars replace the file's value when given.
    pub fn merge(mut self, overrides: DocOverrides) -> Self {
        self.inc_paths.extend(overrides.inc_paths);
        self.proto_paths.extend(overrides.proto_paths);
        self.files.extend(overrides.files);
        if overrides.output_path.is_some() {
            self.output_path = overrides.output_path;
        }
        if overrides.title.is_some() {
            self.title = overrides.title;
        }
        if overrides.field_order.is_some() {
            self.field_order = overrides.field_order;
        }
        if overrides.method_order.is_some() {
            self.method_order = overrides.method_order;
        }
        if overrides.strict_imports {
            self.ignore_missing_imports = false;
        }
        self
    }

    /// Search paths and roots for [`load_graph`](crate::graph::load_graph).
    /// Blank entries are dropped.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            include_dirs: self
                .inc_paths
                .iter()
                .filter(|p| !p.to_string_lossy().trim().is_empty())
                .cloned()
                .collect(),
            owned_roots: self
                .proto_paths
                .iter()
                .map(|p| OwnedRoot::parse(p.trim()))
                .filter(|root| !root.dir.as_os_str().is_empty())
                .collect(),
            ignore_missing_imports: self.ignore_missing_imports,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        let defaults = RenderOptions::default();
        RenderOptions {
            title: self.title.clone().unwrap_or(defaults.title),
            field_order: self.field_order.unwrap_or(defaults.field_order),
            method_order: self.method_order.unwrap_or(defaults.method_order),
            file_paths: self.files.clone(),
        }
    }

    /// # Errors
    ///
    /// Returns an error when no output path was configured.
    pub fn require_output_path(&self) -> anyhow::Result<&Path> {
        self.output_path
            .as_deref()
            .context("Output path is required (use --output-path or set output_path in the config)")
    }
}
