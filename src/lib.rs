//! # protodoc
//!
//! **protodoc** renders a set of Protocol Buffers schema files into one
//! self-contained, cross-linked HTML page.
//!
//! ## Overview
//!
//! Schema files under one or more *owned* roots are documented. Files they
//! import are loaded so references can be resolved, but they get no block of
//! their own and are never linked to.
//!
//! ## Architecture
//!
//! - **[`graph`]** - Loads `.proto` sources (via `protox`) into a declaration
//!   graph and resolves type names
//! - **[`catalog`]** - Filtered, ordered declaration listings and field/method
//!   ordering helpers
//! - **[`generator`]** - Streams the HTML page: navigation, grouped content
//!   blocks, type links
//! - **[`config`]** - TOML configuration merged with command-line flags
//! - **[`cli`]** - The `protodoc-gen` command surface
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ### Generation Flow
//!
//! ```text
//! protodoc-gen generate
//!   → config::DocConfig (file + flags)
//!   → graph::load_graph (protox compile, ownership tagging)
//!   → catalog::list_declarations (owned, by alias then name)
//!   → generator::Generator::generate → <output-path>/index.html
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! protodoc-gen generate --inc-path third_party --proto-path "api;acme/api" --output-path docs
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use protodoc::generator::{Generator, RenderOptions};
//! use protodoc::graph::{load_graph, LoadOptions, OwnedRoot};
//!
//! # fn main() -> anyhow::Result<()> {
//! let graph = load_graph(&LoadOptions {
//!     include_dirs: vec!["third_party".into()],
//!     owned_roots: vec![OwnedRoot::parse("api;acme/api")],
//!     ignore_missing_imports: true,
//! })?;
//! let out = std::fs::File::create("index.html")?;
//! Generator::new(RenderOptions::default()).generate(&graph, std::io::BufWriter::new(out))?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod generator;
pub mod graph;
pub mod logging;

pub use catalog::{list_declarations, DeclFilter, DepFilter, SortKey};
pub use generator::{Generator, RenderError, RenderOptions};
pub use graph::{load_graph, Graph, LoadOptions, OwnedRoot};
