//! # CLI Module
//!
//! Command-line interface of the `protodoc-gen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Render every owned schema file into `<output-path>/index.html`:
//!
//! ```bash
//! protodoc-gen generate \
//!     --inc-path third_party/protos \
//!     --proto-path "api;acme/api" \
//!     --output-path target/doc-html
//! ```
//!
//! Options:
//! - `--inc-path <DIR>` - Import search directory, not documented (repeatable)
//! - `--proto-path <DIR[;PREFIX]>` - Documented root; files are named
//!   `PREFIX/<relative path>` (repeatable)
//! - `--output-path <DIR>` - Destination directory (required here or in the config)
//! - `--config <FILE>` - TOML defaults, see [`crate::config`]
//! - `--title`, `--field-order`, `--method-order`, `--file` - Presentation
//! - `--strict-imports` - Fail on missing imports instead of skipping them
//!
//! ### `list`
//!
//! Print the files and packages that `generate` would load:
//!
//! ```bash
//! protodoc-gen list --proto-path api --deps imported
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use protodoc::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse())?;
//! ```

mod commands;


pub use commands::{generate, run_cli, write_listing, Cli, Commands, DepsArg, INDEX_FILE};
