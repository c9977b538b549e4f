use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::catalog::{sorted_file_paths, sorted_packages, DepFilter};
use crate::config::{DocConfig, DocOverrides};
use crate::generator::{FieldOrder, Generator, MethodOrder};
use crate::graph::{load_graph, Graph};

/// Name of the generated document inside the output directory
pub const INDEX_FILE: &str = "index.html";

/// Command-line interface for protodoc
///
/// Renders Protocol Buffers schemas into a single cross-linked HTML page.
#[derive(Parser, Debug)]
#[command(name = "protodoc-gen")]
#[command(about = "HTML documentation for Protocol Buffers schemas", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render index.html for every owned schema file
    Generate {
        /// Directory searched for imports only (repeatable)
        #[arg(long = "inc-path", value_name = "DIR")]
        inc_paths: Vec<PathBuf>,

        /// Documented source root, optionally with a logical prefix: DIR[;PREFIX] (repeatable)
        #[arg(long = "proto-path", value_name = "DIR[;PREFIX]")]
        proto_paths: Vec<String>,

        /// Directory that receives index.html; created if missing
        #[arg(long = "output-path", value_name = "DIR")]
        output_path: Option<PathBuf>,

        /// TOML file with defaults for any of these options
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Row order of field tables
        #[arg(long, value_enum)]
        field_order: Option<FieldOrder>,

        /// Row order of service method tables
        #[arg(long, value_enum)]
        method_order: Option<MethodOrder>,

        /// Only document these logical file paths (repeatable)
        #[arg(long = "file", value_name = "PATH")]
        files: Vec<String>,

        /// Fail on imports that cannot be found instead of skipping them
        #[arg(long, default_value_t = false)]
        strict_imports: bool,
    },
    /// Print the schema files and packages that would be loaded
    List {
        /// Directory searched for imports only (repeatable)
        #[arg(long = "inc-path", value_name = "DIR")]
        inc_paths: Vec<PathBuf>,

        /// Documented source root: DIR[;PREFIX] (repeatable)
        #[arg(long = "proto-path", value_name = "DIR[;PREFIX]")]
        proto_paths: Vec<String>,

        /// Which files to list
        #[arg(long, value_enum, default_value_t = DepsArg::All)]
        deps: DepsArg,
    },
}

/// `--deps` choices for `list`
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DepsArg {
    /// Owned and imported files
    All,
    /// Files under a --proto-path
    Own,
    /// Files reached only through imports
    Imported,
}

impl From<DepsArg> for DepFilter {
    fn from(arg: DepsArg) -> Self {
        match arg {
            DepsArg::All => DepFilter::All,
            DepsArg::Own => DepFilter::OwnedOnly,
            DepsArg::Imported => DepFilter::ImportedOnly,
        }
    }
}

/// Execute a parsed command.
///
/// # Errors
///
/// Returns an error if:
/// - No output path is given to `generate`
/// - A `--proto-path` is not a directory
/// - A schema file fails to compile
/// - The output directory or file cannot be created or written
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            inc_paths,
            proto_paths,
            output_path,
            config,
            title,
            field_order,
            method_order,
            files,
            strict_imports,
        } => {
            let base = match config {
                Some(path) => DocConfig::load(&path)?,
                None => DocConfig::default(),
            };
            let config = base.merge(DocOverrides {
                inc_paths,
                proto_paths,
                output_path,
                title,
                strict_imports,
                field_order,
                method_order,
                files,
            });
            let index = generate(&config)?;
            info!(path = %index.display(), "documentation written");
            Ok(())
        }
        Commands::List {
            inc_paths,
            proto_paths,
            deps,
        } => {
            let config = DocConfig {
                inc_paths,
                proto_paths,
                ..DocConfig::default()
            };
            let graph = load_graph(&config.load_options())?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_listing(&graph, deps.into(), &mut out)?;
            Ok(())
        }
    }
}

/// Load the schemas named by `config` and write `index.html`.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// See [`run_cli`].
pub fn generate(config: &DocConfig) -> anyhow::Result<PathBuf> {
    let output_dir = config.require_output_path()?;
    let graph = load_graph(&config.load_options())?;
    write_index(&graph, config, output_dir)
}

fn write_index(graph: &Graph, config: &DocConfig, output_dir: &Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Error creating output directory {}", output_dir.display()))?;

    let index = output_dir.join(INDEX_FILE);
    let file = File::create(&index)
        .with_context(|| format!("Error creating output file {}", index.display()))?;

    Generator::new(config.render_options())
        .generate(graph, BufWriter::new(file))
        .with_context(|| format!("Error generating documentation into {}", index.display()))?;

    Ok(index)
}

/// Print file paths, then packages, matching `deps`.
pub fn write_listing(graph: &Graph, deps: DepFilter, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Files:")?;
    for path in sorted_file_paths(graph, deps) {
        writeln!(out, "  {}", path)?;
    }
    writeln!(out, "Packages:")?;
    for package in sorted_packages(graph, deps) {
        writeln!(out, "  {}", package)?;
    }
    Ok(())
}
