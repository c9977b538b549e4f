use clap::Parser;
use protodoc::cli::{run_cli, Cli};
use protodoc::logging::{init_logging, LogConfig};
use tracing::error;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&LogConfig::from_env()) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }

    if let Err(err) = run_cli(cli) {
        error!("{err:#}");
        std::process::exit(1);
    }
}
