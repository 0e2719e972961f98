//! CLI module - argument parsing, logging setup and command dispatch

pub mod args;
pub mod commands;
pub mod helpers;
pub mod output;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins when set; otherwise the level follows the `-v` count.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run a parsed command line
pub fn run(cli: Cli) -> miette::Result<()> {
    match cli.command {
        Commands::Design(args) => commands::design::run(args, &cli.global),
        Commands::Frames(args) => commands::frames::run(args, &cli.global),
        Commands::Template(args) => commands::template::run(args),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
