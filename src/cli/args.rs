//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::design::DesignArgs;
use crate::cli::commands::frames::FramesArgs;
use crate::cli::commands::template::TemplateArgs;

#[derive(Parser, Debug)]
#[command(name = "susp")]
#[command(author, version, about = "Kinematic design of double wishbone suspension linkages")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Table for terminals
    #[default]
    Auto,
    Table,
    Yaml,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a design from a design file and print the resolved geometry
    Design(DesignArgs),

    /// Show the initialized frame tree of a design file
    Frames(FramesArgs),

    /// Print a ready-to-edit design file
    Template(TemplateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
