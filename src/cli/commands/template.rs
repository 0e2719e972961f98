//! `susp template` command - print or write an example design file

use std::fs;
use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::entities::design::DesignFile;

const HEADER: &str = "\
# Suspension design file
# Lengths in mm, angles in rad, gains per mm of travel.
# Bounds are [[min, max], [min, max], [min, max]] per hardpoint; .nan marks a fixed axis.
";

#[derive(clap::Args, Debug)]
pub struct TemplateArgs {
    /// Write to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: TemplateArgs) -> Result<()> {
    let body = DesignFile::example().to_yaml()?;
    let content = format!("{}{}", HEADER, body);

    match args.output {
        Some(path) => {
            fs::write(&path, content).into_diagnostic()?;
            println!(
                "{} Wrote design template to {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        None => print!("{}", content),
    }

    Ok(())
}
