//! `susp frames` command - show the initialized frame tree

use std::path::PathBuf;

use console::style;
use miette::Result;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::truncate_str;
use crate::cli::output::print_serialized;
use crate::cli::GlobalOpts;
use crate::core::system::KinematicSystem;
use crate::entities::design::DesignFile;

#[derive(clap::Args, Debug)]
pub struct FramesArgs {
    /// Design file (YAML)
    pub file: PathBuf,
}

#[derive(Tabled)]
struct FrameRow {
    #[tabled(rename = "KEY")]
    key: String,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "PARENT")]
    parent: String,
    #[tabled(rename = "PATH")]
    path: String,
    #[tabled(rename = "DOF")]
    dof: String,
    #[tabled(rename = "POINTS")]
    points: String,
}

pub fn run(args: FramesArgs, global: &GlobalOpts) -> Result<()> {
    let design = DesignFile::load(&args.file)?;
    let system = KinematicSystem::from_design(design)?;
    let snapshot = system.snapshot();

    if print_serialized(&snapshot.frames, global.format)? {
        return Ok(());
    }

    let rows: Vec<FrameRow> = snapshot
        .frames
        .iter()
        .map(|f| FrameRow {
            key: f.key.clone(),
            title: f.title.clone(),
            parent: f.parent.clone().unwrap_or_else(|| "-".to_string()),
            path: f.path.join(" → "),
            dof: f.dof.clone(),
            points: truncate_str(&f.points.join(", "), 40),
        })
        .collect();

    println!(
        "{} {} {}",
        style("◆").cyan(),
        style(system.name()).bold(),
        style(format!("{} frames", rows.len())).dim()
    );
    println!("{}", Table::new(rows).with(Style::rounded()));

    Ok(())
}
