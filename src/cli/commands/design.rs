//! `susp design` command - generate a design and print the resolved geometry

use std::path::PathBuf;

use console::style;
use miette::Result;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::{format_deg, format_mm, format_optional_point, format_point};
use crate::cli::output::print_serialized;
use crate::cli::GlobalOpts;
use crate::core::linkage::Subsystem;
use crate::core::report::DesignReport;
use crate::core::system::KinematicSystem;
use crate::entities::design::DesignFile;

#[derive(clap::Args, Debug)]
pub struct DesignArgs {
    /// Design file (YAML)
    pub file: PathBuf,

    /// Subsystem(s) to generate, in order (default: linkage)
    #[arg(long = "subsystem", short = 's')]
    pub subsystems: Vec<Subsystem>,
}

#[derive(Tabled)]
struct HardpointRow {
    #[tabled(rename = "POINT")]
    key: String,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "FRAME")]
    frame: String,
    #[tabled(rename = "LOCAL (mm)")]
    local: String,
    #[tabled(rename = "WORLD (mm)")]
    world: String,
}

pub fn run(args: DesignArgs, global: &GlobalOpts) -> Result<()> {
    let design = DesignFile::load(&args.file)?;
    let mut system = KinematicSystem::from_design(design)?;

    let subsystems: Vec<Subsystem> = if args.subsystems.is_empty() {
        vec![Subsystem::Linkage]
    } else {
        args.subsystems
    };
    system.generate_design(&subsystems)?;

    if print_serialized(&system.designs(), global.format)? {
        return Ok(());
    }

    let axle = system.target().types.axle.clone();
    println!(
        "{} {} {}",
        style("◆").cyan(),
        style(system.name()).bold(),
        style(format!("{}, {} axle", system.linkage(), axle)).dim()
    );
    for report in system.designs() {
        print_report(report);
    }

    Ok(())
}

fn print_report(report: &DesignReport) {
    let rows: Vec<HardpointRow> = report
        .hardpoints
        .iter()
        .map(|h| HardpointRow {
            key: h.hardpoint.to_string(),
            title: h.title.clone(),
            frame: h.frame.clone(),
            local: format_point(&h.local),
            world: format_point(&h.world),
        })
        .collect();

    println!();
    println!("{}", style("Hardpoints").bold());
    println!("{}", Table::new(rows).with(Style::rounded()));

    if !report.inherited.is_empty() {
        println!();
        println!("{}", style("Inherited bounds").bold());
        for rule in &report.inherited {
            println!(
                "  {} {} {} {}",
                style(format!("{}.{}", rule.dependent, rule.axis)).cyan(),
                style("←").dim(),
                style(format!("{}.{}", rule.sibling, rule.axis)).yellow(),
                style("(unspecified row)").dim()
            );
        }
    }

    let k = &report.kinematics;
    let line = |label: &str, value: String| {
        println!("  {:<22} {}", style(label).bold(), value);
    };

    println!();
    println!("{}", style("Derived kinematics").bold());
    line("Contact patch", format_point(&k.contact_patch));
    line("Front instant center", format_optional_point(k.front_instant_center.as_ref()));
    line("Side instant center", format_optional_point(k.side_instant_center.as_ref()));
    line("Roll center", format_optional_point(k.roll_center.as_ref()));
    line("Roll center (target)", format_point(&k.roll_center_target));
    line("Pitch center", format_optional_point(k.pitch_center.as_ref()));
    line("FVSA", k.fvsa.map(format_mm).unwrap_or_else(|| "∞".to_string()));
    line("FVSA (target)", format_mm(k.fvsa_target));
    line("Kingpin inclination", format_deg(k.kpi));
    line("Caster", format_deg(k.caster));
    line(
        "Scrub radius",
        k.scrub_radius.map(format_mm).unwrap_or_else(|| "n/a".to_string()),
    );
}
