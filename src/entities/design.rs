//! Design file - a named target, its bounds and optional sample overrides

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::sampling::{Bound, Convention, Hardpoint, SampleTable};
use crate::entities::bound::BoundSet;
use crate::entities::target::{LinkageTarget, SpringTarget, Target, TypeTarget, VehicleTarget};
use crate::yaml::{parse_yaml_file, YamlError};

const MM_PER_IN: f64 = 25.4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesignFile {
    pub name: String,
    pub target: Target,

    #[serde(default)]
    pub bound: BoundSet,

    /// Samples that replace the defaults for the listed hardpoints
    #[serde(default, skip_serializing_if = "SampleTable::is_empty")]
    pub sample: SampleTable,
}

impl DesignFile {
    pub fn load(path: &Path) -> Result<Self, YamlError> {
        parse_yaml_file(path)
    }

    pub fn to_yaml(&self) -> Result<String, YamlError> {
        Ok(serde_yml::to_string(self)?)
    }

    /// Front double wishbone with a lower push rod and ride + ARB springs
    pub fn example() -> Self {
        let deg = |d: f64| d.to_radians();
        let deg_per_in = |d: f64| d.to_radians() / MM_PER_IN;

        let target = Target {
            vehicle: VehicleTarget {
                wheelbase: 1525.0,
                weight_distribution: [50.0, 50.0],
                sprung_mass: 225.0,
                cg_height: 8.5 * MM_PER_IN,
                ride_height: 2.0 * MM_PER_IN,
                rake: 0.0,
                loaded_radius: 7.85 * MM_PER_IN,
            },
            types: TypeTarget {
                axle: "Front".to_string(),
                linkage: "Double Wishbone".to_string(),
                strut: Some("Lower Rod".to_string()),
                spring: vec!["Ride".to_string(), "ARB".to_string()],
            },
            linkage: LinkageTarget {
                track: 1220.0,
                toe: deg(0.5),
                pitch_center: 10.0,
                caster: deg(3.0),
                caster_gain: deg_per_in(0.25),
                roll_center: 15.0,
                camber: deg(-1.6),
                camber_gain: deg_per_in(-1.0),
                scrub: 0.5 * MM_PER_IN,
                kpi: deg(3.0),
            },
            spring: SpringTarget {
                ride_ratio: Some(0.8),
                arb_ratio: Some(deg_per_in(0.8)),
            },
        };

        Self {
            name: "Test".to_string(),
            target,
            bound: example_bounds(),
            sample: SampleTable::default(),
        }
    }
}

/// Bounds given in inches, converted to millimetres
fn inches(rows: [[f64; 2]; 3]) -> [[f64; 2]; 3] {
    rows.map(|row| row.map(|v| v * MM_PER_IN))
}

fn example_bounds() -> BoundSet {
    let nan = f64::NAN;

    let linkage = BTreeMap::from([
        (Hardpoint::LowerFront, [[5.0, 5.0], [8.0, 8.7], [0.5, 1.5]]),
        (Hardpoint::LowerRear, [[-5.0, -5.0], [0.0, 0.0], [0.5, 1.5]]),
        (Hardpoint::UpperFront, [[0.0, 0.0], [8.7, 10.0], [6.0, 8.0]]),
        (Hardpoint::UpperRear, [[0.0, 0.0], [0.0, 0.0], [6.0, 8.0]]),
        (Hardpoint::TieRodInner, [[2.0, 3.0], [8.7, 8.7], [2.5, 2.75]]),
        (Hardpoint::LowerBall, [[0.0, 0.0], [-0.88, -0.88], [-3.25, -2.7]]),
        (Hardpoint::UpperBall, [[0.0, 0.0], [-1.75, -0.88], [3.0, 3.5]]),
        (Hardpoint::TieRodOuter, [[2.5, 2.85], [-1.25, -0.88], [-1.5, 0.5]]),
    ])
    .into_iter()
    .map(|(hp, rows)| (hp, Bound::cartesian(inches(rows))))
    .collect();

    let bound = |convention, rows| Bound {
        convention,
        rows: inches(rows),
    };

    let strut = BTreeMap::from([
        ("RA".to_string(), bound(Convention::Cartesian, [[-3.0, 2.0], [6.0, 9.5], [8.0, 10.0]])),
        ("PA".to_string(), bound(Convention::Radial, [[nan, nan], [2.0, 4.0], [nan, nan]])),
        ("PB".to_string(), bound(Convention::Axial, [[2.25, 3.75], [-3.0, -2.0], [1.5, 2.5]])),
    ]);

    let spring = BTreeMap::from([
        ("SA".to_string(), bound(Convention::Cartesian, [[-3.0, 2.0], [8.0, 12.0], [10.0, 18.0]])),
        ("SB".to_string(), bound(Convention::Radial, [[nan, nan], [2.25, 3.75], [1.5, 2.5]])),
    ]);

    BoundSet {
        linkage,
        strut,
        spring,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::parse_yaml;

    #[test]
    fn test_example_converts_inches() {
        let design = DesignFile::example();
        assert!((design.target.vehicle.cg_height - 215.9).abs() < 1e-9);
        let laf = design.bound.linkage[&Hardpoint::LowerFront];
        assert!((laf.rows[1][1] - 220.98).abs() < 1e-9);
    }

    #[test]
    fn test_template_reloads() {
        let design = DesignFile::example();
        let yaml = design.to_yaml().unwrap();
        let reloaded: DesignFile = parse_yaml(&yaml, "template.yaml").unwrap();

        assert_eq!(reloaded.name, "Test");
        assert_eq!(reloaded.target, design.target);
        assert_eq!(reloaded.bound.linkage, design.bound.linkage);
        assert!(reloaded.bound.strut["PA"].is_fixed(crate::core::rotation::Axis::X));
    }

    #[test]
    fn test_sample_overrides_parse() {
        let yaml = format!(
            "{}sample:\n  linkage:\n    LAF: [0.0, 0.5, 0.25]\n",
            DesignFile::example().to_yaml().unwrap()
        );
        let design: DesignFile = parse_yaml(&yaml, "design.yaml").unwrap();
        assert_eq!(
            design.sample.get(Hardpoint::LowerFront).values(),
            [0.0, 0.5, 0.25]
        );
    }

    #[test]
    fn test_out_of_range_sample_is_a_parse_error() {
        let yaml = format!(
            "{}sample:\n  linkage:\n    LAF: [0.0, 2.0, 0.0]\n",
            DesignFile::example().to_yaml().unwrap()
        );
        let err = parse_yaml::<DesignFile>(&yaml, "bad.yaml").unwrap_err();
        assert!(err.to_string().contains("outside [0, 1]"));
    }
}
