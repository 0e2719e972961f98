//! Bounds and normalized sampling
//!
//! Maps a normalized design-space coordinate onto a concrete hardpoint position:
//! `position = min + sample ⊙ (max − min)` per axis. Axes whose interval has zero
//! width resolve to `min` whatever the sample says, and `NaN` intervals mark
//! fixed parameters that are not sampled at all.
//!
//! Bound inheritance is resolved in two passes. The input bounds are never
//! modified; derived rows for dependent hardpoints are returned separately in
//! [`ResolvedBounds`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{KinematicError, Result};
use crate::core::rotation::Axis;

/// Double wishbone hardpoints
///
/// Variant order is resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Hardpoint {
    #[serde(rename = "LAF")]
    LowerFront,
    #[serde(rename = "LAR")]
    LowerRear,
    #[serde(rename = "UAF")]
    UpperFront,
    #[serde(rename = "UAR")]
    UpperRear,
    #[serde(rename = "TA")]
    TieRodInner,
    #[serde(rename = "LB")]
    LowerBall,
    #[serde(rename = "UB")]
    UpperBall,
    #[serde(rename = "TB")]
    TieRodOuter,
}

impl Hardpoint {
    /// All hardpoints in resolution order
    pub const ALL: [Hardpoint; 8] = [
        Hardpoint::LowerFront,
        Hardpoint::LowerRear,
        Hardpoint::UpperFront,
        Hardpoint::UpperRear,
        Hardpoint::TieRodInner,
        Hardpoint::LowerBall,
        Hardpoint::UpperBall,
        Hardpoint::TieRodOuter,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Hardpoint::LowerFront => "LAF",
            Hardpoint::LowerRear => "LAR",
            Hardpoint::UpperFront => "UAF",
            Hardpoint::UpperRear => "UAR",
            Hardpoint::TieRodInner => "TA",
            Hardpoint::LowerBall => "LB",
            Hardpoint::UpperBall => "UB",
            Hardpoint::TieRodOuter => "TB",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Hardpoint::LowerFront => "Lower A-Arm Front Pickup",
            Hardpoint::LowerRear => "Lower A-Arm Rear Pickup",
            Hardpoint::UpperFront => "Upper A-Arm Front Pickup",
            Hardpoint::UpperRear => "Upper A-Arm Rear Pickup",
            Hardpoint::TieRodInner => "Tie Rod Pickup",
            Hardpoint::LowerBall => "Lower Pickup",
            Hardpoint::UpperBall => "Upper Pickup",
            Hardpoint::TieRodOuter => "Tie Rod Pickup",
        }
    }

    /// Inboard pickups are chassis side and live in the axle frame
    pub fn is_inboard(self) -> bool {
        matches!(
            self,
            Hardpoint::LowerFront
                | Hardpoint::LowerRear
                | Hardpoint::UpperFront
                | Hardpoint::UpperRear
                | Hardpoint::TieRodInner
        )
    }

    /// Key of the frame whose coordinates the hardpoint and its bound use
    pub fn owner_frame(self) -> &'static str {
        if self.is_inboard() {
            "X"
        } else {
            "W"
        }
    }

    /// Which axes are designed by sampling, before zero-width bounds are masked out
    pub fn default_sample_mask(self) -> [f64; 3] {
        match self {
            Hardpoint::LowerFront | Hardpoint::LowerRear | Hardpoint::TieRodInner => [1.0, 1.0, 0.0],
            Hardpoint::UpperFront | Hardpoint::UpperRear => [1.0, 0.0, 0.0],
            Hardpoint::LowerBall | Hardpoint::TieRodOuter => [1.0, 1.0, 1.0],
            Hardpoint::UpperBall => [1.0, 0.0, 1.0],
        }
    }
}

impl fmt::Display for Hardpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Hardpoint {
    type Err = KinematicError;

    fn from_str(s: &str) -> Result<Self> {
        Hardpoint::ALL
            .into_iter()
            .find(|h| h.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| KinematicError::invalid("hardpoint", format!("unknown hardpoint '{}'", s)))
    }
}

/// Coordinate convention a bound's rows are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Convention {
    /// Absolute x, y, z in the owning frame
    #[default]
    Cartesian,
    /// Cylindrical, for points constrained to a rotation plane
    Radial,
    /// Relative to a member's own axis
    Axial,
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Convention::Cartesian => write!(f, "cartesian"),
            Convention::Radial => write!(f, "radial"),
            Convention::Axial => write!(f, "axial"),
        }
    }
}

/// On-disk shape of a bound: a bare 3×2 array or an explicit convention
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum BoundRepr {
    Rows([[f64; 2]; 3]),
    Explicit {
        convention: Convention,
        rows: [[f64; 2]; 3],
    },
}

/// Admissible `[min, max]` interval per axis for one point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "BoundRepr", into = "BoundRepr")]
pub struct Bound {
    pub convention: Convention,
    pub rows: [[f64; 2]; 3],
}

impl From<BoundRepr> for Bound {
    fn from(repr: BoundRepr) -> Self {
        match repr {
            BoundRepr::Rows(rows) => Bound::cartesian(rows),
            BoundRepr::Explicit { convention, rows } => Bound { convention, rows },
        }
    }
}

impl From<Bound> for BoundRepr {
    fn from(bound: Bound) -> Self {
        match bound.convention {
            Convention::Cartesian => BoundRepr::Rows(bound.rows),
            convention => BoundRepr::Explicit {
                convention,
                rows: bound.rows,
            },
        }
    }
}

impl Bound {
    pub fn cartesian(rows: [[f64; 2]; 3]) -> Self {
        Self {
            convention: Convention::Cartesian,
            rows,
        }
    }

    /// A bound pinned to a single position
    pub fn fixed_at(position: [f64; 3]) -> Self {
        Self::cartesian(position.map(|v| [v, v]))
    }

    pub fn row(&self, axis: Axis) -> [f64; 2] {
        self.rows[axis.index()]
    }

    /// Copy of the bound with one row replaced
    pub fn with_row(mut self, axis: Axis, row: [f64; 2]) -> Self {
        self.rows[axis.index()] = row;
        self
    }

    /// A `NaN` row marks a fixed, non-sampled parameter
    pub fn is_fixed(&self, axis: Axis) -> bool {
        let [min, max] = self.row(axis);
        min.is_nan() || max.is_nan()
    }

    /// Zero-width interval
    pub fn is_degenerate(&self, axis: Axis) -> bool {
        let [min, max] = self.row(axis);
        min == max
    }

    /// All-zero row, which lets inheritance fill it in
    pub fn is_unspecified(&self, axis: Axis) -> bool {
        self.row(axis) == [0.0, 0.0]
    }

    /// Check every row is either fully `NaN` or a finite interval with `min <= max`
    pub fn validate(&self, name: &str) -> Result<()> {
        for axis in Axis::ALL {
            let [min, max] = self.row(axis);
            let field = format!("{}[{}]", name, axis);

            if min.is_nan() && max.is_nan() {
                continue;
            }
            if min.is_nan() || max.is_nan() {
                return Err(KinematicError::invalid(
                    field,
                    "a fixed axis must mark both ends as NaN",
                ));
            }
            if !min.is_finite() || !max.is_finite() {
                return Err(KinematicError::invalid(field, "interval ends must be finite"));
            }
            if min > max {
                return Err(KinematicError::invalid(
                    field,
                    format!("min {} exceeds max {}", min, max),
                ));
            }
        }
        Ok(())
    }

    /// Resolve a sample into a position in the bound's convention
    pub fn resolve(&self, sample: &Sample) -> Vector3<f64> {
        Vector3::from_fn(|i, _| {
            let [min, max] = self.rows[i];
            resolve_axis(min, max, sample.0[i])
        })
    }
}

/// `min + sample · (max − min)`; zero-width intervals give `min`, fixed (`NaN`) ones give 0
pub fn resolve_axis(min: f64, max: f64, sample: f64) -> f64 {
    if min.is_nan() || max.is_nan() {
        0.0
    } else if min == max {
        min
    } else {
        min + sample * (max - min)
    }
}

/// Normalized design-space coordinate per axis, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "[f64; 3]", into = "[f64; 3]")]
pub struct Sample([f64; 3]);

impl Sample {
    pub fn new(values: [f64; 3]) -> Result<Self> {
        for (axis, value) in Axis::ALL.into_iter().zip(values) {
            if !(0.0..=1.0).contains(&value) {
                return Err(KinematicError::invalid(
                    format!("sample[{}]", axis),
                    format!("{} is outside [0, 1]", value),
                ));
            }
        }
        Ok(Self(values))
    }

    pub fn values(&self) -> [f64; 3] {
        self.0
    }

    pub fn get(&self, axis: Axis) -> f64 {
        self.0[axis.index()]
    }

    /// Copy with every zero-width or fixed axis of `bound` forced to 0
    pub fn normalized_against(&self, bound: &Bound) -> Sample {
        let mut values = self.0;
        for axis in Axis::ALL {
            if bound.is_fixed(axis) || bound.is_degenerate(axis) {
                values[axis.index()] = 0.0;
            }
        }
        Sample(values)
    }
}

impl TryFrom<[f64; 3]> for Sample {
    type Error = KinematicError;

    fn try_from(values: [f64; 3]) -> Result<Self> {
        Sample::new(values)
    }
}

impl From<Sample> for [f64; 3] {
    fn from(sample: Sample) -> Self {
        sample.0
    }
}

/// Per-hardpoint samples, keyed in resolution order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleTable {
    #[serde(default)]
    pub linkage: BTreeMap<Hardpoint, Sample>,
}

impl SampleTable {
    /// Default linkage samples: every designed axis at 1, zero-width bounds masked to 0
    pub fn default_linkage(bounds: &BTreeMap<Hardpoint, Bound>) -> Self {
        let linkage = Hardpoint::ALL
            .into_iter()
            .map(|hp| {
                let sample = Sample(hp.default_sample_mask());
                let sample = match bounds.get(&hp) {
                    Some(bound) => sample.normalized_against(bound),
                    None => sample,
                };
                (hp, sample)
            })
            .collect();
        Self { linkage }
    }

    pub fn is_empty(&self) -> bool {
        self.linkage.is_empty()
    }

    pub fn get(&self, hardpoint: Hardpoint) -> Sample {
        self.linkage.get(&hardpoint).copied().unwrap_or_default()
    }

    pub fn set(&mut self, hardpoint: Hardpoint, sample: Sample) {
        self.linkage.insert(hardpoint, sample);
    }

    /// Store a sample with the zero-width and fixed axes of its bound masked to 0
    pub fn set_within(
        &mut self,
        hardpoint: Hardpoint,
        sample: Sample,
        bounds: &BTreeMap<Hardpoint, Bound>,
    ) {
        let sample = match bounds.get(&hardpoint) {
            Some(bound) => sample.normalized_against(bound),
            None => sample,
        };
        self.linkage.insert(hardpoint, sample);
    }

    /// Overlay explicit samples on top of this table, masked against `bounds`
    pub fn merge(&mut self, overrides: &SampleTable, bounds: &BTreeMap<Hardpoint, Bound>) {
        for (hp, sample) in &overrides.linkage {
            self.set_within(*hp, *sample, bounds);
        }
    }
}

/// A dependent hardpoint axis that copies a sibling's bound and position when left unspecified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Inheritance {
    pub dependent: Hardpoint,
    pub axis: Axis,
    pub sibling: Hardpoint,
}

/// Inheritance rules in evaluation order
pub const INHERITANCE_RULES: [Inheritance; 4] = [
    Inheritance {
        dependent: Hardpoint::LowerRear,
        axis: Axis::Y,
        sibling: Hardpoint::LowerFront,
    },
    Inheritance {
        dependent: Hardpoint::UpperFront,
        axis: Axis::X,
        sibling: Hardpoint::LowerFront,
    },
    Inheritance {
        dependent: Hardpoint::UpperRear,
        axis: Axis::X,
        sibling: Hardpoint::LowerRear,
    },
    Inheritance {
        dependent: Hardpoint::UpperRear,
        axis: Axis::Y,
        sibling: Hardpoint::UpperFront,
    },
];

/// Linkage bounds after inheritance
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBounds {
    /// Effective bound per hardpoint (input rows plus inherited rows)
    pub bounds: BTreeMap<Hardpoint, Bound>,
    /// Rules that fired
    pub inherited: Vec<Inheritance>,
}

impl ResolvedBounds {
    pub fn get(&self, hardpoint: Hardpoint) -> Result<&Bound> {
        self.bounds
            .get(&hardpoint)
            .ok_or_else(|| missing_bound(hardpoint))
    }

    fn inherits(&self, dependent: Hardpoint) -> impl Iterator<Item = &Inheritance> {
        self.inherited.iter().filter(move |rule| rule.dependent == dependent)
    }
}

fn missing_bound(hardpoint: Hardpoint) -> KinematicError {
    KinematicError::invalid(
        format!("bound.linkage.{}", hardpoint),
        "no bound given for this hardpoint",
    )
}

/// Validate the linkage bounds and derive inherited rows
///
/// Pass one checks that every hardpoint has a valid Cartesian bound. Pass two
/// applies [`INHERITANCE_RULES`] in order against the effective bounds.
pub fn resolve_linkage_bounds(input: &BTreeMap<Hardpoint, Bound>) -> Result<ResolvedBounds> {
    let mut bounds = BTreeMap::new();
    for hp in Hardpoint::ALL {
        let bound = input.get(&hp).ok_or_else(|| missing_bound(hp))?;
        let name = format!("bound.linkage.{}", hp);
        bound.validate(&name)?;
        if bound.convention != Convention::Cartesian {
            return Err(KinematicError::invalid(
                name,
                format!("linkage hardpoints need cartesian bounds, got {}", bound.convention),
            ));
        }
        bounds.insert(hp, *bound);
    }

    let mut inherited = Vec::new();
    for rule in INHERITANCE_RULES {
        let dependent = bounds[&rule.dependent];
        if !dependent.is_unspecified(rule.axis) {
            continue;
        }
        let row = bounds[&rule.sibling].row(rule.axis);
        debug!(
            dependent = %rule.dependent,
            axis = %rule.axis,
            sibling = %rule.sibling,
            "inheriting bound row"
        );
        bounds.insert(rule.dependent, dependent.with_row(rule.axis, row));
        inherited.push(rule);
    }

    Ok(ResolvedBounds { bounds, inherited })
}

/// Resolve every hardpoint's position in its owning frame, in resolution order
///
/// Inherited axes take the sibling's resolved coordinate rather than being sampled.
pub fn resolve_linkage_positions(
    resolved: &ResolvedBounds,
    samples: &SampleTable,
) -> Result<BTreeMap<Hardpoint, Vector3<f64>>> {
    let mut positions: BTreeMap<Hardpoint, Vector3<f64>> = BTreeMap::new();

    for hp in Hardpoint::ALL {
        let bound = resolved.get(hp)?;
        let sample = samples.get(hp).normalized_against(bound);
        let mut position = bound.resolve(&sample);

        for rule in resolved.inherits(hp) {
            let sibling = positions
                .get(&rule.sibling)
                .ok_or_else(|| missing_bound(rule.sibling))?;
            position[rule.axis.index()] = sibling[rule.axis.index()];
        }

        debug!(
            hardpoint = %hp,
            frame = hp.owner_frame(),
            x = position.x,
            y = position.y,
            z = position.z,
            "resolved hardpoint"
        );
        positions.insert(hp, position);
    }

    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_bounds() -> BTreeMap<Hardpoint, Bound> {
        BTreeMap::from([
            (Hardpoint::LowerFront, Bound::cartesian([[127.0, 127.0], [203.2, 220.98], [12.7, 38.1]])),
            (Hardpoint::LowerRear, Bound::cartesian([[-127.0, -127.0], [0.0, 0.0], [12.7, 38.1]])),
            (Hardpoint::UpperFront, Bound::cartesian([[0.0, 0.0], [220.98, 254.0], [152.4, 203.2]])),
            (Hardpoint::UpperRear, Bound::cartesian([[0.0, 0.0], [0.0, 0.0], [152.4, 203.2]])),
            (Hardpoint::TieRodInner, Bound::cartesian([[50.8, 76.2], [220.98, 220.98], [63.5, 69.85]])),
            (Hardpoint::LowerBall, Bound::cartesian([[0.0, 0.0], [-22.352, -22.352], [-82.55, -68.58]])),
            (Hardpoint::UpperBall, Bound::cartesian([[0.0, 0.0], [-44.45, -22.352], [76.2, 88.9]])),
            (Hardpoint::TieRodOuter, Bound::cartesian([[63.5, 72.39], [-31.75, -22.352], [-38.1, 12.7]])),
        ])
    }

    #[test]
    fn test_resolve_axis_endpoints_and_midpoint() {
        assert!((resolve_axis(10.0, 20.0, 0.0) - 10.0).abs() < 1e-12);
        assert!((resolve_axis(10.0, 20.0, 1.0) - 20.0).abs() < 1e-12);
        assert!((resolve_axis(10.0, 20.0, 0.5) - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_axis_ignores_sample() {
        assert_eq!(resolve_axis(5.0, 5.0, 0.7), 5.0);

        let bound = Bound::cartesian([[5.0, 5.0], [0.0, 10.0], [f64::NAN, f64::NAN]]);
        let sample = Sample::new([0.7, 0.3, 0.9]).unwrap().normalized_against(&bound);
        assert_eq!(sample.values(), [0.0, 0.3, 0.0]);

        let position = bound.resolve(&sample);
        assert!((position - Vector3::new(5.0, 3.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_sample_range_is_checked() {
        assert!(Sample::new([0.0, 0.5, 1.0]).is_ok());
        let err = Sample::new([0.0, 1.5, 0.0]).unwrap_err();
        assert!(err.to_string().contains("sample[Y]"));
    }

    #[test]
    fn test_bound_validation() {
        let ok = Bound::cartesian([[0.0, 1.0], [f64::NAN, f64::NAN], [2.0, 2.0]]);
        assert!(ok.validate("LAF").is_ok());

        let inverted = Bound::cartesian([[0.0, 1.0], [8.7, 8.0], [0.0, 0.0]]);
        let err = inverted.validate("bound.linkage.LAF").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration for bound.linkage.LAF[Y]: min 8.7 exceeds max 8"
        );

        let half_fixed = Bound::cartesian([[f64::NAN, 1.0], [0.0, 0.0], [0.0, 0.0]]);
        assert!(half_fixed.validate("PA").is_err());
    }

    #[test]
    fn test_default_samples_mask_zero_width_bounds() {
        let samples = SampleTable::default_linkage(&example_bounds());
        assert_eq!(samples.get(Hardpoint::LowerFront).values(), [0.0, 1.0, 0.0]);
        assert_eq!(samples.get(Hardpoint::LowerRear).values(), [0.0, 0.0, 0.0]);
        assert_eq!(samples.get(Hardpoint::UpperBall).values(), [0.0, 0.0, 1.0]);
        assert_eq!(samples.get(Hardpoint::TieRodOuter).values(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_inheritance_fires_on_unspecified_rows() {
        let input = example_bounds();
        let resolved = resolve_linkage_bounds(&input).unwrap();

        assert_eq!(resolved.inherited, INHERITANCE_RULES.to_vec());
        assert_eq!(resolved.get(Hardpoint::LowerRear).unwrap().row(Axis::Y), [203.2, 220.98]);
        assert_eq!(resolved.get(Hardpoint::UpperFront).unwrap().row(Axis::X), [127.0, 127.0]);
        assert_eq!(resolved.get(Hardpoint::UpperRear).unwrap().row(Axis::X), [-127.0, -127.0]);
        assert_eq!(resolved.get(Hardpoint::UpperRear).unwrap().row(Axis::Y), [220.98, 254.0]);

        // Input untouched
        assert_eq!(input[&Hardpoint::LowerRear].row(Axis::Y), [0.0, 0.0]);
    }

    #[test]
    fn test_specified_rows_are_not_inherited() {
        let mut input = example_bounds();
        input.insert(
            Hardpoint::LowerRear,
            Bound::cartesian([[-127.0, -127.0], [190.0, 200.0], [12.7, 38.1]]),
        );
        let resolved = resolve_linkage_bounds(&input).unwrap();
        assert!(!resolved
            .inherited
            .iter()
            .any(|rule| rule.dependent == Hardpoint::LowerRear));
    }

    #[test]
    fn test_inherited_positions_follow_sibling() {
        let resolved = resolve_linkage_bounds(&example_bounds()).unwrap();
        let mut samples = SampleTable::default();
        samples.set(Hardpoint::LowerFront, Sample::new([0.0, 0.5, 0.5]).unwrap());
        samples.set(Hardpoint::LowerRear, Sample::new([0.0, 1.0, 0.0]).unwrap());
        samples.set(Hardpoint::UpperFront, Sample::new([0.0, 1.0, 0.0]).unwrap());

        let positions = resolve_linkage_positions(&resolved, &samples).unwrap();
        let laf = positions[&Hardpoint::LowerFront];
        let lar = positions[&Hardpoint::LowerRear];
        let uaf = positions[&Hardpoint::UpperFront];
        let uar = positions[&Hardpoint::UpperRear];

        assert!((laf.y - 212.09).abs() < 1e-9);
        assert!((lar.y - laf.y).abs() < 1e-12);
        assert!((uaf.x - laf.x).abs() < 1e-12);
        assert!((uaf.y - 254.0).abs() < 1e-12);
        assert!((uar.x - lar.x).abs() < 1e-12);
        assert!((uar.y - uaf.y).abs() < 1e-12);
    }

    #[test]
    fn test_missing_bound_is_reported() {
        let mut input = example_bounds();
        input.remove(&Hardpoint::TieRodOuter);
        let err = resolve_linkage_bounds(&input).unwrap_err();
        assert!(err.to_string().contains("bound.linkage.TB"));
    }

    #[test]
    fn test_linkage_bounds_must_be_cartesian() {
        let mut input = example_bounds();
        input.insert(
            Hardpoint::LowerBall,
            Bound {
                convention: Convention::Radial,
                rows: [[0.0, 0.0], [1.0, 2.0], [0.0, 0.0]],
            },
        );
        assert!(resolve_linkage_bounds(&input).is_err());
    }

    #[test]
    fn test_hardpoint_keys_round_trip() {
        for hp in Hardpoint::ALL {
            assert_eq!(hp.key().parse::<Hardpoint>().unwrap(), hp);
        }
        assert_eq!(Hardpoint::LowerBall.owner_frame(), "W");
        assert_eq!(Hardpoint::TieRodInner.owner_frame(), "X");
    }

    #[test]
    fn test_bound_yaml_shapes() {
        let bare: Bound = serde_yml::from_str("[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]").unwrap();
        assert_eq!(bare.convention, Convention::Cartesian);
        assert_eq!(bare.row(Axis::Z), [5.0, 6.0]);

        let radial: Bound =
            serde_yml::from_str("convention: radial\nrows: [[.nan, .nan], [50.8, 101.6], [.nan, .nan]]")
                .unwrap();
        assert_eq!(radial.convention, Convention::Radial);
        assert!(radial.is_fixed(Axis::X));
        assert!(!radial.is_fixed(Axis::Y));
    }
}
