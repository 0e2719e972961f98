//! Euler / Tait-Bryan rotations and vector alignment
//!
//! [`EulerRotation`] stores three angles indexed by the axis they rotate
//! about (x, y, z) together with an intrinsic sequence and an angle unit.
//! The rotation operator is built lazily and cached; any mutation of an angle,
//! the sequence or the unit clears the sync flag so the next use rebuilds it.

use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix3, Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};

use crate::core::error::{KinematicError, Result};
use crate::core::geometry::{skew_symmetric_matrix, GEOMETRY_TOLERANCE};

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit_vector(self) -> Unit<Vector3<f64>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'X' => Some(Axis::X),
            'Y' => Some(Axis::Y),
            'Z' => Some(Axis::Z),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
            Axis::Z => write!(f, "Z"),
        }
    }
}

fn parse_axes(s: &str, expected: usize) -> Result<Vec<Axis>> {
    let axes: Option<Vec<Axis>> = s.chars().map(Axis::from_char).collect();
    let axes = axes.ok_or_else(|| {
        KinematicError::invalid("rotation sequence", format!("'{}' contains an unknown axis", s))
    })?;

    if axes.len() != expected {
        return Err(KinematicError::invalid(
            "rotation sequence",
            format!("'{}' must name exactly {} axes", s, expected),
        ));
    }
    for (i, a) in axes.iter().enumerate() {
        if axes[..i].contains(a) {
            return Err(KinematicError::invalid(
                "rotation sequence",
                format!("'{}' repeats axis {}", s, a),
            ));
        }
    }
    Ok(axes)
}

/// Intrinsic Tait-Bryan rotation sequence (three distinct axes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sequence([Axis; 3]);

impl Sequence {
    pub const ZYX: Sequence = Sequence([Axis::Z, Axis::Y, Axis::X]);
    pub const XYZ: Sequence = Sequence([Axis::X, Axis::Y, Axis::Z]);

    pub fn new(axes: [Axis; 3]) -> Result<Self> {
        if axes[0] == axes[1] || axes[1] == axes[2] || axes[0] == axes[2] {
            return Err(KinematicError::invalid(
                "rotation sequence",
                format!("{}{}{} repeats an axis", axes[0], axes[1], axes[2]),
            ));
        }
        Ok(Self(axes))
    }

    pub fn axes(&self) -> [Axis; 3] {
        self.0
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Sequence::ZYX
    }
}

impl FromStr for Sequence {
    type Err = KinematicError;

    fn from_str(s: &str) -> Result<Self> {
        let axes = parse_axes(s, 3)?;
        Sequence::new([axes[0], axes[1], axes[2]])
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.0[0], self.0[1], self.0[2])
    }
}

/// Unit of the stored angles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    Degrees,
    Radians,
}

impl AngleUnit {
    fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnit::Degrees => angle.to_radians(),
            AngleUnit::Radians => angle,
        }
    }
}

/// Euler / Tait-Bryan angle rotation with a cached operator
#[derive(Debug, Clone)]
pub struct EulerRotation {
    /// Angles about the x, y and z axes
    angles: [f64; 3],
    sequence: Sequence,
    unit: AngleUnit,
    synced: Cell<bool>,
    operator: Cell<Rotation3<f64>>,
}

impl EulerRotation {
    pub fn new(angles: [f64; 3], sequence: Sequence, unit: AngleUnit) -> Self {
        Self {
            angles,
            sequence,
            unit,
            synced: Cell::new(false),
            operator: Cell::new(Rotation3::identity()),
        }
    }

    /// Z-Y-X rotation with angles in radians
    pub fn radians(angles: [f64; 3]) -> Self {
        Self::new(angles, Sequence::ZYX, AngleUnit::Radians)
    }

    /// Z-Y-X rotation with angles in degrees
    pub fn degrees(angles: [f64; 3]) -> Self {
        Self::new(angles, Sequence::ZYX, AngleUnit::Degrees)
    }

    pub fn angles(&self) -> [f64; 3] {
        self.angles
    }

    pub fn angle(&self, axis: Axis) -> f64 {
        self.angles[axis.index()]
    }

    pub fn set_angle(&mut self, axis: Axis, value: f64) {
        self.angles[axis.index()] = value;
        self.synced.set(false);
    }

    pub fn set_angles(&mut self, angles: [f64; 3]) {
        self.angles = angles;
        self.synced.set(false);
    }

    pub fn sequence(&self) -> Sequence {
        self.sequence
    }

    pub fn set_sequence(&mut self, sequence: Sequence) {
        self.sequence = sequence;
        self.synced.set(false);
    }

    pub fn unit(&self) -> AngleUnit {
        self.unit
    }

    pub fn set_unit(&mut self, unit: AngleUnit) {
        self.unit = unit;
        self.synced.set(false);
    }

    /// Whether the cached operator reflects the current angles
    pub fn is_synced(&self) -> bool {
        self.synced.get()
    }

    fn build_operator(&self) -> Rotation3<f64> {
        self.sequence
            .axes()
            .iter()
            .fold(Rotation3::identity(), |acc, axis| {
                let angle = self.unit.to_radians(self.angles[axis.index()]);
                acc * Rotation3::from_axis_angle(&axis.unit_vector(), angle)
            })
    }

    /// Rotation operator, rebuilt first if the cache is stale
    pub fn operator(&self) -> Rotation3<f64> {
        if !self.synced.get() {
            self.operator.set(self.build_operator());
            self.synced.set(true);
        }
        self.operator.get()
    }

    /// Apply the forward (or inverse) rotation to a vector
    pub fn apply(&self, vector: &Vector3<f64>, inverse: bool) -> Vector3<f64> {
        let operator = self.operator();
        if inverse {
            operator.inverse_transform_vector(vector)
        } else {
            operator * vector
        }
    }

    pub fn as_matrix(&self) -> Matrix3<f64> {
        self.operator().into_inner()
    }
}

impl Default for EulerRotation {
    fn default() -> Self {
        Self::radians([0.0; 3])
    }
}

impl PartialEq for EulerRotation {
    fn eq(&self, other: &Self) -> bool {
        self.angles == other.angles && self.sequence == other.sequence && self.unit == other.unit
    }
}

impl fmt::Display for EulerRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EulerRotation([{}, {}, {}], {}, degrees={}, synced={})",
            self.angles[0],
            self.angles[1],
            self.angles[2],
            self.sequence,
            self.unit == AngleUnit::Degrees,
            self.synced.get()
        )
    }
}

/// +1 if (i0, i1, i2) is a cyclic permutation of (0, 1, 2), -1 otherwise
fn handedness(i0: usize, i1: usize) -> f64 {
    if (i0 + 1) % 3 == i1 {
        1.0
    } else {
        -1.0
    }
}

/// Two Euler angles that rotate `v1` onto the direction of `v2`
///
/// `sequence` names two distinct axes `[a, b]`. The result `[θ, φ]` satisfies
/// `R_a(θ) · R_b(φ) · v1 = v2 · |v1| / |v2|`: an elevation rotation about `b`
/// followed by an azimuthal rotation about `a`. Fails with
/// [`KinematicError::UnalignableVectors`] when the elevation needs an arcsine
/// argument outside [-1, 1].
pub fn vector_alignment_angles(
    v1: &Vector3<f64>,
    v2: &Vector3<f64>,
    sequence: [Axis; 2],
) -> Result<[f64; 2]> {
    if sequence[0] == sequence[1] {
        return Err(KinematicError::invalid(
            "alignment sequence",
            format!("{}{} repeats an axis", sequence[0], sequence[1]),
        ));
    }

    let r1 = v1.norm();
    let r2 = v2.norm();
    if r1 <= GEOMETRY_TOLERANCE || r2 <= GEOMETRY_TOLERANCE {
        return Err(KinematicError::degenerate(
            "vector_alignment_angles",
            "input vectors must be non-zero",
        ));
    }

    let i0 = sequence[0].index();
    let i1 = sequence[1].index();
    let i2 = 3 - i0 - i1;

    // Components named by role: z about the first axis, x about the second
    let (z1, x1, y1) = (v1[i0], v1[i1], v1[i2]);
    let scale = r1 / r2;
    let (z2, x2, y2) = (v2[i0] * scale, v2[i1] * scale, v2[i2] * scale);

    // Elevation
    let rho1 = (z1 * z1 + y1 * y1).sqrt();
    let ratio = if rho1 > GEOMETRY_TOLERANCE * r1 {
        z2 / rho1
    } else if z2.abs() <= GEOMETRY_TOLERANCE * r1 {
        0.0
    } else {
        f64::INFINITY
    };
    if ratio.abs() > 1.0 + 1e-12 {
        return Err(KinematicError::UnalignableVectors { ratio });
    }
    let phi = ratio.clamp(-1.0, 1.0).asin() - z1.atan2(y1);

    let (s, c) = phi.sin_cos();
    let (y1, _z1) = (y1 * c - z1 * s, y1 * s + z1 * c);

    // Azimuth
    let theta = y2.atan2(x2) - y1.atan2(x1);

    let sign = handedness(i0, i1);
    Ok([theta * sign, phi * sign])
}

/// Minimal rotation mapping the direction of `v_a` onto the direction of `v_b`
///
/// Acute pairs use Rodrigues' formula `R = I + [v]× + [v]×² / (1 + c)` with
/// `v = â × b̂` and `c = â · b̂`. Obtuse pairs use the axis-angle form about `v`
/// with angle `atan2(|v|, c)`, since `1 + c` vanishes as the vectors become
/// antiparallel. Exactly antiparallel inputs become a half turn about an axis
/// perpendicular to `v_a`.
pub fn vector_alignment_rotation(v_a: &Vector3<f64>, v_b: &Vector3<f64>) -> Result<Rotation3<f64>> {
    let la = v_a.norm();
    let lb = v_b.norm();
    if la <= GEOMETRY_TOLERANCE || lb <= GEOMETRY_TOLERANCE {
        return Err(KinematicError::degenerate(
            "vector_alignment_rotation",
            "input vectors must be non-zero",
        ));
    }

    let a = v_a / la;
    let b = v_b / lb;
    let v = a.cross(&b);
    let s = v.norm();
    let c = a.dot(&b);

    if c >= 0.0 {
        if s <= GEOMETRY_TOLERANCE {
            return Ok(Rotation3::identity());
        }
        let k = skew_symmetric_matrix(&v);
        let r = Matrix3::identity() + k + (k * k) / (1.0 + c);
        return Ok(Rotation3::from_matrix_unchecked(r));
    }

    let axis = if s > ANTIPARALLEL_TOLERANCE {
        Unit::new_unchecked(v / s)
    } else {
        // Pick the coordinate axis least aligned with a
        let pick = if a.x.abs() < a.y.abs() && a.x.abs() < a.z.abs() {
            Vector3::x()
        } else if a.y.abs() < a.z.abs() {
            Vector3::y()
        } else {
            Vector3::z()
        };
        Unit::new_normalize(a.cross(&pick))
    };
    Ok(Rotation3::from_axis_angle(&axis, s.atan2(c)))
}

/// Below this cross product norm the rotation axis of an obtuse pair is noise
const ANTIPARALLEL_TOLERANCE: f64 = 1e-12;
