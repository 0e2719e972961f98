//! Linear subspaces in 3-space
//!
//! Lines and planes are built from defining points and answer three kinds of
//! query used by the design generator:
//! - evaluation: solve for the remaining coordinate(s) given some of them
//! - projection: orthogonal projection and its perpendicular remainder
//! - intersection: plane ∩ plane as a [`Line`]
//!
//! Degenerate inputs (coincident or collinear points, parallel planes) are
//! reported as [`KinematicError::DegenerateGeometry`] instead of producing
//! NaN-filled results.

use nalgebra::{Matrix2, Matrix3, Vector2, Vector3, Vector4};

use crate::core::error::{KinematicError, Result};

/// Relative tolerance for degeneracy checks
pub const GEOMETRY_TOLERANCE: f64 = 1e-9;

/// Linear interpolation between two points
pub fn lerp(point_a: &Vector3<f64>, point_b: &Vector3<f64>, alpha: f64) -> Vector3<f64> {
    point_a * (1.0 - alpha) + point_b * alpha
}

/// Skew-symmetric cross-product matrix `[v]×` such that `[v]× w = v × w`
pub fn skew_symmetric_matrix(v: &Vector3<f64>) -> Matrix3<f64> {
    Matrix3::new(
        0.0, -v[2], v[1], //
        v[2], 0.0, -v[0], //
        -v[1], v[0], 0.0,
    )
}

fn check_axis(axis: usize, context: &str) -> Result<()> {
    if axis < 3 {
        Ok(())
    } else {
        Err(KinematicError::invalid(
            context,
            format!("axis index {} is out of range (expected 0, 1 or 2)", axis),
        ))
    }
}

/// A 1D line through two points
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    points: [Vector3<f64>; 2],
    basis: Vector3<f64>,
}

impl Line {
    /// Create a line through `point_a` and `point_b`
    ///
    /// Fails if the points coincide, since the direction is then undefined.
    pub fn new(point_a: Vector3<f64>, point_b: Vector3<f64>) -> Result<Self> {
        let delta = point_b - point_a;
        let length = delta.norm();
        let scale = 1.0 + point_a.norm().max(point_b.norm());

        if !length.is_finite() || length <= GEOMETRY_TOLERANCE * scale {
            return Err(KinematicError::degenerate(
                "Line",
                format!(
                    "defining points ({:.6}, {:.6}, {:.6}) and ({:.6}, {:.6}, {:.6}) coincide",
                    point_a[0], point_a[1], point_a[2], point_b[0], point_b[1], point_b[2]
                ),
            ));
        }

        Ok(Self {
            points: [point_a, point_b],
            basis: delta / length,
        })
    }

    /// The two defining points
    pub fn points(&self) -> &[Vector3<f64>; 2] {
        &self.points
    }

    /// Unit direction from the first to the second defining point
    pub fn basis(&self) -> &Vector3<f64> {
        &self.basis
    }

    /// Point on the line whose `axis`-th coordinate equals `query`
    ///
    /// The interpolation parameter is solved from the two defining points'
    /// `axis` components, so the line must not be perpendicular to that axis.
    pub fn evaluate(&self, query: f64, axis: usize) -> Result<Vector3<f64>> {
        check_axis(axis, "Line::evaluate")?;

        let [a, b] = &self.points;
        let span = b[axis] - a[axis];
        if self.basis[axis].abs() <= GEOMETRY_TOLERANCE {
            return Err(KinematicError::degenerate(
                "Line::evaluate",
                format!("line direction has no component along axis {}", axis),
            ));
        }

        let alpha = (query - a[axis]) / span;
        let mut point = lerp(a, b, alpha);
        // exact on the queried axis
        point[axis] = query;
        Ok(point)
    }

    /// Orthogonal projection of `point` onto the line
    pub fn proj(&self, point: &Vector3<f64>) -> Vector3<f64> {
        let origin = &self.points[0];
        origin + self.basis * (point - origin).dot(&self.basis)
    }

    /// Component of `point` perpendicular to its projection onto the line
    pub fn perp(&self, point: &Vector3<f64>) -> Vector3<f64> {
        point - self.proj(point)
    }

    /// Shortest distance from `point` to the line
    pub fn distance(&self, point: &Vector3<f64>) -> f64 {
        let origin = &self.points[0];
        let offset = point - origin;
        (offset - self.basis * offset.dot(&self.basis)).norm()
    }
}

/// A 2D plane in 3-space through three points
///
/// The implicit form `a·x + b·y + c·z + d = 0` is stored as the coefficient
/// vector `(a, b, c, d)`, which spans the null space of the homogeneous
/// system `[pᵢᵀ 1]`. For three non-collinear points that null space is
/// one-dimensional; it is scaled so that `(a, b, c)` is the unit normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    points: [Vector3<f64>; 3],
    coefficients: Vector4<f64>,
}

impl Plane {
    /// Create a plane through three points
    ///
    /// Fails if the points are collinear (null space dimension ≠ 1).
    pub fn new(point_a: Vector3<f64>, point_b: Vector3<f64>, point_c: Vector3<f64>) -> Result<Self> {
        let ab = point_b - point_a;
        let ac = point_c - point_a;
        let normal = ab.cross(&ac);

        let scale = ab.norm() * ac.norm();
        let magnitude = normal.norm();
        if !magnitude.is_finite() || scale == 0.0 || magnitude <= GEOMETRY_TOLERANCE * scale {
            return Err(KinematicError::degenerate(
                "Plane",
                "defining points are collinear or coincident",
            ));
        }

        let n = normal / magnitude;
        let d = -n.dot(&point_a);

        Ok(Self {
            points: [point_a, point_b, point_c],
            coefficients: Vector4::new(n[0], n[1], n[2], d),
        })
    }

    /// The three defining points
    pub fn points(&self) -> &[Vector3<f64>; 3] {
        &self.points
    }

    /// Implicit equation coefficients `(a, b, c, d)`
    pub fn coefficients(&self) -> &Vector4<f64> {
        &self.coefficients
    }

    /// Unit normal
    pub fn normal(&self) -> Vector3<f64> {
        self.coefficients.fixed_rows::<3>(0).into_owned()
    }

    /// Signed distance of `point` from the plane along the normal
    pub fn signed_distance(&self, point: &Vector3<f64>) -> f64 {
        self.normal().dot(point) + self.coefficients[3]
    }

    /// Solve the implicit equation for the omitted coordinate
    ///
    /// `axes` names the two given coordinates in ascending order, e.g.
    /// `[0, 1]` supplies x and y and solves for z.
    pub fn evaluate(&self, query: [f64; 2], axes: [usize; 2]) -> Result<Vector3<f64>> {
        check_axis(axes[0], "Plane::evaluate")?;
        check_axis(axes[1], "Plane::evaluate")?;
        if axes[0] >= axes[1] {
            return Err(KinematicError::invalid(
                "Plane::evaluate",
                format!("index set {:?} must be two distinct ascending axes", axes),
            ));
        }

        let omitted = 3 - axes[0] - axes[1];
        let c = &self.coefficients;
        if c[omitted].abs() <= GEOMETRY_TOLERANCE {
            return Err(KinematicError::degenerate(
                "Plane::evaluate",
                format!("plane is parallel to axis {}", omitted),
            ));
        }

        let mut point = Vector3::zeros();
        point[axes[0]] = query[0];
        point[axes[1]] = query[1];
        point[omitted] = (-c[3] - c[axes[0]] * query[0] - c[axes[1]] * query[1]) / c[omitted];
        Ok(point)
    }

    /// Line of intersection with another plane
    ///
    /// One coordinate is used as the line parameter and fixed at 0 and 1; the
    /// remaining 2×2 system is solved at both values. The parameter axis is
    /// the one whose complementary 2×2 minor has the largest determinant,
    /// which is the best-conditioned of the three choices.
    pub fn intersection(&self, other: &Plane) -> Result<Line> {
        let direction = self.normal().cross(&other.normal());
        let j = direction.iamax();

        if direction[j].abs() <= GEOMETRY_TOLERANCE {
            return Err(KinematicError::degenerate(
                "Plane::intersection",
                "planes are parallel",
            ));
        }

        let (k0, k1) = match j {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        };

        let c1 = &self.coefficients;
        let c2 = &other.coefficients;
        let reduced = Matrix2::new(c1[k0], c1[k1], c2[k0], c2[k1]);
        let inverse = reduced.try_inverse().ok_or_else(|| {
            KinematicError::degenerate("Plane::intersection", "reduced system is singular")
        })?;

        let solve_at = |t: f64| {
            let rhs = Vector2::new(-(c1[3] + c1[j] * t), -(c2[3] + c2[j] * t));
            let solution = inverse * rhs;
            let mut point = Vector3::zeros();
            point[j] = t;
            point[k0] = solution[0];
            point[k1] = solution[1];
            point
        };

        Line::new(solve_at(0.0), solve_at(1.0))
    }

    /// Orthogonal projection of `point` onto the plane
    pub fn proj(&self, point: &Vector3<f64>) -> Vector3<f64> {
        point - self.perp(point)
    }

    /// Component of `point` along the normal, measured from the plane
    pub fn perp(&self, point: &Vector3<f64>) -> Vector3<f64> {
        let n = self.normal();
        n * (point - self.points[0]).dot(&n)
    }
}
