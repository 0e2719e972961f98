//! Error taxonomy for kinematic design
//!
//! All conditions here indicate a design or configuration error rather than a
//! transient fault, so callers are expected to fail fast and surface the
//! context (hardpoint, frame, axis) back to whoever wrote the inputs.

use miette::Diagnostic;
use thiserror::Error;

/// Result alias used throughout the kinematic core
pub type Result<T, E = KinematicError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum KinematicError {
    /// An enum-like label, bound, sample or index set is not acceptable
    #[error("Invalid configuration for {field}: {reason}")]
    #[diagnostic(code(susp::invalid_configuration))]
    InvalidConfiguration { field: String, reason: String },

    /// A geometric construction has no unique solution
    #[error("Degenerate geometry in {context}: {reason}")]
    #[diagnostic(
        code(susp::degenerate_geometry),
        help("check the bounds and samples of the hardpoints involved for coincident or collinear points")
    )]
    DegenerateGeometry { context: String, reason: String },

    /// Two-angle alignment would need an arcsine outside [-1, 1]
    #[error("Vectors can not be aligned with two Euler angles (arcsine argument {ratio:.6})")]
    #[diagnostic(code(susp::unalignable_vectors))]
    UnalignableVectors { ratio: f64 },

    /// No generator exists for the requested kind
    #[error("Unsupported {subsystem} type: '{kind}'")]
    #[diagnostic(
        code(susp::unsupported_type),
        help("only the 'Double Wishbone' linkage currently has an initializer and a generator")
    )]
    UnsupportedLinkageType { subsystem: String, kind: String },

    #[error("Frame not found: {name}")]
    #[diagnostic(code(susp::unknown_frame))]
    UnknownFrame { name: String },

    #[error("Point of interest '{point}' not found in frame {frame}")]
    #[diagnostic(code(susp::unknown_point))]
    UnknownPoint { frame: String, point: String },

    /// The frame graph is not a single rooted tree
    #[error("Invalid frame graph: {reason}")]
    #[diagnostic(code(susp::invalid_graph))]
    InvalidGraph { reason: String },
}

impl KinematicError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        KinematicError::InvalidConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn degenerate(context: impl Into<String>, reason: impl Into<String>) -> Self {
        KinematicError::DegenerateGeometry {
            context: context.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported(subsystem: impl Into<String>, kind: impl Into<String>) -> Self {
        KinematicError::UnsupportedLinkageType {
            subsystem: subsystem.into(),
            kind: kind.into(),
        }
    }

    /// Prefix the error's context with the construct that was being built
    ///
    /// Used by the generator so a collinear-plane failure reports which
    /// wishbone it came from.
    pub fn within(self, outer: &str) -> Self {
        match self {
            KinematicError::DegenerateGeometry { context, reason } => {
                KinematicError::DegenerateGeometry {
                    context: format!("{} ({})", outer, context),
                    reason,
                }
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = KinematicError::invalid("bound.linkage.LAF[y]", "min 8.7 exceeds max 8.0");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for bound.linkage.LAF[y]: min 8.7 exceeds max 8.0"
        );

        let err = KinematicError::unsupported("linkage", "MacPherson");
        assert_eq!(err.to_string(), "Unsupported linkage type: 'MacPherson'");
    }

    #[test]
    fn test_within_prefixes_degenerate_context() {
        let err = KinematicError::degenerate("Plane", "points are collinear").within("lower A-arm");
        match err {
            KinematicError::DegenerateGeometry { context, .. } => {
                assert_eq!(context, "lower A-arm (Plane)");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = KinematicError::UnalignableVectors { ratio: 2.0 }.within("anything");
        assert!(matches!(err, KinematicError::UnalignableVectors { .. }));
    }
}
