//! Design targets - vehicle geometry, suspension types and linkage kinematic goals
//!
//! All lengths are millimetres and all angles radians. Gains are per millimetre
//! of wheel travel.

use serde::{Deserialize, Serialize};

use crate::core::error::{KinematicError, Result};
use crate::core::linkage::{Axle, LinkageKind, SpringKind, StrutKind};

/// Complete target configuration for one suspension corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Target {
    pub vehicle: VehicleTarget,

    #[serde(rename = "type")]
    pub types: TypeTarget,

    pub linkage: LinkageTarget,

    #[serde(default)]
    pub spring: SpringTarget,
}

/// Static / nominal vehicle parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleTarget {
    pub wheelbase: f64,

    /// `[front %, left %]`
    pub weight_distribution: [f64; 2],

    /// Sprung mass (kg)
    #[serde(default)]
    pub sprung_mass: f64,

    pub cg_height: f64,
    pub ride_height: f64,
    pub rake: f64,
    pub loaded_radius: f64,
}

impl VehicleTarget {
    pub fn front_weight_pct(&self) -> f64 {
        self.weight_distribution[0]
    }
}

/// Suspension type labels, kept as strings until the system parses them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeTarget {
    pub axle: String,
    pub linkage: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strut: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spring: Vec<String>,
}

/// Double wishbone kinematic targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkageTarget {
    pub track: f64,

    /// Static toe, positive out
    pub toe: f64,

    /// Front-to-back pitch center height as % of CG height
    pub pitch_center: f64,

    pub caster: f64,
    pub caster_gain: f64,

    /// Roll center height as % of CG height
    pub roll_center: f64,

    pub camber: f64,
    pub camber_gain: f64,

    /// Maximum scrub
    pub scrub: f64,

    /// Kingpin inclination
    pub kpi: f64,
}

/// Spring and anti-roll bar motion ratios
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpringTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ride_ratio: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arb_ratio: Option<f64>,
}

impl Target {
    pub fn axle(&self) -> Result<Axle> {
        self.types.axle.parse()
    }

    pub fn linkage_kind(&self) -> Result<LinkageKind> {
        self.types.linkage.parse()
    }

    pub fn strut_kind(&self) -> Result<StrutKind> {
        match &self.types.strut {
            Some(label) => label.parse(),
            None => Err(KinematicError::invalid(
                "target.type.strut",
                "no strut type given",
            )),
        }
    }

    pub fn spring_kinds(&self) -> Result<Vec<SpringKind>> {
        if self.types.spring.is_empty() {
            return Err(KinematicError::invalid(
                "target.type.spring",
                "no spring type given",
            ));
        }
        self.types.spring.iter().map(|label| label.parse()).collect()
    }

    /// Check the numeric targets are physically meaningful
    pub fn validate(&self) -> Result<()> {
        let v = &self.vehicle;
        let l = &self.linkage;

        let finite = [
            ("target.vehicle.wheelbase", v.wheelbase),
            ("target.vehicle.cg_height", v.cg_height),
            ("target.vehicle.ride_height", v.ride_height),
            ("target.vehicle.rake", v.rake),
            ("target.vehicle.loaded_radius", v.loaded_radius),
            ("target.linkage.track", l.track),
            ("target.linkage.toe", l.toe),
            ("target.linkage.pitch_center", l.pitch_center),
            ("target.linkage.caster", l.caster),
            ("target.linkage.caster_gain", l.caster_gain),
            ("target.linkage.roll_center", l.roll_center),
            ("target.linkage.camber", l.camber),
            ("target.linkage.camber_gain", l.camber_gain),
            ("target.linkage.scrub", l.scrub),
            ("target.linkage.kpi", l.kpi),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(KinematicError::invalid(field, format!("{} is not finite", value)));
            }
        }

        let positive = [
            ("target.vehicle.wheelbase", v.wheelbase),
            ("target.vehicle.loaded_radius", v.loaded_radius),
            ("target.linkage.track", l.track),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(KinematicError::invalid(field, format!("{} must be positive", value)));
            }
        }

        for (i, pct) in v.weight_distribution.iter().enumerate() {
            if !(0.0..=100.0).contains(pct) {
                return Err(KinematicError::invalid(
                    format!("target.vehicle.weight_distribution[{}]", i),
                    format!("{} is outside [0, 100] %", pct),
                ));
            }
        }

        if l.camber.abs() >= std::f64::consts::FRAC_PI_2 {
            return Err(KinematicError::invalid(
                "target.linkage.camber",
                "static camber must be within ±90°",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::design::DesignFile;

    #[test]
    fn test_example_target_is_valid() {
        let target = DesignFile::example().target;
        assert!(target.validate().is_ok());
        assert_eq!(target.axle().unwrap(), Axle::Front);
        assert_eq!(target.linkage_kind().unwrap(), LinkageKind::DoubleWishbone);
        assert_eq!(target.strut_kind().unwrap(), StrutKind::LowerRod);
        assert_eq!(
            target.spring_kinds().unwrap(),
            vec![SpringKind::Ride, SpringKind::AntiRollBar]
        );
    }

    #[test]
    fn test_non_positive_track_rejected() {
        let mut target = DesignFile::example().target;
        target.linkage.track = 0.0;
        let err = target.validate().unwrap_err();
        assert!(err.to_string().contains("target.linkage.track"));
    }

    #[test]
    fn test_weight_distribution_range() {
        let mut target = DesignFile::example().target;
        target.vehicle.weight_distribution = [120.0, 50.0];
        assert!(target.validate().is_err());
    }

    #[test]
    fn test_missing_strut_type() {
        let mut target = DesignFile::example().target;
        target.types.strut = None;
        assert!(matches!(
            target.strut_kind(),
            Err(KinematicError::InvalidConfiguration { .. })
        ));
    }
}
