//! Subsystem kinds and the design interface each linkage implements
//!
//! Type labels arrive as strings from configuration and are parsed into closed
//! enumerations here. Only [`LinkageKind::DoubleWishbone`] has an initializer
//! and generator; strut and spring kinds are recognized but have none yet.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::double_wishbone::DoubleWishbone;
use crate::core::error::{KinematicError, Result};
use crate::core::frame::FrameGraph;
use crate::core::report::DesignReport;
use crate::core::sampling::SampleTable;
use crate::entities::bound::BoundSet;
use crate::entities::target::Target;

/// Independently generated part of a suspension
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Subsystem {
    Linkage,
    Strut,
    Spring,
}

impl Subsystem {
    /// Generation order used when every subsystem is requested
    pub const ALL: [Subsystem; 3] = [Subsystem::Linkage, Subsystem::Strut, Subsystem::Spring];
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subsystem::Linkage => write!(f, "linkage"),
            Subsystem::Strut => write!(f, "strut"),
            Subsystem::Spring => write!(f, "spring"),
        }
    }
}

impl FromStr for Subsystem {
    type Err = KinematicError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "linkage" => Ok(Subsystem::Linkage),
            "strut" => Ok(Subsystem::Strut),
            "spring" => Ok(Subsystem::Spring),
            _ => Err(KinematicError::invalid(
                "subsystem",
                format!("'{}' is not one of linkage, strut, spring", s),
            )),
        }
    }
}

/// Which axle the corner belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axle {
    Front,
    Rear,
}

impl fmt::Display for Axle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axle::Front => write!(f, "Front"),
            Axle::Rear => write!(f, "Rear"),
        }
    }
}

impl FromStr for Axle {
    type Err = KinematicError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Front" => Ok(Axle::Front),
            "Rear" => Ok(Axle::Rear),
            _ => Err(KinematicError::invalid(
                "target.type.axle",
                format!("axle type '{}' not recognized, use 'Front' or 'Rear'", s),
            )),
        }
    }
}

/// Linkage types with an initializer and a generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkageKind {
    DoubleWishbone,
}

impl LinkageKind {
    pub fn label(self) -> &'static str {
        match self {
            LinkageKind::DoubleWishbone => "Double Wishbone",
        }
    }

    /// Initializer and generator for this kind
    pub fn design(self) -> &'static dyn LinkageDesign {
        match self {
            LinkageKind::DoubleWishbone => &DoubleWishbone,
        }
    }
}

impl fmt::Display for LinkageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for LinkageKind {
    type Err = KinematicError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Double Wishbone" => Ok(LinkageKind::DoubleWishbone),
            _ => Err(KinematicError::unsupported("linkage", s)),
        }
    }
}

/// Strut types (push/pull rod and similar)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrutKind {
    LowerRod,
    UpperRod,
}

impl StrutKind {
    pub fn label(self) -> &'static str {
        match self {
            StrutKind::LowerRod => "Lower Rod",
            StrutKind::UpperRod => "Upper Rod",
        }
    }
}

impl fmt::Display for StrutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for StrutKind {
    type Err = KinematicError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Lower Rod" => Ok(StrutKind::LowerRod),
            "Upper Rod" => Ok(StrutKind::UpperRod),
            _ => Err(KinematicError::invalid(
                "target.type.strut",
                format!("strut type '{}' not recognized, use 'Lower Rod' or 'Upper Rod'", s),
            )),
        }
    }
}

/// Spring types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpringKind {
    Ride,
    AntiRollBar,
}

impl SpringKind {
    pub fn label(self) -> &'static str {
        match self {
            SpringKind::Ride => "Ride",
            SpringKind::AntiRollBar => "ARB",
        }
    }
}

impl fmt::Display for SpringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SpringKind {
    type Err = KinematicError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Ride" => Ok(SpringKind::Ride),
            "ARB" => Ok(SpringKind::AntiRollBar),
            _ => Err(KinematicError::invalid(
                "target.type.spring",
                format!("spring type '{}' not recognized, use 'Ride' or 'ARB'", s),
            )),
        }
    }
}

/// Initialize and resolve one linkage type
pub trait LinkageDesign {
    /// Build the default frame graph and sample table
    ///
    /// Samples on axes whose bound has zero width start at 0.
    fn initialize(&self, bounds: &BoundSet) -> Result<(FrameGraph, SampleTable)>;

    /// Place every frame and hardpoint for one design instance
    ///
    /// Writes static transforms and point positions into `graph`. Callers that
    /// need all-or-nothing semantics pass a scratch copy.
    fn resolve(
        &self,
        graph: &mut FrameGraph,
        target: &Target,
        bounds: &BoundSet,
        samples: &SampleTable,
    ) -> Result<DesignReport>;
}
