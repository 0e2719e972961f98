//! Plain, serializable views of a resolved design

use serde::Serialize;

use crate::core::frame::{FrameGraph, FrameId};
use crate::core::linkage::Subsystem;
use crate::core::sampling::{Bound, Hardpoint, Inheritance};

/// One resolved hardpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HardpointReport {
    pub hardpoint: Hardpoint,
    pub title: String,
    /// Key of the frame the local position is expressed in
    pub frame: String,
    pub local: [f64; 3],
    pub world: [f64; 3],
    /// Effective bound after inheritance
    pub bound: Bound,
}

/// Kinematic quantities derived from a resolved linkage
///
/// Points are in root (intermediate frame) coordinates. `None` marks a
/// quantity at infinity, e.g. a side-view instant center when the instant
/// axis runs parallel to the vehicle's lateral axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedKinematics {
    /// Swing-arm length implied by the camber gain target
    pub fvsa_target: f64,
    /// Roll center implied by the roll center height target
    pub roll_center_target: [f64; 3],

    pub contact_patch: [f64; 3],
    pub front_instant_center: Option<[f64; 3]>,
    pub side_instant_center: Option<[f64; 3]>,
    pub roll_center: Option<[f64; 3]>,
    pub pitch_center: Option<[f64; 3]>,
    /// Lateral distance from the contact patch to the front instant center
    pub fvsa: Option<f64>,

    pub kpi: f64,
    pub caster: f64,
    /// Lateral offset of the steering axis ground point inboard of the contact patch
    pub scrub_radius: Option<f64>,
}

/// Result of generating one subsystem
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignReport {
    pub subsystem: Subsystem,
    pub hardpoints: Vec<HardpointReport>,
    pub inherited: Vec<Inheritance>,
    pub kinematics: DerivedKinematics,
}

/// One frame of the graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub key: String,
    pub title: String,
    pub parent: Option<String>,
    pub path: Vec<String>,
    pub dof: String,
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub points: Vec<String>,
}

impl FrameReport {
    pub fn from_graph(graph: &FrameGraph, id: FrameId) -> Self {
        let frame = graph.frame(id);
        let path = graph
            .path_keys(id)
            .map(|keys| keys.into_iter().map(String::from).collect())
            .unwrap_or_default();

        Self {
            key: frame.key().to_string(),
            title: frame.title().to_string(),
            parent: frame.parent().map(|p| graph.frame(p).key().to_string()),
            path,
            dof: frame.dof().to_string(),
            position: (*frame.position()).into(),
            rotation: frame.rotation().angles(),
            points: frame.points().iter().map(|p| p.key.clone()).collect(),
        }
    }
}

/// Full state of a kinematic system
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemSnapshot {
    pub name: String,
    pub frames: Vec<FrameReport>,
    pub designs: Vec<DesignReport>,
}
