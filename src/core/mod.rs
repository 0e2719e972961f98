//! Core module - geometry, frame graph, sampling and design generation

pub mod double_wishbone;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod linkage;
pub mod report;
pub mod rotation;
pub mod sampling;
pub mod system;

pub use double_wishbone::DoubleWishbone;
pub use error::{KinematicError, Result};
pub use frame::{DofMask, Frame, FrameGraph, FrameId, PointOfInterest};
pub use geometry::{Line, Plane};
pub use linkage::{Axle, LinkageDesign, LinkageKind, SpringKind, StrutKind, Subsystem};
pub use report::{DerivedKinematics, DesignReport, FrameReport, HardpointReport, SystemSnapshot};
pub use rotation::{
    vector_alignment_angles, vector_alignment_rotation, AngleUnit, Axis, EulerRotation, Sequence,
};
pub use sampling::{
    resolve_axis, resolve_linkage_bounds, resolve_linkage_positions, Bound, Convention, Hardpoint,
    Sample, SampleTable,
};
pub use system::KinematicSystem;
