//! SUSP: Suspension Design Toolkit
//!
//! Kinematic design of double wishbone suspension linkages: a tree of rigid
//! frames carrying named hardpoints, a bounds-and-samples model of the design
//! space, and a generator that resolves one concrete geometry from a set of
//! vehicle and kinematic targets.

pub mod cli;
pub mod core;
pub mod entities;
pub mod yaml;
