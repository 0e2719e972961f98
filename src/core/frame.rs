//! Frame graph - the kinematic chain as a tree of rigid reference frames
//!
//! Frames live in an arena and are addressed by [`FrameId`]. Parent links are
//! stored as indices, edges are added once while the graph is being built,
//! and [`FrameGraph::build_paths`] then seals the graph and caches the
//! root→frame path of every frame for composing world transforms.
//!
//! Each frame carries a 6-entry DoF mask `[u, v, w, α, β, γ]`
//! (3 translations + 3 rotations). Static placement (`set_position`,
//! `set_rotation`) defines a frame's transform; motion (`translate`, `rotate`)
//! only ever changes DoF-free components.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use tracing::warn;

use crate::core::error::{KinematicError, Result};
use crate::core::rotation::{Axis, EulerRotation};

/// DOF indices for clarity
pub const DOF_U: usize = 0;
pub const DOF_V: usize = 1;
pub const DOF_W: usize = 2;
pub const DOF_ALPHA: usize = 3;
pub const DOF_BETA: usize = 4;
pub const DOF_GAMMA: usize = 5;

/// DOF names for display
pub const DOF_NAMES: [&str; 6] = ["u", "v", "w", "α", "β", "γ"];

/// Length of the axis markers placed on every frame (mm)
pub const AXIS_MARKER_LENGTH: f64 = 25.0;

/// Which of the six rigid-body components of a frame may move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DofMask([bool; 6]);

impl DofMask {
    /// Fully constrained frame
    pub const LOCKED: DofMask = DofMask([false; 6]);

    pub fn new(mask: [bool; 6]) -> Self {
        Self(mask)
    }

    /// Build from 0/1 flags, e.g. `[1, 1, 0, 1, 0, 1]`
    pub fn from_flags(flags: [u8; 6]) -> Self {
        Self(flags.map(|f| f != 0))
    }

    pub fn is_free(&self, dof: usize) -> bool {
        self.0.get(dof).copied().unwrap_or(false)
    }

    pub fn free_dofs(&self) -> Vec<usize> {
        (0..6).filter(|&dof| self.0[dof]).collect()
    }

    pub fn as_array(&self) -> [bool; 6] {
        self.0
    }
}

impl fmt::Display for DofMask {
    /// Free DoFs by name, locked ones as `·`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = (0..6)
            .map(|dof| if self.0[dof] { DOF_NAMES[dof] } else { "·" })
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// A named point fixed in its owning frame
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    pub key: String,
    pub title: String,
    /// Position in the owning frame's coordinates
    pub position: Vector3<f64>,
}

impl PointOfInterest {
    pub fn new(key: impl Into<String>, title: impl Into<String>, position: Vector3<f64>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            position,
        }
    }
}

/// Stable handle of a frame inside a [`FrameGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(usize);

impl FrameId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A rigid reference frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    key: String,
    title: String,
    parent: Option<FrameId>,
    position: Vector3<f64>,
    rotation: EulerRotation,
    dof: DofMask,
    points: Vec<PointOfInterest>,
}

impl Frame {
    /// A frame at its parent's origin with no rotation and no points
    pub fn new(key: impl Into<String>, title: impl Into<String>, dof: DofMask) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            parent: None,
            position: Vector3::zeros(),
            rotation: EulerRotation::default(),
            dof,
            points: Vec::new(),
        }
    }

    pub fn with_position(mut self, position: Vector3<f64>) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: EulerRotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Add the origin and unit axis markers `O`, `E1`, `E2`, `E3`
    pub fn with_axis_markers(self) -> Self {
        self.with_point("O", "Origin", Vector3::zeros())
            .with_point("E1", "x-Axis", Vector3::x() * AXIS_MARKER_LENGTH)
            .with_point("E2", "y-Axis", Vector3::y() * AXIS_MARKER_LENGTH)
            .with_point("E3", "z-Axis", Vector3::z() * AXIS_MARKER_LENGTH)
    }

    /// Add a point of interest, replacing any existing point with the same key
    pub fn with_point(mut self, key: &str, title: &str, position: Vector3<f64>) -> Self {
        match self.points.iter_mut().find(|p| p.key == key) {
            Some(existing) => {
                existing.title = title.to_string();
                existing.position = position;
            }
            None => self.points.push(PointOfInterest::new(key, title, position)),
        }
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn parent(&self) -> Option<FrameId> {
        self.parent
    }

    pub fn position(&self) -> &Vector3<f64> {
        &self.position
    }

    pub fn rotation(&self) -> &EulerRotation {
        &self.rotation
    }

    pub fn dof(&self) -> DofMask {
        self.dof
    }

    /// Points of interest in insertion order
    pub fn points(&self) -> &[PointOfInterest] {
        &self.points
    }

    pub fn point(&self, key: &str) -> Option<&PointOfInterest> {
        self.points.iter().find(|p| p.key == key)
    }

    /// Transform from this frame's coordinates to its parent's
    pub fn local_transform(&self) -> Isometry3<f64> {
        let rotation = UnitQuaternion::from_rotation_matrix(&self.rotation.operator());
        Isometry3::from_parts(Translation3::from(self.position), rotation)
    }
}

/// Tree of frames rooted at an inertial frame
#[derive(Debug, Clone, Default)]
pub struct FrameGraph {
    frames: Vec<Frame>,
    index: BTreeMap<String, FrameId>,
    /// Root→frame path per frame; `Some` once the graph is sealed
    paths: Option<Vec<Vec<FrameId>>>,
}

impl FrameGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame; its key must be unique
    pub fn add_frame(&mut self, frame: Frame) -> Result<FrameId> {
        self.ensure_open()?;
        if self.index.contains_key(&frame.key) {
            return Err(KinematicError::InvalidGraph {
                reason: format!("duplicate frame key '{}'", frame.key),
            });
        }

        let id = FrameId(self.frames.len());
        self.index.insert(frame.key.clone(), id);
        self.frames.push(frame);
        Ok(id)
    }

    /// Add a parent→child edge
    pub fn add_edge(&mut self, parent: FrameId, child: FrameId) -> Result<()> {
        self.ensure_open()?;
        self.check_id(parent)?;
        self.check_id(child)?;

        if parent == child {
            return Err(KinematicError::InvalidGraph {
                reason: format!("frame '{}' can not be its own parent", self.frames[child.0].key),
            });
        }
        if let Some(existing) = self.frames[child.0].parent {
            return Err(KinematicError::InvalidGraph {
                reason: format!(
                    "frame '{}' already has parent '{}'",
                    self.frames[child.0].key, self.frames[existing.0].key
                ),
            });
        }

        self.frames[child.0].parent = Some(parent);
        Ok(())
    }

    /// Add edges by frame key
    pub fn add_edges(&mut self, edges: &[(&str, &str)]) -> Result<()> {
        for (parent, child) in edges {
            let parent = self.id(parent)?;
            let child = self.id(child)?;
            self.add_edge(parent, child)?;
        }
        Ok(())
    }

    /// Compute the root→frame path of every frame by breadth-first search
    /// and seal the graph against further structural changes
    pub fn build_paths(&mut self) -> Result<()> {
        self.ensure_open()?;

        let roots: Vec<FrameId> = (0..self.frames.len())
            .map(FrameId)
            .filter(|id| self.frames[id.0].parent.is_none())
            .collect();
        let root = match roots.as_slice() {
            [root] => *root,
            [] => {
                return Err(KinematicError::InvalidGraph {
                    reason: "graph has no root frame".to_string(),
                })
            }
            _ => {
                let keys: Vec<&str> = roots.iter().map(|id| self.frames[id.0].key.as_str()).collect();
                return Err(KinematicError::InvalidGraph {
                    reason: format!("graph has several roots: {}", keys.join(", ")),
                });
            }
        };

        // Children in insertion order keeps the traversal deterministic
        let mut children: Vec<Vec<FrameId>> = vec![Vec::new(); self.frames.len()];
        for (i, frame) in self.frames.iter().enumerate() {
            if let Some(parent) = frame.parent {
                children[parent.0].push(FrameId(i));
            }
        }

        let mut paths: Vec<Option<Vec<FrameId>>> = vec![None; self.frames.len()];
        paths[root.0] = Some(vec![root]);
        let mut queue = VecDeque::from([root]);

        while let Some(current) = queue.pop_front() {
            let base = paths[current.0].clone().unwrap_or_default();
            for &child in &children[current.0] {
                let mut path = base.clone();
                path.push(child);
                paths[child.0] = Some(path);
                queue.push_back(child);
            }
        }

        let mut resolved = Vec::with_capacity(paths.len());
        for (i, path) in paths.into_iter().enumerate() {
            match path {
                Some(path) => resolved.push(path),
                None => {
                    return Err(KinematicError::InvalidGraph {
                        reason: format!(
                            "frame '{}' is not reachable from root '{}'",
                            self.frames[i].key, self.frames[root.0].key
                        ),
                    })
                }
            }
        }

        self.paths = Some(resolved);
        Ok(())
    }

    pub fn is_sealed(&self) -> bool {
        self.paths.is_some()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn root(&self) -> Option<FrameId> {
        self.paths.as_ref().and_then(|paths| paths.first()).map(|p| p[0])
    }

    /// Look up a frame by key
    pub fn id(&self, key: &str) -> Result<FrameId> {
        self.index
            .get(key)
            .copied()
            .ok_or_else(|| KinematicError::UnknownFrame {
                name: key.to_string(),
            })
    }

    pub fn frame(&self, id: FrameId) -> &Frame {
        &self.frames[id.0]
    }

    /// Frames in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (FrameId, &Frame)> {
        self.frames.iter().enumerate().map(|(i, f)| (FrameId(i), f))
    }

    /// Cached root→frame path
    pub fn path(&self, id: FrameId) -> Result<&[FrameId]> {
        self.check_id(id)?;
        let paths = self.paths.as_ref().ok_or_else(|| KinematicError::InvalidGraph {
            reason: "paths have not been built".to_string(),
        })?;
        Ok(&paths[id.0])
    }

    /// Keys along the cached root→frame path
    pub fn path_keys(&self, id: FrameId) -> Result<Vec<&str>> {
        Ok(self
            .path(id)?
            .iter()
            .map(|p| self.frames[p.0].key.as_str())
            .collect())
    }

    /// Set a frame's static position
    pub fn set_position(&mut self, id: FrameId, position: Vector3<f64>) {
        self.frames[id.0].position = position;
    }

    /// Set one component of a frame's static position
    pub fn set_position_component(&mut self, id: FrameId, axis: Axis, value: f64) {
        self.frames[id.0].position[axis.index()] = value;
    }

    /// Set a frame's static rotation
    pub fn set_rotation(&mut self, id: FrameId, rotation: EulerRotation) {
        self.frames[id.0].rotation = rotation;
    }

    /// Set one angle of a frame's static rotation
    pub fn set_rotation_angle(&mut self, id: FrameId, axis: Axis, value: f64) {
        self.frames[id.0].rotation.set_angle(axis, value);
    }

    /// Set a point of interest's position in the owning frame's coordinates
    pub fn set_point(&mut self, id: FrameId, key: &str, position: Vector3<f64>) -> Result<()> {
        let frame = &mut self.frames[id.0];
        match frame.points.iter_mut().find(|p| p.key == key) {
            Some(point) => {
                point.position = position;
                Ok(())
            }
            None => Err(KinematicError::UnknownPoint {
                frame: frame.key.clone(),
                point: key.to_string(),
            }),
        }
    }

    /// Translate a frame by `delta`, applying only DoF-free components
    pub fn translate(&mut self, id: FrameId, delta: Vector3<f64>) {
        let frame = &mut self.frames[id.0];
        for (axis, dof) in [DOF_U, DOF_V, DOF_W].into_iter().enumerate() {
            if frame.dof.is_free(dof) {
                frame.position[axis] += delta[axis];
            } else if delta[axis] != 0.0 {
                warn!(frame = %frame.key, dof = DOF_NAMES[dof], "ignoring translation of locked DoF");
            }
        }
    }

    /// Rotate a frame by `delta` angles about x, y, z, applying only DoF-free components
    pub fn rotate(&mut self, id: FrameId, delta: [f64; 3]) {
        let frame = &mut self.frames[id.0];
        for (axis, dof) in Axis::ALL.into_iter().zip([DOF_ALPHA, DOF_BETA, DOF_GAMMA]) {
            let d = delta[axis.index()];
            if frame.dof.is_free(dof) {
                let current = frame.rotation.angle(axis);
                frame.rotation.set_angle(axis, current + d);
            } else if d != 0.0 {
                warn!(frame = %frame.key, dof = DOF_NAMES[dof], "ignoring rotation of locked DoF");
            }
        }
    }

    /// Transform from a frame's coordinates to the root's
    pub fn world_transform(&self, id: FrameId) -> Result<Isometry3<f64>> {
        Ok(self
            .path(id)?
            .iter()
            .fold(Isometry3::identity(), |acc, p| acc * self.frames[p.0].local_transform()))
    }

    /// Convert a position in a frame's coordinates to root coordinates
    pub fn to_world(&self, id: FrameId, local: &Vector3<f64>) -> Result<Vector3<f64>> {
        let world = self.world_transform(id)? * Point3::from(*local);
        Ok(world.coords)
    }

    /// Express a root-coordinate position in a frame's coordinates
    pub fn express_in(&self, id: FrameId, world: &Vector3<f64>) -> Result<Vector3<f64>> {
        let local = self.world_transform(id)?.inverse_transform_point(&Point3::from(*world));
        Ok(local.coords)
    }

    /// Root-coordinate position of a frame's point of interest
    pub fn world_point(&self, id: FrameId, key: &str) -> Result<Vector3<f64>> {
        let frame = &self.frames[id.0];
        let point = frame.point(key).ok_or_else(|| KinematicError::UnknownPoint {
            frame: frame.key.clone(),
            point: key.to_string(),
        })?;
        self.to_world(id, &point.position)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_sealed() {
            Err(KinematicError::InvalidGraph {
                reason: "graph structure is sealed once paths are built".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn check_id(&self, id: FrameId) -> Result<()> {
        if id.0 < self.frames.len() {
            Ok(())
        } else {
            Err(KinematicError::InvalidGraph {
                reason: format!("frame id {} is out of range", id.0),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn chain() -> FrameGraph {
        let mut graph = FrameGraph::new();
        graph
            .add_frame(Frame::new("I", "Intermediate", DofMask::LOCKED).with_axis_markers())
            .unwrap();
        graph
            .add_frame(
                Frame::new("B", "Body", DofMask::from_flags([0, 0, 1, 1, 1, 0]))
                    .with_position(Vector3::new(0.0, 0.0, 100.0)),
            )
            .unwrap();
        graph
            .add_frame(
                Frame::new("X", "Axle", DofMask::LOCKED)
                    .with_position(Vector3::new(10.0, 0.0, 0.0))
                    .with_point("P", "Pickup", Vector3::new(0.0, 5.0, 0.0)),
            )
            .unwrap();
        graph.add_edges(&[("I", "B"), ("B", "X")]).unwrap();
        graph.build_paths().unwrap();
        graph
    }

    #[test]
    fn test_dof_mask_display_and_flags() {
        let mask = DofMask::from_flags([1, 1, 0, 1, 0, 1]);
        assert_eq!(mask.free_dofs(), vec![DOF_U, DOF_V, DOF_ALPHA, DOF_GAMMA]);
        assert_eq!(mask.to_string(), "u v · α · γ");
        assert!(!mask.is_free(6));
    }

    #[test]
    fn test_axis_markers() {
        let frame = Frame::new("T", "Tire", DofMask::LOCKED).with_axis_markers();
        let keys: Vec<&str> = frame.points().iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["O", "E1", "E2", "E3"]);
        assert!((frame.point("E3").unwrap().position[2] - AXIS_MARKER_LENGTH).abs() < 1e-12);
    }

    #[test]
    fn test_paths_from_root() {
        let graph = chain();
        let x = graph.id("X").unwrap();
        assert_eq!(graph.path_keys(x).unwrap(), vec!["I", "B", "X"]);
        assert_eq!(graph.root(), Some(graph.id("I").unwrap()));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut graph = FrameGraph::new();
        graph.add_frame(Frame::new("I", "A", DofMask::LOCKED)).unwrap();
        assert!(matches!(
            graph.add_frame(Frame::new("I", "B", DofMask::LOCKED)),
            Err(KinematicError::InvalidGraph { .. })
        ));
    }

    #[test]
    fn test_second_parent_rejected() {
        let mut graph = FrameGraph::new();
        for key in ["A", "B", "C"] {
            graph.add_frame(Frame::new(key, key, DofMask::LOCKED)).unwrap();
        }
        graph.add_edges(&[("A", "C")]).unwrap();
        assert!(graph.add_edges(&[("B", "C")]).is_err());
    }

    #[test]
    fn test_multiple_roots_rejected() {
        let mut graph = FrameGraph::new();
        graph.add_frame(Frame::new("A", "A", DofMask::LOCKED)).unwrap();
        graph.add_frame(Frame::new("B", "B", DofMask::LOCKED)).unwrap();
        assert!(matches!(
            graph.build_paths(),
            Err(KinematicError::InvalidGraph { .. })
        ));
    }

    #[test]
    fn test_cycle_is_unreachable() {
        let mut graph = FrameGraph::new();
        for key in ["R", "A", "B"] {
            graph.add_frame(Frame::new(key, key, DofMask::LOCKED)).unwrap();
        }
        graph.add_edges(&[("A", "B"), ("B", "A")]).unwrap();
        let err = graph.build_paths().unwrap_err();
        assert!(err.to_string().contains("not reachable"));
    }

    #[test]
    fn test_sealed_graph_rejects_structure_changes() {
        let mut graph = chain();
        assert!(graph.is_sealed());
        assert!(graph.add_frame(Frame::new("Z", "Late", DofMask::LOCKED)).is_err());
    }

    #[test]
    fn test_world_point_composes_translations() {
        let graph = chain();
        let x = graph.id("X").unwrap();
        let p = graph.world_point(x, "P").unwrap();
        assert!((p - Vector3::new(10.0, 5.0, 100.0)).norm() < 1e-12);
    }

    #[test]
    fn test_world_point_composes_rotations() {
        let mut graph = chain();
        let b = graph.id("B").unwrap();
        let x = graph.id("X").unwrap();

        // Body yawed a quarter turn: axle offset along body x ends up along world y
        graph.set_rotation_angle(b, Axis::Z, FRAC_PI_2);
        let p = graph.world_point(x, "P").unwrap();
        assert!((p - Vector3::new(-5.0, 10.0, 100.0)).norm() < 1e-9);

        let back = graph.express_in(x, &p).unwrap();
        assert!((back - Vector3::new(0.0, 5.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn test_translate_respects_dof_mask() {
        let mut graph = chain();
        let b = graph.id("B").unwrap();
        graph.translate(b, Vector3::new(1.0, 2.0, 3.0));
        assert!((graph.frame(b).position() - Vector3::new(0.0, 0.0, 103.0)).norm() < 1e-12);

        let x = graph.id("X").unwrap();
        graph.translate(x, Vector3::new(1.0, 1.0, 1.0));
        assert!((graph.frame(x).position() - Vector3::new(10.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_rotate_respects_dof_mask() {
        let mut graph = chain();
        let b = graph.id("B").unwrap();
        graph.rotate(b, [0.1, 0.2, 0.3]);
        assert_eq!(graph.frame(b).rotation().angles(), [0.1, 0.2, 0.0]);
    }

    #[test]
    fn test_unknown_point_and_frame() {
        let mut graph = chain();
        assert!(matches!(
            graph.id("Q"),
            Err(KinematicError::UnknownFrame { .. })
        ));
        let x = graph.id("X").unwrap();
        assert!(matches!(
            graph.set_point(x, "nope", Vector3::zeros()),
            Err(KinematicError::UnknownPoint { .. })
        ));
    }
}
