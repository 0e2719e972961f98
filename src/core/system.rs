//! Kinematic system - owns the configuration and frame graph of one suspension
//!
//! Construction parses the linkage type and runs its initializer. Generation
//! runs the requested subsystems against a scratch copy of the frame graph and
//! only commits the copy when every subsystem succeeded.

use tracing::info;

use crate::core::error::{KinematicError, Result};
use crate::core::frame::FrameGraph;
use crate::core::linkage::{LinkageKind, Subsystem};
use crate::core::report::{DesignReport, FrameReport, SystemSnapshot};
use crate::core::sampling::{Hardpoint, Sample, SampleTable};
use crate::entities::bound::BoundSet;
use crate::entities::design::DesignFile;
use crate::entities::target::Target;

#[derive(Debug, Clone)]
pub struct KinematicSystem {
    name: String,
    target: Target,
    bound: BoundSet,
    sample: SampleTable,
    linkage: LinkageKind,
    graph: FrameGraph,
    designs: Vec<DesignReport>,
}

impl KinematicSystem {
    /// Build the default frame graph and samples for the target's linkage type
    pub fn new(name: impl Into<String>, target: Target, bound: BoundSet) -> Result<Self> {
        let linkage = target.linkage_kind()?;
        bound.validate()?;
        let (graph, sample) = linkage.design().initialize(&bound)?;

        Ok(Self {
            name: name.into(),
            target,
            bound,
            sample,
            linkage,
            graph,
            designs: Vec::new(),
        })
    }

    /// Build from a design file, applying its sample overrides
    pub fn from_design(design: DesignFile) -> Result<Self> {
        let mut system = Self::new(design.name, design.target, design.bound)?;
        system.sample.merge(&design.sample, &system.bound.linkage);
        Ok(system)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn bound(&self) -> &BoundSet {
        &self.bound
    }

    pub fn samples(&self) -> &SampleTable {
        &self.sample
    }

    pub fn linkage(&self) -> LinkageKind {
        self.linkage
    }

    pub fn graph(&self) -> &FrameGraph {
        &self.graph
    }

    /// Reports of the most recent successful generation
    pub fn designs(&self) -> &[DesignReport] {
        &self.designs
    }

    /// Replace one hardpoint's sample; axes its bound pins are stored as 0
    pub fn set_sample(&mut self, hardpoint: Hardpoint, sample: Sample) {
        self.sample.set_within(hardpoint, sample, &self.bound.linkage);
    }

    /// Resolve the named subsystems in the given order
    ///
    /// Callers generate the linkage before anything that depends on it. On
    /// failure the frame graph and previous reports are left untouched.
    pub fn generate_design(&mut self, subsystems: &[Subsystem]) -> Result<&[DesignReport]> {
        let mut scratch = self.graph.clone();
        let mut designs = Vec::with_capacity(subsystems.len());

        for subsystem in subsystems {
            let report = match subsystem {
                Subsystem::Linkage => self.linkage.design().resolve(
                    &mut scratch,
                    &self.target,
                    &self.bound,
                    &self.sample,
                )?,
                Subsystem::Strut => {
                    let kind = self.target.strut_kind()?;
                    return Err(KinematicError::unsupported("strut", kind.label()));
                }
                Subsystem::Spring => {
                    let kinds = self.target.spring_kinds()?;
                    let labels: Vec<&str> = kinds.iter().map(|k| k.label()).collect();
                    return Err(KinematicError::unsupported("spring", labels.join(", ")));
                }
            };
            info!(subsystem = %subsystem, name = %self.name, "generated subsystem");
            designs.push(report);
        }

        self.graph = scratch;
        self.designs = designs;
        Ok(&self.designs)
    }

    /// Resolve every subsystem that has bounds, linkage first
    pub fn generate_all(&mut self) -> Result<&[DesignReport]> {
        let subsystems = self.bound.subsystems();
        self.generate_design(&subsystems)
    }

    pub fn snapshot(&self) -> SystemSnapshot {
        SystemSnapshot {
            name: self.name.clone(),
            frames: self
                .graph
                .iter()
                .map(|(id, _)| FrameReport::from_graph(&self.graph, id))
                .collect(),
            designs: self.designs.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn system() -> KinematicSystem {
        KinematicSystem::from_design(DesignFile::example()).unwrap()
    }

    #[test]
    fn test_unknown_linkage_type() {
        let mut design = DesignFile::example();
        design.target.types.linkage = "Trailing Arm".to_string();
        let err = KinematicSystem::from_design(design).unwrap_err();
        assert!(matches!(err, KinematicError::UnsupportedLinkageType { .. }));
    }

    #[test]
    fn test_generate_linkage() {
        let mut system = system();
        let designs = system.generate_design(&[Subsystem::Linkage]).unwrap();
        assert_eq!(designs.len(), 1);

        let t = system.graph().id("T").unwrap();
        assert!((system.graph().frame(t).position().x - 762.5).abs() < 1e-9);
    }

    #[test]
    fn test_strut_generator_is_unsupported() {
        let mut system = system();
        let err = system.generate_design(&[Subsystem::Strut]).unwrap_err();
        assert_eq!(err, KinematicError::unsupported("strut", "Lower Rod"));
    }

    #[test]
    fn test_failed_generation_leaves_graph_untouched() {
        let mut system = system();
        system.generate_design(&[Subsystem::Linkage]).unwrap();
        let before = system.snapshot();

        // Linkage succeeds on the scratch graph, then the strut step fails
        system.set_sample(Hardpoint::LowerFront, Sample::new([0.0, 0.0, 1.0]).unwrap());
        assert!(system.generate_all().is_err());
        assert_eq!(system.snapshot(), before);

        let x = system.graph().id("X").unwrap();
        let laf = system.graph().frame(x).point("LAF").unwrap().position;
        assert!((laf - Vector3::new(127.0, 220.98, 12.7)).norm() < 1e-9);
    }

    #[test]
    fn test_stored_samples_mask_zero_width_axes() {
        let mut system = system();
        // LAF x is pinned at 127 mm
        system.set_sample(Hardpoint::LowerFront, Sample::new([0.7, 0.4, 0.9]).unwrap());
        assert_eq!(system.samples().get(Hardpoint::LowerFront).values(), [0.0, 0.4, 0.9]);

        let mut design = DesignFile::example();
        design
            .sample
            .set(Hardpoint::UpperRear, Sample::new([0.3, 0.6, 0.5]).unwrap());
        let system = KinematicSystem::from_design(design).unwrap();
        // UAR x and y are left to inheritance as [0, 0]
        assert_eq!(system.samples().get(Hardpoint::UpperRear).values(), [0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_unknown_axle_fails_without_partial_geometry() {
        let mut design = DesignFile::example();
        design.target.types.axle = "Middle".to_string();
        let mut system = KinematicSystem::from_design(design).unwrap();
        let before = system.snapshot();

        assert!(matches!(
            system.generate_design(&[Subsystem::Linkage]),
            Err(KinematicError::InvalidConfiguration { .. })
        ));
        assert_eq!(system.snapshot(), before);
    }

    #[test]
    fn test_snapshot_lists_frames_in_order() {
        let system = system();
        let snapshot = system.snapshot();
        let keys: Vec<&str> = snapshot.frames.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["I", "T", "W", "B", "X", "LA", "UA", "TR"]);
        assert_eq!(snapshot.frames[2].path, vec!["I", "T", "W"]);
        assert_eq!(snapshot.frames[1].dof, "u v · α · γ");
    }
}
