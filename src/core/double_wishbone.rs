//! Double wishbone linkage - default frame graph and design generator
//!
//! The generator places the frames from the vehicle and linkage targets,
//! resolves the eight hardpoints from their bounds and samples, then derives
//! the kinematic quantities (instant centers, roll and pitch center, steering
//! axis) from the resolved geometry.
//!
//! Frame tree:
//!
//! ```text
//! I ─┬─ T ── W
//!    └─ B ── X ─┬─ LA
//!               ├─ UA
//!               └─ TR
//! ```

use std::collections::BTreeMap;
use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector3;
use tracing::{debug, info};

use crate::core::error::{KinematicError, Result};
use crate::core::frame::{DofMask, Frame, FrameGraph, FrameId};
use crate::core::geometry::{Line, Plane, GEOMETRY_TOLERANCE};
use crate::core::linkage::{Axle, LinkageDesign, Subsystem};
use crate::core::report::{DerivedKinematics, DesignReport, HardpointReport};
use crate::core::rotation::EulerRotation;
use crate::core::sampling::{
    resolve_linkage_bounds, resolve_linkage_positions, Hardpoint, SampleTable,
};
use crate::entities::bound::BoundSet;
use crate::entities::target::Target;

/// Double wishbone initializer and generator
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleWishbone;

/// Handles of the frames the generator touches
struct Frames {
    intermediate: FrameId,
    tire: FrameId,
    wheel: FrameId,
    body: FrameId,
    axle: FrameId,
    lower_arm: FrameId,
    upper_arm: FrameId,
    tie_rod: FrameId,
}

impl Frames {
    fn lookup(graph: &FrameGraph) -> Result<Self> {
        Ok(Self {
            intermediate: graph.id("I")?,
            tire: graph.id("T")?,
            wheel: graph.id("W")?,
            body: graph.id("B")?,
            axle: graph.id("X")?,
            lower_arm: graph.id("LA")?,
            upper_arm: graph.id("UA")?,
            tie_rod: graph.id("TR")?,
        })
    }

    fn owner(&self, hardpoint: Hardpoint) -> FrameId {
        if hardpoint.is_inboard() {
            self.axle
        } else {
            self.wheel
        }
    }
}

/// Build the default double wishbone frame graph
pub fn default_frame_graph() -> Result<FrameGraph> {
    let zero = Vector3::zeros();
    let mut graph = FrameGraph::new();

    graph.add_frame(
        Frame::new("I", "Intermediate", DofMask::LOCKED)
            .with_axis_markers()
            .with_point("RC", "Roll Center", zero)
            .with_point("FC", "Front Instant Center", zero)
            .with_point("PC", "Pitch Center", zero)
            .with_point("SC", "Side Instant Center", zero),
    )?;
    graph.add_frame(
        Frame::new("T", "Tire", DofMask::from_flags([1, 1, 0, 1, 0, 1])).with_axis_markers(),
    )?;

    let mut wheel = Frame::new("W", "Wheel", DofMask::from_flags([0, 0, 0, 0, 1, 0])).with_axis_markers();
    let mut axle = Frame::new("X", "Axle", DofMask::LOCKED).with_axis_markers();
    for hp in Hardpoint::ALL {
        if hp.is_inboard() {
            axle = axle.with_point(hp.key(), hp.title(), zero);
        } else {
            wheel = wheel.with_point(hp.key(), hp.title(), zero);
        }
    }
    graph.add_frame(wheel)?;

    graph.add_frame(
        Frame::new("B", "Body", DofMask::from_flags([0, 0, 1, 1, 1, 0])).with_axis_markers(),
    )?;
    graph.add_frame(axle)?;

    let member_dof = DofMask::from_flags([0, 0, 0, 1, 0, 0]);
    graph.add_frame(
        Frame::new("LA", "Lower A-Arm", member_dof)
            .with_axis_markers()
            .with_point("LAF", "Front Pickup", zero)
            .with_point("LAR", "Rear Pickup", zero)
            .with_point("LB", "Apex", zero),
    )?;
    graph.add_frame(
        Frame::new("UA", "Upper A-Arm", member_dof)
            .with_axis_markers()
            .with_point("UAF", "Front Pickup", zero)
            .with_point("UAR", "Rear Pickup", zero)
            .with_point("UB", "Apex", zero),
    )?;
    graph.add_frame(
        Frame::new("TR", "Tie Rod", member_dof)
            .with_axis_markers()
            .with_point("TA", "Inner Pickup", zero)
            .with_point("TB", "Outer Pickup", zero),
    )?;

    graph.add_edges(&[
        ("I", "T"),
        ("T", "W"),
        ("I", "B"),
        ("B", "X"),
        ("X", "LA"),
        ("X", "UA"),
        ("X", "TR"),
    ])?;
    graph.build_paths()?;

    Ok(graph)
}

/// Longitudinal tire station relative to the CG
pub fn tire_station(axle: Axle, wheelbase: f64, front_weight_pct: f64) -> f64 {
    match axle {
        Axle::Front => wheelbase * (1.0 - front_weight_pct / 100.0),
        Axle::Rear => -wheelbase * front_weight_pct / 100.0,
    }
}

fn place(graph: &mut FrameGraph, id: FrameId, position: Vector3<f64>, angles: [f64; 3]) {
    graph.set_position(id, position);
    graph.set_rotation(id, EulerRotation::radians(angles));
    debug!(
        frame = graph.frame(id).key(),
        x = position.x,
        y = position.y,
        z = position.z,
        "placed frame"
    );
}

fn lookup(positions: &BTreeMap<Hardpoint, Vector3<f64>>, hp: Hardpoint) -> Result<Vector3<f64>> {
    positions
        .get(&hp)
        .copied()
        .ok_or_else(|| KinematicError::invalid(format!("bound.linkage.{}", hp), "hardpoint was not resolved"))
}

impl LinkageDesign for DoubleWishbone {
    fn initialize(&self, bounds: &BoundSet) -> Result<(FrameGraph, SampleTable)> {
        let graph = default_frame_graph()?;
        let samples = SampleTable::default_linkage(&bounds.linkage);
        Ok((graph, samples))
    }

    fn resolve(
        &self,
        graph: &mut FrameGraph,
        target: &Target,
        bounds: &BoundSet,
        samples: &SampleTable,
    ) -> Result<DesignReport> {
        target.validate()?;
        let axle = target.axle()?;
        let vehicle = &target.vehicle;
        let linkage = &target.linkage;
        let frames = Frames::lookup(graph)?;

        info!(axle = %axle, "generating double wishbone linkage");

        // Frames from targets
        let tire_x = tire_station(axle, vehicle.wheelbase, vehicle.front_weight_pct());
        place(
            graph,
            frames.tire,
            Vector3::new(tire_x, linkage.track / 2.0, 0.0),
            [-linkage.camber, 0.0, linkage.toe],
        );
        place(
            graph,
            frames.wheel,
            Vector3::new(0.0, 0.0, vehicle.loaded_radius / (FRAC_PI_2 - linkage.camber).sin()),
            [0.0, -linkage.caster, 0.0],
        );
        place(
            graph,
            frames.body,
            Vector3::new(0.0, 0.0, vehicle.cg_height),
            [0.0, vehicle.rake, 0.0],
        );
        place(
            graph,
            frames.axle,
            Vector3::new(tire_x, 0.0, vehicle.ride_height - vehicle.cg_height),
            [0.0; 3],
        );

        // Hardpoints from bounds and samples
        let resolved = resolve_linkage_bounds(&bounds.linkage)?;
        let positions = resolve_linkage_positions(&resolved, samples)?;
        for (hp, position) in &positions {
            graph.set_point(frames.owner(*hp), hp.key(), *position)?;
        }

        // Members carry their points in axle coordinates
        let mut in_axle = BTreeMap::new();
        for hp in Hardpoint::ALL {
            let local = lookup(&positions, hp)?;
            let position = if hp.is_inboard() {
                local
            } else {
                let world = graph.to_world(frames.wheel, &local)?;
                graph.express_in(frames.axle, &world)?
            };
            in_axle.insert(hp, position);
        }
        let members: [(FrameId, &[Hardpoint]); 3] = [
            (
                frames.lower_arm,
                &[Hardpoint::LowerFront, Hardpoint::LowerRear, Hardpoint::LowerBall],
            ),
            (
                frames.upper_arm,
                &[Hardpoint::UpperFront, Hardpoint::UpperRear, Hardpoint::UpperBall],
            ),
            (frames.tie_rod, &[Hardpoint::TieRodInner, Hardpoint::TieRodOuter]),
        ];
        for (member, points) in members {
            place(graph, member, Vector3::zeros(), [0.0; 3]);
            for hp in points {
                graph.set_point(member, hp.key(), lookup(&in_axle, *hp)?)?;
            }
        }

        let kinematics = derive_kinematics(graph, &frames, target, tire_x)?;

        let zero = Vector3::zeros();
        let to_vector = |p: Option<[f64; 3]>| p.map(Vector3::from).unwrap_or(zero);
        graph.set_point(frames.intermediate, "RC", Vector3::from(kinematics.roll_center_target))?;
        graph.set_point(frames.intermediate, "FC", to_vector(kinematics.front_instant_center))?;
        graph.set_point(frames.intermediate, "SC", to_vector(kinematics.side_instant_center))?;
        graph.set_point(frames.intermediate, "PC", to_vector(kinematics.pitch_center))?;

        let mut hardpoints = Vec::with_capacity(Hardpoint::ALL.len());
        for hp in Hardpoint::ALL {
            let owner = frames.owner(hp);
            hardpoints.push(HardpointReport {
                hardpoint: hp,
                title: hp.title().to_string(),
                frame: graph.frame(owner).key().to_string(),
                local: lookup(&positions, hp)?.into(),
                world: graph.world_point(owner, hp.key())?.into(),
                bound: *resolved.get(hp)?,
            });
        }

        Ok(DesignReport {
            subsystem: Subsystem::Linkage,
            hardpoints,
            inherited: resolved.inherited,
            kinematics,
        })
    }
}

/// Instant centers, roll and pitch center and steering axis of the placed linkage
///
/// The instant axis is the intersection of the two arm planes. Its front-view
/// instant center lies at the tire's longitudinal station and its side-view
/// instant center at the tire's lateral station. The roll center is where the
/// contact patch to front-view instant center line crosses the vehicle
/// centreline, the pitch center where the side-view line crosses the CG station.
fn derive_kinematics(
    graph: &FrameGraph,
    frames: &Frames,
    target: &Target,
    tire_x: f64,
) -> Result<DerivedKinematics> {
    let world = |hp: Hardpoint| graph.world_point(frames.owner(hp), hp.key());

    let contact = graph.to_world(frames.tire, &Vector3::zeros())?;

    let lower = Plane::new(
        world(Hardpoint::LowerFront)?,
        world(Hardpoint::LowerRear)?,
        world(Hardpoint::LowerBall)?,
    )
    .map_err(|e| e.within("lower A-arm"))?;
    let upper = Plane::new(
        world(Hardpoint::UpperFront)?,
        world(Hardpoint::UpperRear)?,
        world(Hardpoint::UpperBall)?,
    )
    .map_err(|e| e.within("upper A-arm"))?;

    // Parallel arm planes put the instant axis at infinity
    let instant_axis = match lower.intersection(&upper) {
        Ok(line) => Some(line),
        Err(KinematicError::DegenerateGeometry { .. }) => None,
        Err(e) => return Err(e),
    };

    let front_ic = instant_axis.as_ref().and_then(|axis| axis.evaluate(contact.x, 0).ok());
    let side_ic = instant_axis.as_ref().and_then(|axis| axis.evaluate(contact.y, 1).ok());

    let roll_center = match front_ic {
        Some(ic) => swing_arm(&contact, &ic, "front view swing arm")?.evaluate(0.0, 1).ok(),
        None => None,
    };
    let pitch_center = match side_ic {
        Some(ic) => swing_arm(&contact, &ic, "side view swing arm")?.evaluate(0.0, 0).ok(),
        None => None,
    };

    let lower_ball = world(Hardpoint::LowerBall)?;
    let upper_ball = world(Hardpoint::UpperBall)?;
    let steering_axis = Line::new(lower_ball, upper_ball).map_err(|e| e.within("steering axis"))?;
    let rise = upper_ball.z - lower_ball.z;
    let scrub_radius = steering_axis
        .evaluate(0.0, 2)
        .ok()
        .map(|ground| contact.y - ground.y);

    let vehicle = &target.vehicle;
    let linkage = &target.linkage;
    let kinematics = DerivedKinematics {
        fvsa_target: 1.0 / linkage.camber_gain.abs().atan(),
        roll_center_target: [tire_x, 0.0, vehicle.cg_height * linkage.roll_center / 100.0],
        contact_patch: contact.into(),
        front_instant_center: front_ic.map(Into::into),
        side_instant_center: side_ic.map(Into::into),
        roll_center: roll_center.map(Into::into),
        pitch_center: pitch_center.map(Into::into),
        fvsa: front_ic.map(|ic| (contact.y - ic.y).abs()),
        kpi: (lower_ball.y - upper_ball.y).atan2(rise),
        caster: (lower_ball.x - upper_ball.x).atan2(rise),
        scrub_radius,
    };

    debug!(
        roll_center = ?kinematics.roll_center,
        pitch_center = ?kinematics.pitch_center,
        kpi = kinematics.kpi,
        caster = kinematics.caster,
        "derived kinematics"
    );

    Ok(kinematics)
}

/// Line from the contact patch to an instant center
fn swing_arm(contact: &Vector3<f64>, instant_center: &Vector3<f64>, context: &str) -> Result<Line> {
    if (instant_center - contact).norm() <= GEOMETRY_TOLERANCE * (1.0 + contact.norm()) {
        return Err(KinematicError::degenerate(
            context,
            "instant center coincides with the contact patch (zero-length swing arm)",
        ));
    }
    Line::new(*contact, *instant_center)
}
