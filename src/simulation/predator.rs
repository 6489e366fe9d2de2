//! Predator force model.
//!
//! Predators currently only keep mutual distance: pairwise separation
//! springs inside the kill radius plus quadratic drag. Detection of prey
//! switches the mode machine into `Pursuing`, but no pursuit propulsion is
//! authored yet — the drive parameters in `PredatorParams` are reserved for
//! it (see DESIGN.md).

use glam::Vec3;

use super::agent::AgentState;
use super::geometric_utils::{pair_spring, planar, quadratic_drag};
use super::params::PredatorParams;

/// Predator mode, chosen fresh every tick from the detected-prey hit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredatorMode {
    /// No prey inside the detection radius.
    Holding,
    /// Prey detected. Extension point: contributes no force in the current
    /// model.
    Pursuing,
}

/// Neighbor hit sets feeding the predator force terms.
pub struct PredatorNeighborhood<'a> {
    /// Predators within `kill_radius`.
    pub separation: &'a [(f32, usize)],
    /// Prey within `detection_radius`. Drives mode selection only.
    pub detected_prey: &'a [(f32, usize)],
}

/// Net force on one predator: separation + friction. The returned mode
/// reports whether prey are in detection range; it does not affect the
/// force.
pub fn net_force(
    self_idx: usize,
    agents: &[AgentState],
    hood: &PredatorNeighborhood<'_>,
    params: &PredatorParams,
) -> (Vec3, PredatorMode) {
    let me = &agents[self_idx];

    let separation = separation_force(self_idx, agents, hood.separation, params);
    let friction = quadratic_drag(me.vel, params.friction_coefficient);

    let mode = if hood.detected_prey.is_empty() {
        PredatorMode::Holding
    } else {
        PredatorMode::Pursuing
    };

    (separation + friction, mode)
}

/// Summed pairwise separation springs against every other predator in the
/// kill-radius set, scaled by the separation multiplier.
///
/// Same spring and convention as the prey rule, with the predator's body
/// diameter as half the rest length.
pub fn separation_force(
    self_idx: usize,
    agents: &[AgentState],
    hits: &[(f32, usize)],
    params: &PredatorParams,
) -> Vec3 {
    let me = &agents[self_idx];
    let mut separation = Vec3::ZERO;

    for &(_, idx) in hits {
        if idx == self_idx {
            continue;
        }
        separation += pair_spring(me.pos, agents[idx].pos, 2.0 * params.body_diameter);
    }

    planar(separation) * params.separation_force_multiplier
}
