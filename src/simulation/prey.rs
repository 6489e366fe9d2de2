//! Prey force model.
//!
//! Four local rules plus friction: pairwise separation springs, velocity
//! matching against the alignment band, an eased pull toward the attraction
//! band, and a propulsion term that switches between cruising and escaping
//! depending on whether a predator is in range. All terms are pure functions
//! of the pre-tick snapshot and are summed (never applied) here; the apply
//! phase of the tick owns mutation.

use glam::Vec3;

use super::agent::AgentState;
use super::geometric_utils::{pair_spring, planar, quadratic_drag};
use super::params::PreyParams;

/// Propulsion state, chosen fresh every tick from the predator hit set.
///
/// Purely a function of current positions — no hysteresis, an agent can flip
/// between states on consecutive ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drive {
    /// No predator in range; self-propelled cruise toward `beta / alpha`.
    Cruising,
    /// At least one predator in range; drag-limited thrust away from all of
    /// them.
    Escaping,
}

/// Neighbor hit sets feeding the prey force terms.
///
/// All four are queried against the same pre-tick snapshot: prey within the
/// separation, alignment and attraction radii, and predators within the
/// attraction radius.
pub struct PreyNeighborhood<'a> {
    /// Prey within `separation_radius`.
    pub separation: &'a [(f32, usize)],
    /// Prey within `alignment_radius`.
    pub alignment: &'a [(f32, usize)],
    /// Prey within `attraction_radius`.
    pub attraction: &'a [(f32, usize)],
    /// Predators within `attraction_radius`.
    pub predators: &'a [(f32, usize)],
}

/// Net force on one prey agent: separation + alignment + attraction +
/// propulsion + friction, each term projected into the plane before its
/// multiplier.
pub fn net_force(
    self_idx: usize,
    agents: &[AgentState],
    hood: &PreyNeighborhood<'_>,
    params: &PreyParams,
) -> (Vec3, Drive) {
    let me = &agents[self_idx];

    let separation = separation_force(self_idx, agents, hood.separation, params);
    let alignment = alignment_force(self_idx, agents, hood.alignment, params);
    let attraction = attraction_force(self_idx, agents, hood.attraction, params);
    let (propulsion, drive) = propulsion_force(me, agents, hood.predators, params);
    let friction = quadratic_drag(me.vel, params.friction_coefficient);

    let total = separation + alignment + attraction + propulsion + friction;
    (total, drive)
}

/// Summed pairwise separation springs against every other prey in the
/// separation set, scaled by the separation multiplier.
///
/// The spring rests at `2 * body_diameter`: closer neighbors repel, farther
/// ones (still inside the separation radius) attract.
pub fn separation_force(
    self_idx: usize,
    agents: &[AgentState],
    hits: &[(f32, usize)],
    params: &PreyParams,
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

/// Steers the agent's velocity toward the mean velocity of the alignment
/// band: neighbors farther than the separation radius but inside the
/// alignment radius.
///
/// Zero when the band is empty.
pub fn alignment_force(
    self_idx: usize,
    agents: &[AgentState],
    hits: &[(f32, usize)],
    params: &PreyParams,
) -> Vec3 {
    let me = &agents[self_idx];
    let mut alignment = Vec3::ZERO;
    let mut count = 0;

    for &(_, idx) in hits {
        if idx == self_idx {
            continue;
        }
        let other = &agents[idx];
        if (other.pos - me.pos).length() > params.separation_radius {
            alignment += other.vel;
            count += 1;
        }
    }

    if count > 0 {
        alignment /= count as f32;
        alignment -= me.vel;
    }

    planar(alignment) * params.alignment_force_multiplier
}

/// Averaged pull toward neighbors in the attraction band: farther than the
/// alignment radius but inside the attraction radius.
///
/// Each neighbor is weighted by `sqrt(1 - (1 - d / attraction_radius)^2)`,
/// an ease-in that grows monotonically with distance and reaches 1 at the
/// attraction radius, so the pull is strongest toward distant-but-in-range
/// neighbors. Zero when the band is empty.
pub fn attraction_force(
    self_idx: usize,
    agents: &[AgentState],
    hits: &[(f32, usize)],
    params: &PreyParams,
) -> Vec3 {
    let me = &agents[self_idx];
    let mut attraction = Vec3::ZERO;
    let mut count = 0;

    for &(_, idx) in hits {
        if idx == self_idx {
            continue;
        }
        let difference = agents[idx].pos - me.pos;
        let distance = difference.length();
        if distance > params.alignment_radius {
            let weight = (1.0 - (1.0 - distance / params.attraction_radius).powi(2)).sqrt();
            attraction += weight * difference.normalize_or_zero();
            count += 1;
        }
    }

    if count > 0 {
        attraction /= count as f32;
    }

    planar(attraction) * params.attraction_force_multiplier
}

/// Propulsion term and the drive state it was computed under.
///
/// With predators in range: escape thrust `(beta_escape - gamma * |v|^2)`
/// along the normalized sum of inverse-distance-weighted directions away
/// from every predator, so closer predators dominate the heading. Otherwise:
/// cruise propulsion `(beta - alpha * |v|) * v`, which drives speed toward
/// `beta / alpha` and damps overshoot.
pub fn propulsion_force(
    me: &AgentState,
    agents: &[AgentState],
    predator_hits: &[(f32, usize)],
    params: &PreyParams,
) -> (Vec3, Drive) {
    if predator_hits.is_empty() {
        let cruise = (params.beta - params.alpha * me.vel.length()) * me.vel;
        return (planar(cruise), Drive::Cruising);
    }

    let mut escape_direction = Vec3::ZERO;
    for &(_, idx) in predator_hits {
        let direction = me.pos - agents[idx].pos;
        let distance = direction.length();
        if distance > 0.0 {
            escape_direction += direction.normalize() / distance;
        }
    }

    let thrust = params.beta_escape - params.gamma * me.vel.length_squared();
    let escape = thrust * escape_direction.normalize_or_zero();
    (planar(escape), Drive::Escaping)
}
