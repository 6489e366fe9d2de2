//! Force integration seam.
//!
//! The tick's apply phase hands each buffered force to an integrator; the
//! trait keeps the physics backend swappable and lets tests observe applied
//! forces. The default is semi-implicit Euler over unit-mass agents.

use glam::Vec3;

use super::agent::AgentState;

/// Turns an applied force into a velocity and position change.
///
/// Implementations mutate only the agent they are given; the apply phase
/// runs them in parallel over disjoint agents.
pub trait Integrator: Sync {
    /// Applies `force` to `agent` over the timestep `dt`.
    fn apply_force(&self, agent: &mut AgentState, force: Vec3, dt: f32);
}

/// Semi-implicit Euler for unit-mass agents: velocity first, then position
/// from the updated velocity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn apply_force(&self, agent: &mut AgentState, force: Vec3, dt: f32) {
        agent.vel += force * dt;
        agent.pos += agent.vel * dt;
    }
}
