//! Agent state and population kinds.
//!
//! An agent is pure data: the force models read it, the apply phase of the
//! tick mutates it. Creation and removal happen outside the simulation core.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geometric_utils::heading_degrees;

/// The two interacting populations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    /// Flocking agents that evade predators.
    Prey,
    /// Agents that keep mutual distance and (eventually) hunt prey.
    Predator,
}

/// Per-agent simulation state.
///
/// Positions and velocities are 3D vectors, but motion is planar: every
/// force term has its z component cleared before application, so an agent
/// starting in the XY plane stays there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentState {
    /// Population this agent belongs to. Immutable after creation.
    pub kind: AgentKind,
    /// Position in world space.
    pub pos: Vec3,
    /// Velocity in world units per second.
    pub vel: Vec3,
    /// Heading in degrees, wrapped into `[0, 360)`. Derived from velocity;
    /// holds its previous value while the agent is at rest.
    pub heading: f32,
}

impl AgentState {
    /// Creates an agent of the given kind at rest.
    pub fn new(kind: AgentKind, pos: Vec3) -> Self {
        Self {
            kind,
            pos,
            vel: Vec3::ZERO,
            heading: 0.0,
        }
    }

    /// Creates a prey agent at rest.
    pub fn prey(pos: Vec3) -> Self {
        Self::new(AgentKind::Prey, pos)
    }

    /// Creates a predator agent at rest.
    pub fn predator(pos: Vec3) -> Self {
        Self::new(AgentKind::Predator, pos)
    }

    /// Snaps the heading to the current velocity direction.
    ///
    /// At exactly zero planar velocity the direction is degenerate and the
    /// previous heading is kept.
    pub fn update_heading(&mut self) {
        if let Some(angle) = heading_degrees(self.vel) {
            self.heading = angle;
        }
    }

    /// Facing angle in degrees: heading rotated by the fixed -90° offset
    /// that reconciles the velocity direction with the visual forward axis.
    pub fn facing(&self) -> f32 {
        self.heading - 90.0
    }
}
