//! # Collective - Predator/Prey Swarm Simulation
//!
//! Simulates the collective motion of two interacting agent populations: a
//! prey swarm and a predator group. Every fixed step, each agent's net force
//! is computed from purely local rules over spatially-nearby agents, then
//! all forces are applied together — a two-phase tick that keeps the
//! dynamics deterministic and independent of agent processing order.
//!
//! ## Features
//!
//! - Prey force model: separation springs, alignment, eased attraction,
//!   cruise/escape propulsion, quadratic friction
//! - Predator force model: separation springs and friction, with a reserved
//!   pursuit extension point
//! - K-d tree neighbor queries, rebuilt from the pre-tick snapshot
//! - Parallel compute and apply phases (rayon)
//! - Swappable force integrator with a semi-implicit Euler default
//! - JSON-loadable, validated simulation parameters
//!
//! ## Core Modules
//!
//! - [`simulation::prey`] - Prey force model
//! - [`simulation::predator`] - Predator force model
//! - [`simulation::world`] - Two-phase world stepping
//! - [`simulation::spatial`] - Neighbor queries

/// Core simulation logic and data structures.
pub mod simulation {
    /// Agent state and population kinds.
    pub mod agent;
    /// Geometric helpers shared by the force models.
    pub mod geometric_utils;
    /// Force integration seam with the default Euler integrator.
    pub mod integrator;
    /// Simulation parameters and their validation.
    pub mod params;
    /// Predator force model and mode machine.
    pub mod predator;
    /// Prey force model and drive machine.
    pub mod prey;
    /// Spatial indexing for neighbor queries.
    pub mod spatial;
    /// Two-phase world stepping.
    pub mod world;
}
