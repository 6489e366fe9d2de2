//! World stepping: a synchronous, order-independent two-phase tick.
//!
//! Phase 1 computes every agent's net force against the pre-tick snapshot —
//! read-only, parallel over agents, buffered. Phase 2 applies the buffered
//! forces through the integrator and refreshes headings. No phase-1
//! computation ever observes a phase-2 mutation from the same tick, so the
//! result is identical for any agent processing order.

use glam::Vec3;
use kdtree::ErrorKind as KdTreeError;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use super::agent::{AgentKind, AgentState};
use super::integrator::{Integrator, SemiImplicitEuler};
use super::params::{ParamsError, SimParams};
use super::predator::{self, PredatorMode, PredatorNeighborhood};
use super::prey::{self, Drive, PreyNeighborhood};
use super::spatial::{NeighborQuery, SpatialIndex};

/// Activity state computed alongside each agent's force in phase 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// Prey propulsion state.
    Prey(Drive),
    /// Predator mode.
    Predator(PredatorMode),
}

/// Per-agent phase-1 output, buffered until every agent has been processed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Planned {
    /// Net force to hand to the integrator in phase 2.
    pub force: Vec3,
    /// State-machine activity the force was computed under.
    pub activity: Activity,
}

/// Errors raised while advancing the simulation.
#[derive(Debug, Error)]
pub enum TickError {
    /// The spatial index could not be built from the agent snapshot.
    #[error("failed to build spatial index: {0:?}")]
    Index(KdTreeError),
}

/// The simulation world: all agents plus the parameters and integrator that
/// advance them.
pub struct World<I: Integrator = SemiImplicitEuler> {
    /// All live agents. Created at setup, mutated in place by the tick.
    pub agents: Vec<AgentState>,
    /// Parameter bundle, validated at construction.
    pub params: SimParams,
    /// Total simulation time elapsed.
    pub time: f32,
    integrator: I,
}

impl World<SemiImplicitEuler> {
    /// Creates a world with the default semi-implicit Euler integrator.
    ///
    /// Fails fast on invalid parameters; the force models assume a validated
    /// bundle.
    pub fn new(params: SimParams, agents: Vec<AgentState>) -> Result<Self, ParamsError> {
        Self::with_integrator(params, agents, SemiImplicitEuler)
    }
}

impl<I: Integrator> World<I> {
    /// Creates a world with a caller-supplied integrator.
    pub fn with_integrator(
        params: SimParams,
        agents: Vec<AgentState>,
        integrator: I,
    ) -> Result<Self, ParamsError> {
        params.validate()?;
        info!(
            prey = agents.iter().filter(|a| a.kind == AgentKind::Prey).count(),
            predators = agents
                .iter()
                .filter(|a| a.kind == AgentKind::Predator)
                .count(),
            "world initialized"
        );
        Ok(Self {
            agents,
            params,
            time: 0.0,
            integrator,
        })
    }

    /// Number of prey agents.
    pub fn prey_count(&self) -> usize {
        self.agents
            .iter()
            .filter(|a| a.kind == AgentKind::Prey)
            .count()
    }

    /// Number of predator agents.
    pub fn predator_count(&self) -> usize {
        self.agents
            .iter()
            .filter(|a| a.kind == AgentKind::Predator)
            .count()
    }

    /// Advances the simulation by one timestep.
    ///
    /// Rebuilds the spatial index from the current snapshot, runs both
    /// phases and advances the clock. On error nothing has been mutated —
    /// the tick is considered not to have occurred.
    pub fn tick(&mut self, dt: f32) -> Result<(), TickError> {
        let index = SpatialIndex::build(&self.agents).map_err(TickError::Index)?;
        let planned = self.plan(&index);

        let escaping = planned
            .iter()
            .filter(|p| matches!(p.activity, Activity::Prey(Drive::Escaping)))
            .count();
        if escaping > 0 {
            debug!(escaping, time = self.time, "prey evading predators");
        }

        self.apply(&planned, dt);
        self.time += dt;
        Ok(())
    }

    /// Phase 1: computes every agent's net force and activity against the
    /// pre-tick snapshot.
    ///
    /// Read-only over all agent state; parallel over agents. The returned
    /// buffer is indexed like `self.agents`.
    pub fn plan(&self, query: &(impl NeighborQuery + Sync)) -> Vec<Planned> {
        let agents = &self.agents;
        agents
            .par_iter()
            .enumerate()
            .map(|(i, agent)| match agent.kind {
                AgentKind::Prey => {
                    let p = &self.params.prey;
                    let separation = query.within(agent.pos, p.separation_radius, AgentKind::Prey);
                    let alignment = query.within(agent.pos, p.alignment_radius, AgentKind::Prey);
                    let attraction = query.within(agent.pos, p.attraction_radius, AgentKind::Prey);
                    let predators =
                        query.within(agent.pos, p.attraction_radius, AgentKind::Predator);

                    let hood = PreyNeighborhood {
                        separation: &separation,
                        alignment: &alignment,
                        attraction: &attraction,
                        predators: &predators,
                    };
                    let (force, drive) = prey::net_force(i, agents, &hood, p);
                    Planned {
                        force,
                        activity: Activity::Prey(drive),
                    }
                }
                AgentKind::Predator => {
                    let p = &self.params.predator;
                    let separation = query.within(agent.pos, p.kill_radius, AgentKind::Predator);
                    let detected_prey =
                        query.within(agent.pos, p.detection_radius, AgentKind::Prey);

                    let hood = PredatorNeighborhood {
                        separation: &separation,
                        detected_prey: &detected_prey,
                    };
                    let (force, mode) = predator::net_force(i, agents, &hood, p);
                    Planned {
                        force,
                        activity: Activity::Predator(mode),
                    }
                }
            })
            .collect()
    }

    /// Phase 2: hands every buffered force to the integrator and refreshes
    /// headings.
    ///
    /// Mutates disjoint per-agent state in parallel. `planned` must be the
    /// buffer returned by [`World::plan`] for the current snapshot.
    pub fn apply(&mut self, planned: &[Planned], dt: f32) {
        debug_assert_eq!(planned.len(), self.agents.len());
        let integrator = &self.integrator;
        self.agents
            .par_iter_mut()
            .zip(planned.par_iter())
            .for_each(|(agent, plan)| {
                integrator.apply_force(agent, plan.force, dt);
                agent.update_heading();
            });
    }
}
