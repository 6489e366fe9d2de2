//! Spatial indexing for efficient neighbor queries.
//!
//! Provides a unified interface for radius queries filtered by agent kind.
//! The k-d tree index is rebuilt from the pre-tick snapshot every step; a
//! brute-force scan backs tests and tiny populations.

use glam::Vec3;
use kdtree::distance::squared_euclidean;
use kdtree::{ErrorKind as KdTreeError, KdTree};

use super::agent::{AgentKind, AgentState};

/// Type alias for the 3D k-d trees used for neighbor queries.
pub type Tree3D = KdTree<f32, usize, Vec<f32>>;

/// Result of a radius query: (`distance_squared`, agent index) pairs.
///
/// No ordering is guaranteed; force aggregation must be invariant to hit
/// order. The querying agent itself is included whenever it lies within the
/// radius — callers exclude self by index where required.
pub type QueryHits = Vec<(f32, usize)>;

/// Capability consumed by the tick's compute phase: all agents of one kind
/// within a radius of a point.
pub trait NeighborQuery {
    /// Returns every agent of `kind` within `radius` of `center`.
    fn within(&self, center: Vec3, radius: f32, kind: AgentKind) -> QueryHits;
}

/// Spatial index containing one k-d tree per population.
pub struct SpatialIndex {
    /// K-d tree over prey positions.
    prey: Tree3D,
    /// K-d tree over predator positions.
    predators: Tree3D,
}

impl SpatialIndex {
    /// Builds a spatial index from an agent snapshot.
    ///
    /// Indices stored in the trees refer into the snapshot slice. Fails on
    /// non-finite coordinates.
    pub fn build(agents: &[AgentState]) -> Result<Self, KdTreeError> {
        let prey = build_tree(agents, AgentKind::Prey)?;
        let predators = build_tree(agents, AgentKind::Predator)?;

        Ok(Self { prey, predators })
    }
}

impl NeighborQuery for SpatialIndex {
    fn within(&self, center: Vec3, radius: f32, kind: AgentKind) -> QueryHits {
        let tree = match kind {
            AgentKind::Prey => &self.prey,
            AgentKind::Predator => &self.predators,
        };
        tree.within(&center.to_array(), radius.powi(2), &squared_euclidean)
            .unwrap_or_default()
            .into_iter()
            .map(|(dist, &idx)| (dist, idx))
            .collect()
    }
}

/// Brute-force query over an agent slice.
///
/// Returns the same hit sets as [`SpatialIndex`]; useful for unit tests and
/// for populations too small to justify a tree build.
pub struct LinearScan<'a> {
    /// Agent snapshot to scan.
    pub agents: &'a [AgentState],
}

impl NeighborQuery for LinearScan<'_> {
    fn within(&self, center: Vec3, radius: f32, kind: AgentKind) -> QueryHits {
        let radius_sq = radius.powi(2);
        self.agents
            .iter()
            .enumerate()
            .filter(|(_, agent)| agent.kind == kind)
            .filter_map(|(idx, agent)| {
                let dist_sq = agent.pos.distance_squared(center);
                (dist_sq <= radius_sq).then_some((dist_sq, idx))
            })
            .collect()
    }
}

/// Helper to build a k-d tree over all agents of one kind.
fn build_tree(agents: &[AgentState], kind: AgentKind) -> Result<Tree3D, KdTreeError> {
    let mut tree = KdTree::with_capacity(3, agents.len().max(1));
    for (i, agent) in agents.iter().enumerate() {
        if agent.kind == kind {
            tree.add(agent.pos.to_array().to_vec(), i)?;
        }
    }
    Ok(tree)
}
