#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use collective::simulation::agent::AgentState;
use collective::simulation::params::PreyParams;
use collective::simulation::prey::{
    self, Drive, PreyNeighborhood, alignment_force, attraction_force, propulsion_force,
    separation_force,
};
use glam::Vec3;

fn test_params() -> PreyParams {
    // Reference constants: separation 2, alignment 15, attraction 80,
    // multipliers 5 / 1 / 0.5, diameter 0.5, beta 1, beta_escape 20,
    // alpha 0.1, gamma 0.1, friction 0.1.
    PreyParams::default()
}

fn prey_at(x: f32, y: f32) -> AgentState {
    AgentState::prey(Vec3::new(x, y, 0.0))
}

/// Hit list over all given indices; the distance field is recomputed by the
/// force terms, so a placeholder is fine.
fn hits(indices: &[usize]) -> Vec<(f32, usize)> {
    indices.iter().map(|&i| (0.0, i)).collect()
}

fn assert_close(actual: Vec3, expected: Vec3) {
    assert!(
        (actual - expected).length() < 1e-4,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn test_isolated_prey_reduces_to_cruise_and_friction() {
    let params = test_params();
    let mut me = prey_at(0.0, 0.0);
    me.vel = Vec3::new(2.0, 0.0, 0.0);
    let agents = vec![me];

    let empty: [(f32, usize); 0] = [];
    let hood = PreyNeighborhood {
        separation: &empty,
        alignment: &empty,
        attraction: &empty,
        predators: &empty,
    };
    let (force, drive) = prey::net_force(0, &agents, &hood, &params);

    // cruise (1 - 0.1*2) * (2,0,0) = (1.6,0,0); friction -0.1*2*(2,0,0) = (-0.4,0,0)
    assert_eq!(drive, Drive::Cruising);
    assert_close(force, Vec3::new(1.2, 0.0, 0.0));
}

#[test]
fn test_isolated_prey_at_rest_feels_nothing() {
    let params = test_params();
    let agents = vec![prey_at(0.0, 0.0)];

    let empty: [(f32, usize); 0] = [];
    let hood = PreyNeighborhood {
        separation: &empty,
        alignment: &empty,
        attraction: &empty,
        predators: &empty,
    };
    let (force, _) = prey::net_force(0, &agents, &hood, &params);

    assert_eq!(force, Vec3::ZERO);
}

#[test]
fn test_separation_equilibrium_at_twice_diameter() {
    let params = test_params();
    // Rest length is 2 * body_diameter = 1.0.
    let agents = vec![prey_at(0.0, 0.0), prey_at(1.0, 0.0)];

    let force = separation_force(0, &agents, &hits(&[0, 1]), &params);

    assert_eq!(force, Vec3::ZERO);
}

#[test]
fn test_separation_repels_when_closer_than_rest_length() {
    let params = test_params();
    let agents = vec![prey_at(0.0, 0.0), prey_at(0.6, 0.0)];

    let force = separation_force(0, &agents, &hits(&[0, 1]), &params);

    // (0.6 - 1.0) * 5 along +x: pushes away from the neighbor.
    assert_close(force, Vec3::new(-2.0, 0.0, 0.0));
}

#[test]
fn test_separation_attracts_when_farther_than_rest_length() {
    let params = test_params();
    let agents = vec![prey_at(0.0, 0.0), prey_at(1.5, 0.0)];

    let force = separation_force(0, &agents, &hits(&[0, 1]), &params);

    // (1.5 - 1.0) * 5 toward the neighbor.
    assert_close(force, Vec3::new(2.5, 0.0, 0.0));
}

#[test]
fn test_separation_cancels_for_symmetric_neighbors() {
    let params = test_params();
    // Three colinear prey spaced at the rest length; the middle agent's
    // contributions cancel by symmetry.
    let agents = vec![prey_at(0.0, 0.0), prey_at(1.0, 0.0), prey_at(2.0, 0.0)];

    let force = separation_force(1, &agents, &hits(&[0, 1, 2]), &params);

    assert!(force.x.abs() < 1e-6);
    assert_eq!(force.y, 0.0);
    assert_eq!(force.z, 0.0);
}

#[test]
fn test_separation_ignores_coincident_neighbor() {
    let params = test_params();
    let agents = vec![prey_at(3.0, 4.0), prey_at(3.0, 4.0)];

    let force = separation_force(0, &agents, &hits(&[0, 1]), &params);

    assert!(force.is_finite());
    assert_eq!(force, Vec3::ZERO);
}

#[test]
fn test_alignment_steers_toward_band_mean_velocity() {
    let params = test_params();
    let mut me = prey_at(0.0, 0.0);
    me.vel = Vec3::new(1.0, 0.0, 0.0);
    let mut near = prey_at(5.0, 0.0);
    near.vel = Vec3::new(0.0, 2.0, 0.0);
    let mut far = prey_at(6.0, 0.0);
    far.vel = Vec3::new(0.0, 4.0, 0.0);
    let agents = vec![me, near, far];

    let force = alignment_force(0, &agents, &hits(&[0, 1, 2]), &params);

    // mean (0,3,0) minus own (1,0,0), multiplier 1.
    assert_close(force, Vec3::new(-1.0, 3.0, 0.0));
}

#[test]
fn test_alignment_excludes_separation_zone() {
    let params = test_params();
    let me = prey_at(0.0, 0.0);
    // Inside the separation radius: present in the alignment query result
    // but outside the alignment band.
    let mut too_close = prey_at(1.0, 0.0);
    too_close.vel = Vec3::new(100.0, 100.0, 0.0);
    let agents = vec![me, too_close];

    let force = alignment_force(0, &agents, &hits(&[0, 1]), &params);

    assert_eq!(force, Vec3::ZERO);
}

#[test]
fn test_alignment_zero_with_empty_band() {
    let params = test_params();
    let mut me = prey_at(0.0, 0.0);
    me.vel = Vec3::new(1.0, 2.0, 0.0);
    let agents = vec![me];

    let force = alignment_force(0, &agents, &hits(&[0]), &params);

    assert_eq!(force, Vec3::ZERO);
}

#[test]
fn test_attraction_weighting_matches_formula() {
    let params = test_params();
    let agents = vec![prey_at(0.0, 0.0), prey_at(20.0, 0.0)];

    let force = attraction_force(0, &agents, &hits(&[0, 1]), &params);

    // weight = sqrt(1 - (1 - 20/80)^2), toward +x, multiplier 0.5.
    let weight = (1.0_f32 - (1.0 - 20.0 / 80.0_f32).powi(2)).sqrt();
    assert_close(force, Vec3::new(weight * 0.5, 0.0, 0.0));
}

#[test]
fn test_attraction_increases_with_distance_across_band() {
    let params = test_params();
    let mut previous = 0.0;
    for distance in [20.0, 40.0, 60.0, 79.0] {
        let agents = vec![prey_at(0.0, 0.0), prey_at(distance, 0.0)];
        let force = attraction_force(0, &agents, &hits(&[0, 1]), &params);
        assert!(
            force.x > previous,
            "attraction should grow with distance, got {} at d={distance}",
            force.x
        );
        previous = force.x;
    }
}

#[test]
fn test_attraction_reaches_multiplier_at_outer_radius() {
    let params = test_params();
    let agents = vec![prey_at(0.0, 0.0), prey_at(80.0, 0.0)];

    let force = attraction_force(0, &agents, &hits(&[0, 1]), &params);

    assert_close(force, Vec3::new(params.attraction_force_multiplier, 0.0, 0.0));
}

#[test]
fn test_attraction_excludes_alignment_zone() {
    let params = test_params();
    // At exactly the alignment radius: not strictly beyond it.
    let agents = vec![prey_at(0.0, 0.0), prey_at(15.0, 0.0)];

    let force = attraction_force(0, &agents, &hits(&[0, 1]), &params);

    assert_eq!(force, Vec3::ZERO);
}

#[test]
fn test_escape_points_away_from_single_predator() {
    let params = test_params();
    let me = prey_at(0.0, 0.0);
    let predator = AgentState::predator(Vec3::new(10.0, 0.0, 0.0));
    let agents = vec![me, predator];

    let (force, drive) = propulsion_force(&agents[0], &agents, &hits(&[1]), &params);

    // Predator due east, zero velocity: thrust beta_escape = 20 due west.
    assert_eq!(drive, Drive::Escaping);
    assert_close(force, Vec3::new(-20.0, 0.0, 0.0));
}

#[test]
fn test_escape_weights_closer_predators_harder() {
    let params = test_params();
    let me = prey_at(0.0, 0.0);
    let near = AgentState::predator(Vec3::new(1.0, 0.0, 0.0));
    let far = AgentState::predator(Vec3::new(0.0, 10.0, 0.0));
    let agents = vec![me, near, far];

    let (force, _) = propulsion_force(&agents[0], &agents, &hits(&[1, 2]), &params);

    // Directions are inverse-distance weighted: (-1,0,0)/1 + (0,-1,0)/10,
    // normalized, times beta_escape.
    let expected = Vec3::new(-1.0, -0.1, 0.0).normalize() * 20.0;
    assert_close(force, expected);
    assert!(force.x.abs() > force.y.abs());
}

#[test]
fn test_escape_thrust_damped_by_speed() {
    let params = test_params();
    let mut me = prey_at(0.0, 0.0);
    me.vel = Vec3::new(0.0, 5.0, 0.0);
    let predator = AgentState::predator(Vec3::new(10.0, 0.0, 0.0));
    let agents = vec![me, predator];

    let (force, _) = propulsion_force(&agents[0], &agents, &hits(&[1]), &params);

    // 20 - 0.1 * 25 = 17.5 due west.
    assert_close(force, Vec3::new(-17.5, 0.0, 0.0));
}

#[test]
fn test_escape_from_coincident_predator_is_finite() {
    let params = test_params();
    let me = prey_at(2.0, 2.0);
    let predator = AgentState::predator(Vec3::new(2.0, 2.0, 0.0));
    let agents = vec![me, predator];

    let (force, drive) = propulsion_force(&agents[0], &agents, &hits(&[1]), &params);

    // No direction to flee along; still escaping, but with zero thrust.
    assert_eq!(drive, Drive::Escaping);
    assert!(force.is_finite());
    assert_eq!(force, Vec3::ZERO);
}

#[test]
fn test_drive_flips_with_predator_presence() {
    let params = test_params();
    let me = prey_at(0.0, 0.0);
    let predator = AgentState::predator(Vec3::new(30.0, 0.0, 0.0));
    let agents = vec![me, predator];

    let empty: [(f32, usize); 0] = [];
    let (_, cruising) = propulsion_force(&agents[0], &agents, &empty, &params);
    let (_, escaping) = propulsion_force(&agents[0], &agents, &hits(&[1]), &params);

    assert_eq!(cruising, Drive::Cruising);
    assert_eq!(escaping, Drive::Escaping);
}
