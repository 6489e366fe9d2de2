//! Geometric utility functions shared by the force models.

use glam::Vec3;

/// Projects a vector into the XY plane by clearing its z component.
///
/// Every force term is projected before its multiplier is applied, which is
/// what keeps the planar-motion invariant.
pub fn planar(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, 0.0)
}

/// Heading angle of a velocity vector in degrees, wrapped into `[0, 360)`.
///
/// Returns `None` for exactly zero planar velocity, where `atan2` is
/// degenerate; callers keep their previous heading in that case.
pub fn heading_degrees(v: Vec3) -> Option<f32> {
    if v.x == 0.0 && v.y == 0.0 {
        return None;
    }
    Some(v.y.atan2(v.x).to_degrees().rem_euclid(360.0))
}

/// Quadratic drag opposing the current velocity:
/// `-coefficient * |v| * v`, projected into the plane.
pub fn quadratic_drag(vel: Vec3, coefficient: f32) -> Vec3 {
    planar(-coefficient * vel.length() * vel)
}

/// Pairwise spring between an agent at `from` and a neighbor at `to` with
/// the given rest length.
///
/// Both populations use this one convention: a neighbor closer than
/// `rest_length` pushes the agent away, a neighbor farther pulls the agent
/// toward it, with magnitude linear in the gap. A coincident neighbor has no
/// direction to act along and contributes zero.
pub fn pair_spring(from: Vec3, to: Vec3, rest_length: f32) -> Vec3 {
    let difference = to - from;
    difference.normalize_or_zero() * (difference.length() - rest_length)
}
