//! Ray and plane math
//!
//! Line/plane intersection used to map pointer positions onto the play
//! plane, plus a ray/sphere test used to pick dice under the cursor.

use bevy::prelude::*;

/// Denominators smaller than this are treated as "line parallel to plane".
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Intersect the line running through `origin` and `through` with a plane.
///
/// Returns `None` when the line is parallel to the plane (or `origin` and
/// `through` coincide). The line is unbounded in both directions, so the
/// returned point may lie behind `origin`.
pub fn intersect_line_plane(
    origin: Vec3,
    through: Vec3,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<Vec3> {
    let direction = through - origin;
    let denominator = plane_normal.dot(direction);
    if denominator.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = plane_normal.dot(plane_point - origin) / denominator;
    let hit = origin + direction * t;
    hit.is_finite().then_some(hit)
}

/// Distance along the ray to the first hit with a sphere, if any.
///
/// `direction` does not need to be normalized; the result is expressed in
/// units of its length. A ray starting inside the sphere reports `0.0`.
pub fn ray_sphere_distance(
    origin: Vec3,
    direction: Vec3,
    center: Vec3,
    radius: f32,
) -> Option<f32> {
    let a = direction.length_squared();
    if a < PARALLEL_EPSILON {
        return None;
    }

    let offset = origin - center;
    let c = offset.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }

    let b = offset.dot(direction);
    let discriminant = b * b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / a;
    (t >= 0.0).then_some(t)
}
