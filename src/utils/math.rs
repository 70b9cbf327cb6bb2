//! Additional math helpers layered on top of `glam`.

use glam::Vec3;

use crate::config::KINDA_SMALL_NUMBER;

/// Splits `v` into the component along the unit `normal` and the remainder.
pub fn split_along_normal(v: Vec3, normal: Vec3) -> (f32, Vec3) {
    let along = v.dot(normal);
    (along, v - normal * along)
}

/// Direction from `a` to `b`, or `fallback` when the points coincide.
pub fn direction_or(a: Vec3, b: Vec3, fallback: Vec3) -> Vec3 {
    let delta = b - a;
    let len = delta.length();
    if len < KINDA_SMALL_NUMBER {
        fallback
    } else {
        delta / len
    }
}
