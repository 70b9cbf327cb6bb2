use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::queries::{SphereSweep, SweepHit, SweepQuery};
use crate::config::{CONTACT_SKIN, KINDA_SMALL_NUMBER};

/// Static obstacle geometry supported by [`StaticCollisionWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StaticShape {
    Sphere { center: Vec3, radius: f32 },
    /// Axis-aligned box.
    Box { center: Vec3, half_extents: Vec3 },
    /// Infinite half-space; everything behind `normal` is solid.
    Plane { point: Vec3, normal: Vec3 },
}

/// Collider with a layer bit set used for mask filtering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticCollider {
    pub shape: StaticShape,
    pub layer: u32,
}

impl StaticCollider {
    pub fn new(shape: StaticShape) -> Self {
        Self { shape, layer: 1 }
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }
}

/// Brute-force collection of static colliders answering sphere sweeps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticCollisionWorld {
    colliders: Vec<StaticCollider>,
}

impl StaticCollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, collider: StaticCollider) -> usize {
        self.colliders.push(collider);
        self.colliders.len() - 1
    }

    pub fn add_shape(&mut self, shape: StaticShape) -> usize {
        self.add(StaticCollider::new(shape))
    }

    pub fn colliders(&self) -> &[StaticCollider] {
        &self.colliders
    }

    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl SweepQuery for StaticCollisionWorld {
    fn sweep(&self, sweep: &SphereSweep) -> Option<SweepHit> {
        self.colliders
            .iter()
            .filter(|collider| collider.layer & sweep.mask != 0)
            .filter_map(|collider| sweep_shape(sweep, &collider.shape))
            .reduce(SweepHit::closer)
    }
}

/// Sweeps a sphere against one shape by inflating the shape with the sphere
/// radius and casting the center as a ray.
pub fn sweep_shape(sweep: &SphereSweep, shape: &StaticShape) -> Option<SweepHit> {
    match *shape {
        StaticShape::Sphere { center, radius } => sweep_sphere(sweep, center, radius + sweep.radius),
        StaticShape::Box {
            center,
            half_extents,
        } => sweep_box(sweep, center, half_extents + Vec3::splat(sweep.radius)),
        StaticShape::Plane { point, normal } => {
            sweep_plane(sweep, point, normal.normalize_or_zero(), sweep.radius)
        }
    }
}

fn start_penetration(location: Vec3, normal: Vec3, depth: f32) -> SweepHit {
    SweepHit {
        location,
        normal,
        time: 0.0,
        start_penetrating: true,
        penetration_depth: depth,
    }
}

fn contact(sweep: &SphereSweep, time: f32, normal: Vec3) -> SweepHit {
    SweepHit {
        location: sweep.start.lerp(sweep.end, time),
        normal,
        time,
        start_penetrating: false,
        penetration_depth: 0.0,
    }
}

fn sweep_sphere(sweep: &SphereSweep, center: Vec3, radius: f32) -> Option<SweepHit> {
    let offset = sweep.start - center;
    let distance = offset.length();
    if distance < radius - CONTACT_SKIN {
        let normal = if distance < KINDA_SMALL_NUMBER {
            Vec3::Y
        } else {
            offset / distance
        };
        return Some(start_penetration(sweep.start, normal, radius - distance));
    }

    let length = sweep.length();
    if length < KINDA_SMALL_NUMBER {
        return None;
    }
    let dir = (sweep.end - sweep.start) / length;

    let b = offset.dot(dir);
    let c = offset.length_squared() - radius * radius;
    if c <= 0.0 {
        // Touching at the start: only motion into the surface is blocked.
        return (b < 0.0).then(|| contact(sweep, 0.0, offset.normalize_or(Vec3::Y)));
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let t = -b - discriminant.sqrt();
    if t < 0.0 || t > length {
        return None;
    }

    let point = sweep.start + dir * t;
    Some(contact(sweep, t / length, (point - center) / radius))
}

fn sweep_box(sweep: &SphereSweep, center: Vec3, half_extents: Vec3) -> Option<SweepHit> {
    let local = sweep.start - center;
    let depths = half_extents - local.abs();
    if depths.min_element() > CONTACT_SKIN {
        // Push out through the nearest face.
        let axis = if depths.x <= depths.y && depths.x <= depths.z {
            0
        } else if depths.y <= depths.z {
            1
        } else {
            2
        };
        let mut normal = Vec3::ZERO;
        normal[axis] = if local[axis] >= 0.0 { 1.0 } else { -1.0 };
        return Some(start_penetration(sweep.start, normal, depths[axis]));
    }

    let length = sweep.length();
    if length < KINDA_SMALL_NUMBER {
        return None;
    }
    let dir = (sweep.end - sweep.start) / length;

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = length;
    let mut entry_axis = None;

    for i in 0..3 {
        let origin_component = sweep.start[i];
        let dir_component = dir[i];
        let min = center[i] - half_extents[i];
        let max = center[i] + half_extents[i];

        if dir_component.abs() < 1e-6 {
            if origin_component < min - CONTACT_SKIN || origin_component > max + CONTACT_SKIN {
                return None;
            }
        } else {
            let inv_dir = 1.0 / dir_component;
            let mut t1 = (min - origin_component) * inv_dir;
            let mut t2 = (max - origin_component) * inv_dir;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            if t1 > t_enter {
                t_enter = t1;
                entry_axis = Some(i);
            }
            t_exit = f32::min(t_exit, t2);
        }
    }

    let axis = entry_axis?;
    if t_enter > t_exit || t_exit <= 0.0 || t_enter > length {
        return None;
    }
    // A start inside the entry face by more than the skin is leaving the box.
    if t_enter < 0.0 && -t_enter * dir[axis].abs() > CONTACT_SKIN {
        return None;
    }

    let mut normal = Vec3::ZERO;
    normal[axis] = -dir[axis].signum();
    Some(contact(sweep, t_enter.max(0.0) / length, normal))
}

fn sweep_plane(sweep: &SphereSweep, point: Vec3, normal: Vec3, radius: f32) -> Option<SweepHit> {
    if normal == Vec3::ZERO {
        return None;
    }

    let start_distance = (sweep.start - point).dot(normal) - radius;
    if start_distance < -CONTACT_SKIN {
        return Some(start_penetration(sweep.start, normal, -start_distance));
    }

    let end_distance = (sweep.end - point).dot(normal) - radius;
    if end_distance >= start_distance.min(0.0) {
        return None;
    }

    let time = if start_distance <= 0.0 {
        0.0
    } else {
        start_distance / (start_distance - end_distance)
    };
    Some(contact(sweep, time, normal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sweep_hits_inflated_sphere() {
        let sweep = SphereSweep::new(Vec3::new(0.0, 0.0, -10.0), Vec3::new(0.0, 0.0, 10.0), 0.5);
        let hit = sweep_shape(
            &sweep,
            &StaticShape::Sphere {
                center: Vec3::ZERO,
                radius: 1.5,
            },
        )
        .expect("sweep should hit");
        assert!(!hit.start_penetrating);
        assert_relative_eq!(hit.location.z, -2.0, epsilon = 1e-4);
        assert_relative_eq!(hit.normal.z, -1.0, epsilon = 1e-4);
        assert_relative_eq!(hit.time, 0.4, epsilon = 1e-4);
    }

    #[test]
    fn sweep_hits_box_face() {
        let sweep = SphereSweep::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0), 0.25);
        let hit = sweep_shape(
            &sweep,
            &StaticShape::Box {
                center: Vec3::ZERO,
                half_extents: Vec3::ONE,
            },
        )
        .expect("sweep should hit");
        assert_relative_eq!(hit.location.x, -1.25, epsilon = 1e-4);
        assert_eq!(hit.normal, Vec3::NEG_X);
    }

    #[test]
    fn start_inside_box_pushes_out_nearest_face() {
        let sweep = SphereSweep::new(Vec3::new(0.0, 0.9, 0.0), Vec3::new(0.0, 0.8, 0.0), 0.0);
        let hit = sweep_shape(
            &sweep,
            &StaticShape::Box {
                center: Vec3::ZERO,
                half_extents: Vec3::ONE,
            },
        )
        .expect("overlap should be reported");
        assert!(hit.start_penetrating);
        assert_eq!(hit.normal, Vec3::Y);
        assert_relative_eq!(hit.penetration_depth, 0.1, epsilon = 1e-5);
    }

    #[test]
    fn resting_on_box_face_blocks_inward_motion_only() {
        let cube = StaticShape::Box {
            center: Vec3::ZERO,
            half_extents: Vec3::ONE,
        };
        let inward = SphereSweep::new(Vec3::new(0.2, 1.0, 0.0), Vec3::new(0.4, 0.9, 0.0), 0.0);
        let hit = sweep_shape(&inward, &cube).expect("moving into the face should hit");
        assert_eq!(hit.time, 0.0);
        assert_eq!(hit.normal, Vec3::Y);

        let outward = SphereSweep::new(Vec3::new(0.2, 1.0, 0.0), Vec3::new(0.4, 1.1, 0.0), 0.0);
        assert!(sweep_shape(&outward, &cube).is_none());
    }

    #[test]
    fn plane_sweep_reports_crossing_fraction() {
        let sweep = SphereSweep::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -2.0, 0.0), 1.0);
        let hit = sweep_shape(
            &sweep,
            &StaticShape::Plane {
                point: Vec3::ZERO,
                normal: Vec3::Y,
            },
        )
        .expect("plane should be crossed");
        assert_relative_eq!(hit.time, 0.25, epsilon = 1e-5);
        assert_relative_eq!(hit.location.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn moving_away_from_plane_does_not_hit() {
        let sweep = SphereSweep::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 5.0, 0.0), 1.0);
        let plane = StaticShape::Plane {
            point: Vec3::ZERO,
            normal: Vec3::Y,
        };
        assert!(sweep_shape(&sweep, &plane).is_none());
    }

    #[test]
    fn overlap_within_skin_counts_as_touching() {
        let plane = StaticShape::Plane {
            point: Vec3::ZERO,
            normal: Vec3::Y,
        };
        let inward = SphereSweep::new(Vec3::new(0.0, -1.0e-6, 0.0), Vec3::new(1.0, -0.5, 0.0), 0.0);
        let hit = sweep_shape(&inward, &plane).expect("moving deeper should hit");
        assert!(!hit.start_penetrating);
        assert_eq!(hit.time, 0.0);
        assert_eq!(hit.location, inward.start);

        let along = SphereSweep::new(Vec3::new(0.0, -1.0e-6, 0.0), Vec3::new(1.0, -1.0e-6, 0.0), 0.0);
        assert!(sweep_shape(&along, &plane).is_none());

        let deep = SphereSweep::new(Vec3::new(0.0, -0.01, 0.0), Vec3::new(1.0, -0.01, 0.0), 0.0);
        let hit = sweep_shape(&deep, &plane).expect("overlap beyond the skin is reported");
        assert!(hit.start_penetrating);
        assert_relative_eq!(hit.penetration_depth, 0.01, epsilon = 1e-6);
    }

    #[test]
    fn touching_sphere_blocks_inward_motion_only() {
        let ball = StaticShape::Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
        };
        let start = Vec3::new(0.0, 1.0 - 1.0e-5, 0.0);
        let inward = SphereSweep::new(start, Vec3::new(0.1, 0.5, 0.0), 0.0);
        let hit = sweep_shape(&inward, &ball).expect("moving into the sphere should hit");
        assert!(!hit.start_penetrating);
        assert_eq!(hit.time, 0.0);
        assert_relative_eq!(hit.normal.y, 1.0, epsilon = 1e-5);

        let outward = SphereSweep::new(start, Vec3::new(0.1, 1.5, 0.0), 0.0);
        assert!(sweep_shape(&outward, &ball).is_none());
    }

    #[test]
    fn world_returns_closest_hit_and_honours_mask() {
        let mut world = StaticCollisionWorld::new();
        world.add(
            StaticCollider::new(StaticShape::Sphere {
                center: Vec3::new(0.0, 0.0, 3.0),
                radius: 0.5,
            })
            .with_layer(0b10),
        );
        world.add_shape(StaticShape::Sphere {
            center: Vec3::new(0.0, 0.0, 6.0),
            radius: 0.5,
        });

        let sweep = SphereSweep::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), 0.0);
        let hit = world.sweep(&sweep).expect("should hit something");
        assert_relative_eq!(hit.location.z, 2.5, epsilon = 1e-4);

        let hit = world.sweep(&sweep.with_mask(0b01)).expect("far sphere is on layer 1");
        assert_relative_eq!(hit.location.z, 5.5, epsilon = 1e-4);
    }
}
