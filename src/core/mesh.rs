use std::f32::consts::TAU;

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::settings::RenderSettings;
use crate::utils::math::direction_or;

/// One vertex of the generated cable tube.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CableVertex {
    pub position: Vec3,
    pub normal: Vec3,
    /// Direction along the cable at this ring.
    pub tangent: Vec3,
    pub uv: Vec2,
}

/// Triangle-list tube mesh wrapped around the particle chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CableMesh {
    pub vertices: Vec<CableVertex>,
    pub indices: Vec<u32>,
}

impl CableMesh {
    /// Vertex count for `num_points` rings; the UV seam is duplicated.
    pub fn required_vertex_count(num_points: usize, num_sides: u32) -> usize {
        num_points * (num_sides as usize + 1)
    }

    pub fn required_index_count(num_points: usize, num_sides: u32) -> usize {
        num_points.saturating_sub(1) * num_sides as usize * 6
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Builds the tube for an ordered list of particle positions.
    pub fn from_points(points: &[Vec3], render: &RenderSettings) -> Self {
        if points.len() < 2 || render.num_sides == 0 {
            return Self::default();
        }

        let num_sides = render.num_sides;
        let radius = render.width * 0.5;
        let last = points.len() - 1;

        let mut vertices =
            Vec::with_capacity(Self::required_vertex_count(points.len(), num_sides));
        for (i, &point) in points.iter().enumerate() {
            let prev = points[i.saturating_sub(1)];
            let next = points[(i + 1).min(last)];
            let forward = direction_or(prev, next, Vec3::Z);

            let frame = Quat::from_rotation_arc(Vec3::Z, forward);
            let right = frame * Vec3::X;
            let up = frame * Vec3::Y;

            let along = i as f32 / last as f32;
            for side in 0..=num_sides {
                let alpha = side as f32 / num_sides as f32;
                let (sin, cos) = (alpha * TAU).sin_cos();
                let normal = right * cos + up * sin;
                vertices.push(CableVertex {
                    position: point + normal * radius,
                    normal,
                    tangent: forward,
                    uv: Vec2::new(along * render.tile_material, alpha),
                });
            }
        }

        let stride = num_sides + 1;
        let mut indices = Vec::with_capacity(Self::required_index_count(points.len(), num_sides));
        for segment in 0..last as u32 {
            for side in 0..num_sides {
                let top_left = segment * stride + side;
                let bottom_left = (segment + 1) * stride + side;
                let top_right = top_left + 1;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[top_left, bottom_left, top_right]);
                indices.extend_from_slice(&[top_right, bottom_left, bottom_right]);
            }
        }

        Self { vertices, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn straight_points(count: usize) -> Vec<Vec3> {
        (0..count).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect()
    }

    #[test]
    fn counts_match_ring_layout() {
        let render = RenderSettings {
            width: 2.0,
            num_sides: 4,
            tile_material: 3.0,
        };
        let mesh = CableMesh::from_points(&straight_points(11), &render);
        assert_eq!(mesh.vertices.len(), CableMesh::required_vertex_count(11, 4));
        assert_eq!(mesh.vertices.len(), 55);
        assert_eq!(mesh.indices.len(), CableMesh::required_index_count(11, 4));
        assert_eq!(mesh.triangle_count(), 80);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn ring_vertices_sit_at_half_width() {
        let render = RenderSettings {
            width: 2.0,
            num_sides: 6,
            tile_material: 1.0,
        };
        let points = straight_points(3);
        let mesh = CableMesh::from_points(&points, &render);
        for (i, vertex) in mesh.vertices.iter().enumerate() {
            let ring = i / 7;
            let offset = vertex.position - points[ring];
            assert_relative_eq!(offset.length(), 1.0, epsilon = 1e-4);
            assert_relative_eq!(offset.dot(Vec3::X), 0.0, epsilon = 1e-4);
            assert_relative_eq!(vertex.tangent.x, 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn uvs_tile_along_length() {
        let render = RenderSettings {
            width: 1.0,
            num_sides: 2,
            tile_material: 4.0,
        };
        let mesh = CableMesh::from_points(&straight_points(5), &render);
        let last = mesh.vertices.last().unwrap();
        assert_relative_eq!(last.uv.x, 4.0);
        assert_relative_eq!(last.uv.y, 1.0);
        assert_relative_eq!(mesh.vertices[0].uv.x, 0.0);
    }

    #[test]
    fn single_point_yields_empty_mesh() {
        let mesh = CableMesh::from_points(&[Vec3::ZERO], &RenderSettings::default());
        assert!(mesh.is_empty());
        assert!(mesh.vertices.is_empty());
    }
}
