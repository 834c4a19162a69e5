//! Play-area boundary geometry
//!
//! Builds the triangle mesh that keeps a dragged die inside the bounded
//! input region. The mesh is always built from scratch; callers replace the
//! previous one wholesale.

use bevy::prelude::*;

use crate::dice3d::types::BoundaryShape;

/// Corner data for one bounded region, in world space.
///
/// Corners are ordered left-down, left-up, right-up, right-down in screen
/// terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryCorners {
    pub camera: Vec3,
    /// Corners projected onto the play plane.
    pub on_plane: [Vec3; 4],
    /// Unit directions from the camera through each corner.
    pub rays: [Vec3; 4],
}

/// Indexed triangle mesh with per-vertex normals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl BoundaryMesh {
    fn from_triangles(positions: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        let mut normals = vec![Vec3::ZERO; positions.len()];
        for [a, b, c] in &triangles {
            let (pa, pb, pc) = (
                positions[*a as usize],
                positions[*b as usize],
                positions[*c as usize],
            );
            let face_normal = (pb - pa).cross(pc - pa);
            for index in [a, b, c] {
                normals[*index as usize] += face_normal;
            }
        }
        let normals = normals
            .into_iter()
            .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
            .collect();

        Self {
            positions,
            normals,
            triangles,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Flattened index buffer.
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}

/// Build the boundary mesh for `shape`.
pub fn build_boundary(corners: &BoundaryCorners, shape: &BoundaryShape) -> BoundaryMesh {
    match shape {
        BoundaryShape::Fence { wall_offset } => fence(&corners.on_plane, *wall_offset),
        BoundaryShape::Quad => quad(&corners.on_plane),
        BoundaryShape::Frustum { reach } => frustum(corners, *reach),
    }
}

/// Four vertical walls around the projected rectangle.
///
/// Vertex `i` is corner `i` lowered by `wall_offset`, vertex `i + 4` the same
/// corner raised by it.
fn fence(on_plane: &[Vec3; 4], wall_offset: f32) -> BoundaryMesh {
    let lift = Vec3::Y * wall_offset.abs();
    let mut positions: Vec<Vec3> = on_plane.iter().map(|c| *c - lift).collect();
    positions.extend(on_plane.iter().map(|c| *c + lift));

    let mut triangles = Vec::with_capacity(8);
    for i in 0..4u32 {
        let j = (i + 1) % 4;
        triangles.push([i, j, j + 4]);
        triangles.push([i, j + 4, i + 4]);
    }

    BoundaryMesh::from_triangles(positions, triangles)
}

fn quad(on_plane: &[Vec3; 4]) -> BoundaryMesh {
    BoundaryMesh::from_triangles(on_plane.to_vec(), vec![[0, 1, 2], [0, 2, 3]])
}

/// Pyramid with the camera at its apex, reaching `reach` units along each
/// corner ray.
fn frustum(corners: &BoundaryCorners, reach: f32) -> BoundaryMesh {
    let mut positions = vec![corners.camera];
    positions.extend(corners.rays.iter().map(|ray| corners.camera + *ray * reach));

    BoundaryMesh::from_triangles(positions, vec![[1, 0, 2], [2, 0, 3], [3, 0, 4], [4, 0, 1]])
}
