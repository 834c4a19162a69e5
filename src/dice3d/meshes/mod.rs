//! Procedural dice meshes
//!
//! Every die is built from a convex hull and a list of polygon rings. The
//! resulting vertex stream is flat shaded (vertices are duplicated per
//! polygon), which is exactly what face extraction groups on.

pub mod d20;
pub mod d4;
pub mod d6;
pub mod d8;

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::dice3d::types::DiceType;

pub use d20::create_d20;
pub use d4::create_d4;
pub use d6::create_d6;
pub use d8::create_d8;

/// Flat-shaded triangle data for one die, plus the hull it was built from.
#[derive(Debug, Clone, Default)]
pub struct DieMeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub hull: Vec<Vec3>,
}

impl DieMeshData {
    /// Build from hull vertices and polygon rings (indices into `hull`).
    ///
    /// Rings may be wound either way; each polygon is flipped to face away
    /// from the origin.
    pub fn from_polygons(hull: Vec<Vec3>, polygons: &[&[usize]]) -> Self {
        let mut data = DieMeshData {
            hull,
            ..Default::default()
        };

        for ring in polygons {
            if ring.len() < 3 {
                continue;
            }
            let mut points: Vec<Vec3> = ring.iter().map(|i| data.hull[*i]).collect();
            let centroid = points.iter().copied().sum::<Vec3>() / points.len() as f32;
            let mut normal = (points[1] - points[0])
                .cross(points[2] - points[0])
                .normalize_or_zero();
            if normal.dot(centroid) < 0.0 {
                normal = -normal;
                points.reverse();
            }

            let base = data.positions.len() as u32;
            for i in 1..points.len() as u32 - 1 {
                data.indices.extend([base, base + i, base + i + 1]);
            }
            data.normals.extend(std::iter::repeat(normal).take(points.len()));
            data.positions.extend(points);
        }

        data
    }

    pub fn to_mesh(&self) -> Mesh {
        let positions: Vec<[f32; 3]> = self.positions.iter().map(|p| p.to_array()).collect();
        let normals: Vec<[f32; 3]> = self.normals.iter().map(|n| n.to_array()).collect();
        let uvs: Vec<[f32; 2]> = self.positions.iter().map(|_| [0.5, 0.5]).collect();

        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(self.indices.clone()))
    }

    pub fn convex_collider(&self, fallback_radius: f32) -> Collider {
        Collider::convex_hull(&self.hull).unwrap_or(Collider::ball(fallback_radius))
    }
}

/// Mesh data for the given die type.
pub fn create_die_mesh_data(die_type: DiceType) -> DieMeshData {
    match die_type {
        DiceType::D4 => create_d4(die_type.size()),
        DiceType::D6 => create_d6(die_type.size()),
        DiceType::D8 => create_d8(die_type.size()),
        DiceType::D20 => create_d20(die_type.size()),
    }
}

pub fn create_die_mesh_and_collider(die_type: DiceType) -> (Mesh, Collider, DieMeshData) {
    let data = create_die_mesh_data(die_type);
    let collider = match die_type {
        DiceType::D6 => {
            let half = die_type.size() / 3f32.sqrt();
            Collider::cuboid(half, half, half)
        }
        _ => data.convex_collider(die_type.size() * 0.8),
    };
    (data.to_mesh(), collider, data)
}

/// Read the parallel position / normal streams of a mesh.
///
/// Returns `None` if either attribute is missing or not `Float32x3`.
pub fn mesh_surface(mesh: &Mesh) -> Option<(Vec<Vec3>, Vec<Vec3>)> {
    let positions: Vec<Vec3> = match mesh.attribute(Mesh::ATTRIBUTE_POSITION)? {
        VertexAttributeValues::Float32x3(values) => values.iter().map(|p| Vec3::from(*p)).collect(),
        _ => return None,
    };
    let normals: Vec<Vec3> = match mesh.attribute(Mesh::ATTRIBUTE_NORMAL)? {
        VertexAttributeValues::Float32x3(values) => values.iter().map(|n| Vec3::from(*n)).collect(),
        _ => return None,
    };
    Some((positions, normals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice3d::geometry::extract_faces;
    use crate::dice3d::types::FaceExtractionSettings;

    #[test]
    fn test_every_die_extracts_its_face_count() {
        let settings = FaceExtractionSettings::default();
        for die_type in DiceType::ALL {
            let data = create_die_mesh_data(die_type);
            let faces = extract_faces(&data.positions, &data.normals, &settings);
            assert_eq!(
                faces.len(),
                die_type.max_value() as usize,
                "{} should have {} faces",
                die_type.name(),
                die_type.max_value()
            );
            let expected: Vec<i32> = (1..=die_type.max_value() as i32).collect();
            assert_eq!(faces.values(), expected);
        }
    }

    #[test]
    fn test_normals_point_outward() {
        for die_type in DiceType::ALL {
            let data = create_die_mesh_data(die_type);
            for (position, normal) in data.positions.iter().zip(&data.normals) {
                assert!(normal.dot(*position) > 0.0, "{} has an inward normal", die_type.name());
                assert!((normal.length() - 1.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_vertices_lie_on_circumsphere() {
        for die_type in DiceType::ALL {
            let data = create_die_mesh_data(die_type);
            for p in &data.hull {
                assert!((p.length() - die_type.size()).abs() < 1e-4, "{}", die_type.name());
            }
        }
    }

    #[test]
    fn test_mesh_surface_round_trip() {
        let data = create_die_mesh_data(DiceType::D8);
        let mesh = data.to_mesh();
        let (positions, normals) = mesh_surface(&mesh).unwrap();
        assert_eq!(positions, data.positions);
        assert_eq!(normals, data.normals);
    }

    #[test]
    fn test_short_rings_are_ignored() {
        let data = DieMeshData::from_polygons(vec![Vec3::X, Vec3::Y], &[&[0, 1]]);
        assert!(data.positions.is_empty());
        assert!(data.indices.is_empty());
    }
}
