//! Face extraction
//!
//! Derives the scoreable sides of a die from its vertex stream. Vertices are
//! grouped by (quantized) normal, each group's planar area is measured with a
//! fan triangulation, and groups that pass the configured detector become
//! [`DieFace`]s numbered in encounter order.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::dice3d::types::{DieFace, DieFaces, FaceDetection, FaceExtractionSettings};

/// Lift applied to labels placed on the face plane so they don't z-fight.
const LABEL_LIFT: f32 = 0.002;

/// Vertices sharing one quantized normal, in first-encounter order.
#[derive(Debug, Clone)]
pub struct NormalGroup {
    pub normal: Vec3,
    pub vertices: Vec<Vec3>,
}

/// Quantize a normal into a hashable key, rounding each component to
/// `precision` decimal places.
pub fn normal_key(normal: Vec3, precision: u32) -> [i64; 3] {
    let scale = 10f32.powi(precision.min(7) as i32);
    [
        (normal.x * scale).round() as i64,
        (normal.y * scale).round() as i64,
        (normal.z * scale).round() as i64,
    ]
}

/// Group vertex positions by quantized normal.
///
/// `positions` and `normals` are parallel lists; extra entries in the longer
/// list are ignored. Group order follows the first time each normal is seen
/// in the vertex stream.
pub fn group_by_normal(positions: &[Vec3], normals: &[Vec3], precision: u32) -> Vec<NormalGroup> {
    let mut index_by_key: HashMap<[i64; 3], usize> = HashMap::new();
    let mut sums: Vec<Vec3> = Vec::new();
    let mut groups: Vec<NormalGroup> = Vec::new();

    for (position, normal) in positions.iter().zip(normals.iter()) {
        let key = normal_key(*normal, precision);
        let index = *index_by_key.entry(key).or_insert_with(|| {
            groups.push(NormalGroup {
                normal: *normal,
                vertices: Vec::new(),
            });
            sums.push(Vec3::ZERO);
            groups.len() - 1
        });
        groups[index].vertices.push(*position);
        sums[index] += *normal;
    }

    for (group, sum) in groups.iter_mut().zip(sums) {
        // Averaging smooths out export noise inside the quantization cell.
        if let Some(normal) = sum.try_normalize() {
            group.normal = normal;
        }
    }

    groups
}

/// Planar area of a vertex group, fanned out from its first vertex.
///
/// Returns `None` for groups with fewer than two vertices. Two vertices give
/// an area of zero.
pub fn fan_area(vertices: &[Vec3]) -> Option<f32> {
    if vertices.len() < 2 {
        return None;
    }

    let origin = vertices[0];
    let area = vertices[1..]
        .windows(2)
        .map(|pair| (origin - pair[0]).cross(origin - pair[1]).length() / 2.0)
        .sum();
    Some(area)
}

fn passes_detection(group: &NormalGroup, detection: &FaceDetection) -> bool {
    match detection {
        FaceDetection::Area { min_surface_area } => {
            fan_area(&group.vertices).is_some_and(|area| area > *min_surface_area)
        }
        FaceDetection::VertexCount { min_vertices } => group.vertices.len() > *min_vertices,
    }
}

/// Extract the scoreable faces of a die mesh.
///
/// Never fails: degenerate groups and groups without a usable normal are
/// skipped, so the result may be empty.
pub fn extract_faces(
    positions: &[Vec3],
    normals: &[Vec3],
    settings: &FaceExtractionSettings,
) -> DieFaces {
    let mut faces = Vec::new();
    let mut value = settings.first_value;

    for group in group_by_normal(positions, normals, settings.normal_precision) {
        if group.normal.try_normalize().is_none() {
            continue;
        }
        if !passes_detection(&group, &settings.detection) {
            continue;
        }

        let distance = match settings.label_distance {
            Some(distance) => distance,
            None => group.normal.dot(group.vertices[0]) + LABEL_LIFT,
        };
        faces.push(DieFace::new(group.normal, value, distance));
        value += 1;
    }

    DieFaces::new(faces)
}
