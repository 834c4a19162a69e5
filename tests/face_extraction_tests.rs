//! Tests for extracting scoreable faces from vertex streams

use bevy::prelude::*;
use dragroll::dice3d::geometry::{extract_faces, fan_area, group_by_normal};
use dragroll::dice3d::types::{FaceDetection, FaceExtractionSettings};

/// Flat-shaded cube of edge 2 (each face a quad of area 4), faces in the
/// order +x, -x, +y, -y, +z, -z.
fn cube() -> (Vec<Vec3>, Vec<Vec3>) {
    let mut positions = Vec::new();
    let mut normals = Vec::new();

    for normal in [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z] {
        let tangent = if normal.y.abs() > 0.5 { Vec3::X } else { Vec3::Y };
        let u = normal.cross(tangent).normalize();
        let v = normal.cross(u);
        for corner in [-u - v, u - v, u + v, -u + v] {
            positions.push(normal + corner);
            normals.push(normal);
        }
    }

    (positions, normals)
}

fn area_settings(min_surface_area: f32) -> FaceExtractionSettings {
    FaceExtractionSettings {
        detection: FaceDetection::Area { min_surface_area },
        ..Default::default()
    }
}

#[test]
fn test_cube_faces_numbered_in_encounter_order() {
    let (positions, normals) = cube();
    let faces = extract_faces(&positions, &normals, &area_settings(1.0));

    assert_eq!(faces.values(), vec![1, 2, 3, 4, 5, 6]);
    let found: Vec<Vec3> = faces.faces().iter().map(|f| f.normal).collect();
    assert_eq!(
        found,
        vec![Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z]
    );
}

#[test]
fn test_area_threshold_is_strict() {
    let (positions, normals) = cube();
    assert_eq!(extract_faces(&positions, &normals, &area_settings(3.99)).len(), 6);
    assert!(extract_faces(&positions, &normals, &area_settings(4.0)).is_empty());
}

#[test]
fn test_vertex_count_variant_starts_at_zero() {
    let (positions, normals) = cube();
    let settings = FaceExtractionSettings {
        detection: FaceDetection::VertexCount { min_vertices: 3 },
        first_value: 0,
        ..Default::default()
    };

    let faces = extract_faces(&positions, &normals, &settings);
    assert_eq!(faces.values(), vec![0, 1, 2, 3, 4, 5]);

    let strict = FaceExtractionSettings {
        detection: FaceDetection::VertexCount { min_vertices: 4 },
        ..settings
    };
    assert!(extract_faces(&positions, &normals, &strict).is_empty());
}

#[test]
fn test_labels_sit_on_face_plane() {
    let (positions, normals) = cube();
    let faces = extract_faces(&positions, &normals, &area_settings(1.0));
    for face in faces.faces() {
        let distance = face.label_anchor.dot(face.normal);
        assert!((distance - 1.0).abs() < 0.01);
        assert_eq!(face.label_forward, -face.normal);
    }
}

#[test]
fn test_fixed_label_distance() {
    let (positions, normals) = cube();
    let settings = FaceExtractionSettings {
        label_distance: Some(0.25),
        ..area_settings(1.0)
    };
    let faces = extract_faces(&positions, &normals, &settings);
    assert_eq!(faces.faces()[0].label_anchor, Vec3::new(0.25, 0.0, 0.0));
}

#[test]
fn test_fan_area_independent_of_start_vertex() {
    let square = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 2.0),
        Vec3::new(0.0, 0.0, 2.0),
    ];
    for start in 0..square.len() {
        let mut rotated = square.to_vec();
        rotated.rotate_left(start);
        assert!((fan_area(&rotated).unwrap() - 4.0).abs() < 1e-5);
    }
}

#[test]
fn test_degenerate_groups_are_skipped() {
    // One lonely vertex with its own normal, then a real face.
    let mut positions = vec![Vec3::new(0.0, 5.0, 0.0)];
    let mut normals = vec![Vec3::new(0.0, 0.0, 1.0)];
    let (cube_positions, cube_normals) = cube();
    positions.extend(&cube_positions[..4]);
    normals.extend(&cube_normals[..4]);

    let faces = extract_faces(&positions, &normals, &area_settings(1.0));
    assert_eq!(faces.len(), 1);
    assert_eq!(faces.faces()[0].normal, Vec3::X);
    assert_eq!(faces.faces()[0].value, 1);
}

#[test]
fn test_mismatched_lengths_use_shorter_list() {
    let (positions, normals) = cube();
    let faces = extract_faces(&positions, &normals[..8], &area_settings(1.0));
    assert_eq!(faces.len(), 2);
}

#[test]
fn test_noisy_normals_group_together() {
    let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Z];
    let normals = vec![
        Vec3::Y,
        Vec3::new(0.000_3, 1.0, 0.0).normalize(),
        Vec3::new(0.0, 1.0, -0.000_2).normalize(),
    ];
    let groups = group_by_normal(&positions, &normals, 3);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].vertices.len(), 3);
}

#[test]
fn test_empty_input_gives_no_faces() {
    assert!(extract_faces(&[], &[], &FaceExtractionSettings::default()).is_empty());
}
