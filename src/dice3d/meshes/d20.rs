use bevy::prelude::*;

use super::DieMeshData;

/// Icosahedron with circumscribed radius `size`.
pub fn create_d20(size: f32) -> DieMeshData {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let s = size / (1.0 + phi * phi).sqrt();

    let hull: Vec<Vec3> = vec![
        Vec3::new(0.0, 1.0, phi) * s,
        Vec3::new(0.0, -1.0, phi) * s,
        Vec3::new(0.0, 1.0, -phi) * s,
        Vec3::new(0.0, -1.0, -phi) * s,
        Vec3::new(1.0, phi, 0.0) * s,
        Vec3::new(-1.0, phi, 0.0) * s,
        Vec3::new(1.0, -phi, 0.0) * s,
        Vec3::new(-1.0, -phi, 0.0) * s,
        Vec3::new(phi, 0.0, 1.0) * s,
        Vec3::new(-phi, 0.0, 1.0) * s,
        Vec3::new(phi, 0.0, -1.0) * s,
        Vec3::new(-phi, 0.0, -1.0) * s,
    ];

    let faces: [&[usize]; 20] = [
        &[0, 1, 8],
        &[0, 8, 4],
        &[0, 4, 5],
        &[0, 5, 9],
        &[0, 9, 1],
        &[1, 6, 8],
        &[8, 6, 10],
        &[8, 10, 4],
        &[4, 10, 2],
        &[4, 2, 5],
        &[5, 2, 11],
        &[5, 11, 9],
        &[9, 11, 7],
        &[9, 7, 1],
        &[1, 7, 6],
        &[3, 6, 7],
        &[3, 10, 6],
        &[3, 2, 10],
        &[3, 11, 2],
        &[3, 7, 11],
    ];

    DieMeshData::from_polygons(hull, &faces)
}
