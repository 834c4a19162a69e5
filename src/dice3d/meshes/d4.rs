use bevy::prelude::*;

use super::DieMeshData;

/// Regular tetrahedron with circumscribed radius `size`.
pub fn create_d4(size: f32) -> DieMeshData {
    let hull: Vec<Vec3> = [
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
    ]
    .iter()
    .map(|v| v.normalize() * size)
    .collect();

    let faces: [&[usize]; 4] = [&[1, 2, 3], &[0, 3, 2], &[0, 1, 3], &[0, 2, 1]];

    DieMeshData::from_polygons(hull, &faces)
}
