use bevy::prelude::*;

use super::DieMeshData;

/// Octahedron with its vertices on the axes at distance `size`.
pub fn create_d8(size: f32) -> DieMeshData {
    let hull = vec![
        Vec3::new(size, 0.0, 0.0),
        Vec3::new(-size, 0.0, 0.0),
        Vec3::new(0.0, size, 0.0),
        Vec3::new(0.0, -size, 0.0),
        Vec3::new(0.0, 0.0, size),
        Vec3::new(0.0, 0.0, -size),
    ];

    let mut faces: Vec<[usize; 3]> = Vec::with_capacity(8);
    for x in [0, 1] {
        for y in [2, 3] {
            for z in [4, 5] {
                faces.push([x, y, z]);
            }
        }
    }
    let rings: Vec<&[usize]> = faces.iter().map(|f| f.as_slice()).collect();

    DieMeshData::from_polygons(hull, &rings)
}
