use bevy::prelude::*;

use super::DieMeshData;

/// Cube with circumscribed radius `size`.
pub fn create_d6(size: f32) -> DieMeshData {
    let h = size / 3f32.sqrt();

    // Bit 0 selects x, bit 1 y, bit 2 z.
    let hull: Vec<Vec3> = (0..8)
        .map(|i| {
            Vec3::new(
                if i & 1 == 0 { -h } else { h },
                if i & 2 == 0 { -h } else { h },
                if i & 4 == 0 { -h } else { h },
            )
        })
        .collect();

    let faces: [&[usize]; 6] = [
        &[0, 2, 6, 4],
        &[1, 3, 7, 5],
        &[0, 1, 5, 4],
        &[2, 3, 7, 6],
        &[0, 1, 3, 2],
        &[4, 5, 7, 6],
    ];

    DieMeshData::from_polygons(hull, &faces)
}
