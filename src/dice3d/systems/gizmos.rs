//! Debug gizmos
//!
//! Drawn only while `display.show_velocity_debug` is set: world-space face
//! normals of every die, the drag velocity of the die being dragged, and the
//! play-plane region with the current pointer target.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::dice3d::lifecycle::{RollLifecycle, RollPhase};
use crate::dice3d::throw_control::{BoundedRegion, CameraProjector, PointerTarget};
use crate::dice3d::types::*;

const NORMAL_LENGTH: f32 = 0.25;

/// Line segments from each face's label anchor along its world-space normal.
pub fn face_normal_segments(transform: &Transform, faces: &DieFaces) -> Vec<(Vec3, Vec3)> {
    faces
        .faces()
        .iter()
        .map(|face| {
            let start = transform.transform_point(face.label_anchor);
            let normal = transform.rotation * face.normal;
            (start, start + normal * NORMAL_LENGTH)
        })
        .collect()
}

pub fn draw_debug_gizmos(
    mut gizmos: Gizmos,
    settings: Res<RollSettings>,
    region: Res<BoundedRegion>,
    pointer: Res<PointerTarget>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    dice_query: Query<(&Transform, &DieFaces, &RollLifecycle)>,
) {
    if !settings.display.show_velocity_debug {
        return;
    }

    for (transform, faces, lifecycle) in dice_query.iter() {
        for (start, end) in face_normal_segments(transform, faces) {
            gizmos.line(start, end, Color::srgb(0.2, 0.6, 1.0));
        }

        if lifecycle.phase() == RollPhase::Dragging {
            let velocity = lifecycle.derived_velocity();
            if velocity.length_squared() > 0.0 {
                gizmos.arrow(
                    transform.translation,
                    transform.translation + velocity,
                    Color::srgb(1.0, 0.3, 0.2),
                );
            }
        }
    }

    if let Some(target) = pointer.target {
        gizmos.sphere(Isometry3d::from_translation(target), 0.05, Color::WHITE);
    }

    let (Ok(window), Ok((camera, camera_transform))) = (windows.single(), camera_query.single())
    else {
        return;
    };

    let projector = CameraProjector {
        camera,
        transform: camera_transform,
        viewport: window.size(),
    };

    if let Some(corners) = region.corners(&projector) {
        let [a, b, c, d] = corners.on_plane;
        gizmos.linestrip([a, b, c, d, a], Color::srgb(1.0, 0.9, 0.2));
    }
}
