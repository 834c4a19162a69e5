//! Throw Control Systems
//!
//! Tracks the pointer each frame: clamps it into the bounded region and
//! projects it onto the play plane for the dice systems to follow.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::state::*;
use crate::dice3d::types::MainCamera;

/// [`ScreenProjector`] backed by a Bevy camera.
pub struct CameraProjector<'a> {
    pub camera: &'a Camera,
    pub transform: &'a GlobalTransform,
    pub viewport: Vec2,
}

impl ScreenProjector for CameraProjector<'_> {
    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn camera_position(&self) -> Vec3 {
        self.transform.translation()
    }

    fn screen_to_world(&self, screen: Vec2, depth: f32) -> Option<Vec3> {
        let ray = self.screen_ray(screen)?;
        Some(ray.get_point(depth))
    }

    fn screen_ray(&self, screen: Vec2) -> Option<Ray3d> {
        self.camera.viewport_to_world(self.transform, screen).ok()
    }
}

/// Sample the pointer and map it onto the play plane.
///
/// When the cursor leaves the window the last target is kept, so a die being
/// dragged stays where it was instead of jumping.
pub fn update_pointer_target(
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mouse: Res<ButtonInput<MouseButton>>,
    region: Res<BoundedRegion>,
    mut pointer: ResMut<PointerTarget>,
) {
    pointer.held = mouse.pressed(MouseButton::Left);

    let Ok(window) = windows.single() else {
        return;
    };

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let projector = CameraProjector {
        camera,
        transform: camera_transform,
        viewport: window.size(),
    };

    let cursor = window.cursor_position();
    pointer.cursor = cursor;
    pointer.center = region.center_point(&projector);

    if let Some(target) = cursor.and_then(|cursor| region.clamped_point(cursor, &projector)) {
        pointer.target = Some(target);
    }
}
