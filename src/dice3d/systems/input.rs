//! Input handling systems
//!
//! Pointer presses pick a die and start dragging it; keys trigger automatic
//! rolls, reset the score, re-extract faces and rebuild the play boundary.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier3d::prelude::*;

use crate::dice3d::geometry::ray_sphere_distance;
use crate::dice3d::lifecycle::RollLifecycle;
use crate::dice3d::meshes::mesh_surface;
use crate::dice3d::throw_control::{CameraProjector, PointerTarget, ScreenProjector};
use crate::dice3d::types::*;

use super::dice::{build_die_faces, RapierDieBody};

/// Start dragging the die under the cursor when the left button goes down
pub fn handle_pointer_press(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut dice_query: Query<(
        Entity,
        &Die,
        &mut RollLifecycle,
        &mut Transform,
        &mut Velocity,
        &mut GravityScale,
    )>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };

    let Some(cursor_position) = window.cursor_position() else {
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

    let Some(ray) = projector.screen_ray(cursor_position) else {
        return;
    };

    // Nearest die whose pick sphere the ray hits.
    let picked = dice_query
        .iter()
        .filter_map(|(entity, die, _, transform, _, _)| {
            ray_sphere_distance(
                ray.origin,
                *ray.direction,
                transform.translation,
                die.pick_radius,
            )
            .map(|distance| (entity, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity);

    let Some(entity) = picked else {
        return;
    };

    let Ok((_, die, mut lifecycle, mut transform, mut velocity, mut gravity)) =
        dice_query.get_mut(entity)
    else {
        return;
    };

    let mut body = RapierDieBody {
        transform: &mut *transform,
        velocity: &mut *velocity,
        gravity: &mut *gravity,
    };

    if !lifecycle.begin_drag(&mut body) {
        debug!("{} is still rolling; ignoring press", die.die_type.name());
    }
}

/// Centering targets for an automatic roll of dice with the given pick radii.
///
/// A single die goes to `center`. Several dice are spread evenly on a ring
/// around it, with neighbouring slots at least two pick radii apart.
pub fn auto_roll_slots(center: Vec3, radii: &[f32]) -> Vec<Vec3> {
    let count = radii.len();
    if count < 2 {
        return vec![center; count];
    }

    let spacing = 2.0 * radii.iter().copied().fold(0.0, f32::max);
    let ring = spacing / (2.0 * (std::f32::consts::PI / count as f32).sin());

    (0..count)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / count as f32;
            center + Vec3::new(angle.cos(), 0.0, angle.sin()) * ring
        })
        .collect()
}

/// Keyboard shortcuts
///
/// - Space: automatic roll of every resting die
/// - R: reset the running sum
/// - F: re-extract faces from the current meshes
/// - B: rebuild the play-area boundary
#[allow(clippy::too_many_arguments)]
pub fn handle_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    pointer: Res<PointerTarget>,
    settings: Res<RollSettings>,
    meshes: Res<Assets<Mesh>>,
    mut score: ResMut<ScoreBoard>,
    mut boundary: ResMut<BoundaryRebuild>,
    mut commands: Commands,
    mut dice_query: Query<(
        Entity,
        &Die,
        &Mesh3d,
        &mut RollLifecycle,
        &mut Transform,
        &mut Velocity,
        &mut GravityScale,
    )>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        if let Some(center) = pointer.center {
            let radii: Vec<f32> = dice_query.iter().map(|(_, die, ..)| die.pick_radius).collect();
            let slots = auto_roll_slots(center, &radii);

            let mut started = 0;
            for ((_, _, _, mut lifecycle, mut transform, mut velocity, mut gravity), slot) in
                dice_query.iter_mut().zip(slots)
            {
                let mut body = RapierDieBody {
                    transform: &mut *transform,
                    velocity: &mut *velocity,
                    gravity: &mut *gravity,
                };
                if lifecycle.begin_auto_roll(slot, &mut body) {
                    started += 1;
                }
            }
            info!("Automatic roll started for {} dice", started);
        } else {
            warn!("Table center is not known yet; cannot roll");
        }
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        score.reset();
        info!("Score reset");
    }

    if keyboard.just_pressed(KeyCode::KeyF) {
        for (entity, die, mesh, ..) in dice_query.iter() {
            let Some((positions, normals)) = meshes.get(&mesh.0).and_then(mesh_surface) else {
                warn!("{}: mesh has no readable surface; keeping faces", die.die_type.name());
                continue;
            };

            let faces = build_die_faces(die.die_type, &positions, &normals, &settings);
            info!("{}: re-extracted {} faces", die.die_type.name(), faces.len());
            commands.entity(entity).insert(faces);
        }
    }

    if keyboard.just_pressed(KeyCode::KeyB) {
        boundary.request();
    }
}
