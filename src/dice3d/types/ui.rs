//! Scene markers and UI components
//!
//! Marker components used to find the camera, the score texts, face labels
//! and the play-area boundary from systems, plus the label render assets.

use std::collections::HashMap;

use bevy::prelude::*;

/// Marker component for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Text showing the most recent roll (or a pending / discarded placeholder)
#[derive(Component)]
pub struct CurrentRollText;

/// Text showing the running sum
#[derive(Component)]
pub struct RollSumText;

/// Text showing the derived drag velocity of the die being dragged
#[derive(Component)]
pub struct VelocityDebugText;

/// A number label spawned for one face of a die.
///
/// Labels are children of their die; `owner` lets the label system tear down
/// a whole generation without walking the hierarchy.
#[derive(Component, Debug, Clone, Copy)]
pub struct FaceLabel {
    pub owner: Entity,
    pub value: i32,
}

/// The collision volume / visual built around the play area
#[derive(Component)]
pub struct PlayAreaBoundary;

/// Set to request a rebuild of the play-area boundary on the next frame.
#[derive(Resource, Debug, Default)]
pub struct BoundaryRebuild {
    pub requested: bool,
    /// Viewport size the current boundary was built for.
    pub built_for: Option<Vec2>,
}

impl BoundaryRebuild {
    pub fn request(&mut self) {
        self.requested = true;
    }
}

/// Shared material and per-value meshes for face labels
#[derive(Resource)]
pub struct FaceLabelAssets {
    pub material: Handle<StandardMaterial>,
    pub meshes_by_value: HashMap<i32, Handle<Mesh>>,
}

impl FromWorld for FaceLabelAssets {
    fn from_world(world: &mut World) -> Self {
        let material = world
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial {
                base_color: Color::srgb(0.08, 0.08, 0.1),
                perceptual_roughness: 0.6,
                // Labels sit on the face plane; bias them towards the camera.
                depth_bias: 10.0,
                cull_mode: None,
                ..default()
            });

        Self {
            material,
            meshes_by_value: HashMap::new(),
        }
    }
}
