//! Face label spawning
//!
//! Whenever a die's face set changes, the previous generation of labels is
//! torn down and one label per face is spawned as a child of the die.

use bevy::prelude::*;

use crate::dice3d::types::*;

use super::rendering::{create_digit_mesh, get_label_scale, label_transform};

impl FaceLabelAssets {
    /// Mesh for `value`, built on first use.
    pub fn mesh_for(&mut self, value: i32, meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
        self.meshes_by_value
            .entry(value)
            .or_insert_with(|| meshes.add(create_digit_mesh(value)))
            .clone()
    }
}

/// Respawn labels for every die whose faces changed (including new dice).
pub fn refresh_face_labels(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut label_assets: ResMut<FaceLabelAssets>,
    dice_query: Query<(Entity, &Die, &DieFaces), Changed<DieFaces>>,
    label_query: Query<(Entity, &FaceLabel)>,
) {
    for (die_entity, die, faces) in dice_query.iter() {
        for (label_entity, label) in label_query.iter() {
            if label.owner == die_entity {
                commands.entity(label_entity).despawn();
            }
        }

        let scale = get_label_scale(die.die_type);
        let material = label_assets.material.clone();

        commands.entity(die_entity).with_children(|parent| {
            for face in faces.faces() {
                parent.spawn((
                    Mesh3d(label_assets.mesh_for(face.value, &mut meshes)),
                    MeshMaterial3d(material.clone()),
                    label_transform(face, scale),
                    FaceLabel {
                        owner: die_entity,
                        value: face.value,
                    },
                ));
            }
        });

        debug!("Spawned {} labels for {}", faces.len(), die.die_type.name());
    }
}
