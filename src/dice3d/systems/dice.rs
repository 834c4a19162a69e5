//! Dice lifecycle systems
//!
//! Bridges the engine-free [`RollLifecycle`] to Rapier bodies: each frame
//! every busy die is advanced with the current pointer sample and the shared
//! score board.

use bevy::log::warn;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::dice3d::geometry::extract_faces;
use crate::dice3d::lifecycle::{PhysicsBody, PointerSample, RollLifecycle, RollPhase};
use crate::dice3d::throw_control::PointerTarget;
use crate::dice3d::types::*;

/// [`PhysicsBody`] view over the Rapier components of one die.
pub struct RapierDieBody<'a> {
    pub transform: &'a mut Transform,
    pub velocity: &'a mut Velocity,
    pub gravity: &'a mut GravityScale,
}

impl PhysicsBody for RapierDieBody<'_> {
    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn set_position(&mut self, position: Vec3) {
        self.transform.translation = position;
    }

    fn velocity(&self) -> Vec3 {
        self.velocity.linvel
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity.linvel = velocity;
    }

    fn stop_spinning(&mut self) {
        self.velocity.angvel = Vec3::ZERO;
    }

    fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity.0 = if enabled { 1.0 } else { 0.0 };
    }
}

/// Extract the face set of a die and apply any configured numbering.
///
/// A numbering list that does not match the face count is ignored with a
/// warning, leaving the sequential values in place.
pub fn build_die_faces(
    die_type: DiceType,
    positions: &[Vec3],
    normals: &[Vec3],
    settings: &RollSettings,
) -> DieFaces {
    let mut faces = extract_faces(positions, normals, &settings.faces);

    if let Some(values) = settings.numbering_for(die_type) {
        if let Err(e) = faces.renumber(values) {
            warn!("{}: {}; keeping sequential values", die_type.name(), e);
        }
    }

    if faces.is_empty() {
        warn!("{}: no faces detected; rolls will be discarded", die_type.name());
    }

    faces
}

/// Advance every busy die by one frame.
pub fn advance_roll_lifecycles(
    time: Res<Time>,
    pointer: Res<PointerTarget>,
    mut score: ResMut<ScoreBoard>,
    mut dice_query: Query<
        (
            &mut RollLifecycle,
            &DieFaces,
            &mut Transform,
            &mut Velocity,
            &mut GravityScale,
        ),
        With<Die>,
    >,
) {
    let dt = time.delta_secs();
    let mut rng = rand::thread_rng();

    for (mut lifecycle, faces, mut transform, mut velocity, mut gravity) in dice_query.iter_mut() {
        if lifecycle.phase() == RollPhase::Idle {
            continue;
        }

        let sample = PointerSample {
            held: pointer.held,
            target: pointer.target.unwrap_or(transform.translation),
        };

        let mut body = RapierDieBody {
            transform: &mut *transform,
            velocity: &mut *velocity,
            gravity: &mut *gravity,
        };

        lifecycle.advance(dt, sample, &mut body, faces, &mut *score, &mut rng);
    }
}
