//! Scene setup system
//!
//! This module contains the setup function that initializes the 3D scene:
//! camera, lights, the table, the configured dice and the score texts.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::dice3d::lifecycle::RollLifecycle;
use crate::dice3d::meshes::create_die_mesh_and_collider;
use crate::dice3d::types::*;

use super::dice::build_die_faces;

const TABLE_HALF_SIZE: f32 = 6.0;
const TABLE_THICKNESS: f32 = 0.2;
const DICE_SPACING: f32 = 1.2;

/// Main setup system - initializes the entire 3D scene
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<RollSettings>,
    score: Res<ScoreBoard>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 9.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    });

    // Table top; its surface is y = 0.
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(
            TABLE_HALF_SIZE * 2.0,
            TABLE_THICKNESS,
            TABLE_HALF_SIZE * 2.0,
        ))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.15, 0.35, 0.2),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_xyz(0.0, -TABLE_THICKNESS / 2.0, 0.0),
        Collider::cuboid(TABLE_HALF_SIZE, TABLE_THICKNESS / 2.0, TABLE_HALF_SIZE),
        RigidBody::Fixed,
        Restitution::coefficient(0.2),
        Friction::coefficient(0.8),
    ));

    let num_dice = settings.dice.len();
    for (i, die_type) in settings.dice.iter().enumerate() {
        let position = calculate_dice_position(i, num_dice);
        spawn_die(&mut commands, &mut meshes, &mut materials, *die_type, position, &settings);
    }

    spawn_score_texts(&mut commands, &score);

    info!("Table ready with {} dice", num_dice);
}

/// Starting position of die `index` out of `total`, in a row across the table
pub fn calculate_dice_position(index: usize, total: usize) -> Vec3 {
    let offset = (total.saturating_sub(1)) as f32 / 2.0;
    Vec3::new((index as f32 - offset) * DICE_SPACING, 1.0, 0.0)
}

/// Spawn one die with its physics body, extracted faces and lifecycle
pub fn spawn_die(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    die_type: DiceType,
    position: Vec3,
    settings: &RollSettings,
) -> Entity {
    let (mesh, collider, data) = create_die_mesh_and_collider(die_type);
    let faces = build_die_faces(die_type, &data.positions, &data.normals, settings);

    let material = materials.add(StandardMaterial {
        base_color: die_type.color(),
        perceptual_roughness: 0.4,
        metallic: 0.05,
        ..default()
    });

    commands
        .spawn((
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(material),
            Transform::from_translation(position),
            RigidBody::Dynamic,
            collider,
            Velocity::zero(),
            GravityScale(1.0),
            Restitution::coefficient(0.3),
            Friction::coefficient(0.6),
            ColliderMassProperties::Density(die_type.density()),
            Ccd::enabled(),
            Die::new(die_type),
            faces,
            RollLifecycle::new(settings.throw.clone()),
        ))
        .id()
}

fn spawn_score_texts(commands: &mut Commands, score: &ScoreBoard) {
    let text_font = |size: f32| TextFont {
        font_size: size,
        ..default()
    };

    commands.spawn((
        Text::new(score.current.text()),
        text_font(28.0),
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(12.0),
            ..default()
        },
        CurrentRollText,
    ));

    commands.spawn((
        Text::new(score.total.text()),
        text_font(22.0),
        TextColor(Color::srgb(0.85, 0.85, 0.85)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(46.0),
            left: Val::Px(12.0),
            ..default()
        },
        RollSumText,
    ));

    commands.spawn((
        Text::new(""),
        text_font(16.0),
        TextColor(Color::srgb(1.0, 0.8, 0.3)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(76.0),
            left: Val::Px(12.0),
            ..default()
        },
        Visibility::Hidden,
        VelocityDebugText,
    ));

    commands.spawn((
        Text::new("Drag and release to throw | SPACE roll | R reset | F faces | B boundary"),
        text_font(14.0),
        TextColor(Color::srgb(0.7, 0.7, 0.7)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(10.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
}
