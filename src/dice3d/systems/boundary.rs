//! Play-area boundary system
//!
//! Keeps a collision volume around the bounded input region. The boundary
//! is rebuilt from scratch when requested and whenever the viewport size
//! changes; the previous entity is despawned first.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier3d::prelude::*;

use crate::dice3d::geometry::BoundaryMesh;
use crate::dice3d::throw_control::{BoundedRegion, CameraProjector};
use crate::dice3d::types::*;

fn boundary_render_mesh(boundary: &BoundaryMesh) -> Mesh {
    let positions: Vec<[f32; 3]> = boundary.positions.iter().map(|p| p.to_array()).collect();
    let normals: Vec<[f32; 3]> = boundary.normals.iter().map(|n| n.to_array()).collect();

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_indices(Indices::U32(boundary.indices()))
}

/// Collider for a boundary mesh. Flat quads are visual only.
fn boundary_collider(
    boundary: &BoundaryMesh,
    shape: &BoundaryShape,
) -> Result<Option<Collider>, String> {
    if matches!(shape, BoundaryShape::Quad) {
        return Ok(None);
    }

    Collider::trimesh(boundary.positions.clone(), boundary.triangles.clone())
        .map(Some)
        .map_err(|e| format!("failed to build boundary collider: {:?}", e))
}

/// Rebuild the boundary when requested or when the window was resized
#[allow(clippy::too_many_arguments)]
pub fn rebuild_play_boundary(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rebuild: ResMut<BoundaryRebuild>,
    settings: Res<RollSettings>,
    region: Res<BoundedRegion>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    existing: Query<Entity, With<PlayAreaBoundary>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let viewport = window.size();
    if !rebuild.requested && rebuild.built_for == Some(viewport) {
        return;
    }

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let projector = CameraProjector {
        camera,
        transform: camera_transform,
        viewport,
    };

    let shape = &settings.region.boundary;
    // The camera may not know its render target yet; try again next frame.
    let Some(geometry) = region.boundary_geometry(&projector, shape) else {
        return;
    };

    rebuild.requested = false;
    rebuild.built_for = Some(viewport);

    replace_play_boundary(
        &mut commands,
        &mut meshes,
        &mut materials,
        existing.iter(),
        &geometry,
        shape,
    );

    info!(
        "Rebuilt play-area boundary ({:?}, {} triangles) for {}x{}",
        shape,
        geometry.triangles.len(),
        viewport.x,
        viewport.y
    );
}

/// Despawn every `existing` boundary entity and spawn one for `geometry`.
fn replace_play_boundary(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    existing: impl IntoIterator<Item = Entity>,
    geometry: &BoundaryMesh,
    shape: &BoundaryShape,
) {
    for entity in existing {
        commands.entity(entity).despawn();
    }

    if geometry.is_empty() {
        warn!("Play-area boundary is empty; nothing spawned");
        return;
    }

    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.6, 0.8, 1.0, 0.08),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: None,
        ..default()
    });

    let mut boundary = commands.spawn((
        Mesh3d(meshes.add(boundary_render_mesh(geometry))),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        PlayAreaBoundary,
    ));

    match boundary_collider(geometry, shape) {
        Ok(Some(collider)) => {
            boundary.insert((RigidBody::Fixed, collider, Friction::coefficient(0.3)));
        }
        Ok(None) => {}
        Err(e) => warn!("{}", e),
    }
}
