//! Rendering utilities for dice number labels
//!
//! Numbers are built as flat seven-segment meshes in the XY plane, facing
//! +Z. A label is then placed on its face with the mesh's forward axis
//! pointing into the die.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::dice3d::types::{DiceType, DieFace};

/// Scale applied to a label mesh (one unit tall) on each die type
pub fn get_label_scale(die_type: DiceType) -> f32 {
    match die_type {
        DiceType::D4 => 0.12,
        DiceType::D6 => 0.22,
        DiceType::D8 => 0.14,
        DiceType::D20 => 0.09,
    }
}

/// Local transform of a face label relative to its die.
///
/// The label sits at the face's anchor. Its mesh faces +Z, so it is rotated
/// to look along `label_forward` (into the die) and shows outward.
pub fn label_transform(face: &DieFace, scale: f32) -> Transform {
    let up_hint = if face.label_forward.y.abs() > 0.99 {
        Vec3::Z
    } else {
        Vec3::Y
    };

    Transform::from_translation(face.label_anchor)
        .looking_to(face.label_forward, up_hint)
        .with_scale(Vec3::splat(scale))
}

/// Create a mesh for a (possibly negative, possibly multi-digit) number
pub fn create_digit_mesh(value: i32) -> Mesh {
    let (positions, indices) = generate_number_geometry(value);
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; positions.len()];
    let uvs: Vec<[f32; 2]> = positions.iter().map(|p| [p[0] + 0.5, 0.5 - p[1]]).collect();

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
}

const DIGIT_WIDTH: f32 = 0.6;
const DIGIT_SPACING: f32 = 0.12;
const STROKE: f32 = 0.12;
const HALF_HEIGHT: f32 = 0.5;
const HALF_WIDTH: f32 = 0.3;

/// Segments lit for each digit, in `a b c d e f g` order.
const SEGMENTS: [[bool; 7]; 10] = [
    [true, true, true, true, true, true, false],
    [false, true, true, false, false, false, false],
    [true, true, false, true, true, false, true],
    [true, true, true, true, false, false, true],
    [false, true, true, false, false, true, true],
    [true, false, true, true, false, true, true],
    [true, false, true, true, true, true, true],
    [true, true, true, false, false, false, false],
    [true, true, true, true, true, true, true],
    [true, true, true, true, false, true, true],
];

/// Glyph of one character of a number label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Glyph {
    Minus,
    Digit(u32),
}

fn glyphs(value: i32) -> Vec<Glyph> {
    let mut glyphs = Vec::new();
    if value < 0 {
        glyphs.push(Glyph::Minus);
    }

    let digits = value.unsigned_abs().to_string();
    glyphs.extend(digits.chars().filter_map(|c| c.to_digit(10)).map(Glyph::Digit));
    glyphs
}

/// Vertex positions and indices for a whole number, centered on the origin
pub fn generate_number_geometry(value: i32) -> (Vec<[f32; 3]>, Vec<u32>) {
    let glyphs = glyphs(value);
    let count = glyphs.len() as f32;
    let total_width = count * DIGIT_WIDTH + (count - 1.0).max(0.0) * DIGIT_SPACING;
    let start_x = -total_width / 2.0 + DIGIT_WIDTH / 2.0;

    // 6 and 9 are underlined when they stand alone so they can be told apart
    // on a tumbling die.
    let underline = matches!(glyphs.as_slice(), [Glyph::Digit(6)] | [Glyph::Digit(9)]);

    let mut positions = Vec::new();
    let mut indices = Vec::new();
    for (i, glyph) in glyphs.iter().enumerate() {
        let x = start_x + i as f32 * (DIGIT_WIDTH + DIGIT_SPACING);
        add_glyph(&mut positions, &mut indices, *glyph, x);
    }

    if underline {
        let y = -HALF_HEIGHT - STROKE * 2.0;
        add_bar(
            &mut positions,
            &mut indices,
            Vec2::new(start_x - HALF_WIDTH, y),
            Vec2::new(start_x + HALF_WIDTH, y),
        );
    }

    (positions, indices)
}

fn add_glyph(positions: &mut Vec<[f32; 3]>, indices: &mut Vec<u32>, glyph: Glyph, x: f32) {
    let (l, r) = (x - HALF_WIDTH, x + HALF_WIDTH);
    let (top, mid, bottom) = (HALF_HEIGHT, 0.0, -HALF_HEIGHT);

    match glyph {
        Glyph::Minus => add_bar(positions, indices, Vec2::new(l, mid), Vec2::new(r, mid)),
        Glyph::Digit(digit) => {
            let segments = [
                (Vec2::new(l, top), Vec2::new(r, top)),
                (Vec2::new(r, top), Vec2::new(r, mid)),
                (Vec2::new(r, mid), Vec2::new(r, bottom)),
                (Vec2::new(l, bottom), Vec2::new(r, bottom)),
                (Vec2::new(l, mid), Vec2::new(l, bottom)),
                (Vec2::new(l, top), Vec2::new(l, mid)),
                (Vec2::new(l, mid), Vec2::new(r, mid)),
            ];
            let lit = SEGMENTS[(digit % 10) as usize];
            for ((from, to), on) in segments.into_iter().zip(lit) {
                if on {
                    add_bar(positions, indices, from, to);
                }
            }
        }
    }
}

/// A flat stroke from `from` to `to`, extended by half a stroke at both ends
/// so neighbouring segments meet at the corners.
fn add_bar(positions: &mut Vec<[f32; 3]>, indices: &mut Vec<u32>, from: Vec2, to: Vec2) {
    let Some(along) = (to - from).try_normalize() else {
        return;
    };
    let half = STROKE / 2.0;
    let across = along.perp() * half;
    let (from, to) = (from - along * half, to + along * half);

    let base = positions.len() as u32;
    for corner in [from - across, to - across, to + across, from + across] {
        positions.push([corner.x, corner.y, 0.0]);
    }

    // `across` is `along` turned counter-clockwise, so this winds towards +Z.
    indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}
