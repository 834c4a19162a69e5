//! Dice-related types and components
//!
//! This module contains the die types, the `Die` component and the
//! extracted face set (`DieFace` / `DieFaces`) that results are read from.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Component attached to each die entity
#[derive(Component, Debug, Clone, Copy)]
pub struct Die {
    pub die_type: DiceType,
    /// Radius of the sphere used for pointer picking.
    pub pick_radius: f32,
}

impl Die {
    pub fn new(die_type: DiceType) -> Self {
        Self {
            die_type,
            pick_radius: die_type.pick_radius(),
        }
    }
}

/// All supported dice types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiceType {
    #[serde(rename = "d4")]
    D4,
    #[serde(rename = "d6")]
    D6,
    #[serde(rename = "d8")]
    D8,
    #[serde(rename = "d20")]
    D20,
}

impl DiceType {
    pub const ALL: [DiceType; 4] = [DiceType::D4, DiceType::D6, DiceType::D8, DiceType::D20];

    pub fn max_value(&self) -> u32 {
        match self {
            DiceType::D4 => 4,
            DiceType::D6 => 6,
            DiceType::D8 => 8,
            DiceType::D20 => 20,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DiceType::D4 => "D4",
            DiceType::D6 => "D6",
            DiceType::D8 => "D8",
            DiceType::D20 => "D20",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DiceType::D4 => Color::srgb(0.3, 0.4, 0.9),
            DiceType::D6 => Color::srgb(0.85, 0.85, 0.8),
            DiceType::D8 => Color::srgb(0.6, 0.2, 0.8),
            DiceType::D20 => Color::srgb(0.95, 0.75, 0.2),
        }
    }

    pub fn parse(s: &str) -> Option<DiceType> {
        match s.trim().to_lowercase().as_str() {
            "d4" => Some(DiceType::D4),
            "d6" => Some(DiceType::D6),
            "d8" => Some(DiceType::D8),
            "d20" => Some(DiceType::D20),
            _ => None,
        }
    }

    /// Physical density used for the collider mass.
    pub fn density(&self) -> f32 {
        match self {
            DiceType::D4 => 1.0,
            DiceType::D6 => 1.5,
            DiceType::D8 => 1.8,
            DiceType::D20 => 3.0,
        }
    }

    /// Circumscribed radius of the generated mesh.
    pub fn size(&self) -> f32 {
        match self {
            DiceType::D4 => 0.45,
            DiceType::D6 => 0.3 * 3f32.sqrt(),
            DiceType::D8 => 0.45,
            DiceType::D20 => 0.45,
        }
    }

    pub fn pick_radius(&self) -> f32 {
        self.size() * 1.1
    }
}

/// One scoreable side of a die, in the die's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DieFace {
    /// Outward unit normal.
    pub normal: Vec3,
    pub value: i32,
    /// Where the face's label is anchored (`normal * distance`).
    pub label_anchor: Vec3,
    /// Direction the label's forward axis points (into the die).
    pub label_forward: Vec3,
}

impl DieFace {
    pub fn new(normal: Vec3, value: i32, label_distance: f32) -> Self {
        Self {
            normal,
            value,
            label_anchor: normal * label_distance,
            label_forward: -normal,
        }
    }
}

/// The complete face set of one die.
///
/// Rebuilt as a whole whenever faces are re-extracted; label entities are
/// respawned from it when it changes.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct DieFaces {
    faces: Vec<DieFace>,
}

impl DieFaces {
    /// Angle (degrees) larger than any angle between two directions.
    pub const NO_ANGLE: f32 = 200.0;

    pub fn new(faces: Vec<DieFace>) -> Self {
        Self { faces }
    }

    pub fn faces(&self) -> &[DieFace] {
        &self.faces
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn values(&self) -> Vec<i32> {
        self.faces.iter().map(|face| face.value).collect()
    }

    /// The face whose world-space normal is closest to `up` for a die with
    /// the given orientation. `None` when there are no faces.
    pub fn closest_to(&self, rotation: Quat, up: Vec3) -> Option<&DieFace> {
        let mut best_angle = Self::NO_ANGLE;
        let mut best = None;

        for face in &self.faces {
            let world_normal = rotation * face.normal;
            let angle = world_normal.angle_between(up).to_degrees().abs();
            if angle < best_angle {
                best_angle = angle;
                best = Some(face);
            }
        }

        best
    }

    /// The face pointing most nearly to world up.
    pub fn closest_to_up(&self, rotation: Quat) -> Option<&DieFace> {
        self.closest_to(rotation, Vec3::Y)
    }

    /// Replace the values of every face, in face order.
    pub fn renumber(&mut self, values: &[i32]) -> Result<(), String> {
        if values.len() != self.faces.len() {
            return Err(format!(
                "numbering has {} values but the die has {} faces",
                values.len(),
                self.faces.len()
            ));
        }

        for (face, value) in self.faces.iter_mut().zip(values) {
            face.value = *value;
        }
        Ok(())
    }
}
