//! Roll settings and loading
//!
//! Everything tunable about dragging, throwing, the play area and face
//! extraction lives in `RollSettings`. Settings are read from a RON file
//! (JSON is accepted as a fallback) and every field has a default, so a
//! partial file is fine.

use std::collections::HashMap;
use std::path::Path;

use bevy::log::{info, warn};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::DiceType;

// ============================================================================
// Throw / lifecycle
// ============================================================================

/// Constants driving the drag → throw → settle sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrowSettings {
    /// How quickly the derived drag velocity follows the pointer (per second).
    pub velocity_change_speed: f32,
    /// Multiplier applied to the pointer velocity while dragging.
    pub manual_velocity_increase: f32,
    /// Converts target-point displacement into drag velocity units.
    pub drag_velocity_scale: f32,
    /// Releases at or below this speed put the die back down instead of throwing.
    pub min_throw_velocity: f32,
    pub throw_velocity_multiplier: f32,
    /// How quickly a dragged die follows its target (per second).
    pub follow_lerp_speed: f32,
    /// A die above this height is still in the air.
    pub roll_finish_height: f32,
    /// A die faster than this is still rolling.
    pub roll_finish_velocity: f32,
    /// How close to `roll_finish_height` a put-down die must get.
    pub landing_tolerance: f32,
    /// How close to the center an automatic roll must get before throwing.
    pub arrival_distance: f32,
    /// Seconds an automatic roll may spend centering before it throws from
    /// wherever the die got to.
    pub max_centering_time: f32,
    /// Speed range (before the throw multiplier) of automatic throws.
    pub auto_throw_speed: [f32; 2],
}

impl Default for ThrowSettings {
    fn default() -> Self {
        Self {
            velocity_change_speed: 12.0,
            manual_velocity_increase: 0.9,
            drag_velocity_scale: 1.0,
            min_throw_velocity: 0.5,
            throw_velocity_multiplier: 1.0,
            follow_lerp_speed: 12.0,
            roll_finish_height: 0.6,
            roll_finish_velocity: 0.05,
            landing_tolerance: 0.02,
            arrival_distance: 0.02,
            max_centering_time: 1.5,
            auto_throw_speed: [3.0, 5.0],
        }
    }
}

impl ThrowSettings {
    /// Ordered, non-negative automatic throw speed range.
    pub fn auto_throw_range(&self) -> (f32, f32) {
        let [a, b] = self.auto_throw_speed;
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        (low.max(0.0), high.max(0.0))
    }
}

// ============================================================================
// Play area
// ============================================================================

/// Shape of the collision volume built around the play area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoundaryShape {
    /// Vertical walls reaching `wall_offset` above and below the play plane.
    Fence { wall_offset: f32 },
    /// A single flat quad on the play plane (visual only).
    Quad,
    /// Pyramid from the camera through the region corners.
    Frustum { reach: f32 },
}

impl Default for BoundaryShape {
    fn default() -> Self {
        Self::Fence { wall_offset: 1.5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionSettings {
    /// Usable width as a percentage of the viewport, 0..=100.
    pub width_percentage: f32,
    /// Usable height as a percentage of the viewport, 0..=100.
    pub height_percentage: f32,
    /// Height of the horizontal plane dragged dice move on.
    pub plane_height: f32,
    /// Distance from the camera used when unprojecting screen points.
    pub projection_depth: f32,
    pub boundary: BoundaryShape,
}

impl Default for RegionSettings {
    fn default() -> Self {
        Self {
            width_percentage: 60.0,
            height_percentage: 70.0,
            plane_height: 1.2,
            projection_depth: 5.0,
            boundary: BoundaryShape::default(),
        }
    }
}

// ============================================================================
// Face extraction
// ============================================================================

/// How vertex groups are recognised as faces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FaceDetection {
    /// Keep groups whose fan-triangulated area exceeds the threshold.
    Area { min_surface_area: f32 },
    /// Keep groups with more than `min_vertices` vertices.
    VertexCount { min_vertices: usize },
}

impl Default for FaceDetection {
    fn default() -> Self {
        Self::Area {
            min_surface_area: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceExtractionSettings {
    pub detection: FaceDetection,
    /// Decimal places normals are rounded to before grouping.
    pub normal_precision: u32,
    /// Value given to the first detected face.
    pub first_value: i32,
    /// Fixed label distance from the die center. `None` puts each label on
    /// its face plane.
    pub label_distance: Option<f32>,
}

impl Default for FaceExtractionSettings {
    fn default() -> Self {
        Self {
            detection: FaceDetection::default(),
            normal_precision: 3,
            first_value: 1,
            label_distance: None,
        }
    }
}

// ============================================================================
// Display
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub current_prefix: String,
    pub sum_prefix: String,
    /// Shown while a roll is in flight.
    pub pending_text: String,
    /// Shown after a drag was put down without throwing.
    pub discarded_text: String,
    /// Show the drag velocity text and the debug gizmos.
    pub show_velocity_debug: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            current_prefix: "Roll: ".to_string(),
            sum_prefix: "Sum: ".to_string(),
            pending_text: "...".to_string(),
            discarded_text: "-".to_string(),
            show_velocity_debug: false,
        }
    }
}

// ============================================================================
// Root settings
// ============================================================================

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollSettings {
    #[serde(default = "default_dice")]
    pub dice: Vec<DiceType>,

    #[serde(default)]
    pub throw: ThrowSettings,

    #[serde(default)]
    pub region: RegionSettings,

    #[serde(default)]
    pub faces: FaceExtractionSettings,

    /// Explicit face values per die type, in extraction order.
    #[serde(default)]
    pub numbering: HashMap<DiceType, Vec<i32>>,

    #[serde(default)]
    pub display: DisplaySettings,
}

fn default_dice() -> Vec<DiceType> {
    vec![DiceType::D6, DiceType::D20]
}

impl Default for RollSettings {
    fn default() -> Self {
        Self {
            dice: default_dice(),
            throw: ThrowSettings::default(),
            region: RegionSettings::default(),
            faces: FaceExtractionSettings::default(),
            numbering: HashMap::new(),
            display: DisplaySettings::default(),
        }
    }
}

impl RollSettings {
    /// Parse settings text, trying RON first and JSON second.
    pub fn parse(text: &str) -> Result<Self, String> {
        match ron::de::from_str::<RollSettings>(text) {
            Ok(settings) => Ok(settings),
            Err(ron_err) => serde_json::from_str::<RollSettings>(text).map_err(|json_err| {
                format!("not valid RON ({}) or JSON ({})", ron_err, json_err)
            }),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        Self::parse(&text).map_err(|e| format!("failed to parse {}: {}", path.display(), e))
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// broken.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings at {}; using defaults", path.display());
            return Self::default();
        }

        match Self::load_from_file(path) {
            Ok(settings) => {
                info!("Loaded roll settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_ron(&self) -> Result<String, String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| format!("failed to serialize settings: {}", e))
    }

    /// Explicit numbering configured for `die_type`, if any.
    pub fn numbering_for(&self, die_type: DiceType) -> Option<&[i32]> {
        self.numbering.get(&die_type).map(Vec::as_slice)
    }
}
