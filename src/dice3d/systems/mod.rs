//! Systems module for dice3d
//!
//! This module contains all the Bevy systems for the drag & roll table,
//! organized into submodules by functionality:
//!
//! - `setup`: Scene initialization (camera, lights, table, dice, score texts)
//! - `dice`: Rapier adapter and per-frame roll lifecycle
//! - `input`: Pointer picking and keyboard shortcuts
//! - `boundary`: Play-area boundary rebuilds
//! - `dice_face_labels`: Number labels for extracted faces
//! - `results`: Score and debug text updates
//! - `gizmos`: Debug drawing of face normals, drag velocity and the play region
//! - `rendering`: Number mesh generation for face labels

mod boundary;
mod dice;
mod dice_face_labels;
mod gizmos;
mod input;
pub mod rendering;
mod results;
mod setup;

// Re-export all public systems
pub use boundary::rebuild_play_boundary;
pub use dice::{advance_roll_lifecycles, build_die_faces, RapierDieBody};
pub use dice_face_labels::refresh_face_labels;
pub use gizmos::{draw_debug_gizmos, face_normal_segments};
pub use input::{auto_roll_slots, handle_keyboard, handle_pointer_press};
pub use results::{update_score_texts, update_velocity_debug};
pub use setup::{calculate_dice_position, setup, spawn_die};
