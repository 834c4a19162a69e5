//! Type definitions for the drag & roll dice table
//!
//! This module is organized into submodules:
//! - `dice` - Dice types, the `Die` component and extracted faces
//! - `score` - The shared score board and its displays
//! - `settings` - Roll settings and loading
//! - `ui` - Camera, text and scene marker components

pub mod dice;
pub mod score;
pub mod settings;
pub mod ui;

// Re-export all public types for convenient access
pub use dice::*;
pub use score::*;
pub use settings::*;
pub use ui::*;
