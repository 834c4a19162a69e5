//! Throw Control Module
//!
//! This module handles where the pointer lands on the table. The pointer is
//! clamped into a centered region of the viewport and projected onto the
//! horizontal plane that dragged dice follow.

mod state;
mod systems;

pub use state::*;
pub use systems::*;
