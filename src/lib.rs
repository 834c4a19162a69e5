//! Drag & Roll
//!
//! Physical dice you pick up with the pointer, drag around a bounded play
//! area and throw. When a die comes to rest the face pointing up is read
//! and added to a running sum.

pub mod dice3d;
