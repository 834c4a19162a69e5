//! Engine-independent geometry: plane projection, face extraction and
//! play-area boundary meshes.

pub mod boundary;
pub mod faces;
pub mod plane;

pub use boundary::*;
pub use faces::*;
pub use plane::*;
