pub mod geometry;
pub mod lifecycle;
pub mod meshes;
pub mod systems;
pub mod throw_control;
pub mod types;

pub use geometry::*;
pub use lifecycle::*;
pub use meshes::*;
pub use systems::*;
pub use throw_control::*;
pub use types::*;
