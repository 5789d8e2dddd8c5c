//! Shapes supported by granular3d.

pub use self::ball::Ball;
pub use self::cuboid::Cuboid;
pub use self::triangle::Triangle;
pub use self::trimesh::{TriMesh, TriMeshBuilderError};

mod ball;
mod cuboid;
mod triangle;
mod trimesh;
