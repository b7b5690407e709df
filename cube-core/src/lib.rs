/// Cube Core Library - 3x3x3 twisty puzzle model and layer rotation engine
///
/// This library holds the cube state, turns layers of it, decodes keys and
/// move notation into turns, and provides the geometry and projection helpers
/// shared by the front ends.

pub mod config;
pub mod cube;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod moves;
pub mod notation;
pub mod projection;
pub mod transform;

// Re-export commonly used types
pub use config::CubeConfig;
pub use cube::{CubeState, Cubelet, Face, FaceColor, FaceColors, CUBELET_COUNT};
pub use engine::{Axis, LayerRotationEngine, TurnCommand, LAYER_SIZE};
pub use error::{CubeError, NotationError, SnapError, TurnError, TurnResult};
pub use geometry::{Mesh, Triangle, Vertex};
pub use moves::{decode_turn, Move};
pub use notation::parse_moves;
pub use projection::{Camera, ProjectionMode, TERMINAL_CELL_ASPECT};
pub use transform::{OrbitState, Transform};
