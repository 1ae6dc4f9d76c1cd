/// cubelab core - host-independent state for the cube demos
///
/// Provides the cube mesh, rotation state driven by key presses, the
/// model/view/projection and normal matrices, demo presets, and a CPU
/// reference of the lighting the shaders implement.

pub mod demo;
pub mod geometry;
pub mod input;
pub mod lighting;
pub mod projection;
pub mod texture;
pub mod transform;

// Re-export commonly used types
pub use demo::{DemoConfig, DemoKind, ParseDemoError, Surface};
pub use geometry::{Mesh, Triangle, Vertex, VertexAttribute};
pub use input::Key;
pub use lighting::{Lighting, Shading};
pub use projection::Camera;
pub use texture::{Texture, TextureError};
pub use transform::{FrameMatrices, RotationState, Transform};
