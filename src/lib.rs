//! A CPU software renderer for hierarchical scenes.
//!
//! Objects share one mesh and differ only by transform. Each object carries
//! a live orientation basis rotated a little every frame, and children
//! compose with their parents' rigid matrices. A camera with rooted,
//! first-person and third-person modes views the scene through a perspective
//! projection, and triangles are drawn into a depth-tested RGB frame buffer.
//! SDL2 is used only to show the frame and sample the keyboard.
//!
//! # Quick Start
//!
//! ```ignore
//! use airframe::prelude::*;
//!
//! let scene = demo::airplane_scene(Mesh::cube())?;
//! let mut engine = Engine::with_anchor(scene, demo::ANCHOR, 1280, 960)?;
//! engine.frame(&InputState::default());
//! engine.frame_buffer().to_image().save("frame.png")?;
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod demo;
pub mod engine;
pub mod input;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod scene;
pub mod transform;
pub mod window;

// Internal modules - used within the crate only
pub(crate) mod render;

// Re-export commonly needed types at crate root for convenience
pub use camera::{Camera, CameraMode};
pub use engine::{DrawMode, Engine, FrameStats, RasterizerType};
pub use mesh::{LoadError, Mesh};
pub use projection::Projection;
pub use render::{FrameBuffer, Pixel, Triangle, Vertex};
pub use scene::{ObjectDesc, ObjectId, Scene, SceneError, SceneParams};
pub use transform::{Basis, Transform};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use airframe::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{Camera, CameraMode};

    // Engine
    pub use crate::engine::{DrawMode, Engine, RasterizerType};

    // Scene
    pub use crate::demo;
    pub use crate::mesh::Mesh;
    pub use crate::scene::{ObjectDesc, Scene, SceneParams};
    pub use crate::transform::Transform;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Window & Input
    pub use crate::input::{Controls, InputState};
    pub use crate::window::{FrameLimiter, Window, WindowEvent, WINDOW_HEIGHT, WINDOW_WIDTH};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{
        EdgeFunctionRasterizer, FrameBuffer, Rasterizer, ScanlineRasterizer, Triangle, Vertex,
    };
}
