//! A CPU-based wireframe scene viewer.
//!
//! This crate implements the classic normalizing-transform viewing pipeline:
//! model edges are carried into a canonical view volume, clipped against its
//! six planes, flattened onto the projection plane, and mapped to pixels.
//! SDL2 is used only for window management and display.
//!
//! # Quick Start
//!
//! ```ignore
//! use wireview::prelude::*;
//!
//! let scene = Scene::house();
//! let mut canvas = Canvas::new(800, 600);
//! let stats = render_scene(&scene, 800, 600, &mut canvas)?;
//! ```

// Public API - exposed to library consumers
pub mod canvas;
pub mod colors;
pub mod math;
pub mod pipeline;
pub mod scene;
pub mod transform;
pub mod view;
pub mod window;

// Internal modules - used within the crate only
pub(crate) mod clipper;

// Re-export commonly needed types at crate root for convenience
pub use canvas::Canvas;
pub use pipeline::{render_scene, FrameStats, LineSink, RenderError};
pub use scene::{Model, Scene, SceneError};
pub use transform::Transform;
pub use view::{ClipWindow, Projection, View, ViewError};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use wireview::prelude::*;
/// ```
pub mod prelude {
    // Canvas
    pub use crate::canvas::Canvas;
    pub use crate::colors;

    // Pipeline
    pub use crate::pipeline::{render_scene, FrameStats, LineSink, RenderError};

    // Scene
    pub use crate::scene::{Model, Scene, SceneError};

    // Transform
    pub use crate::transform::Transform;

    // View
    pub use crate::view::{viewport_matrix, ClipWindow, Projection, View, ViewError};

    // Math
    pub use crate::math::{Mat4, Vec2, Vec3, Vec4};

    // Window & Input
    pub use crate::window::{FrameLimiter, Key, Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::clipper::{clip_line, parallel, perspective, Line, Outcode};
}
