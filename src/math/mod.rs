//! Vector and matrix primitives for the viewing pipeline.

pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;

pub use mat4::Mat4;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;

/// Tolerance shared by the clipper's boundary tests and the view
/// builder's degeneracy checks.
pub const FLOAT_EPSILON: f32 = 1e-6;
