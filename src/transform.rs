//! World placement of a model.
//!
//! Provides a [`Transform`] with position, rotation (Euler angles), scale
//! and a pivot point. Rotation and scale act about the pivot, so a model
//! whose vertices sit away from the origin can spin in place.

use crate::math::{Mat4, Vec3};

/// Position, rotation (Euler angles in radians), scale and pivot.
///
/// Mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform.set_pivot(center).rotate_y(0.1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3, // Euler angles in radians: x=pitch, y=yaw, z=roll
    scale: Vec3,
    pivot: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            pivot: Vec3::ZERO,
        }
    }
}

impl Transform {
    /// Identity transform: no offset, no rotation, unit scale.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    /// Translate by a delta vector.
    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position = self.position + delta;
        self
    }

    /// Get the rotation (Euler angles in radians).
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    /// Rotate around the Y axis (yaw).
    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotation.y += angle;
        self
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Set uniform scale (same value for x, y, z).
    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = Vec3::new(s, s, s);
        self
    }

    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    /// Set the point rotation and scale act about.
    pub fn set_pivot(&mut self, pivot: Vec3) -> &mut Self {
        self.pivot = pivot;
        self
    }

    /// Generate the world matrix.
    ///
    /// Order: Translation * Pivot * RotationX * RotationY * RotationZ *
    /// Scale * PivotInverse. Scale applies first, then the rotations,
    /// both about the pivot, then translation.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * Mat4::translation(self.pivot.x, self.pivot.y, self.pivot.z)
            * Mat4::rotation_x(self.rotation.x)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_z(self.rotation.z)
            * Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
            * Mat4::translation(-self.pivot.x, -self.pivot.y, -self.pivot.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    #[test]
    fn default_produces_the_identity_matrix() {
        let t = Transform::default();
        assert_eq!(t.to_matrix(), Mat4::identity());
    }

    #[test]
    fn fluent_api_chains_mutations() {
        let mut t = Transform::new();
        t.set_position(Vec3::new(1.0, 2.0, 3.0))
            .rotate_y(0.5)
            .set_scale_uniform(2.0);

        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(t.rotation().y, 0.5);
        assert_eq!(t.scale(), Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn rotation_spins_about_the_pivot() {
        let mut t = Transform::new();
        t.set_pivot(Vec3::new(1.0, 0.0, 0.0)).rotate_y(PI);

        let p = t.to_matrix() * Vec4::point(2.0, 0.0, 0.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-6);

        // The pivot itself stays put.
        let fixed = t.to_matrix() * Vec4::point(1.0, 0.0, 0.0);
        assert_relative_eq!(fixed.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(fixed.z, 0.0, epsilon = 1e-6);
    }
}
