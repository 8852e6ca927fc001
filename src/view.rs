//! View descriptor and the canonical viewing transforms.
//!
//! A [`View`] holds the eye point (PRP), the look-at target (SRP), the up
//! hint (VUP) and a clip window on the view plane. From it the builders
//! produce the matrices of the pipeline: N maps world space into the
//! canonical view volume, M flattens for projection, and V (built by
//! [`viewport_matrix`]) maps the canonical square onto the pixel
//! viewport.
//!
//! Degenerate descriptors are rejected with a [`ViewError`] before any
//! matrix is built, so NaN never enters the pipeline.

use std::error::Error;
use std::fmt;

use serde::Deserialize;

use crate::math::{Mat4, Vec3, FLOAT_EPSILON};

/// Projection mode of a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    Parallel,
    Perspective,
}

/// Clip window on the view plane plus the near/far plane distances.
///
/// `left`..`top` bound the window in view coordinates on the near plane;
/// `near` and `far` are positive distances in front of the eye. The
/// window may sit off-axis, in which case the view-volume transform
/// shears it back onto the z axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipWindow {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl ClipWindow {
    pub const fn new(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
        }
    }
}

/// Scene files carry the window as `[left, right, bottom, top, near, far]`.
impl From<[f32; 6]> for ClipWindow {
    fn from(b: [f32; 6]) -> Self {
        Self::new(b[0], b[1], b[2], b[3], b[4], b[5])
    }
}

/// A view descriptor that cannot produce finite transforms.
#[derive(Debug)]
pub enum ViewError {
    /// PRP and SRP coincide; there is no view direction.
    EyeAtTarget,
    /// VUP is parallel to the view direction; there is no horizontal.
    UpAlongViewNormal,
    /// A clip-window pair collapses to zero extent, or a plane sits at
    /// the eye.
    EmptyWindow(&'static str),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::EyeAtTarget => write!(f, "eye and look-at target coincide"),
            ViewError::UpAlongViewNormal => {
                write!(f, "up vector is parallel to the view direction")
            }
            ViewError::EmptyWindow(what) => write!(f, "degenerate clip window: {what}"),
        }
    }
}

impl Error for ViewError {}

/// View descriptor: the immutable inputs of one frame's transforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    pub projection: Projection,
    pub prp: Vec3,
    pub srp: Vec3,
    pub vup: Vec3,
    pub clip: ClipWindow,
}

impl View {
    pub const fn new(
        projection: Projection,
        prp: Vec3,
        srp: Vec3,
        vup: Vec3,
        clip: ClipWindow,
    ) -> Self {
        Self {
            projection,
            prp,
            srp,
            vup,
            clip,
        }
    }

    /// View-aligned orthonormal basis (u, v, n).
    ///
    /// n points from the target back toward the eye, u spans the window
    /// horizontal and v its vertical.
    pub fn basis(&self) -> Result<(Vec3, Vec3, Vec3), ViewError> {
        let gaze = self.prp - self.srp;
        if gaze.magnitude() < FLOAT_EPSILON {
            return Err(ViewError::EyeAtTarget);
        }
        let n = gaze.normalize();

        let horizontal = self.vup.cross(n);
        if horizontal.magnitude() < FLOAT_EPSILON {
            return Err(ViewError::UpAlongViewNormal);
        }
        let u = horizontal.normalize();
        let v = n.cross(u);
        Ok((u, v, n))
    }

    /// Builds N, the world to canonical-view-volume transform.
    ///
    /// Right-to-left: translate the eye to the origin, rotate (u,v,n)
    /// onto the axes, shear the window-center direction onto the z axis,
    /// then scale into the canonical bounds: x,y in [-1,1] and z in
    /// [-1,0] for parallel, the symmetric frustum with far plane z = -1
    /// for perspective.
    pub fn view_volume_matrix(&self) -> Result<Mat4, ViewError> {
        self.validate_window()?;
        let (u, v, n) = self.basis()?;
        let c = &self.clip;

        let translate = Mat4::translation(-self.prp.x, -self.prp.y, -self.prp.z);
        let rotate = Mat4::new([
            [u.x, u.y, u.z, 0.0],
            [v.x, v.y, v.z, 0.0],
            [n.x, n.y, n.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);

        // Direction of projection: from the eye through the window center.
        let dop = Vec3::new(
            (c.left + c.right) / 2.0,
            (c.bottom + c.top) / 2.0,
            -c.near,
        );
        let shear = Mat4::shear_xy(-dop.x / dop.z, -dop.y / dop.z);

        Ok(match self.projection {
            Projection::Parallel => {
                let scale = Mat4::scaling(
                    2.0 / (c.right - c.left),
                    2.0 / (c.top - c.bottom),
                    1.0 / (c.far - c.near),
                );
                // The extra translation brings the front plane to z = 0.
                scale * Mat4::translation(0.0, 0.0, c.near) * shear * rotate * translate
            }
            Projection::Perspective => {
                let scale = Mat4::scaling(
                    2.0 * c.near / ((c.right - c.left) * c.far),
                    2.0 * c.near / ((c.top - c.bottom) * c.far),
                    1.0 / c.far,
                );
                scale * shear * rotate * translate
            }
        })
    }

    /// Builds M, the projection-flatten transform.
    ///
    /// Parallel zeroes z; perspective keeps z and sets w = -z so the
    /// later dehomogenization performs the perspective divide.
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Parallel => Mat4::new([
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            Projection::Perspective => Mat4::new([
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, -1.0, 0.0],
            ]),
        }
    }

    /// Slides the eye and target together along the window horizontal.
    pub fn pan(&self, amount: f32) -> Result<View, ViewError> {
        let (u, _, _) = self.basis()?;
        Ok(self.translated(u * amount))
    }

    /// Moves the eye and target together along the view direction;
    /// positive amounts move into the scene.
    pub fn dolly(&self, amount: f32) -> Result<View, ViewError> {
        let (_, _, n) = self.basis()?;
        Ok(self.translated(-n * amount))
    }

    fn translated(&self, offset: Vec3) -> View {
        View {
            prp: self.prp + offset,
            srp: self.srp + offset,
            ..*self
        }
    }

    fn validate_window(&self) -> Result<(), ViewError> {
        let c = &self.clip;
        if (c.right - c.left).abs() < FLOAT_EPSILON {
            return Err(ViewError::EmptyWindow("left and right coincide"));
        }
        if (c.top - c.bottom).abs() < FLOAT_EPSILON {
            return Err(ViewError::EmptyWindow("bottom and top coincide"));
        }
        if (c.far - c.near).abs() < FLOAT_EPSILON {
            return Err(ViewError::EmptyWindow("near and far coincide"));
        }
        if c.near.abs() < FLOAT_EPSILON {
            return Err(ViewError::EmptyWindow("near plane at the eye"));
        }
        if c.far.abs() < FLOAT_EPSILON {
            return Err(ViewError::EmptyWindow("far plane at the eye"));
        }
        Ok(())
    }
}

/// Builds V, mapping the canonical [-1,1] square onto a width x height
/// pixel viewport.
///
/// The translation rides the w column so it survives the perspective
/// divide.
pub fn viewport_matrix(width: u32, height: u32) -> Mat4 {
    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;
    Mat4::new([
        [half_w, 0.0, 0.0, half_w],
        [0.0, half_h, 0.0, half_h],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}
