//! Line clipping against the canonical view volumes.
//!
//! Clipping runs in canonical view space, after the view-volume transform
//! and before projection. Endpoints are classified with 6-bit outcodes and
//! segments are cut back with parametric intersections, one policy per
//! projection mode:
//!
//! - [`parallel`]: the axis-aligned box x,y in [-1,1], z in [-1,0].
//! - [`perspective`]: the symmetric frustum x,y in [z,-z] with the far
//!   plane at z = -1 and a per-line near boundary.
//!
//! Both policies are pure functions: `clip_line` returns a new line with
//! both endpoints inside the volume, or `None` when the segment lies
//! entirely outside. Inputs are never mutated.

pub mod parallel;
pub mod perspective;

use bitflags::bitflags;

use crate::math::Vec4;
use crate::view::Projection;

bitflags! {
    /// Boundary planes violated by a point, one bit per plane.
    ///
    /// Computed per endpoint, consumed within a single clip call and
    /// never stored.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Outcode: u8 {
        const LEFT = 32;
        const RIGHT = 16;
        const BOTTOM = 8;
        const TOP = 4;
        const FAR = 2;
        const NEAR = 1;
    }
}

/// One boundary plane of a canonical view volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipPlane {
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

impl ClipPlane {
    /// The outcode bit carried by this plane.
    pub const fn bit(self) -> Outcode {
        match self {
            ClipPlane::Left => Outcode::LEFT,
            ClipPlane::Right => Outcode::RIGHT,
            ClipPlane::Bottom => Outcode::BOTTOM,
            ClipPlane::Top => Outcode::TOP,
            ClipPlane::Near => Outcode::NEAR,
            ClipPlane::Far => Outcode::FAR,
        }
    }
}

/// A line segment between two homogeneous points.
///
/// Direction matters to the perspective near/far intersection formulas;
/// the outcode tests are direction-independent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub p0: Vec4,
    pub p1: Vec4,
}

impl Line {
    pub const fn new(p0: Vec4, p1: Vec4) -> Self {
        Self { p0, p1 }
    }
}

/// Clips a line against the canonical volume of the given projection mode.
pub fn clip_line(line: &Line, projection: Projection) -> Option<Line> {
    match projection {
        Projection::Parallel => parallel::clip_line(line),
        Projection::Perspective => perspective::clip_line(line),
    }
}
