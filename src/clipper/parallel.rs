//! Line clipping against the parallel (orthographic) canonical volume.
//!
//! The volume is the axis-aligned box x in [-1,1], y in [-1,1], z in [-1,0]:
//! the front plane sits at z = 0 and the back plane at z = -1. Boundary
//! tests carry an epsilon so points sitting exactly on a face count as
//! inside.

use crate::math::{Vec4, FLOAT_EPSILON};

use super::{ClipPlane, Line, Outcode};

/// Plane order for sequential clipping. The back plane is resolved
/// before the front plane.
const PLANE_ORDER: [ClipPlane; 6] = [
    ClipPlane::Left,
    ClipPlane::Right,
    ClipPlane::Bottom,
    ClipPlane::Top,
    ClipPlane::Far,
    ClipPlane::Near,
];

/// Classifies a point against the six box planes.
pub fn outcode(p: &Vec4) -> Outcode {
    let mut code = Outcode::empty();
    if p.x < -1.0 - FLOAT_EPSILON {
        code |= Outcode::LEFT;
    } else if p.x > 1.0 + FLOAT_EPSILON {
        code |= Outcode::RIGHT;
    }
    if p.y < -1.0 - FLOAT_EPSILON {
        code |= Outcode::BOTTOM;
    } else if p.y > 1.0 + FLOAT_EPSILON {
        code |= Outcode::TOP;
    }
    if p.z < -1.0 - FLOAT_EPSILON {
        code |= Outcode::FAR;
    } else if p.z > FLOAT_EPSILON {
        code |= Outcode::NEAR;
    }
    code
}

/// Clips a line against the box.
///
/// Returns a new line with both endpoints inside the volume, or `None`
/// when the segment lies entirely outside. Returned endpoints have w = 1.
pub fn clip_line(line: &Line) -> Option<Line> {
    let out0 = outcode(&line.p0);
    let out1 = outcode(&line.p1);

    if (out0 | out1).is_empty() {
        return Some(*line);
    }
    if !(out0 & out1).is_empty() {
        return None;
    }

    // Each endpoint clips independently against the other's original
    // position as the fixed end of the segment.
    let p0 = clip_point(line.p0, line.p1);
    let p1 = clip_point(line.p1, line.p0);

    // Corner misses and off-segment overshoots fail revalidation.
    if outcode(&p0).is_empty() && outcode(&p1).is_empty() && p0.is_finite() && p1.is_finite() {
        Some(Line::new(p0, p1))
    } else {
        None
    }
}

/// Moves `point` onto every plane it still violates, walking the planes
/// in order. The outcode is refreshed after each cut so later cuts see
/// the already-clipped position.
fn clip_point(point: Vec4, anchor: Vec4) -> Vec4 {
    let mut current = point;
    for plane in PLANE_ORDER {
        if outcode(&current).contains(plane.bit()) {
            current = intersect(&current, &anchor, plane);
        }
    }
    current
}

/// Parametric intersection of the segment p0..p1 with one box plane:
/// t = (b - a0) / (a1 - a0) on the plane's axis, then the point is
/// (1-t)*p0 + t*p1 with the clipped axis pinned to the boundary.
fn intersect(p0: &Vec4, p1: &Vec4, plane: ClipPlane) -> Vec4 {
    let d = *p1 - *p0;
    match plane {
        ClipPlane::Left => {
            let q = p0.lerp(*p1, (-1.0 - p0.x) / d.x);
            Vec4::point(-1.0, q.y, q.z)
        }
        ClipPlane::Right => {
            let q = p0.lerp(*p1, (1.0 - p0.x) / d.x);
            Vec4::point(1.0, q.y, q.z)
        }
        ClipPlane::Bottom => {
            let q = p0.lerp(*p1, (-1.0 - p0.y) / d.y);
            Vec4::point(q.x, -1.0, q.z)
        }
        ClipPlane::Top => {
            let q = p0.lerp(*p1, (1.0 - p0.y) / d.y);
            Vec4::point(q.x, 1.0, q.z)
        }
        ClipPlane::Near => {
            let q = p0.lerp(*p1, (0.0 - p0.z) / d.z);
            Vec4::point(q.x, q.y, 0.0)
        }
        ClipPlane::Far => {
            let q = p0.lerp(*p1, (-1.0 - p0.z) / d.z);
            Vec4::point(q.x, q.y, -1.0)
        }
    }
}
