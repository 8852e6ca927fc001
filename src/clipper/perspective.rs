//! Line clipping against the perspective canonical volume.
//!
//! The volume is a symmetric frustum with its apex at the origin: at
//! depth z the cross-section spans x,y in [z, -z], the far plane sits at
//! z = -1, and the near boundary is per line, the depth of the endpoint
//! closer to the eye. The side planes therefore move with z, and their
//! intersections solve a coupled equation instead of a fixed-bound one.

use crate::math::{Vec4, FLOAT_EPSILON};

use super::{ClipPlane, Line, Outcode};

/// Plane order for sequential clipping. The near boundary is resolved
/// before the far plane.
const PLANE_ORDER: [ClipPlane; 6] = [
    ClipPlane::Left,
    ClipPlane::Right,
    ClipPlane::Bottom,
    ClipPlane::Top,
    ClipPlane::Near,
    ClipPlane::Far,
];

/// Classifies a point against the frustum planes.
///
/// `z_near` is the near boundary of the line being clipped; the side
/// tests compare each coordinate against the frustum width at the
/// point's own depth.
pub fn outcode(p: &Vec4, z_near: f32) -> Outcode {
    let mut code = Outcode::empty();
    if p.x < p.z - FLOAT_EPSILON {
        code |= Outcode::LEFT;
    } else if p.x > -p.z + FLOAT_EPSILON {
        code |= Outcode::RIGHT;
    }
    if p.y < p.z - FLOAT_EPSILON {
        code |= Outcode::BOTTOM;
    } else if p.y > -p.z + FLOAT_EPSILON {
        code |= Outcode::TOP;
    }
    if p.z < -1.0 - FLOAT_EPSILON {
        code |= Outcode::FAR;
    } else if p.z > z_near + FLOAT_EPSILON {
        code |= Outcode::NEAR;
    }
    code
}

/// Clips a line against the frustum.
///
/// Returns a new line with both endpoints inside the volume, or `None`
/// when the segment lies entirely outside. Returned endpoints have w = 1.
pub fn clip_line(line: &Line) -> Option<Line> {
    // Near boundary of this line: the depth of its closer endpoint.
    let z_near = line.p0.z.max(line.p1.z);

    let out0 = outcode(&line.p0, z_near);
    let out1 = outcode(&line.p1, z_near);

    if (out0 | out1).is_empty() {
        return Some(*line);
    }
    if !(out0 & out1).is_empty() {
        return None;
    }

    // Each endpoint clips independently against the other's original
    // position as the fixed end of the segment.
    let p0 = clip_point(line.p0, line.p1, z_near);
    let p1 = clip_point(line.p1, line.p0, z_near);

    // Corner misses and off-segment overshoots fail revalidation.
    if outcode(&p0, z_near).is_empty()
        && outcode(&p1, z_near).is_empty()
        && p0.is_finite()
        && p1.is_finite()
    {
        Some(Line::new(p0, p1))
    } else {
        None
    }
}

/// Moves `point` onto every plane it still violates, walking the planes
/// in order. The outcode is refreshed after each cut so later cuts see
/// the already-clipped position.
fn clip_point(point: Vec4, anchor: Vec4, z_near: f32) -> Vec4 {
    let mut current = point;
    for plane in PLANE_ORDER {
        if outcode(&current, z_near).contains(plane.bit()) {
            current = intersect(&current, &anchor, plane, z_near);
        }
    }
    current
}

/// Parametric intersection of the segment p0..p1 with one frustum plane.
///
/// For the side planes the boundary itself depends on z, so t solves
/// x(t) = z(t) or x(t) = -z(t) (likewise for y) with signed deltas
/// d = p1 - p0; the interpolated z is recovered first and the clipped
/// coordinate is pinned to the boundary. Near and far clip on z directly
/// and interpolate x,y.
fn intersect(p0: &Vec4, p1: &Vec4, plane: ClipPlane, z_near: f32) -> Vec4 {
    let d = *p1 - *p0;
    match plane {
        ClipPlane::Left => {
            let q = p0.lerp(*p1, (p0.z - p0.x) / (d.x - d.z));
            Vec4::point(q.z, q.y, q.z)
        }
        ClipPlane::Right => {
            let q = p0.lerp(*p1, -(p0.x + p0.z) / (d.x + d.z));
            Vec4::point(-q.z, q.y, q.z)
        }
        ClipPlane::Bottom => {
            let q = p0.lerp(*p1, (p0.z - p0.y) / (d.y - d.z));
            Vec4::point(q.x, q.z, q.z)
        }
        ClipPlane::Top => {
            let q = p0.lerp(*p1, -(p0.y + p0.z) / (d.y + d.z));
            Vec4::point(q.x, -q.z, q.z)
        }
        ClipPlane::Near => {
            let q = p0.lerp(*p1, (z_near - p0.z) / d.z);
            Vec4::point(q.x, q.y, z_near)
        }
        ClipPlane::Far => {
            let q = p0.lerp(*p1, (-1.0 - p0.z) / d.z);
            Vec4::point(q.x, q.y, -1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn outcode_widens_with_depth() {
        // x = 0.7 is outside at z = -0.5 but inside at z = -0.9.
        assert_eq!(
            outcode(&Vec4::point(0.7, 0.0, -0.5), -0.5),
            Outcode::RIGHT
        );
        assert_eq!(
            outcode(&Vec4::point(0.7, 0.0, -0.9), -0.5),
            Outcode::empty()
        );
        assert_eq!(
            outcode(&Vec4::point(-0.7, -0.7, -0.5), -0.5),
            Outcode::LEFT | Outcode::BOTTOM
        );
    }

    #[test]
    fn outcode_uses_the_lines_near_boundary() {
        let p = Vec4::point(0.0, 0.0, -0.2);
        assert_eq!(outcode(&p, -0.5), Outcode::NEAR);
        assert_eq!(outcode(&p, -0.2), Outcode::empty());
    }

    #[test]
    fn line_inside_the_frustum_is_unchanged() {
        let line = Line::new(Vec4::point(0.2, 0.1, -0.5), Vec4::point(-0.3, 0.2, -0.8));
        assert_eq!(clip_line(&line), Some(line));
    }

    #[test]
    fn far_plane_clip_pins_z() {
        let line = Line::new(Vec4::point(0.0, 0.0, -0.5), Vec4::point(0.0, 0.0, -2.0));
        let clipped = clip_line(&line).unwrap();

        assert_eq!(clipped.p0, line.p0);
        assert_relative_eq!(clipped.p1.x, 0.0);
        assert_relative_eq!(clipped.p1.y, 0.0);
        assert_relative_eq!(clipped.p1.z, -1.0);
        assert_relative_eq!(clipped.p1.w, 1.0);
    }

    #[test]
    fn line_beyond_the_far_plane_is_rejected() {
        let line = Line::new(Vec4::point(0.0, 0.0, -1.5), Vec4::point(0.2, 0.0, -3.0));
        assert_eq!(clip_line(&line), None);
    }

    #[test]
    fn line_behind_the_eye_is_rejected() {
        // Positive z inverts the frustum tests, so both endpoints land on
        // a shared side plane.
        let line = Line::new(Vec4::point(0.0, 0.0, 0.5), Vec4::point(0.0, 0.0, 1.0));
        assert_eq!(clip_line(&line), None);
    }

    #[test]
    fn side_plane_clip_lands_on_the_boundary() {
        let line = Line::new(Vec4::point(-0.8, 0.0, -0.5), Vec4::point(0.0, 0.0, -0.5));
        let clipped = clip_line(&line).unwrap();

        assert_relative_eq!(clipped.p0.x, -0.5, epsilon = 1e-6);
        assert_relative_eq!(clipped.p0.z, -0.5, epsilon = 1e-6);
        assert_eq!(clipped.p1, line.p1);
    }

    #[test]
    fn near_plane_intersection_clamps_to_the_near_boundary() {
        let p0 = Vec4::point(0.0, 0.0, -0.1);
        let p1 = Vec4::point(0.0, 0.0, -1.0);
        let q = intersect(&p0, &p1, ClipPlane::Near, -0.5);
        assert_relative_eq!(q.z, -0.5);
        assert_relative_eq!(q.w, 1.0);
    }

    #[test]
    fn clipping_is_idempotent() {
        let line = Line::new(Vec4::point(-2.0, 0.3, -0.8), Vec4::point(2.0, -0.3, -0.9));
        let once = clip_line(&line).unwrap();
        let twice = clip_line(&once).unwrap();

        assert_relative_eq!(once.p0.x, twice.p0.x, epsilon = FLOAT_EPSILON);
        assert_relative_eq!(once.p0.y, twice.p0.y, epsilon = FLOAT_EPSILON);
        assert_relative_eq!(once.p0.z, twice.p0.z, epsilon = FLOAT_EPSILON);
        assert_relative_eq!(once.p1.x, twice.p1.x, epsilon = FLOAT_EPSILON);
        assert_relative_eq!(once.p1.y, twice.p1.y, epsilon = FLOAT_EPSILON);
        assert_relative_eq!(once.p1.z, twice.p1.z, epsilon = FLOAT_EPSILON);
    }

    #[test]
    fn clipped_endpoints_satisfy_the_frustum_bounds() {
        let lines = [
            Line::new(Vec4::point(-2.0, 0.0, -0.8), Vec4::point(2.0, 0.5, -0.9)),
            Line::new(Vec4::point(0.1, -2.0, -0.6), Vec4::point(-0.1, 2.0, -1.0)),
            Line::new(Vec4::point(0.0, 0.0, -0.5), Vec4::point(3.5, 2.0, -3.0)),
        ];

        for line in &lines {
            let z_near = line.p0.z.max(line.p1.z);
            let clipped = clip_line(line).expect("line crosses the volume");
            for p in [clipped.p0, clipped.p1] {
                assert!(p.x.abs() <= -p.z + FLOAT_EPSILON);
                assert!(p.y.abs() <= -p.z + FLOAT_EPSILON);
                assert!(p.z >= -1.0 - FLOAT_EPSILON && p.z <= z_near + FLOAT_EPSILON);
            }
        }
    }
}
