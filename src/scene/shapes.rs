//! Procedural wireframe shapes.
//!
//! Generators populate a model's vertex and edge lists; the pipeline
//! consumes them like any hand-built model. All shapes are centered on
//! `center`, aligned with the world axes, and pivot on their center for
//! animation.

use std::f32::consts::TAU;

use crate::math::{Vec3, Vec4};
use crate::transform::Transform;

use super::{Model, SceneError};

/// Axis-aligned box outline.
pub fn cube(center: Vec3, width: f32, height: f32, depth: f32) -> Result<Model, SceneError> {
    if width <= 0.0 || height <= 0.0 || depth <= 0.0 {
        return Err(SceneError::BadShape("cube dimensions must be positive"));
    }

    let (hw, hh, hd) = (width / 2.0, height / 2.0, depth / 2.0);
    let vertices = vec![
        Vec4::point(center.x - hw, center.y - hh, center.z - hd),
        Vec4::point(center.x + hw, center.y - hh, center.z - hd),
        Vec4::point(center.x + hw, center.y - hh, center.z + hd),
        Vec4::point(center.x - hw, center.y - hh, center.z + hd),
        Vec4::point(center.x - hw, center.y + hh, center.z - hd),
        Vec4::point(center.x + hw, center.y + hh, center.z - hd),
        Vec4::point(center.x + hw, center.y + hh, center.z + hd),
        Vec4::point(center.x - hw, center.y + hh, center.z + hd),
    ];
    let edges = vec![
        vec![0, 1, 2, 3, 0],
        vec![4, 5, 6, 7, 4],
        vec![0, 4],
        vec![1, 5],
        vec![2, 6],
        vec![3, 7],
    ];
    Ok(pivoted(vertices, edges, center))
}

/// Circular cone outline: a base ring plus spokes to the apex.
pub fn cone(center: Vec3, radius: f32, height: f32, sides: u32) -> Result<Model, SceneError> {
    validate_round(radius, height, sides)?;

    let half = height / 2.0;
    let mut vertices = ring(center, radius, center.y - half, sides);
    vertices.push(Vec4::point(center.x, center.y + half, center.z));
    let apex = sides as usize;

    let mut edges = vec![closed_ring(0, sides)];
    for k in 0..sides as usize {
        edges.push(vec![k, apex]);
    }
    Ok(pivoted(vertices, edges, center))
}

/// Circular cylinder outline: two rings plus wall lines between them.
pub fn cylinder(center: Vec3, radius: f32, height: f32, sides: u32) -> Result<Model, SceneError> {
    validate_round(radius, height, sides)?;

    let half = height / 2.0;
    let mut vertices = ring(center, radius, center.y - half, sides);
    vertices.extend(ring(center, radius, center.y + half, sides));

    let n = sides as usize;
    let mut edges = vec![closed_ring(0, sides), closed_ring(n, sides)];
    for k in 0..n {
        edges.push(vec![k, n + k]);
    }
    Ok(pivoted(vertices, edges, center))
}

fn validate_round(radius: f32, height: f32, sides: u32) -> Result<(), SceneError> {
    if radius <= 0.0 || height <= 0.0 {
        return Err(SceneError::BadShape("radius and height must be positive"));
    }
    if sides < 3 {
        return Err(SceneError::BadShape("at least 3 sides are required"));
    }
    Ok(())
}

/// Vertices of a horizontal circle at the given height.
fn ring(center: Vec3, radius: f32, y: f32, sides: u32) -> Vec<Vec4> {
    (0..sides)
        .map(|k| {
            let angle = TAU * k as f32 / sides as f32;
            Vec4::point(
                center.x + radius * angle.cos(),
                y,
                center.z + radius * angle.sin(),
            )
        })
        .collect()
}

/// A closed polyline over `sides` consecutive indices starting at `first`.
fn closed_ring(first: usize, sides: u32) -> Vec<usize> {
    let mut edge: Vec<usize> = (first..first + sides as usize).collect();
    edge.push(first);
    edge
}

fn pivoted(vertices: Vec<Vec4>, edges: Vec<Vec<usize>>, center: Vec3) -> Model {
    let mut transform = Transform::new();
    transform.set_pivot(center);
    Model {
        vertices,
        edges,
        transform,
    }
}
