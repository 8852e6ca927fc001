//! Scene data model: a view plus the wireframe models it observes.
//!
//! A [`Scene`] is the explicit render context handed to the pipeline each
//! frame. Models come from three places: the built-in startup scene, a
//! JSON document (see [`file`]), or the procedural generators in
//! [`shapes`].

pub mod file;
pub mod shapes;

use std::error::Error;
use std::fmt;

use crate::math::{Vec3, Vec4};
use crate::transform::Transform;
use crate::view::{ClipWindow, Projection, View};

/// A structurally invalid scene: unreadable or malformed documents, bad
/// shape parameters, or edges referencing nonexistent vertices.
#[derive(Debug)]
pub enum SceneError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// An edge refers to a vertex index the model does not have.
    EdgeOutOfBounds {
        model: usize,
        edge: usize,
        index: usize,
        vertex_count: usize,
    },
    /// A shape parameter the generators cannot work with.
    BadShape(&'static str),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Io(err) => write!(f, "failed to read scene file: {err}"),
            SceneError::Json(err) => write!(f, "failed to parse scene file: {err}"),
            SceneError::EdgeOutOfBounds {
                model,
                edge,
                index,
                vertex_count,
            } => write!(
                f,
                "model {model} edge {edge} references vertex {index} \
                 but only {vertex_count} vertices exist"
            ),
            SceneError::BadShape(what) => write!(f, "bad shape parameter: {what}"),
        }
    }
}

impl Error for SceneError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SceneError::Io(err) => Some(err),
            SceneError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SceneError {
    fn from(err: std::io::Error) -> Self {
        SceneError::Io(err)
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        SceneError::Json(err)
    }
}

/// A wireframe model: vertices plus polyline edges into them.
///
/// Each edge is an ordered list of vertex indices; consecutive pairs are
/// the line segments the pipeline draws. The transform places the model
/// in world space and drives its animation.
#[derive(Clone, Debug)]
pub struct Model {
    pub vertices: Vec<Vec4>,
    pub edges: Vec<Vec<usize>>,
    pub transform: Transform,
}

impl Model {
    /// Builds a model from explicit vertex and edge lists.
    ///
    /// The spin pivot defaults to the vertex centroid so the model
    /// rotates in place.
    pub fn generic(vertices: Vec<Vec4>, edges: Vec<Vec<usize>>) -> Self {
        let mut transform = Transform::new();
        transform.set_pivot(centroid(&vertices));
        Self {
            vertices,
            edges,
            transform,
        }
    }

    /// Number of line segments across all edges.
    pub fn segment_count(&self) -> usize {
        self.edges
            .iter()
            .map(|edge| edge.len().saturating_sub(1))
            .sum()
    }
}

fn centroid(vertices: &[Vec4]) -> Vec3 {
    if vertices.is_empty() {
        return Vec3::ZERO;
    }
    let mut sum = Vec3::ZERO;
    for v in vertices {
        sum = sum + Vec3::new(v.x, v.y, v.z);
    }
    sum / vertices.len() as f32
}

/// The render context of one frame: a view and the models it observes.
#[derive(Clone, Debug)]
pub struct Scene {
    pub view: View,
    pub models: Vec<Model>,
}

impl Scene {
    pub fn new(view: View, models: Vec<Model>) -> Self {
        Self { view, models }
    }

    /// Built-in startup scene: a small house-shaped prism viewed in
    /// perspective, with an off-axis clip window.
    pub fn house() -> Self {
        let view = View::new(
            Projection::Perspective,
            Vec3::new(44.0, 20.0, -16.0),
            Vec3::new(20.0, 20.0, -40.0),
            Vec3::UP,
            ClipWindow::new(-19.0, 5.0, -10.0, 8.0, 12.0, 100.0),
        );

        let vertices = vec![
            Vec4::point(0.0, 0.0, -30.0),
            Vec4::point(20.0, 0.0, -30.0),
            Vec4::point(20.0, 12.0, -30.0),
            Vec4::point(10.0, 20.0, -30.0),
            Vec4::point(0.0, 12.0, -30.0),
            Vec4::point(0.0, 0.0, -60.0),
            Vec4::point(20.0, 0.0, -60.0),
            Vec4::point(20.0, 12.0, -60.0),
            Vec4::point(10.0, 20.0, -60.0),
            Vec4::point(0.0, 12.0, -60.0),
        ];
        let edges = vec![
            vec![0, 1, 2, 3, 4, 0],
            vec![5, 6, 7, 8, 9, 5],
            vec![0, 5],
            vec![1, 6],
            vec![2, 7],
            vec![3, 8],
            vec![4, 9],
        ];

        Self::new(view, vec![Model::generic(vertices, edges)])
    }
}
