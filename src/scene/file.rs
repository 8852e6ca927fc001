//! JSON scene documents.
//!
//! The on-disk format keeps geometry as plain number arrays:
//!
//! ```json
//! {
//!   "view": {
//!     "type": "perspective",
//!     "prp": [44, 20, -16],
//!     "srp": [20, 20, -40],
//!     "vup": [0, 1, 0],
//!     "clip": [-19, 5, -10, 8, 12, 100]
//!   },
//!   "models": [
//!     {"type": "generic", "vertices": [[0, 0, -30]], "edges": [[0, 0]]},
//!     {"type": "cube", "center": [0, 0, -40], "width": 8, "height": 8, "depth": 8}
//!   ]
//! }
//! ```
//!
//! Vertices become homogeneous points (w = 1) on load; shape models run
//! through the generators in [`shapes`](super::shapes).

use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::math::{Vec3, Vec4};
use crate::view::{ClipWindow, Projection, View};

use super::{shapes, Model, Scene, SceneError};

#[derive(Debug, Deserialize)]
struct SceneDoc {
    view: ViewDoc,
    models: Vec<ModelDoc>,
}

#[derive(Debug, Deserialize)]
struct ViewDoc {
    #[serde(rename = "type")]
    projection: Projection,
    prp: [f32; 3],
    srp: [f32; 3],
    vup: [f32; 3],
    clip: [f32; 6],
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ModelDoc {
    Generic {
        vertices: Vec<[f32; 3]>,
        edges: Vec<Vec<usize>>,
    },
    Cube {
        center: [f32; 3],
        width: f32,
        height: f32,
        depth: f32,
    },
    Cone {
        center: [f32; 3],
        radius: f32,
        height: f32,
        sides: u32,
    },
    Cylinder {
        center: [f32; 3],
        radius: f32,
        height: f32,
        sides: u32,
    },
}

impl Scene {
    /// Reads a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Scene, SceneError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let scene = Scene::from_json(&text)?;
        info!(
            "loaded scene from {}: {} model(s)",
            path.display(),
            scene.models.len()
        );
        Ok(scene)
    }

    /// Parses a scene from JSON text.
    pub fn from_json(text: &str) -> Result<Scene, SceneError> {
        let doc: SceneDoc = serde_json::from_str(text)?;

        let view = View::new(
            doc.view.projection,
            vec3(doc.view.prp),
            vec3(doc.view.srp),
            vec3(doc.view.vup),
            ClipWindow::from(doc.view.clip),
        );

        let models = doc
            .models
            .into_iter()
            .map(Model::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Scene::new(view, models))
    }
}

impl TryFrom<ModelDoc> for Model {
    type Error = SceneError;

    fn try_from(doc: ModelDoc) -> Result<Self, SceneError> {
        match doc {
            ModelDoc::Generic { vertices, edges } => {
                let vertices = vertices
                    .into_iter()
                    .map(|[x, y, z]| Vec4::point(x, y, z))
                    .collect();
                Ok(Model::generic(vertices, edges))
            }
            ModelDoc::Cube {
                center,
                width,
                height,
                depth,
            } => shapes::cube(vec3(center), width, height, depth),
            ModelDoc::Cone {
                center,
                radius,
                height,
                sides,
            } => shapes::cone(vec3(center), radius, height, sides),
            ModelDoc::Cylinder {
                center,
                radius,
                height,
                sides,
            } => shapes::cylinder(vec3(center), radius, height, sides),
        }
    }
}

fn vec3(a: [f32; 3]) -> Vec3 {
    Vec3::new(a[0], a[1], a[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_the_reference_document() {
        let scene = Scene::from_json(
            r#"{
                "view": {
                    "type": "perspective",
                    "prp": [44, 20, -16],
                    "srp": [20, 20, -40],
                    "vup": [0, 1, 0],
                    "clip": [-19, 5, -10, 8, 12, 100]
                },
                "models": [
                    {
                        "type": "generic",
                        "vertices": [[0, 0, -30], [20, 0, -30], [20, 12, -30]],
                        "edges": [[0, 1, 2, 0]]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scene.view.projection, Projection::Perspective);
        assert_relative_eq!(scene.view.prp.x, 44.0);
        assert_relative_eq!(scene.view.clip.left, -19.0);
        assert_relative_eq!(scene.view.clip.far, 100.0);

        let model = &scene.models[0];
        assert_eq!(model.vertices.len(), 3);
        assert_eq!(model.edges, vec![vec![0, 1, 2, 0]]);
        for v in &model.vertices {
            assert_relative_eq!(v.w, 1.0);
        }
    }

    #[test]
    fn shape_models_run_through_the_generators() {
        let scene = Scene::from_json(
            r#"{
                "view": {
                    "type": "parallel",
                    "prp": [0, 10, -5],
                    "srp": [20, 15, -40],
                    "vup": [1, 1, 0],
                    "clip": [-12, 6, -12, 6, 10, 100]
                },
                "models": [
                    {"type": "cube", "center": [0, 0, -30], "width": 8, "height": 8, "depth": 8},
                    {"type": "cone", "center": [-20, 0, -50], "radius": 10, "height": 10, "sides": 12},
                    {"type": "cylinder", "center": [20, 0, -50], "radius": 8, "height": 12, "sides": 16}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scene.view.projection, Projection::Parallel);
        assert_eq!(scene.models.len(), 3);
        assert_eq!(scene.models[0].vertices.len(), 8);
        assert_eq!(scene.models[1].vertices.len(), 13);
        assert_eq!(scene.models[2].vertices.len(), 32);
    }

    #[test]
    fn unknown_projection_type_is_a_parse_error() {
        let result = Scene::from_json(
            r#"{
                "view": {
                    "type": "isometric",
                    "prp": [0, 0, 0],
                    "srp": [0, 0, -1],
                    "vup": [0, 1, 0],
                    "clip": [-1, 1, -1, 1, 1, 10]
                },
                "models": []
            }"#,
        );
        assert!(matches!(result, Err(SceneError::Json(_))));
    }

    #[test]
    fn bad_shape_parameters_surface_as_scene_errors() {
        let result = Scene::from_json(
            r#"{
                "view": {
                    "type": "parallel",
                    "prp": [0, 0, 0],
                    "srp": [0, 0, -1],
                    "vup": [0, 1, 0],
                    "clip": [-1, 1, -1, 1, 1, 10]
                },
                "models": [
                    {"type": "cone", "center": [0, 0, -5], "radius": 1, "height": 2, "sides": 2}
                ]
            }"#,
        );
        assert!(matches!(result, Err(SceneError::BadShape(_))));
    }
}
