//! Scene-to-screen wireframe pipeline.
//!
//! Every frame walks the same stages:
//!
//! 1. Transform each model's vertices into the canonical view volume.
//! 2. Clip each edge segment against the volume for the active projection.
//! 3. Flatten survivors onto the projection plane and map them to pixels.
//! 4. Divide out `w` and hand the 2D segment to a [`LineSink`].
//!
//! The volume and viewport matrices are built once per frame; only the
//! per-model matrix changes inside the loop.

use log::debug;

use crate::clipper::{clip_line, Line};
use crate::math::{Vec2, Vec4, FLOAT_EPSILON};
use crate::scene::{Scene, SceneError};
use crate::view::{viewport_matrix, ViewError};

/// Receives the clipped, projected segments of a frame.
pub trait LineSink {
    fn draw_segment(&mut self, from: Vec2, to: Vec2);
}

/// Per-frame segment counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Segments handed to the sink.
    pub drawn: usize,
    /// Drawn segments that had at least one endpoint moved by clipping.
    pub clipped: usize,
    /// Segments that left no visible portion.
    pub rejected: usize,
}

#[derive(Debug)]
pub enum RenderError {
    View(ViewError),
    Scene(SceneError),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::View(e) => write!(f, "view setup failed: {e}"),
            RenderError::Scene(e) => write!(f, "scene traversal failed: {e}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::View(e) => Some(e),
            RenderError::Scene(e) => Some(e),
        }
    }
}

impl From<ViewError> for RenderError {
    fn from(e: ViewError) -> Self {
        RenderError::View(e)
    }
}

impl From<SceneError> for RenderError {
    fn from(e: SceneError) -> Self {
        RenderError::Scene(e)
    }
}

/// Renders every model edge in `scene` into `sink` as 2D segments in a
/// `width` x `height` pixel viewport.
///
/// Fails fast on a degenerate view or an edge that references a missing
/// vertex; segments that fall outside the view volume are simply counted
/// and skipped.
pub fn render_scene(
    scene: &Scene,
    width: u32,
    height: u32,
    sink: &mut impl LineSink,
) -> Result<FrameStats, RenderError> {
    let volume = scene.view.view_volume_matrix()?;
    let screen = viewport_matrix(width, height) * scene.view.projection_matrix();

    let mut stats = FrameStats::default();

    for (model_index, model) in scene.models.iter().enumerate() {
        let to_canonical = volume * model.transform.to_matrix();
        let canonical: Vec<_> = model
            .vertices
            .iter()
            .map(|&v| to_canonical * v)
            .collect();

        for (edge_index, edge) in model.edges.iter().enumerate() {
            for pair in edge.windows(2) {
                let line = Line::new(
                    vertex(&canonical, pair[0], model_index, edge_index)?,
                    vertex(&canonical, pair[1], model_index, edge_index)?,
                );

                let visible = match clip_line(&line, scene.view.projection) {
                    Some(visible) => visible,
                    None => {
                        stats.rejected += 1;
                        continue;
                    }
                };

                let p0 = screen * visible.p0;
                let p1 = screen * visible.p1;
                if p0.w.abs() <= FLOAT_EPSILON || p1.w.abs() <= FLOAT_EPSILON {
                    stats.rejected += 1;
                    continue;
                }

                sink.draw_segment(
                    Vec2::new(p0.x / p0.w, p0.y / p0.w),
                    Vec2::new(p1.x / p1.w, p1.y / p1.w),
                );
                stats.drawn += 1;
                if visible != line {
                    stats.clipped += 1;
                }
            }
        }
    }

    debug!(
        "frame: {} drawn, {} clipped, {} rejected",
        stats.drawn, stats.clipped, stats.rejected
    );
    Ok(stats)
}

fn vertex(
    canonical: &[Vec4],
    index: usize,
    model: usize,
    edge: usize,
) -> Result<Vec4, RenderError> {
    canonical
        .get(index)
        .copied()
        .ok_or(RenderError::Scene(SceneError::EdgeOutOfBounds {
            model,
            edge,
            index,
            vertex_count: canonical.len(),
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Vec3, Vec4};
    use crate::scene::Model;
    use crate::view::{ClipWindow, Projection, View};
    use approx::assert_relative_eq;

    #[derive(Default)]
    struct RecordingSink {
        segments: Vec<(Vec2, Vec2)>,
    }

    impl LineSink for RecordingSink {
        fn draw_segment(&mut self, from: Vec2, to: Vec2) {
            self.segments.push((from, to));
        }
    }

    fn head_on_parallel_view() -> View {
        View::new(
            Projection::Parallel,
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::UP,
            ClipWindow::new(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0),
        )
    }

    fn segment_model(p0: Vec4, p1: Vec4) -> Model {
        Model::generic(vec![p0, p1], vec![vec![0, 1]])
    }

    #[test]
    fn centered_segment_lands_on_viewport_pixels() {
        let scene = Scene::new(
            head_on_parallel_view(),
            vec![segment_model(
                Vec4::point(0.0, 0.0, -2.0),
                Vec4::point(0.5, 0.0, -2.0),
            )],
        );

        let mut sink = RecordingSink::default();
        let stats = render_scene(&scene, 100, 100, &mut sink).unwrap();

        assert_eq!(stats, FrameStats { drawn: 1, clipped: 0, rejected: 0 });
        let (from, to) = sink.segments[0];
        assert_relative_eq!(from.x, 50.0, epsilon = 1e-4);
        assert_relative_eq!(from.y, 50.0, epsilon = 1e-4);
        assert_relative_eq!(to.x, 75.0, epsilon = 1e-4);
        assert_relative_eq!(to.y, 50.0, epsilon = 1e-4);
    }

    #[test]
    fn segment_crossing_the_window_is_clipped_to_its_edge() {
        let scene = Scene::new(
            head_on_parallel_view(),
            vec![segment_model(
                Vec4::point(0.0, 0.0, -2.0),
                Vec4::point(2.0, 0.0, -2.0),
            )],
        );

        let mut sink = RecordingSink::default();
        let stats = render_scene(&scene, 100, 100, &mut sink).unwrap();

        assert_eq!(stats, FrameStats { drawn: 1, clipped: 1, rejected: 0 });
        let (_, to) = sink.segments[0];
        assert_relative_eq!(to.x, 100.0, epsilon = 1e-4);
        assert_relative_eq!(to.y, 50.0, epsilon = 1e-4);
    }

    #[test]
    fn segment_outside_the_volume_is_counted_not_drawn() {
        let scene = Scene::new(
            head_on_parallel_view(),
            vec![segment_model(
                Vec4::point(5.0, 0.0, -2.0),
                Vec4::point(6.0, 0.0, -2.0),
            )],
        );

        let mut sink = RecordingSink::default();
        let stats = render_scene(&scene, 100, 100, &mut sink).unwrap();

        assert_eq!(stats, FrameStats { drawn: 0, clipped: 0, rejected: 1 });
        assert!(sink.segments.is_empty());
    }

    #[test]
    fn house_scene_accounts_for_every_segment() {
        let scene = Scene::house();
        let total = scene
            .models
            .iter()
            .map(Model::segment_count)
            .sum::<usize>();

        let mut sink = RecordingSink::default();
        let stats = render_scene(&scene, 800, 600, &mut sink).unwrap();

        assert_eq!(stats.drawn + stats.rejected, total);
        assert_eq!(sink.segments.len(), stats.drawn);
        assert!(stats.drawn > 0);
        for &(from, to) in &sink.segments {
            for p in [from, to] {
                assert!(p.x >= -0.5 && p.x <= 800.5, "x off canvas: {}", p.x);
                assert!(p.y >= -0.5 && p.y <= 600.5, "y off canvas: {}", p.y);
            }
        }
    }

    #[test]
    fn edge_referencing_a_missing_vertex_is_an_error() {
        let scene = Scene::new(
            head_on_parallel_view(),
            vec![Model::generic(
                vec![Vec4::point(0.0, 0.0, -2.0)],
                vec![vec![0, 5]],
            )],
        );

        let mut sink = RecordingSink::default();
        let result = render_scene(&scene, 100, 100, &mut sink);

        assert!(matches!(
            result,
            Err(RenderError::Scene(SceneError::EdgeOutOfBounds {
                model: 0,
                edge: 0,
                index: 5,
                vertex_count: 1,
            }))
        ));
    }

    #[test]
    fn degenerate_view_fails_before_any_drawing() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let scene = Scene::new(
            View::new(
                Projection::Perspective,
                eye,
                eye,
                Vec3::UP,
                ClipWindow::new(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0),
            ),
            vec![segment_model(
                Vec4::point(0.0, 0.0, -2.0),
                Vec4::point(1.0, 0.0, -2.0),
            )],
        );

        let mut sink = RecordingSink::default();
        let result = render_scene(&scene, 100, 100, &mut sink);

        assert!(matches!(result, Err(RenderError::View(ViewError::EyeAtTarget))));
        assert!(sink.segments.is_empty());
    }
}
