use std::env;

use log::{error, info};
use wireview::prelude::*;
use wireview::window::{WINDOW_HEIGHT, WINDOW_WIDTH};

/// World units moved per pan or dolly key press.
const STEP: f32 = 1.0;
/// Radians per second applied while the spin toggle is on.
const SPIN_RATE: f32 = 0.6;
/// Pixel spacing of the alignment grid.
const GRID_SPACING: i32 = 50;

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut scene_path = None;
    let mut png_path = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--png" => {
                png_path = Some(
                    args.next()
                        .ok_or_else(|| "--png needs an output path".to_string())?,
                );
            }
            _ => scene_path = Some(arg),
        }
    }

    let mut scene = match scene_path {
        Some(path) => Scene::load(&path).map_err(|e| e.to_string())?,
        None => {
            info!("no scene file given, using the built-in house");
            Scene::house()
        }
    };

    // Headless one-shot: render a single frame to a file and exit.
    if let Some(path) = png_path {
        let mut canvas = Canvas::new(WINDOW_WIDTH, WINDOW_HEIGHT);
        render_scene(&scene, WINDOW_WIDTH, WINDOW_HEIGHT, &mut canvas)
            .map_err(|e| e.to_string())?;
        canvas.save_png(&path).map_err(|e| e.to_string())?;
        info!("rendered one frame to {path}");
        return Ok(());
    }

    let mut window = Window::new("wireview", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut canvas = Canvas::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut limiter = FrameLimiter::new(&window);

    let mut show_grid = false;
    let mut spinning = false;
    let mut is_running = true;

    while is_running {
        let delta = limiter.tick(&window);

        // Process input
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => is_running = false,
                WindowEvent::Resize(w, h) => {
                    canvas.resize(w, h);
                    window.resize(w, h)?;
                }
                WindowEvent::Key(key) => match key {
                    Key::Left => apply_move(scene.view.pan(-STEP), &mut scene),
                    Key::Right => apply_move(scene.view.pan(STEP), &mut scene),
                    Key::Up => apply_move(scene.view.dolly(STEP), &mut scene),
                    Key::Down => apply_move(scene.view.dolly(-STEP), &mut scene),
                    Key::G => show_grid = !show_grid,
                    Key::R => spinning = !spinning,
                    Key::P => match canvas.save_png("frame.png") {
                        Ok(()) => info!("saved frame.png"),
                        Err(e) => error!("could not save frame.png: {e}"),
                    },
                },
            }
        }

        // Update
        if spinning {
            for model in &mut scene.models {
                model.transform.rotate_y(SPIN_RATE * delta);
            }
        }

        // Render
        canvas.clear(colors::BACKGROUND);
        if show_grid {
            canvas.draw_grid(GRID_SPACING, colors::GRID);
        }
        let (width, height) = (canvas.width(), canvas.height());
        render_scene(&scene, width, height, &mut canvas).map_err(|e| e.to_string())?;

        window.present(canvas.as_bytes())?;
    }

    Ok(())
}

/// Swaps in the moved view, or keeps the old one if the move would
/// degenerate it.
fn apply_move(moved: Result<View, ViewError>, scene: &mut Scene) {
    match moved {
        Ok(view) => scene.view = view,
        Err(e) => error!("view move ignored: {e}"),
    }
}
