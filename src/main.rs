use macroquad::prelude::*;

mod physics;
mod prompt;
mod scene;
mod simulation;

use scene::{SceneConfig, Viewport};
use simulation::Simulation;

const CANVAS_W: i32 = 800;
const CANVAS_H: i32 = 800;

/// How far past the canvas edge a body may wander before it counts as gone.
const MARGIN: f32 = 100.0;

fn window_conf(num_bodies: usize) -> Conf {
    Conf {
        window_title: format!("{num_bodies}-body problem"),
        window_width: CANVAS_W,
        window_height: CANVAS_H,
        window_resizable: false,
        sample_count: 0,
        icon: None,
        high_dpi: true,
        ..Default::default()
    }
}

fn main() {
    // Prompt on the console before any window exists.
    let config = prompt::read_config();

    macroquad::Window::from_config(window_conf(config.num_bodies), run(config));
}

async fn run(config: SceneConfig) {
    let view = Viewport::new(CANVAS_W as f32, CANVAS_H as f32, MARGIN);

    let mut sim = match Simulation::init(config, view) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return;
        }
    };

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        sim.update();
        sim.render();

        next_frame().await
    }
}
