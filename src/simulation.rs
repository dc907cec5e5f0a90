use std::collections::VecDeque;

use crate::physics::{self, Body, TIME_STEP};
use crate::scene::{self, InvalidConfiguration, SceneConfig, Viewport};

use macroquad::logging::info;
use macroquad::{color::*, shapes::draw_circle, text::draw_text, time::*, window::clear_background};
use ultraviolet::Vec2;

/// Positions remembered per body for the fading trail.
const TRAIL_LENGTH: usize = 100;
const BODY_RADIUS: f32 = 8.0;

pub struct Simulation {
    bodies: Vec<Body>,
    config: SceneConfig,
    view: Viewport,
    rng: fastrand::Rng,
    trails: Vec<VecDeque<Vec2>>,
    colors: Vec<Color>,
    fps: i32,
    logged: u32,
}

impl Simulation {
    pub fn init(config: SceneConfig, view: Viewport) -> Result<Self, InvalidConfiguration> {
        Self::with_rng(config, view, fastrand::Rng::new())
    }

    /// Build a simulation around a caller-supplied random source, so a run
    /// can be reproduced from a seed.
    pub fn with_rng(
        config: SceneConfig,
        view: Viewport,
        mut rng: fastrand::Rng,
    ) -> Result<Self, InvalidConfiguration> {
        let bodies = scene::spawn(&config, &view, &mut rng)?;

        // One fixed hue per slot; a slot keeps its color across restarts.
        let colors = (0..config.num_bodies)
            .map(|i| hsl_to_rgb(i as f32 / config.num_bodies as f32, 0.9, 0.55))
            .collect();

        Ok(Self {
            trails: vec![VecDeque::new(); bodies.len()],
            bodies,
            config,
            view,
            rng,
            colors,
            fps: 0,
            logged: 0,
        })
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Advance the scene by one fixed time step.
    ///
    /// Returns true when every body had left the viewport and a fresh scene
    /// replaced the old one within this tick.
    pub fn step(&mut self) -> bool {
        physics::accumulate_forces(&mut self.bodies);
        physics::integrate(&mut self.bodies, TIME_STEP);

        if scene::all_outside(&self.bodies, &self.view) {
            self.bodies = scene::generate(&self.config, &self.view, &mut self.rng);
            return true;
        }

        false
    }

    pub fn update(&mut self) {
        if self.step() {
            info!("all bodies off screen, restarting with fresh initial conditions");
            for trail in &mut self.trails {
                trail.clear();
            }
        }

        for (trail, body) in self.trails.iter_mut().zip(&self.bodies) {
            trail.push_back(body.pos);
            if trail.len() > TRAIL_LENGTH {
                trail.pop_front();
            }
        }

        // Refresh the fps readout around 10 times per second
        let time = (10.0 * get_time()) as u32;

        if time > self.logged {
            self.logged = time;
            self.fps = get_fps();
        }
    }

    pub fn render(&self) {
        clear_background(BLACK);

        for (trail, color) in self.trails.iter().zip(&self.colors) {
            for (age, pos) in trail.iter().enumerate() {
                let fade = age as f32 / TRAIL_LENGTH as f32;
                draw_circle(pos.x, pos.y, 1.0, Color::new(color.r, color.g, color.b, fade));
            }
        }

        for (body, color) in self.bodies.iter().zip(&self.colors) {
            draw_circle(body.pos.x, body.pos.y, BODY_RADIUS, *color);
        }

        draw_text(&format!("{}", self.fps), 10.0, 16.0, 12.0, WHITE);
    }
}
