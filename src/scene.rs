use std::{error, fmt};

use macroquad::math::FloatExt;
use ultraviolet::Vec2;

use crate::physics::Body;

pub const MIN_BODIES: usize = 2;
pub const MAX_BODIES: usize = 10;

/// Accepted range for masses typed in by the user.
pub const MASS_MIN: f32 = 100.0;
pub const MASS_MAX: f32 = 10000.0;

const RANDOM_MASS_MIN: f32 = 1000.0;
const RANDOM_MASS_MAX: f32 = 3000.0;

/// Bodies spawn within this distance of the viewport center on each axis.
const SPAWN_EXTENT: f32 = 200.0;

/// Initial velocity components are drawn within this range per axis, before
/// the momentum correction.
const SPEED_EXTENT: f32 = 0.5;

#[derive(Clone, Debug)]
pub enum MassMode {
    Random,
    Explicit(Vec<f32>),
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub num_bodies: usize,
    pub masses: MassMode,
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        if !(MIN_BODIES..=MAX_BODIES).contains(&self.num_bodies) {
            return Err(InvalidConfiguration::BodyCount(self.num_bodies));
        }

        if let MassMode::Explicit(masses) = &self.masses {
            if masses.len() != self.num_bodies {
                return Err(InvalidConfiguration::MassCount {
                    expected: self.num_bodies,
                    got: masses.len(),
                });
            }

            // !(mass > 0.0) also catches NaN.
            if let Some(&mass) = masses.iter().find(|&&mass| !(mass > 0.0)) {
                return Err(InvalidConfiguration::Mass(mass));
            }
        }

        Ok(())
    }
}

#[derive(Debug, PartialEq)]
pub enum InvalidConfiguration {
    BodyCount(usize),
    Mass(f32),
    MassCount { expected: usize, got: usize },
}

impl fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidConfiguration::BodyCount(n) => {
                write!(f, "body count {n} is outside {MIN_BODIES}-{MAX_BODIES}")
            }
            InvalidConfiguration::Mass(mass) => write!(f, "mass {mass} is not positive"),
            InvalidConfiguration::MassCount { expected, got } => {
                write!(f, "expected {expected} masses, got {got}")
            }
        }
    }
}

impl error::Error for InvalidConfiguration {}

/// The visible rectangle plus the margin a body may roam before it counts as
/// gone.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    /// Whether `pos` lies strictly inside the viewport expanded by the margin.
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x > -self.margin
            && pos.x < self.width + self.margin
            && pos.y > -self.margin
            && pos.y < self.height + self.margin
    }
}

/// Validate `config` and spawn a fresh momentum-corrected scene.
pub fn spawn(
    config: &SceneConfig,
    view: &Viewport,
    rng: &mut fastrand::Rng,
) -> Result<Vec<Body>, InvalidConfiguration> {
    config.validate()?;
    Ok(generate(config, view, rng))
}

/// Spawn without validating; `config` must already have passed
/// [`SceneConfig::validate`].
pub fn generate(config: &SceneConfig, view: &Viewport, rng: &mut fastrand::Rng) -> Vec<Body> {
    let center = view.center();

    let masses: Vec<f32> = match &config.masses {
        MassMode::Random => (0..config.num_bodies)
            .map(|_| rng.f32().remap(0.0, 1.0, RANDOM_MASS_MIN, RANDOM_MASS_MAX))
            .collect(),
        MassMode::Explicit(masses) => masses.clone(),
    };

    let mut bodies: Vec<Body> = masses
        .into_iter()
        .map(|mass| {
            let pos = center
                + Vec2::new(
                    rng.f32().remap(0.0, 1.0, -SPAWN_EXTENT, SPAWN_EXTENT),
                    rng.f32().remap(0.0, 1.0, -SPAWN_EXTENT, SPAWN_EXTENT),
                );
            let vel = Vec2::new(
                rng.f32().remap(0.0, 1.0, -SPEED_EXTENT, SPEED_EXTENT),
                rng.f32().remap(0.0, 1.0, -SPEED_EXTENT, SPEED_EXTENT),
            );

            Body::new(pos, vel, mass)
        })
        .collect();

    // Cancel the net drift so the center of mass stays put on screen.
    let total_mass: f32 = bodies.iter().map(|body| body.mass).sum();
    let momentum = bodies
        .iter()
        .fold(Vec2::zero(), |sum, body| sum + body.vel * body.mass);
    let drift = momentum / total_mass;

    for body in &mut bodies {
        body.vel -= drift;
    }

    bodies
}

/// True when every body has left the viewport, margin included.
pub fn all_outside(bodies: &[Body], view: &Viewport) -> bool {
    bodies.iter().all(|body| !view.contains(body.pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_view() -> Viewport {
        Viewport::new(800.0, 800.0, 100.0)
    }

    fn random_config(num_bodies: usize) -> SceneConfig {
        SceneConfig {
            num_bodies,
            masses: MassMode::Random,
        }
    }

    fn total_momentum(bodies: &[Body]) -> Vec2 {
        bodies
            .iter()
            .fold(Vec2::zero(), |sum, body| sum + body.vel * body.mass)
    }

    #[test]
    fn random_scene_has_no_net_momentum() {
        let mut rng = fastrand::Rng::with_seed(42);
        let bodies = spawn(&random_config(7), &test_view(), &mut rng).unwrap();

        let momentum = total_momentum(&bodies).mag();
        assert!(momentum < 1e-2, "net momentum {momentum}");
    }

    #[test]
    fn explicit_mass_scene_has_no_net_momentum() {
        let config = SceneConfig {
            num_bodies: 4,
            masses: MassMode::Explicit(vec![100.0, 2500.0, 440.0, 10000.0]),
        };
        let mut rng = fastrand::Rng::with_seed(9);
        let bodies = spawn(&config, &test_view(), &mut rng).unwrap();

        let masses: Vec<f32> = bodies.iter().map(|body| body.mass).collect();
        assert_eq!(masses, vec![100.0, 2500.0, 440.0, 10000.0]);

        let momentum = total_momentum(&bodies).mag();
        assert!(momentum < 1e-2, "net momentum {momentum}");
    }

    #[test]
    fn bodies_spawn_inside_the_viewport() {
        let view = test_view();
        let mut rng = fastrand::Rng::with_seed(3);
        let bodies = spawn(&random_config(10), &view, &mut rng).unwrap();

        assert!(bodies.iter().all(|body| view.contains(body.pos)));
        assert!(bodies.iter().all(|body| body.mass > 0.0));
    }

    #[test]
    fn same_seed_spawns_the_same_scene() {
        let config = random_config(6);
        let view = test_view();

        let first = spawn(&config, &view, &mut fastrand::Rng::with_seed(17)).unwrap();
        let second = spawn(&config, &view, &mut fastrand::Rng::with_seed(17)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn body_count_bounds_are_enforced() {
        let view = test_view();
        let mut rng = fastrand::Rng::with_seed(0);

        for count in [MIN_BODIES, MAX_BODIES] {
            assert!(spawn(&random_config(count), &view, &mut rng).is_ok());
        }

        for count in [0, 1, 11] {
            assert_eq!(
                spawn(&random_config(count), &view, &mut rng).unwrap_err(),
                InvalidConfiguration::BodyCount(count)
            );
        }
    }

    #[test]
    fn non_positive_masses_are_rejected() {
        let view = test_view();
        let mut rng = fastrand::Rng::with_seed(0);

        for bad in [0.0, -5.0, f32::NAN] {
            let config = SceneConfig {
                num_bodies: 2,
                masses: MassMode::Explicit(vec![1000.0, bad]),
            };
            assert!(matches!(
                spawn(&config, &view, &mut rng),
                Err(InvalidConfiguration::Mass(_))
            ));
        }
    }

    #[test]
    fn mass_list_must_match_the_body_count() {
        let config = SceneConfig {
            num_bodies: 3,
            masses: MassMode::Explicit(vec![1000.0, 2000.0]),
        };
        let result = spawn(&config, &test_view(), &mut fastrand::Rng::with_seed(0));

        assert_eq!(
            result.unwrap_err(),
            InvalidConfiguration::MassCount {
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn reset_waits_for_the_last_body() {
        let view = test_view();
        let outside = Body::new(Vec2::new(-101.0, 400.0), Vec2::zero(), 1000.0);
        let inside = Body::new(Vec2::new(400.0, 400.0), Vec2::zero(), 1000.0);

        assert!(!all_outside(&[outside.clone(), inside], &view));
        assert!(all_outside(
            &[outside, Body::new(Vec2::new(950.0, 400.0), Vec2::zero(), 1000.0)],
            &view
        ));
    }

    #[test]
    fn a_body_exactly_on_the_margin_counts_as_outside() {
        let view = test_view();
        assert!(!view.contains(Vec2::new(-100.0, 400.0)));
        assert!(!view.contains(Vec2::new(400.0, 900.0)));
        assert!(view.contains(Vec2::new(-99.9, 400.0)));
    }
}
