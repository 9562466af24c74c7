//! Frame driver
//!
//! Owns the single mutable world cell. Every tick it pulls one aggregated
//! input sample, runs the pure transition, stores the result and hands the
//! snapshot to a renderer.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{ALPHABET, START_KEY};
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::{Alien, TickInput, World, transition};

/// Supplies the latest input sample for each tick
pub trait InputSource {
    fn sample(&mut self, world: &World) -> TickInput;
}

/// Receives every snapshot after it is produced; must not mutate it
pub trait Render {
    fn render(&mut self, world: &World, tick: u64);
}

/// Replays a fixed list of samples, then empty ones
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    samples: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(samples: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self, _world: &World) -> TickInput {
        self.samples.pop_front().unwrap_or_default()
    }
}

/// Plays the game with a seeded RNG
///
/// Restarts whenever the game is stopped, keeps the cannon under the lowest
/// alien and now and then fires, usually with that alien's letter.
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    fire_chance: f32,
    accuracy: f32,
}

impl Autopilot {
    pub fn new(seed: u64, fire_chance: f32, accuracy: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            fire_chance: fire_chance.clamp(0.0, 1.0),
            accuracy: accuracy.clamp(0.0, 1.0),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.autopilot_seed,
            settings.autopilot_fire_chance,
            settings.autopilot_accuracy,
        )
    }

    /// Lowest alien, ties broken by horizontal distance to the player
    fn target<'a>(world: &'a World) -> Option<&'a Alien> {
        let player_x = world.player.pos.x + world.player.width / 2.0;
        world.aliens.iter().max_by(|a, b| {
            a.pos
                .y
                .total_cmp(&b.pos.y)
                .then_with(|| {
                    let da = (a.pos.x + a.width / 2.0 - player_x).abs();
                    let db = (b.pos.x + b.width / 2.0 - player_x).abs();
                    db.total_cmp(&da)
                })
        })
    }
}

impl InputSource for Autopilot {
    fn sample(&mut self, world: &World) -> TickInput {
        if !world.running {
            return TickInput::key(START_KEY);
        }

        let Some(target) = Self::target(world) else {
            return TickInput::default();
        };

        let jitter = self.rng.random_range(-6.0..6.0);
        let mut input = TickInput::pointer(glam::Vec2::new(
            target.pos.x + target.width / 2.0 + jitter,
            0.0,
        ));

        if world.ammo > 0 && self.rng.random_bool(f64::from(self.fire_chance)) {
            let letter = if self.rng.random_bool(f64::from(self.accuracy)) {
                target.character
            } else {
                char::from(ALPHABET[self.rng.random_range(0..ALPHABET.len())])
            };
            input.key = Some(letter.to_string());
        }
        input
    }
}

/// Logs a HUD line periodically and whenever the run state changes
#[derive(Debug, Clone, Default)]
pub struct HudLog {
    every: u64,
    last: Option<(bool, u32)>,
}

impl HudLog {
    pub fn new(every: u64) -> Self {
        Self { every, last: None }
    }
}

impl Render for HudLog {
    fn render(&mut self, world: &World, tick: u64) {
        let current = (world.running, world.level);
        let changed = self.last != Some(current);
        let periodic = self.every > 0 && tick % self.every == 0;
        self.last = Some(current);
        if !(changed || periodic) {
            return;
        }

        if world.running {
            log::info!(
                "tick {tick} | level {} | score {} | ammo {} | aliens {} | bullets {} | shields {}",
                world.level,
                world.score,
                world.ammo,
                world.aliens.len(),
                world.bullets.len(),
                world.shields.len(),
            );
        } else {
            log::info!("tick {tick} | {}", world.message);
        }
    }
}

/// Discards every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRender;

impl Render for NoRender {
    fn render(&mut self, _world: &World, _tick: u64) {}
}

/// Fixed-interval game loop around [`transition`]
pub struct FrameDriver<I, R> {
    world: World,
    input: I,
    renderer: R,
    tick: u64,
    high_scores: HighScores,
}

impl<I: InputSource, R: Render> FrameDriver<I, R> {
    pub fn new(world: World, input: I, renderer: R) -> Self {
        Self {
            world,
            input,
            renderer,
            tick: 0,
            high_scores: HighScores::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn into_world(self) -> World {
        self.world
    }

    /// Run one tick: sample, transition, record, render
    pub fn step(&mut self) -> &World {
        let input = self.input.sample(&self.world);
        let next = transition(&self.world, &input);
        self.tick += 1;

        if self.world.running && !next.running {
            match self.high_scores.add_score(next.score, next.level, self.tick) {
                Some(rank) => log::info!("Run ended with score {} (rank {rank})", next.score),
                None => log::info!("Run ended with score {}", next.score),
            }
        }

        self.world = next;
        self.renderer.render(&self.world, self.tick);
        &self.world
    }

    /// Step `ticks` times, sleeping out the rest of each interval when paced
    pub fn run(&mut self, ticks: u64, pacing: Option<Duration>) {
        for _ in 0..ticks {
            let started = Instant::now();
            self.step();
            if let Some(interval) = pacing {
                std::thread::sleep(interval.saturating_sub(started.elapsed()));
            }
        }
    }
}
