//! Host loop
//!
//! Drives the simulation against external collaborators: an [`InputSource`]
//! delivering key events and a [`Renderer`] drawing bodies. One frame is
//! clock tick, input poll, quit check, simulation step(s), draw.

use rand::Rng;
use rand_pcg::Pcg32;
use thiserror::Error;

use crate::clock::{Clock, FixedStep, WallClock, TimeSource};
use crate::config::{ConfigError, GameConfig, Timestep};
use crate::input::{InputEvent, KeyMap};
use crate::sim::{Body, GamePhase, GameState, TickInput, tick};

/// Draws simulation bodies. Pixel formats, surfaces and flipping are the
/// implementor's business.
pub trait Renderer {
    fn draw(&mut self, body: &Body);

    /// Called once per frame after every body has been drawn
    fn present(&mut self, _phase: GamePhase) {}
}

/// Delivers the key events that arrived since the last poll
pub trait InputSource {
    fn poll(&mut self) -> Vec<InputEvent>;
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Game instance holding all state
pub struct App<I, D, R = Pcg32, T: TimeSource = WallClock> {
    state: GameState<R>,
    clock: Clock<T>,
    fixed: Option<FixedStep>,
    keys: KeyMap,
    /// Direction changes waiting for the next fixed step
    pending: TickInput,
    input: I,
    renderer: D,
    frames: u64,
}

impl<I: InputSource, D: Renderer> App<I, D> {
    /// Validate `config` and set up a seeded game on the system clock
    pub fn new(config: GameConfig, seed: u64, input: I, renderer: D) -> Result<Self, AppError> {
        let clock = Clock::new(config.target_hz, config.max_delta);
        let state = GameState::new(config, seed)?;
        log::info!("Game initialized with seed: {}", seed);
        Ok(Self::from_parts(state, clock, input, renderer))
    }
}

impl<I: InputSource, D: Renderer, R: Rng, T: TimeSource> App<I, D, R, T> {
    pub fn from_parts(state: GameState<R>, clock: Clock<T>, input: I, renderer: D) -> Self {
        let fixed = match state.config.timestep {
            Timestep::Variable => None,
            Timestep::Fixed => Some(FixedStep::new(
                state.config.frame_time(),
                state.config.max_substeps,
            )),
        };
        let keys = state.config.keys.clone();
        Self {
            state,
            clock,
            fixed,
            keys,
            pending: TickInput::default(),
            input,
            renderer,
            frames: 0,
        }
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    pub fn renderer(&self) -> &D {
        &self.renderer
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run frames until quit is requested
    pub fn run(&mut self) {
        while self.frame() {}
        log::info!(
            "Quit after {} frames ({:.2}s simulated, phase {:?})",
            self.frames,
            self.state.elapsed,
            self.state.phase
        );
    }

    /// Run one frame. Returns `false` once quit has been requested; the
    /// simulation is not stepped on that frame.
    pub fn frame(&mut self) -> bool {
        // Fixed mode bounds catch-up with its substep cap instead of max_delta
        let dt = match self.fixed {
            None => self.clock.tick(),
            Some(_) => self.clock.tick_raw(),
        };
        let input = self.keys.collect(self.input.poll());
        if input.quit {
            return false;
        }

        match &mut self.fixed {
            None => {
                tick(&mut self.state, &input, dt);
            }
            Some(fixed) => {
                self.pending.changes.extend(input.changes);
                let steps = fixed.advance(dt);
                for _ in 0..steps {
                    let step_input = std::mem::take(&mut self.pending);
                    tick(&mut self.state, &step_input, fixed.step());
                }
            }
        }

        for body in self.state.bodies() {
            self.renderer.draw(body);
        }
        self.renderer.present(self.state.phase);

        self.frames += 1;
        true
    }
}
