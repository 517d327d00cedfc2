//! CatalEyes entry point
//!
//! Runs a headless session: scripted input weaving up and down, a renderer
//! that logs what it would draw. Pass a JSON config path as the first
//! argument (or set `CATALEYES_CONFIG`); `RUST_LOG` controls verbosity.

use std::cell::Cell;
use std::env;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use cataleyes::input::{InputEvent, keys};
use cataleyes::sim::{Body, GamePhase};
use cataleyes::{App, AppError, GameConfig, InputSource, Renderer};

/// Frames per weave before switching direction
const WEAVE_FRAMES: u64 = 45;
/// Session length when no quit arrives earlier
const SESSION_FRAMES: u64 = 60 * 20;
/// Frames to keep showing the game over screen before quitting
const GAME_OVER_LINGER_FRAMES: u64 = 90;

/// Alternates Up and Down, then presses Escape at the end of the session
struct Weave {
    frame: u64,
}

impl InputSource for Weave {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.frame += 1;
        if self.frame >= SESSION_FRAMES {
            return vec![InputEvent::KeyDown(keys::ESCAPE)];
        }
        if self.frame % WEAVE_FRAMES != 1 {
            return Vec::new();
        }
        if (self.frame / WEAVE_FRAMES) % 2 == 0 {
            vec![InputEvent::KeyUp(keys::UP), InputEvent::KeyDown(keys::DOWN)]
        } else {
            vec![InputEvent::KeyUp(keys::DOWN), InputEvent::KeyDown(keys::UP)]
        }
    }
}

/// Logs draw calls instead of blitting
struct LogRenderer {
    drawn: usize,
    last_phase: Option<GamePhase>,
    /// Frames presented in the game over phase, shared with the input side
    over_frames: Rc<Cell<u64>>,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, body: &Body) {
        log::trace!(
            "draw {:?} #{} at ({:.1}, {:.1})",
            body.kind,
            body.id,
            body.pos.x,
            body.pos.y
        );
        self.drawn += 1;
    }

    fn present(&mut self, phase: GamePhase) {
        if self.last_phase != Some(phase) {
            log::info!("Phase: {:?}", phase);
            self.last_phase = Some(phase);
        }
        if phase == GamePhase::Over {
            self.over_frames.set(self.over_frames.get() + 1);
        }
        log::trace!("present {} bodies", self.drawn);
        self.drawn = 0;
    }
}

/// Quits shortly after the game ends
struct UntilGameOver<I> {
    inner: I,
    over_frames: Rc<Cell<u64>>,
}

impl<I: InputSource> InputSource for UntilGameOver<I> {
    fn poll(&mut self) -> Vec<InputEvent> {
        if self.over_frames.get() >= GAME_OVER_LINGER_FRAMES {
            return vec![InputEvent::Quit];
        }
        self.inner.poll()
    }
}

fn load_config() -> Result<GameConfig, AppError> {
    let path = env::args().nth(1).or_else(|| env::var("CATALEYES_CONFIG").ok());
    Ok(match path {
        Some(path) => GameConfig::load(path)?,
        None => {
            log::info!("No config given, using defaults");
            GameConfig::default()
        }
    })
}

fn seed() -> u64 {
    env::var("CATALEYES_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs()
        })
}

fn main() -> Result<(), AppError> {
    env_logger::init();
    log::info!("CatalEyes (headless) starting...");

    let config = load_config()?;
    let over_frames = Rc::new(Cell::new(0));
    let input = UntilGameOver {
        inner: Weave { frame: 0 },
        over_frames: over_frames.clone(),
    };
    let renderer = LogRenderer {
        drawn: 0,
        last_phase: None,
        over_frames,
    };

    let mut app = App::new(config, seed(), input, renderer)?;
    app.run();

    let state = app.state();
    log::info!(
        "Survived {:.2}s over {} ticks",
        state.elapsed,
        state.time_ticks
    );
    Ok(())
}
