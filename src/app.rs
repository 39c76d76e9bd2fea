use std::{thread::sleep, time::{Duration, Instant}};

use rand::Rng;

use crate::config::{GameConfig, TARGET_FPS};
use crate::error::Result;
use crate::game::{GameState, Session, SessionOutcome};
use crate::geometry::{Bounds, Rect};
use crate::render::{self, Paint, Renderer};
use crate::snake::Direction;
use crate::term::{Prompt, TermManager};
use crate::GridInt;

/// Elapsed time and requested heading for one rendered frame.
pub type Frame = (Duration, Option<Direction>);

/// Where frames come from: the live keyboard and clock, or a script in tests.
pub trait FrameSource {
    /// `None` means the player asked to quit.
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

/// Wall-clock time between consecutive frames.
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        FrameClock { last: Instant::now() }
    }

    pub fn elapsed_since_last_frame(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        elapsed
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs frames until the session ends or the source runs dry, rendering and
/// presenting after every one. Returns the state the session was left in.
pub fn run_frames<R, F>(session: &mut Session<R>, front: &mut F) -> Result<GameState>
where
    R: Rng,
    F: Renderer + FrameSource,
{
    while let Some((elapsed, heading)) = front.next_frame()? {
        let state = session.frame(elapsed, heading);

        session.render(front);
        front.present()?;

        if state == GameState::GameOver {
            break;
        }
    }

    Ok(session.state())
}

/// Calls `teardown` whatever happens in `setup` or `body`. The first error wins.
pub fn run_guarded<S, T>(
    state: &mut S,
    setup: impl FnOnce(&mut S) -> Result<()>,
    body: impl FnOnce(&mut S) -> Result<T>,
    teardown: impl FnOnce(&mut S) -> Result<()>,
) -> Result<T> {
    let res = setup(state).and_then(|_| body(state));
    let cleanup = teardown(state);

    let value = res?;
    cleanup?;
    Ok(value)
}

/// The terminal paced to the target frame rate, read once per frame.
struct LiveTerminal<'a> {
    term: &'a mut TermManager,
    clock: FrameClock,
    budget: Duration,
    frame_start: Option<Instant>,
}

impl<'a> LiveTerminal<'a> {
    fn new(term: &'a mut TermManager) -> Self {
        LiveTerminal {
            term,
            clock: FrameClock::new(),
            budget: Duration::from_secs(1) / TARGET_FPS,
            frame_start: None,
        }
    }
}

impl FrameSource for LiveTerminal<'_> {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        if let Some(start) = self.frame_start {
            if let Some(rest) = self.budget.checked_sub(start.elapsed()) {
                sleep(rest);
            }
        }
        self.frame_start = Some(Instant::now());

        let input = self.term.read_frame_input()?;
        if input.quit {
            return Ok(None);
        }

        Ok(Some((self.clock.elapsed_since_last_frame(), input.heading)))
    }
}

impl Renderer for LiveTerminal<'_> {
    fn clear(&mut self) {
        self.term.clear();
    }

    fn border(&mut self, bounds: Bounds) {
        self.term.border(bounds);
    }

    fn grid_lines(&mut self, bounds: Bounds, spacing: GridInt) {
        self.term.grid_lines(bounds, spacing);
    }

    fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        self.term.fill_rect(rect, paint);
    }

    fn text(&mut self, lines: &[&str]) {
        self.term.text(lines);
    }

    fn present(&mut self) -> Result<()> {
        self.term.present()
    }
}

/// Owns the terminal and runs sessions back to back until the player quits.
pub struct SnakeApp {
    config: GameConfig,
    term: TermManager,
}

impl SnakeApp {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let term = TermManager::new(config.cell_size)?;
        Ok(SnakeApp { config, term })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup()?;
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.term.restore()?;
        Ok(())
    }

    pub fn run(&mut self) -> Result<()> {
        let bounds = self.term.playfield_bounds()?;

        loop {
            let outcome = match self.play(Session::new(bounds, self.config)?)? {
                Some(outcome) => outcome,
                None => {
                    log::info!("quit during play");
                    return Ok(());
                }
            };

            render::draw_end_screen(&mut self.term, &outcome);
            self.term.present()?;

            match self.term.read_prompt()? {
                Prompt::Replay => log::info!("replaying after scoring {}", outcome.score),
                Prompt::Quit => {
                    log::info!("quit from the end screen");
                    return Ok(());
                }
            }
        }
    }

    /// Plays one session to the end. `None` means the player quit mid-game.
    fn play(&mut self, mut session: Session) -> Result<Option<SessionOutcome>> {
        let mut live = LiveTerminal::new(&mut self.term);

        match run_frames(&mut session, &mut live)? {
            GameState::GameOver => Ok(session.outcome()),
            GameState::Playing => Ok(None),
        }
    }
}
