//! What gets drawn, independent of where it is drawn to.

use rand::Rng;

use crate::error::Result;
use crate::game::{Session, SessionOutcome};
use crate::geometry::{Bounds, Rect};
use crate::GridInt;

/// Color tag for a draw call; the backend picks the actual look.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Paint {
    Food,
    Player,
    Tail,
}

pub trait Renderer {
    fn clear(&mut self);
    /// Outline just outside the playfield described by `bounds`.
    fn border(&mut self, bounds: Bounds);
    fn grid_lines(&mut self, bounds: Bounds, spacing: GridInt);
    fn fill_rect(&mut self, rect: Rect, paint: Paint);
    /// Centered block of text drawn on top of everything else.
    fn text(&mut self, lines: &[&str]);

    /// Shows everything drawn since the last `clear`.
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

pub fn draw_playfield<T: Renderer, R: Rng>(out: &mut T, session: &Session<R>) {
    let bounds = session.bounds();
    let cell = session.config().cell_size;
    let player = session.player();

    out.clear();
    out.border(bounds);
    out.grid_lines(bounds, cell);

    out.fill_rect(session.food().rect(cell), Paint::Food);
    out.fill_rect(player.rect(), Paint::Player);

    for &seg in player.tail().segments() {
        out.fill_rect(Rect::cell(seg, cell), Paint::Tail);
    }
}

pub fn end_screen_lines(outcome: &SessionOutcome) -> Vec<String> {
    vec![
        "Game Over".to_string(),
        format!("Score: {}", outcome.score),
        "Press Enter to replay".to_string(),
        "Press Esc to quit".to_string(),
    ]
}

pub fn draw_end_screen<T: Renderer>(out: &mut T, outcome: &SessionOutcome) {
    let lines = end_screen_lines(outcome);
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    out.text(&lines);
}
