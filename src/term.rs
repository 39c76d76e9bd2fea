use crate::error::Result;
use crate::geometry::{Bounds, Rect};
use crate::render::{Paint, Renderer};
use crate::snake::Direction;
use crate::{Coords, GridInt, TermInt};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, read, poll};

const TAIL_COLOR: Color = Color::Rgb { r: 255, g: 120, b: 175 };

#[derive(Copy, Clone, PartialEq, Eq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell { ch: ' ', color: Color::Reset };

/// Input sampled once per frame.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FrameInput {
    pub heading: Option<Direction>,
    pub quit: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Prompt {
    Replay,
    Quit,
}

/// Draws the game one terminal character per grid cell, inside a border.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    cell_size: GridInt,
    stdout: Stdout,
    screen: Vec<Cell>,
    frame: Vec<Cell>,
}

impl TermManager {
    pub fn new(cell_size: GridInt) -> crossterm::Result<Self> {
        let (width, height) = terminal::size()?;
        let stdout = stdout();
        let screen = vec![BLANK; width as usize * height as usize];
        let frame = screen.clone();
        Ok(TermManager { width, height, cell_size, stdout, screen, frame })
    }

    /// Leaves the alternate screen again if anything after entering it fails.
    pub fn setup(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;

        let res = terminal::enable_raw_mode().and_then(|_| {
            execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))
        });

        if res.is_err() {
            let _ = self.restore();
        }
        res
    }

    /// Tries every step even if an earlier one fails, and reports the first error.
    pub fn restore(&mut self) -> crossterm::Result<()> {
        let raw = terminal::disable_raw_mode();
        let screen = execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen);
        raw.and(screen)
    }

    /// The playfield in grid units. Column `width / cell` must still be drawable,
    /// so the grid gets one column (and row) less than the space inside the border.
    pub fn playfield_bounds(&self) -> Result<Bounds> {
        let cols = self.width.saturating_sub(3) as GridInt;
        let rows = self.height.saturating_sub(3) as GridInt;
        Bounds::new(cols * self.cell_size, rows * self.cell_size)
    }

    pub fn read_key_blocking(&self) -> crossterm::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    pub fn read_key_events_queue(&self) -> crossterm::Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    /// Drains pending key events; the last direction key of the batch wins.
    pub fn read_frame_input(&self) -> crossterm::Result<FrameInput> {
        let mut input = FrameInput::default();

        for key_ev in self.read_key_events_queue()? {
            if is_ctrl_c(&key_ev) {
                input.quit = true;
                continue;
            }

            if let Some(dir) = heading_for(key_ev.code) {
                input.heading = Some(dir);
            }
        }

        Ok(input)
    }

    /// Blocks until the player picks Enter (replay) or Esc / Ctrl+C (quit).
    pub fn read_prompt(&self) -> crossterm::Result<Prompt> {
        loop {
            let ev = self.read_key_blocking()?;
            if let Some(choice) = prompt_choice(&ev) {
                return Ok(choice);
            }
        }
    }

    #[cfg(test)]
    fn with_size(width: TermInt, height: TermInt, cell_size: GridInt) -> Self {
        let screen = vec![BLANK; width as usize * height as usize];
        let frame = screen.clone();
        TermManager { width, height, cell_size, stdout: stdout(), screen, frame }
    }

    #[cfg(test)]
    fn char_at(&self, pos: Coords) -> char {
        self.frame[self.width as usize * pos.1 as usize + pos.0 as usize].ch
    }

    ///////////////////////////////////////////////////////////////////////////

    fn put(&mut self, pos: Coords, ch: char, color: Color) {
        if pos.0 < 0 || pos.1 < 0 || pos.0 >= self.width as GridInt || pos.1 >= self.height as GridInt {
            return;
        }

        let idx = self.width as usize * pos.1 as usize + pos.0 as usize;
        self.frame[idx] = Cell { ch, color };
    }

    /// Terminal position of a grid coordinate, shifted by one for the border.
    fn to_screen(&self, pos: Coords) -> Option<Coords> {
        if pos.0 < 0 || pos.1 < 0 {
            return None;
        }

        Some((pos.0 / self.cell_size + 1, pos.1 / self.cell_size + 1))
    }

    fn interior_contains(&self, pos: Coords) -> bool {
        pos.0 >= 1 && pos.1 >= 1 && pos.0 < self.width as GridInt - 1 && pos.1 < self.height as GridInt - 1
    }
}

impl Renderer for TermManager {
    fn clear(&mut self) {
        for cell in self.frame.iter_mut() {
            *cell = BLANK;
        }
    }

    fn border(&mut self, bounds: Bounds) {
        // Grid columns run from 1 to width / cell + 1, so the frame sits one further out
        let end_x = bounds.width() / self.cell_size + 2;
        let end_y = bounds.height() / self.cell_size + 2;

        for x in 0..=end_x {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.put((x, 0), ch, Color::Reset);
            self.put((x, end_y), ch, Color::Reset);
        }

        for y in 1..end_y {
            self.put((0, y), '|', Color::Reset);
            self.put((end_x, y), '|', Color::Reset);
        }
    }

    fn grid_lines(&mut self, bounds: Bounds, spacing: GridInt) {
        if spacing <= 0 {
            return;
        }

        let mut y = 0;
        while y <= bounds.height() {
            let mut x = 0;
            while x <= bounds.width() {
                if let Some(pos) = self.to_screen((x, y)) {
                    if self.interior_contains(pos) {
                        self.put(pos, '·', Color::DarkGrey);
                    }
                }
                x += spacing;
            }
            y += spacing;
        }
    }

    fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        let (ch, color) = match paint {
            Paint::Food => ('O', Color::Green),
            Paint::Player => ('█', Color::Magenta),
            Paint::Tail => ('█', TAIL_COLOR),
        };

        let mut y = rect.y;
        while y < rect.y + rect.h {
            let mut x = rect.x;
            while x < rect.x + rect.w {
                if let Some(pos) = self.to_screen((x, y)) {
                    if self.interior_contains(pos) {
                        self.put(pos, ch, color);
                    }
                }
                x += self.cell_size;
            }
            y += self.cell_size;
        }
    }

    fn text(&mut self, lines: &[&str]) {
        let msg_height = (lines.len() + 2) as GridInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as GridInt;
        let center = (self.width as GridInt / 2, self.height as GridInt / 2);
        let top_left = (center.0 - msg_width / 2, center.1 - msg_height / 2);

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.put((top_left.0 + x_diff, *y), ' ', Color::Reset);
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as GridInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.put((top_left.0 + x_diff as GridInt, y), ch, Color::Reset);
            }
        }
    }

    /// Writes out only the cells that differ from what is already on screen.
    fn present(&mut self) -> Result<()> {
        let mut current_color = None;

        for i in 0..self.frame.len() {
            let cell = self.frame[i];
            if self.screen[i] == cell {
                continue;
            }

            let x = (i % self.width as usize) as TermInt;
            let y = (i / self.width as usize) as TermInt;

            if current_color != Some(cell.color) {
                queue!(self.stdout, style::SetForegroundColor(cell.color))?;
                current_color = Some(cell.color);
            }
            queue!(self.stdout, cursor::MoveTo(x, y), style::Print(cell.ch))?;
            self.screen[i] = cell;
        }

        self.stdout.flush()?;
        Ok(())
    }
}

fn heading_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Char('w') | KeyCode::Up => Some(Direction::Up),
        KeyCode::Char('a') | KeyCode::Left => Some(Direction::Left),
        KeyCode::Char('s') | KeyCode::Down => Some(Direction::Down),
        KeyCode::Char('d') | KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

fn prompt_choice(ev: &KeyEvent) -> Option<Prompt> {
    if is_ctrl_c(ev) {
        return Some(Prompt::Quit);
    }

    match ev.code {
        KeyCode::Enter => Some(Prompt::Replay),
        KeyCode::Esc => Some(Prompt::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
