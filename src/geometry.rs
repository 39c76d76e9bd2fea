use crate::error::{GameError, Result};
use crate::{Coords, GridInt};

/// Axis-aligned integer rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: GridInt,
    pub y: GridInt,
    pub w: GridInt,
    pub h: GridInt,
}

impl Rect {
    pub fn new(x: GridInt, y: GridInt, w: GridInt, h: GridInt) -> Self {
        Rect { x, y, w, h }
    }

    /// The square grid cell whose top-left corner is `pos`.
    pub fn cell(pos: Coords, size: GridInt) -> Self {
        Rect { x: pos.0, y: pos.1, w: size, h: size }
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(*self, *other)
    }
}

/// Half-open overlap test: rectangles that only share an edge do not overlap.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Size of the playfield, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    width: GridInt,
    height: GridInt,
}

impl Bounds {
    /// Anything narrower than 2 units leaves no room for a food draw in `[1, size - 1]`.
    pub fn new(width: GridInt, height: GridInt) -> Result<Self> {
        if width < 2 || height < 2 {
            return Err(GameError::InvalidBounds { width, height });
        }

        Ok(Bounds { width, height })
    }

    pub fn width(&self) -> GridInt {
        self.width
    }

    pub fn height(&self) -> GridInt {
        self.height
    }

    /// Inclusive on both ends: a position sitting exactly on the far edge is still inside.
    pub fn contains(&self, pos: Coords) -> bool {
        pos.0 >= 0 && pos.0 <= self.width && pos.1 >= 0 && pos.1 <= self.height
    }

    pub fn center(&self, cell_size: GridInt) -> Coords {
        (self.width / 2 / cell_size * cell_size, self.height / 2 / cell_size * cell_size)
    }
}
