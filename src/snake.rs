use crate::geometry::Rect;
use crate::{Coords, GridInt};
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    fn delta(self) -> Coords {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// Body segments trailing the head, neck first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tail {
    segments: Vec<Coords>,
}

impl Tail {
    pub fn new() -> Self {
        Tail { segments: vec![] }
    }

    pub fn segments(&self) -> &[Coords] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn grow(&mut self, at: Coords) {
        self.segments.push(at);
    }

    /// Every segment moves into its predecessor's cell and the neck takes `head`.
    /// The length stays the same; only `grow` adds segments.
    pub fn advance(&mut self, head: Coords) {
        if self.segments.is_empty() {
            return;
        }

        for i in (1..self.segments.len()).rev() {
            self.segments[i] = self.segments[i - 1];
        }
        self.segments[0] = head;
    }

    pub fn collides_with(&self, rect: &Rect, cell_size: GridInt) -> bool {
        self.segments.iter().any(|&seg| Rect::cell(seg, cell_size).overlaps(rect))
    }
}

pub struct Player {
    pos: Coords,
    direction: Direction,
    tail: Tail,
    cell_size: GridInt,
}

impl Player {
    pub fn new(pos: Coords, direction: Direction, cell_size: GridInt) -> Self {
        Player::with_tail(pos, direction, Tail::new(), cell_size)
    }

    pub fn with_tail(pos: Coords, direction: Direction, tail: Tail, cell_size: GridInt) -> Self {
        Player { pos, direction, tail, cell_size }
    }

    pub fn pos(&self) -> Coords {
        self.pos
    }

    pub fn rect(&self) -> Rect {
        Rect::cell(self.pos, self.cell_size)
    }

    pub fn tail(&self) -> &Tail {
        &self.tail
    }

    pub fn tail_mut(&mut self) -> &mut Tail {
        &mut self.tail
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    /// Returns false when the request was a reversal and got ignored.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() {
            return false;
        }

        self.direction = new_direction;
        true
    }

    pub fn move_step(&mut self) {
        let (dx, dy) = self.direction.delta();
        self.pos = (self.pos.0 + dx * self.cell_size, self.pos.1 + dy * self.cell_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [Up, Down, Left, Right];

    #[test]
    fn test_reversal_is_ignored() {
        for &current in ALL.iter() {
            let mut player = Player::new((50, 50), current, 10);
            assert!(!player.set_direction(current.opposite()));
            assert_eq!(player.get_direction(), current);
        }
    }

    #[test]
    fn test_turns_are_applied() {
        let mut player = Player::new((50, 50), Right, 10);
        assert!(player.set_direction(Up));
        assert_eq!(player.get_direction(), Up);
        assert!(player.set_direction(Up));
        assert!(player.set_direction(Left));
        assert_eq!(player.get_direction(), Left);
    }

    #[test]
    fn test_move_is_one_cell_on_one_axis() {
        let cases = [(Up, (50, 40)), (Down, (50, 60)), (Left, (40, 50)), (Right, (60, 50))];

        for &(dir, expected) in cases.iter() {
            let mut player = Player::new((50, 50), dir, 10);
            player.move_step();
            assert_eq!(player.pos(), expected);
        }
    }

    #[test]
    fn test_move_is_not_clamped() {
        let mut player = Player::new((0, 0), Left, 10);
        player.move_step();
        assert_eq!(player.pos(), (-10, 0));
    }

    #[test]
    fn test_advance_shifts_chain() {
        let mut tail = Tail::new();
        tail.grow((10, 10));
        tail.grow((0, 10));
        tail.grow((0, 0));

        tail.advance((20, 10));

        assert_eq!(tail.segments(), &[(20, 10), (10, 10), (0, 10)]);
        assert_eq!(tail.len(), 3);
    }

    #[test]
    fn test_advance_on_empty_tail_is_noop() {
        let mut tail = Tail::new();
        tail.advance((20, 10));
        assert!(tail.is_empty());
    }

    #[test]
    fn test_tail_collision() {
        let mut tail = Tail::new();
        tail.grow((30, 30));
        tail.grow((20, 30));

        assert!(tail.collides_with(&Rect::cell((20, 30), 10), 10));
        assert!(!tail.collides_with(&Rect::cell((40, 30), 10), 10));
        assert!(!Tail::new().collides_with(&Rect::cell((0, 0), 10), 10));
    }
}
