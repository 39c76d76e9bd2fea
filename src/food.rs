//! Food placement

use rand::Rng;

use crate::geometry::{Bounds, Rect};
use crate::{Coords, GridInt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pos: Coords,
}

impl Food {
    pub fn at(pos: Coords) -> Self {
        Food { pos }
    }

    /// Uses `preferred` when it lies inside the viewport, a random cell otherwise.
    pub fn spawn<R: Rng>(preferred: Coords, bounds: Bounds, cell_size: GridInt, rng: &mut R) -> Self {
        if bounds.contains(preferred) {
            Food::at(preferred)
        } else {
            Food::at(random_cell(bounds, cell_size, rng))
        }
    }

    pub fn pos(&self) -> Coords {
        self.pos
    }

    pub fn rect(&self, cell_size: GridInt) -> Rect {
        Rect::cell(self.pos, cell_size)
    }

    /// Moves the food somewhere else. The player's body is not excluded.
    pub fn respawn<R: Rng>(&mut self, bounds: Bounds, cell_size: GridInt, rng: &mut R) {
        self.pos = random_cell(bounds, cell_size, rng);
        log::debug!("food relocated to {:?}", self.pos);
    }
}

/// Uniform draw in `[1, size - 1]` on each axis, snapped down to the grid.
pub fn random_cell<R: Rng>(bounds: Bounds, cell_size: GridInt, rng: &mut R) -> Coords {
    let x = rng.gen_range(1..=bounds.width() - 1);
    let y = rng.gen_range(1..=bounds.height() - 1);
    (x / cell_size * cell_size, y / cell_size * cell_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_cell_is_aligned_and_in_range() {
        let bounds = Bounds::new(1200, 800).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1000 {
            let (x, y) = random_cell(bounds, 10, &mut rng);
            assert_eq!(x % 10, 0);
            assert_eq!(y % 10, 0);
            assert!(x >= 0 && x <= 1190);
            assert!(y >= 0 && y <= 790);
        }
    }

    #[test]
    fn test_random_cell_on_tiny_viewport() {
        // Only 1 can be drawn on either axis, which snaps to 0
        let bounds = Bounds::new(2, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_cell(bounds, 10, &mut rng), (0, 0));
    }

    #[test]
    fn test_spawn_prefers_given_position() {
        let mut rng = StdRng::seed_from_u64(3);
        let big = Bounds::new(1200, 800).unwrap();
        assert_eq!(Food::spawn((400, 200), big, 10, &mut rng).pos(), (400, 200));

        let small = Bounds::new(300, 100).unwrap();
        let food = Food::spawn((400, 200), small, 10, &mut rng);
        assert!(small.contains(food.pos()));
    }

    #[test]
    fn test_respawn_moves_food() {
        let bounds = Bounds::new(1200, 800).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let mut food = Food::at((400, 200));

        let moved = (0..100).any(|_| {
            food.respawn(bounds, 10, &mut rng);
            food.pos() != (400, 200)
        });
        assert!(moved);
    }
}
