use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::error::Result;
use crate::food::Food;
use crate::geometry::Bounds;
use crate::render::{self, Renderer};
use crate::snake::{Direction, Player};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameState {
    Playing,
    GameOver,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeathCause {
    SelfCollision,
    OutOfBounds,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StepResult {
    Moved,
    Ate { score: u32 },
    Crashed(DeathCause),
}

/// What the shell gets back once a session is over.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub score: u32,
    pub cause: DeathCause,
}

/// One round of play, from spawn to game over.
pub struct Session<R: Rng = StdRng> {
    config: GameConfig,
    bounds: Bounds,
    player: Player,
    food: Food,
    score: u32,
    accumulator: f64,
    movement_interval: f64,
    state: GameState,
    cause: Option<DeathCause>,
    rng: R,
}

impl Session<StdRng> {
    pub fn new(bounds: Bounds, config: GameConfig) -> Result<Self> {
        Session::with_rng(bounds, config, StdRng::from_entropy())
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(bounds: Bounds, config: GameConfig, mut rng: R) -> Result<Self> {
        config.validate()?;

        let player = Player::new(bounds.center(config.cell_size), Direction::Right, config.cell_size);
        let food = Food::spawn(config.initial_food, bounds, config.cell_size, &mut rng);
        Session::from_parts(bounds, config, player, food, rng)
    }

    /// Starts a session from an arbitrary board position.
    pub fn from_parts(bounds: Bounds, config: GameConfig, player: Player, food: Food, rng: R) -> Result<Self> {
        config.validate()?;
        log::info!("session started on a {}x{} board", bounds.width(), bounds.height());

        Ok(Session {
            config,
            bounds,
            player,
            food,
            score: 0,
            accumulator: 0.0,
            movement_interval: config.initial_interval,
            state: GameState::Playing,
            cause: None,
            rng,
        })
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn movement_interval(&self) -> f64 {
        self.movement_interval
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.cause.map(|cause| SessionOutcome { score: self.score, cause })
    }

    /// Runs one rendered frame worth of simulation: applies the requested heading,
    /// banks the elapsed time and takes a step once a full interval has built up.
    pub fn frame(&mut self, elapsed: Duration, heading: Option<Direction>) -> GameState {
        if self.state == GameState::GameOver {
            return self.state;
        }

        if let Some(dir) = heading {
            if !self.player.set_direction(dir) {
                log::debug!("ignored reversal from {:?} to {:?}", self.player.get_direction(), dir);
            }
        }

        self.accumulator += elapsed.as_secs_f64();

        if self.accumulator >= self.movement_interval {
            self.step();
        }

        // Checked every frame, not only on steps
        if self.state == GameState::Playing && !self.bounds.contains(self.player.pos()) {
            self.end(DeathCause::OutOfBounds);
        }

        self.state
    }

    /// A single fixed-interval update. The crash check runs against the
    /// position from before the move, ahead of eating, growing and moving.
    pub fn step(&mut self) -> StepResult {
        if self.state == GameState::GameOver {
            return StepResult::Crashed(self.cause.unwrap_or(DeathCause::OutOfBounds));
        }

        let cell = self.config.cell_size;
        let head = self.player.pos();
        let head_rect = self.player.rect();

        let crash = if self.player.tail().collides_with(&head_rect, cell) {
            Some(DeathCause::SelfCollision)
        } else if !self.bounds.contains(head) {
            Some(DeathCause::OutOfBounds)
        } else {
            None
        };

        if let Some(cause) = crash {
            self.end(cause);
            return StepResult::Crashed(cause);
        }

        let mut result = StepResult::Moved;

        if head_rect.overlaps(&self.food.rect(cell)) {
            self.score += 1;
            self.movement_interval *= self.config.speed_up;
            self.food.respawn(self.bounds, cell, &mut self.rng);
            self.player.tail_mut().grow(head);

            log::info!("food eaten, score {} (interval now {:.4}s)", self.score, self.movement_interval);
            result = StepResult::Ate { score: self.score };
        }

        self.player.tail_mut().advance(head);
        self.player.move_step();
        self.accumulator = 0.0;

        result
    }

    pub fn render<T: Renderer>(&self, out: &mut T) {
        render::draw_playfield(out, self);
    }

    fn end(&mut self, cause: DeathCause) {
        self.state = GameState::GameOver;
        self.cause = Some(cause);
        log::info!("game over ({:?}), final score {}", cause, self.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::snake::Tail;

    fn seeded(player: Player, food: Food) -> Session<StdRng> {
        let bounds = Bounds::new(1200, 800).unwrap();
        Session::from_parts(bounds, GameConfig::default(), player, food, StdRng::seed_from_u64(5)).unwrap()
    }

    #[test]
    fn test_bad_config_fails_before_touching_the_grid() {
        let bounds = Bounds::new(1200, 800).unwrap();
        let zero_cell = GameConfig { cell_size: 0, ..Default::default() };

        let res = Session::with_rng(bounds, zero_cell, StdRng::seed_from_u64(1));
        assert!(matches!(res, Err(GameError::InvalidConfig(_))));

        let stalled = GameConfig { speed_up: 1.0, ..Default::default() };
        let player = Player::new((100, 100), Direction::Right, 10);
        let res = Session::from_parts(bounds, stalled, player, Food::at((0, 0)), StdRng::seed_from_u64(1));
        assert!(matches!(res, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_no_step_before_interval() {
        let mut session = seeded(Player::new((100, 100), Direction::Right, 10), Food::at((400, 200)));

        session.frame(Duration::from_millis(50), None);
        assert_eq!(session.player().pos(), (100, 100));
        assert!((session.accumulator() - 0.05).abs() < 1e-9);

        session.frame(Duration::from_millis(50), None);
        assert_eq!(session.player().pos(), (110, 100));
        assert_eq!(session.accumulator(), 0.0);
    }

    #[test]
    fn test_accumulator_resets_instead_of_carrying_over() {
        let mut session = seeded(Player::new((100, 100), Direction::Right, 10), Food::at((400, 200)));

        // A long frame still only yields one step and the excess is dropped
        session.frame(Duration::from_millis(350), None);
        assert_eq!(session.player().pos(), (110, 100));
        assert_eq!(session.accumulator(), 0.0);
    }

    #[test]
    fn test_heading_applied_before_step() {
        let mut session = seeded(Player::new((100, 100), Direction::Right, 10), Food::at((400, 200)));

        session.frame(Duration::from_millis(100), Some(Direction::Down));
        assert_eq!(session.player().pos(), (100, 110));

        session.frame(Duration::from_millis(100), Some(Direction::Up));
        assert_eq!(session.player().get_direction(), Direction::Down);
        assert_eq!(session.player().pos(), (100, 120));
    }

    #[test]
    fn test_eating_grows_and_advances_in_same_step() {
        let mut session = seeded(Player::new((100, 100), Direction::Right, 10), Food::at((100, 100)));

        assert_eq!(session.step(), StepResult::Ate { score: 1 });
        assert_eq!(session.player().tail().segments(), &[(100, 100)]);
        assert_eq!(session.player().pos(), (110, 100));
    }

    #[test]
    fn test_meals_compound_speed_up_and_growth() {
        let mut session = seeded(Player::new((100, 400), Direction::Right, 10), Food::at((100, 400)));
        let initial = session.movement_interval();
        let mut last = initial;

        for n in 1..=6u32 {
            session.food = Food::at(session.player().pos());

            assert_eq!(session.step(), StepResult::Ate { score: n });
            assert_eq!(session.player().tail().len(), n as usize);
            assert!(session.movement_interval() < last);
            assert!((session.movement_interval() - initial * 0.9f64.powi(n as i32)).abs() < 1e-12);

            last = session.movement_interval();
        }

        // Body trails the head in a straight line
        assert_eq!(session.player().pos(), (160, 400));
        assert_eq!(
            session.player().tail().segments(),
            &[(150, 400), (140, 400), (130, 400), (120, 400), (110, 400), (100, 400)]
        );
    }

    #[test]
    fn test_self_collision_wins_over_food() {
        let mut tail = Tail::new();
        tail.grow((100, 100));
        let player = Player::with_tail((100, 100), Direction::Right, tail, 10);
        let mut session = seeded(player, Food::at((100, 100)));

        assert_eq!(session.step(), StepResult::Crashed(DeathCause::SelfCollision));
        assert_eq!(session.score(), 0);
        assert_eq!(session.player().tail().len(), 1);
        assert_eq!(session.player().pos(), (100, 100));
    }

    #[test]
    fn test_game_over_freezes_session() {
        let mut session = seeded(Player::new((-10, 100), Direction::Right, 10), Food::at((400, 200)));

        assert_eq!(session.frame(Duration::from_millis(16), None), GameState::GameOver);
        assert_eq!(
            session.outcome(),
            Some(SessionOutcome { score: 0, cause: DeathCause::OutOfBounds })
        );

        session.frame(Duration::from_secs(1), Some(Direction::Down));
        assert_eq!(session.player().pos(), (-10, 100));
    }

    #[test]
    fn test_step_onto_far_edge_is_still_playing() {
        let mut session = seeded(Player::new((1190, 100), Direction::Right, 10), Food::at((400, 200)));

        assert_eq!(session.frame(Duration::from_millis(100), None), GameState::Playing);
        assert_eq!(session.player().pos(), (1200, 100));

        assert_eq!(session.frame(Duration::from_millis(100), None), GameState::GameOver);
        assert_eq!(session.player().pos(), (1210, 100));
    }
}
