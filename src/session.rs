use anyhow::Result;
use rand::Rng;

use crate::clock::GameClock;
use crate::grid::Grid;
use crate::scores::Scoreboard;
use crate::snake::{Heading, Snake};
use crate::Coords;

pub const STEP_INTERVAL_MS: u64 = 300;
pub const CLOCK_INTERVAL_MS: u64 = 1000;

const START_HEAD: Coords = (1, 3);
const START_HEADING: Heading = Heading::Down;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfHit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake advanced. `old_tail` is the vacated cell, `None` when the
    /// snake grew by eating.
    Moved {
        new_head: Coords,
        old_head: Coords,
        old_tail: Option<Coords>,
    },
    Died(Collision),
}

/// One play-through: the snake, the food, the score and the clock, advanced
/// tick by tick until a collision ends it. Restarting resets everything
/// except the persisted high score.
pub struct Session {
    grid: Grid,
    snake: Snake,
    food: Coords,
    clock: GameClock,
    scores: Scoreboard,
    phase: Phase,
}

impl Session {
    pub fn new<R: Rng>(grid: Grid, scores: Scoreboard, rng: &mut R) -> Self {
        Session {
            grid,
            snake: Snake::new(START_HEAD, START_HEADING),
            food: grid.random_cell(rng),
            clock: GameClock::new(),
            scores,
            phase: Phase::Idle,
        }
    }

    /// Begins a fresh session, discarding the previous snake, food, score
    /// and clock. Doubles as the restart transition after a game over.
    pub fn start<R: Rng>(&mut self, rng: &mut R) {
        self.snake = Snake::new(START_HEAD, START_HEADING);
        self.food = self.grid.random_cell(rng);
        self.clock.reset();
        self.scores.reset();
        self.phase = Phase::Running;
    }

    /// Advances the game by one step. Does nothing unless the session is
    /// running.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> Result<Option<TickOutcome>> {
        if self.phase != Phase::Running {
            return Ok(None);
        }

        let old_head = self.snake.head();
        let candidate = self.snake.next_head();

        if !self.grid.contains(candidate) {
            self.phase = Phase::GameOver;
            return Ok(Some(TickOutcome::Died(Collision::Wall)));
        }

        // The tail still counts as occupied even though it is about to be
        // vacated; stepping into it ends the game.
        if self.snake.occupies(candidate) {
            self.phase = Phase::GameOver;
            return Ok(Some(TickOutcome::Died(Collision::SelfHit)));
        }

        let ate = candidate == self.food;
        let old_tail = self.snake.advance(candidate, ate);

        if ate {
            self.scores.record_food()?;
            // Uniform over the whole grid, with no occupancy check: the new
            // food may land under the snake.
            self.food = self.grid.random_cell(rng);
        }

        Ok(Some(TickOutcome::Moved { new_head: candidate, old_head, old_tail }))
    }

    pub fn steer(&mut self, heading: Heading) {
        self.snake.steer(heading);
    }

    pub fn clock_tick(&mut self) {
        if self.phase == Phase::Running {
            self.clock.tick();
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Coords {
        self.food
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn high_score(&self) -> u32 {
        self.scores.high_score()
    }
}
