use std::thread::sleep;
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::grid::{Grid, CELL_WIDTH};
use crate::scores::{HighScoreStore, Scoreboard};
use crate::session::{Session, TickOutcome};
use crate::snake::Heading;
use crate::term::TermManager;
use crate::timers::Timers;
use crate::{Coords, GridInt};

const BASE_TICK_MS: u64 = 10;

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

const MIN_ROWS: GridInt = 4;
const MIN_COLS: GridInt = 8;

enum SessionEnd {
    GameOver,
    Quit,
}

pub struct SnakeGame {
    term: TermManager,
    grid: Grid,
    session: Session,
    timers: Timers,
}

impl SnakeGame {
    pub fn new() -> Result<Self> {
        let term = TermManager::new()?;
        let (width, height) = term.size();

        let grid = Grid::from_viewport(width, height);
        if grid.rows() < MIN_ROWS || grid.cols() < MIN_COLS {
            bail!(
                "the terminal is too small for a playable grid (got {} rows x {} cols)",
                grid.rows(),
                grid.cols()
            );
        }

        let scores = Scoreboard::load(HighScoreStore::open_default());
        let session = Session::new(grid, scores, &mut rand::thread_rng());

        Ok(SnakeGame { term, grid, session, timers: Timers::new() })
    }

    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let result = self.run_sessions();

        // Hand the terminal back even when the game loop failed
        let restored = self.term.restore();
        result.and(restored)
    }

    fn run_sessions(&mut self) -> Result<()> {
        self.draw_full_state()?;
        self.term.show_message(&[
            "Arrow keys or WASD to steer",
            "Q or Ctrl+C to quit",
            "",
            "Press any key to start",
        ])?;

        if is_quit(&self.term.read_key_blocking()?) {
            return Ok(());
        }

        loop {
            self.start_session()?;

            if let SessionEnd::Quit = self.play_session()? {
                return Ok(());
            }

            self.show_game_over()?;
            if is_quit(&self.term.read_key_blocking()?) {
                return Ok(());
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn start_session(&mut self) -> Result<()> {
        // Dropping the old timers cancels anything still pending from the
        // previous session before the new schedules begin
        self.timers = Timers::new();
        self.session.start(&mut rand::thread_rng());
        self.draw_full_state()
    }

    fn play_session(&mut self) -> Result<SessionEnd> {
        loop {
            sleep(Duration::from_millis(BASE_TICK_MS));

            for key_ev in self.term.drain_key_events()? {
                if is_quit(&key_ev) {
                    return Ok(SessionEnd::Quit);
                }
                if let Some(heading) = heading_for(&key_ev) {
                    self.session.steer(heading);
                }
            }

            for _ in 0..self.timers.clock.advance(BASE_TICK_MS) {
                self.session.clock_tick();
                self.draw_status()?;
            }

            for _ in 0..self.timers.step.advance(BASE_TICK_MS) {
                match self.session.tick(&mut rand::thread_rng())? {
                    Some(TickOutcome::Moved { new_head, old_head, old_tail }) => {
                        self.draw_step(new_head, old_head, old_tail)?;
                    }
                    Some(TickOutcome::Died(_)) => return Ok(SessionEnd::GameOver),
                    None => {}
                }
            }

            self.term.flush()?;
        }
    }

    fn draw_step(&mut self, new_head: Coords, old_head: Coords, old_tail: Option<Coords>) -> Result<()> {
        let head_ch = head_char(self.session.snake().heading());
        self.draw_cell(new_head, head_ch)?;
        self.draw_cell(old_head, SNAKE_BODY_CHAR)?;

        match old_tail {
            Some(tail) => self.draw_cell(tail, ' ')?,
            None => {
                // The snake grew, so a new piece of food is on the board
                self.draw_cell(self.session.food(), FOOD_CHAR)?;
                self.draw_status()?;
            }
        }

        Ok(())
    }

    fn draw_full_state(&mut self) -> Result<()> {
        self.term.clear()?;

        let box_width = self.grid.cols() as u16 * CELL_WIDTH + 2;
        let box_height = self.grid.rows() as u16 + 2;
        self.term.draw_box((0, 0), box_width, box_height)?;

        self.draw_cell(self.session.food(), FOOD_CHAR)?;

        let head_ch = head_char(self.session.snake().heading());
        let body: Vec<Coords> = self.session.snake().body().to_vec();
        for (i, cell) in body.into_iter().enumerate() {
            let ch = if i == 0 { head_ch } else { SNAKE_BODY_CHAR };
            self.draw_cell(cell, ch)?;
        }

        self.draw_status()?;
        self.term.flush()
    }

    fn draw_status(&mut self) -> Result<()> {
        let line = format!(
            "Score: {}   Best: {}   Time: {}",
            self.session.score(),
            self.session.high_score(),
            self.session.clock(),
        );

        // Padded to the board width to overwrite any longer previous line
        let width = self.grid.cols() as usize * CELL_WIDTH as usize;
        let padded = format!("{:<width$}", line, width = width);
        let y = self.grid.rows() as u16 + 2;
        self.term.print_text((1, y), &padded)
    }

    fn draw_cell(&mut self, (row, col): Coords, ch: char) -> Result<()> {
        let x = 1 + col as u16 * CELL_WIDTH;
        let y = 1 + row as u16;

        for x_diff in 0..CELL_WIDTH {
            self.term.print_at((x + x_diff, y), ch)?;
        }

        Ok(())
    }

    fn show_game_over(&mut self) -> Result<()> {
        let body: Vec<Coords> = self.session.snake().body().to_vec();
        for cell in body {
            self.draw_cell(cell, DEAD_SNAKE_CHAR)?;
        }

        let score = format!("Score: {}", self.session.score());
        let best = format!("Best: {}", self.session.high_score());
        let time = format!("Time: {}", self.session.clock());

        self.term.show_message(&[
            "Game over!",
            &score,
            &best,
            &time,
            "",
            "Press any key to play again,",
            "or Q to quit.",
        ])
    }
}

fn head_char(heading: Heading) -> char {
    match heading {
        Heading::Up => '^',
        Heading::Down => 'v',
        Heading::Left => '<',
        Heading::Right => '>',
    }
}

fn heading_for(ev: &KeyEvent) -> Option<Heading> {
    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Heading::Up),
        KeyCode::Char('s') | KeyCode::Down => Some(Heading::Down),
        KeyCode::Char('a') | KeyCode::Left => Some(Heading::Left),
        KeyCode::Char('d') | KeyCode::Right => Some(Heading::Right),
        _ => None,
    }
}

fn is_quit(ev: &KeyEvent) -> bool {
    matches!(
        ev,
        KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL }
    ) || ev.code == KeyCode::Char('q')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_and_wasd_keys_map_to_headings() {
        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(heading_for(&up), Some(Heading::Up));

        let a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(heading_for(&a), Some(Heading::Left));

        let s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(heading_for(&s), Some(Heading::Down));

        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(heading_for(&right), Some(Heading::Right));

        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(heading_for(&x), None);
    }

    #[test]
    fn quit_keys_are_recognized() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(is_quit(&ctrl_c));

        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(is_quit(&q));

        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert!(!is_quit(&plain_c));
    }
}
