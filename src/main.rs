mod clock;
mod game;
mod grid;
mod scores;
mod session;
mod snake;
mod term;
mod timers;

use anyhow::Result;

/// Grid coordinates are (row, column), 0-indexed from the top-left corner.
pub type GridInt = i16;
pub type Coords = (GridInt, GridInt);

fn main() -> Result<()> {
    let mut game = game::SnakeGame::new()?;
    game.run()
}
