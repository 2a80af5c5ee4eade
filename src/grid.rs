use crate::{Coords, GridInt};
use rand::Rng;

// Terminal characters are taller than wide, so a logical cell spans two
// columns and one row to look roughly square on screen.
pub const CELL_WIDTH: u16 = 2;
pub const CELL_HEIGHT: u16 = 1;

/// The playfield: a fixed rectangle of cells addressed by (row, col).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    rows: GridInt,
    cols: GridInt,
}

impl Grid {
    pub fn new(rows: GridInt, cols: GridInt) -> Self {
        Grid { rows, cols }
    }

    /// Derives the grid size from the terminal viewport, leaving room for
    /// the border box and the status line below it.
    pub fn from_viewport(term_width: u16, term_height: u16) -> Self {
        let inner_w = term_width.saturating_sub(2);
        let inner_h = term_height.saturating_sub(3);

        Grid {
            rows: (inner_h / CELL_HEIGHT) as GridInt,
            cols: (inner_w / CELL_WIDTH) as GridInt,
        }
    }

    pub fn rows(&self) -> GridInt {
        self.rows
    }

    pub fn cols(&self) -> GridInt {
        self.cols
    }

    pub fn contains(&self, (row, col): Coords) -> bool {
        row >= 0 && row < self.rows && col >= 0 && col < self.cols
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Coords {
        (rng.gen_range(0..self.rows), rng.gen_range(0..self.cols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn viewport_size_is_divided_by_cell_extent() {
        // 82 columns: 80 usable, 2 per cell. 27 rows: 24 usable after the
        // border and status line.
        let grid = Grid::from_viewport(82, 27);
        assert_eq!(grid.cols(), 40);
        assert_eq!(grid.rows(), 24);
    }

    #[test]
    fn tiny_viewport_does_not_underflow() {
        let grid = Grid::from_viewport(1, 1);
        assert_eq!(grid.cols(), 0);
        assert_eq!(grid.rows(), 0);
    }

    #[test]
    fn contains_checks_all_four_edges() {
        let grid = Grid::new(10, 20);
        assert!(grid.contains((0, 0)));
        assert!(grid.contains((9, 19)));
        assert!(!grid.contains((-1, 0)));
        assert!(!grid.contains((0, -1)));
        assert!(!grid.contains((10, 0)));
        assert!(!grid.contains((0, 20)));
    }

    #[test]
    fn random_cells_stay_in_bounds() {
        let grid = Grid::new(7, 13);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            assert!(grid.contains(grid.random_cell(&mut rng)));
        }
    }
}
