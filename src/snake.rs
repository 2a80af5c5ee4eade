use crate::{Coords, GridInt};
use Heading::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// (row, col) offset of a single step in this heading.
    pub fn delta(self) -> (GridInt, GridInt) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub fn opposes(self, other: Heading) -> bool {
        matches!(
            (self, other),
            (Up, Down) | (Down, Up) | (Left, Right) | (Right, Left)
        )
    }
}

pub struct Snake {
    body: Vec<Coords>, // head first
    heading: Heading,
}

impl Snake {
    pub fn new(head: Coords, heading: Heading) -> Self {
        Snake { body: vec![head], heading }
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Turns the snake, ignoring a heading that would reverse it straight
    /// into its own neck.
    pub fn steer(&mut self, heading: Heading) {
        if !heading.opposes(self.heading) {
            self.heading = heading;
        }
    }

    /// The cell the head would occupy after one step, bounds unchecked.
    pub fn next_head(&self) -> Coords {
        let (dr, dc) = self.heading.delta();
        let (row, col) = self.head();
        (row + dr, col + dc)
    }

    /// Whether any segment, the tail included, sits on the given cell.
    pub fn occupies(&self, cell: Coords) -> bool {
        self.body.contains(&cell)
    }

    /// Pushes the new head. Unless growing, pops the tail and returns the
    /// vacated cell.
    pub fn advance(&mut self, new_head: Coords, grow: bool) -> Option<Coords> {
        self.body.insert(0, new_head);

        if grow {
            None
        } else {
            self.body.pop()
        }
    }

    #[cfg(test)]
    pub fn from_segments(segments: Vec<Coords>, heading: Heading) -> Self {
        Snake { body: segments, heading }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_match_headings() {
        assert_eq!(Up.delta(), (-1, 0));
        assert_eq!(Down.delta(), (1, 0));
        assert_eq!(Left.delta(), (0, -1));
        assert_eq!(Right.delta(), (0, 1));
    }

    #[test]
    fn only_exact_reversals_oppose() {
        assert!(Up.opposes(Down));
        assert!(Left.opposes(Right));
        assert!(!Up.opposes(Left));
        assert!(!Down.opposes(Down));
    }

    #[test]
    fn steering_into_the_reverse_is_ignored() {
        let mut snake = Snake::new((3, 3), Down);

        snake.steer(Up);
        assert_eq!(snake.heading(), Down);

        snake.steer(Left);
        assert_eq!(snake.heading(), Left);

        snake.steer(Right);
        assert_eq!(snake.heading(), Left);
    }

    #[test]
    fn advance_without_growth_keeps_length() {
        let mut snake = Snake::from_segments(vec![(2, 4), (2, 3), (2, 2)], Right);

        let freed = snake.advance((2, 5), false);
        assert_eq!(freed, Some((2, 2)));
        assert_eq!(snake.head(), (2, 5));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn advance_with_growth_keeps_the_tail() {
        let mut snake = Snake::from_segments(vec![(2, 4), (2, 3)], Right);

        let freed = snake.advance((2, 5), true);
        assert_eq!(freed, None);
        assert_eq!(snake.len(), 3);
        assert!(snake.occupies((2, 3)));
    }

    #[test]
    fn occupies_includes_head_and_tail() {
        let snake = Snake::from_segments(vec![(1, 1), (1, 2), (1, 3)], Left);

        assert!(snake.occupies((1, 1)));
        assert!(snake.occupies((1, 3)));
        assert!(!snake.occupies((2, 2)));
    }
}
