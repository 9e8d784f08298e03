use crate::consts;
use crate::direction::Direction;
use ratatui::layout::{Position, Size};
use std::collections::VecDeque;

/// The player's snake
///
/// All positions are relative to the top-left corner of the board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The position of the snake's head
    pub(super) head: Position,

    /// The positions of all of the cells in the snake's body behind the head,
    /// with the most recent at the end.
    pub(super) body: VecDeque<Position>,

    /// The direction in which the snake will next move
    pub(super) direction: Direction,

    /// Whether the next move should leave the tail in place
    pub(super) grow_pending: bool,
}

impl Snake {
    /// Create a new one-cell snake at `head` facing east
    pub(super) fn new(head: Position) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
            direction: Direction::East,
            grow_pending: false,
        }
    }

    /// Create a new snake in the center of a board of the given size
    pub(super) fn centered(bounds: Size) -> Snake {
        Snake::new(Position::new(bounds.width / 2, bounds.height / 2))
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Position {
        self.head
    }

    /// Return the glyph to use for drawing the snake's head
    pub(super) fn head_symbol(&self) -> char {
        match self.direction {
            Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
            Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
            Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
            Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
        }
    }

    /// Return the positions of the cells in the snake's body
    pub(super) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// Total number of cells occupied by the snake
    #[cfg(test)]
    pub(super) fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Does any part of the snake occupy `pos`?
    pub(super) fn contains(&self, pos: Position) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    /// Change the snake's direction to `direction`, unless that is the
    /// exact reverse of its current direction
    pub(super) fn turn(&mut self, direction: Direction) {
        if direction != self.direction.reverse() {
            self.direction = direction;
        }
    }

    /// Make the snake one cell longer on its next move
    pub(super) fn grow(&mut self) {
        self.grow_pending = true;
    }

    /// Move the snake forwards one cell in the current direction within
    /// `bounds`.  Returns `false` if the snake was unable to advance due to
    /// hitting the edge of the board.
    pub(super) fn advance(&mut self, bounds: Size) -> bool {
        let Some(pos) = self.direction.advance(self.head, bounds) else {
            return false;
        };
        self.body.push_back(self.head);
        self.head = pos;
        if self.grow_pending {
            self.grow_pending = false;
        } else {
            let _ = self.body.pop_front();
        }
        true
    }

    /// Has the snake's head run into its body?
    pub(super) fn bit_self(&self) -> bool {
        self.body.contains(&self.head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Size = Size {
        width: 10,
        height: 8,
    };

    #[test]
    fn new_snake() {
        let snake = Snake::centered(BOUNDS);
        assert_eq!(snake.head(), Position::new(5, 4));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.direction, Direction::East);
        assert_eq!(snake.head_symbol(), '<');
    }

    #[test]
    fn advance_and_grow() {
        let mut snake = Snake::new(Position::new(2, 2));
        assert!(snake.advance(BOUNDS));
        assert_eq!(snake.head(), Position::new(3, 2));
        assert_eq!(snake.len(), 1);
        snake.grow();
        assert!(snake.advance(BOUNDS));
        assert_eq!(snake.len(), 2);
        assert!(!snake.grow_pending);
        assert!(snake.advance(BOUNDS));
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.body(), &VecDeque::from([Position::new(4, 2)]));
    }

    #[test]
    fn wall() {
        let mut snake = Snake::new(Position::new(9, 0));
        assert!(!snake.advance(BOUNDS));
        assert_eq!(snake.head(), Position::new(9, 0));
        snake.turn(Direction::North);
        assert!(!snake.advance(BOUNDS));
    }

    #[test]
    fn reversal_ignored() {
        let mut snake = Snake::new(Position::new(4, 4));
        snake.turn(Direction::West);
        assert_eq!(snake.direction, Direction::East);
        snake.turn(Direction::North);
        assert_eq!(snake.direction, Direction::North);
        snake.turn(Direction::South);
        assert_eq!(snake.direction, Direction::North);
        // Turns are judged against the pending direction, not the last move
        snake.turn(Direction::West);
        assert_eq!(snake.direction, Direction::West);
        assert!(snake.advance(BOUNDS));
        assert_eq!(snake.head(), Position::new(3, 4));
    }

    #[test]
    fn self_bite() {
        // A snake of length 5 curled so that turning south bites its body
        let mut snake = Snake::new(Position::new(3, 3));
        snake.body = VecDeque::from([
            Position::new(2, 4),
            Position::new(3, 4),
            Position::new(4, 4),
            Position::new(4, 3),
        ]);
        snake.direction = Direction::West;
        snake.turn(Direction::South);
        assert!(snake.advance(BOUNDS));
        assert!(snake.bit_self());
    }

    #[test]
    fn chasing_tail_is_legal() {
        // A 2x2 loop: the head moves into the cell the tail just left
        let mut snake = Snake::new(Position::new(3, 3));
        snake.body = VecDeque::from([
            Position::new(3, 4),
            Position::new(4, 4),
            Position::new(4, 3),
        ]);
        snake.direction = Direction::West;
        snake.turn(Direction::South);
        assert!(snake.advance(BOUNDS));
        assert_eq!(snake.head(), Position::new(3, 4));
        assert!(!snake.bit_self());
        assert!(snake.contains(Position::new(4, 3)));
        assert!(snake.contains(Position::new(3, 3)));
        assert_eq!(snake.len(), 4);
    }
}
