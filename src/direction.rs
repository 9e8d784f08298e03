use crate::command::Command;
use ratatui::layout::{Position, Size};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Return the position one cell away from `pos` in this direction, or
    /// `None` if that would be outside a board of size `bounds`.
    pub(crate) fn advance(self, pos: Position, bounds: Size) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::North => y = y.checked_sub(1)?,
            Direction::East => x = x.checked_add(1).filter(|&x2| x2 < bounds.width)?,
            Direction::South => y = y.checked_add(1).filter(|&y2| y2 < bounds.height)?,
            Direction::West => x = x.checked_sub(1)?,
        }
        Some(Position { x, y })
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Map a movement command to a direction
    pub(crate) fn from_command(cmd: Command) -> Option<Direction> {
        match cmd {
            Command::Up => Some(Direction::North),
            Command::Right => Some(Direction::East),
            Command::Down => Some(Direction::South),
            Command::Left => Some(Direction::West),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Direction::North, Position::new(2, 7), Some(Position::new(2, 6)))]
    #[case(Direction::South, Position::new(2, 7), Some(Position::new(2, 8)))]
    #[case(Direction::East, Position::new(2, 7), Some(Position::new(3, 7)))]
    #[case(Direction::West, Position::new(2, 7), Some(Position::new(1, 7)))]
    #[case(Direction::North, Position::new(2, 0), None)]
    #[case(Direction::South, Position::new(2, 14), None)]
    #[case(Direction::East, Position::new(9, 7), None)]
    #[case(Direction::West, Position::new(0, 7), None)]
    #[case(Direction::South, Position::new(2, 13), Some(Position::new(2, 14)))]
    #[case(Direction::East, Position::new(8, 7), Some(Position::new(9, 7)))]
    fn test_direction_advance(
        #[case] d: Direction,
        #[case] pos: Position,
        #[case] r: Option<Position>,
    ) {
        assert_eq!(d.advance(pos, Size::new(10, 15)), r);
    }

    #[rstest]
    #[case(Direction::North)]
    #[case(Direction::East)]
    #[case(Direction::South)]
    #[case(Direction::West)]
    fn reverse_is_involution(#[case] d: Direction) {
        assert_ne!(d.reverse(), d);
        assert_eq!(d.reverse().reverse(), d);
    }
}
