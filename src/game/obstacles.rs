use crate::consts;
use rand::Rng;
use ratatui::layout::{Position, Size};

/// Impassable cells that accumulate on the board as the score rises
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(super) struct Obstacles(Vec<Position>);

impl Obstacles {
    pub(super) fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }

    pub(super) fn len(&self) -> usize {
        self.0.len()
    }

    pub(super) fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.0.iter()
    }

    /// If there are fewer than `target` obstacles, try to add one at a random
    /// cell that is not already an obstacle, is not `occupied`, and is more
    /// than [`consts::OBSTACLE_CLEARANCE`] steps away from `head`.  Gives up
    /// after [`consts::OBSTACLE_ATTEMPTS`] tries.  Returns the position of the
    /// new obstacle, if any.
    pub(super) fn top_up<R, F>(
        &mut self,
        rng: &mut R,
        bounds: Size,
        target: usize,
        head: Position,
        occupied: F,
    ) -> Option<Position>
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        if self.0.len() >= target || bounds.width == 0 || bounds.height == 0 {
            return None;
        }
        for _ in 0..consts::OBSTACLE_ATTEMPTS {
            let pos = Position::new(
                rng.random_range(0..bounds.width),
                rng.random_range(0..bounds.height),
            );
            if manhattan(pos, head) > consts::OBSTACLE_CLEARANCE
                && !occupied(pos)
                && !self.contains(pos)
            {
                self.0.push(pos);
                return Some(pos);
            }
        }
        None
    }
}

impl<'a> IntoIterator for &'a Obstacles {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn manhattan(p: Position, q: Position) -> u32 {
    u32::from(p.x.abs_diff(q.x)) + u32::from(p.y.abs_diff(q.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    #[rstest]
    #[case(Position::new(0, 0), Position::new(0, 0), 0)]
    #[case(Position::new(1, 5), Position::new(4, 3), 5)]
    #[case(Position::new(9, 0), Position::new(0, 9), 18)]
    fn test_manhattan(#[case] p: Position, #[case] q: Position, #[case] dist: u32) {
        assert_eq!(manhattan(p, q), dist);
        assert_eq!(manhattan(q, p), dist);
    }

    #[test]
    fn respects_target() {
        let mut rng = ChaCha12Rng::seed_from_u64(0x0123_4567_89AB_CDEF);
        let mut obstacles = Obstacles::default();
        let bounds = Size::new(30, 15);
        let head = Position::new(15, 7);
        assert_eq!(obstacles.top_up(&mut rng, bounds, 0, head, |_| false), None);
        for i in 1..=3 {
            assert!(obstacles.top_up(&mut rng, bounds, 3, head, |_| false).is_some());
            assert_eq!(obstacles.len(), i);
        }
        assert_eq!(obstacles.top_up(&mut rng, bounds, 3, head, |_| false), None);
        assert_eq!(obstacles.len(), 3);
    }

    #[test]
    fn placement_rules() {
        let mut rng = ChaCha12Rng::seed_from_u64(99);
        let mut obstacles = Obstacles::default();
        let bounds = Size::new(12, 8);
        let head = Position::new(6, 4);
        for _ in 0..200 {
            let _ = obstacles.top_up(&mut rng, bounds, 20, head, |p| p.y == 0);
        }
        assert!(obstacles.len() <= 20);
        let mut seen = Vec::new();
        for &pos in &obstacles {
            assert!(manhattan(pos, head) > 3, "{pos:?} too close to head");
            assert_ne!(pos.y, 0, "{pos:?} on occupied cell");
            assert!(pos.x < bounds.width && pos.y < bounds.height);
            assert!(!seen.contains(&pos), "{pos:?} placed twice");
            seen.push(pos);
        }
    }

    #[test]
    fn gives_up_when_no_room() {
        let mut rng = ChaCha12Rng::seed_from_u64(5);
        let mut obstacles = Obstacles::default();
        let bounds = Size::new(5, 5);
        let head = Position::new(2, 2);
        assert_eq!(obstacles.top_up(&mut rng, bounds, 10, head, |_| true), None);
        assert_eq!(obstacles.len(), 0);
    }
}
