use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::{Position, Rect, Size};
use std::time::{Duration, Instant};

/// The regular food and the time-limited bonus food on the board
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) struct Food {
    pub(super) regular: Option<Position>,
    pub(super) bonus: Option<Bonus>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Bonus {
    pub(super) pos: Position,
    pub(super) spawned: Instant,
}

impl Bonus {
    fn expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.spawned) > consts::BONUS_DURATION
    }
}

impl Food {
    /// Place the regular food on a random cell for which `occupied` returns
    /// false.  Returns `false` if every cell is occupied.
    pub(super) fn spawn_regular<R, F>(&mut self, rng: &mut R, bounds: Size, occupied: F) -> bool
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        let bonus = self.bonus.map(|b| b.pos);
        self.regular = free_cell(rng, bounds, |p| occupied(p) || Some(p) == bonus);
        self.regular.is_some()
    }

    /// Place a bonus food on a random free cell other than the regular food,
    /// replacing any bonus already on the board.  Returns the new bonus's
    /// position, or `None` if there was no room.
    pub(super) fn spawn_bonus<R, F>(
        &mut self,
        rng: &mut R,
        bounds: Size,
        occupied: F,
        now: Instant,
    ) -> Option<Position>
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        let regular = self.regular;
        self.bonus = free_cell(rng, bounds, |p| occupied(p) || Some(p) == regular)
            .map(|pos| Bonus { pos, spawned: now });
        self.bonus.map(|b| b.pos)
    }

    /// If the regular food is at `pos`, remove it and return `true`
    pub(super) fn eat_regular(&mut self, pos: Position) -> bool {
        if self.regular == Some(pos) {
            self.regular = None;
            true
        } else {
            false
        }
    }

    /// If the bonus food is at `pos`, remove it and return `true`
    pub(super) fn eat_bonus(&mut self, pos: Position) -> bool {
        if self.bonus.is_some_and(|b| b.pos == pos) {
            self.bonus = None;
            true
        } else {
            false
        }
    }

    /// Remove the bonus food if it has outlived its duration.  Returns `true`
    /// if a bonus was removed.
    pub(super) fn expire_bonus(&mut self, now: Instant) -> bool {
        if self.bonus.is_some_and(|b| b.expired(now)) {
            self.bonus = None;
            true
        } else {
            false
        }
    }

    /// Time left before the bonus food expires
    pub(super) fn bonus_remaining(&self, now: Instant) -> Option<Duration> {
        self.bonus.map(|b| {
            consts::BONUS_DURATION.saturating_sub(now.saturating_duration_since(b.spawned))
        })
    }

    /// Is either food at `pos`?
    pub(super) fn occupies(&self, pos: Position) -> bool {
        self.regular == Some(pos) || self.bonus.is_some_and(|b| b.pos == pos)
    }
}

/// Choose a cell uniformly at random from those within `bounds` for which
/// `occupied` returns false
fn free_cell<R, F>(rng: &mut R, bounds: Size, occupied: F) -> Option<Position>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    Rect::from((Position::ORIGIN, bounds))
        .positions()
        .filter(|&p| !occupied(p))
        .choose(rng)
}
