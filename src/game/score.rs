use crate::consts;
use std::fmt;
use std::time::Duration;

/// Points & eating statistics for a game, and the difficulty derived from them
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Score {
    points: u32,
    food_eaten: u32,
    bonus_eaten: u32,
}

impl Score {
    pub(crate) fn points(&self) -> u32 {
        self.points
    }

    pub(crate) fn food_eaten(&self) -> u32 {
        self.food_eaten
    }

    pub(crate) fn bonus_eaten(&self) -> u32 {
        self.bonus_eaten
    }

    /// Record the eating of a regular food.  Returns `true` if a bonus food
    /// should now be spawned.
    pub(crate) fn eat_food(&mut self) -> bool {
        self.points = self.points.saturating_add(consts::SCORE_PER_FOOD);
        self.food_eaten = self.food_eaten.saturating_add(1);
        self.food_eaten % consts::BONUS_FOOD_INTERVAL == 0
    }

    pub(crate) fn eat_bonus(&mut self) {
        self.points = self.points.saturating_add(consts::BONUS_SCORE);
        self.bonus_eaten = self.bonus_eaten.saturating_add(1);
    }

    pub(crate) fn difficulty(&self) -> u32 {
        self.points / consts::DIFFICULTY_MILESTONE
    }

    /// The snake's speed relative to its starting speed, in tenths
    fn speed_tenths(&self) -> u32 {
        (self.points / consts::SPEED_MILESTONE).saturating_add(10)
    }

    /// Return the speed multiplier formatted for display, e.g. "1.2x"
    pub(crate) fn speed_display(&self) -> String {
        let tenths = self.speed_tenths();
        format!("{}.{}x", tenths / 10, tenths % 10)
    }

    /// Time between snake movements at the current speed, truncated to whole
    /// milliseconds
    pub(crate) fn move_delay(&self) -> Duration {
        let delay = consts::BASE_MOVE_DELAY * 10 / self.speed_tenths();
        let delay = Duration::from_secs(delay.as_secs())
            + Duration::from_millis(u64::from(delay.subsec_millis()));
        delay.max(consts::MIN_MOVE_DELAY)
    }

    /// Number of obstacles that should be on the board
    pub(crate) fn obstacle_target(&self) -> usize {
        match self.points.checked_sub(consts::OBSTACLE_START_SCORE) {
            None => 0,
            Some(over) => {
                let steps = usize::try_from(over / consts::DIFFICULTY_MILESTONE)
                    .unwrap_or(usize::MAX);
                steps.saturating_add(1).min(consts::MAX_OBSTACLES)
            }
        }
    }

    pub(crate) fn rank(&self) -> Rank {
        Rank::for_score(self.points)
    }
}

/// Title awarded at the end of a game based on the final score
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub(crate) enum Rank {
    Rookie,
    Hunter,
    Warrior,
    Expert,
    Master,
}

impl Rank {
    pub(crate) fn for_score(score: u32) -> Rank {
        match score {
            1000.. => Rank::Master,
            500.. => Rank::Expert,
            250.. => Rank::Warrior,
            100.. => Rank::Hunter,
            _ => Rank::Rookie,
        }
    }

    pub(crate) fn title(self) -> &'static str {
        match self {
            Rank::Rookie => "Snake Rookie",
            Rank::Hunter => "Snake Hunter",
            Rank::Warrior => "Snake Warrior",
            Rank::Expert => "Snake Expert",
            Rank::Master => "Snake Master",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.title())
    }
}
