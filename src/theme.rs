//! Visual themes and the theme manager that switches between them
use crate::config::ThemeStyles;
use crate::consts;
use crate::util::EnumExt;
use enum_map::Enum;
use ratatui::{
    layout::{Position, Size},
    style::{Color, Modifier, Style},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Enum, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ThemeId {
    #[default]
    Forest,
    Sea,
    Snow,
    Desert,
    Hill,
}

impl ThemeId {
    /// Width of the longest theme name
    pub(crate) const DISPLAY_WIDTH: u16 = 6;

    /// The theme used in mix mode at the given score
    pub(crate) fn for_score(score: u32) -> ThemeId {
        let milestones = usize::try_from(score / consts::DIFFICULTY_MILESTONE).unwrap_or(0);
        ThemeId::from_usize(milestones % ThemeId::LENGTH)
    }

    /// The name used for this theme in data files
    pub(crate) fn key(self) -> &'static str {
        match self {
            ThemeId::Forest => "forest",
            ThemeId::Sea => "sea",
            ThemeId::Snow => "snow",
            ThemeId::Desert => "desert",
            ThemeId::Hill => "hill",
        }
    }

    pub(crate) fn from_key(key: &str) -> Option<ThemeId> {
        ThemeId::iter().find(|t| t.key() == key)
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            ThemeId::Forest => "Forest",
            ThemeId::Sea => "Sea",
            ThemeId::Snow => "Snow",
            ThemeId::Desert => "Desert",
            ThemeId::Hill => "Hill",
        }
    }

    /// Return the built-in palette for this theme
    pub(crate) fn palette(self) -> Palette {
        match self {
            ThemeId::Forest => Palette {
                board: Style::new().bg(Color::Rgb(46, 125, 50)),
                snake: Style::new().fg(Color::Rgb(34, 139, 34)),
                food: Style::new().fg(Color::Rgb(0, 255, 0)),
                food_symbol: '♣',
                accent: Style::new().fg(Color::Rgb(27, 94, 32)),
                obstacle: Style::new().fg(Color::Rgb(101, 67, 33)),
                pattern: Pattern::Grass,
            },
            ThemeId::Sea => Palette {
                board: Style::new().bg(Color::Rgb(25, 118, 210)),
                snake: Style::new().fg(Color::Rgb(30, 144, 255)),
                food: Style::new().fg(Color::Rgb(255, 192, 203)),
                food_symbol: '@',
                accent: Style::new().fg(Color::Rgb(13, 71, 161)),
                obstacle: Style::new().fg(Color::Rgb(62, 39, 35)),
                pattern: Pattern::Waves,
            },
            ThemeId::Snow => Palette {
                board: Style::new().bg(Color::Rgb(176, 196, 222)),
                snake: Style::new().fg(Color::Rgb(173, 216, 230)),
                food: Style::new().fg(Color::Rgb(255, 255, 255)),
                food_symbol: '*',
                accent: Style::new().fg(Color::Rgb(100, 149, 237)),
                obstacle: Style::new().fg(Color::Rgb(105, 105, 105)),
                pattern: Pattern::Snowfall,
            },
            ThemeId::Desert => Palette {
                board: Style::new().bg(Color::Rgb(238, 203, 173)),
                snake: Style::new().fg(Color::Rgb(160, 82, 45)),
                food: Style::new().fg(Color::Rgb(34, 139, 34)),
                food_symbol: '¥',
                accent: Style::new().fg(Color::Rgb(205, 133, 63)),
                obstacle: Style::new().fg(Color::Rgb(139, 69, 19)),
                pattern: Pattern::Dunes,
            },
            ThemeId::Hill => Palette {
                board: Style::new().bg(Color::Rgb(156, 39, 176)),
                snake: Style::new().fg(Color::Rgb(148, 0, 211)),
                food: Style::new().fg(Color::Rgb(184, 134, 11)),
                food_symbol: '▲',
                accent: Style::new().fg(Color::Rgb(74, 20, 140)),
                obstacle: Style::new().fg(Color::Rgb(66, 66, 66)),
                pattern: Pattern::Hills,
            },
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// The colours & glyphs used to draw a game in a given theme
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Palette {
    /// Base style of every cell on the board (normally just a background)
    pub(crate) board: Style,
    pub(crate) snake: Style,
    pub(crate) food: Style,
    pub(crate) food_symbol: char,
    /// Style for the background pattern
    pub(crate) accent: Style,
    pub(crate) obstacle: Style,
    pub(crate) pattern: Pattern,
}

impl Palette {
    /// Replace any styles set in `styles`
    pub(crate) fn with_overrides(mut self, styles: &ThemeStyles) -> Palette {
        if let Some(board) = styles.board {
            self.board = board;
        }
        if let Some(snake) = styles.snake {
            self.snake = snake;
        }
        if let Some(food) = styles.food {
            self.food = food;
        }
        if let Some(accent) = styles.accent {
            self.accent = accent;
        }
        if let Some(obstacle) = styles.obstacle {
            self.obstacle = obstacle;
        }
        self
    }

    /// Colour for the particles emitted when regular food is eaten
    pub(crate) fn food_color(&self) -> Color {
        self.food.fg.unwrap_or(Color::White)
    }
}

/// Decorative background drawn beneath everything on the board
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Pattern {
    Grass,
    Waves,
    Snowfall,
    Dunes,
    Hills,
}

impl Pattern {
    const SNOWFLAKES: u16 = 20;

    /// Return the glyph (if any) to draw at `pos` on a board of size `size`
    /// during animation frame `frame`
    pub(crate) fn glyph_at(self, pos: Position, size: Size, frame: u64) -> Option<char> {
        match self {
            Pattern::Grass => (speckle(pos) % 11 == 0).then_some(','),
            Pattern::Waves => {
                let shift = frame / 10;
                (pos.y % 4 == 1 && (u64::from(pos.x) + shift) % 6 < 3).then_some('~')
            }
            Pattern::Snowfall => (0..Self::SNOWFLAKES)
                .any(|i| snowflake(i, size, frame) == pos)
                .then_some('.'),
            Pattern::Dunes => (speckle(pos) % 17 == 0).then_some('-'),
            Pattern::Hills => {
                // Crests every 16 columns, one row of hill even in the valleys
                let height = 1 + (pos.x % 16).abs_diff(8) / 2;
                (pos.y.saturating_add(height) >= size.height).then_some('^')
            }
        }
    }
}

/// A cheap, stable per-cell pseudo-random number
fn speckle(pos: Position) -> u32 {
    (u32::from(pos.x).wrapping_mul(73_856_093) ^ u32::from(pos.y).wrapping_mul(19_349_663))
        % 1009
}

fn snowflake(i: u16, size: Size, frame: u64) -> Position {
    let width = u64::from(size.width.max(1));
    let height = u64::from(size.height.max(1));
    let i = u64::from(i);
    let x = (i * 7 + frame / 6) % width;
    let y = (i * 5 + frame / 12) % height;
    // Both values are less than a u16 dimension, so the conversions succeed.
    Position::new(
        u16::try_from(x).unwrap_or_default(),
        u16::try_from(y).unwrap_or_default(),
    )
}

/// Tracks the current theme, mix mode, and the fade between themes
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ThemeManager {
    current: ThemeId,
    mix_mode: bool,
    /// Opacity of the overlay drawn while fading into a new theme; zero when
    /// no transition is in progress
    transition_alpha: u8,
}

impl ThemeManager {
    pub(crate) fn new(theme: ThemeId, mix_mode: bool) -> ThemeManager {
        ThemeManager {
            current: theme,
            mix_mode,
            transition_alpha: 0,
        }
    }

    pub(crate) fn current(&self) -> ThemeId {
        self.current
    }

    pub(crate) fn mix_mode(&self) -> bool {
        self.mix_mode
    }

    pub(crate) fn transitioning(&self) -> bool {
        self.transition_alpha > 0
    }

    #[cfg(test)]
    pub(crate) fn transition_alpha(&self) -> u8 {
        self.transition_alpha
    }

    /// Switch to `theme`, starting a transition if it differs from the current
    /// theme.  Returns `true` if the theme changed.
    pub(crate) fn set_theme(&mut self, theme: ThemeId) -> bool {
        if theme == self.current {
            return false;
        }
        debug!(from = %self.current, to = %theme, "Changing theme");
        self.current = theme;
        self.transition_alpha = consts::TRANSITION_START;
        true
    }

    /// In mix mode, switch to the theme for the given score.  Returns `true`
    /// if the theme changed.
    pub(crate) fn follow_score(&mut self, score: u32) -> bool {
        self.mix_mode && self.set_theme(ThemeId::for_score(score))
    }

    /// Advance the transition animation by one frame
    pub(crate) fn update_transition(&mut self) {
        self.transition_alpha = self.transition_alpha.saturating_sub(consts::TRANSITION_STEP);
    }

    /// Return the palette for the current theme, with any configured
    /// overrides applied and dimmed while a transition is in progress
    pub(crate) fn palette(&self, styles: Option<&ThemeStyles>) -> Palette {
        let mut palette = self.current.palette();
        if let Some(styles) = styles {
            palette = palette.with_overrides(styles);
        }
        if self.transitioning() {
            palette.board = palette.board.add_modifier(Modifier::DIM);
        }
        palette
    }
}
