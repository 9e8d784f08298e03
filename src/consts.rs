//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Time between animation frames of the themed game (60 FPS)
pub(crate) const FRAME_PERIOD: Duration = Duration::from_micros(16_667);

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Default size of the playing field, in cells
pub(crate) const DEFAULT_BOARD_SIZE: Size = Size {
    width: 76,
    height: 19,
};

/// Smallest playing field that can be configured
pub(crate) const MIN_BOARD_SIZE: Size = Size {
    width: 10,
    height: 5,
};

/// Largest playing field that fits in [`DISPLAY_SIZE`] along with the score
/// bar and message lines
pub(crate) const MAX_BOARD_SIZE: Size = DEFAULT_BOARD_SIZE;

/// Points awarded for eating a regular food
pub(crate) const SCORE_PER_FOOD: u32 = 10;

/// Points awarded for eating a bonus food
pub(crate) const BONUS_SCORE: u32 = 20;

/// How long a bonus food stays on the board after spawning
pub(crate) const BONUS_DURATION: Duration = Duration::from_secs(9);

/// A bonus food spawns each time the number of regular foods eaten reaches a
/// multiple of this
pub(crate) const BONUS_FOOD_INTERVAL: u32 = 10;

/// Points per difficulty level (and per theme in mix mode)
pub(crate) const DIFFICULTY_MILESTONE: u32 = 100;

/// Points per 10% increase in snake speed
pub(crate) const SPEED_MILESTONE: u32 = 50;

/// Score at which obstacles start appearing
pub(crate) const OBSTACLE_START_SCORE: u32 = 200;

/// The maximum number of obstacles on the board
pub(crate) const MAX_OBSTACLES: usize = 10;

/// Number of random cells tried per frame when placing an obstacle
pub(crate) const OBSTACLE_ATTEMPTS: usize = 50;

/// Obstacles are only placed at a Manhattan distance greater than this from
/// the snake's head
pub(crate) const OBSTACLE_CLEARANCE: u32 = 3;

/// Time between snake movements at a speed multiplier of 1
pub(crate) const BASE_MOVE_DELAY: Duration = Duration::from_millis(150);

/// Lower limit on the time between snake movements
pub(crate) const MIN_MOVE_DELAY: Duration = Duration::from_millis(80);

/// Number of entries kept in each theme's high score table
pub(crate) const MAX_HIGH_SCORES: usize = 10;

/// Opacity of the fade-in overlay at the start of a theme transition
pub(crate) const TRANSITION_START: u8 = 255;

/// Amount by which the transition overlay fades each frame
pub(crate) const TRANSITION_STEP: u8 = 8;

/// Size of a board cell in particle-velocity units
pub(crate) const CELL_PIXELS: f32 = 20.0;

/// Fraction of a particle's velocity retained after each frame
pub(crate) const PARTICLE_DRAG: f32 = 0.95;

/// Name recorded in the high score table when none is configured
pub(crate) const DEFAULT_PLAYER: &str = "Player";

/// Maximum display width of a player name
pub(crate) const MAX_PLAYER_WIDTH: usize = 16;

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the bonus food
pub(crate) const BONUS_SYMBOL: char = '★';

/// Glyph for obstacles
pub(crate) const OBSTACLE_SYMBOL: char = '█';

/// Glyph for the snake's head when it's collided with something
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Glyphs for particles, from freshest to most faded
pub(crate) const PARTICLE_SYMBOLS: [char; 3] = ['*', '+', '·'];

/// Colour of bonus food, its particles, and its timer
pub(crate) const GOLD: Color = Color::Rgb(255, 215, 0);

/// Style for the bonus food
pub(crate) const BONUS_STYLE: Style = Style::new().fg(GOLD).add_modifier(Modifier::BOLD);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the "New High Score!" notice
pub(crate) const HIGH_SCORE_STYLE: Style = Style::new().fg(GOLD).add_modifier(Modifier::BOLD);

/// Style for the snake & title in the classic game and the logo
pub(crate) const CLASSIC_SNAKE_STYLE: Style =
    Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food in the classic game and the logo
pub(crate) const CLASSIC_FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Glyph for the food in the classic game and the logo
pub(crate) const CLASSIC_FOOD_SYMBOL: char = '●';
