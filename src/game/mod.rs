mod food;
mod obstacles;
mod particles;
mod paused;
mod score;
mod snake;
use self::food::Food;
use self::obstacles::Obstacles;
use self::particles::{Burst, Particles};
use self::paused::{PauseOpt, Paused};
use self::score::Score;
use self::snake::Snake;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::direction::Direction;
use crate::highscores::ScoreEntry;
use crate::menu::MainMenu;
use crate::theme::{Palette, ThemeId, ThemeManager};
use crate::util::{center_rect, error_chain, format_thousands, get_display_area, Canvas, Globals};
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
    Frame,
};
use std::time::Instant;
use tracing::{debug, info, warn};

/// The themed snake game
#[derive(Clone, Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    globals: Globals,
    bounds: Size,
    snake: Snake,
    food: Food,
    obstacles: Obstacles,
    score: Score,
    particles: Particles,
    themes: ThemeManager,
    state: GameState,

    /// The time of the most recent frame
    clock: Instant,

    /// The time at which the snake last moved (or the game was started or
    /// resumed)
    last_move: Instant,

    /// Number of frames since the game started, used for animating the
    /// background
    frame: u64,

    next_frame: Option<Instant>,
    warning: Option<Warning>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(globals: Globals) -> Self {
        Game::new_with_rng(globals, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(globals: Globals, rng: R) -> Game<R> {
        let bounds = globals.config.board.size();
        let options = globals.options;
        let theme = if options.mix_mode {
            ThemeId::for_score(0)
        } else {
            options.theme
        };
        info!(%theme, mix_mode = options.mix_mode, "Starting new game");
        let now = Instant::now();
        let mut game = Game {
            rng,
            globals,
            bounds,
            snake: Snake::centered(bounds),
            food: Food::default(),
            obstacles: Obstacles::default(),
            score: Score::default(),
            particles: Particles::default(),
            themes: ThemeManager::new(theme, options.mix_mode),
            state: GameState::Running,
            clock: now,
            last_move: now,
            frame: 0,
            next_frame: None,
            warning: None,
        };
        let _ = game.spawn_food();
        game
    }

    /// Show `warning` (if any) over the game until it is dismissed
    pub(crate) fn with_warning(mut self, warning: Option<Warning>) -> Self {
        self.warning = warning;
        self
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.warning.is_some() {
            return Ok(self.handle_event(read()?));
        }
        let when = *self
            .next_frame
            .get_or_insert_with(|| Instant::now() + consts::FRAME_PERIOD);
        let wait = when.saturating_duration_since(Instant::now());
        if wait.is_zero() || !poll(wait)? {
            self.next_frame = None;
            self.update(Instant::now());
            Ok(None)
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    /// Advance the game by one frame occurring at time `now`
    fn update(&mut self, now: Instant) {
        self.clock = now;
        self.frame += 1;
        self.themes.update_transition();
        self.particles.update();
        if !self.running() {
            return;
        }
        if self.themes.follow_score(self.score.points()) {
            info!(theme = %self.themes.current(), "Mix mode changed theme");
        }
        if now.saturating_duration_since(self.last_move) > self.score.move_delay() {
            self.last_move = now;
            self.step();
            if !self.running() {
                return;
            }
        }
        if self.food.expire_bonus(now) {
            debug!("Bonus food expired");
        }
        let target = self.score.obstacle_target();
        let head = self.snake.head();
        let (snake, food) = (&self.snake, &self.food);
        if let Some(pos) = self.obstacles.top_up(&mut self.rng, self.bounds, target, head, |p| {
            snake.contains(p) || food.occupies(p)
        }) {
            debug!(x = pos.x, y = pos.y, count = self.obstacles.len(), "Placed obstacle");
        }
    }

    /// Move the snake one cell and resolve the consequences
    fn step(&mut self) {
        if !self.snake.advance(self.bounds) {
            self.game_over(Cause::Wall);
            return;
        }
        if self.snake.bit_self() {
            self.game_over(Cause::SelfBite);
            return;
        }
        let head = self.snake.head();
        if self.obstacles.contains(head) {
            self.game_over(Cause::Obstacle);
            return;
        }
        if self.food.eat_regular(head) {
            self.snake.grow();
            let bonus_due = self.score.eat_food();
            let color = self.palette().food_color();
            self.particles
                .burst(&mut self.rng, head, Burst::Food, color);
            if !self.spawn_food() {
                self.game_over(Cause::BoardFull);
                return;
            }
            if bonus_due {
                let (snake, obstacles) = (&self.snake, &self.obstacles);
                if let Some(pos) = self.food.spawn_bonus(
                    &mut self.rng,
                    self.bounds,
                    |p| snake.contains(p) || obstacles.contains(p),
                    self.clock,
                ) {
                    info!(x = pos.x, y = pos.y, "Bonus food spawned");
                }
            }
        } else if self.food.eat_bonus(head) {
            self.snake.grow();
            self.score.eat_bonus();
            self.particles
                .burst(&mut self.rng, head, Burst::Bonus, consts::GOLD);
        }
    }

    /// Place a new regular food.  Returns `false` if the board is full.
    fn spawn_food(&mut self) -> bool {
        let (snake, obstacles) = (&self.snake, &self.obstacles);
        self.food.spawn_regular(&mut self.rng, self.bounds, |p| {
            snake.contains(p) || obstacles.contains(p)
        })
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        if let Some(ref mut warning) = self.warning {
            match warning.handle_command(Command::from_key_event(event.as_key_press_event()?)?)? {
                WarningOutcome::Dismissed => self.warning = None,
                WarningOutcome::Quit => return Some(Screen::Quit),
            }
            return None;
        }
        match self.state {
            GameState::Running => {
                if event == Event::FocusLost {
                    self.pause();
                } else {
                    match Command::from_key_event(event.as_key_press_event()?)? {
                        Command::Quit => return Some(Screen::Quit),
                        Command::Esc | Command::P => self.pause(),
                        cmd => {
                            if let Some(d) = Direction::from_command(cmd) {
                                self.snake.turn(d);
                            }
                        }
                    }
                }
            }
            GameState::Paused(ref mut paused) => match paused.handle_event(event)? {
                PauseOpt::Resume => {
                    self.state = GameState::Running;
                    self.last_move = self.clock;
                }
                PauseOpt::Restart => return Some(Screen::Game(Game::new(self.globals.clone()))),
                PauseOpt::MainMenu => return Some(Screen::Main(MainMenu::new(self.globals.clone()))),
                PauseOpt::Quit => return Some(Screen::Quit),
            },
            GameState::Over(_) => match Command::from_key_event(event.as_key_press_event()?)? {
                Command::R => return Some(Screen::Game(Game::new(self.globals.clone()))),
                Command::M => return Some(Screen::Main(MainMenu::new(self.globals.clone()))),
                Command::Quit | Command::Q => return Some(Screen::Quit),
                _ => (),
            },
        }
        None
    }

    fn running(&self) -> bool {
        self.state == GameState::Running
    }

    fn pause(&mut self) {
        self.state = GameState::Paused(Paused::new());
    }

    /// End the game, recording the score in the high score table for the
    /// current theme and saving the table
    fn game_over(&mut self, cause: Cause) {
        let theme = self.themes.current();
        let points = self.score.points();
        let qualified = self.globals.high_scores.qualifies(theme, points);
        info!(?cause, score = points, %theme, qualified, "Game over");
        let entry = ScoreEntry::now(
            points,
            self.globals.config.player.as_str(),
            self.score.food_eaten(),
            self.score.bonus_eaten(),
        );
        self.globals.high_scores.record(theme, entry);
        match self.globals.save_high_scores() {
            Ok(()) => debug!("Saved high scores"),
            Err(e) => {
                warn!(error = %error_chain(&e), "Failed to save high scores");
                self.warning = Some(Warning::from(e));
            }
        }
        self.state = GameState::Over(GameOver { cause, qualified });
    }

    fn palette(&self) -> Palette {
        self.themes
            .palette(self.globals.config.theme_styles(self.themes.current()))
    }

    fn hud(&self) -> Line<'static> {
        let mut spans = vec![
            Span::raw(format!(
                " Score: {}",
                format_thousands(self.score.points())
            )),
            Span::raw(format!("  Food: {}", self.score.food_eaten())),
            Span::raw(format!("  Level: {}", self.score.difficulty())),
            Span::raw(format!("  Speed: {}", self.score.speed_display())),
            Span::raw(format!(
                "  Theme: {}{}",
                self.themes.current(),
                if self.themes.mix_mode() { " (mix)" } else { "" }
            )),
        ];
        if let Some(remaining) = self.food.bonus_remaining(self.clock) {
            let tenths = remaining.as_millis() / 100;
            spans.push(Span::styled(
                format!("  Bonus: {}.{}s", tenths / 10, tenths % 10),
                consts::BONUS_STYLE,
            ));
        }
        Line::from(spans).style(consts::SCORE_BAR_STYLE)
    }

    fn render_board(&self, area: Rect, buf: &mut Buffer) {
        let palette = self.palette();
        let mut canvas = Canvas {
            area,
            buf,
            base: palette.board,
        };
        for pos in Rect::from((Position::ORIGIN, self.bounds)).positions() {
            match palette.pattern.glyph_at(pos, self.bounds, self.frame) {
                Some(ch) => canvas.draw_cell(pos, ch, palette.accent),
                None => canvas.draw_cell(pos, ' ', Style::new()),
            }
        }
        for &pos in &self.obstacles {
            canvas.draw_cell(pos, consts::OBSTACLE_SYMBOL, palette.obstacle);
        }
        if let Some(pos) = self.food.regular {
            canvas.draw_cell(pos, palette.food_symbol, palette.food);
        }
        if let Some(bonus) = self.food.bonus {
            canvas.draw_cell(bonus.pos, consts::BONUS_SYMBOL, consts::BONUS_STYLE);
        }
        for &pos in self.snake.body() {
            canvas.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, palette.snake);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if let GameState::Over(GameOver { cause, .. }) = self.state {
            if cause != Cause::BoardFull {
                canvas.draw_cell(
                    self.snake.head(),
                    consts::COLLISION_SYMBOL,
                    consts::COLLISION_STYLE,
                );
            }
        } else {
            canvas.draw_cell(self.snake.head(), self.snake.head_symbol(), palette.snake);
        }
        self.particles.draw(&mut canvas);
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [hud_area, block_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        self.hud().render(hud_area, buf);

        let block_size = Size {
            width: self.bounds.width.saturating_add(2),
            height: self.bounds.height.saturating_add(2),
        };
        let block_area = center_rect(block_area, block_size);
        Block::bordered()
            .title(format!(" {} ", self.themes.current()))
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        self.render_board(block_area.inner(Margin::new(1, 1)), buf);

        match self.state {
            GameState::Running => {
                Line::from_iter([
                    Span::raw(" Move ("),
                    Span::styled("arrows", consts::KEY_STYLE),
                    Span::raw("/"),
                    Span::styled("wasd", consts::KEY_STYLE),
                    Span::raw(") — Pause ("),
                    Span::styled("p", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
            GameState::Paused(paused) => {
                let pause_area = center_rect(
                    display,
                    Size {
                        width: Paused::WIDTH,
                        height: Paused::HEIGHT,
                    },
                );
                paused.render(pause_area, buf);
            }
            GameState::Over(over) => {
                Span::from(" — GAME OVER —").render(msg1_area, buf);
                Line::from_iter([
                    Span::raw(" Choose One: Restart ("),
                    Span::styled("r", consts::KEY_STYLE),
                    Span::raw(") — Main Menu ("),
                    Span::styled("m", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
                Summary {
                    over,
                    score: self.score,
                }
                .render(display, buf);
            }
        }
        if let Some(ref warning) = self.warning {
            warning.render(display, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    Paused(Paused),
    Over(GameOver),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct GameOver {
    cause: Cause,
    /// Whether the final score earned a place in the high score table
    qualified: bool,
}

/// What ended the game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Cause {
    Wall,
    SelfBite,
    Obstacle,
    /// The snake has filled the board and there are no more spaces to place
    /// food in.
    BoardFull,
}

impl Cause {
    fn message(self) -> &'static str {
        match self {
            Cause::Wall => "You crashed into the wall!",
            Cause::SelfBite => "You bit yourself!",
            Cause::Obstacle => "You hit an obstacle!",
            Cause::BoardFull => "You filled the board!",
        }
    }
}

/// Pop-up shown when the game is over
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Summary {
    over: GameOver,
    score: Score,
}

impl Summary {
    const WIDTH: u16 = 34;
}

impl Widget for Summary {
    // `area` is the area of the entire display
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![
            Line::from(self.over.cause.message()),
            Line::default(),
            Line::from(format!(
                "Final Score: {}",
                format_thousands(self.score.points())
            )),
            Line::from(format!(
                "Food: {}  Bonus: {}  Level: {}",
                self.score.food_eaten(),
                self.score.bonus_eaten(),
                self.score.difficulty()
            )),
            Line::from(format!("Rank: {}", self.score.rank())),
        ];
        if self.over.qualified {
            lines.push(Line::styled(
                "★ New High Score! ★",
                consts::HIGH_SCORE_STYLE,
            ));
        }
        let height = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let block_area = center_rect(
            area,
            Size {
                width: Summary::WIDTH,
                height,
            },
        );
        let block = Block::bordered()
            .title(" GAME OVER ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(block_area);
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        Text::from(lines).centered().render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::highscores::HighScores;
    use crate::options::Options;
    use crossterm::event::{KeyCode, KeyEvent};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::collections::VecDeque;
    use std::time::Duration;
    use tempfile::TempDir;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_game(options: Options) -> (Game<ChaCha12Rng>, TempDir) {
        let tmpdir = tempfile::tempdir().unwrap();
        let globals = Globals {
            config: Config::for_testing(tmpdir.path()),
            options,
            high_scores: HighScores::default(),
        };
        let game = Game::new_with_rng(globals, ChaCha12Rng::seed_from_u64(RNG_SEED));
        (game, tmpdir)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    /// Put a regular food directly in front of the snake and move onto it
    fn feed(game: &mut Game<ChaCha12Rng>) {
        let next = game
            .snake
            .direction
            .advance(game.snake.head(), game.bounds)
            .unwrap();
        game.food.bonus = game.food.bonus.filter(|b| b.pos != next);
        game.food.regular = Some(next);
        game.step();
    }

    fn render(game: &Game<ChaCha12Rng>) -> Buffer {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        buffer
    }

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_owned()
    }

    #[test]
    fn new_game_state() {
        let (game, _tmpdir) = new_game(Options::default());
        assert_eq!(game.bounds, consts::DEFAULT_BOARD_SIZE);
        assert_eq!(game.snake.head(), Position::new(38, 9));
        assert_eq!(game.snake.len(), 1);
        assert_eq!(game.snake.direction, Direction::East);
        let food = game.food.regular.unwrap();
        assert_ne!(food, game.snake.head());
        assert_eq!(game.food.bonus, None);
        assert_eq!(game.obstacles.len(), 0);
        assert!(game.running());
        assert!(!game.themes.transitioning());
    }

    #[test]
    fn render_new_game() {
        let (game, _tmpdir) = new_game(Options {
            theme: ThemeId::Desert,
            mix_mode: false,
        });
        let buffer = render(&game);
        assert_eq!(
            row_text(&buffer, 0),
            " Score: 0  Food: 0  Level: 0  Speed: 1.0x  Theme: Desert"
        );
        assert!(row_text(&buffer, 1).contains(" Desert "));
        // Board cell (38, 9) is at display cell (40, 11)
        assert_eq!(buffer[(40, 11)].symbol(), "<");
        let food = game.food.regular.unwrap();
        assert_eq!(buffer[(food.x + 2, food.y + 2)].symbol(), "¥");
        assert_eq!(
            row_text(&buffer, 23),
            " Move (arrows/wasd) — Pause (p)"
        );
    }

    #[test]
    fn eat_food() {
        let (mut game, _tmpdir) = new_game(Options::default());
        feed(&mut game);
        assert_eq!(game.score.points(), 10);
        assert_eq!(game.score.food_eaten(), 1);
        assert_eq!(game.snake.head(), Position::new(39, 9));
        assert_eq!(game.snake.len(), 1);
        assert!(game.snake.grow_pending);
        assert_eq!(game.particles.len(), 8);
        let food = game.food.regular.unwrap();
        assert!(!game.snake.contains(food));
        game.step();
        assert_eq!(game.snake.len(), 2);
    }

    #[test]
    fn tenth_food_spawns_bonus() {
        let (mut game, _tmpdir) = new_game(Options::default());
        for _ in 0..9 {
            feed(&mut game);
            assert_eq!(game.food.bonus, None);
        }
        feed(&mut game);
        assert_eq!(game.score.points(), 100);
        let bonus = game.food.bonus.unwrap();
        assert_ne!(Some(bonus.pos), game.food.regular);
        assert!(!game.snake.contains(bonus.pos));
        assert_eq!(bonus.spawned, game.clock);
    }

    #[test]
    fn eat_bonus() {
        let (mut game, _tmpdir) = new_game(Options::default());
        game.food.bonus = Some(food::Bonus {
            pos: Position::new(39, 9),
            spawned: game.clock,
        });
        game.food.regular = Some(Position::new(0, 0));
        game.step();
        assert_eq!(game.score.points(), 20);
        assert_eq!(game.score.bonus_eaten(), 1);
        assert_eq!(game.score.food_eaten(), 0);
        assert_eq!(game.food.bonus, None);
        assert_eq!(game.particles.len(), 12);
        assert!(game.snake.grow_pending);
        // Moving on does not eat the same bonus again
        game.step();
        assert_eq!(game.score.points(), 20);
    }

    #[test]
    fn move_timing() {
        let (mut game, _tmpdir) = new_game(Options::default());
        let start = game.clock;
        game.update(start + Duration::from_millis(150));
        assert_eq!(game.snake.head(), Position::new(38, 9));
        game.update(start + Duration::from_millis(151));
        assert_eq!(game.snake.head(), Position::new(39, 9));
        game.update(start + Duration::from_millis(301));
        assert_eq!(game.snake.head(), Position::new(39, 9));
        game.update(start + Duration::from_millis(302));
        assert_eq!(game.snake.head(), Position::new(40, 9));
        assert_eq!(game.frame, 4);
    }

    #[test]
    fn turning() {
        let (mut game, _tmpdir) = new_game(Options::default());
        assert!(game.handle_event(key(KeyCode::Left)).is_none());
        assert_eq!(game.snake.direction, Direction::East);
        assert!(game.handle_event(key(KeyCode::Char('w'))).is_none());
        assert_eq!(game.snake.direction, Direction::North);
        game.step();
        assert_eq!(game.snake.head(), Position::new(38, 8));
        assert_eq!(game.snake.head_symbol(), 'v');
    }

    #[test]
    fn wall_ends_game() {
        let (mut game, tmpdir) = new_game(Options {
            theme: ThemeId::Snow,
            mix_mode: false,
        });
        feed(&mut game);
        game.snake.head = Position::new(75, 9);
        game.snake.body = VecDeque::from([Position::new(74, 9)]);
        game.step();
        assert_eq!(
            game.state,
            GameState::Over(GameOver {
                cause: Cause::Wall,
                qualified: true
            })
        );
        assert_eq!(game.snake.head(), Position::new(75, 9));
        assert_eq!(game.globals.high_scores.best(ThemeId::Snow), Some(10));
        let saved = HighScores::load(&tmpdir.path().join("high_scores.json")).unwrap();
        assert_eq!(saved, game.globals.high_scores);
        assert_eq!(saved.get(ThemeId::Snow)[0].player, "Player");
        assert_eq!(saved.get(ThemeId::Snow)[0].food_eaten, 1);
        assert!(game.warning.is_none());

        let buffer = render(&game);
        assert_eq!(buffer[(77, 11)].symbol(), "×");
        assert_eq!(row_text(&buffer, 22), " — GAME OVER —");
        let text = (0..24).map(|y| row_text(&buffer, y)).collect::<Vec<_>>();
        assert!(text.iter().any(|l| l.contains("You crashed into the wall!")));
        assert!(text.iter().any(|l| l.contains("Final Score: 10")));
        assert!(text.iter().any(|l| l.contains("Rank: Snake Rookie")));
        assert!(text.iter().any(|l| l.contains("New High Score!")));
    }

    #[test]
    fn self_bite_ends_game() {
        let (mut game, _tmpdir) = new_game(Options::default());
        game.snake.head = Position::new(10, 5);
        game.snake.body = VecDeque::from([
            Position::new(9, 6),
            Position::new(10, 6),
            Position::new(11, 6),
            Position::new(11, 5),
        ]);
        game.snake.direction = Direction::South;
        game.step();
        assert!(matches!(
            game.state,
            GameState::Over(GameOver {
                cause: Cause::SelfBite,
                ..
            })
        ));
    }

    #[test]
    fn obstacle_ends_game() {
        let (mut game, _tmpdir) = new_game(Options::default());
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        // Only the cell in front of the snake is acceptable
        while game
            .obstacles
            .top_up(&mut rng, game.bounds, 1, Position::new(0, 0), |p| {
                p != Position::new(39, 9)
            })
            .is_none()
        {}
        game.step();
        assert!(matches!(
            game.state,
            GameState::Over(GameOver {
                cause: Cause::Obstacle,
                ..
            })
        ));
    }

    #[test]
    fn obstacles_appear_at_200() {
        let (mut game, _tmpdir) = new_game(Options::default());
        game.snake.head = Position::new(0, 9);
        for _ in 0..19 {
            feed(&mut game);
        }
        let now = game.clock;
        game.update(now + Duration::from_millis(1));
        assert_eq!(game.obstacles.len(), 0);
        feed(&mut game);
        assert_eq!(game.score.points(), 200);
        game.update(now + Duration::from_millis(2));
        assert_eq!(game.obstacles.len(), 1);
        game.update(now + Duration::from_millis(3));
        assert_eq!(game.obstacles.len(), 1);
        let head = game.snake.head();
        for &pos in &game.obstacles {
            assert!(!game.snake.contains(pos));
            assert!(!game.food.occupies(pos));
            assert!(pos.x.abs_diff(head.x) + pos.y.abs_diff(head.y) > 3);
        }
    }

    #[test]
    fn mix_mode_changes_theme() {
        let (mut game, _tmpdir) = new_game(Options {
            theme: ThemeId::Hill,
            mix_mode: true,
        });
        assert_eq!(game.themes.current(), ThemeId::Forest);
        game.snake.head = Position::new(0, 9);
        for _ in 0..10 {
            feed(&mut game);
        }
        let now = game.clock;
        game.update(now + Duration::from_millis(1));
        assert_eq!(game.themes.current(), ThemeId::Sea);
        assert!(game.themes.transitioning());
        let buffer = render(&game);
        assert!(row_text(&buffer, 0).contains("Theme: Sea (mix)"));
        assert!(row_text(&buffer, 0).contains("Bonus: 8.9s"));
    }

    #[test]
    fn bonus_expires() {
        let (mut game, _tmpdir) = new_game(Options::default());
        game.food.bonus = Some(food::Bonus {
            pos: Position::new(0, 0),
            spawned: game.clock,
        });
        let start = game.clock;
        game.state = GameState::Paused(Paused::new());
        game.update(start + Duration::from_secs(10));
        // Paused games don't expire food
        assert!(game.food.bonus.is_some());
        game.state = GameState::Running;
        game.last_move = start + Duration::from_secs(10);
        game.update(start + Duration::from_secs(10));
        assert_eq!(game.food.bonus, None);
    }

    #[test]
    fn pause_and_resume() {
        let (mut game, _tmpdir) = new_game(Options::default());
        feed(&mut game);
        assert!(game.handle_event(key(KeyCode::Char('p'))).is_none());
        assert!(matches!(game.state, GameState::Paused(_)));
        let start = game.clock;
        game.update(start + Duration::from_secs(1));
        assert_eq!(game.snake.head(), Position::new(39, 9));
        assert_eq!(game.particles.len(), 8);
        let buffer = render(&game);
        assert!((0..24).any(|y| row_text(&buffer, y).contains(" PAUSED ")));
        assert!(game.handle_event(key(KeyCode::Esc)).is_none());
        assert!(game.running());
        assert_eq!(game.last_move, start + Duration::from_secs(1));
        game.update(start + Duration::from_millis(1100));
        assert_eq!(game.snake.head(), Position::new(39, 9));
        game.update(start + Duration::from_millis(1200));
        assert_eq!(game.snake.head(), Position::new(40, 9));
    }

    #[test]
    fn focus_lost_pauses() {
        let (mut game, _tmpdir) = new_game(Options::default());
        assert!(game.handle_event(Event::FocusLost).is_none());
        assert!(matches!(game.state, GameState::Paused(_)));
    }

    #[test]
    fn game_over_choices() {
        let (mut game, _tmpdir) = new_game(Options::default());
        game.game_over(Cause::Wall);
        assert!(game.handle_event(key(KeyCode::Up)).is_none());
        assert!(matches!(
            game.handle_event(key(KeyCode::Char('m'))),
            Some(Screen::Main(_))
        ));
        assert!(matches!(
            game.handle_event(key(KeyCode::Char('r'))),
            Some(Screen::Game(_))
        ));
        assert!(matches!(
            game.handle_event(key(KeyCode::Char('q'))),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn save_failure_shows_warning() {
        let (mut game, tmpdir) = new_game(Options::default());
        // Make the high scores path unwritable by putting a directory there
        fs_err::create_dir(tmpdir.path().join("high_scores.json")).unwrap();
        game.game_over(Cause::Obstacle);
        assert!(game.warning.is_some());
        assert_eq!(game.globals.high_scores.best(ThemeId::Forest), Some(0));
        let buffer = render(&game);
        let text = (0..24).map(|y| row_text(&buffer, y)).collect::<Vec<_>>();
        assert!(text.iter().any(|l| l.contains("Failed to save high scores to disk")));
        assert!(game.handle_event(key(KeyCode::Char('q'))).is_none());
        assert!(game.warning.is_some());
        assert!(game.handle_event(key(KeyCode::Enter)).is_none());
        assert!(game.warning.is_none());
    }

    #[test]
    fn board_full_is_recorded() {
        let (mut game, _tmpdir) = new_game(Options::default());
        game.bounds = Size::new(3, 1);
        game.snake.head = Position::new(1, 0);
        game.snake.body = VecDeque::from([Position::new(0, 0)]);
        game.snake.grow_pending = true;
        game.food.regular = Some(Position::new(2, 0));
        game.step();
        assert_eq!(game.snake.len(), 3);
        assert_eq!(game.food.regular, None);
        assert_eq!(
            game.state,
            GameState::Over(GameOver {
                cause: Cause::BoardFull,
                qualified: true
            })
        );
        assert_eq!(game.globals.high_scores.best(ThemeId::Forest), Some(10));
    }
}
