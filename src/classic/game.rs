use super::{ClassicLauncher, SpeedLevel};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::direction::Direction;
use crate::menu::MainMenu;
use crate::util::{center_rect, get_display_area, Canvas, Globals};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::collections::VecDeque;
use std::time::Instant;
use tracing::info;

/// Glyph for each cell of the classic snake
const SEGMENT_SYMBOL: char = '█';

/// A game of classic snake: no themes, no bonuses, no obstacles, and no
/// protection against reversing into yourself
#[derive(Clone, Debug)]
pub(crate) struct ClassicGame<R = rand::rngs::ThreadRng> {
    rng: R,
    globals: Globals,
    speed: SpeedLevel,
    bounds: Size,
    head: Position,

    /// Cells behind the head, oldest first
    tail: VecDeque<Position>,

    /// Number of cells the snake is allowed to occupy
    length: usize,

    /// `None` until the player first presses a direction
    direction: Option<Direction>,

    food: Position,
    lost: bool,
    next_tick: Option<Instant>,
}

impl ClassicGame<rand::rngs::ThreadRng> {
    pub(crate) fn new(globals: Globals, speed: SpeedLevel) -> Self {
        ClassicGame::new_with_rng(globals, speed, rand::rng())
    }
}

impl<R: Rng> ClassicGame<R> {
    pub(crate) fn new_with_rng(globals: Globals, speed: SpeedLevel, mut rng: R) -> ClassicGame<R> {
        let bounds = globals.config.board.size();
        let food = random_cell(&mut rng, bounds);
        info!(%speed, "Starting classic game");
        ClassicGame {
            rng,
            globals,
            speed,
            bounds,
            head: Position::new(bounds.width / 2, bounds.height / 2),
            tail: VecDeque::new(),
            length: 1,
            direction: None,
            food,
            lost: false,
            next_tick: None,
        }
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.lost {
            return Ok(self.handle_event(read()?));
        }
        let when = *self
            .next_tick
            .get_or_insert_with(|| Instant::now() + self.speed.tick_period());
        let wait = when.saturating_duration_since(Instant::now());
        if wait.is_zero() || !poll(wait)? {
            self.next_tick = None;
            self.tick();
            Ok(None)
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    /// Move the snake one cell and check what it ran into
    fn tick(&mut self) {
        let Some(direction) = self.direction else {
            return;
        };
        let Some(head) = direction.advance(self.head, self.bounds) else {
            self.lose();
            return;
        };
        self.tail.push_back(self.head);
        self.head = head;
        while self.tail.len() >= self.length {
            if self.tail.pop_front().is_none() {
                break;
            }
        }
        if self.tail.contains(&head) {
            self.lose();
            return;
        }
        if head == self.food {
            self.length += 1;
            self.food = random_cell(&mut self.rng, self.bounds);
        }
    }
}

impl<R> ClassicGame<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn speed(&self) -> SpeedLevel {
        self.speed
    }

    pub(crate) fn score(&self) -> usize {
        self.length - 1
    }

    fn lose(&mut self) {
        info!(score = self.score(), speed = %self.speed, "Classic game over");
        self.lost = true;
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        if self.lost {
            match cmd {
                Command::C => {
                    return Some(Screen::Classic(ClassicGame::new(
                        self.globals.clone(),
                        self.speed,
                    )))
                }
                Command::M => return Some(Screen::Main(MainMenu::new(self.globals.clone()))),
                Command::Q | Command::Quit => return Some(Screen::Quit),
                _ => (),
            }
        } else {
            match cmd {
                Command::Quit => return Some(Screen::Quit),
                Command::Esc => {
                    return Some(Screen::Launcher(ClassicLauncher::with_speed(
                        self.globals.clone(),
                        self.speed,
                    )))
                }
                cmd => {
                    if let Some(d) = Direction::from_command(cmd) {
                        self.direction = Some(d);
                    }
                }
            }
        }
        None
    }
}

impl<R> Widget for &ClassicGame<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, block_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(" Your Score: {}", self.score()),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let block_area = center_rect(
            block_area,
            Size {
                width: self.bounds.width.saturating_add(2),
                height: self.bounds.height.saturating_add(2),
            },
        );
        Block::bordered()
            .title(format!(" Classic Snake: {} ", self.speed()))
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
            base: Style::new(),
        };
        canvas.draw_cell(
            self.food,
            consts::CLASSIC_FOOD_SYMBOL,
            consts::CLASSIC_FOOD_STYLE,
        );
        for &pos in self.tail.iter().chain(std::iter::once(&self.head)) {
            canvas.draw_cell(pos, SEGMENT_SYMBOL, consts::CLASSIC_SNAKE_STYLE);
        }

        if self.lost {
            Line::styled(
                "You lost! Press Q-Quit or C-Play Again",
                consts::CLASSIC_FOOD_STYLE,
            )
            .centered()
            .render(msg1_area, buf);
            Line::from_iter([
                Span::raw(" Main Menu ("),
                Span::styled("m", consts::KEY_STYLE),
                Span::raw(")"),
            ])
            .render(msg2_area, buf);
        } else {
            Line::from_iter([
                Span::raw(" Move ("),
                Span::styled("arrows", consts::KEY_STYLE),
                Span::raw("/"),
                Span::styled("wasd", consts::KEY_STYLE),
                Span::raw(") — Back ("),
                Span::styled("Esc", consts::KEY_STYLE),
                Span::raw(")"),
            ])
            .render(msg2_area, buf);
        }
    }
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R, bounds: Size) -> Position {
    Position::new(
        rng.random_range(0..bounds.width.max(1)),
        rng.random_range(0..bounds.height.max(1)),
    )
}
