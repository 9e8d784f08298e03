//! The minimal "classic" snake game and its launcher screen
mod game;
pub(crate) use self::game::ClassicGame;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::menu::MainMenu;
use crate::options::Adjustable;
use crate::util::{get_display_area, EnumExt, Globals};
use crossterm::event::{read, Event};
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    text::{Line, Span},
    widgets::Widget,
    Frame,
};
use std::fmt;
use std::time::Duration;

/// How fast the classic snake moves
#[derive(Clone, Copy, Debug, Default, Enum, Eq, PartialEq)]
pub(crate) enum SpeedLevel {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl SpeedLevel {
    pub(crate) fn name(self) -> &'static str {
        match self {
            SpeedLevel::Easy => "Easy",
            SpeedLevel::Normal => "Normal",
            SpeedLevel::Hard => "Hard",
        }
    }

    pub(crate) fn moves_per_second(self) -> u32 {
        match self {
            SpeedLevel::Easy => 15,
            SpeedLevel::Normal => 30,
            SpeedLevel::Hard => 45,
        }
    }

    /// Time between moves of the snake
    pub(crate) fn tick_period(self) -> Duration {
        Duration::from_secs(1) / self.moves_per_second()
    }
}

impl fmt::Display for SpeedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl Adjustable for SpeedLevel {
    fn increase(&mut self) {
        if let Some(level) = self.next() {
            *self = level;
        }
    }

    fn decrease(&mut self) {
        if let Some(level) = self.prev() {
            *self = level;
        }
    }

    fn toggle(&mut self) {
        *self = self.next().unwrap_or_else(SpeedLevel::min);
    }

    fn can_increase(&self) -> bool {
        *self != SpeedLevel::max()
    }

    fn can_decrease(&self) -> bool {
        *self != SpeedLevel::min()
    }
}

/// Screen for choosing a speed level and starting a classic game
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ClassicLauncher {
    globals: Globals,
    speed: SpeedLevel,
}

impl ClassicLauncher {
    pub(crate) fn new(globals: Globals) -> ClassicLauncher {
        ClassicLauncher::with_speed(globals, SpeedLevel::default())
    }

    pub(crate) fn with_speed(globals: Globals, speed: SpeedLevel) -> ClassicLauncher {
        ClassicLauncher { globals, speed }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit | Command::Q => return Some(Screen::Quit),
            Command::M | Command::Esc => {
                return Some(Screen::Main(MainMenu::new(self.globals.clone())))
            }
            Command::Enter | Command::Space => {
                return Some(Screen::Classic(ClassicGame::new(
                    self.globals.clone(),
                    self.speed,
                )))
            }
            Command::Left => self.speed.decrease(),
            Command::Right => self.speed.increase(),
            Command::Next => self.speed.toggle(),
            _ => (),
        }
        None
    }
}

impl Widget for &ClassicLauncher {
    /*
     *                 CLASSIC SNAKE
     *
     *       Selected Speed Level: Normal
     *
     *         Speed:  ◀ Normal ▶
     *
     *     [Start Game (Enter)]
     *
     *   [Main Menu (m)]  [Quit (q)]
     */
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [_, title_area, label_area, speed_area, start_area, buttons_area] =
            Layout::vertical([5, 1, 1, 1, 1, 1])
                .flex(Flex::Start)
                .spacing(1)
                .areas(display);
        Line::styled("CLASSIC SNAKE", consts::CLASSIC_SNAKE_STYLE)
            .centered()
            .render(title_area, buf);
        Line::from(format!("Selected Speed Level: {}", self.speed))
            .centered()
            .render(label_area, buf);
        Line::from_iter([
            Span::raw("Speed:  "),
            Span::styled(
                if self.speed.can_decrease() { "◀" } else { "◁" },
                consts::KEY_STYLE,
            ),
            Span::raw(format!(" {:^6} ", self.speed)),
            Span::styled(
                if self.speed.can_increase() { "▶" } else { "▷" },
                consts::KEY_STYLE,
            ),
        ])
        .centered()
        .render(speed_area, buf);
        Line::from_iter([
            Span::raw("[Start Game ("),
            Span::styled("Enter", consts::KEY_STYLE),
            Span::raw(")]"),
        ])
        .centered()
        .render(start_area, buf);
        Line::from_iter([
            Span::raw("[Main Menu ("),
            Span::styled("m", consts::KEY_STYLE),
            Span::raw(")]  [Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")]"),
        ])
        .centered()
        .render(buttons_area, buf);
    }
}
