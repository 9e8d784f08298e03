//! The high score viewer
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::highscores::ScoreEntry;
use crate::menu::MainMenu;
use crate::theme::ThemeId;
use crate::util::{center_rect, format_thousands, get_display_area, EnumExt, Globals};
use crossterm::event::{read, Event};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect, Size},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Screen listing the high scores for each theme, one theme at a time
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ScoresScreen {
    globals: Globals,
    theme: ThemeId,
}

impl ScoresScreen {
    const NAME_WIDTH: usize = consts::MAX_PLAYER_WIDTH;
    const DATE_FORMAT: &'static str = "%Y-%m-%d";
    #[allow(clippy::cast_possible_truncation)]
    const TABLE_HEIGHT: u16 = consts::MAX_HIGH_SCORES as u16 + 3;
    const TABLE_WIDTH: u16 = 59;

    pub(crate) fn new(globals: Globals, theme: ThemeId) -> ScoresScreen {
        ScoresScreen { globals, theme }
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
            Command::M | Command::Esc | Command::Enter => {
                return Some(Screen::Main(MainMenu::new(self.globals.clone())))
            }
            Command::Left | Command::Prev => {
                self.theme = self.theme.prev().unwrap_or_else(ThemeId::max);
            }
            Command::Right | Command::Next => {
                self.theme = self.theme.next().unwrap_or_else(ThemeId::min);
            }
            Command::Home => self.theme = ThemeId::min(),
            Command::End => self.theme = ThemeId::max(),
            _ => (),
        }
        None
    }

    fn tabs(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for theme in ThemeId::iter() {
            if !spans.is_empty() {
                spans.push(Span::raw(" "));
            }
            let style = if theme == self.theme {
                consts::MENU_SELECTION_STYLE.add_modifier(Modifier::BOLD)
            } else {
                Style::new()
            };
            spans.push(Span::styled(format!(" {theme} "), style));
        }
        Line::from(spans).centered()
    }

    fn row(rank: &str, score: &str, player: &str, food: &str, bonus: &str, date: &str) -> String {
        let pad = Self::NAME_WIDTH.saturating_sub(player.width());
        format!(
            "{rank:>3}  {score:>7}  {player}{space:pad$}  {food:>4}  {bonus:>5}  {date}",
            space = ""
        )
    }

    fn entry_line(rank: usize, entry: &ScoreEntry) -> Line<'static> {
        let s = Self::row(
            &format!("{rank}."),
            &format_thousands(entry.score),
            &entry.player,
            &entry.food_eaten.to_string(),
            &entry.bonus_eaten.to_string(),
            &entry.date.format(Self::DATE_FORMAT).to_string(),
        );
        if rank == 1 {
            Line::styled(s, consts::HIGH_SCORE_STYLE)
        } else {
            Line::from(s)
        }
    }
}

impl Widget for &ScoresScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [title_area, tabs_area, table_area, footer_area] =
            Layout::vertical([1, 1, ScoresScreen::TABLE_HEIGHT, 1])
                .flex(Flex::Start)
                .spacing(1)
                .areas(display);
        Line::styled("HIGH SCORES", consts::CLASSIC_SNAKE_STYLE)
            .centered()
            .render(title_area, buf);
        self.tabs().render(tabs_area, buf);

        let table_area = center_rect(
            table_area,
            Size {
                width: ScoresScreen::TABLE_WIDTH,
                height: ScoresScreen::TABLE_HEIGHT,
            },
        );
        let block = Block::bordered()
            .title(format!(" {} ", self.theme))
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let inner = block.inner(table_area);
        block.render(table_area, buf);
        let mut rows = inner.rows();
        if let Some(row) = rows.next() {
            Line::styled(
                ScoresScreen::row("#", "Score", "Player", "Food", "Bonus", "Date"),
                Style::new().add_modifier(Modifier::BOLD),
            )
            .render(row, buf);
        }
        let entries = self.globals.high_scores.get(self.theme);
        if entries.is_empty() {
            if let Some(row) = rows.nth(1) {
                Line::from("No scores yet").centered().render(row, buf);
            }
        } else {
            for ((i, entry), row) in entries.iter().enumerate().zip(rows) {
                ScoresScreen::entry_line(i + 1, entry).render(row, buf);
            }
        }

        Line::from_iter([
            Span::raw("Switch Theme ("),
            Span::styled("←", consts::KEY_STYLE),
            Span::raw("/"),
            Span::styled("→", consts::KEY_STYLE),
            Span::raw(") — Back ("),
            Span::styled("m", consts::KEY_STYLE),
            Span::raw(") — Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .centered()
        .render(footer_area, buf);
    }
}
