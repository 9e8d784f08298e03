use crate::command::Command;
use crate::consts;
use crate::util::EnumExt;
use crossterm::event::Event;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
};

/// A widget for displaying a pause menu pop-up
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Paused {
    /// The currently-selected item in the pause menu
    selection: PauseOpt,
}

impl Paused {
    /// The height that should be used for the `Rect` passed to
    /// `Paused::render()`
    pub(super) const HEIGHT: u16 = 6;

    /// The width that should be used for the `Rect` passed to
    /// `Paused::render()`
    pub(super) const WIDTH: u16 = 19;

    pub(super) fn new() -> Paused {
        Paused {
            selection: PauseOpt::min(),
        }
    }

    /// Handle an input event.  Returns `Some` if the user made a choice.
    pub(super) fn handle_event(&mut self, event: Event) -> Option<PauseOpt> {
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        if let Some(opt) = PauseOpt::for_shortcut(cmd) {
            return Some(opt);
        }
        self.selection = match cmd {
            Command::Enter => return Some(self.selection),
            Command::Up => self.selection.prev().unwrap_or(self.selection),
            Command::Down => self.selection.next().unwrap_or(self.selection),
            Command::Next => self.selection.next().unwrap_or_else(PauseOpt::min),
            Command::Prev => self.selection.prev().unwrap_or_else(PauseOpt::max),
            Command::Home => PauseOpt::min(),
            Command::End => PauseOpt::max(),
            _ => self.selection,
        };
        None
    }
}

/// The choices in the pause menu, in display order
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(super) enum PauseOpt {
    Resume,
    Restart,
    MainMenu,
    Quit,
}

impl PauseOpt {
    fn label(self) -> &'static str {
        match self {
            PauseOpt::Resume => "Resume",
            PauseOpt::Restart => "Restart",
            PauseOpt::MainMenu => "Main Menu",
            PauseOpt::Quit => "Quit",
        }
    }

    /// The key shown next to the option's label
    fn key(self) -> &'static str {
        match self {
            PauseOpt::Resume => "p",
            PauseOpt::Restart => "r",
            PauseOpt::MainMenu => "m",
            PauseOpt::Quit => "q",
        }
    }

    /// Map a command that picks an option directly, regardless of the
    /// current selection.  Esc & space also resume.
    fn for_shortcut(cmd: Command) -> Option<PauseOpt> {
        match cmd {
            Command::P | Command::Esc | Command::Space => Some(PauseOpt::Resume),
            Command::R => Some(PauseOpt::Restart),
            Command::M => Some(PauseOpt::MainMenu),
            Command::Q | Command::Quit => Some(PauseOpt::Quit),
            _ => None,
        }
    }

    fn to_line(self, selected: bool) -> Line<'static> {
        let line = Line::from_iter([
            Span::raw(if selected { "» " } else { "  " }),
            Span::raw(format!("{} (", self.label())),
            Span::styled(self.key(), consts::KEY_STYLE),
            Span::raw(")"),
        ]);
        if selected {
            line.style(consts::MENU_SELECTION_STYLE)
        } else {
            line
        }
    }
}

impl Widget for Paused {
    /*
     * ┌──── PAUSED ─────┐
     * │ » Resume (p)    │
     * │   Restart (r)   │
     * │   Main Menu (m) │
     * │   Quit (q)      │
     * └─────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        for (opt, row) in PauseOpt::iter().zip(inner.rows()) {
            opt.to_line(self.selection == opt).render(row, buf);
        }
    }
}
