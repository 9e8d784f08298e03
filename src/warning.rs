use crate::command::Command;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    text::{Line, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use std::borrow::Cow;

/// A popup describing an I/O error and its causes
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
    scroll_offset: usize,
    max_scroll: usize,
}

impl Warning {
    const MAX_LINES: u16 = 16;
    const TEXT_WIDTH: u16 = 48;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    pub(crate) fn handle_command(&mut self, cmd: Command) -> Option<WarningOutcome> {
        match (cmd, self.scrolling()) {
            (Command::Enter | Command::Esc | Command::Space, _) => {
                return Some(WarningOutcome::Dismissed)
            }
            (Command::Quit, _) => return Some(WarningOutcome::Quit),
            (Command::Up, true) => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            (Command::Down, true) => {
                if self.scroll_offset < self.max_scroll.saturating_sub(1) {
                    self.scroll_offset += 1;
                }
            }
            (Command::Home, true) => self.scroll_offset = 0,
            (Command::End, true) => self.scroll_offset = self.max_scroll.saturating_sub(1),
            _ => (),
        }
        None
    }

    fn scrolling(&self) -> bool {
        self.lines.len() > usize::from(Self::MAX_LINES)
    }

    fn wrap_into(lines: &mut Vec<String>, text: &str, first: &str, rest: &str) {
        let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH))
            .break_words(true)
            .initial_indent(first)
            .subsequent_indent(rest);
        lines.extend(textwrap::wrap(text, opts).into_iter().map(Cow::into_owned));
    }

    fn from_error_messages(msgs: Vec<String>) -> Self {
        let mut msgs = msgs.into_iter();
        let Some(head) = msgs.next() else {
            return Warning {
                lines: vec![String::from("Something went wrong.")],
                scroll_offset: 0,
                max_scroll: 0,
            };
        };
        let mut lines = Vec::new();
        Warning::wrap_into(&mut lines, &head, "", "");
        let causes = msgs.collect::<Vec<_>>();
        if !causes.is_empty() {
            lines.push(String::new());
            lines.push(String::from("Caused by:"));
            if let [cause] = causes.as_slice() {
                Warning::wrap_into(&mut lines, cause, "    ", "    ");
            } else {
                for (i, m) in causes.iter().enumerate() {
                    let init_indent = format!("{i:>5}: ");
                    Warning::wrap_into(&mut lines, m, &init_indent, "       ");
                }
            }
        }
        let max_scroll = lines
            .len()
            .saturating_sub(usize::from(Warning::MAX_LINES) - 1);
        Warning {
            lines,
            scroll_offset: 0,
            max_scroll,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl<E: std::error::Error> From<E> for Warning {
    fn from(e: E) -> Warning {
        let mut msgs = vec![e.to_string()];
        let mut source = e.source();
        while let Some(src) = source {
            msgs.push(src.to_string());
            source = src.source();
        }
        Warning::from_error_messages(msgs)
    }
}

impl Widget for &Warning {
    // `area` is here the area of the entire display in which the program is
    // drawing, not the area for just the widget proper.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .min(Warning::MAX_LINES)
            .saturating_add(4);
        let block_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH.saturating_add(u16::from(self.scrolling()) * 2),
                height,
            },
        );
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [text_area, ok_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .flex(Flex::Start)
            .spacing(1)
            .areas(block.inner(block_area));
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        if self.scrolling() {
            let [text_area, scrollbar_area] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(1)])
                    .flex(Flex::Start)
                    .spacing(1)
                    .areas(text_area);
            Text::from_iter(
                self.lines
                    .iter()
                    .skip(self.scroll_offset)
                    .take(usize::from(Warning::MAX_LINES))
                    .map(String::as_str),
            )
            .render(text_area, buf);
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .track_symbol(Some(ratatui::symbols::shade::MEDIUM));
            let mut scroll_state =
                ScrollbarState::new(self.max_scroll).position(self.scroll_offset);
            scrollbar.render(scrollbar_area, buf, &mut scroll_state);
        } else {
            Text::from_iter(self.lines.iter().map(String::as_str)).render(text_area, buf);
        }

        Line::from("[OK]").centered().render(ok_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::SaveError;
    use pretty_assertions::assert_eq;

    fn render(warning: &Warning) -> Buffer {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        warning.render(area, &mut buffer);
        buffer
    }

    #[test]
    fn render_no_cause() {
        let warning =
            Warning::from_error_messages(vec![String::from("Failed to save high scores to disk")]);
        let expected = Buffer::with_lines([
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "              ┌──────────────────── WARNING ─────────────────────┐              ",
            "              │ Failed to save high scores to disk               │              ",
            "              │                                                  │              ",
            "              │                       [OK]                       │              ",
            "              └──────────────────────────────────────────────────┘              ",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
        ]);
        assert_eq!(render(&warning), expected);
    }

    #[test]
    fn render_one_cause() {
        let warning = Warning::from_error_messages(vec![
            String::from("Failed to read options from disk"),
            String::from("failed to deserialize file contents"),
        ]);
        let expected = Buffer::with_lines([
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "              ┌──────────────────── WARNING ─────────────────────┐              ",
            "              │ Failed to read options from disk                 │              ",
            "              │                                                  │              ",
            "              │ Caused by:                                       │              ",
            "              │     failed to deserialize file contents          │              ",
            "              │                                                  │              ",
            "              │                       [OK]                       │              ",
            "              └──────────────────────────────────────────────────┘              ",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
        ]);
        assert_eq!(render(&warning), expected);
    }

    #[test]
    fn render_two_causes() {
        let warning = Warning::from_error_messages(vec![
            String::from("Failed to save high scores to disk"),
            String::from("failed to write file"),
            String::from("Permission denied (os error 13)"),
        ]);
        let expected = Buffer::with_lines([
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "              ┌──────────────────── WARNING ─────────────────────┐              ",
            "              │ Failed to save high scores to disk               │              ",
            "              │                                                  │              ",
            "              │ Caused by:                                       │              ",
            "              │     0: failed to write file                      │              ",
            "              │     1: Permission denied (os error 13)           │              ",
            "              │                                                  │              ",
            "              │                       [OK]                       │              ",
            "              └──────────────────────────────────────────────────┘              ",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
        ]);
        assert_eq!(render(&warning), expected);
    }

    #[test]
    fn from_error_walks_sources() {
        let warning = Warning::from(SaveError::no_path("options"));
        assert_eq!(
            warning.lines,
            [
                "Failed to save options to disk",
                "",
                "Caused by:",
                "    failed to determine path to local data directory",
            ]
        );
    }

    #[test]
    fn wraps_long_lines() {
        let warning = Warning::from_error_messages(vec![
            String::from("Failed to save high scores to disk"),
            String::from(
                "failed to write file because the disk quota for this user has been exceeded and nothing more fits",
            ),
        ]);
        assert_eq!(
            warning.lines,
            [
                "Failed to save high scores to disk",
                "",
                "Caused by:",
                "    failed to write file because the disk quota",
                "    for this user has been exceeded and nothing",
                "    more fits",
            ]
        );
    }

    #[test]
    fn scrolling() {
        let msgs = (0..20).map(|i| format!("error number {i}")).collect();
        let mut warning = Warning::from_error_messages(msgs);
        assert!(warning.scrolling());
        // 1 + 2 + 19 lines, minus a page
        assert_eq!(warning.max_scroll, 7);
        assert_eq!(warning.handle_command(Command::Up), None);
        assert_eq!(warning.scroll_offset, 0);
        for _ in 0..10 {
            assert_eq!(warning.handle_command(Command::Down), None);
        }
        assert_eq!(warning.scroll_offset, 6);
        assert_eq!(warning.handle_command(Command::Home), None);
        assert_eq!(warning.scroll_offset, 0);
        assert_eq!(warning.handle_command(Command::End), None);
        assert_eq!(warning.scroll_offset, 6);
        assert_eq!(
            warning.handle_command(Command::Esc),
            Some(WarningOutcome::Dismissed)
        );
        assert_eq!(
            warning.handle_command(Command::Quit),
            Some(WarningOutcome::Quit)
        );
    }
}
