use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Widget,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    const TEXT_HEIGHT: u16 = 5;
    const SNAKE_BODY_LENGTH: u16 = 10;
    const SNAKE_FOOD_GUTTER: u16 = 2;
    const SUBTITLE: &'static str = "O D Y S S E Y";
    pub(super) const HEIGHT: u16 = Self::TEXT_HEIGHT + 2;
    pub(super) const WIDTH: u16 = 28;

    #[rustfmt::skip]
    const TITLE: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " ____              _        ",
         "/ ___| _ __   __ _| | _____ ",
        r"\___ \| '_ \ / _` | |/ / _ \",
         " ___) | | | | (_| |   <  __/",
        r"|____/|_| |_|\__,_|_|\_\___|",
    ];
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([Self::WIDTH])
            .flex(Flex::Start)
            .areas(area);
        let [title_area, subtitle_area, diagram_area] =
            Layout::vertical([Self::TEXT_HEIGHT, 1, 1])
                .flex(Flex::Start)
                .areas(area);
        Text::from_iter(Self::TITLE)
            .style(consts::CLASSIC_SNAKE_STYLE)
            .render(title_area, buf);
        Line::from(Span::styled(Self::SUBTITLE, consts::BONUS_STYLE))
            .centered()
            .render(subtitle_area, buf);
        let [body_area, head_area, _, food_area] = Layout::horizontal([
            Constraint::Length(Self::SNAKE_BODY_LENGTH),
            Constraint::Length(1),
            Constraint::Length(Self::SNAKE_FOOD_GUTTER),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(diagram_area);
        for (area, symbol, style) in [
            (
                body_area,
                consts::SNAKE_BODY_SYMBOL,
                consts::CLASSIC_SNAKE_STYLE,
            ),
            (
                head_area,
                consts::SNAKE_HEAD_EAST_SYMBOL,
                consts::CLASSIC_SNAKE_STYLE,
            ),
            (
                food_area,
                consts::CLASSIC_FOOD_SYMBOL,
                consts::CLASSIC_FOOD_STYLE,
            ),
        ] {
            for p in area.positions() {
                if let Some(cell) = buf.cell_mut(p) {
                    cell.set_char(symbol);
                    cell.set_style(style);
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 5;
    pub(super) const WIDTH: u16 = 24;
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter([
            Line::from("Move the snake with:"),
            Line::from_iter([
                Span::raw("       "),
                Span::styled("↑", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("←", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("↓", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("→", consts::KEY_STYLE),
            ]),
            Line::from_iter([
                Span::raw("   or: "),
                Span::styled("w", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("a", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("s", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("d", consts::KEY_STYLE),
            ]),
            Line::from("Eat food, chase bonuses,"),
            Line::from("and don't hit anything!"),
        ]);
        debug_assert_eq!(
            text.height(),
            usize::from(Self::HEIGHT),
            "Instructions::HEIGHT is wrong"
        );
        debug_assert_eq!(
            text.width(),
            usize::from(Self::WIDTH),
            "Instructions::WIDTH is wrong"
        );
        text.render(area, buf);
    }
}
