mod widgets;
use self::widgets::{Instructions, Logo};
use crate::app::Screen;
use crate::classic::ClassicLauncher;
use crate::command::Command;
use crate::consts;
use crate::game::Game;
use crate::options::{Adjustable, OptKey, OptValue, Options};
use crate::scores::ScoresScreen;
use crate::util::{error_chain, get_display_area, EnumExt, Globals};
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{read, Event};
use enum_map::{Enum, EnumMap};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
    Frame,
};
use tracing::{debug, warn};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MainMenu {
    globals: Globals,
    selection: Selection,
    options: OptionsMenu,
    warning: Option<Warning>,
}

impl MainMenu {
    pub(crate) fn new(globals: Globals) -> Self {
        let options = OptionsMenu::new(globals.options);
        MainMenu {
            globals,
            selection: Selection::default(),
            options,
            warning: None,
        }
    }

    /// Show `warning` (if any) over the menu until it is dismissed
    pub(crate) fn with_warning(mut self, warning: Option<Warning>) -> Self {
        self.warning = warning;
        self
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        if let Some(ref mut warning) = self.warning {
            match warning.handle_command(cmd)? {
                WarningOutcome::Dismissed => self.warning = None,
                WarningOutcome::Quit => return Some(Screen::Quit),
            }
            return None;
        }
        match (self.selection, cmd) {
            (_, Command::Quit) => return Some(Screen::Quit),
            (_, Command::Home) => self.select(Selection::PlayButton, None),
            (_, Command::End) => self.select(Selection::QuitButton, None),
            (Selection::PlayButton, Command::Enter) | (_, Command::P) => return Some(self.play()),
            (Selection::ScoresButton, Command::Enter) | (_, Command::H) => {
                return Some(self.scores())
            }
            (Selection::ClassicButton, Command::Enter) | (_, Command::C) => {
                return Some(self.classic())
            }
            (Selection::QuitButton, Command::Enter) | (_, Command::Q) => {
                return Some(Screen::Quit);
            }
            (Selection::PlayButton, Command::Prev) => self.select(Selection::QuitButton, None),
            (Selection::PlayButton, Command::Down | Command::Next) => {
                self.select(Selection::Options, Some(true));
            }
            (Selection::Options, Command::Up | Command::Prev) => {
                if let Some(sel) = self.options.move_up() {
                    self.select(sel, None);
                }
            }
            (Selection::Options, Command::Down | Command::Next) => {
                if let Some(sel) = self.options.move_down() {
                    self.select(sel, None);
                }
            }
            (Selection::Options, Command::Left) => self.options.move_left(),
            (Selection::Options, Command::Right) => self.options.move_right(),
            (Selection::Options, Command::Space | Command::Enter) => self.options.toggle(),
            (
                Selection::ScoresButton | Selection::ClassicButton | Selection::QuitButton,
                Command::Up,
            )
            | (Selection::ScoresButton, Command::Prev) => {
                self.select(Selection::Options, Some(false));
            }
            (Selection::ScoresButton, Command::Right | Command::Next)
            | (Selection::QuitButton, Command::Left | Command::Prev) => {
                self.select(Selection::ClassicButton, None);
            }
            (Selection::ClassicButton, Command::Left | Command::Prev) => {
                self.select(Selection::ScoresButton, None);
            }
            (Selection::ClassicButton, Command::Right | Command::Next) => {
                self.select(Selection::QuitButton, None);
            }
            (Selection::QuitButton, Command::Next) => self.select(Selection::PlayButton, None),
            _ => (),
        }
        None
    }

    /// Copy the options as currently set in the menu into `globals`
    fn commit_options(&mut self) {
        self.globals.options = self.options.to_options();
    }

    /// Start a new themed game with the chosen options, saving them to disk
    /// first
    fn play(&mut self) -> Screen {
        self.commit_options();
        let options = self.globals.options;
        let warning = match self.globals.config.save_options(options) {
            Ok(()) => {
                debug!(?options, "Saved options");
                None
            }
            Err(e) => {
                warn!(error = %error_chain(&e), "Failed to save options");
                Some(Warning::from(e))
            }
        };
        Screen::Game(Game::new(self.globals.clone()).with_warning(warning))
    }

    fn scores(&mut self) -> Screen {
        self.commit_options();
        Screen::Scores(ScoresScreen::new(
            self.globals.clone(),
            self.globals.options.theme,
        ))
    }

    fn classic(&mut self) -> Screen {
        self.commit_options();
        Screen::Launcher(ClassicLauncher::new(self.globals.clone()))
    }

    fn select(&mut self, selection: Selection, first_option: Option<bool>) {
        self.selection = selection;
        if selection == Selection::Options {
            if let Some(first) = first_option {
                self.options.selection = if first {
                    Some(OptKey::min())
                } else {
                    Some(OptKey::max())
                };
            }
        } else {
            self.options.selection = None;
        }
    }

    fn button(
        &self,
        label: &'static str,
        key: &'static str,
        selection: Selection,
    ) -> Vec<Span<'static>> {
        let style = if self.selection == selection {
            consts::MENU_SELECTION_STYLE
        } else {
            Style::new()
        };
        vec![
            Span::styled("[", style),
            Span::styled(label, style),
            Span::styled(" (", style),
            Span::styled(key, consts::KEY_STYLE.patch(style)),
            Span::styled(")]", style),
        ]
    }
}

impl Widget for &MainMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, instructions_area, play_area, options_area, buttons_area] =
            Layout::vertical([
                Logo::HEIGHT,
                Instructions::HEIGHT,
                1,
                OptionsMenu::HEIGHT,
                1,
            ])
            .flex(Flex::Start)
            .spacing(1)
            .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        Line::from(self.button("Play", "p", Selection::PlayButton))
            .centered()
            .render(play_area, buf);

        let [options_area] = Layout::horizontal([OptionsMenu::WIDTH])
            .flex(Flex::Center)
            .areas(options_area);
        (&self.options).render(options_area, buf);

        let mut buttons = self.button("High Scores", "h", Selection::ScoresButton);
        buttons.push(Span::raw("  "));
        buttons.extend(self.button("Classic", "c", Selection::ClassicButton));
        buttons.push(Span::raw("  "));
        buttons.extend(self.button("Quit", "q", Selection::QuitButton));
        Line::from(buttons).centered().render(buttons_area, buf);

        if let Some(ref warning) = self.warning {
            warning.render(display, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Selection {
    #[default]
    PlayButton,
    Options,
    ScoresButton,
    ClassicButton,
    QuitButton,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct OptionsMenu {
    /// If the currently-selected main menu item is an element of this menu,
    /// then `selection` is `Some(key)`, where `key` is the key of the selected
    /// item within the `OptionsMenu`.
    selection: Option<OptKey>,
    settings: EnumMap<OptKey, OptValue>,
}

impl OptionsMenu {
    #[allow(clippy::cast_possible_truncation)]
    const HEIGHT: u16 = (OptKey::LENGTH as u16) + 2 /* for border */;
    const HORIZONTAL_PADDING: u16 = 1; // padding on each side
    const POINTER_WIDTH: u16 = 2;
    const LABEL_VALUE_GUTTER: u16 = 2;
    const WIDTH: u16 = 2 /* for border */ + 2 * Self::HORIZONTAL_PADDING + Self::POINTER_WIDTH + OptKey::DISPLAY_WIDTH + Self::LABEL_VALUE_GUTTER + OptValue::DISPLAY_WIDTH;

    fn new(options: Options) -> Self {
        let settings = EnumMap::from_iter(OptKey::iter().map(|key| (key, options.get(key))));
        OptionsMenu {
            selection: None,
            settings,
        }
    }

    fn to_options(&self) -> Options {
        let mut opts = Options::default();
        for key in OptKey::iter() {
            opts.set(key, self.settings[key]);
        }
        opts
    }

    fn move_up(&mut self) -> Option<Selection> {
        self.selection = self.selection?.prev();
        self.selection.is_none().then_some(Selection::PlayButton)
    }

    fn move_down(&mut self) -> Option<Selection> {
        self.selection = self.selection?.next();
        self.selection.is_none().then_some(Selection::ScoresButton)
    }

    fn move_left(&mut self) {
        if let Some(sel) = self.selection {
            self.settings[sel].decrease();
        }
    }

    fn move_right(&mut self) {
        if let Some(sel) = self.selection {
            self.settings[sel].increase();
        }
    }

    fn toggle(&mut self) {
        if let Some(sel) = self.selection {
            self.settings[sel].toggle();
        }
    }
}

impl Widget for &OptionsMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Options: ")
            .padding(Padding::horizontal(OptionsMenu::HORIZONTAL_PADDING));
        let menu_area = block.inner(area);
        block.render(area, buf);
        for ((key, value), row) in OptKey::iter()
            .map(|key| (key, self.settings[key]))
            .zip(menu_area.rows())
        {
            let selected = Some(key) == self.selection;
            let style = if selected {
                consts::MENU_SELECTION_STYLE
            } else {
                Style::new()
            };
            let s = format!(
                "{pointer:pwidth$}{key:lwidth$}{space:gutter$}{value}",
                pointer = if selected { "»" } else { "" },
                pwidth = usize::from(OptionsMenu::POINTER_WIDTH),
                lwidth = usize::from(OptKey::DISPLAY_WIDTH),
                space = "",
                gutter = usize::from(OptionsMenu::LABEL_VALUE_GUTTER),
            );
            Span::styled(s, style).render(row, buf);
        }
    }
}
