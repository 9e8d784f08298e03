use crate::classic::{ClassicGame, ClassicLauncher};
use crate::game::Game;
use crate::menu::MainMenu;
use crate::scores::ScoresScreen;
use ratatui::{backend::Backend, Terminal};
use std::io;

#[derive(Debug)]
pub(crate) struct App {
    screen: Screen,
}

impl App {
    pub(crate) fn new(screen: Screen) -> App {
        App { screen }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Main(ref menu) => {
                terminal.draw(|frame| menu.draw(frame))?;
            }
            Screen::Game(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Scores(ref scores) => {
                terminal.draw(|frame| scores.draw(frame))?;
            }
            Screen::Launcher(ref launcher) => {
                terminal.draw(|frame| launcher.draw(frame))?;
            }
            Screen::Classic(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        let next = match self.screen {
            Screen::Main(ref mut menu) => menu.process_input()?,
            Screen::Game(ref mut game) => game.process_input()?,
            Screen::Scores(ref mut scores) => scores.process_input()?,
            Screen::Launcher(ref mut launcher) => launcher.process_input()?,
            Screen::Classic(ref mut game) => game.process_input()?,
            Screen::Quit => None,
        };
        if let Some(screen) = next {
            self.screen = screen;
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

/// The screen currently shown, which owns all state for that screen
#[derive(Clone, Debug)]
pub(crate) enum Screen {
    Main(MainMenu),
    Game(Game),
    Scores(ScoresScreen),
    Launcher(ClassicLauncher),
    Classic(ClassicGame),
    Quit,
}
