mod app;
mod classic;
mod command;
mod config;
mod consts;
mod direction;
mod game;
mod highscores;
mod logging;
mod menu;
mod options;
mod scores;
mod theme;
mod util;
mod warning;
use crate::app::{App, Screen};
use crate::classic::ClassicLauncher;
use crate::config::Config;
use crate::highscores::HighScores;
use crate::menu::MainMenu;
use crate::util::{error_chain, Globals, LoadError};
use crate::warning::Warning;
use anyhow::Context;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
};
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

const USAGE: &str = "\
Usage: snake-odyssey [--classic] [-c|--config <path>]

Options:
      --classic        Go straight to the classic snake launcher
  -c, --config <path>  Read configuration from the given file
  -h, --help           Show this help and exit
  -V, --version        Show the program version and exit
";

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Cli {
    classic: bool,
    config: Option<PathBuf>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum CliAction {
    Run(Cli),
    Help,
    Version,
}

impl CliAction {
    fn from_parser(mut parser: Parser) -> Result<CliAction, lexopt::Error> {
        let mut cli = Cli::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Long("classic") => cli.classic = true,
                Arg::Short('c') | Arg::Long("config") => {
                    cli.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(CliAction::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(CliAction::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(CliAction::Run(cli))
    }
}

impl Cli {
    /// Load configuration & saved data and return the first screen to show
    fn startup(self) -> anyhow::Result<Screen> {
        let config = match self.config {
            Some(path) => Config::load(&path, false),
            None => Config::default_path().and_then(|path| Config::load(&path, true)),
        }
        .context("Failed to load configuration")?;
        logging::init(&config).context("Failed to set up logging")?;
        info!(version = env!("CARGO_PKG_VERSION"), "Starting snake-odyssey");

        let mut warning = None;
        let options = match config.load_options() {
            Ok(options) => options,
            Err(e) => {
                warn!(error = %error_chain(&e), "Failed to load options; using defaults");
                warning = Some(Warning::from(e));
                config.options
            }
        };
        let high_scores = match config
            .high_scores_file()
            .ok_or_else(|| LoadError::no_path("high scores"))
            .and_then(|path| HighScores::load(&path))
        {
            Ok(high_scores) => high_scores,
            Err(e) => {
                warn!(error = %error_chain(&e), "Failed to load high scores; starting with an empty table");
                if warning.is_none() {
                    warning = Some(Warning::from(e));
                }
                HighScores::default()
            }
        };

        let globals = Globals {
            config,
            options,
            high_scores,
        };
        if self.classic {
            Ok(Screen::Launcher(ClassicLauncher::new(globals)))
        } else {
            Ok(Screen::Main(MainMenu::new(globals).with_warning(warning)))
        }
    }
}

fn main() -> ExitCode {
    let cli = match CliAction::from_parser(Parser::from_env()) {
        Ok(CliAction::Run(cli)) => cli,
        Ok(CliAction::Help) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Ok(CliAction::Version) => {
            println!("snake-odyssey {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("snake-odyssey: {e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    let screen = match cli.startup() {
        Ok(screen) => screen,
        Err(e) => {
            eprintln!("snake-odyssey: {e:?}");
            return ExitCode::from(2);
        }
    };
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableFocusChange)
        .and_then(|()| App::new(screen).run(terminal));
    let _ = execute!(io::stdout(), DisableFocusChange);
    ratatui::restore();
    io_exit(r)
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("snake-odyssey: {e}");
            ExitCode::from(2)
        }
    }
}
