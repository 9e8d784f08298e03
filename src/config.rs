use crate::consts;
use crate::highscores::HighScores;
use crate::options::Options;
use crate::theme::ThemeId;
use crate::util::{data_dir, LoadError, SaveError};
use ratatui::{layout::Size, style::Style};
use serde::{Deserialize, Deserializer};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Name recorded alongside high scores
    #[serde(default)]
    pub(crate) player: PlayerName,

    /// Default options when no options file is present
    #[serde(default)]
    pub(crate) options: Options,

    /// Size of the themed game's board
    #[serde(default)]
    pub(crate) board: BoardConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,

    /// Per-theme style overrides
    #[serde(default)]
    pub(crate) themes: HashMap<ThemeId, ThemeStyles>,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("snake-odyssey").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the filepath at which gameplay options should be stored: the
    /// file given in the configuration or, if that is not set, the default
    /// options file path.  Return `None` if no path is present in the
    /// configuration and the default path could not be computed.
    fn options_file(&self) -> Option<Cow<'_, Path>> {
        self.files
            .options_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| Options::default_path().map(Cow::from))
    }

    /// Return the filepath at which high scores are stored
    pub(crate) fn high_scores_file(&self) -> Option<PathBuf> {
        self.files
            .high_scores_file
            .clone()
            .or_else(HighScores::default_path)
    }

    /// Return the filepath to which logs should be written, or `None` if
    /// logging is disabled or no path could be determined
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        match self.files.log_file {
            LogFile::Default => data_dir().map(|p| p.join("snake-odyssey.log")),
            LogFile::Disabled => None,
            LogFile::Path(ref p) => Some(p.clone()),
        }
    }

    /// Return a configuration that keeps all data files inside `dir`
    #[cfg(test)]
    pub(crate) fn for_testing(dir: &Path) -> Config {
        Config {
            files: FileConfig {
                options_file: Some(dir.join("options.json")),
                save_options: true,
                high_scores_file: Some(dir.join("high_scores.json")),
                log_file: LogFile::Disabled,
            },
            ..Config::default()
        }
    }

    /// Return the style overrides configured for `theme`, if any
    pub(crate) fn theme_styles(&self, theme: ThemeId) -> Option<&ThemeStyles> {
        self.themes.get(&theme)
    }

    /// Load gameplay options from a file.  If the file does not exist, `self.options`
    /// is returned.
    ///
    /// If `self.files.save_options` is `false`, `self.options` is returned
    /// without reading anything from disk.
    pub(crate) fn load_options(&self) -> Result<Options, LoadError> {
        let r = if !self.files.save_options {
            Ok(None)
        } else if let Some(p) = self.options_file() {
            Options::load(&p)
        } else {
            Err(LoadError::no_path("options"))
        };
        match r {
            Ok(Some(opts)) => Ok(opts),
            Ok(None) => Ok(self.options),
            Err(e) => Err(e),
        }
    }

    /// Save the given gameplay options to a file.
    ///
    /// If `self.files.save_options` is `false`, nothing is saved.
    pub(crate) fn save_options(&self, options: Options) -> Result<(), SaveError> {
        if !self.files.save_options {
            return Ok(());
        }
        if let Some(p) = self.options_file() {
            options.save(&p)
        } else {
            Err(SaveError::no_path("options"))
        }
    }
}

/// A player name, cleaned up for display in the high score table
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(from = "String")]
pub(crate) struct PlayerName(String);

impl PlayerName {
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PlayerName {
    fn default() -> PlayerName {
        PlayerName(String::from(consts::DEFAULT_PLAYER))
    }
}

impl From<String> for PlayerName {
    fn from(s: String) -> PlayerName {
        let cleaned = s
            .chars()
            .filter(|ch| {
                !matches!(
                    ch.general_category(),
                    GeneralCategory::Control | GeneralCategory::Format
                )
            })
            .collect::<String>();
        let mut name = String::new();
        let mut width = 0;
        for g in cleaned.trim().graphemes(true) {
            width += g.width();
            if width > consts::MAX_PLAYER_WIDTH {
                break;
            }
            name.push_str(g);
        }
        let name = name.trim_end();
        if name.is_empty() {
            PlayerName::default()
        } else {
            PlayerName(name.to_owned())
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawBoardConfig")]
pub(crate) struct BoardConfig {
    size: Size,
}

impl BoardConfig {
    pub(crate) fn size(&self) -> Size {
        self.size
    }
}

impl Default for BoardConfig {
    fn default() -> BoardConfig {
        BoardConfig {
            size: consts::DEFAULT_BOARD_SIZE,
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default)]
struct RawBoardConfig {
    width: u16,
    height: u16,
}

impl Default for RawBoardConfig {
    fn default() -> RawBoardConfig {
        RawBoardConfig {
            width: consts::DEFAULT_BOARD_SIZE.width,
            height: consts::DEFAULT_BOARD_SIZE.height,
        }
    }
}

impl TryFrom<RawBoardConfig> for BoardConfig {
    type Error = BoardSizeError;

    fn try_from(value: RawBoardConfig) -> Result<BoardConfig, BoardSizeError> {
        let min = consts::MIN_BOARD_SIZE;
        let max = consts::MAX_BOARD_SIZE;
        if !(min.width..=max.width).contains(&value.width) {
            return Err(BoardSizeError::Width(value.width));
        }
        if !(min.height..=max.height).contains(&value.height) {
            return Err(BoardSizeError::Height(value.height));
        }
        Ok(BoardConfig {
            size: Size::new(value.width, value.height),
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum BoardSizeError {
    #[error(
        "board width {0} is outside the allowed range of {min} to {max}",
        min = consts::MIN_BOARD_SIZE.width,
        max = consts::MAX_BOARD_SIZE.width
    )]
    Width(u16),
    #[error(
        "board height {0} is outside the allowed range of {min} to {max}",
        min = consts::MIN_BOARD_SIZE.height,
        max = consts::MAX_BOARD_SIZE.height
    )]
    Height(u16),
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(from = "RawFileConfig")]
pub(crate) struct FileConfig {
    /// Path at which gameplay options should be stored
    options_file: Option<PathBuf>,

    /// Whether to load & save gameplay options in a file
    save_options: bool,

    /// Path at which high scores should be stored
    high_scores_file: Option<PathBuf>,

    log_file: LogFile,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig::from(RawFileConfig::default())
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawFileConfig {
    options_file: Option<PathBuf>,
    save_options: bool,
    high_scores_file: Option<PathBuf>,
    log_file: LogFile,
}

impl Default for RawFileConfig {
    fn default() -> RawFileConfig {
        RawFileConfig {
            options_file: None,
            save_options: true,
            high_scores_file: None,
            log_file: LogFile::Default,
        }
    }
}

impl From<RawFileConfig> for FileConfig {
    fn from(value: RawFileConfig) -> FileConfig {
        FileConfig {
            options_file: value.options_file,
            save_options: value.save_options,
            high_scores_file: value.high_scores_file,
            log_file: value.log_file,
        }
    }
}

/// Where to write logs
#[derive(Clone, Debug, Default, Eq, PartialEq)]
enum LogFile {
    /// Use the file in the local data directory
    #[default]
    Default,
    Disabled,
    Path(PathBuf),
}

impl<'de> Deserialize<'de> for LogFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<LogFile, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Enabled(bool),
            Path(PathBuf),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Enabled(true) => LogFile::Default,
            Raw::Enabled(false) => LogFile::Disabled,
            Raw::Path(p) => LogFile::Path(p),
        })
    }
}

/// Styles that replace parts of a theme's built-in palette
#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(from = "RawThemeStyles")]
pub(crate) struct ThemeStyles {
    pub(crate) board: Option<Style>,
    pub(crate) snake: Option<Style>,
    pub(crate) food: Option<Style>,
    pub(crate) accent: Option<Style>,
    pub(crate) obstacle: Option<Style>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawThemeStyles {
    board: Option<parse_style::Style>,
    snake: Option<parse_style::Style>,
    food: Option<parse_style::Style>,
    accent: Option<parse_style::Style>,
    obstacle: Option<parse_style::Style>,
}

impl From<RawThemeStyles> for ThemeStyles {
    fn from(value: RawThemeStyles) -> ThemeStyles {
        ThemeStyles {
            board: value.board.map(Into::into),
            snake: value.snake.map(Into::into),
            food: value.food.map(Into::into),
            accent: value.accent.map(Into::into),
            obstacle: value.obstacle.map(Into::into),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
