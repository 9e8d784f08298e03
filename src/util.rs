use crate::config::Config;
use crate::consts;
use crate::highscores::HighScores;
use crate::options::Options;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Position, Rect, Size},
    style::Style,
};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// State shared between all screens of the application
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Globals {
    pub(crate) config: Config,
    pub(crate) options: Options,
    pub(crate) high_scores: HighScores,
}

impl Globals {
    /// Write the high score table to the configured location
    pub(crate) fn save_high_scores(&self) -> Result<(), SaveError> {
        let path = self
            .config
            .high_scores_file()
            .ok_or_else(|| SaveError::no_path("high scores"))?;
        self.high_scores.save(&path)
    }
}

/// Return the directory in which the program stores its data files, if it
/// can be determined
pub(crate) fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("snake-odyssey"))
}

pub(crate) trait EnumExt: Enum {
    fn iter() -> impl Iterator<Item = Self>;
    fn min() -> Self;
    fn max() -> Self;
    fn next(self) -> Option<Self>;
    fn prev(self) -> Option<Self>;
}

impl<T: Enum> EnumExt for T {
    fn iter() -> impl Iterator<Item = T> {
        (0..T::LENGTH).map(T::from_usize)
    }

    fn min() -> T {
        T::from_usize(0)
    }

    fn max() -> T {
        T::from_usize(T::LENGTH - 1)
    }

    fn next(self) -> Option<T> {
        let i = self.into_usize() + 1;
        (i < T::LENGTH).then(|| T::from_usize(i))
    }

    fn prev(self) -> Option<T> {
        self.into_usize().checked_sub(1).map(T::from_usize)
    }
}

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a `Rect` of the given size centered within `area`.  If `size` is
/// larger than `area` in either dimension, the result is clamped to `area`.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

/// Format a number with commas between groups of three digits
pub(crate) fn format_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut s = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            s.push(',');
        }
        s.push(ch);
    }
    s
}

/// Render an error and all of its sources as a single line
pub(crate) fn error_chain(e: &dyn std::error::Error) -> String {
    let mut s = e.to_string();
    let mut source = e.source();
    while let Some(src) = source {
        s.push_str(": ");
        s.push_str(&src.to_string());
        source = src.source();
    }
    s
}

/// A view of a rectangular region of a buffer addressed by board-relative
/// positions.  Cells are drawn on top of `base`.
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct Canvas<'a> {
    pub(crate) area: Rect,
    pub(crate) buf: &'a mut Buffer,
    pub(crate) base: Style,
}

impl Canvas<'_> {
    pub(crate) fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        if pos.x >= self.area.width || pos.y >= self.area.height {
            return;
        }
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(self.base).patch(style));
        }
    }
}

/// Read a JSON document from `path`.  Returns `Ok(None)` if the file does not
/// exist.
pub(crate) fn load_json<T: DeserializeOwned>(
    path: &Path,
    what: &'static str,
) -> Result<Option<T>, LoadError> {
    let src = match fs_err::read(path) {
        Ok(src) => src,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(LoadError::new(what, LoadErrorSource::Read(e))),
    };
    serde_json::from_slice(&src)
        .map(Some)
        .map_err(|e| LoadError::new(what, LoadErrorSource::Deserialize(e)))
}

/// Write `value` to `path` as pretty-printed JSON, creating parent directories
/// as needed
pub(crate) fn save_json<T: Serialize>(
    value: &T,
    path: &Path,
    what: &'static str,
) -> Result<(), SaveError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)
            .map_err(|e| SaveError::new(what, SaveErrorSource::Mkdir(e)))?;
    }
    let mut src = serde_json::to_string_pretty(value)
        .map_err(|e| SaveError::new(what, SaveErrorSource::Serialize(e)))?;
    src.push('\n');
    fs_err::write(path, &src).map_err(|e| SaveError::new(what, SaveErrorSource::Write(e)))?;
    Ok(())
}

#[derive(Debug, Error)]
#[error("Failed to save {what} to disk")]
pub(crate) struct SaveError {
    what: &'static str,
    #[source]
    source: SaveErrorSource,
}

impl SaveError {
    fn new(what: &'static str, source: SaveErrorSource) -> Self {
        SaveError { what, source }
    }

    pub(crate) fn no_path(what: &'static str) -> Self {
        SaveError::new(what, SaveErrorSource::NoPath)
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize data")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read {what} from disk")]
pub(crate) struct LoadError {
    what: &'static str,
    #[source]
    source: LoadErrorSource,
}

impl LoadError {
    fn new(what: &'static str, source: LoadErrorSource) -> Self {
        LoadError { what, source }
    }

    pub(crate) fn no_path(what: &'static str) -> Self {
        LoadError::new(what, LoadErrorSource::NoPath)
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize file contents")]
    Deserialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "0")]
    #[case(7, "7")]
    #[case(999, "999")]
    #[case(1000, "1,000")]
    #[case(12345, "12,345")]
    #[case(1_234_567, "1,234,567")]
    fn test_format_thousands(#[case] n: u32, #[case] s: &str) {
        assert_eq!(format_thousands(n), s);
    }

    #[test]
    fn center_rect_in_display() {
        let area = get_display_area(Rect::new(0, 0, 100, 30));
        assert_eq!(area, Rect::new(10, 3, 80, 24));
        assert_eq!(
            center_rect(area, Size::new(20, 4)),
            Rect::new(40, 13, 20, 4)
        );
    }

    #[test]
    fn error_chain_lists_sources() {
        let e = SaveError::no_path("high scores");
        assert_eq!(
            error_chain(&e),
            "Failed to save high scores to disk: failed to determine path to local data directory"
        );
    }

    #[test]
    fn load_missing_json() {
        let tmpdir = tempfile::tempdir().unwrap();
        let r = load_json::<Vec<u32>>(&tmpdir.path().join("nope.json"), "numbers").unwrap();
        assert_eq!(r, None);
    }

    #[test]
    fn save_creates_parents() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("a").join("b").join("numbers.json");
        save_json(&vec![1, 2, 3], &path, "numbers").unwrap();
        let r = load_json::<Vec<u32>>(&path, "numbers").unwrap();
        assert_eq!(r, Some(vec![1, 2, 3]));
    }
}
