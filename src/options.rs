use crate::theme::ThemeId;
use crate::util::{data_dir, load_json, save_json, EnumExt, LoadError, SaveError};
use enum_dispatch::enum_dispatch;
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::error;

/// Gameplay options chosen on the main menu
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub(crate) struct Options {
    pub(crate) theme: ThemeId,
    pub(crate) mix_mode: bool,
}

impl Options {
    /// Return the default options file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        data_dir().map(|p| p.join("options.json"))
    }

    /// Read options from `path`.  Returns `Ok(None)` if the file does not
    /// exist.
    pub(crate) fn load(path: &Path) -> Result<Option<Options>, LoadError> {
        load_json(path, "options")
    }

    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        save_json(self, path, "options")
    }

    pub(crate) fn get(&self, key: OptKey) -> OptValue {
        match key {
            OptKey::Theme => self.theme.into(),
            OptKey::MixMode => self.mix_mode.into(),
        }
    }

    pub(crate) fn set(&mut self, key: OptKey, value: OptValue) {
        match (key, value) {
            (OptKey::Theme, OptValue::ThemeId(theme)) => self.theme = theme,
            (OptKey::MixMode, OptValue::Bool(b)) => self.mix_mode = b,
            (key, value) => error!(?key, ?value, "Option value has wrong type for key"),
        }
    }
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum OptKey {
    Theme,
    MixMode,
}

impl OptKey {
    pub(crate) const DISPLAY_WIDTH: u16 = 8;

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OptKey::Theme => "Theme",
            OptKey::MixMode => "Mix Mode",
        }
    }
}

impl fmt::Display for OptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[enum_dispatch]
pub(crate) trait Adjustable {
    fn increase(&mut self);
    fn decrease(&mut self);
    fn toggle(&mut self);
    fn can_increase(&self) -> bool;
    fn can_decrease(&self) -> bool;
}

#[enum_dispatch(Adjustable)] // This also gives us From and TryInto
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OptValue {
    Bool(bool),
    ThemeId,
}

impl OptValue {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;
}

// This is needed for EnumMap to be convenient to construct.
impl Default for OptValue {
    fn default() -> OptValue {
        OptValue::Bool(false)
    }
}

impl fmt::Display for OptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OptValue::Bool(false) => write!(f, "   [ ]    "),
            OptValue::Bool(true) => write!(f, "   [✓]    "),
            OptValue::ThemeId(theme) => {
                write!(
                    f,
                    "{left} {theme:^6} {right}",
                    left = if theme.can_decrease() { '◀' } else { '◁' },
                    right = if theme.can_increase() { '▶' } else { '▷' }
                )
            }
        }
    }
}

impl Adjustable for bool {
    fn increase(&mut self) {
        *self = true;
    }

    fn decrease(&mut self) {
        *self = false;
    }

    fn toggle(&mut self) {
        *self = !*self;
    }

    fn can_increase(&self) -> bool {
        !*self
    }

    fn can_decrease(&self) -> bool {
        *self
    }
}

impl Adjustable for ThemeId {
    fn increase(&mut self) {
        if let Some(t) = self.next() {
            *self = t;
        }
    }

    fn decrease(&mut self) {
        if let Some(t) = self.prev() {
            *self = t;
        }
    }

    /// Cycle through the themes, wrapping around at the end
    fn toggle(&mut self) {
        *self = self.next().unwrap_or_else(ThemeId::min);
    }

    fn can_increase(&self) -> bool {
        *self != ThemeId::max()
    }

    fn can_decrease(&self) -> bool {
        *self != ThemeId::min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod opt_key {
        use super::*;

        #[test]
        fn display_width() {
            let actual_width = OptKey::iter()
                .map(|key| key.as_str().chars().count())
                .max()
                .unwrap();
            assert_eq!(actual_width, usize::from(OptKey::DISPLAY_WIDTH));
        }

        #[test]
        fn fmt_width() {
            assert_eq!(
                format!(
                    "{:width$}",
                    OptKey::Theme,
                    width = usize::from(OptKey::DISPLAY_WIDTH)
                ),
                "Theme   "
            );
        }
    }

    mod opt_value {
        use super::*;

        #[test]
        fn display_width() {
            let actual_width = [OptValue::Bool(false), OptValue::Bool(true)]
                .into_iter()
                .chain(ThemeId::iter().map(OptValue::from))
                .map(|value| value.to_string().chars().count())
                .max()
                .unwrap();
            assert_eq!(actual_width, usize::from(OptValue::DISPLAY_WIDTH));
        }

        #[test]
        fn theme_arrows() {
            assert_eq!(OptValue::from(ThemeId::Forest).to_string(), "◁ Forest ▶");
            assert_eq!(OptValue::from(ThemeId::Sea).to_string(), "◀  Sea   ▶");
            assert_eq!(OptValue::from(ThemeId::Hill).to_string(), "◀  Hill  ▷");
        }
    }

    mod theme_id {
        use super::*;

        #[test]
        fn adjust_stops_at_ends() {
            let mut theme = ThemeId::Desert;
            theme.increase();
            assert_eq!(theme, ThemeId::Hill);
            theme.increase();
            assert_eq!(theme, ThemeId::Hill);
            theme.toggle();
            assert_eq!(theme, ThemeId::Forest);
            theme.decrease();
            assert_eq!(theme, ThemeId::Forest);
        }
    }

    #[test]
    fn set_and_get() {
        let mut opts = Options::default();
        opts.set(OptKey::Theme, OptValue::ThemeId(ThemeId::Snow));
        opts.set(OptKey::MixMode, OptValue::Bool(true));
        assert_eq!(
            opts,
            Options {
                theme: ThemeId::Snow,
                mix_mode: true
            }
        );
        assert_eq!(opts.get(OptKey::Theme), OptValue::ThemeId(ThemeId::Snow));
        // Mismatched values are ignored
        opts.set(OptKey::MixMode, OptValue::ThemeId(ThemeId::Sea));
        assert!(opts.mix_mode);
    }

    #[test]
    fn json_format() {
        let opts = Options {
            theme: ThemeId::Sea,
            mix_mode: false,
        };
        assert_eq!(
            serde_json::to_string(&opts).unwrap(),
            r#"{"theme":"sea","mix_mode":false}"#
        );
        let parsed: Options = serde_json::from_str(r#"{"mix_mode": true}"#).unwrap();
        assert_eq!(
            parsed,
            Options {
                theme: ThemeId::Forest,
                mix_mode: true
            }
        );
    }

    #[test]
    fn save_and_load() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("options.json");
        assert_eq!(Options::load(&path).unwrap(), None);
        let opts = Options {
            theme: ThemeId::Desert,
            mix_mode: true,
        };
        opts.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), Some(opts));
    }
}
