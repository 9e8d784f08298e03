use crate::consts;
use crate::theme::ThemeId;
use crate::util::{data_dir, load_json, save_json, LoadError, SaveError};
use chrono::{Local, NaiveDateTime};
use enum_map::EnumMap;
use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// The top scores achieved in each theme, best first
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct HighScores(EnumMap<ThemeId, Vec<ScoreEntry>>);

impl HighScores {
    /// Return the default high scores file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        data_dir().map(|p| p.join("high_scores.json"))
    }

    /// Read high scores from `path`.  A missing file yields an empty table.
    pub(crate) fn load(path: &Path) -> Result<HighScores, LoadError> {
        load_json::<HighScores>(path, "high scores").map(Option::unwrap_or_default)
    }

    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        save_json(self, path, "high scores")
    }

    pub(crate) fn get(&self, theme: ThemeId) -> &[ScoreEntry] {
        &self.0[theme]
    }

    /// Return the best score for `theme`, if any
    #[cfg(test)]
    pub(crate) fn best(&self, theme: ThemeId) -> Option<u32> {
        self.0[theme].first().map(|e| e.score)
    }

    /// Would `score` earn a place in the table for `theme`?
    pub(crate) fn qualifies(&self, theme: ThemeId, score: u32) -> bool {
        let entries = &self.0[theme];
        entries.len() < consts::MAX_HIGH_SCORES || entries.last().is_some_and(|e| score > e.score)
    }

    /// Insert `entry` into the table for `theme`, keeping the table sorted &
    /// truncated.  An entry that ties an existing score is placed after it.
    pub(crate) fn record(&mut self, theme: ThemeId, entry: ScoreEntry) {
        let entries = &mut self.0[theme];
        let i = entries.partition_point(|e| e.score >= entry.score);
        entries.insert(i, entry);
        entries.truncate(consts::MAX_HIGH_SCORES);
    }
}

impl Serialize for HighScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .filter(|(_, entries)| !entries.is_empty())
                .map(|(theme, entries)| (theme.key(), entries)),
        )
    }
}

impl<'de> Deserialize<'de> for HighScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, Vec<ScoreEntry>>::deserialize(deserializer)?;
        let mut scores = HighScores::default();
        for (key, mut entries) in raw {
            let Some(theme) = ThemeId::from_key(&key) else {
                warn!(theme = %key, "Ignoring high scores for unknown theme");
                continue;
            };
            entries.sort_by(|a, b| b.score.cmp(&a.score));
            entries.truncate(consts::MAX_HIGH_SCORES);
            scores.0[theme] = entries;
        }
        Ok(scores)
    }
}

/// A single row of a high score table
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct ScoreEntry {
    pub(crate) score: u32,
    pub(crate) player: String,
    pub(crate) date: NaiveDateTime,
    pub(crate) food_eaten: u32,
    pub(crate) bonus_eaten: u32,
}

impl ScoreEntry {
    /// Create an entry dated to the current local time
    pub(crate) fn now(score: u32, player: &str, food_eaten: u32, bonus_eaten: u32) -> ScoreEntry {
        ScoreEntry {
            score,
            player: player.to_owned(),
            date: Local::now().naive_local(),
            food_eaten,
            bonus_eaten,
        }
    }
}
