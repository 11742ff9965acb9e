use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// Default number of rows shown on the stats screen.
pub const LEADERBOARD_LIMIT: usize = 15;

/// Fire-and-forget notifications from the movement core. Implementations
/// must not fail back into the simulation.
pub trait StatsSink {
    fn record_death(&mut self, player_id: PlayerId);
    fn record_fruit_collected(&mut self, player_id: PlayerId);
}

/// Lifetime counters for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub fruits_collected: u32,
}

#[derive(Debug)]
pub enum StatsError {
    Io(std::io::Error),
    Encode(toml::ser::Error),
    Decode(toml::de::Error),
}

impl std::fmt::Display for StatsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "stats io error: {e}"),
            Self::Encode(e) => write!(f, "failed to encode stats: {e}"),
            Self::Decode(e) => write!(f, "failed to decode stats: {e}"),
        }
    }
}

impl std::error::Error for StatsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::Decode(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StatsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::ser::Error> for StatsError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Encode(e)
    }
}

impl From<toml::de::Error> for StatsError {
    fn from(e: toml::de::Error) -> Self {
        Self::Decode(e)
    }
}

/// Per-player death and fruit counters, persisted as TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsBook {
    #[serde(default)]
    players: Vec<PlayerStats>,
}

impl StatsBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `path`. A missing or unreadable file yields an empty book,
    /// a malformed one logs a warning and yields an empty book. Never fails,
    /// so a bad stats file cannot keep a level from starting.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(book) => book,
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, starting empty", path.display());
                    Self::default()
                },
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StatsError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, StatsError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, StatsError> {
        Ok(toml::to_string(self)?)
    }

    /// Set the display name for `id`, creating an empty entry if needed.
    pub fn register(&mut self, id: PlayerId, name: &str) {
        self.entry(id).name = name.to_string();
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerStats> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Players ordered by fruit collected (most first), ties broken by name.
    pub fn leaderboard(&self, limit: usize) -> Vec<&PlayerStats> {
        let mut rows: Vec<&PlayerStats> = self.players.iter().collect();
        rows.sort_by(|a, b| {
            b.fruits_collected
                .cmp(&a.fruits_collected)
                .then_with(|| a.name.cmp(&b.name))
        });
        rows.truncate(limit);
        rows
    }

    fn entry(&mut self, id: PlayerId) -> &mut PlayerStats {
        if let Some(idx) = self.players.iter().position(|p| p.id == id) {
            return &mut self.players[idx];
        }
        self.players.push(PlayerStats {
            id,
            name: format!("player{id}"),
            deaths: 0,
            fruits_collected: 0,
        });
        let last = self.players.len() - 1;
        &mut self.players[last]
    }
}

impl StatsSink for StatsBook {
    fn record_death(&mut self, player_id: PlayerId) {
        let entry = self.entry(player_id);
        entry.deaths = entry.deaths.saturating_add(1);
    }

    fn record_fruit_collected(&mut self, player_id: PlayerId) {
        let entry = self.entry(player_id);
        entry.fruits_collected = entry.fruits_collected.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_create_default_entries() {
        let mut book = StatsBook::new();
        book.record_death(3);
        book.record_death(3);
        book.record_fruit_collected(3);

        let p = book.get(3).unwrap();
        assert_eq!(p.name, "player3");
        assert_eq!(p.deaths, 2);
        assert_eq!(p.fruits_collected, 1);
    }

    #[test]
    fn register_keeps_counters() {
        let mut book = StatsBook::new();
        book.record_fruit_collected(1);
        book.register(1, "madeline");
        let p = book.get(1).unwrap();
        assert_eq!(p.name, "madeline");
        assert_eq!(p.fruits_collected, 1);
    }

    #[test]
    fn leaderboard_orders_by_fruit_then_name() {
        let mut book = StatsBook::new();
        book.register(1, "cleo");
        book.register(2, "badeline");
        book.register(3, "theo");
        for _ in 0..3 {
            book.record_fruit_collected(3);
        }
        book.record_fruit_collected(1);
        book.record_fruit_collected(2);

        let names: Vec<&str> = book
            .leaderboard(LEADERBOARD_LIMIT)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["theo", "badeline", "cleo"]);
        assert_eq!(book.leaderboard(1).len(), 1);
    }

    #[test]
    fn toml_text_survives_reload() {
        let mut book = StatsBook::new();
        book.register(7, "granny");
        book.record_death(7);
        let text = book.to_toml_string().unwrap();
        assert!(text.contains("granny"));
        assert_eq!(StatsBook::from_toml_str(&text).unwrap(), book);
    }

    #[test]
    fn malformed_text_is_a_decode_error() {
        let err = StatsBook::from_toml_str("players = 12").unwrap_err();
        assert!(matches!(err, StatsError::Decode(_)));
    }

    #[test]
    fn load_falls_back_to_empty() {
        let dir = std::env::temp_dir().join(format!("ascent-stats-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let missing = StatsBook::load(dir.join("missing.toml"));
        assert_eq!(missing, StatsBook::default());

        let bad = dir.join("bad.toml");
        std::fs::write(&bad, "[[players]]\nid = \"nope\"").unwrap();
        assert_eq!(StatsBook::load(&bad), StatsBook::default());

        let good = dir.join("good.toml");
        let mut book = StatsBook::new();
        book.record_fruit_collected(1);
        book.save(&good).unwrap();
        assert_eq!(StatsBook::load(&good), book);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
