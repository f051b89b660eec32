//! Configuration types, built from environment variables.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::interpretation::{EmojiSet, Interpreter, ParticipantId, PlayerEmojis, RoleNames};

/// Roles known to the game when `WOLFBOT_ROLES` is not set.
pub const DEFAULT_ROLES: &[&str] = &[
    "Innocent",
    "Werewolf",
    "Seer",
    "Witch",
    "Hunter",
    "Cupid",
    "Cursed Civilian",
];

/// Bot configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Command prefix, e.g. `!` in `!vote`.
    pub prefix: String,
    /// Location of the game database.
    pub db_path: PathBuf,
    pub roles: Vec<String>,
    pub player_emojis: Vec<(String, ParticipantId)>,
    /// Newline-separated glyph list replacing the Unicode emoji set.
    pub emoji_file: Option<PathBuf>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prefix: "!".to_string(),
            db_path: PathBuf::from("./data/game.db"),
            roles: DEFAULT_ROLES.iter().map(|r| r.to_string()).collect(),
            player_emojis: Vec::new(),
            emoji_file: None,
        }
    }
}

impl BotConfig {
    /// Build config from `WOLFBOT_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let prefix = match lookup("WOLFBOT_PREFIX") {
            Some(p) if p.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    key: "WOLFBOT_PREFIX".into(),
                    message: "prefix must not be empty".into(),
                });
            }
            Some(p) => p.trim().to_string(),
            None => defaults.prefix,
        };

        let db_path = lookup("WOLFBOT_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let roles = match lookup("WOLFBOT_ROLES") {
            Some(list) => split_list(&list),
            None => defaults.roles,
        };

        let player_emojis = match lookup("WOLFBOT_PLAYER_EMOJIS") {
            Some(list) => parse_player_emojis(&list)?,
            None => Vec::new(),
        };

        let emoji_file = lookup("WOLFBOT_EMOJI_FILE").map(PathBuf::from);

        Ok(Self {
            prefix,
            db_path,
            roles,
            player_emojis,
            emoji_file,
        })
    }

    /// Load the emoji glyph set, reading `emoji_file` if one is configured.
    pub fn emoji_set(&self) -> Result<EmojiSet, ConfigError> {
        match &self.emoji_file {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                Ok(EmojiSet::from_lines(&text))
            }
            None => Ok(EmojiSet::unicode()),
        }
    }

    /// Build the interpreter with this configuration's lookup tables.
    pub fn interpreter(&self) -> Result<Interpreter, ConfigError> {
        Ok(Interpreter::new(
            self.prefix.clone(),
            RoleNames::new(self.roles.iter().cloned()),
            self.emoji_set()?,
            PlayerEmojis::new(self.player_emojis.iter().cloned()),
        ))
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse `glyph=id` pairs separated by commas.
fn parse_player_emojis(list: &str) -> Result<Vec<(String, ParticipantId)>, ConfigError> {
    split_list(list)
        .into_iter()
        .map(|pair| {
            let invalid = |message: String| ConfigError::InvalidValue {
                key: "WOLFBOT_PLAYER_EMOJIS".into(),
                message,
            };
            let (glyph, id) = pair
                .split_once('=')
                .ok_or_else(|| invalid(format!("expected glyph=id, got {pair:?}")))?;
            let id = id
                .trim()
                .parse::<ParticipantId>()
                .map_err(|e| invalid(format!("bad participant id in {pair:?}: {e}")))?;
            Ok((glyph.trim().to_string(), id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::interpretation::{Message, Request};

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = BotConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.prefix, "!");
        assert_eq!(config.db_path, PathBuf::from("./data/game.db"));
        assert!(config.roles.iter().any(|r| r == "Werewolf"));
        assert!(config.player_emojis.is_empty());
        assert!(config.emoji_file.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = BotConfig::from_lookup(lookup(&[
            ("WOLFBOT_PREFIX", "ww."),
            ("WOLFBOT_DB_PATH", "/tmp/x.db"),
            ("WOLFBOT_ROLES", "Seer, Werewolf,,"),
            ("WOLFBOT_PLAYER_EMOJIS", "🍎=1, 🍌 = 2"),
        ]))
        .unwrap();
        assert_eq!(config.prefix, "ww.");
        assert_eq!(config.db_path, PathBuf::from("/tmp/x.db"));
        assert_eq!(config.roles, vec!["Seer", "Werewolf"]);
        assert_eq!(
            config.player_emojis,
            vec![("🍎".to_string(), 1), ("🍌".to_string(), 2)]
        );
    }

    #[test]
    fn rejects_bad_player_emojis() {
        for bad in ["🍎", "🍎=abc", "🍎=-3"] {
            let err = BotConfig::from_lookup(lookup(&[("WOLFBOT_PLAYER_EMOJIS", bad)]))
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { .. }), "{bad}");
        }
    }

    #[test]
    fn rejects_blank_prefix() {
        assert!(BotConfig::from_lookup(lookup(&[("WOLFBOT_PREFIX", "  ")])).is_err());
    }

    #[test]
    fn emoji_file_replaces_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("emoji.txt");
        std::fs::write(&path, "🦄\n🐉\n").unwrap();

        let config = BotConfig {
            emoji_file: Some(path),
            ..BotConfig::default()
        };
        let set = config.emoji_set().unwrap();
        assert!(set.contains("🦄"));
        assert!(set.contains("🐉"));
        assert!(!set.contains("🐺"));
    }

    #[test]
    fn default_emoji_set_covers_unicode() {
        let set = BotConfig::default().emoji_set().unwrap();
        for glyph in ["😃", "🐷", "🐺", "🍎"] {
            assert!(set.contains(glyph), "{glyph} should be recognized");
        }
        assert!(!set.contains("apple"));
    }

    #[test]
    fn missing_emoji_file_is_io_error() {
        let config = BotConfig {
            emoji_file: Some(PathBuf::from("/nonexistent/emoji.txt")),
            ..BotConfig::default()
        };
        assert!(matches!(config.emoji_set(), Err(ConfigError::Io(_))));
    }

    #[test]
    fn interpreter_uses_configured_tables() {
        let config = BotConfig {
            player_emojis: vec![("🍎".into(), 9)],
            ..BotConfig::default()
        };
        let interp = config.interpreter().unwrap();
        let msg = Message::new("!vote 🍎");
        assert_eq!(interp.extract_participants(&msg, Request::all()), Ok(vec![9]));
        assert_eq!(
            interp.extract_emojis(&msg, Request::all()),
            Ok(vec!["🍎".to_string()])
        );
    }
}
