//! Lookup tables injected into the recognizers.
//!
//! The bot does not own these: role names, the emoji glyph set and the
//! emoji-to-player assignments all come from configuration or game state.

use std::collections::{HashMap, HashSet};

/// Platform identifier of a game participant.
pub type ParticipantId = u64;

/// The role names a message may refer to.
#[derive(Debug, Clone, Default)]
pub struct RoleNames {
    names: HashSet<String>,
}

impl RoleNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, token: &str) -> bool {
        self.names.contains(token)
    }
}

/// Recognized emoji glyphs.
#[derive(Debug, Clone, Default)]
pub struct EmojiSet {
    glyphs: HashSet<String>,
}

impl EmojiSet {
    pub fn new<I, S>(glyphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            glyphs: glyphs.into_iter().map(Into::into).collect(),
        }
    }

    /// Every glyph in the Unicode emoji database, skin tone variants included.
    pub fn unicode() -> Self {
        Self::new(
            emojis::iter()
                .flat_map(|e| std::iter::once(e).chain(e.skin_tones().into_iter().flatten()))
                .map(|e| e.as_str()),
        )
    }

    /// Parse a newline-separated glyph list. Blank lines are skipped.
    pub fn from_lines(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        )
    }

    pub fn contains(&self, token: &str) -> bool {
        self.glyphs.contains(token)
    }
}

/// Emoji glyph → participant assignments for the current game.
#[derive(Debug, Clone, Default)]
pub struct PlayerEmojis {
    by_glyph: HashMap<String, ParticipantId>,
}

impl PlayerEmojis {
    pub fn new<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, ParticipantId)>,
        S: Into<String>,
    {
        Self {
            by_glyph: pairs.into_iter().map(|(g, id)| (g.into(), id)).collect(),
        }
    }

    /// The participant a token stands for, if any.
    pub fn participant(&self, token: &str) -> Option<ParticipantId> {
        self.by_glyph.get(token).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_are_case_sensitive() {
        let roles = RoleNames::new(["Werewolf", "Innocent"]);
        assert!(roles.contains("Werewolf"));
        assert!(!roles.contains("werewolf"));
        assert!(!roles.contains("Seer"));
    }

    #[test]
    fn emoji_set_from_lines() {
        let set = EmojiSet::from_lines("🍎\n\n  🐺 \n");
        assert!(set.contains("🍎"));
        assert!(set.contains("🐺"));
        assert!(!set.contains(""));
    }

    #[test]
    fn unicode_set_recognizes_whole_glyphs() {
        let set = EmojiSet::unicode();
        for glyph in ["😃", "🐷", "🐺", "👍", "👍🏽"] {
            assert!(set.contains(glyph), "{glyph} should be recognized");
        }
        for not_emoji in ["", "a", "5", "🐷🐷", ":pig:"] {
            assert!(!set.contains(not_emoji), "{not_emoji:?} is not one glyph");
        }
    }

    #[test]
    fn player_emojis_lookup() {
        let players = PlayerEmojis::new([("🍎", 11), ("🍌", 22)]);
        assert_eq!(players.participant("🍎"), Some(11));
        assert_eq!(players.participant("🍌"), Some(22));
        assert_eq!(players.participant("🍒"), None);
    }
}
