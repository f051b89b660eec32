//! The four token kinds the game understands.

use crate::interpretation::extract::Recognizer;
use crate::interpretation::integer::parse_int;
use crate::interpretation::message::Message;
use crate::interpretation::tables::{EmojiSet, ParticipantId, PlayerEmojis, RoleNames};

/// Participants: explicit mentions, then emoji tokens assigned to a player.
pub struct Participants<'a> {
    pub players: &'a PlayerEmojis,
}

impl Recognizer for Participants<'_> {
    type Output = ParticipantId;
    const KIND: &'static str = "participant";
    const DEDUPLICATE: bool = true;

    fn recognize(&self, token: &str) -> Option<ParticipantId> {
        self.players.participant(token)
    }

    fn seed(&self, message: &Message) -> Vec<ParticipantId> {
        message.mentions.clone()
    }
}

/// Integer literals.
pub struct Integers;

impl Recognizer for Integers {
    type Output = i64;
    const KIND: &'static str = "integer";
    const DEDUPLICATE: bool = false;

    fn recognize(&self, token: &str) -> Option<i64> {
        parse_int(token)
    }
}

/// Tokens that are exactly one recognized emoji glyph.
pub struct Emojis<'a> {
    pub set: &'a EmojiSet,
}

impl Recognizer for Emojis<'_> {
    type Output = String;
    const KIND: &'static str = "emoji";
    const DEDUPLICATE: bool = true;

    fn recognize(&self, token: &str) -> Option<String> {
        self.set.contains(token).then(|| token.to_string())
    }
}

/// Tokens naming a configured role.
pub struct Roles<'a> {
    pub names: &'a RoleNames,
}

impl Recognizer for Roles<'_> {
    type Output = String;
    const KIND: &'static str = "role";
    const DEDUPLICATE: bool = false;

    fn recognize(&self, token: &str) -> Option<String> {
        self.names.contains(token).then(|| token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpretation::extract::candidates;

    #[test]
    fn participants_put_mentions_first() {
        let players = PlayerEmojis::new([("🍎", 7)]);
        let msg = Message::new("🍎 vote 🍌").with_mentions([3, 5]);
        assert_eq!(candidates(&Participants { players: &players }, &msg), vec![3, 5, 7]);
    }

    #[test]
    fn integers_skip_words() {
        let msg = Message::new("5 10 5 apple");
        assert_eq!(candidates(&Integers, &msg), vec![5, 10, 5]);
    }

    #[test]
    fn emojis_require_whole_token() {
        let set = EmojiSet::new(["🐺"]);
        let msg = Message::new("🐺 🐺! x🐺 🐺");
        assert_eq!(candidates(&Emojis { set: &set }, &msg), vec!["🐺", "🐺"]);
    }

    #[test]
    fn numeric_role_name_is_both_role_and_integer() {
        let names = RoleNames::new(["42"]);
        let msg = Message::new("42");
        assert_eq!(candidates(&Roles { names: &names }, &msg), vec!["42"]);
        assert_eq!(candidates(&Integers, &msg), vec![42]);
    }
}
