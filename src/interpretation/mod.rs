//! Message interpretation: turns chat text into typed game tokens.

pub mod command;
pub mod extract;
pub mod integer;
pub mod message;
pub mod recognizers;
pub mod tables;

pub use command::CommandMatcher;
pub use extract::{Amount, Recognizer, Request};
pub use message::Message;
pub use tables::{EmojiSet, ParticipantId, PlayerEmojis, RoleNames};

use crate::error::Insufficient;
use recognizers::{Emojis, Integers, Participants, Roles};

/// Entry points for every extraction kind plus command matching.
///
/// Holds the injected lookup tables. All methods are pure and may be
/// called from any number of message handlers at once.
#[derive(Debug, Clone)]
pub struct Interpreter {
    commands: CommandMatcher,
    roles: RoleNames,
    emojis: EmojiSet,
    players: PlayerEmojis,
}

impl Interpreter {
    pub fn new(
        prefix: impl Into<String>,
        roles: RoleNames,
        emojis: EmojiSet,
        players: PlayerEmojis,
    ) -> Self {
        Self {
            commands: CommandMatcher::new(prefix),
            roles,
            emojis,
            players,
        }
    }

    pub fn prefix(&self) -> &str {
        self.commands.prefix()
    }

    /// Mentioned participants followed by emoji-addressed ones. Dedups by default.
    pub fn extract_participants(
        &self,
        message: &Message,
        request: Request,
    ) -> Result<Vec<ParticipantId>, Insufficient> {
        extract::extract(
            &Participants {
                players: &self.players,
            },
            message,
            request,
        )
    }

    /// Integer literals. Keeps duplicates by default.
    pub fn extract_integers(
        &self,
        message: &Message,
        request: Request,
    ) -> Result<Vec<i64>, Insufficient> {
        extract::extract(&Integers, message, request)
    }

    /// Recognized emoji glyphs. Dedups by default.
    pub fn extract_emojis(
        &self,
        message: &Message,
        request: Request,
    ) -> Result<Vec<String>, Insufficient> {
        extract::extract(&Emojis { set: &self.emojis }, message, request)
    }

    /// Configured role names. Keeps duplicates by default.
    pub fn extract_roles(
        &self,
        message: &Message,
        request: Request,
    ) -> Result<Vec<String>, Insufficient> {
        extract::extract(&Roles { names: &self.roles }, message, request)
    }

    pub fn is_command<S: AsRef<str>>(&self, message: &Message, aliases: &[S], help: bool) -> bool {
        self.commands.is_command(&message.content, aliases, help)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn interpreter() -> Interpreter {
        Interpreter::new(
            "!",
            RoleNames::new(["Werewolf", "Innocent", "Seer"]),
            EmojiSet::new(["🍎", "🍌", "🐺"]),
            PlayerEmojis::new([("🍎", 100), ("🍌", 200)]),
        )
    }

    #[test]
    fn integers_keep_duplicates() {
        let msg = Message::new("5 10 5 apple");
        assert_eq!(
            interpreter().extract_integers(&msg, Request::all()),
            Ok(vec![5, 10, 5])
        );
    }

    #[test]
    fn participants_without_candidates() {
        let msg = Message::new("hello world");
        assert_eq!(
            interpreter().extract_participants(&msg, Request::count(2)),
            Err(Insufficient {
                required: 2,
                found: 0
            })
        );
    }

    #[test]
    fn participants_dedup_mentions_and_emojis() {
        let msg = Message::new("!vote 🍎 🍌 🍎").with_mentions([100, 300]);
        let got: HashSet<_> = interpreter()
            .extract_participants(&msg, Request::all())
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(got, HashSet::from([100, 200, 300]));
    }

    #[test]
    fn participants_without_dedup_keep_order() {
        let msg = Message::new("🍎 🍌").with_mentions([100]);
        assert_eq!(
            interpreter().extract_participants(&msg, Request::count(2).deduplicate(false)),
            Ok(vec![100, 100])
        );
    }

    #[test]
    fn emojis_dedup_by_default() {
        let msg = Message::new("🐺 🐺 🍎 x");
        let got = interpreter().extract_emojis(&msg, Request::all()).unwrap();
        assert_eq!(got.len(), 2);
        assert!(got.contains(&"🐺".to_string()));
        assert!(got.contains(&"🍎".to_string()));
    }

    #[test]
    fn roles_are_exact_tokens() {
        let msg = Message::new("!assign Seer werewolf Werewolf Seer");
        assert_eq!(
            interpreter().extract_roles(&msg, Request::all()),
            Ok(vec!["Seer".to_string(), "Werewolf".into(), "Seer".into()])
        );
        assert_eq!(
            interpreter().extract_roles(&msg, Request::count(1)),
            Ok(vec!["Seer".to_string()])
        );
    }

    #[test]
    fn command_on_message() {
        let interp = interpreter();
        assert!(interp.is_command(&Message::new("!kill 5"), &["kill", "k"], false));
        assert!(!interp.is_command(&Message::new("kill 5"), &["kill"], false));
    }
}
