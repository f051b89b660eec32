//! Channel trait and the message types that cross it.

use std::pin::Pin;
use std::sync::LazyLock;

use async_trait::async_trait;
use futures::Stream;
use regex::Regex;

use crate::error::ChannelError;
use crate::interpretation::{Message, ParticipantId};

/// Inline mention syntax, `<@123>` or `<@!123>`.
static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<@!?(\d+)>").expect("mention pattern is valid"));

/// A message received from a chat channel.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Name of the channel it arrived on.
    pub channel: String,
    pub sender: String,
    pub message: Message,
}

impl IncomingMessage {
    /// Build a message, lifting inline mentions out of `content`.
    pub fn new(channel: &str, sender: &str, content: &str) -> Self {
        Self {
            channel: channel.to_string(),
            sender: sender.to_string(),
            message: Message::new(content).with_mentions(parse_mentions(content)),
        }
    }
}

/// A reply to send back on the channel a message came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingResponse {
    pub content: String,
}

impl OutgoingResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Stream of inbound messages produced by a channel.
pub type MessageStream = Pin<Box<dyn Stream<Item = IncomingMessage> + Send>>;

/// A source of chat messages and a sink for replies.
#[async_trait]
pub trait Channel: Send + Sync {
    fn name(&self) -> &str;

    /// Start receiving messages.
    async fn start(&self) -> Result<MessageStream, ChannelError>;

    /// Reply to `msg`.
    async fn respond(
        &self,
        msg: &IncomingMessage,
        response: OutgoingResponse,
    ) -> Result<(), ChannelError>;
}

/// Participant ids written inline as mentions, in order of appearance.
///
/// Ids that don't fit a [`ParticipantId`] are skipped.
pub fn parse_mentions(content: &str) -> Vec<ParticipantId> {
    MENTION
        .captures_iter(content)
        .filter_map(|caps| caps[1].parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentions_in_order() {
        assert_eq!(parse_mentions("!kill <@12> and <@!7> <@12>"), vec![12, 7, 12]);
    }

    #[test]
    fn malformed_mentions_ignored() {
        assert!(parse_mentions("<@> <@abc> @5 <12>").is_empty());
        assert!(parse_mentions("<@99999999999999999999999>").is_empty());
    }

    #[test]
    fn incoming_message_carries_mentions() {
        let msg = IncomingMessage::new("cli", "local-user", "!vote <@3>");
        assert_eq!(msg.message.content, "!vote <@3>");
        assert_eq!(msg.message.mentions, vec![3]);
    }
}
