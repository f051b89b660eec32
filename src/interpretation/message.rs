//! Message input as seen by the interpreters.

use crate::interpretation::tables::ParticipantId;

/// Text of a chat message plus the participants the platform says it mentions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub content: String,
    /// Mentioned participants in the order the platform reported them.
    pub mentions: Vec<ParticipantId>,
}

impl Message {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            mentions: Vec::new(),
        }
    }

    pub fn with_mentions(mut self, mentions: impl IntoIterator<Item = ParticipantId>) -> Self {
        self.mentions = mentions.into_iter().collect();
        self
    }

    /// Whitespace-separated tokens of the content.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.content.split_whitespace()
    }
}
