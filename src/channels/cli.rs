//! CLI channel: stdin/stdout REPL for local play-testing.

use async_trait::async_trait;
use futures::stream;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use crate::channels::{Channel, IncomingMessage, MessageStream, OutgoingResponse};
use crate::error::ChannelError;

/// Reads one message per stdin line and prints replies to stdout.
///
/// Mentions are typed inline as `<@id>`.
pub struct CliChannel;

impl CliChannel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Channel for CliChannel {
    fn name(&self) -> &str {
        "cli"
    }

    async fn start(&self) -> Result<MessageStream, ChannelError> {
        eprint!("> ");
        Ok(line_messages(BufReader::new(tokio::io::stdin())))
    }

    async fn respond(
        &self,
        _msg: &IncomingMessage,
        response: OutgoingResponse,
    ) -> Result<(), ChannelError> {
        println!("{}", response.content);
        eprint!("> ");
        Ok(())
    }
}

/// One message per non-blank line of `reader`, ending at EOF or on a read error.
fn line_messages<R>(reader: R) -> MessageStream
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    Box::pin(stream::unfold(reader.lines(), next_message))
}

async fn next_message<R>(mut lines: Lines<R>) -> Option<(IncomingMessage, Lines<R>)>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!("Error reading stdin: {e}");
                return None;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            eprint!("> ");
            continue;
        }
        return Some((IncomingMessage::new("cli", "local-user", line), lines));
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::*;

    #[test]
    fn cli_channel_name() {
        assert_eq!(CliChannel::new().name(), "cli");
    }

    #[tokio::test]
    async fn lines_become_messages() {
        let input: &'static [u8] = b"!vote <@42>\n\n   \n  !roles  \n";
        let messages: Vec<IncomingMessage> = line_messages(input).collect().await;

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].channel, "cli");
        assert_eq!(messages[0].sender, "local-user");
        assert_eq!(messages[0].message.content, "!vote <@42>");
        assert_eq!(messages[0].message.mentions, vec![42]);
        assert_eq!(messages[1].message.content, "!roles");
    }

    #[tokio::test]
    async fn empty_input_ends_the_stream() {
        let input: &'static [u8] = b"";
        assert!(line_messages(input).next().await.is_none());
    }
}
