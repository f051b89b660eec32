//! Command dispatch: the glue between channels, interpretation and the role pool.

use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::channels::{Channel, OutgoingResponse};
use crate::error::{DatabaseError, Error};
use crate::interpretation::{Interpreter, Message, Request};
use crate::store::{RoleChange, RoleStore};

/// A command the bot answers to.
struct CommandInfo {
    aliases: &'static [&'static str],
    usage: &'static str,
}

const ADD_ROLE: CommandInfo = CommandInfo {
    aliases: &["addrole", "ar"],
    usage: "addrole <role> [amount]: put copies of a role into the pool",
};
const REMOVE_ROLE: CommandInfo = CommandInfo {
    aliases: &["removerole", "rr"],
    usage: "removerole <role> [amount]: take copies of a role out of the pool",
};
const ROLES: CommandInfo = CommandInfo {
    aliases: &["roles"],
    usage: "roles: show the role pool",
};
const KILL: CommandInfo = CommandInfo {
    aliases: &["kill", "k", "vote"],
    usage: "kill <@player | player emoji>: choose a target",
};
const PICK: CommandInfo = CommandInfo {
    aliases: &["pick"],
    usage: "pick <emoji>...: choose emojis",
};

const COMMANDS: &[&CommandInfo] = &[&ADD_ROLE, &REMOVE_ROLE, &ROLES, &KILL, &PICK];

/// Answers game commands arriving on any channel.
pub struct CommandHandler {
    interpreter: Interpreter,
    store: Arc<dyn RoleStore>,
}

impl CommandHandler {
    pub fn new(interpreter: Interpreter, store: Arc<dyn RoleStore>) -> Self {
        Self { interpreter, store }
    }

    /// Reply text for `message`, or `None` if it isn't a command.
    ///
    /// Storage failures are returned as errors; everything else becomes a reply.
    pub async fn handle(&self, message: &Message) -> Result<Option<String>, DatabaseError> {
        let prefix = self.interpreter.prefix();

        for command in COMMANDS {
            if self.interpreter.is_command(message, command.aliases, true) {
                return Ok(Some(format!("{prefix}{}", command.usage)));
            }
        }

        if self.interpreter.is_command(message, ADD_ROLE.aliases, false) {
            return self.adjust_role(message, 1).await.map(Some);
        }
        if self.interpreter.is_command(message, REMOVE_ROLE.aliases, false) {
            return self.adjust_role(message, -1).await.map(Some);
        }
        if self.interpreter.is_command(message, ROLES.aliases, false) {
            return self.view_roles().await.map(Some);
        }
        if self.interpreter.is_command(message, KILL.aliases, false) {
            return Ok(Some(self.choose_target(message)));
        }
        if self.interpreter.is_command(message, PICK.aliases, false) {
            return Ok(Some(self.pick_emojis(message)));
        }

        debug!(content = %message.content, "Not a command");
        Ok(None)
    }

    async fn adjust_role(&self, message: &Message, sign: i64) -> Result<String, DatabaseError> {
        let Ok(roles) = self.interpreter.extract_roles(message, Request::count(1)) else {
            warn!(content = %message.content, "Role command without a known role");
            return Ok("Which role? Name one of the game's roles.".to_string());
        };
        let role = &roles[0];
        let amount = self
            .interpreter
            .extract_integers(message, Request::count(1))
            .map(|n| n[0])
            .unwrap_or(1);
        if amount < 0 {
            return Ok(format!("The amount must not be negative, got {amount}."));
        }

        let change = match self.store.add_role(role, sign * amount).await {
            Ok(change) => change,
            Err(DatabaseError::Constraint(reason)) => {
                warn!(role = %role, %reason, "Role pool update rejected");
                return Ok(format!("{role} can't hold that many copies."));
            }
            Err(e) => return Err(e),
        };

        let reply = match change {
            RoleChange::Ignored => format!("{role} is not in the pool."),
            RoleChange::Created { amount } | RoleChange::Updated { amount } => {
                format!("{role}: {amount} in the pool.")
            }
            RoleChange::Removed => format!("{role} removed from the pool."),
        };
        Ok(reply)
    }

    async fn view_roles(&self) -> Result<String, DatabaseError> {
        match self.store.view_roles().await {
            Ok(entries) => Ok(entries
                .iter()
                .map(|e| format!("{}: {}", e.role, e.amount))
                .collect::<Vec<_>>()
                .join("\n")),
            Err(DatabaseError::Unsupported(_)) => {
                Ok("Viewing the role pool is not available yet.".to_string())
            }
            Err(e) => Err(e),
        }
    }

    fn choose_target(&self, message: &Message) -> String {
        match self.interpreter.extract_participants(message, Request::count(1)) {
            Ok(targets) => format!("Target: <@{}>", targets[0]),
            Err(_) => "Not enough targets. Mention a player or use their emoji.".to_string(),
        }
    }

    fn pick_emojis(&self, message: &Message) -> String {
        match self.interpreter.extract_emojis(message, Request::all()) {
            Ok(emojis) => format!("Picked {}", emojis.join(" ")),
            Err(_) => "Not enough emojis.".to_string(),
        }
    }
}

/// Serve one channel until its message stream ends.
pub async fn run(handler: &CommandHandler, channel: &dyn Channel) -> Result<(), Error> {
    let mut messages = channel.start().await?;
    info!(channel = channel.name(), "Channel started");

    while let Some(incoming) = messages.next().await {
        let reply = match handler.handle(&incoming.message).await {
            Ok(Some(reply)) => reply,
            Ok(None) => continue,
            Err(e) => {
                tracing::error!(error = %e, sender = %incoming.sender, "Command failed");
                "Something went wrong with the game database.".to_string()
            }
        };
        channel
            .respond(&incoming, OutgoingResponse::text(reply))
            .await?;
    }

    info!(channel = channel.name(), "Channel closed");
    Ok(())
}
