//! wolfbot: message interpretation and role pool for a werewolf game bot.

pub mod channels;
pub mod config;
pub mod error;
pub mod handler;
pub mod interpretation;
pub mod setup;
pub mod store;
