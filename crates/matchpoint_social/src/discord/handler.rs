//! Serenity event handler for the Matchpoint bot.
//!
//! Routes gateway events to the command, reaction, and sync modules. The
//! handler runs without a gateway cache; the bot's own user id is
//! captured from the ready payload so later events can tell self-authored
//! activity apart.

use super::{BotCommand, commands, reactions, sync};
use crate::BotContext;
use serenity::all::{Context, EventHandler, Message, Reaction, Ready, UserId};
use serenity::async_trait;
use serenity::model::gateway::GatewayIntents;
use std::sync::{Arc, OnceLock};
use tracing::{debug, error, info};

/// Event handler for the Matchpoint Discord bot.
///
/// Implements Serenity's EventHandler trait to respond to Discord events,
/// mutating roles and the roster through the shared [`BotContext`].
pub struct MatchpointHandler {
    /// Shared stores and configuration
    context: Arc<BotContext>,
    /// Our own user id, set once the ready payload arrives
    bot_id: OnceLock<UserId>,
}

impl MatchpointHandler {
    /// Create a new MatchpointHandler with the given context.
    pub fn new(context: Arc<BotContext>) -> Self {
        Self {
            context,
            bot_id: OnceLock::new(),
        }
    }

    /// Required gateway intents for the bot.
    ///
    /// This specifies what events the bot will receive from Discord.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
            | GatewayIntents::GUILD_MESSAGE_REACTIONS
    }

    fn is_self(&self, user_id: UserId) -> bool {
        self.bot_id.get().copied() == Some(user_id)
    }
}

#[async_trait]
impl EventHandler for MatchpointHandler {
    /// Called when the bot successfully connects to Discord.
    ///
    /// Kicks off the roster snapshot for every guild and the rules
    /// channel bootstrap.
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            bot_user = %ready.user.name,
            bot_id = %ready.user.id,
            guilds = ready.guilds.len(),
            "Bot connected to Discord"
        );
        let _ = self.bot_id.set(ready.user.id);

        let guild_ids: Vec<_> = ready.guilds.iter().map(|guild| guild.id).collect();
        sync::run_startup_sync(&ctx, self.context.as_ref(), &guild_ids, ready.user.id).await;
    }

    /// Called on every message the bot can see.
    async fn message(&self, ctx: Context, msg: Message) {
        if self.is_self(msg.author.id) {
            return;
        }
        let Some(command) = BotCommand::parse(&msg.content) else {
            return;
        };

        debug!(author = %msg.author.name, command = ?command, "Dispatching chat command");
        if let Err(e) = commands::dispatch(&ctx, self.context.as_ref(), &msg, command).await {
            error!(error = %e, "Command dispatch failed");
        }
    }

    /// Called when a reaction is added to a message.
    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        if reaction.user_id.is_some_and(|id| self.is_self(id)) {
            return;
        }
        let bot_id = self.bot_id.get().copied();
        if let Err(e) =
            reactions::apply(&ctx, self.context.as_ref(), &reaction, bot_id, true).await
        {
            error!(error = %e, "Error processing reaction");
        }
    }

    /// Called when a reaction is removed from a message.
    async fn reaction_remove(&self, ctx: Context, reaction: Reaction) {
        if reaction.user_id.is_some_and(|id| self.is_self(id)) {
            return;
        }
        let bot_id = self.bot_id.get().copied();
        if let Err(e) =
            reactions::apply(&ctx, self.context.as_ref(), &reaction, bot_id, false).await
        {
            error!(error = %e, "Error processing reaction removal");
        }
    }
}
