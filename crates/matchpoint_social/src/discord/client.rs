//! Discord bot client setup and lifecycle management.
//!
//! This module provides the MatchpointBot struct which manages the Discord
//! client connection, event handling, and store integration.

use super::{DiscordError, DiscordErrorKind, handler::MatchpointHandler};
use crate::BotContext;
use serenity::Client;
use std::sync::Arc;
use tracing::{info, instrument};

/// Main Discord bot client for Matchpoint.
///
/// Manages the Serenity client connection and hands the shared
/// [`BotContext`] to the event handler.
///
/// # Example
/// ```no_run
/// use matchpoint_database::{RosterRepository, establish_connection};
/// use matchpoint_social::{BotContext, MatchpointBot};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = std::env::var("DISCORD_TOKEN")?;
///     let conn = establish_connection("matchpoint.db")?;
///     let context = BotContext::new(RosterRepository::new(conn), None, None);
///
///     let mut bot = MatchpointBot::new(token, context).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct MatchpointBot {
    /// Serenity client instance
    client: Client,
    /// Shared stores and configuration (kept for potential direct access)
    #[allow(dead_code)]
    context: Arc<BotContext>,
}

impl MatchpointBot {
    /// Create a new MatchpointBot instance.
    ///
    /// # Arguments
    /// * `token` - Discord bot token from the Discord Developer Portal
    /// * `context` - Shared stores and configuration
    ///
    /// # Errors
    /// Returns an error if the Serenity client fails to initialize.
    #[instrument(skip(token, context), fields(token_len = token.len()))]
    pub async fn new(token: String, context: BotContext) -> Result<Self, DiscordError> {
        info!("Initializing Matchpoint Discord bot");

        let context = Arc::new(context);
        let handler = MatchpointHandler::new(context.clone());
        let intents = MatchpointHandler::intents();

        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(&token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        info!("Serenity client built successfully");

        Ok(Self { client, context })
    }

    /// Start the Discord bot.
    ///
    /// This method blocks until the bot is shut down (e.g., via Ctrl+C).
    ///
    /// # Errors
    /// Returns an error if the client fails to start or encounters a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), DiscordError> {
        info!("Starting Discord bot");

        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })?;

        Ok(())
    }
}
