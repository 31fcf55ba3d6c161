//! Environment-driven runtime settings.

use matchpoint_error::{ConfigError, MatchpointResult};
use serenity::all::ChannelId;
use std::env;

/// Runtime settings for the bot process.
///
/// Everything is read from the environment once at startup; a `.env` file
/// is honored when present. Only the Discord token is mandatory.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Discord bot token
    pub token: String,
    /// Path to the SQLite roster database
    pub database_url: String,
    /// MongoDB connection string for the optional mirror
    pub mongo_uri: Option<String>,
    /// Channel the role opt-in messages are posted to
    pub rules_channel: Option<ChannelId>,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Errors
    /// Returns an error when `DISCORD_TOKEN` is missing or
    /// `RULES_CHANNEL_ID` is set to something non-numeric.
    pub fn from_env() -> MatchpointResult<Self> {
        Self::build(
            env::var("DISCORD_TOKEN").ok(),
            env::var("DATABASE_URL").ok(),
            env::var("MONGO_URI").ok(),
            env::var("RULES_CHANNEL_ID").ok(),
        )
    }

    fn build(
        token: Option<String>,
        database_url: Option<String>,
        mongo_uri: Option<String>,
        rules_channel_id: Option<String>,
    ) -> MatchpointResult<Self> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::new("DISCORD_TOKEN is not set"))?;

        let database_url = database_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| "matchpoint.db".to_string());

        let mongo_uri = mongo_uri.filter(|uri| !uri.is_empty());

        let rules_channel = match rules_channel_id.filter(|id| !id.is_empty()) {
            Some(raw) => {
                let id: u64 = raw.parse().map_err(|_| {
                    ConfigError::new(format!("RULES_CHANNEL_ID is not a channel id: {}", raw))
                })?;
                // Zero means the bootstrap is disabled
                (id != 0).then(|| ChannelId::new(id))
            }
            None => None,
        };

        Ok(Self {
            token,
            database_url,
            mongo_uri,
            rules_channel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(
        token: Option<&str>,
        database_url: Option<&str>,
        mongo_uri: Option<&str>,
        rules_channel_id: Option<&str>,
    ) -> MatchpointResult<Settings> {
        Settings::build(
            token.map(String::from),
            database_url.map(String::from),
            mongo_uri.map(String::from),
            rules_channel_id.map(String::from),
        )
    }

    #[test]
    fn test_token_is_required() {
        assert!(build(None, None, None, None).is_err());
        assert!(build(Some(""), None, None, None).is_err());
    }

    #[test]
    fn test_defaults() {
        let settings = build(Some("token"), None, None, None).expect("settings");
        assert_eq!(settings.database_url, "matchpoint.db");
        assert!(settings.mongo_uri.is_none());
        assert!(settings.rules_channel.is_none());
    }

    #[test]
    fn test_rules_channel_parses() {
        let settings =
            build(Some("token"), None, None, Some("123456789")).expect("settings");
        assert_eq!(settings.rules_channel, Some(ChannelId::new(123456789)));
    }

    #[test]
    fn test_rules_channel_zero_disables_bootstrap() {
        let settings = build(Some("token"), None, None, Some("0")).expect("settings");
        assert!(settings.rules_channel.is_none());
    }

    #[test]
    fn test_rules_channel_rejects_garbage() {
        assert!(build(Some("token"), None, None, Some("not-a-number")).is_err());
    }

    #[test]
    fn test_empty_mongo_uri_means_local_only() {
        let settings = build(Some("token"), None, Some(""), None).expect("settings");
        assert!(settings.mongo_uri.is_none());
    }
}
