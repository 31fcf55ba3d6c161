//! Integration tests against the live Discord API.
//!
//! These tests need `DISCORD_TOKEN` in the environment and run only with
//! the `api` feature enabled.

use matchpoint_database::{RosterRepository, establish_connection, run_migrations};
use matchpoint_social::{BotContext, MatchpointBot};
use std::env;

/// Helper to load environment variables from .env
fn load_env() {
    dotenvy::dotenv().ok();
}

fn in_memory_context() -> BotContext {
    let mut conn = establish_connection(":memory:").expect("in-memory database");
    run_migrations(&mut conn).expect("migrations apply");
    BotContext::new(RosterRepository::new(conn), None, None)
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_client_builds_with_real_token() {
    load_env();
    let token = env::var("DISCORD_TOKEN").expect("DISCORD_TOKEN must be set");

    MatchpointBot::new(token, in_memory_context())
        .await
        .expect("client builds");
}
