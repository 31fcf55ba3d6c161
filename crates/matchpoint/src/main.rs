//! Matchpoint bot binary.
//!
//! Boots the roster database, probes the optional MongoDB mirror, and
//! connects to the Discord gateway. Runs until shut down (e.g., via
//! Ctrl+C).

use matchpoint::{Settings, telemetry};
use matchpoint_database::{RosterRepository, establish_connection, run_migrations};
use matchpoint_mirror::MirrorStore;
use matchpoint_social::{BotContext, MatchpointBot};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    telemetry::init_console_telemetry()?;

    let settings = Settings::from_env()?;

    let mut conn = establish_connection(&settings.database_url)?;
    run_migrations(&mut conn)?;
    let roster = RosterRepository::new(conn);
    info!(database_url = %settings.database_url, "Roster database ready");

    // The mirror is best-effort: an unusable deployment downgrades the
    // bot to local-only instead of stopping it.
    let mirror = match &settings.mongo_uri {
        Some(uri) => match MirrorStore::connect(uri).await {
            Ok(store) => {
                info!("Mirror store connected");
                Some(store)
            }
            Err(e) => {
                warn!(error = %e, "Mirror store unavailable, continuing local-only");
                None
            }
        },
        None => {
            info!("No MONGO_URI configured, running local-only");
            None
        }
    };

    let context = BotContext::new(roster, mirror, settings.rules_channel);
    let mut bot = MatchpointBot::new(settings.token, context).await?;
    bot.start().await?;

    Ok(())
}
