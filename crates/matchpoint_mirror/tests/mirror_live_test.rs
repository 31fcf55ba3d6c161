//! Integration tests against a live MongoDB deployment.
//!
//! These tests need `MONGO_URI` in the environment and run only with the
//! `api` feature enabled.

use matchpoint_mirror::{MemberDocument, MirrorStore};
use std::env;

/// Helper to load environment variables from .env
fn load_env() {
    dotenvy::dotenv().ok();
}

async fn connect() -> MirrorStore {
    load_env();
    let uri = env::var("MONGO_URI").expect("MONGO_URI must be set");
    MirrorStore::connect(&uri)
        .await
        .expect("mirror deployment reachable")
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_connect_and_ping() {
    connect().await;
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_upsert_then_set_flag() {
    let mirror = connect().await;

    let member = MemberDocument {
        username: "matchpoint-live-test".to_string(),
        has_general_role: true,
        has_singles_role: false,
        has_doubles_role: false,
    };

    mirror.upsert_member(&member).await.expect("upsert");
    mirror
        .set_flag(&member.username, MemberDocument::FIELD_SINGLES, true)
        .await
        .expect("flag update");
}
