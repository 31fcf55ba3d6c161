//! Integration tests for the roster repository against in-memory SQLite.

use diesel::prelude::*;
use diesel_migrations::MigrationHarness;
use matchpoint_database::{
    MIGRATIONS, NewMember, RoleFlag, RosterRepository, establish_connection, run_migrations,
};

fn member(username: &str, general: bool, singles: bool, doubles: bool) -> NewMember {
    NewMember {
        username: username.to_string(),
        has_general_role: general,
        has_singles_role: singles,
        has_doubles_role: doubles,
    }
}

fn open_migrated() -> RosterRepository {
    let mut conn = establish_connection(":memory:").expect("in-memory database");
    run_migrations(&mut conn).expect("migrations apply");
    RosterRepository::new(conn)
}

#[tokio::test]
async fn test_get_by_username_missing() {
    let roster = open_migrated();

    let found = roster.get_by_username("alice").await.expect("query");
    assert!(found.is_none());
}

#[tokio::test]
async fn test_upsert_inserts_then_replaces() {
    let roster = open_migrated();

    roster
        .upsert(&member("alice", true, false, false))
        .await
        .expect("insert");

    let first = roster
        .get_by_username("alice")
        .await
        .expect("query")
        .expect("row exists");
    assert!(first.has_general_role);
    assert!(!first.has_singles_role);

    roster
        .upsert(&member("alice", false, true, true))
        .await
        .expect("replace");

    let second = roster
        .get_by_username("alice")
        .await
        .expect("query")
        .expect("row exists");
    assert!(!second.has_general_role);
    assert!(second.has_singles_role);
    assert!(second.has_doubles_role);

    // The conflict target is the username, so the primary key is stable.
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn test_insert_if_absent_reports_new_rows_only() {
    let roster = open_migrated();

    let inserted = roster
        .insert_if_absent(&member("bob", true, true, false))
        .await
        .expect("insert");
    assert!(inserted);

    // A second attempt with different flags must not touch the row.
    let inserted_again = roster
        .insert_if_absent(&member("bob", false, false, false))
        .await
        .expect("insert");
    assert!(!inserted_again);

    let row = roster
        .get_by_username("bob")
        .await
        .expect("query")
        .expect("row exists");
    assert!(row.has_general_role);
    assert!(row.has_singles_role);
}

#[tokio::test]
async fn test_set_flag_updates_single_column() {
    let roster = open_migrated();

    roster
        .upsert(&member("carol", true, false, false))
        .await
        .expect("insert");

    let rows = roster
        .set_flag("carol", RoleFlag::Doubles, true)
        .await
        .expect("update");
    assert_eq!(rows, 1);

    let row = roster
        .get_by_username("carol")
        .await
        .expect("query")
        .expect("row exists");
    assert!(row.has_general_role);
    assert!(!row.has_singles_role);
    assert!(row.has_doubles_role);
}

#[tokio::test]
async fn test_set_flag_without_row_is_noop() {
    let roster = open_migrated();

    let rows = roster
        .set_flag("nobody", RoleFlag::Singles, true)
        .await
        .expect("update");
    assert_eq!(rows, 0);
}

#[tokio::test]
async fn test_list_all_primary_key_order() {
    let roster = open_migrated();

    for name in ["zoe", "alice", "marta"] {
        roster
            .upsert(&member(name, false, false, false))
            .await
            .expect("insert");
    }

    let rows = roster.list_all().await.expect("list");
    let names: Vec<&str> = rows.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(names, vec!["zoe", "alice", "marta"]);

    let mut ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
    let sorted = {
        let mut s = ids.clone();
        s.sort_unstable();
        s
    };
    assert_eq!(ids, sorted);
    ids.dedup();
    assert_eq!(ids.len(), rows.len());
}

#[tokio::test]
async fn test_legacy_schema_upgrades_additively() {
    // Build a database at the legacy shape (general flag only), seed it,
    // then apply the remaining migrations the way a deployed bot would.
    let mut conn = establish_connection(":memory:").expect("in-memory database");

    let pending = conn
        .pending_migrations(MIGRATIONS)
        .expect("list pending migrations");
    assert_eq!(pending.len(), 2);

    conn.run_migration(&pending[0]).expect("legacy schema");
    diesel::sql_query(
        "INSERT INTO server_members (username, has_general_role) VALUES ('dave', 1)",
    )
    .execute(&mut conn)
    .expect("seed legacy row");

    run_migrations(&mut conn).expect("additive upgrade");

    let roster = RosterRepository::new(conn);
    let row = roster
        .get_by_username("dave")
        .await
        .expect("query")
        .expect("legacy row survives");
    assert!(row.has_general_role);
    assert!(!row.has_singles_role);
    assert!(!row.has_doubles_role);

    let rows = roster
        .set_flag("dave", RoleFlag::Singles, true)
        .await
        .expect("new column accepts updates");
    assert_eq!(rows, 1);
}
