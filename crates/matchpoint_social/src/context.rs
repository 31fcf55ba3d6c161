//! Shared bot state handed to the event handler.
//!
//! `BotContext` owns the two stores and the optional rules channel id.
//! Every roster mutation goes through here so the local write and the
//! best-effort mirror write stay paired in one place.

use matchpoint_database::{DatabaseResult, MemberRow, NewMember, RoleFlag, RosterRepository};
use matchpoint_mirror::{MemberDocument, MirrorStore};
use serenity::all::ChannelId;
use tracing::warn;

/// Stores and configuration shared across event handlers.
///
/// The mirror is optional: when `None` (no `MONGO_URI`, or the deployment
/// failed its liveness probe at startup) every operation runs local-only.
/// Mirror write failures are logged and swallowed; the local roster is
/// the source of truth.
pub struct BotContext {
    /// Local roster, the authoritative store
    roster: RosterRepository,
    /// Optional remote mirror, best-effort
    mirror: Option<MirrorStore>,
    /// Channel the role opt-in messages are posted to
    rules_channel: Option<ChannelId>,
}

impl BotContext {
    /// Assemble the context from its parts.
    pub fn new(
        roster: RosterRepository,
        mirror: Option<MirrorStore>,
        rules_channel: Option<ChannelId>,
    ) -> Self {
        Self {
            roster,
            mirror,
            rules_channel,
        }
    }

    /// Channel to post the role opt-in messages to, when configured.
    pub fn rules_channel(&self) -> Option<ChannelId> {
        self.rules_channel
    }

    /// Insert or replace the full roster row for a member, mirroring the
    /// result when a mirror is connected.
    pub async fn upsert_member(&self, member: &NewMember) -> DatabaseResult<()> {
        self.roster.upsert(member).await?;

        if let Some(mirror) = &self.mirror {
            if let Err(e) = mirror.upsert_member(&to_document(member)).await {
                warn!(username = %member.username, error = %e, "Mirror write failed, continuing local-only");
            }
        }
        Ok(())
    }

    /// Insert a roster row only when the username is new, mirroring the
    /// row when one was written. Returns whether a row was written.
    pub async fn insert_if_absent(&self, member: &NewMember) -> DatabaseResult<bool> {
        let inserted = self.roster.insert_if_absent(member).await?;

        if inserted {
            if let Some(mirror) = &self.mirror {
                if let Err(e) = mirror.upsert_member(&to_document(member)).await {
                    warn!(username = %member.username, error = %e, "Mirror write failed, continuing local-only");
                }
            }
        }
        Ok(inserted)
    }

    /// Flip a single role flag for a username, mirroring the change.
    /// Returns the number of local rows touched.
    pub async fn set_role_flag(
        &self,
        username: &str,
        flag: RoleFlag,
        value: bool,
    ) -> DatabaseResult<usize> {
        let rows = self.roster.set_flag(username, flag, value).await?;

        if let Some(mirror) = &self.mirror {
            if let Err(e) = mirror.set_flag(username, mirror_field(flag), value).await {
                warn!(username = %username, error = %e, "Mirror write failed, continuing local-only");
            }
        }
        Ok(rows)
    }

    /// List every roster row in primary-key order.
    pub async fn list_members(&self) -> DatabaseResult<Vec<MemberRow>> {
        self.roster.list_all().await
    }
}

fn to_document(member: &NewMember) -> MemberDocument {
    MemberDocument {
        username: member.username.clone(),
        has_general_role: member.has_general_role,
        has_singles_role: member.has_singles_role,
        has_doubles_role: member.has_doubles_role,
    }
}

fn mirror_field(flag: RoleFlag) -> &'static str {
    match flag {
        RoleFlag::General => MemberDocument::FIELD_GENERAL,
        RoleFlag::Singles => MemberDocument::FIELD_SINGLES,
        RoleFlag::Doubles => MemberDocument::FIELD_DOUBLES,
    }
}
