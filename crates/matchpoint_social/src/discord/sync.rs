//! Startup synchronization: roster snapshots and tracked-message bootstrap.
//!
//! On `ready` the bot walks every guild it belongs to, snapshots live
//! role possession into the roster, and makes sure the two reaction
//! messages exist in the configured rules channel.

use super::reactions::{FORMAT_PICKER_MESSAGE, ROLE_OPT_IN_MESSAGE};
use super::{DiscordResult, roles};
use crate::BotContext;
use matchpoint_database::{NewMember, RoleFlag};
use serenity::all::{
    Channel, ChannelId, Context, GetMessages, GuildId, Member, Role, RoleId, UserId,
};
use std::collections::HashMap;
use tracing::{error, info, instrument, warn};

/// Page size for the member listing endpoint.
const MEMBER_PAGE_SIZE: u64 = 1000;

/// How many recent messages to scan for the tracked messages.
const BOOTSTRAP_LOOKBACK: u8 = 100;

/// Fetch the full member list of a guild, page by page.
pub async fn fetch_all_members(ctx: &Context, guild_id: GuildId) -> DiscordResult<Vec<Member>> {
    let mut members = Vec::new();
    let mut after: Option<UserId> = None;

    loop {
        let page = ctx
            .http
            .get_guild_members(guild_id, Some(MEMBER_PAGE_SIZE), after.map(UserId::get))
            .await?;
        let Some(last) = page.last() else {
            break;
        };
        after = Some(last.user.id);
        let fully_loaded = (page.len() as u64) < MEMBER_PAGE_SIZE;
        members.extend(page);
        if fully_loaded {
            break;
        }
    }
    Ok(members)
}

/// Snapshot a member's live role possession into a roster row.
pub fn member_record(member: &Member, guild_roles: &HashMap<RoleId, Role>) -> NewMember {
    let holds = |flag: RoleFlag| {
        roles::find_role(guild_roles.values(), flag.role_name())
            .is_some_and(|role| member.roles.contains(&role.id))
    };

    NewMember {
        username: member.user.name.clone(),
        has_general_role: holds(RoleFlag::General),
        has_singles_role: holds(RoleFlag::Singles),
        has_doubles_role: holds(RoleFlag::Doubles),
    }
}

/// Upsert a roster row for every non-bot member of a guild.
///
/// Returns the number of members synced. A store failure aborts the
/// remaining rows; the next startup repeats the snapshot anyway.
#[instrument(skip(ctx, bot))]
pub async fn sync_guild_members(
    ctx: &Context,
    bot: &BotContext,
    guild_id: GuildId,
) -> DiscordResult<usize> {
    let guild = ctx.http.get_guild(guild_id).await?;
    let guild_roles = guild_id.roles(&ctx.http).await?;
    let members = fetch_all_members(ctx, guild_id).await?;

    let mut synced = 0;
    for member in &members {
        if member.user.bot {
            continue;
        }
        bot.upsert_member(&member_record(member, &guild_roles)).await?;
        synced += 1;
    }

    info!(guild_name = %guild.name, members = synced, "Synced guild roster");
    Ok(synced)
}

/// Make sure both tracked messages exist in the rules channel.
///
/// Scans the most recent messages, considers only bot-authored ones, and
/// posts whichever of the two bodies is missing. An unfetchable channel
/// is logged and skipped; later failures propagate to the caller's log.
pub async fn ensure_role_messages(
    ctx: &Context,
    channel_id: ChannelId,
    bot_id: UserId,
) -> DiscordResult<()> {
    let channel = match ctx.http.get_channel(channel_id).await {
        Ok(channel) => channel,
        Err(e) => {
            warn!(channel_id = %channel_id, error = %e, "Could not find rules channel");
            return Ok(());
        }
    };
    let channel_name = match &channel {
        Channel::Guild(guild_channel) => guild_channel.name.clone(),
        _ => channel_id.to_string(),
    };

    let history = channel_id
        .messages(&ctx.http, GetMessages::new().limit(BOOTSTRAP_LOOKBACK))
        .await?;

    let mut has_opt_in = false;
    let mut has_format_picker = false;
    for message in &history {
        if message.author.id != bot_id {
            continue;
        }
        if message.content == ROLE_OPT_IN_MESSAGE {
            has_opt_in = true;
        } else if message.content == FORMAT_PICKER_MESSAGE {
            has_format_picker = true;
        }
    }

    if !has_opt_in {
        channel_id.say(&ctx.http, ROLE_OPT_IN_MESSAGE).await?;
        info!(channel = %channel_name, "Posted role opt-in message");
    }
    if !has_format_picker {
        channel_id.say(&ctx.http, FORMAT_PICKER_MESSAGE).await?;
        info!(channel = %channel_name, "Posted format picker message");
    }
    Ok(())
}

/// Sync every guild named in the ready payload, then bootstrap the rules
/// channel. Per-guild failures are logged and do not stop the rest.
pub async fn run_startup_sync(
    ctx: &Context,
    bot: &BotContext,
    guild_ids: &[GuildId],
    bot_id: UserId,
) {
    for guild_id in guild_ids {
        if let Err(e) = sync_guild_members(ctx, bot, *guild_id).await {
            error!(guild_id = %guild_id, error = %e, "Error syncing members");
        }
    }

    if let Some(channel_id) = bot.rules_channel() {
        if let Err(e) = ensure_role_messages(ctx, channel_id, bot_id).await {
            error!(channel_id = %channel_id, error = %e, "Error sending rules messages");
        }
    }
}
