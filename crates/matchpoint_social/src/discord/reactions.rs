//! Reaction router: maps emoji reactions on the bot's tracked messages to
//! role changes.
//!
//! Only two bot-authored messages are live, identified by their exact
//! body text. A reaction on anything else, or with an unexpected emoji,
//! is ignored. Role assignment happens over HTTP; on success the
//! singles/doubles flags are written through to the roster. The general
//! flag is intentionally not written here: it catches up at the next
//! startup sync or `$bot database` run, which snapshot live role
//! possession wholesale.

use super::{DiscordError, DiscordErrorKind, DiscordResult, roles};
use crate::BotContext;
use matchpoint_database::RoleFlag;
use serenity::all::{Context, Reaction, ReactionType, UserId};
use tracing::{debug, error, warn};

/// Body of the general role opt-in message.
pub const ROLE_OPT_IN_MESSAGE: &str = "React to this message for your role";

/// Body of the singles/doubles format picker message.
pub const FORMAT_PICKER_MESSAGE: &str =
    "React with 1️⃣ if you are playing singles or 2️⃣ if you are playing doubles";

/// What a reaction on a tracked message asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionIntent {
    /// ✅ on the opt-in message: the `general` role.
    General,
    /// 1️⃣ on the format picker: the `singles` role.
    Singles,
    /// 2️⃣ on the format picker: the `doubles` role.
    Doubles,
}

impl ReactionIntent {
    /// Discord role this intent targets.
    pub fn role_name(&self) -> &'static str {
        match self {
            ReactionIntent::General => "general",
            ReactionIntent::Singles => "singles",
            ReactionIntent::Doubles => "doubles",
        }
    }

    /// Roster flag written through after a successful role change.
    ///
    /// `None` for the general role: its flag is only refreshed by the
    /// wholesale snapshots, never by single reactions.
    pub fn persisted_flag(&self) -> Option<RoleFlag> {
        match self {
            ReactionIntent::General => None,
            ReactionIntent::Singles => Some(RoleFlag::Singles),
            ReactionIntent::Doubles => Some(RoleFlag::Doubles),
        }
    }
}

fn emoji_is(emoji: &ReactionType, expected: &str) -> bool {
    matches!(emoji, ReactionType::Unicode(s) if s == expected)
}

/// Classify a reaction by message body and emoji.
///
/// Returns `None` for untracked messages and unexpected emoji alike.
pub fn classify(content: &str, emoji: &ReactionType) -> Option<ReactionIntent> {
    match content {
        ROLE_OPT_IN_MESSAGE if emoji_is(emoji, "✅") => Some(ReactionIntent::General),
        FORMAT_PICKER_MESSAGE if emoji_is(emoji, "1️⃣") => Some(ReactionIntent::Singles),
        FORMAT_PICKER_MESSAGE if emoji_is(emoji, "2️⃣") => Some(ReactionIntent::Doubles),
        _ => None,
    }
}

/// Apply a reaction event: resolve the intent, adjust the member's role,
/// and write the flag through.
///
/// `added` is true for reaction-add events, false for removals. Platform
/// permission failures on the role mutation itself are logged and
/// swallowed; fetch failures propagate for the handler to log.
pub async fn apply(
    ctx: &Context,
    bot: &BotContext,
    reaction: &Reaction,
    bot_id: Option<UserId>,
    added: bool,
) -> DiscordResult<()> {
    // Until ready has run we cannot tell our own messages apart.
    let Some(bot_id) = bot_id else {
        return Ok(());
    };

    let message = ctx
        .http
        .get_message(reaction.channel_id, reaction.message_id)
        .await?;
    if message.author.id != bot_id {
        return Ok(());
    }

    let Some(intent) = classify(&message.content, &reaction.emoji) else {
        return Ok(());
    };
    let Some(guild_id) = reaction.guild_id else {
        return Ok(());
    };
    let Some(user_id) = reaction.user_id else {
        return Ok(());
    };

    let member = guild_id.member(&ctx.http, user_id).await?;

    let role = if added {
        match roles::ensure_role(ctx, guild_id, intent.role_name()).await {
            Ok(role) => role,
            Err(e) if e.is_forbidden() => {
                warn!(role_name = intent.role_name(), "Bot lacks permission to create roles");
                return Ok(());
            }
            Err(e) => {
                error!(role_name = intent.role_name(), error = %e, "Failed to resolve role");
                return Ok(());
            }
        }
    } else {
        let guild_roles = guild_id.roles(&ctx.http).await?;
        match roles::find_role(guild_roles.values(), intent.role_name()) {
            Some(role) => role.clone(),
            // Nothing to remove
            None => return Ok(()),
        }
    };

    let has_role = member.roles.contains(&role.id);
    if added == has_role {
        debug!(
            username = %member.user.name,
            role_name = %role.name,
            "Member already in desired state"
        );
        return Ok(());
    }

    let result = if added {
        member.add_role(&ctx.http, role.id).await
    } else {
        member.remove_role(&ctx.http, role.id).await
    };

    match result {
        Ok(()) => {
            debug!(
                username = %member.user.name,
                role_name = %role.name,
                added,
                "Adjusted member role"
            );
        }
        Err(e) => {
            let err = DiscordError::from(e);
            match err.kind() {
                DiscordErrorKind::Forbidden(_) => {
                    warn!(role_name = %role.name, "Bot lacks permission to adjust roles");
                }
                _ => {
                    error!(role_name = %role.name, error = %err, "Failed to adjust member role");
                }
            }
            return Ok(());
        }
    }

    if let Some(flag) = intent.persisted_flag() {
        if let Err(e) = bot.set_role_flag(&member.user.name, flag, added).await {
            error!(username = %member.user.name, error = %e, "Failed to update roster flag");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unicode(s: &str) -> ReactionType {
        ReactionType::Unicode(s.to_string())
    }

    #[test]
    fn test_opt_in_check_mark_targets_general() {
        let intent = classify(ROLE_OPT_IN_MESSAGE, &unicode("✅"));
        assert_eq!(intent, Some(ReactionIntent::General));
    }

    #[test]
    fn test_format_picker_emoji_map() {
        assert_eq!(
            classify(FORMAT_PICKER_MESSAGE, &unicode("1️⃣")),
            Some(ReactionIntent::Singles)
        );
        assert_eq!(
            classify(FORMAT_PICKER_MESSAGE, &unicode("2️⃣")),
            Some(ReactionIntent::Doubles)
        );
    }

    #[test]
    fn test_unexpected_emoji_is_ignored() {
        assert_eq!(classify(ROLE_OPT_IN_MESSAGE, &unicode("🎾")), None);
        assert_eq!(classify(FORMAT_PICKER_MESSAGE, &unicode("✅")), None);
        assert_eq!(classify(FORMAT_PICKER_MESSAGE, &unicode("3️⃣")), None);
    }

    #[test]
    fn test_untracked_message_is_ignored() {
        assert_eq!(classify("React to this message", &unicode("✅")), None);
        assert_eq!(classify("", &unicode("1️⃣")), None);
    }

    #[test]
    fn test_general_flag_is_not_persisted() {
        assert_eq!(ReactionIntent::General.persisted_flag(), None);
        assert_eq!(
            ReactionIntent::Singles.persisted_flag(),
            Some(RoleFlag::Singles)
        );
        assert_eq!(
            ReactionIntent::Doubles.persisted_flag(),
            Some(RoleFlag::Doubles)
        );
    }
}
