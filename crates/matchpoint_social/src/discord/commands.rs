//! Chat command parsing and dispatch.
//!
//! Commands arrive as ordinary messages prefixed with `$bot `. The prefix
//! and subcommand must match token-for-token; trailing arguments beyond
//! what a subcommand consumes are ignored. Replies go back to the channel
//! the command came from.

use super::{DiscordError, DiscordResult, roles, sync};
use crate::BotContext;
use matchpoint_database::MemberRow;
use serenity::all::{Context, Message};
use tracing::{info, warn};

/// Chat prefix every command starts with.
pub const COMMAND_PREFIX: &str = "$bot ";

/// A parsed chat command.
///
/// `Promote`/`Demote` carry the requested role name when the message had
/// enough tokens (`$bot promote @player rolename...`); `None` means the
/// dispatcher should answer with usage help. Mentions are read off the
/// message itself, not the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// `$bot hello`
    Hello,
    /// `$bot greet`
    Greet,
    /// `$bot database`
    Database,
    /// `$bot promote @player <role name>`
    Promote {
        /// Role name joined from the tokens after the mention
        role_name: Option<String>,
    },
    /// `$bot demote @player <role name>`
    Demote {
        /// Role name joined from the tokens after the mention
        role_name: Option<String>,
    },
}

impl BotCommand {
    /// Parse a message body into a command.
    ///
    /// Returns `None` when the prefix is absent or the subcommand token is
    /// not an exact match, so `$bot helloworld` is nothing.
    pub fn parse(content: &str) -> Option<Self> {
        let rest = content.strip_prefix(COMMAND_PREFIX)?;
        let mut tokens = rest.split_whitespace();

        match tokens.next()? {
            "hello" => Some(BotCommand::Hello),
            "greet" => Some(BotCommand::Greet),
            "database" => Some(BotCommand::Database),
            "promote" => Some(BotCommand::Promote {
                role_name: role_name_argument(tokens),
            }),
            "demote" => Some(BotCommand::Demote {
                role_name: role_name_argument(tokens),
            }),
            _ => None,
        }
    }
}

/// Join the tokens after the mention into a role name.
///
/// The first token after the subcommand is the mention slot; the role
/// name is everything after it. Fewer than two tokens means the command
/// was too short.
fn role_name_argument<'a, I>(tokens: I) -> Option<String>
where
    I: Iterator<Item = &'a str>,
{
    let after: Vec<&str> = tokens.collect();
    if after.len() >= 2 {
        Some(after[1..].join(" "))
    } else {
        None
    }
}

/// Promote adds a role, demote removes one; the replies differ with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleAction {
    Promote,
    Demote,
}

impl RoleAction {
    fn verb(self) -> &'static str {
        match self {
            RoleAction::Promote => "promote",
            RoleAction::Demote => "demote",
        }
    }

    fn forbidden_reply(self) -> &'static str {
        match self {
            RoleAction::Promote => "I don't have permission to assign that role.",
            RoleAction::Demote => "I don't have permission to remove that role.",
        }
    }

    fn failure_reply(self) -> &'static str {
        match self {
            RoleAction::Promote => "An error occurred while assigning the role.",
            RoleAction::Demote => "An error occurred while removing the role.",
        }
    }
}

/// Execute a parsed command and reply in the originating channel.
pub async fn dispatch(
    ctx: &Context,
    bot: &BotContext,
    msg: &Message,
    command: BotCommand,
) -> DiscordResult<()> {
    match command {
        BotCommand::Hello => {
            msg.channel_id.say(&ctx.http, "Hello!").await?;
        }
        BotCommand::Greet => {
            msg.channel_id
                .say(&ctx.http, format!("Hello {}", msg.author.name))
                .await?;
        }
        BotCommand::Database => database_report(ctx, bot, msg).await?,
        BotCommand::Promote { role_name } => {
            manage_role(ctx, msg, role_name, RoleAction::Promote).await?
        }
        BotCommand::Demote { role_name } => {
            manage_role(ctx, msg, role_name, RoleAction::Demote).await?
        }
    }
    Ok(())
}

/// Backfill the roster from live membership, then post its contents.
async fn database_report(ctx: &Context, bot: &BotContext, msg: &Message) -> DiscordResult<()> {
    let Some(guild_id) = msg.guild_id else {
        return Ok(());
    };

    let members = sync::fetch_all_members(ctx, guild_id).await?;
    let guild_roles = guild_id.roles(&ctx.http).await?;

    let outcome: matchpoint_database::DatabaseResult<Vec<MemberRow>> = async {
        for member in &members {
            if member.user.bot {
                continue;
            }
            let record = sync::member_record(member, &guild_roles);
            if bot.insert_if_absent(&record).await? {
                info!(username = %record.username, "Added missing member to roster");
            }
        }
        bot.list_members().await
    }
    .await;

    let reply = match outcome {
        Ok(rows) if rows.is_empty() => "The database is empty!".to_string(),
        Ok(rows) => render_roster_table(&rows),
        Err(e) => format!("Error accessing database: {}", e),
    };
    msg.channel_id.say(&ctx.http, reply).await?;
    Ok(())
}

/// Promote or demote a mentioned member.
///
/// Check order matters: permission first, then argument shape, then
/// mention, then role existence, then current possession.
async fn manage_role(
    ctx: &Context,
    msg: &Message,
    role_name: Option<String>,
    action: RoleAction,
) -> DiscordResult<()> {
    let Some(guild_id) = msg.guild_id else {
        return Ok(());
    };

    let guild = ctx.http.get_guild(guild_id).await?;
    let guild_roles = guild_id.roles(&ctx.http).await?;
    let invoker = guild_id.member(&ctx.http, msg.author.id).await?;

    let permissions = roles::effective_permissions(
        guild_id,
        guild_roles.iter().map(|(id, role)| (*id, role.permissions)),
        &invoker.roles,
    );
    if !roles::can_manage_roles(permissions, guild.owner_id == msg.author.id) {
        msg.channel_id
            .say(&ctx.http, "You don't have permission to manage roles.")
            .await?;
        return Ok(());
    }

    let Some(role_name) = role_name else {
        msg.channel_id
            .say(
                &ctx.http,
                format!("Usage: $bot {} [@player] [role_name]", action.verb()),
            )
            .await?;
        return Ok(());
    };

    let Some(target_user) = msg.mentions.first() else {
        msg.channel_id
            .say(
                &ctx.http,
                format!("Please mention a user to {}.", action.verb()),
            )
            .await?;
        return Ok(());
    };

    let Some(role) = roles::find_role(guild_roles.values(), &role_name) else {
        msg.channel_id
            .say(&ctx.http, format!("Role '{}' not found.", role_name))
            .await?;
        return Ok(());
    };

    let target = guild_id.member(&ctx.http, target_user.id).await?;
    let has_role = target.roles.contains(&role.id);

    match action {
        RoleAction::Promote if has_role => {
            msg.channel_id
                .say(
                    &ctx.http,
                    format!(
                        "{} already has the role '{}'.",
                        target.display_name(),
                        role_name
                    ),
                )
                .await?;
            return Ok(());
        }
        RoleAction::Demote if !has_role => {
            msg.channel_id
                .say(
                    &ctx.http,
                    format!(
                        "{} doesn't have the role '{}'.",
                        target.display_name(),
                        role_name
                    ),
                )
                .await?;
            return Ok(());
        }
        _ => {}
    }

    let result = match action {
        RoleAction::Promote => target.add_role(&ctx.http, role.id).await,
        RoleAction::Demote => target.remove_role(&ctx.http, role.id).await,
    };

    let reply = match result {
        Ok(()) => match action {
            RoleAction::Promote => format!(
                "Successfully assigned the role '{}' to {}!",
                role_name,
                target.display_name()
            ),
            RoleAction::Demote => format!(
                "Successfully removed the role '{}' from {}!",
                role_name,
                target.display_name()
            ),
        },
        Err(e) => {
            let err = DiscordError::from(e);
            warn!(role_name = %role_name, error = %err, "Role mutation failed");
            if err.is_forbidden() {
                action.forbidden_reply().to_string()
            } else {
                action.failure_reply().to_string()
            }
        }
    };
    msg.channel_id.say(&ctx.http, reply).await?;
    Ok(())
}

/// Render the roster as the code-block table posted by `$bot database`.
pub fn render_roster_table(rows: &[MemberRow]) -> String {
    let mut table = String::from("**Tennis Database Contents:**\n```");
    table.push_str("ID | Username | General | Singles | Doubles\n");
    table.push_str(&"-".repeat(80));
    table.push('\n');
    for row in rows {
        table.push_str(&format!(
            "{} | {} | {} | {} | {}\n",
            row.id,
            row.username,
            flag_cell(row.has_general_role),
            flag_cell(row.has_singles_role),
            flag_cell(row.has_doubles_role),
        ));
    }
    table.push_str("```");
    table
}

fn flag_cell(value: bool) -> &'static str {
    if value { "1 (True)" } else { "0 (False)" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(BotCommand::parse("$bot hello"), Some(BotCommand::Hello));
        assert_eq!(BotCommand::parse("$bot greet"), Some(BotCommand::Greet));
        assert_eq!(
            BotCommand::parse("$bot database"),
            Some(BotCommand::Database)
        );
    }

    #[test]
    fn test_parse_requires_prefix() {
        assert_eq!(BotCommand::parse("hello"), None);
        assert_eq!(BotCommand::parse("$bothello"), None);
        assert_eq!(BotCommand::parse("$bot"), None);
        assert_eq!(BotCommand::parse("$bot "), None);
    }

    #[test]
    fn test_parse_rejects_subcommand_lookalikes() {
        assert_eq!(BotCommand::parse("$bot helloworld"), None);
        assert_eq!(BotCommand::parse("$bot databases"), None);
        assert_eq!(BotCommand::parse("$bot promoted"), None);
    }

    #[test]
    fn test_parse_ignores_trailing_tokens() {
        assert_eq!(
            BotCommand::parse("$bot hello there"),
            Some(BotCommand::Hello)
        );
    }

    #[test]
    fn test_parse_promote_needs_mention_and_role_tokens() {
        assert_eq!(
            BotCommand::parse("$bot promote"),
            Some(BotCommand::Promote { role_name: None })
        );
        assert_eq!(
            BotCommand::parse("$bot promote <@123>"),
            Some(BotCommand::Promote { role_name: None })
        );
        assert_eq!(
            BotCommand::parse("$bot promote <@123> captain"),
            Some(BotCommand::Promote {
                role_name: Some("captain".to_string())
            })
        );
    }

    #[test]
    fn test_parse_joins_multi_word_role_names() {
        assert_eq!(
            BotCommand::parse("$bot demote <@123> club captain"),
            Some(BotCommand::Demote {
                role_name: Some("club captain".to_string())
            })
        );
    }

    #[test]
    fn test_render_roster_table_matches_chat_format() {
        let rows = vec![
            MemberRow {
                id: 1,
                username: "alice".to_string(),
                has_general_role: true,
                has_singles_role: false,
                has_doubles_role: false,
            },
            MemberRow {
                id: 2,
                username: "bob".to_string(),
                has_general_role: false,
                has_singles_role: true,
                has_doubles_role: true,
            },
        ];

        let expected = format!(
            "**Tennis Database Contents:**\n```ID | Username | General | Singles | Doubles\n{}\n1 | alice | 1 (True) | 0 (False) | 0 (False)\n2 | bob | 0 (False) | 1 (True) | 1 (True)\n```",
            "-".repeat(80)
        );
        assert_eq!(render_roster_table(&rows), expected);
    }

    #[test]
    fn test_flag_cell_format() {
        assert_eq!(flag_cell(true), "1 (True)");
        assert_eq!(flag_cell(false), "0 (False)");
    }
}
