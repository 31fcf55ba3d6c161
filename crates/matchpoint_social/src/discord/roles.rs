//! Role directory: lookup, lazy creation, and permission checks.
//!
//! The bot runs without a gateway cache, so guild roles arrive as a
//! `HashMap<RoleId, Role>` fetched over HTTP and member permissions are
//! computed here instead of read off a cached member.

use super::DiscordResult;
use serenity::all::{Context, EditRole, GuildId, Permissions, Role, RoleId};
use tracing::info;

/// Find a role by exact name.
pub fn find_role<'a, I>(roles: I, name: &str) -> Option<&'a Role>
where
    I: IntoIterator<Item = &'a Role>,
{
    roles.into_iter().find(|role| role.name == name)
}

/// Return the named role, creating it when the guild has none.
pub async fn ensure_role(ctx: &Context, guild_id: GuildId, name: &str) -> DiscordResult<Role> {
    let roles = guild_id.roles(&ctx.http).await?;
    if let Some(role) = find_role(roles.values(), name) {
        return Ok(role.clone());
    }

    let role = guild_id
        .create_role(&ctx.http, EditRole::new().name(name))
        .await?;
    info!(guild_id = %guild_id, role_name = name, "Created role");
    Ok(role)
}

/// Accumulate a member's guild-level permissions.
///
/// Discord computes these as the union of the `@everyone` role (whose id
/// equals the guild id) and every role the member holds. Channel
/// overwrites are irrelevant for role management and are not applied.
pub fn effective_permissions<I>(
    guild_id: GuildId,
    roles: I,
    member_role_ids: &[RoleId],
) -> Permissions
where
    I: IntoIterator<Item = (RoleId, Permissions)>,
{
    let everyone = RoleId::new(guild_id.get());
    let mut permissions = Permissions::empty();
    for (role_id, role_permissions) in roles {
        if role_id == everyone || member_role_ids.contains(&role_id) {
            permissions |= role_permissions;
        }
    }
    permissions
}

/// Whether a member may manage roles.
///
/// Guild owners and administrators always pass; everyone else needs
/// MANAGE_ROLES.
pub fn can_manage_roles(permissions: Permissions, is_owner: bool) -> bool {
    is_owner
        || permissions.contains(Permissions::ADMINISTRATOR)
        || permissions.contains(Permissions::MANAGE_ROLES)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUILD: u64 = 500;

    fn guild_roles() -> Vec<(RoleId, Permissions)> {
        vec![
            // @everyone
            (RoleId::new(GUILD), Permissions::SEND_MESSAGES),
            (RoleId::new(10), Permissions::MANAGE_ROLES),
            (RoleId::new(11), Permissions::ADMINISTRATOR),
            (RoleId::new(12), Permissions::BAN_MEMBERS),
        ]
    }

    #[test]
    fn test_everyone_permissions_apply_without_roles() {
        let permissions = effective_permissions(GuildId::new(GUILD), guild_roles(), &[]);
        assert_eq!(permissions, Permissions::SEND_MESSAGES);
    }

    #[test]
    fn test_permissions_accumulate_across_roles() {
        let held = [RoleId::new(10), RoleId::new(12)];
        let permissions = effective_permissions(GuildId::new(GUILD), guild_roles(), &held);
        assert!(permissions.contains(Permissions::SEND_MESSAGES));
        assert!(permissions.contains(Permissions::MANAGE_ROLES));
        assert!(permissions.contains(Permissions::BAN_MEMBERS));
        assert!(!permissions.contains(Permissions::ADMINISTRATOR));
    }

    #[test]
    fn test_unknown_role_ids_contribute_nothing() {
        let held = [RoleId::new(999)];
        let permissions = effective_permissions(GuildId::new(GUILD), guild_roles(), &held);
        assert_eq!(permissions, Permissions::SEND_MESSAGES);
    }

    #[test]
    fn test_manage_roles_grants_access() {
        assert!(can_manage_roles(Permissions::MANAGE_ROLES, false));
    }

    #[test]
    fn test_administrator_grants_access() {
        assert!(can_manage_roles(Permissions::ADMINISTRATOR, false));
    }

    #[test]
    fn test_owner_bypasses_permissions() {
        assert!(can_manage_roles(Permissions::empty(), true));
    }

    #[test]
    fn test_plain_member_denied() {
        assert!(!can_manage_roles(
            Permissions::SEND_MESSAGES | Permissions::BAN_MEMBERS,
            false
        ));
    }
}
