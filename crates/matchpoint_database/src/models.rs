//! Roster row models.

use diesel::prelude::*;

/// Database row for the server_members table.
///
/// Flags reflect last-known role possession, not guaranteed real-time
/// accurate; the bot refreshes them on reaction events and startup sync.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::server_members)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MemberRow {
    pub id: i32,
    pub username: String,
    pub has_general_role: bool,
    pub has_singles_role: bool,
    pub has_doubles_role: bool,
}

/// Insertable struct for the server_members table.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = crate::schema::server_members)]
pub struct NewMember {
    pub username: String,
    pub has_general_role: bool,
    pub has_singles_role: bool,
    pub has_doubles_role: bool,
}

/// The club roles the roster tracks, one boolean column each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RoleFlag {
    /// The `general` opt-in role.
    #[display("general")]
    General,
    /// The `singles` play-format role.
    #[display("singles")]
    Singles,
    /// The `doubles` play-format role.
    #[display("doubles")]
    Doubles,
}

impl RoleFlag {
    /// The exact Discord role name this flag tracks.
    pub fn role_name(&self) -> &'static str {
        match self {
            RoleFlag::General => "general",
            RoleFlag::Singles => "singles",
            RoleFlag::Doubles => "doubles",
        }
    }

    /// Map a Discord role name back to its flag, if the roster tracks it.
    pub fn from_role_name(name: &str) -> Option<Self> {
        match name {
            "general" => Some(RoleFlag::General),
            "singles" => Some(RoleFlag::Singles),
            "doubles" => Some(RoleFlag::Doubles),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_flag_round_trip() {
        for flag in [RoleFlag::General, RoleFlag::Singles, RoleFlag::Doubles] {
            assert_eq!(RoleFlag::from_role_name(flag.role_name()), Some(flag));
        }
    }

    #[test]
    fn test_role_flag_unknown_name() {
        assert_eq!(RoleFlag::from_role_name("mixed"), None);
        assert_eq!(RoleFlag::from_role_name("General"), None);
    }

    #[test]
    fn test_role_flag_display() {
        assert_eq!(RoleFlag::Singles.to_string(), "singles");
    }
}
