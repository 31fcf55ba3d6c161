//! Mirrored roster documents.

use serde::{Deserialize, Serialize};

/// One mirrored roster entry, keyed on `username`.
///
/// Field names double as the remote document keys, so the `FIELD_*`
/// constants below must stay in sync with the struct definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDocument {
    pub username: String,
    pub has_general_role: bool,
    pub has_singles_role: bool,
    pub has_doubles_role: bool,
}

impl MemberDocument {
    /// Collection the mirror writes to.
    pub const COLLECTION: &'static str = "server_members";

    /// Document key for the general opt-in flag.
    pub const FIELD_GENERAL: &'static str = "has_general_role";

    /// Document key for the singles play-format flag.
    pub const FIELD_SINGLES: &'static str = "has_singles_role";

    /// Document key for the doubles play-format flag.
    pub const FIELD_DOUBLES: &'static str = "has_doubles_role";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_constants_match_serialized_keys() {
        let member = MemberDocument {
            username: "alice".to_string(),
            has_general_role: true,
            has_singles_role: false,
            has_doubles_role: true,
        };

        let doc = mongodb::bson::to_document(&member).expect("serialize");
        assert!(doc.contains_key("username"));
        assert!(doc.contains_key(MemberDocument::FIELD_GENERAL));
        assert!(doc.contains_key(MemberDocument::FIELD_SINGLES));
        assert!(doc.contains_key(MemberDocument::FIELD_DOUBLES));
        assert_eq!(doc.len(), 4);
    }
}
