//! Table and column names of the ICQ `.qdb` schema.
//!
//! Only the pieces the extraction pipeline touches are listed. The container
//! carries more tables; use the schema reader in [`crate::queries`] to see them.

/// Contact list. Columns are read positionally: ICQ number, then nickname.
pub mod users {
    pub const TABLE: &str = "Users";
}

/// Maps an ICQ number to the hash that keys its messages.
pub mod participants {
    pub const TABLE: &str = "Participants";
    pub const USER_ID: &str = "userid";
    pub const HASH: &str = "participantsHash";
}

/// Message history.
pub mod messages {
    pub const TABLE: &str = "Messages";
    /// NULL when the local account sent the message.
    pub const FROM_USER: &str = "fromUser";
    pub const HASH: &str = "participantsHash";
    /// Wrapped rich-text payload.
    pub const DATA: &str = "data";
    /// OLE Automation date (days since 1899-12-30).
    pub const DATE: &str = "date";
}

/// Table names used by the queries. Column names are fixed by the format,
/// but exports from different client builds have been seen with renamed
/// tables, so these can be overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNames {
    pub users: String,
    pub participants: String,
    pub messages: String,
}

impl Default for SchemaNames {
    fn default() -> Self {
        Self {
            users: users::TABLE.to_string(),
            participants: participants::TABLE.to_string(),
            messages: messages::TABLE.to_string(),
        }
    }
}

/// Quote an SQL identifier so arbitrary table names are safe to interpolate.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_plain_and_embedded_quotes() {
        assert_eq!(quote_ident("Users"), "\"Users\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn default_names() {
        let names = SchemaNames::default();
        assert_eq!(names.users, "Users");
        assert_eq!(names.participants, "Participants");
        assert_eq!(names.messages, "Messages");
    }
}
