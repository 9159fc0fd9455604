//! Database row types. These map directly to container rows and carry no
//! decoding; turning them into display models happens in `qdb-history`.
use rusqlite::types::Value;

pub struct UserRow {
    pub external_id: i64,
    pub display_name: String,
}

/// Opaque join key between a participant and their messages.
///
/// Kept as the raw SQLite value so it binds back into the message query with
/// the same storage class it was read with.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationKey(pub Value);

pub struct MessageRow {
    /// `None` when `fromUser` is NULL.
    pub from_user: Option<Value>,
    pub participant_hash: Value,
    /// `None` when the data column holds neither BLOB nor TEXT.
    pub payload: Option<Vec<u8>>,
    pub date: RowDate,
}

/// The `date` column as stored.
///
/// SQLite's `ORDER BY` places NULL before every number and TEXT/BLOB after
/// every number; callers mapping these to timestamps must keep that order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowDate {
    Missing,
    Days(f64),
    NonNumeric,
}

