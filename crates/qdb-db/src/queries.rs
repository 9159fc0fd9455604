use crate::models::{ConversationKey, MessageRow, RowDate, UserRow};
use crate::schema::{SchemaNames, messages, participants, quote_ident};
use crate::{Container, Result};
use rusqlite::types::{Value, ValueRef};
use rusqlite::{Connection, OptionalExtension};
use tracing::warn;

/// Up to `limit` rows of a table, every cell rendered for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSample {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Container {
    // -- Schema reader --

    pub fn list_tables(&self) -> Result<Vec<String>> {
        self.with_conn(query_tables)
    }

    pub fn columns_of(&self, table: &str) -> Result<Vec<String>> {
        self.with_conn(|conn| query_columns(conn, table))
    }

    pub fn sample_rows(&self, table: &str, limit: u32) -> Result<TableSample> {
        self.with_conn(|conn| query_sample(conn, table, limit))
    }

    // -- Users --

    pub fn list_users(&self) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| query_users(conn, self.schema()))
    }
}

pub fn query_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;
    Ok(names)
}

/// Column names in declaration order. Unknown tables yield an empty list.
pub fn query_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let names = stmt
        .query_map([table], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;
    Ok(names)
}

pub fn query_sample(conn: &Connection, table: &str, limit: u32) -> Result<TableSample> {
    let sql = format!("SELECT * FROM {} LIMIT ?1", quote_ident(table));
    let mut stmt = conn.prepare(&sql)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();

    let mut rows = Vec::new();
    let mut cursor = stmt.query([limit])?;
    while let Some(row) = cursor.next()? {
        let mut cells = Vec::with_capacity(width);
        for idx in 0..width {
            cells.push(render_value(row.get_ref(idx)?));
        }
        rows.push(cells);
    }

    Ok(TableSample {
        table: table.to_string(),
        columns,
        rows,
    })
}

/// Users in store order. The first column is the ICQ number, the second the
/// nickname; a NULL nickname becomes the empty string. Rows whose number is
/// not an integer are logged and skipped.
pub fn query_users(conn: &Connection, schema: &SchemaNames) -> Result<Vec<UserRow>> {
    let sql = format!("SELECT * FROM {}", quote_ident(&schema.users));
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt
        .query_map([], |row| {
            let id = row.get_ref(0)?;
            let Some(external_id) = user_id(id) else {
                warn!("Skipping user with unusable id {}", render_value(id));
                return Ok(None);
            };

            let display_name = match row.get_ref(1)? {
                ValueRef::Null => String::new(),
                other => render_value(other),
            };

            Ok(Some(UserRow {
                external_id,
                display_name,
            }))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows.into_iter().flatten().collect())
}

/// ICQ numbers are usually INTEGER but older exports store them as TEXT.
fn user_id(value: ValueRef<'_>) -> Option<i64> {
    match value {
        ValueRef::Integer(i) => Some(i),
        ValueRef::Text(t) => std::str::from_utf8(t).ok()?.trim().parse().ok(),
        _ => None,
    }
}

pub fn query_conversation_key(
    conn: &Connection,
    schema: &SchemaNames,
    external_id: i64,
) -> Result<Option<ConversationKey>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE {} = ?1",
        participants::HASH,
        quote_ident(&schema.participants),
        participants::USER_ID,
    );

    let key = conn
        .query_row(&sql, [external_id], |row| row.get::<_, Value>(0))
        .optional()?;

    Ok(key.map(ConversationKey))
}

/// All messages for one key, oldest first. Ordering is the store's.
pub fn query_messages(
    conn: &Connection,
    schema: &SchemaNames,
    key: &ConversationKey,
) -> Result<Vec<MessageRow>> {
    let sql = format!(
        "SELECT {from}, {hash}, {data}, {date}
         FROM {table}
         WHERE {hash} = ?1
         ORDER BY {date}",
        from = messages::FROM_USER,
        hash = messages::HASH,
        data = messages::DATA,
        date = messages::DATE,
        table = quote_ident(&schema.messages),
    );
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt
        .query_map([&key.0], |row| {
            let from_user = match row.get_ref(0)? {
                ValueRef::Null => None,
                other => Some(Value::from(other)),
            };
            let payload = match row.get_ref(2)? {
                ValueRef::Blob(bytes) | ValueRef::Text(bytes) => Some(bytes.to_vec()),
                _ => None,
            };

            let date = match row.get_ref(3)? {
                ValueRef::Null => RowDate::Missing,
                ValueRef::Integer(i) => RowDate::Days(i as f64),
                ValueRef::Real(f) => RowDate::Days(f),
                ValueRef::Text(_) | ValueRef::Blob(_) => RowDate::NonNumeric,
            };

            Ok(MessageRow {
                from_user,
                participant_hash: row.get(1)?,
                payload,
                date,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Render one cell for the diagnostic dump. Blobs are shown as escaped byte
/// strings.
pub fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("b\"{}\"", b.escape_ascii()),
    }
}
