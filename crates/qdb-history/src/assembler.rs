use chrono::NaiveDateTime;
use qdb_db::models::{MessageRow, RowDate};
use qdb_db::queries::{query_conversation_key, query_messages};
use qdb_db::{Container, ContainerError};
use qdb_decode::{BINARY_DATA_SENTINEL, NO_MESSAGE_SENTINEL, PayloadDecoder, normalize};
use qdb_types::{Conversation, NormalizedMessage, Participant, SenderRole};
use tracing::{debug, info, warn};

use crate::ConversationSource;

/// Sender name shown for messages the local account wrote.
pub const DEFAULT_ME_LABEL: &str = "Me";

/// Extraction core over one container.
pub struct History {
    container: Container,
    decoder: PayloadDecoder,
    me_label: String,
}

impl History {
    pub fn new(container: Container) -> Self {
        Self {
            container,
            decoder: PayloadDecoder::default(),
            me_label: DEFAULT_ME_LABEL.to_string(),
        }
    }

    pub fn with_decoder(mut self, decoder: PayloadDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn with_me_label(mut self, label: impl Into<String>) -> Self {
        self.me_label = label.into();
        self
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Resolve the participant's conversation key and decode every message
    /// for it, in the store's `date` order.
    ///
    /// Key lookup and message fetch share one connection. A participant with
    /// no key is logged and comes back as an unresolved, empty conversation.
    /// Undecodable messages keep their slot with sentinel text.
    pub fn load_conversation(
        &self,
        external_id: i64,
        display_name: &str,
    ) -> Result<Conversation, ContainerError> {
        let participant = Participant::new(external_id, display_name);
        let schema = self.container.schema();

        let rows = self.container.with_conn(|conn| {
            let Some(key) = query_conversation_key(conn, schema, external_id)? else {
                return Ok(None);
            };
            query_messages(conn, schema, &key).map(Some)
        })?;

        let Some(rows) = rows else {
            warn!("No participant found for ICQ number {}", external_id);
            return Ok(Conversation::unresolved(participant));
        };

        let messages: Vec<NormalizedMessage> = rows
            .iter()
            .map(|row| self.normalize_row(row, display_name))
            .collect();

        info!(
            external_id,
            count = messages.len(),
            "Loaded conversation with {}",
            display_name
        );

        Ok(Conversation {
            participant,
            resolved: true,
            messages,
        })
    }

    fn normalize_row(&self, row: &MessageRow, display_name: &str) -> NormalizedMessage {
        let sender_role = SenderRole::from_sender_present(row.from_user.is_some());
        let sender_name = match sender_role {
            SenderRole::Me => self.me_label.clone(),
            SenderRole::Other => display_name.to_string(),
        };

        let text = self.decoder.decode_value(row.payload.as_deref());
        if text == NO_MESSAGE_SENTINEL || text == BINARY_DATA_SENTINEL {
            debug!(date = ?row.date, "Payload not decodable, substituted {}", text);
        }

        NormalizedMessage {
            text,
            sender_role,
            sender_name,
            timestamp: row_timestamp(row.date),
        }
    }
}

/// NULL dates sort first in the store and non-numeric ones last; pinning
/// them to the ends of the calendar keeps the conversation non-decreasing.
fn row_timestamp(date: RowDate) -> NaiveDateTime {
    match date {
        RowDate::Days(days) => normalize(days),
        RowDate::Missing => NaiveDateTime::MIN,
        RowDate::NonNumeric => NaiveDateTime::MAX,
    }
}

impl ConversationSource for History {
    fn participants(&self) -> Result<Vec<Participant>, ContainerError> {
        self.list_participants()
    }

    fn conversation(
        &self,
        external_id: i64,
        display_name: &str,
    ) -> Result<Conversation, ContainerError> {
        self.load_conversation(external_id, display_name)
    }
}
