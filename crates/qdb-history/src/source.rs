use qdb_db::ContainerError;
use qdb_types::{Conversation, Participant};

/// What a presentation layer needs from the extraction core.
///
/// A terminal transcript, a JSON export and an interactive browser all sit
/// on these two calls and nothing else.
pub trait ConversationSource {
    fn participants(&self) -> Result<Vec<Participant>, ContainerError>;

    /// Messages exchanged with one participant, oldest first. An unknown
    /// participant yields an unresolved, empty conversation rather than an
    /// error.
    fn conversation(
        &self,
        external_id: i64,
        display_name: &str,
    ) -> Result<Conversation, ContainerError>;
}
