use qdb_db::ContainerError;
use qdb_types::{Conversation, Participant};

use crate::ConversationSource;

/// Browsing state for a presentation layer: the participant list and the
/// one conversation currently on screen.
///
/// Selecting a participant discards the displayed conversation before the
/// new one loads, so a failed load leaves nothing stale behind and two
/// conversations are never merged.
pub struct Session<S> {
    source: S,
    participants: Vec<Participant>,
    current: Option<Conversation>,
}

impl<S: ConversationSource> Session<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            participants: Vec::new(),
            current: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Reload the participant list from the source.
    pub fn refresh(&mut self) -> Result<&[Participant], ContainerError> {
        self.participants = self.source.participants()?;
        Ok(&self.participants)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn current(&self) -> Option<&Conversation> {
        self.current.as_ref()
    }

    pub fn select(
        &mut self,
        external_id: i64,
        display_name: &str,
    ) -> Result<&Conversation, ContainerError> {
        self.current = None;
        let conversation = self.source.conversation(external_id, display_name)?;
        Ok(self.current.insert(conversation))
    }

    /// Select by position in the participant list. `None` if out of range.
    pub fn select_index(&mut self, index: usize) -> Result<Option<&Conversation>, ContainerError> {
        let Some(participant) = self.participants.get(index).cloned() else {
            return Ok(None);
        };
        self.select(participant.external_id, &participant.display_name)
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::path::PathBuf;

    use qdb_types::{NormalizedMessage, SenderRole};

    /// In-memory source: every participant has exactly `id` messages,
    /// except id 13 which fails at the store level.
    struct FakeSource {
        loads: Cell<usize>,
    }

    impl ConversationSource for FakeSource {
        fn participants(&self) -> Result<Vec<Participant>, ContainerError> {
            Ok(vec![Participant::new(1, "one"), Participant::new(2, "two")])
        }

        fn conversation(
            &self,
            external_id: i64,
            display_name: &str,
        ) -> Result<Conversation, ContainerError> {
            self.loads.set(self.loads.get() + 1);
            if external_id == 13 {
                return Err(ContainerError::NotFound(PathBuf::from("gone.qdb")));
            }
            let messages = (0..external_id)
                .map(|i| NormalizedMessage {
                    text: format!("{display_name} #{i}"),
                    sender_role: SenderRole::Other,
                    sender_name: display_name.to_string(),
                    timestamp: qdb_decode::normalize(i as f64),
                })
                .collect();
            Ok(Conversation {
                participant: Participant::new(external_id, display_name),
                resolved: true,
                messages,
            })
        }
    }

    fn session() -> Session<FakeSource> {
        Session::new(FakeSource { loads: Cell::new(0) })
    }

    #[test]
    fn selection_replaces_previous_conversation() {
        let mut s = session();
        assert_eq!(s.select(2, "two").unwrap().len(), 2);
        let conv = s.select(1, "one").unwrap();
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.messages[0].text, "one #0");
        assert_eq!(s.current().unwrap().participant.external_id, 1);
    }

    #[test]
    fn failed_load_clears_current() {
        let mut s = session();
        s.select(2, "two").unwrap();
        assert!(s.select(13, "broken").is_err());
        assert!(s.current().is_none());
    }

    #[test]
    fn select_by_index() {
        let mut s = session();
        assert_eq!(s.refresh().unwrap().len(), 2);
        let conv = s.select_index(1).unwrap().unwrap();
        assert_eq!(conv.participant.display_name, "two");
        assert!(s.select_index(5).unwrap().is_none());
        assert_eq!(s.source().loads.get(), 1);
    }
}
