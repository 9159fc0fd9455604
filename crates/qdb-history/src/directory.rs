use qdb_db::ContainerError;
use qdb_types::Participant;

use crate::History;

impl History {
    /// Every user in the container, in store order.
    pub fn list_participants(&self) -> Result<Vec<Participant>, ContainerError> {
        let users = self.container().list_users()?;
        Ok(users
            .into_iter()
            .map(|u| Participant::new(u.external_id, u.display_name))
            .collect())
    }

    /// Directory lookup by ICQ number, used when a caller has only the id.
    pub fn find_participant(&self, external_id: i64) -> Result<Option<Participant>, ContainerError> {
        Ok(self
            .list_participants()?
            .into_iter()
            .find(|p| p.external_id == external_id))
    }
}
