use std::collections::BTreeMap;

use super::participants::{ParticipantStore, StoreError};
use crate::models::{Participant, ParticipantFields, RegistrationId};

/// In-process implementation of ParticipantStore
///
/// Ids come from a monotonic counter so deleted ids are never handed out
/// again, matching the SQLite AUTOINCREMENT behaviour.
#[derive(Debug, Default)]
pub struct MemoryParticipantStore {
    rows: BTreeMap<RegistrationId, ParticipantFields>,
    last_id: RegistrationId,
    offline: bool,
}

impl MemoryParticipantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with StoreError::Unavailable
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }
}

impl ParticipantStore for MemoryParticipantStore {
    fn create(&mut self, fields: &ParticipantFields) -> Result<RegistrationId, StoreError> {
        self.check_online()?;
        self.last_id += 1;
        self.rows.insert(self.last_id, fields.clone());
        Ok(self.last_id)
    }

    fn find_by_id(&self, id: RegistrationId) -> Result<Option<Participant>, StoreError> {
        self.check_online()?;
        Ok(self.rows.get(&id).map(|fields| Participant {
            id,
            fields: fields.clone(),
        }))
    }

    fn update(
        &mut self,
        id: RegistrationId,
        fields: &ParticipantFields,
    ) -> Result<usize, StoreError> {
        self.check_online()?;
        match self.rows.get_mut(&id) {
            Some(row) => {
                *row = fields.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete(&mut self, id: RegistrationId) -> Result<usize, StoreError> {
        self.check_online()?;
        Ok(usize::from(self.rows.remove(&id).is_some()))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
