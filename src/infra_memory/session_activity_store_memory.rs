use crate::domain_model::*;
use crate::domain_port::*;
use dashmap::DashMap;

/// Process-local store. Collections live in a sharded map, so calls for one
/// user are serialized while different users proceed in parallel.
#[derive(Debug, Default)]
pub struct MemorySessionActivityStore {
    sessions: DashMap<UserId, SessionCollection>,
}

impl MemorySessionActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn has_collection(&self, user_id: UserId) -> bool {
        self.sessions.contains_key(&user_id)
    }
}

#[async_trait::async_trait]
impl SessionActivityStore for MemorySessionActivityStore {
    async fn get_all(&self, user_id: UserId) -> Result<SessionCollection, SessionStoreError> {
        Ok(self
            .sessions
            .get(&user_id)
            .map(|sessions| sessions.value().clone())
            .unwrap_or_default())
    }

    async fn get(
        &self,
        user_id: UserId,
        verifier: &Verifier,
    ) -> Result<Option<Session>, SessionStoreError> {
        Ok(self
            .sessions
            .get(&user_id)
            .and_then(|sessions| sessions.get(verifier).cloned()))
    }

    async fn update(
        &self,
        user_id: UserId,
        verifier: &Verifier,
        session: &Session,
    ) -> Result<(), SessionStoreError> {
        self.sessions
            .entry(user_id)
            .or_default()
            .insert(verifier.clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, user_id: UserId, verifier: &Verifier) -> Result<(), SessionStoreError> {
        // The shard guard must be released before remove_if takes it again.
        {
            let Some(mut sessions) = self.sessions.get_mut(&user_id) else {
                return Ok(());
            };
            sessions.remove(verifier);
        }
        self.sessions
            .remove_if(&user_id, |_, sessions| sessions.is_empty());
        Ok(())
    }
}
