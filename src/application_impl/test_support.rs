use crate::domain_model::*;
use crate::domain_port::*;
use crate::infra_memory::MemorySessionActivityStore;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

/// Memory store that counts mutating calls.
#[derive(Default)]
pub struct RecordingStore {
    pub inner: MemorySessionActivityStore,
    updates: AtomicUsize,
    deletes: AtomicUsize,
}

impl RecordingStore {
    pub fn mutations(&self) -> usize {
        self.updates() + self.deletes()
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    /// Seed a session without counting it as a mutation.
    pub async fn seed(&self, user_id: UserId, session: Session) -> Verifier {
        let verifier = SessionToken::generate().verifier();
        self.inner.update(user_id, &verifier, &session).await.unwrap();
        verifier
    }
}

#[async_trait::async_trait]
impl SessionActivityStore for RecordingStore {
    async fn get_all(&self, user_id: UserId) -> Result<SessionCollection, SessionStoreError> {
        self.inner.get_all(user_id).await
    }

    async fn get(
        &self,
        user_id: UserId,
        verifier: &Verifier,
    ) -> Result<Option<Session>, SessionStoreError> {
        self.inner.get(user_id, verifier).await
    }

    async fn update(
        &self,
        user_id: UserId,
        verifier: &Verifier,
        session: &Session,
    ) -> Result<(), SessionStoreError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update(user_id, verifier, session).await
    }

    async fn delete(&self, user_id: UserId, verifier: &Verifier) -> Result<(), SessionStoreError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(user_id, verifier).await
    }
}

/// Store whose every call fails.
pub struct UnavailableStore;

#[async_trait::async_trait]
impl SessionActivityStore for UnavailableStore {
    async fn get_all(&self, _user_id: UserId) -> Result<SessionCollection, SessionStoreError> {
        Err(SessionStoreError::Store("connection refused".to_string()))
    }

    async fn get(
        &self,
        _user_id: UserId,
        _verifier: &Verifier,
    ) -> Result<Option<Session>, SessionStoreError> {
        Err(SessionStoreError::Store("connection refused".to_string()))
    }

    async fn update(
        &self,
        _user_id: UserId,
        _verifier: &Verifier,
        _session: &Session,
    ) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::Store("connection refused".to_string()))
    }

    async fn delete(
        &self,
        _user_id: UserId,
        _verifier: &Verifier,
    ) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::Store("connection refused".to_string()))
    }
}

/// Memory store that serves reads and updates but fails every delete.
#[derive(Default)]
pub struct DeleteFailingStore {
    pub inner: MemorySessionActivityStore,
}

#[async_trait::async_trait]
impl SessionActivityStore for DeleteFailingStore {
    async fn get_all(&self, user_id: UserId) -> Result<SessionCollection, SessionStoreError> {
        self.inner.get_all(user_id).await
    }

    async fn get(
        &self,
        user_id: UserId,
        verifier: &Verifier,
    ) -> Result<Option<Session>, SessionStoreError> {
        self.inner.get(user_id, verifier).await
    }

    async fn update(
        &self,
        user_id: UserId,
        verifier: &Verifier,
        session: &Session,
    ) -> Result<(), SessionStoreError> {
        self.inner.update(user_id, verifier, session).await
    }

    async fn delete(
        &self,
        _user_id: UserId,
        _verifier: &Verifier,
    ) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::Store("READONLY replica".to_string()))
    }
}
