use crate::domain_model::*;
use crate::domain_port::*;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::collections::HashMap;

/// One hash per user: field is the verifier, value the JSON session record.
///
/// Redis drops a hash once its last field is deleted, which gives the
/// "no empty collections" rule for free.
pub struct RedisSessionActivityStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisSessionActivityStore {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        RedisSessionActivityStore {
            conn,
            prefix: prefix.into(),
        }
    }

    fn key(&self, user_id: UserId) -> String {
        format!("{}:{}", self.prefix, user_id)
    }
}

fn decode(raw: &str) -> Result<Session, SessionStoreError> {
    serde_json::from_str(raw).map_err(|e| SessionStoreError::Codec(e.to_string()))
}

#[async_trait::async_trait]
impl SessionActivityStore for RedisSessionActivityStore {
    async fn get_all(&self, user_id: UserId) -> Result<SessionCollection, SessionStoreError> {
        let key = self.key(user_id);
        let mut conn = self.conn.clone();
        let raw: HashMap<String, String> = conn
            .hgetall(&key)
            .await
            .map_err(|e| SessionStoreError::Store(e.to_string()))?;

        raw.into_iter()
            .map(|(verifier, session)| Ok((Verifier(verifier), decode(&session)?)))
            .collect()
    }

    async fn get(
        &self,
        user_id: UserId,
        verifier: &Verifier,
    ) -> Result<Option<Session>, SessionStoreError> {
        let key = self.key(user_id);
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .hget(&key, &verifier.0)
            .await
            .map_err(|e| SessionStoreError::Store(e.to_string()))?;
        raw.as_deref().map(decode).transpose()
    }

    async fn update(
        &self,
        user_id: UserId,
        verifier: &Verifier,
        session: &Session,
    ) -> Result<(), SessionStoreError> {
        let key = self.key(user_id);
        let raw =
            serde_json::to_string(session).map_err(|e| SessionStoreError::Codec(e.to_string()))?;
        let mut conn = self.conn.clone();
        let _: () = conn
            .hset(&key, &verifier.0, raw)
            .await
            .map_err(|e| SessionStoreError::Store(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, user_id: UserId, verifier: &Verifier) -> Result<(), SessionStoreError> {
        let key = self.key(user_id);
        let mut conn = self.conn.clone();
        let _: () = conn
            .hdel(&key, &verifier.0)
            .await
            .map_err(|e| SessionStoreError::Store(e.to_string()))?;
        Ok(())
    }
}
