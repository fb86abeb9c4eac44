use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;

const TOKEN_LEN: usize = 43;

/// The secret a client presents to prove it owns a session.
///
/// Never persisted; stores only ever see the [`Verifier`] derived from it.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn generate() -> Self {
        SessionToken(nanoid::nanoid!(TOKEN_LEN))
    }

    pub fn verifier(&self) -> Verifier {
        let digest = Sha256::digest(self.0.as_bytes());
        Verifier(hex::encode(digest))
    }
}

// Keep tokens out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Store key of a session: hex-encoded SHA-256 of its token.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Verifier(pub String);

impl fmt::Display for Verifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One login of one user.
///
/// Fields this crate does not know about are kept in `extra` and written back
/// untouched on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub expiration: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub login: DateTime<Utc>,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Session {
    pub fn new(login: DateTime<Utc>, expiration: DateTime<Utc>) -> Self {
        Session {
            expiration,
            login,
            last_activity: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_last_activity(mut self, at: DateTime<Utc>) -> Self {
        self.last_activity = Some(at);
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration <= now
    }

    /// Time since the last recorded activity, if any was recorded.
    pub fn idle_for(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.last_activity.map(|at| now - at)
    }
}

/// All sessions of a single user, keyed by verifier.
pub type SessionCollection = HashMap<Verifier, Session>;
