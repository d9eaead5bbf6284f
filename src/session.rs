//! Per-visitor assessment state.
//!
//! A session starts on the intake form, moves to the results view when an
//! analysis is stored, and goes back to the form on reset. The only
//! transitions are [`SessionState::set_result`] and [`SessionState::clear`];
//! a stored result is always replaced whole.
//!
//! Sessions live in a [`SessionStore`], an in-memory moka cache with a TTL.
//! Entries are sealed with a SHA-256 checksum when written and checked on
//! every read, so a corrupted entry is dropped instead of being served.

use crate::errors::AppError;
use crate::models::{AnalysisResult, Intake};
use chrono::{DateTime, Utc};
use moka::future::Cache;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::Duration;
use uuid::Uuid;

/// An analysis held by a session, with what the booking flow needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAnalysis {
    pub session_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    /// [`AnalysisResult::fingerprint`] of `analysis`.
    pub fingerprint: String,
    pub name: String,
    pub email: String,
    pub goal: String,
    pub analysis: AnalysisResult,
}

impl StoredAnalysis {
    pub fn new(session_id: Uuid, intake: &Intake, analysis: AnalysisResult) -> Self {
        Self {
            session_id,
            analyzed_at: Utc::now(),
            fingerprint: analysis.fingerprint(),
            name: intake.name.clone(),
            email: intake.email.clone(),
            goal: intake.goal.clone(),
            analysis,
        }
    }
}

/// What the visitor should be looking at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    Intake,
    Results(&'a StoredAnalysis),
}

/// The current-result state of one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    current: Option<StoredAnalysis>,
}

impl SessionState {
    /// Replaces any held result with `result`.
    pub fn set_result(&mut self, result: StoredAnalysis) {
        self.current = Some(result);
    }

    /// Discards the held result, returning the session to the intake form.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn view(&self) -> View<'_> {
        match &self.current {
            Some(result) => View::Results(result),
            None => View::Intake,
        }
    }

    pub fn current(&self) -> Option<&StoredAnalysis> {
        self.current.as_ref()
    }
}

/// A serialized value together with its SHA-256 checksum.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SealedEntry {
    data: String,
    checksum: String,
}

impl SealedEntry {
    fn seal<T: Serialize>(value: &T) -> Result<String, AppError> {
        let data = serde_json::to_string(value)?;
        let checksum = checksum(&data);
        Ok(serde_json::to_string(&SealedEntry { data, checksum })?)
    }

    /// Returns the value if the entry decodes and its checksum matches.
    fn unseal<T: DeserializeOwned>(sealed: &str) -> Option<T> {
        let entry: SealedEntry = serde_json::from_str(sealed).ok()?;

        if checksum(&entry.data) != entry.checksum {
            tracing::warn!(
                "Session entry failed validation: checksum mismatch (data length: {})",
                entry.data.len()
            );
            return None;
        }

        serde_json::from_str(&entry.data).ok()
    }
}

fn checksum(data: &str) -> String {
    hex::encode(Sha256::digest(data.as_bytes()))
}

pub fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {} not found or expired", id))
}

/// In-memory session storage keyed by session id.
#[derive(Clone)]
pub struct SessionStore {
    cache: Cache<Uuid, String>,
}

impl SessionStore {
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(max_capacity)
            .build();
        Self { cache }
    }

    /// Starts a new session on the intake form.
    pub async fn open(&self) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        self.write(id, &SessionState::default()).await?;
        tracing::debug!("Opened session {}", id);
        Ok(id)
    }

    /// Loads a session. `None` if it never existed, expired, or failed validation.
    pub async fn get(&self, id: Uuid) -> Option<SessionState> {
        let sealed = self.cache.get(&id).await?;
        match SealedEntry::unseal(&sealed) {
            Some(state) => Some(state),
            None => {
                self.cache.invalidate(&id).await;
                None
            }
        }
    }

    /// Stores `result` as the session's current analysis. The session must
    /// already exist; see [`SessionStore::open`].
    pub async fn set_result(&self, id: Uuid, result: StoredAnalysis) -> Result<(), AppError> {
        let mut state = self.get(id).await.ok_or_else(|| session_not_found(id))?;
        state.set_result(result);
        self.write(id, &state).await
    }

    /// Resets a session to the intake form. Returns false for unknown sessions.
    pub async fn clear(&self, id: Uuid) -> Result<bool, AppError> {
        let Some(mut state) = self.get(id).await else {
            return Ok(false);
        };
        state.clear();
        self.write(id, &state).await?;
        tracing::debug!("Cleared session {}", id);
        Ok(true)
    }

    async fn write(&self, id: Uuid, state: &SessionState) -> Result<(), AppError> {
        let sealed = SealedEntry::seal(state)?;
        self.cache.insert(id, sealed).await;
        Ok(())
    }

    #[cfg(test)]
    async fn tamper(&self, id: Uuid, from: &str, to: &str) {
        if let Some(sealed) = self.cache.get(&id).await {
            self.cache.insert(id, sealed.replace(from, to)).await;
        }
    }
}
