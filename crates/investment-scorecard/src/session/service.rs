use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::repository::{RepositoryError, SessionId, SessionRecord, SessionRepository};
use crate::export::{ExportError, ExportFormat};
use crate::scorecard::{RadarChart, Scorecard, ScorecardBlueprint, ScorecardError};

/// Service owning session lifecycle and routing every edit through the scorecard's setters.
pub struct ScorecardSessionService<R> {
    repository: Arc<R>,
    blueprint: Arc<ScorecardBlueprint>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("sc-{id:06}"))
}

impl<R> ScorecardSessionService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_blueprint(repository, ScorecardBlueprint::standard())
    }

    pub fn with_blueprint(repository: Arc<R>, blueprint: ScorecardBlueprint) -> Self {
        Self {
            repository,
            blueprint: Arc::new(blueprint),
        }
    }

    /// Start a session holding a freshly built scorecard.
    pub fn create(&self) -> Result<SessionRecord, SessionServiceError> {
        let scorecard = Scorecard::new(&self.blueprint)?;
        let now = Utc::now();
        let record = SessionRecord {
            id: next_session_id(),
            created_at: now,
            updated_at: now,
            scorecard,
        };

        let stored = self.repository.insert(record)?;
        let active = self.repository.count().unwrap_or_default();
        info!(session_id = %stored.id, active, "scorecard session created");
        Ok(stored)
    }

    pub fn get(&self, id: &SessionId) -> Result<SessionRecord, SessionServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn update_score(
        &self,
        id: &SessionId,
        factor: &str,
        subfactor: &str,
        score: i64,
    ) -> Result<SessionRecord, SessionServiceError> {
        self.modify(id, "score", |scorecard| {
            scorecard.update_score(factor, subfactor, score)
        })
    }

    pub fn update_comment(
        &self,
        id: &SessionId,
        factor: &str,
        subfactor: &str,
        comment: &str,
    ) -> Result<SessionRecord, SessionServiceError> {
        self.modify(id, "comment", |scorecard| {
            scorecard.update_comment(factor, subfactor, comment)
        })
    }

    pub fn update_weights(
        &self,
        id: &SessionId,
        raw_weights: &[f64],
    ) -> Result<SessionRecord, SessionServiceError> {
        self.modify(id, "weights", |scorecard| {
            scorecard.update_weights(raw_weights)
        })
    }

    pub fn set_equal_weights(&self, id: &SessionId) -> Result<SessionRecord, SessionServiceError> {
        self.modify(id, "equal_weights", Scorecard::set_equal_weights)
    }

    pub fn chart(&self, id: &SessionId) -> Result<RadarChart, SessionServiceError> {
        let record = self.get(id)?;
        Ok(RadarChart::from_scorecard(&record.scorecard))
    }

    pub fn export(
        &self,
        id: &SessionId,
        format: ExportFormat,
    ) -> Result<Vec<u8>, SessionServiceError> {
        let record = self.get(id)?;
        let bytes = format.render(&record.scorecard)?;
        debug!(session_id = %id, %format, bytes = bytes.len(), "scorecard exported");
        Ok(bytes)
    }

    /// End a session, dropping its scorecard.
    pub fn close(&self, id: &SessionId) -> Result<(), SessionServiceError> {
        if !self.repository.remove(id)? {
            return Err(RepositoryError::NotFound.into());
        }
        info!(session_id = %id, "scorecard session closed");
        Ok(())
    }

    /// Read-modify-write of one session. Rejected edits leave the stored record untouched.
    fn modify<F>(
        &self,
        id: &SessionId,
        action: &'static str,
        edit: F,
    ) -> Result<SessionRecord, SessionServiceError>
    where
        F: FnOnce(&mut Scorecard) -> Result<(), ScorecardError>,
    {
        let mut record = self.get(id)?;
        if let Err(err) = edit(&mut record.scorecard) {
            warn!(session_id = %id, action, kind = err.code(), "scorecard edit rejected: {err}");
            return Err(err.into());
        }

        record.updated_at = Utc::now();
        self.repository.update(record.clone())?;
        debug!(
            session_id = %id,
            action,
            total_score = record.scorecard.total_score(),
            "scorecard updated"
        );
        Ok(record)
    }
}

/// Error raised by the session service.
#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    #[error(transparent)]
    Scorecard(#[from] ScorecardError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
