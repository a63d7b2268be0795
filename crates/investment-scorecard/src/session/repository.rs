use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scorecard::report::views::ScorecardView;
use crate::scorecard::{Scorecard, ScorecardReport};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Repository record owning one session's scorecard.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub scorecard: Scorecard,
}

impl SessionRecord {
    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            scorecard: ScorecardReport::from(&self.scorecard).view(),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Records are cloned in and out; callers never hold a reference into the store.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError>;
    fn update(&self, record: SessionRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError>;
    fn remove(&self, id: &SessionId) -> Result<bool, RepositoryError>;
    fn count(&self) -> Result<usize, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session limit of {limit} reached")]
    CapacityExceeded { limit: usize },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// JSON shape returned by every session endpoint that shows the scorecard.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub scorecard: ScorecardView,
}
