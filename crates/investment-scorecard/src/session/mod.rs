//! Per-session scorecards behind a storage abstraction and a JSON router.

pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use repository::{RepositoryError, SessionId, SessionRecord, SessionRepository, SessionView};
pub use router::scorecard_router;
pub use service::{ScorecardSessionService, SessionServiceError};
