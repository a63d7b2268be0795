use chrono::{DateTime, Utc};
use investment_scorecard::config::SessionConfig;
use investment_scorecard::session::{RepositoryError, SessionId, SessionRecord, SessionRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

type SessionMap = HashMap<SessionId, SessionRecord>;

/// Process-local session store bounded by `capacity`.
///
/// A session untouched for longer than `idle_ttl` has ended and is dropped on the next access.
#[derive(Clone)]
pub(crate) struct InMemorySessionRepository {
    records: Arc<Mutex<SessionMap>>,
    capacity: usize,
    idle_ttl: Duration,
}

impl InMemorySessionRepository {
    pub(crate) fn new(capacity: usize, idle_ttl: Duration) -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            capacity,
            idle_ttl,
        }
    }

    pub(crate) fn from_config(config: &SessionConfig) -> Self {
        Self::new(
            config.max_sessions,
            Duration::from_secs(config.idle_ttl_secs),
        )
    }

    fn is_expired(&self, record: &SessionRecord, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(record.updated_at)
            .to_std()
            .map(|idle| idle > self.idle_ttl)
            .unwrap_or(false)
    }

    fn evict_expired(&self, records: &mut SessionMap) {
        let now = Utc::now();
        let before = records.len();
        records.retain(|_, record| !self.is_expired(record, now));
        let evicted = before - records.len();
        if evicted > 0 {
            debug!(evicted, remaining = records.len(), "idle scorecard sessions evicted");
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionMap>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session store mutex poisoned".to_string()))
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.lock()?;
        self.evict_expired(&mut guard);
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        if guard.len() >= self.capacity {
            return Err(RepositoryError::CapacityExceeded {
                limit: self.capacity,
            });
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let mut guard = self.lock()?;
        self.evict_expired(&mut guard);
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        let mut guard = self.lock()?;
        Ok(guard.remove(id).is_some())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        let mut guard = self.lock()?;
        self.evict_expired(&mut guard);
        Ok(guard.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScoreAssignment {
    pub(crate) factor: String,
    pub(crate) subfactor: String,
    pub(crate) score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommentAssignment {
    pub(crate) factor: String,
    pub(crate) subfactor: String,
    pub(crate) comment: String,
}

fn split_target(raw: &str) -> Result<(String, String, String), String> {
    let (target, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FACTOR/SUBFACTOR=VALUE, got '{raw}'"))?;
    let (factor, subfactor) = target
        .split_once('/')
        .ok_or_else(|| format!("expected FACTOR/SUBFACTOR before '=', got '{target}'"))?;
    let (factor, subfactor) = (factor.trim(), subfactor.trim());
    if factor.is_empty() || subfactor.is_empty() {
        return Err(format!("factor and subfactor must be named in '{raw}'"));
    }
    Ok((factor.to_string(), subfactor.to_string(), value.to_string()))
}

pub(crate) fn parse_score_assignment(raw: &str) -> Result<ScoreAssignment, String> {
    let (factor, subfactor, value) = split_target(raw)?;
    let score = value
        .trim()
        .parse::<i64>()
        .map_err(|err| format!("failed to parse score '{value}' ({err})"))?;
    Ok(ScoreAssignment {
        factor,
        subfactor,
        score,
    })
}

pub(crate) fn parse_comment_assignment(raw: &str) -> Result<CommentAssignment, String> {
    let (factor, subfactor, comment) = split_target(raw)?;
    Ok(CommentAssignment {
        factor,
        subfactor,
        comment,
    })
}

/// Comma-separated raw weights, one per factor.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WeightList(pub(crate) Vec<f64>);

pub(crate) fn parse_weights(raw: &str) -> Result<WeightList, String> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|err| format!("failed to parse weight '{}' ({err})", part.trim()))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(WeightList)
}
