//! Query timing and connection pool gauges.
//!
//! Every repository call goes through a [`QueryTimer`], which records one
//! `database_query_duration_seconds` sample labelled with the repository,
//! the query and how the call ended. Calls that fail at the database also
//! bump `database_query_errors_total`.

use metrics::{counter, gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

use domain::DomainError;

/// How a timed repository call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    Ok,
    /// The database answered but the operation was refused, e.g. an expired
    /// or used-up invite code.
    Rejected,
    Error,
}

impl QueryOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryOutcome::Ok => "ok",
            QueryOutcome::Rejected => "rejected",
            QueryOutcome::Error => "error",
        }
    }
}

/// Maps a repository result to a [`QueryOutcome`].
pub trait Outcome {
    fn outcome(&self) -> QueryOutcome;
}

impl<T> Outcome for Result<T, sqlx::Error> {
    fn outcome(&self) -> QueryOutcome {
        match self {
            Ok(_) => QueryOutcome::Ok,
            Err(_) => QueryOutcome::Error,
        }
    }
}

impl<T> Outcome for Result<T, DomainError> {
    fn outcome(&self) -> QueryOutcome {
        match self {
            Ok(_) => QueryOutcome::Ok,
            Err(DomainError::StorageUnavailable(_)) => QueryOutcome::Error,
            Err(_) => QueryOutcome::Rejected,
        }
    }
}

/// Records one repository call.
pub fn record_query(repository: &'static str, query: &'static str, outcome: QueryOutcome, secs: f64) {
    histogram!(
        "database_query_duration_seconds",
        "repository" => repository,
        "query" => query,
        "outcome" => outcome.as_str()
    )
    .record(secs);

    if outcome == QueryOutcome::Error {
        counter!(
            "database_query_errors_total",
            "repository" => repository,
            "query" => query
        )
        .increment(1);
    }
}

/// Sets the pool gauges. Called on every scrape of `/metrics`.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();

    gauge!("database_connections_active").set(size.saturating_sub(idle) as f64);
    gauge!("database_connections_idle").set(idle as f64);
    gauge!("database_connections_total").set(size as f64);
}

/// Times one repository call from construction until [`QueryTimer::finish`].
///
/// ```ignore
/// let timer = QueryTimer::new("trip", "find_trip_by_id");
/// let result = sqlx::query_as::<_, TripEntity>(...).fetch_optional(&pool).await;
/// timer.finish(&result);
/// result
/// ```
pub struct QueryTimer {
    repository: &'static str,
    query: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(repository: &'static str, query: &'static str) -> Self {
        Self {
            repository,
            query,
            start: Instant::now(),
        }
    }

    /// Records the elapsed time with the outcome of `result`.
    pub fn finish<R: Outcome>(self, result: &R) {
        record_query(
            self.repository,
            self.query,
            result.outcome(),
            self.start.elapsed().as_secs_f64(),
        );
    }
}
