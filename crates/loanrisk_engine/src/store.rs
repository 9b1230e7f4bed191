//! Result store boundary.
//!
//! The engine hands each finished [`LoanAdjustedAssumption`] to a
//! [`ResultStore`] as an upsert keyed by (loan snapshot, scenario).
//! Upserts must be idempotent: re-running with identical inputs overwrites
//! the prior record rather than duplicating it. Concurrent upserts to
//! different keys need no coordination; the store serialises writers to the
//! same key (last-writer-wins).
//!
//! Transient write failures are retried with bounded backoff by
//! [`RetryingStore`] at this boundary; the engine core treats a failed
//! upsert as a reported failure for that pair only.

use crate::adjust::LoanAdjustedAssumption;
use loanrisk_core::types::{ScenarioId, SnapshotId};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Failures at the result-store boundary.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Transient infrastructure failure; worth retrying.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the record; retrying will not help.
    #[error("write rejected: {0}")]
    Rejected(String),
}

impl StoreError {
    /// Whether a retry could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Idempotent persistence of adjusted-assumption records.
pub trait ResultStore: Send + Sync {
    /// Inserts or overwrites the record for its (snapshot, scenario) key.
    fn upsert(&self, record: LoanAdjustedAssumption) -> Result<(), StoreError>;
}

/// In-process store backed by a mutex-guarded map, for tests and the CLI.
#[derive(Debug, Default)]
pub struct InMemoryResultStore {
    records: Mutex<HashMap<(SnapshotId, ScenarioId), LoanAdjustedAssumption>>,
}

impl InMemoryResultStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches a stored record by key.
    pub fn get(
        &self,
        snapshot_id: SnapshotId,
        scenario_id: ScenarioId,
    ) -> Option<LoanAdjustedAssumption> {
        self.records
            .lock()
            .expect("result store mutex poisoned")
            .get(&(snapshot_id, scenario_id))
            .cloned()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .expect("result store mutex poisoned")
            .len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drains all records, sorted by key for stable output.
    pub fn into_records(self) -> Vec<LoanAdjustedAssumption> {
        let mut records: Vec<LoanAdjustedAssumption> = self
            .records
            .into_inner()
            .expect("result store mutex poisoned")
            .into_values()
            .collect();
        records.sort_by_key(|r| (r.loan_snapshot_id, r.scenario_id));
        records
    }
}

impl ResultStore for InMemoryResultStore {
    fn upsert(&self, record: LoanAdjustedAssumption) -> Result<(), StoreError> {
        let key = (record.loan_snapshot_id, record.scenario_id);
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("result store mutex poisoned".to_string()))?
            .insert(key, record);
        Ok(())
    }
}

/// Wraps a store with bounded retry and doubling backoff for transient
/// failures.
#[derive(Debug)]
pub struct RetryingStore<S> {
    inner: S,
    max_attempts: u32,
    base_delay: Duration,
}

impl<S: ResultStore> RetryingStore<S> {
    /// Wraps `inner`, retrying transient failures up to `max_attempts`
    /// total attempts, sleeping `base_delay`, `2×base_delay`, ... between.
    pub fn new(inner: S, max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            inner,
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Unwraps the inner store.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ResultStore> ResultStore for RetryingStore<S> {
    fn upsert(&self, record: LoanAdjustedAssumption) -> Result<(), StoreError> {
        let mut delay = self.base_delay;
        let mut attempt = 1;
        loop {
            match self.inner.upsert(record.clone()) {
                Ok(()) => return Ok(()),
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    warn!(
                        snapshot = %record.loan_snapshot_id,
                        scenario = %record.scenario_id,
                        attempt,
                        %err,
                        "transient store failure, retrying"
                    );
                    std::thread::sleep(delay);
                    delay *= 2;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
