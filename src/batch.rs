//! Batch risk scoring
//!
//! Fetches the full student collection once, then scores and updates
//! each record strictly sequentially in fetch order. Because no two
//! operations ever overlap, the tier counts in the summary always
//! match the records actually written.
//!
//! Any store failure aborts the remaining batch immediately: updates
//! already applied stay in place (no compensating rollback) and the
//! error, carrying the processed count, propagates to the caller. No
//! per-record retry.

use thiserror::Error;

use crate::classifier::{DropoutModel, FeatureVector, ModelError};
use crate::models::{RiskTier, RiskUpdate};
use crate::store::{StoreError, StudentStore};

/// Emit a progress notification every this many processed records.
pub const PROGRESS_INTERVAL: usize = 50;

/// Counts from a completed batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// A batch run that stopped early. Already-applied updates remain in
/// the store.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("batch aborted after {processed} records: {source}")]
    Store {
        processed: usize,
        #[source]
        source: StoreError,
    },

    #[error("batch aborted after {processed} records: {source}")]
    Model {
        processed: usize,
        #[source]
        source: ModelError,
    },
}

impl BatchError {
    /// Records successfully updated before the abort.
    pub fn processed(&self) -> usize {
        match self {
            BatchError::Store { processed, .. } | BatchError::Model { processed, .. } => *processed,
        }
    }
}

/// Score every student in the store and write back tier + probability.
///
/// `progress` is invoked at every [`PROGRESS_INTERVAL`] processed
/// records with `(processed, total)`.
pub fn run_batch<S, F>(
    store: &S,
    model: &DropoutModel,
    mut progress: F,
) -> Result<BatchSummary, BatchError>
where
    S: StudentStore + ?Sized,
    F: FnMut(usize, usize),
{
    let records = store.fetch_all().map_err(|source| BatchError::Store {
        processed: 0,
        source,
    })?;
    let total = records.len();
    let mut summary = BatchSummary::default();

    for record in &records {
        // Failed-assessment counts are not derivable from the store's
        // record shape, so this path scores everyone with 0.
        // TODO: derive the count once assessment rows land in the store schema.
        let features = FeatureVector::from_record(record, 0);

        let prediction = model.predict(&features).map_err(|source| BatchError::Model {
            processed: summary.processed,
            source,
        })?;

        store
            .update_risk(
                &record.id,
                RiskUpdate {
                    risk_tier: prediction.tier,
                    probability: prediction.probability,
                },
            )
            .map_err(|source| BatchError::Store {
                processed: summary.processed,
                source,
            })?;

        summary.processed += 1;
        match prediction.tier {
            RiskTier::Low => summary.low += 1,
            RiskTier::Medium => summary.medium += 1,
            RiskTier::High => summary.high += 1,
        }

        if summary.processed % PROGRESS_INTERVAL == 0 {
            progress(summary.processed, total);
        }
    }

    Ok(summary)
}
