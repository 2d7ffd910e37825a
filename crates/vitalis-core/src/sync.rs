//! Reconciliation between the in-memory store and the persistence service.
//!
//! The store is a local cache. `load_snapshot` hydrates it from the backend;
//! `replay` pushes journaled changes back in order. Neither retries, and
//! neither touches store state: a failed call is reported to the caller.

use serde::Serialize;
use tracing::{debug, info, warn};

use vitalis_contracts::{
    change::StoreChange, error::VitalisResult, snapshot::HealthSnapshot,
};

use crate::{score::HealthScore, traits::PersistenceService};

/// Fetch user, medications, vitals and reports into a snapshot.
///
/// The backend does not own the health score, so the caller supplies it.
pub fn load_snapshot(
    backend: &dyn PersistenceService,
    health_score: HealthScore,
) -> VitalisResult<HealthSnapshot> {
    let user = backend.fetch_user()?;
    let medications = backend.fetch_medications()?;
    let vitals = backend.fetch_vitals()?;
    let reports = backend.fetch_reports()?;

    info!(
        medications = medications.len(),
        vitals = vitals.len(),
        reports = reports.len(),
        "snapshot loaded from persistence service"
    );

    Ok(HealthSnapshot {
        user,
        medications,
        vitals,
        reports,
        health_score: health_score.value(),
    })
}

/// Outcome of a replay run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Changes accepted by the backend, counted from the start.
    pub applied: usize,
    /// The first failure, if any: (index of the change, reason).
    pub failure: Option<(usize, String)>,
}

impl SyncReport {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Push `changes` to `backend` in order, stopping at the first failure.
pub fn replay<'a, I>(changes: I, backend: &dyn PersistenceService) -> SyncReport
where
    I: IntoIterator<Item = &'a StoreChange>,
{
    let mut applied = 0;

    for (index, change) in changes.into_iter().enumerate() {
        debug!(index, endpoint = %change.endpoint(), "replaying change");
        if let Err(e) = push(change, backend) {
            warn!(index, kind = change.kind(), error = %e, "replay stopped");
            return SyncReport {
                applied,
                failure: Some((index, e.to_string())),
            };
        }
        applied += 1;
    }

    info!(applied, "replay complete");
    SyncReport {
        applied,
        failure: None,
    }
}

fn push(change: &StoreChange, backend: &dyn PersistenceService) -> VitalisResult<()> {
    match change {
        StoreChange::MedicationAdded { medication } => {
            backend.add_medication(medication)?;
        }
        StoreChange::MedicationRemoved { id } => {
            backend.remove_medication(id)?;
        }
        StoreChange::DoseTaken { id, .. } => {
            backend.take_dose(id)?;
        }
        StoreChange::VitalLogged { record } => {
            backend.add_vital(record)?;
        }
        StoreChange::ReportAdded { report } => {
            backend.add_report(report)?;
        }
        StoreChange::ReportRemoved { id } => {
            backend.remove_report(id)?;
        }
    }
    Ok(())
}
