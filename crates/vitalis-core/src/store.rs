//! The health-record store: the single owner of all domain state.
//!
//! Every mutation takes `&mut self` and runs to completion without I/O, so
//! no mutation can observe another one half-applied. Mutations that name a
//! missing id are silent no-ops. Each mutation that does change state emits
//! one `StoreChange` to the optional journal.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, warn};

use vitalis_contracts::{
    change::StoreChange,
    draft::ReportDraft,
    medication::{Medication, MedicationId},
    profile::UserProfile,
    report::{MedicalReport, ReportId},
    snapshot::HealthSnapshot,
    vital::{VitalRecord, VitalType},
};

use crate::{
    config::ScoreRules,
    query::{self, EmergencyCard, RefillAlert, TrendPoint, TrendSummary, VitalSeries},
    score::HealthScore,
    traits::ChangeJournal,
};

/// In-memory health record state for one user.
///
/// Construct one store per session and pass it explicitly to whatever needs
/// it. Readers borrow; writers call the mutation methods.
pub struct HealthRecordStore {
    user: UserProfile,
    medications: Vec<Medication>,
    vitals: Vec<VitalRecord>,
    /// Newest first.
    reports: Vec<MedicalReport>,
    score: HealthScore,
    rules: ScoreRules,
    journal: Option<Box<dyn ChangeJournal>>,
}

impl HealthRecordStore {
    /// Build a store from seed or persisted state.
    ///
    /// The snapshot's score is clamped into `[0, 100]`.
    pub fn new(snapshot: HealthSnapshot, rules: ScoreRules) -> Self {
        let HealthSnapshot {
            user,
            medications,
            vitals,
            reports,
            health_score,
        } = snapshot;

        debug!(
            medications = medications.len(),
            vitals = vitals.len(),
            reports = reports.len(),
            health_score,
            "health record store initialized"
        );

        Self {
            user,
            medications,
            vitals,
            reports,
            score: HealthScore::new(health_score),
            rules,
            journal: None,
        }
    }

    /// Record every applied change to `journal`.
    pub fn with_journal(mut self, journal: Box<dyn ChangeJournal>) -> Self {
        self.journal = Some(journal);
        self
    }

    // ── Read access ──────────────────────────────────────────────────────────

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    /// Medications in insertion order.
    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn medication(&self, id: &MedicationId) -> Option<&Medication> {
        self.medications.iter().find(|m| &m.id == id)
    }

    /// The vital log in the order records were logged.
    pub fn vitals(&self) -> &[VitalRecord] {
        &self.vitals
    }

    /// Reports, newest first.
    pub fn reports(&self) -> &[MedicalReport] {
        &self.reports
    }

    pub fn health_score(&self) -> HealthScore {
        self.score
    }

    /// A serialisable copy of the full state.
    pub fn snapshot(&self) -> HealthSnapshot {
        HealthSnapshot {
            user: self.user.clone(),
            medications: self.medications.clone(),
            vitals: self.vitals.clone(),
            reports: self.reports.clone(),
            health_score: self.score.value(),
        }
    }

    // ── Medications ──────────────────────────────────────────────────────────

    /// Append `medication`. Id uniqueness is the caller's responsibility.
    pub fn add_medication(&mut self, medication: Medication) {
        debug!(id = %medication.id, name = %medication.name, "medication added");
        self.medications.push(medication.clone());
        self.record(StoreChange::MedicationAdded { medication });
    }

    /// Remove the medication with `id`. Returns false if none matched.
    pub fn remove_medication(&mut self, id: &MedicationId) -> bool {
        let before = self.medications.len();
        self.medications.retain(|m| &m.id != id);
        if self.medications.len() == before {
            debug!(id = %id, "remove_medication: no such medication");
            return false;
        }
        debug!(id = %id, "medication removed");
        self.record(StoreChange::MedicationRemoved { id: id.clone() });
        true
    }

    /// Record one administered dose now. See [`Self::take_dose_at`].
    pub fn take_dose(&mut self, id: &MedicationId) -> bool {
        self.take_dose_at(id, Utc::now())
    }

    /// Record one administered dose at `at`.
    ///
    /// Decrements inventory (never below zero), stamps `last_taken`, and
    /// raises the health score. Returns false, changing nothing, if no
    /// medication has `id`. Nothing limits doses to the schedule.
    pub fn take_dose_at(&mut self, id: &MedicationId, at: DateTime<Utc>) -> bool {
        let Some(medication) = self.medications.iter_mut().find(|m| &m.id == id) else {
            debug!(id = %id, "take_dose: no such medication");
            return false;
        };

        medication.record_dose(at);
        let remaining = medication.inventory;
        if medication.is_refill_due() {
            warn!(id = %id, name = %medication.name, remaining, "medication is due for refill");
        }

        self.score.raise(self.rules.dose_taken);
        debug!(id = %id, remaining, score = self.score.value(), "dose taken");

        self.record(StoreChange::DoseTaken {
            id: id.clone(),
            taken_at: at,
            remaining,
        });
        true
    }

    // ── Vitals ───────────────────────────────────────────────────────────────

    /// Append `record` to the log and raise the health score.
    pub fn add_vital_log(&mut self, record: VitalRecord) {
        self.score.raise(self.rules.vital_logged);
        debug!(
            id = %record.id,
            vital_type = %record.vital_type,
            score = self.score.value(),
            "vital logged"
        );
        self.vitals.push(record.clone());
        self.record(StoreChange::VitalLogged { record });
    }

    // ── Reports ──────────────────────────────────────────────────────────────

    /// Prepend `report`, so the list stays newest first.
    pub fn add_report(&mut self, report: MedicalReport) {
        debug!(id = %report.id, title = %report.title, "report added");
        self.reports.insert(0, report.clone());
        self.record(StoreChange::ReportAdded { report });
    }

    /// Fill the draft's defaults and prepend the resulting report.
    pub fn add_report_draft(&mut self, draft: ReportDraft, id: ReportId, today: NaiveDate) {
        self.add_report(draft.into_report(id, today));
    }

    /// Remove the report with `id`. Returns false if none matched.
    pub fn remove_report(&mut self, id: &ReportId) -> bool {
        let before = self.reports.len();
        self.reports.retain(|r| &r.id != id);
        if self.reports.len() == before {
            debug!(id = %id, "remove_report: no such report");
            return false;
        }
        debug!(id = %id, "report removed");
        self.record(StoreChange::ReportRemoved { id: id.clone() });
        true
    }

    // ── Derived queries ──────────────────────────────────────────────────────

    /// Records of `vital_type`, ascending by timestamp, stable on ties.
    pub fn vitals_of_type(&self, vital_type: VitalType) -> VitalSeries<'_> {
        VitalSeries::collect(&self.vitals, vital_type)
    }

    /// Rounded mean of the primary values of `vital_type`, or no data.
    pub fn trend_summary(&self, vital_type: VitalType) -> TrendSummary {
        self.vitals_of_type(vital_type).summary()
    }

    /// Chart series for `vital_type`.
    pub fn trend_points(&self, vital_type: VitalType) -> Vec<TrendPoint> {
        self.vitals_of_type(vital_type).points()
    }

    /// The most recent record of `vital_type`.
    pub fn latest_vital(&self, vital_type: VitalType) -> Option<&VitalRecord> {
        self.vitals_of_type(vital_type).latest()
    }

    /// Newest-first window over the whole log.
    pub fn recent_vitals(&self, limit: usize) -> Vec<&VitalRecord> {
        query::recent_vitals(&self.vitals, limit)
    }

    /// Medications at or below their refill threshold, in list order.
    pub fn refill_due(&self) -> Vec<&Medication> {
        query::refill_due(&self.medications)
    }

    /// Banner naming the first refill-due medication, if any.
    pub fn refill_alert(&self) -> Option<RefillAlert> {
        RefillAlert::from_due(&self.refill_due())
    }

    pub fn emergency_card(&self) -> EmergencyCard {
        EmergencyCard::build(&self.user, &self.medications)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn record(&self, change: StoreChange) {
        let Some(journal) = &self.journal else {
            return;
        };
        if let Err(e) = journal.append(&change) {
            warn!(kind = change.kind(), error = %e, "change applied but not journaled");
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
