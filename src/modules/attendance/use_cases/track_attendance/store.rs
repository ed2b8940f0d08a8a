// Session-scoped view of one day's attendance.
//
// Holds the snapshot for the active date, replaces it wholesale on every
// successful fetch, and reconciles marks against the backing store so that a
// (student, date) pair maps to a single record.

use crate::modules::attendance::adapters::outbound::backing_store::{
    AttendanceTable, StoreError, with_deadline,
};
use crate::modules::attendance::core::attendance_record::{
    AttendanceRecord, AttendanceStatus, NewAttendanceRecord,
};
use crate::modules::attendance::core::snapshot::{AttendanceSnapshot, AttendanceSummary};
use crate::modules::attendance::use_cases::track_attendance::command::MarkAttendance;
use crate::shared::core::primitives::CanonicalDate;
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconcileStrategy {
    /// Look the record up, then update or insert. Two sessions marking the same
    /// pair at once can both take the insert branch.
    #[default]
    CheckThenWrite,
    /// A single insert-or-update keyed by the store's (student, date) constraint.
    AtomicUpsert,
}

impl FromStr for ReconcileStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "check-then-write" => Ok(ReconcileStrategy::CheckThenWrite),
            "atomic-upsert" => Ok(ReconcileStrategy::AtomicUpsert),
            other => Err(format!("unknown reconcile strategy: {other}")),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttendanceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("attendance for {student_id} on {date} is already being marked")]
    MarkInProgress {
        student_id: String,
        date: CanonicalDate,
    },
}

type PairKey = (String, CanonicalDate);

pub struct AttendanceStore<TTable>
where
    TTable: AttendanceTable + 'static,
{
    table: Arc<TTable>,
    deadline: Duration,
    strategy: ReconcileStrategy,
    snapshot: RwLock<AttendanceSnapshot>,
    loading: AtomicUsize,
    fetch_generation: AtomicU64,
    in_flight: Mutex<HashSet<PairKey>>,
}

impl<TTable> AttendanceStore<TTable>
where
    TTable: AttendanceTable + 'static,
{
    pub fn new(
        table: Arc<TTable>,
        initial_date: CanonicalDate,
        deadline: Duration,
        strategy: ReconcileStrategy,
    ) -> Self {
        Self {
            table,
            deadline,
            strategy,
            snapshot: RwLock::new(AttendanceSnapshot::empty(initial_date)),
            loading: AtomicUsize::new(0),
            fetch_generation: AtomicU64::new(0),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// True while any fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst) > 0
    }

    pub async fn active_date(&self) -> CanonicalDate {
        self.snapshot.read().await.date()
    }

    pub async fn snapshot(&self) -> AttendanceSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Loads every record for `date` and makes it the active date. On failure
    /// the previous snapshot, date included, stays in place. When fetches
    /// overlap, the most recently requested one decides the active date; an
    /// older fetch that finishes later returns its records without installing
    /// them.
    pub async fn fetch_for_date(
        &self,
        date: CanonicalDate,
    ) -> Result<AttendanceSnapshot, AttendanceError> {
        let _loading = LoadingGuard::start(&self.loading);
        let generation = self.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let records = with_deadline(self.deadline, self.table.select_by_date(date))
            .await
            .inspect_err(|e| warn!(%date, error = %e, "failed to fetch attendance records"))?;

        let fresh = AttendanceSnapshot::new(date, records);
        let mut snapshot = self.snapshot.write().await;
        if self.fetch_generation.load(Ordering::SeqCst) != generation {
            debug!(%date, "superseded fetch discarded");
            return Ok(fresh);
        }
        *snapshot = fresh.clone();
        debug!(%date, records = fresh.len(), "attendance snapshot replaced");
        Ok(fresh)
    }

    /// Sets the status of `command.student_id` on the active date, creating the
    /// record on first mark. The snapshot only changes once the store confirms
    /// the write.
    pub async fn mark_attendance(
        &self,
        command: MarkAttendance,
    ) -> Result<AttendanceRecord, AttendanceError> {
        let date = self.active_date().await;
        let _claim = InFlightClaim::acquire(&self.in_flight, (command.student_id.clone(), date))
            .ok_or_else(|| AttendanceError::MarkInProgress {
                student_id: command.student_id.clone(),
                date,
            })?;

        let record = self.reconcile(date, &command).await.inspect_err(|e| {
            warn!(student_id = %command.student_id, %date, error = %e, "failed to mark attendance")
        })?;

        let mut snapshot = self.snapshot.write().await;
        if !snapshot.upsert(record.clone()) {
            debug!(%date, active = %snapshot.date(), "active date moved while marking");
        }
        info!(
            student_id = %record.student_id,
            %date,
            status = %record.status,
            "attendance marked"
        );
        Ok(record)
    }

    pub async fn lookup_status(&self, student_id: &str) -> Option<AttendanceStatus> {
        self.snapshot.read().await.status_of(student_id)
    }

    pub async fn summary(&self, total_students: usize) -> AttendanceSummary {
        self.snapshot.read().await.summary(total_students)
    }

    async fn reconcile(
        &self,
        date: CanonicalDate,
        command: &MarkAttendance,
    ) -> Result<AttendanceRecord, StoreError> {
        let new_record = NewAttendanceRecord {
            student_id: command.student_id.clone(),
            date,
            status: command.status,
        };

        match self.strategy {
            ReconcileStrategy::CheckThenWrite => {
                let existing = with_deadline(
                    self.deadline,
                    self.table.find_one(&command.student_id, date),
                )
                .await?;
                match existing {
                    Some(record) => {
                        with_deadline(
                            self.deadline,
                            self.table.update_status(&record.id, command.status),
                        )
                        .await
                    }
                    None => with_deadline(self.deadline, self.table.insert_one(new_record)).await,
                }
            }
            ReconcileStrategy::AtomicUpsert => {
                with_deadline(self.deadline, self.table.upsert_on_conflict(new_record)).await
            }
        }
    }
}

/// Counts outstanding fetches.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn start(count: &'a AtomicUsize) -> Self {
        count.fetch_add(1, Ordering::SeqCst);
        Self(count)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Released on drop, so a cancelled mark does not block the pair.
struct InFlightClaim<'a> {
    set: &'a Mutex<HashSet<PairKey>>,
    key: PairKey,
}

impl<'a> InFlightClaim<'a> {
    fn acquire(set: &'a Mutex<HashSet<PairKey>>, key: PairKey) -> Option<Self> {
        let inserted = set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone());
        inserted.then_some(Self { set, key })
    }
}

impl Drop for InFlightClaim<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
