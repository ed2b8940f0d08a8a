use crate::modules::attendance::adapters::outbound::backing_store::{
    AttendanceTable, StudentTable, with_deadline,
};
use crate::modules::attendance::use_cases::export_attendance::download::{DownloadSink, ExportFile};
use crate::modules::attendance::use_cases::export_attendance::errors::ExportError;
use crate::modules::attendance::use_cases::export_attendance::rows::{EXPORT_HEADERS, build_rows};
use crate::modules::attendance::use_cases::export_attendance::serialize::serialize;
use crate::modules::attendance::use_cases::track_attendance::store::AttendanceStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct ExportAttendanceHandler<TStudents, TAttendance>
where
    TStudents: StudentTable + 'static,
    TAttendance: AttendanceTable + 'static,
{
    students: Arc<TStudents>,
    attendance: Arc<AttendanceStore<TAttendance>>,
    deadline: Duration,
    date_format: String,
}

impl<TStudents, TAttendance> ExportAttendanceHandler<TStudents, TAttendance>
where
    TStudents: StudentTable + 'static,
    TAttendance: AttendanceTable + 'static,
{
    pub fn new(
        students: Arc<TStudents>,
        attendance: Arc<AttendanceStore<TAttendance>>,
        deadline: Duration,
        date_format: impl Into<String>,
    ) -> Self {
        Self {
            students,
            attendance,
            deadline,
            date_format: date_format.into(),
        }
    }

    /// Current roster joined with the active day's snapshot, as CSV.
    pub async fn export(&self) -> Result<ExportFile, ExportError> {
        let roster = with_deadline(self.deadline, self.students.list_students())
            .await
            .inspect_err(|e| warn!(error = %e, "failed to load roster for export"))?;
        let snapshot = self.attendance.snapshot().await;
        let date = snapshot.date();

        let rows = build_rows(&roster, &snapshot, date, &self.date_format)?;
        let content = serialize(&EXPORT_HEADERS, &rows)?;
        info!(%date, rows = rows.len(), "attendance exported");
        Ok(ExportFile::csv_for(date, content))
    }

    pub async fn export_to(&self, sink: &dyn DownloadSink) -> Result<String, ExportError> {
        let file = self.export().await?;
        let location = sink.deliver(&file).await?;
        info!(location = %location, "attendance export delivered");
        Ok(location)
    }
}
