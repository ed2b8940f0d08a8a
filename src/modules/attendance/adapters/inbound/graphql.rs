use async_graphql::{Context, Enum, ID, Object, Result as GqlResult, SimpleObject};

use crate::modules::attendance::core::attendance_record::{AttendanceRecord, AttendanceStatus};
use crate::modules::attendance::core::snapshot::AttendanceSnapshot;
use crate::modules::attendance::core::student::{Student, StudentDraft};
use crate::modules::attendance::use_cases::list_audit_logs::projection::AuditLogView;
use crate::modules::attendance::use_cases::track_attendance::command::MarkAttendance;
use crate::shared::core::primitives::CanonicalDate;
use crate::shell::state::AppState;

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(name = "AttendanceStatus")]
pub enum GqlAttendanceStatus {
    Present,
    Absent,
    Late,
}

impl From<AttendanceStatus> for GqlAttendanceStatus {
    fn from(status: AttendanceStatus) -> Self {
        match status {
            AttendanceStatus::Present => Self::Present,
            AttendanceStatus::Absent => Self::Absent,
            AttendanceStatus::Late => Self::Late,
        }
    }
}

impl From<GqlAttendanceStatus> for AttendanceStatus {
    fn from(status: GqlAttendanceStatus) -> Self {
        match status {
            GqlAttendanceStatus::Present => Self::Present,
            GqlAttendanceStatus::Absent => Self::Absent,
            GqlAttendanceStatus::Late => Self::Late,
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "AttendanceRecord")]
pub struct GqlAttendanceRecord {
    pub id: ID,
    pub student_id: String,
    pub date: String,
    pub status: GqlAttendanceStatus,
    pub marked_at: i64,
    pub created_at: i64,
}

impl From<AttendanceRecord> for GqlAttendanceRecord {
    fn from(r: AttendanceRecord) -> Self {
        Self {
            id: ID(r.id),
            student_id: r.student_id,
            date: r.date.to_string(),
            status: r.status.into(),
            marked_at: r.marked_at,
            created_at: r.created_at,
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "AttendanceSnapshot")]
pub struct GqlAttendanceSnapshot {
    pub date: String,
    pub records: Vec<GqlAttendanceRecord>,
}

impl From<AttendanceSnapshot> for GqlAttendanceSnapshot {
    fn from(s: AttendanceSnapshot) -> Self {
        Self {
            date: s.date().to_string(),
            records: s.records().iter().cloned().map(Into::into).collect(),
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "Student")]
pub struct GqlStudent {
    pub id: ID,
    pub roll_number: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Student> for GqlStudent {
    fn from(s: Student) -> Self {
        Self {
            id: ID(s.id),
            roll_number: s.roll_number,
            name: s.name,
            email: s.email,
            phone: s.phone,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "AuditLog")]
pub struct GqlAuditLog {
    pub id: ID,
    pub table_name: String,
    pub action: String,
    pub record_id: String,
    pub created_at: i64,
    pub summary: Vec<String>,
}

impl From<AuditLogView> for GqlAuditLog {
    fn from(v: AuditLogView) -> Self {
        Self {
            id: ID(v.id),
            table_name: v.table_name,
            action: v.action.as_str().to_string(),
            record_id: v.record_id,
            created_at: v.created_at,
            summary: v.summary,
        }
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Loads `date` and makes it the active day.
    async fn attendance(&self, context: &Context<'_>, date: String) -> GqlResult<GqlAttendanceSnapshot> {
        let state = context.data_unchecked::<AppState>();
        let date = CanonicalDate::parse(&date)?;
        let snapshot = state.attendance.fetch_for_date(date).await?;
        Ok(snapshot.into())
    }

    async fn attendance_status(
        &self,
        context: &Context<'_>,
        student_id: String,
    ) -> Option<GqlAttendanceStatus> {
        let state = context.data_unchecked::<AppState>();
        state.attendance.lookup_status(&student_id).await.map(Into::into)
    }

    async fn students(&self, context: &Context<'_>) -> GqlResult<Vec<GqlStudent>> {
        let state = context.data_unchecked::<AppState>();
        let students = state.roster.list().await?;
        Ok(students.into_iter().map(Into::into).collect())
    }

    async fn audit_logs(&self, context: &Context<'_>, limit: Option<i64>) -> GqlResult<Vec<GqlAuditLog>> {
        let state = context.data_unchecked::<AppState>();
        let limit = limit.map(|l| l.max(0) as usize);
        let views = state.audit_logs.list_recent(limit).await?;
        Ok(views.into_iter().map(Into::into).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn mark_attendance(
        &self,
        context: &Context<'_>,
        student_id: String,
        status: GqlAttendanceStatus,
    ) -> GqlResult<GqlAttendanceRecord> {
        let state = context.data_unchecked::<AppState>();
        let record = state
            .attendance
            .mark_attendance(MarkAttendance::new(student_id, status.into()))
            .await?;
        Ok(record.into())
    }

    async fn add_student(
        &self,
        context: &Context<'_>,
        roll_number: String,
        name: String,
        email: Option<String>,
        phone: Option<String>,
    ) -> GqlResult<GqlStudent> {
        let state = context.data_unchecked::<AppState>();
        let draft = StudentDraft {
            roll_number,
            name,
            email,
            phone,
        };
        let student = state.roster.add(draft).await?;
        Ok(student.into())
    }
}
