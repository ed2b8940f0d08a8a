use crate::modules::attendance::core::snapshot::AttendanceSnapshot;
use crate::modules::attendance::core::student::Student;
use crate::shared::core::primitives::{CanonicalDate, DateParseError};

pub const EXPORT_HEADERS: [&str; 6] = ["Roll Number", "Name", "Email", "Phone", "Status", "Date"];
pub const NOT_MARKED: &str = "Not Marked";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub roll_number: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: String,
    pub date: String,
}

impl ExportRow {
    pub fn cells(&self) -> [&str; 6] {
        [
            self.roll_number.as_str(),
            self.name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.status.as_str(),
            self.date.as_str(),
        ]
    }
}

/// One row per student, in roster order. Attendance records whose student is
/// not on the roster produce no row.
pub fn build_rows(
    roster: &[Student],
    snapshot: &AttendanceSnapshot,
    date: CanonicalDate,
    date_format: &str,
) -> Result<Vec<ExportRow>, DateParseError> {
    let shown_date = date.display_with(date_format)?;
    Ok(roster
        .iter()
        .map(|student| ExportRow {
            roll_number: student.roll_number.clone(),
            name: student.name.clone(),
            email: student.email.clone().unwrap_or_default(),
            phone: student.phone.clone().unwrap_or_default(),
            status: snapshot
                .status_of(&student.id)
                .map(|s| s.as_str().to_string())
                .unwrap_or_else(|| NOT_MARKED.to_string()),
            date: shown_date.clone(),
        })
        .collect())
}
