use crate::modules::attendance::adapters::outbound::backing_store::{
    StoreError, StudentTable, with_deadline,
};
use crate::modules::attendance::core::student::{Student, StudentDraft, ValidationError};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct RosterHandler<TStudents>
where
    TStudents: StudentTable + 'static,
{
    students: Arc<TStudents>,
    deadline: Duration,
}

impl<TStudents> RosterHandler<TStudents>
where
    TStudents: StudentTable + 'static,
{
    pub fn new(students: Arc<TStudents>, deadline: Duration) -> Self {
        Self { students, deadline }
    }

    /// Students in the order they were added.
    pub async fn list(&self) -> Result<Vec<Student>, RosterError> {
        Ok(with_deadline(self.deadline, self.students.list_students()).await?)
    }

    pub async fn count(&self) -> Result<usize, RosterError> {
        Ok(self.list().await?.len())
    }

    pub async fn add(&self, draft: StudentDraft) -> Result<Student, RosterError> {
        let draft = draft.validate()?;
        let student = with_deadline(self.deadline, self.students.insert_student(draft))
            .await
            .inspect_err(|e| warn!(error = %e, "failed to add student"))?;
        info!(student_id = %student.id, roll_number = %student.roll_number, "student added");
        Ok(student)
    }

    pub async fn update(&self, id: &str, draft: StudentDraft) -> Result<Student, RosterError> {
        let draft = draft.validate()?;
        let student = with_deadline(self.deadline, self.students.update_student(id, draft))
            .await
            .inspect_err(|e| warn!(student_id = %id, error = %e, "failed to update student"))?;
        info!(student_id = %student.id, "student updated");
        Ok(student)
    }

    /// Attendance rows of the removed student are kept.
    pub async fn delete(&self, id: &str) -> Result<Student, RosterError> {
        let student = with_deadline(self.deadline, self.students.delete_student(id))
            .await
            .inspect_err(|e| warn!(student_id = %id, error = %e, "failed to delete student"))?;
        info!(student_id = %student.id, "student deleted");
        Ok(student)
    }
}
