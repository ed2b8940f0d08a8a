use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub roll_number: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Roster form input. Used both for create and for full edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDraft {
    pub roll_number: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl StudentDraft {
    /// Trims every field, turns blank optionals into `None`, and rejects a
    /// draft without a roll number or a name.
    pub fn validate(self) -> Result<StudentDraft, ValidationError> {
        let roll_number = self.roll_number.trim().to_string();
        if roll_number.is_empty() {
            return Err(ValidationError::MissingField("roll_number"));
        }
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        Ok(StudentDraft {
            roll_number,
            name,
            email: non_blank(self.email),
            phone: non_blank(self.phone),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
