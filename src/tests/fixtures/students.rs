// Shared test fixture for roster input, seeded from `json/student_draft.json`.

use crate::modules::attendance::core::student::StudentDraft;

pub struct StudentDraftBuilder {
    inner: StudentDraft,
}

impl Default for StudentDraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl StudentDraftBuilder {
    pub fn new() -> Self {
        let inner: StudentDraft =
            serde_json::from_str(include_str!("json/student_draft.json")).unwrap();
        Self { inner }
    }

    pub fn roll_number(mut self, v: impl Into<String>) -> Self {
        self.inner.roll_number = v.into();
        self
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.inner.name = v.into();
        self
    }

    pub fn email(mut self, v: impl Into<String>) -> Self {
        self.inner.email = Some(v.into());
        self
    }

    pub fn phone(mut self, v: impl Into<String>) -> Self {
        self.inner.phone = Some(v.into());
        self
    }

    pub fn build(self) -> StudentDraft {
        self.inner
    }
}

#[cfg(test)]
mod student_draft_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = StudentDraftBuilder::default().build();
        assert_eq!(built.roll_number, "A1");
        assert_eq!(built.name, "Ann");
        assert_eq!(built.email, None);
        assert_eq!(built.phone, None);
    }

    #[rstest]
    fn setters_override_all_fields_and_build_returns_inner() {
        let custom = StudentDraftBuilder::new()
            .roll_number("B2")
            .name("Bo")
            .email("bo@example.test")
            .phone("555-0101")
            .build();
        assert_eq!(custom.roll_number, "B2");
        assert_eq!(custom.name, "Bo");
        assert_eq!(custom.email.as_deref(), Some("bo@example.test"));
        assert_eq!(custom.phone.as_deref(), Some("555-0101"));
    }
}
