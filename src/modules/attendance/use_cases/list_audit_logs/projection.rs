use crate::shared::infrastructure::audit_log::{AuditAction, AuditEntry};
use serde::Serialize;
use serde_json::Value;

const HIDDEN_KEYS: [&str; 3] = ["id", "created_at", "updated_at"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditLogView {
    pub id: String,
    pub table_name: String,
    pub action: AuditAction,
    pub record_id: String,
    pub created_at: i64,
    pub summary: Vec<String>,
}

impl From<AuditEntry> for AuditLogView {
    fn from(entry: AuditEntry) -> Self {
        let summary = summarize(entry.action, entry.old_data.as_ref(), entry.new_data.as_ref());
        Self {
            id: entry.id,
            table_name: entry.table_name,
            action: entry.action,
            record_id: entry.record_id,
            created_at: entry.created_at,
            summary,
        }
    }
}

fn summarize(action: AuditAction, old: Option<&Value>, new: Option<&Value>) -> Vec<String> {
    match (action, old, new) {
        (AuditAction::Insert, _, Some(new)) => vec![format!("Added: {}", describe(new))],
        (AuditAction::Update, Some(old), Some(new)) => vec![
            format!("Before: {}", describe(old)),
            format!("After: {}", describe(new)),
        ],
        (AuditAction::Delete, Some(old), _) => vec![format!("Deleted: {}", describe(old))],
        _ => Vec::new(),
    }
}

/// `key: value` pairs in column order, joined by `, `; strings are shown bare.
fn describe(data: &Value) -> String {
    let Some(fields) = data.as_object() else {
        return plain(data);
    };
    fields
        .iter()
        .filter(|(key, _)| !HIDDEN_KEYS.contains(&key.as_str()))
        .map(|(key, value)| format!("{key}: {}", plain(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod audit_log_projection_tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn entry(action: AuditAction, old: Option<Value>, new: Option<Value>) -> AuditEntry {
        AuditEntry {
            id: "log-1".into(),
            table_name: "students".into(),
            action,
            record_id: "s-1".into(),
            old_data: old,
            new_data: new,
            created_at: 1_700_000_000_000,
        }
    }

    #[rstest]
    fn it_should_summarize_an_insert_without_bookkeeping_keys() {
        let view = AuditLogView::from(entry(
            AuditAction::Insert,
            None,
            Some(json!({"id": "s-1", "name": "Ann", "roll_number": "A1", "created_at": 1})),
        ));

        assert_eq!(view.summary, vec!["Added: name: Ann, roll_number: A1"]);
    }

    #[rstest]
    fn it_should_keep_the_column_order_of_the_row() {
        let student = crate::modules::attendance::core::student::Student {
            id: "s-1".into(),
            roll_number: "A1".into(),
            name: "Ann".into(),
            email: Some("ann@example.test".into()),
            phone: None,
            created_at: 1,
            updated_at: 1,
        };
        let row = serde_json::to_value(&student).unwrap();

        let view = AuditLogView::from(entry(AuditAction::Insert, None, Some(row)));

        assert_eq!(
            view.summary,
            vec!["Added: roll_number: A1, name: Ann, email: ann@example.test, phone: null"]
        );
    }

    #[rstest]
    fn it_should_show_both_sides_of_an_update() {
        let view = AuditLogView::from(entry(
            AuditAction::Update,
            Some(json!({"status": "present", "updated_at": 1})),
            Some(json!({"status": "absent", "updated_at": 2})),
        ));

        assert_eq!(view.summary, vec!["Before: status: present", "After: status: absent"]);
    }

    #[rstest]
    fn it_should_render_nulls_and_numbers_as_json() {
        let view = AuditLogView::from(entry(
            AuditAction::Delete,
            Some(json!({"email": null, "marked_at": 5})),
            None,
        ));

        assert_eq!(view.summary, vec!["Deleted: email: null, marked_at: 5"]);
    }

    #[rstest]
    fn it_should_leave_the_summary_empty_when_data_is_missing() {
        let view = AuditLogView::from(entry(AuditAction::Update, None, Some(json!({}))));
        assert!(view.summary.is_empty());
    }
}
