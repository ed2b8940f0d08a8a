use crate::modules::attendance::adapters::outbound::backing_store_in_memory::InMemoryBackingStore;
use crate::modules::attendance::use_cases::export_attendance::download::{
    DirectoryDownloadSink, DownloadSink,
};
use crate::modules::attendance::use_cases::export_attendance::handler::ExportAttendanceHandler;
use crate::modules::attendance::use_cases::list_audit_logs::handler::ListAuditLogsHandler;
use crate::modules::attendance::use_cases::manage_roster::handler::RosterHandler;
use crate::modules::attendance::use_cases::track_attendance::store::AttendanceStore;
use crate::shared::core::primitives::CanonicalDate;
use crate::shared::infrastructure::audit_log::AuditLog;
use crate::shell::config::AppConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub attendance: Arc<AttendanceStore<InMemoryBackingStore>>,
    pub roster: Arc<RosterHandler<InMemoryBackingStore>>,
    pub exporter: Arc<ExportAttendanceHandler<InMemoryBackingStore, InMemoryBackingStore>>,
    pub audit_logs: Arc<ListAuditLogsHandler>,
    pub export_sink: Arc<dyn DownloadSink>,
}

impl AppState {
    /// Wires every use case onto one backing store, starting the session on
    /// `today`.
    pub fn build(
        config: &AppConfig,
        table: Arc<InMemoryBackingStore>,
        audit: Arc<dyn AuditLog>,
        today: CanonicalDate,
    ) -> Self {
        let attendance = Arc::new(AttendanceStore::new(
            table.clone(),
            today,
            config.store_timeout,
            config.reconcile,
        ));
        let roster = Arc::new(RosterHandler::new(table.clone(), config.store_timeout));
        let exporter = Arc::new(ExportAttendanceHandler::new(
            table,
            attendance.clone(),
            config.store_timeout,
            config.export_date_format.clone(),
        ));
        Self {
            attendance,
            roster,
            exporter,
            audit_logs: Arc::new(ListAuditLogsHandler::new(audit, config.audit_limit)),
            export_sink: Arc::new(DirectoryDownloadSink::new(config.export_dir.clone())),
        }
    }
}
