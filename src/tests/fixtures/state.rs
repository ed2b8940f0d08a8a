use crate::modules::attendance::adapters::outbound::backing_store_in_memory::InMemoryBackingStore;
use crate::shared::infrastructure::audit_log::in_memory::InMemoryAuditLog;
use crate::shell::config::AppConfig;
use crate::shell::state::AppState;
use crate::tests::fixtures::attendance::day;
use std::sync::Arc;
use std::time::Duration;

pub const TEST_DAY: &str = "2026-10-14";

pub fn test_config() -> AppConfig {
    AppConfig {
        store_timeout: Duration::from_millis(200),
        ..AppConfig::default()
    }
}

pub fn make_test_state() -> (AppState, Arc<InMemoryBackingStore>, Arc<InMemoryAuditLog>) {
    let audit = Arc::new(InMemoryAuditLog::new());
    let table = Arc::new(InMemoryBackingStore::new(audit.clone()));
    let state = AppState::build(&test_config(), table.clone(), audit.clone(), day(TEST_DAY));
    (state, table, audit)
}

pub fn make_offline_state() -> AppState {
    let audit = Arc::new(InMemoryAuditLog::new());
    let mut table = InMemoryBackingStore::new(audit.clone());
    table.toggle_offline();
    AppState::build(&test_config(), Arc::new(table), audit, day(TEST_DAY))
}

pub fn make_state_with_config(config: &AppConfig) -> (AppState, Arc<InMemoryBackingStore>) {
    let audit = Arc::new(InMemoryAuditLog::new());
    let table = Arc::new(InMemoryBackingStore::new(audit.clone()));
    (AppState::build(config, table.clone(), audit, day(TEST_DAY)), table)
}
