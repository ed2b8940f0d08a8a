pub mod attendance;
pub mod state;
pub mod students;
