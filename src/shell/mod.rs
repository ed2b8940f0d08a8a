// Composition root: configuration, application state, the axum router and
// the GraphQL schema. The binary in `main.rs` only wires these together.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
