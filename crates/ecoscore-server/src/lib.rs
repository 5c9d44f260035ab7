//! EcoScore server — application state and routes, shared by the binary
//! and the integration tests.

pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
