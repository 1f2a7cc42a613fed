//! JSON HTTP API.
//!
//! Exposes the lookup operations to a UI layer. Routes are nested under
//! `/api/` and wrapped by request logging and a permissive CORS layer.
//!
//! The router is composable: `api_router()` returns a `Router` that can be
//! mounted on any axum server or driven directly in tests.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_server, ApiServer, ServerError};
pub use types::ApiContext;
