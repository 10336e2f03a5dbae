//! Risk scoring HTTP API.
//!
//! Exposes the scorer over JSON. Routes are nested under `/api/`:
//! `POST /api/risk`, `GET /api/ping`, `GET /api/health`.
//!
//! The router is composable: `risk_api_router()` returns a `Router`
//! that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::risk_api_router;
pub use server::{RiskApiServer, RiskApiSession};
pub use types::ApiContext;
