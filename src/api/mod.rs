//! REST API
//!
//! JSON endpoints over the application context, with Swagger UI at
//! `/docs` and, when enabled, Prometheus metrics at `/metrics`.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;

pub use router::{create_api_router, ApiDoc};
