//! # EV Charging Service
//!
//! Charging admission and station notifications for an EV charging
//! platform.
//!
//! ## Architecture
//!
//! - **domain**: Entities (users, providers, stations), the compatibility
//!   table and repository traits
//! - **application**: Services, the admission chain, the charging request
//!   processor and the application context that wires them together
//! - **infrastructure**: Thread-safe in-memory stores
//! - **notifications**: Per-station observer bus and the standard observers
//! - **api**: REST API with Swagger documentation
//! - **server**: Server lifecycle, tracing and metrics setup

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod notifications;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, CONFIG_ENV};

// Re-export the main entry points
pub use api::create_api_router;
pub use application::{
    AppContext, ChargingOutcome, ChargingRequestProcessor, ContextOptions, SharedContext,
    StopOutcome,
};
pub use notifications::{DispatchPolicy, MemorySink, NotificationBus, StationObserver};
pub use shared::errors::{AppError, DomainError, DomainResult};
