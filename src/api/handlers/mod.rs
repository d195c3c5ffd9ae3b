//! API handlers
//!
//! Services are synchronous and lock-free on the hot path, so handlers call
//! them directly from the async context.

use std::sync::Arc;
use std::time::Instant;

use crate::application::SharedContext;

pub mod charging;
pub mod health;
pub mod metrics;
pub mod providers;
pub mod stations;
pub mod users;

/// State shared by every REST handler
#[derive(Clone)]
pub struct ApiState {
    pub ctx: SharedContext,
    pub started_at: Arc<Instant>,
}

impl ApiState {
    pub fn new(ctx: SharedContext) -> Self {
        Self {
            ctx,
            started_at: Arc::new(Instant::now()),
        }
    }
}
