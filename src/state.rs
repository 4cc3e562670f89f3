//! Shared application state.

use std::sync::Arc;

use chrono::Duration;

use crate::config::Config;
use crate::telemetry::Metrics;

pub struct AppStateInner {
    pub secret: Vec<u8>,
    pub cookie_name: String,
    pub ttl: Option<Duration>,
    pub metrics: Metrics,
}

pub type AppState = Arc<AppStateInner>;

pub fn build_state(config: &Config) -> AppState {
    Arc::new(AppStateInner {
        secret: config.secret.clone(),
        cookie_name: config.cookie_name.clone(),
        ttl: config.ttl,
        metrics: Metrics::new(),
    })
}
