//! Application state for the analytics API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::analytics::AnalyticsEngine;
use crate::config::{AppConfig, ReportConfig};
use crate::storage::InMemoryStore;

/// Shared application state.
///
/// Holds the record store, an analytics engine reading from it, and the
/// report settings.
#[derive(Clone)]
pub struct AppState {
    store: Arc<InMemoryStore>,
    engine: AnalyticsEngine,
    reports: Arc<ReportConfig>,
}

impl AppState {
    /// Creates application state around a store.
    pub fn new(store: Arc<InMemoryStore>, config: &AppConfig) -> Self {
        let engine = AnalyticsEngine::new(store.clone());
        Self {
            store,
            engine,
            reports: Arc::new(config.reports.clone()),
        }
    }

    /// Returns the record store.
    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    /// Returns the analytics engine.
    pub fn engine(&self) -> &AnalyticsEngine {
        &self.engine
    }

    /// Returns the report settings.
    pub fn reports(&self) -> &ReportConfig {
        &self.reports
    }
}
