//! Application state for the muster roll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::aggregation::MusterRoll;
use crate::config::ConfigLoader;
use crate::source::AttendanceSource;
use crate::view::ReportView;

/// Shared application state.
///
/// Holds the loaded configuration, the upstream attendance source and the
/// sequenced muster roll view.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    source: Arc<dyn AttendanceSource>,
    view: Arc<ReportView<MusterRoll>>,
}

impl AppState {
    /// Creates application state over a configuration and a source.
    pub fn new(config: ConfigLoader, source: Arc<dyn AttendanceSource>) -> Self {
        Self {
            config: Arc::new(config),
            source,
            view: Arc::new(ReportView::new()),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the attendance source.
    pub fn source(&self) -> &dyn AttendanceSource {
        self.source.as_ref()
    }

    /// Returns the muster roll view.
    pub fn view(&self) -> &ReportView<MusterRoll> {
        &self.view
    }
}
