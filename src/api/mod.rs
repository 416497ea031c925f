//! HTTP API module for the muster roll service.
//!
//! This module provides the REST endpoints for building muster rolls,
//! exporting them, classifying attendance records and reading the
//! sequenced report view.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ExportQuery, MusterRollRequest, PageQuery, StatusRequest, SummaryRequest, ViewRefreshRequest,
};
pub use response::{ApiError, ApiErrorResponse, MusterRollResponse, RefreshResponse, StatusEntry};
pub use state::AppState;
