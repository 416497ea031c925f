//! Error types for the muster roll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition that can occur while loading configuration,
//! fetching attendance data, aggregating it, and exporting reports.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the muster roll engine.
///
/// Every error is scoped to a single report-generation invocation and is
/// recoverable by retrying or refreshing.
///
/// # Example
///
/// ```
/// use muster_roll::error::ReportError;
///
/// let error = ReportError::ConfigNotFound {
///     path: "/missing/report.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/report.yaml");
/// ```
#[derive(Debug, Error)]
pub enum ReportError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The requested reporting period ends before it starts.
    #[error("Invalid period: end date {to} is before start date {from}")]
    InvertedPeriod {
        /// The requested start date.
        from: NaiveDate,
        /// The requested end date.
        to: NaiveDate,
    },

    /// The reporting period could not be resolved from the supplied inputs.
    #[error("Invalid period: {message}")]
    InvalidPeriod {
        /// A description of what was wrong with the period inputs.
        message: String,
    },

    /// A request was structurally valid but semantically unusable.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The offending field.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// The upstream attendance or directory service failed.
    #[error("Upstream request to '{endpoint}' failed: {message}")]
    Upstream {
        /// The upstream endpoint path that was called.
        endpoint: String,
        /// A description of the failure.
        message: String,
    },

    /// The requested export format has no renderer compiled into this build.
    #[error("Export format '{format}' is unavailable: {reason}")]
    ExportUnavailable {
        /// The export format that was requested.
        format: String,
        /// Why the renderer is unavailable.
        reason: String,
    },

    /// An export renderer failed while producing a file.
    #[error("Failed to export {format}: {message}")]
    Export {
        /// The export format being produced.
        format: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return ReportError.
pub type ReportResult<T> = Result<T, ReportError>;
