//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading report
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};

use crate::error::{ReportError, ReportResult};
use crate::models::Shift;
use crate::report::document::ELLIPSIS;

use super::types::{
    EngineConfig, OrganizationConfig, ReportConfig, ShiftsConfig, SourceConfig,
};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── organization.yaml  # Branding and report titles
/// ├── shifts.yaml        # Lateness cutoff hours
/// ├── report.yaml        # Time format, paging and document layout
/// └── source.yaml        # Upstream attendance API
/// ```
///
/// # Example
///
/// ```no_run
/// use muster_roll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Organization: {}", loader.organization().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> ReportResult<Self> {
        let path = path.as_ref();

        let organization = Self::load_yaml::<OrganizationConfig>(&path.join("organization.yaml"))?;
        let shifts = Self::load_yaml::<ShiftsConfig>(&path.join("shifts.yaml"))?;
        let report = Self::load_yaml::<ReportConfig>(&path.join("report.yaml"))?;
        let source = Self::load_yaml::<SourceConfig>(&path.join("source.yaml"))?;

        Self::validate_shifts(&shifts, &path.join("shifts.yaml"))?;
        Self::validate_report(&report, &path.join("report.yaml"))?;

        tracing::debug!(
            path = %path.display(),
            organization = %organization.name,
            base_url = %source.base_url,
            "Loaded configuration"
        );

        Ok(Self {
            config: EngineConfig::new(organization, shifts, report, source),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> ReportResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ReportError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ReportError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_shifts(shifts: &ShiftsConfig, path: &Path) -> ReportResult<()> {
        for shift in Shift::ALL {
            let hour = shifts.cutoffs.cutoff(shift);
            if hour > 23 {
                return Err(ReportError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("{} cutoff hour must be 0-23, got {}", shift.as_str(), hour),
                });
            }
        }
        Ok(())
    }

    fn validate_report(report: &ReportConfig, path: &Path) -> ReportResult<()> {
        let invalid = StrftimeItems::new(&report.time_format).any(|item| matches!(item, Item::Error));
        if invalid || report.time_format.is_empty() {
            return Err(ReportError::ConfigParseError {
                path: path.display().to_string(),
                message: format!("invalid time_format: {:?}", report.time_format),
            });
        }
        if report.default_page_size == 0 {
            return Err(ReportError::ConfigParseError {
                path: path.display().to_string(),
                message: "default_page_size must be at least 1".to_string(),
            });
        }
        if report.document.name_char_budget < ELLIPSIS.len() {
            return Err(ReportError::ConfigParseError {
                path: path.display().to_string(),
                message: format!(
                    "document.name_char_budget must be at least {} to fit the ellipsis",
                    ELLIPSIS.len()
                ),
            });
        }
        Ok(())
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the organization branding.
    pub fn organization(&self) -> &OrganizationConfig {
        self.config.organization()
    }

    /// Returns the report rendering configuration.
    pub fn report(&self) -> &ReportConfig {
        self.config.report()
    }

    /// Returns the upstream API configuration.
    pub fn source(&self) -> &SourceConfig {
        self.config.source()
    }
}
