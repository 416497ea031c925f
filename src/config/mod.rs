//! Configuration loading and management for the muster roll engine.
//!
//! This module loads organization branding, shift cutoffs, report layout
//! and the upstream API location from a directory of YAML files.
//!
//! # Example
//!
//! ```no_run
//! use muster_roll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Reporting for: {}", config.organization().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DocumentLayoutConfig, EngineConfig, OrganizationConfig, ReportConfig, ReportTimezone,
    ShiftCutoffs, ShiftsConfig, SourceConfig,
};
