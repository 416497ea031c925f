//! Configuration types for report generation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, Utc};
use serde::Deserialize;

use crate::models::Shift;

/// Organization branding shown on exported reports.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationConfig {
    /// The organization name printed in document headers.
    pub name: String,
    /// Title of the muster roll report.
    #[serde(default = "default_muster_roll_title")]
    pub muster_roll_title: String,
    /// Title of the day-by-day summary report.
    #[serde(default = "default_summary_title")]
    pub summary_title: String,
}

fn default_muster_roll_title() -> String {
    "Muster Roll".to_string()
}

fn default_summary_title() -> String {
    "Attendance Summary Report".to_string()
}

/// Step-in hour after which a closed record is classified as late.
///
/// The comparison is strict: a step-in during the cutoff hour itself is on time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShiftCutoffs {
    /// Morning shift cutoff hour.
    pub morning: u32,
    /// Evening shift cutoff hour.
    pub evening: u32,
    /// Night shift cutoff hour.
    pub night: u32,
}

impl Default for ShiftCutoffs {
    fn default() -> Self {
        Self {
            morning: 7,
            evening: 15,
            night: 23,
        }
    }
}

impl ShiftCutoffs {
    /// Returns the cutoff hour for a shift.
    pub fn cutoff(&self, shift: Shift) -> u32 {
        match shift {
            Shift::Morning => self.morning,
            Shift::Evening => self.evening,
            Shift::Night => self.night,
        }
    }
}

/// Shifts configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShiftsConfig {
    /// Lateness cutoffs per shift.
    #[serde(default)]
    pub cutoffs: ShiftCutoffs,
}

/// Page geometry and typography for the paginated document export.
///
/// All lengths are millimetres, font sizes are points.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DocumentLayoutConfig {
    /// Page width in landscape orientation.
    pub page_width_mm: f32,
    /// Page height in landscape orientation.
    pub page_height_mm: f32,
    /// Margin on every side.
    pub margin_mm: f32,
    /// Height reserved for the branded header.
    pub header_height_mm: f32,
    /// Height reserved for the footer.
    pub footer_height_mm: f32,
    /// Width of the SR column.
    pub sr_width_mm: f32,
    /// Width of the name column.
    pub name_width_mm: f32,
    /// Width of the designation column.
    pub designation_width_mm: f32,
    /// Width of the shift column.
    pub shift_width_mm: f32,
    /// Width of the total column.
    pub total_width_mm: f32,
    /// Lower bound for each day column.
    pub min_day_column_width_mm: f32,
    /// Height of one text line inside a cell.
    pub line_height_mm: f32,
    /// Vertical padding added to every row.
    pub row_padding_mm: f32,
    /// Characters of an employee name kept before truncating with an ellipsis.
    pub name_char_budget: usize,
    /// Body font size.
    pub font_size_pt: f32,
    /// Header title font size.
    pub title_font_size_pt: f32,
}

impl Default for DocumentLayoutConfig {
    fn default() -> Self {
        Self {
            page_width_mm: 297.0,
            page_height_mm: 210.0,
            margin_mm: 10.0,
            header_height_mm: 26.0,
            footer_height_mm: 10.0,
            sr_width_mm: 8.0,
            name_width_mm: 36.0,
            designation_width_mm: 22.0,
            shift_width_mm: 14.0,
            total_width_mm: 11.0,
            min_day_column_width_mm: 5.5,
            line_height_mm: 2.6,
            row_padding_mm: 1.4,
            name_char_budget: 22,
            font_size_pt: 5.5,
            title_font_size_pt: 13.0,
        }
    }
}

/// The time zone step-in and step-out times are reported in.
///
/// Written in report.yaml as `local`, `UTC` or a fixed offset such as
/// `+05:30`. Timestamps the upstream sends with an offset are converted into
/// this zone before they are placed on a day or checked for lateness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum ReportTimezone {
    /// The host's local time zone.
    #[default]
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl ReportTimezone {
    /// Returns the wall-clock time of an instant in this zone.
    ///
    /// # Example
    ///
    /// ```
    /// use muster_roll::config::ReportTimezone;
    /// use chrono::{DateTime, Timelike};
    ///
    /// let ist: ReportTimezone = "+05:30".parse().unwrap();
    /// let instant = DateTime::parse_from_rfc3339("2026-01-06T03:00:00Z").unwrap();
    /// assert_eq!(ist.wall_clock(instant).hour(), 8);
    /// ```
    pub fn wall_clock(&self, instant: DateTime<FixedOffset>) -> NaiveDateTime {
        match self {
            ReportTimezone::Local => instant.with_timezone(&Local).naive_local(),
            ReportTimezone::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }
}

impl FromStr for ReportTimezone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("local") {
            return Ok(ReportTimezone::Local);
        }
        if value.eq_ignore_ascii_case("utc") || value == "Z" {
            return Ok(ReportTimezone::Fixed(Utc.fix()));
        }
        value.parse::<FixedOffset>().map(ReportTimezone::Fixed).map_err(|_| {
            format!(
                "invalid timezone {:?}, expected `local`, `UTC` or an offset like +05:30",
                value
            )
        })
    }
}

impl TryFrom<String> for ReportTimezone {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for ReportTimezone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportTimezone::Local => write!(f, "local"),
            ReportTimezone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

/// Report rendering configuration from report.yaml.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// chrono format string for step-in/step-out display times.
    pub time_format: String,
    /// Zone that offset timestamps are converted into.
    pub timezone: ReportTimezone,
    /// Rows per page of the on-screen table when the caller gives none.
    pub default_page_size: usize,
    /// Paginated document layout.
    pub document: DocumentLayoutConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            time_format: "%H:%M".to_string(),
            timezone: ReportTimezone::Local,
            default_page_size: 25,
            document: DocumentLayoutConfig::default(),
        }
    }
}

/// Upstream attendance API configuration from source.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the attendance REST API, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    organization: OrganizationConfig,
    shifts: ShiftsConfig,
    report: ReportConfig,
    source: SourceConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        organization: OrganizationConfig,
        shifts: ShiftsConfig,
        report: ReportConfig,
        source: SourceConfig,
    ) -> Self {
        Self {
            organization,
            shifts,
            report,
            source,
        }
    }

    /// Returns the organization branding.
    pub fn organization(&self) -> &OrganizationConfig {
        &self.organization
    }

    /// Returns the per-shift lateness cutoffs.
    pub fn shift_cutoffs(&self) -> &ShiftCutoffs {
        &self.shifts.cutoffs
    }

    /// Returns the report rendering configuration.
    pub fn report(&self) -> &ReportConfig {
        &self.report
    }

    /// Returns the upstream API configuration.
    pub fn source(&self) -> &SourceConfig {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cutoffs() {
        let cutoffs = ShiftCutoffs::default();
        assert_eq!(cutoffs.cutoff(Shift::Morning), 7);
        assert_eq!(cutoffs.cutoff(Shift::Evening), 15);
        assert_eq!(cutoffs.cutoff(Shift::Night), 23);
    }

    #[test]
    fn test_partial_cutoffs_fill_defaults() {
        let config: ShiftsConfig = serde_yaml::from_str("cutoffs:\n  morning: 9\n").unwrap();
        assert_eq!(config.cutoffs.morning, 9);
        assert_eq!(config.cutoffs.evening, 15);
    }

    #[test]
    fn test_report_config_defaults_when_empty() {
        let config: ReportConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.document.page_width_mm, 297.0);
    }

    #[test]
    fn test_timezone_parsing() {
        assert_eq!("local".parse::<ReportTimezone>().unwrap(), ReportTimezone::Local);
        assert_eq!(
            "UTC".parse::<ReportTimezone>().unwrap(),
            ReportTimezone::Fixed(Utc.fix())
        );
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        assert_eq!(
            " +05:30 ".parse::<ReportTimezone>().unwrap(),
            ReportTimezone::Fixed(ist)
        );
        assert!("Mars/Olympus".parse::<ReportTimezone>().is_err());
    }

    #[test]
    fn test_timezone_from_yaml() {
        let config: ReportConfig = serde_yaml::from_str("timezone: \"-03:00\"").unwrap();
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(config.timezone, ReportTimezone::Fixed(brt));
        assert_eq!(config.timezone.to_string(), "-03:00");

        let result: Result<ReportConfig, _> = serde_yaml::from_str("timezone: somewhere");
        assert!(result.is_err());
    }

    #[test]
    fn test_fixed_zone_wall_clock_crosses_midnight() {
        let ist: ReportTimezone = "+05:30".parse().unwrap();
        let instant = DateTime::parse_from_rfc3339("2026-01-05T19:00:00Z").unwrap();
        let local = ist.wall_clock(instant);
        assert_eq!(local.to_string(), "2026-01-06 00:30:00");
    }

    #[test]
    fn test_organization_titles_default() {
        let config: OrganizationConfig = serde_yaml::from_str("name: Acme Facilities").unwrap();
        assert_eq!(config.muster_roll_title, "Muster Roll");
        assert_eq!(config.summary_title, "Attendance Summary Report");
    }

    #[test]
    fn test_source_requires_base_url() {
        let result: Result<SourceConfig, _> = serde_yaml::from_str("timeout_secs: 5");
        assert!(result.is_err());
    }
}
