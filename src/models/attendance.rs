//! Attendance record model.
//!
//! This module contains the [`AttendanceRecord`] type returned by the upstream
//! attendance endpoint, together with the [`EmployeeRef`] variant that captures
//! the two shapes an employee reference can take on the wire.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize, Serializer};

use crate::config::ReportTimezone;

use super::{EmployeeSummary, Shift};

/// Reference from an attendance record to the employee it belongs to.
///
/// The upstream API either returns a bare identifier or populates the
/// reference with the employee's directory summary.
///
/// # Example
///
/// ```
/// use muster_roll::models::EmployeeRef;
///
/// let bare: EmployeeRef = serde_json::from_str("\"e1\"").unwrap();
/// assert_eq!(bare.id(), "e1");
///
/// let embedded: EmployeeRef =
///     serde_json::from_str(r#"{"_id": "e2", "name": "Asha"}"#).unwrap();
/// assert_eq!(embedded.id(), "e2");
/// assert!(embedded.embedded().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmployeeRef {
    /// A bare employee identifier.
    Id(String),
    /// An embedded employee summary.
    Embedded(EmployeeSummary),
}

impl EmployeeRef {
    /// Returns the referenced employee's identifier.
    pub fn id(&self) -> &str {
        match self {
            EmployeeRef::Id(id) => id,
            EmployeeRef::Embedded(summary) => &summary.id,
        }
    }

    /// Returns the embedded summary, if the reference carries one.
    pub fn embedded(&self) -> Option<&EmployeeSummary> {
        match self {
            EmployeeRef::Id(_) => None,
            EmployeeRef::Embedded(summary) => Some(summary),
        }
    }
}

/// A step-in or step-out event.
///
/// Accepts either a bare timestamp string or an object carrying the time and
/// the location captured by the mobile client.
///
/// `time` is the wall-clock time as written in the timestamp. When the
/// timestamp carried a UTC offset it is kept in `offset` until
/// [`StepEvent::localized`] converts the event into the reporting zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StepEventRepr")]
pub struct StepEvent {
    /// Wall-clock time of the event.
    pub time: NaiveDateTime,
    /// Offset `time` is expressed in, or `None` once it is local.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_offset"
    )]
    pub offset: Option<FixedOffset>,
    /// Free-text address captured with the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Latitude captured with the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude captured with the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl StepEvent {
    /// Creates a local-time event with no location attached.
    pub fn at(time: NaiveDateTime) -> Self {
        Self {
            time,
            offset: None,
            address: None,
            latitude: None,
            longitude: None,
        }
    }

    /// Creates an event from an instant that still carries its offset.
    pub fn at_instant(instant: DateTime<FixedOffset>) -> Self {
        Self {
            offset: Some(*instant.offset()),
            ..Self::at(instant.naive_local())
        }
    }

    /// Returns the event with its time converted into the reporting zone.
    ///
    /// Events without an offset are already local and come back unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use muster_roll::config::ReportTimezone;
    /// use muster_roll::models::StepEvent;
    /// use chrono::{DateTime, Timelike};
    ///
    /// let utc = DateTime::parse_from_rfc3339("2026-01-06T03:00:00Z").unwrap();
    /// let ist: ReportTimezone = "+05:30".parse().unwrap();
    /// let local = StepEvent::at_instant(utc).localized(&ist);
    /// assert_eq!((local.time.hour(), local.time.minute()), (8, 30));
    /// assert!(local.offset.is_none());
    /// ```
    pub fn localized(&self, timezone: &ReportTimezone) -> Self {
        let Some(offset) = self.offset else {
            return self.clone();
        };
        let time = offset
            .from_local_datetime(&self.time)
            .single()
            .map(|instant| timezone.wall_clock(instant))
            .unwrap_or(self.time);
        Self {
            time,
            offset: None,
            ..self.clone()
        }
    }
}

fn serialize_offset<S: Serializer>(
    offset: &Option<FixedOffset>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match offset {
        Some(offset) => serializer.collect_str(offset),
        None => serializer.serialize_none(),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StepEventRepr {
    Bare(String),
    Full {
        #[serde(alias = "timestamp")]
        time: String,
        #[serde(default)]
        offset: Option<String>,
        #[serde(default)]
        address: Option<String>,
        #[serde(default)]
        latitude: Option<f64>,
        #[serde(default)]
        longitude: Option<f64>,
    },
}

impl TryFrom<StepEventRepr> for StepEvent {
    type Error = String;

    fn try_from(repr: StepEventRepr) -> Result<Self, Self::Error> {
        match repr {
            StepEventRepr::Bare(time) => parse_event_time(&time),
            StepEventRepr::Full {
                time,
                offset,
                address,
                latitude,
                longitude,
            } => {
                let mut event = parse_event_time(&time)?;
                if event.offset.is_none() {
                    event.offset = offset
                        .map(|o| {
                            o.trim()
                                .parse::<FixedOffset>()
                                .map_err(|_| format!("invalid offset: {}", o))
                        })
                        .transpose()?;
                }
                Ok(StepEvent {
                    address,
                    latitude,
                    longitude,
                    ..event
                })
            }
        }
    }
}

fn parse_event_time(value: &str) -> Result<StepEvent, String> {
    match DateTime::parse_from_rfc3339(value.trim()) {
        Ok(instant) => Ok(StepEvent::at_instant(instant)),
        Err(_) => parse_timestamp(value).map(StepEvent::at),
    }
}

/// Parses an upstream timestamp into its written wall-clock time.
///
/// RFC 3339 timestamps keep the wall-clock time at their own offset and the
/// offset is dropped. Naive timestamps are taken as already local. Step events
/// keep the offset instead; see [`StepEvent::localized`].
///
/// # Example
///
/// ```
/// use muster_roll::models::parse_timestamp;
/// use chrono::Timelike;
///
/// let t = parse_timestamp("2026-01-05T07:15:00+05:30").unwrap();
/// assert_eq!(t.hour(), 7);
/// let t = parse_timestamp("2026-01-05T07:15").unwrap();
/// assert_eq!(t.minute(), 15);
/// ```
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| format!("invalid timestamp: {}", value))
}

/// A single attendance event for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Upstream record identifier.
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The employee this record belongs to.
    #[serde(alias = "employee")]
    pub employee_id: EmployeeRef,
    /// The shift the record was captured on.
    #[serde(default)]
    pub shift: Option<Shift>,
    /// Clock-in event. Absent when the employee never clocked in.
    #[serde(default)]
    pub step_in: Option<StepEvent>,
    /// Clock-out event. Absent while a session is still open.
    #[serde(default)]
    pub step_out: Option<StepEvent>,
    /// The site the record was captured at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
}

impl AttendanceRecord {
    /// Returns the step-in time, if any.
    pub fn step_in_time(&self) -> Option<NaiveDateTime> {
        self.step_in.as_ref().map(|e| e.time)
    }

    /// Returns the step-out time, if any.
    pub fn step_out_time(&self) -> Option<NaiveDateTime> {
        self.step_out.as_ref().map(|e| e.time)
    }

    /// Returns the calendar date the record is placed on, taken from step-in.
    pub fn work_date(&self) -> Option<NaiveDate> {
        self.step_in_time().map(|t| t.date())
    }

    /// Returns the record with both events in the reporting zone.
    pub fn localized(&self, timezone: &ReportTimezone) -> Self {
        Self {
            step_in: self.step_in.as_ref().map(|e| e.localized(timezone)),
            step_out: self.step_out.as_ref().map(|e| e.localized(timezone)),
            ..self.clone()
        }
    }
}

/// Converts every record into the reporting zone.
///
/// Day placement and lateness read step times as local, so records are
/// passed through here as they enter the engine.
pub fn localize_records(
    records: &[AttendanceRecord],
    timezone: &ReportTimezone,
) -> Vec<AttendanceRecord> {
    records.iter().map(|r| r.localized(timezone)).collect()
}
