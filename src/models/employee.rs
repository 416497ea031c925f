//! Employee directory model.
//!
//! This module defines the [`EmployeeSummary`] returned by the employee
//! directory and embedded in some attendance records.

use serde::{Deserialize, Serialize};

use super::Shift;

/// Placeholder name for an employee reference that cannot be resolved.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Placeholder for a missing designation.
pub const NOT_AVAILABLE: &str = "N/A";

/// Directory metadata for one employee.
///
/// The directory is backed by MongoDB, so identifiers may arrive as `_id`.
///
/// # Example
///
/// ```
/// use muster_roll::models::{EmployeeSummary, Shift};
///
/// let json = r#"{"_id": "e1", "name": "Asha", "shift": "morning"}"#;
/// let employee: EmployeeSummary = serde_json::from_str(json).unwrap();
/// assert_eq!(employee.id, "e1");
/// assert_eq!(employee.designation_or_default(), "N/A");
/// assert_eq!(employee.shift, Some(Shift::Morning));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// Unique identifier for the employee.
    #[serde(alias = "_id")]
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// The employee's job designation, if recorded.
    #[serde(default)]
    pub designation: Option<String>,
    /// The shift the employee is rostered on, if recorded.
    #[serde(default)]
    pub shift: Option<Shift>,
}

impl EmployeeSummary {
    /// Returns the designation, or `"N/A"` when none is recorded.
    pub fn designation_or_default(&self) -> &str {
        self.designation
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_plain_id() {
        let json = r#"{
            "id": "emp_001",
            "name": "Ravi Kumar",
            "designation": "Supervisor",
            "shift": "night"
        }"#;

        let employee: EmployeeSummary = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.name, "Ravi Kumar");
        assert_eq!(employee.designation_or_default(), "Supervisor");
        assert_eq!(employee.shift, Some(Shift::Night));
    }

    #[test]
    fn test_deserialize_with_mongo_id() {
        let json = r#"{"_id": "64f0c2", "name": "Meena"}"#;

        let employee: EmployeeSummary = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "64f0c2");
        assert!(employee.designation.is_none());
        assert!(employee.shift.is_none());
    }

    #[test]
    fn test_blank_designation_defaults_to_na() {
        let employee = EmployeeSummary {
            id: "e1".to_string(),
            name: "Meena".to_string(),
            designation: Some("  ".to_string()),
            shift: None,
        };
        assert_eq!(employee.designation_or_default(), NOT_AVAILABLE);
    }

    #[test]
    fn test_missing_name_fails() {
        let result: Result<EmployeeSummary, _> = serde_json::from_str(r#"{"id": "e1"}"#);
        assert!(result.is_err());
    }
}
