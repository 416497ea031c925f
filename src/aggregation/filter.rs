//! Row filtering for report views.

use serde::{Deserialize, Serialize};

use crate::models::{EmployeeAttendanceRow, Shift};

/// Narrows a muster roll to the rows a viewer is interested in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFilter {
    /// Case-insensitive substring matched against name, designation and id.
    #[serde(default)]
    pub search: Option<String>,
    /// Only rows on this shift.
    #[serde(default)]
    pub shift: Option<Shift>,
}

impl RowFilter {
    /// Returns true if the filter narrows anything.
    pub fn is_active(&self) -> bool {
        self.search_term().is_some() || self.shift.is_some()
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Returns true if the row passes the filter.
    pub fn matches(&self, row: &EmployeeAttendanceRow) -> bool {
        if let Some(shift) = self.shift {
            if row.shift != Some(shift) {
                return false;
            }
        }
        match self.search_term() {
            Some(term) => [&row.name, &row.designation, &row.employee_id]
                .iter()
                .any(|field| field.to_lowercase().contains(&term)),
            None => true,
        }
    }

    /// Returns the rows that pass the filter, preserving order.
    pub fn apply(&self, rows: &[EmployeeAttendanceRow]) -> Vec<EmployeeAttendanceRow> {
        rows.iter().filter(|r| self.matches(r)).cloned().collect()
    }

    /// Describes the active filters for report headers.
    ///
    /// # Example
    ///
    /// ```
    /// use muster_roll::aggregation::RowFilter;
    /// use muster_roll::models::Shift;
    ///
    /// let filter = RowFilter { search: Some("guard".into()), shift: Some(Shift::Night) };
    /// assert_eq!(filter.describe(), vec!["Search: guard", "Shift: Night"]);
    /// ```
    pub fn describe(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            parts.push(format!("Search: {}", search));
        }
        if let Some(shift) = self.shift {
            parts.push(format!("Shift: {}", shift));
        }
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<EmployeeAttendanceRow> {
        vec![
            EmployeeAttendanceRow::new("e1", "Asha Patel", "Guard", Some(Shift::Morning)),
            EmployeeAttendanceRow::new("e2", "Ravi Kumar", "Supervisor", Some(Shift::Night)),
            EmployeeAttendanceRow::new("e3", "Meena Rao", "Guard", Some(Shift::Night)),
        ]
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let filter = RowFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&rows()).len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let filter = RowFilter {
            search: Some("GUARD".to_string()),
            shift: None,
        };
        let ids: Vec<_> = filter.apply(&rows()).into_iter().map(|r| r.employee_id).collect();
        assert_eq!(ids, vec!["e1", "e3"]);

        let by_id = RowFilter {
            search: Some("e2".to_string()),
            shift: None,
        };
        assert_eq!(by_id.apply(&rows())[0].name, "Ravi Kumar");
    }

    #[test]
    fn test_shift_and_search_combine() {
        let filter = RowFilter {
            search: Some("guard".to_string()),
            shift: Some(Shift::Night),
        };
        let matched = filter.apply(&rows());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].employee_id, "e3");
    }

    #[test]
    fn test_blank_search_is_inactive() {
        let filter = RowFilter {
            search: Some("   ".to_string()),
            shift: None,
        };
        assert!(!filter.is_active());
        assert!(filter.describe().is_empty());
    }
}
