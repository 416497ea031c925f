//! Shift model.
//!
//! This module defines the three fixed daily work windows an employee can be
//! rostered on.

use serde::{Deserialize, Serialize};

/// A fixed daily work window.
///
/// # Example
///
/// ```
/// use muster_roll::models::Shift;
///
/// let shift: Shift = serde_json::from_str("\"evening\"").unwrap();
/// assert_eq!(shift, Shift::Evening);
/// assert_eq!(shift.to_string(), "Evening");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    /// Morning shift.
    Morning,
    /// Evening shift.
    Evening,
    /// Night shift.
    Night,
}

impl Shift {
    /// All shifts in their display order.
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Evening, Shift::Night];

    /// Returns the lowercase wire name used by the upstream API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Morning => "morning",
            Shift::Evening => "evening",
            Shift::Night => "night",
        }
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shift::Morning => write!(f, "Morning"),
            Shift::Evening => write!(f, "Evening"),
            Shift::Night => write!(f, "Night"),
        }
    }
}

impl std::str::FromStr for Shift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(Shift::Morning),
            "evening" => Ok(Shift::Evening),
            "night" => Ok(Shift::Night),
            other => Err(format!("unknown shift: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_serialization_is_lowercase() {
        assert_eq!(serde_json::to_string(&Shift::Night).unwrap(), "\"night\"");
        let shift: Shift = serde_json::from_str("\"morning\"").unwrap();
        assert_eq!(shift, Shift::Morning);
    }

    #[test]
    fn test_unknown_shift_fails_to_deserialize() {
        let result: Result<Shift, _> = serde_json::from_str("\"afternoon\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_shift_from_str_is_case_insensitive() {
        assert_eq!("Evening".parse::<Shift>().unwrap(), Shift::Evening);
        assert_eq!(" NIGHT ".parse::<Shift>().unwrap(), Shift::Night);
        assert!("noon".parse::<Shift>().is_err());
    }

    #[test]
    fn test_display_and_wire_names() {
        for shift in Shift::ALL {
            assert_eq!(shift.to_string().to_lowercase(), shift.as_str());
        }
    }
}
