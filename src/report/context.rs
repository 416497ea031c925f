//! Report context threaded into every renderer.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Which part of the organization a report covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportScope {
    /// Every site.
    #[default]
    Global,
    /// A single site.
    Site {
        /// Upstream site identifier.
        id: String,
        /// Site display name.
        name: String,
    },
}

impl ReportScope {
    /// Display label for headers.
    pub fn label(&self) -> &str {
        match self {
            ReportScope::Global => "All Sites",
            ReportScope::Site { name, .. } => name,
        }
    }

    /// The site identifier, if scoped to one site.
    pub fn site_id(&self) -> Option<&str> {
        match self {
            ReportScope::Global => None,
            ReportScope::Site { id, .. } => Some(id),
        }
    }

    /// Prefix used in export file names.
    ///
    /// # Example
    ///
    /// ```
    /// use muster_roll::report::ReportScope;
    ///
    /// assert_eq!(ReportScope::Global.file_prefix(), "All_Sites");
    /// let site = ReportScope::Site { id: "s1".into(), name: "North Gate / Block B".into() };
    /// assert_eq!(site.file_prefix(), "North_Gate_Block_B");
    /// ```
    pub fn file_prefix(&self) -> String {
        let mut prefix = String::new();
        for c in self.label().chars() {
            if c.is_ascii_alphanumeric() {
                prefix.push(c);
            } else if !prefix.is_empty() && !prefix.ends_with('_') {
                prefix.push('_');
            }
        }
        let prefix = prefix.trim_end_matches('_');
        if prefix.is_empty() {
            "Site".to_string()
        } else {
            prefix.to_string()
        }
    }
}

/// Who a report is for and when it was generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportContext {
    /// Organization name for branded headers.
    pub organization: String,
    /// Report scope.
    pub scope: ReportScope,
    /// Name of the user the report was generated for.
    pub generated_by: Option<String>,
    /// Local generation time.
    pub generated_at: NaiveDateTime,
}

impl ReportContext {
    /// Creates a context stamped with the current local time.
    pub fn new(organization: impl Into<String>, scope: ReportScope) -> Self {
        Self {
            organization: organization.into(),
            scope,
            generated_by: None,
            generated_at: Local::now().naive_local(),
        }
    }

    /// Sets the user the report was generated for.
    pub fn with_generated_by(mut self, user: Option<String>) -> Self {
        self.generated_by = user;
        self
    }

    /// Overrides the generation time.
    pub fn with_generated_at(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Generation timestamp as printed in footers.
    pub fn generated_at_label(&self) -> String {
        self.generated_at.format("%d %b %Y %H:%M").to_string()
    }
}
