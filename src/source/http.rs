//! REST client for the upstream attendance API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::SourceConfig;
use crate::error::{ReportError, ReportResult};
use crate::models::{AttendanceRecord, EmployeeSummary, Shift};

use super::{AttendanceQuery, AttendanceSource, Session};

const ATTENDANCE_ENDPOINT: &str = "attendance";
const EMPLOYEES_ENDPOINT: &str = "employees";
const SUMMARY_ENDPOINT: &str = "attendanceSummary";

/// List responses arrive either bare or wrapped in `{ "data": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) => items,
            ListEnvelope::Wrapped { data } => data,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResponse {
    present_employees: u32,
}

/// [`AttendanceSource`] backed by the attendance REST API.
#[derive(Debug, Clone)]
pub struct HttpAttendanceSource {
    client: Client,
    base_url: String,
    session: Session,
}

impl HttpAttendanceSource {
    /// Creates a client for the configured API.
    pub fn new(config: &SourceConfig, session: Session) -> ReportResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ReportError::Upstream {
                endpoint: config.base_url.clone(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// The session this client authenticates with.
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> ReportResult<T> {
        let upstream = |message: String| ReportError::Upstream {
            endpoint: endpoint.to_string(),
            message,
        };

        let mut request = self.client.get(self.url(endpoint)).query(query);
        if let Some(token) = &self.session.token {
            request = request.bearer_auth(token);
        }

        debug!(endpoint, params = query.len(), "Calling upstream");
        let response = request.send().await.map_err(|e| upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(upstream(format!("HTTP {}: {}", status.as_u16(), body.trim())));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| upstream(format!("invalid response body: {}", e)))
    }
}

#[async_trait]
impl AttendanceSource for HttpAttendanceSource {
    async fn fetch_attendance(&self, query: &AttendanceQuery) -> ReportResult<Vec<AttendanceRecord>> {
        let mut params = vec![
            ("startDate", query.start_date.to_string()),
            ("endDate", query.end_date.to_string()),
        ];
        if let Some(employee_id) = &query.employee_id {
            params.push(("employeeId", employee_id.clone()));
        }
        if let Some(shift) = query.shift {
            params.push(("shift", shift.as_str().to_string()));
        }
        if let Some(site_id) = &query.site_id {
            params.push(("siteId", site_id.clone()));
        }

        let envelope: ListEnvelope<AttendanceRecord> =
            self.get_json(ATTENDANCE_ENDPOINT, &params).await?;
        Ok(envelope.into_vec())
    }

    async fn fetch_employees(&self, site_id: Option<&str>) -> ReportResult<Vec<EmployeeSummary>> {
        let params: Vec<(&str, String)> = site_id
            .map(|id| vec![("siteId", id.to_string())])
            .unwrap_or_default();

        let envelope: ListEnvelope<EmployeeSummary> =
            self.get_json(EMPLOYEES_ENDPOINT, &params).await?;
        Ok(envelope.into_vec())
    }

    async fn attendance_summary(
        &self,
        date: NaiveDate,
        shift: Shift,
        site_id: Option<&str>,
    ) -> ReportResult<u32> {
        let mut params = vec![
            ("date", date.to_string()),
            ("shift", shift.as_str().to_string()),
        ];
        if let Some(site_id) = site_id {
            params.push(("siteId", site_id.to_string()));
        }
        let summary: SummaryResponse = self.get_json(SUMMARY_ENDPOINT, &params).await?;
        Ok(summary.present_employees)
    }
}
