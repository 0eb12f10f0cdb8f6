//! Google Analytics query runner.
//!
//! Executes a JSON-described report request against the Core Reporting API
//! and reshapes the positional row values into named records for the host.
//!
//! Example query:
//!
//! ```json
//! {
//!   "start_date": "2012-04-01",
//!   "end_date": "today",
//!   "metrics": "ga:sessions",
//!   "dimensions": "ga:year,ga:month",
//!   "segment": "sessions::condition::ga:customVarValue2!@student",
//!   "columns": [
//!     {"name": "year", "type": "string"},
//!     {"name": "month", "type": "string"},
//!     {"name": "new visitors", "type": "integer"}
//!   ]
//! }
//! ```
//!
//! The `ids` parameter is never taken from the query; it's synthesized from
//! the configured profile. Row value order must match the `columns` order,
//! which the API guarantees for a dimensions-then-metrics column list; this
//! is assumed, not validated.
use std::sync::Arc;

use analytics_connector::ReportQuery;
use async_trait::async_trait;
use indexmap::IndexMap;
use runner_common::errors::RunnerCommonError;
use runner_common::records::{Column, Records};
use runner_common::registry::RunnerRegistry;
use runner_common::runner::{ConfigProperty, ConfigSchema, QueryRunner};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::errors::{GoogleAnalyticsError, Result};
use crate::reporting::{HttpReportingApi, ReportingApi};

pub mod errors;
pub mod reporting;

pub const RUNNER_NAME: &str = "google_analytics";

/// Host-stored configuration for one Analytics view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleAnalyticsConfig {
    /// Path to the service account key file.
    #[serde(rename = "credentialsPath", default)]
    pub credentials_path: String,
    /// Numeric GA view (profile) id.
    #[serde(default)]
    pub profile: String,
}

/// The incoming query text, parsed. All fields are required; parameter values
/// are forwarded to the API verbatim.
#[derive(Debug, Deserialize)]
struct QueryRequest {
    start_date: String,
    end_date: String,
    metrics: String,
    dimensions: String,
    segment: String,
    columns: Vec<Column>,
}

pub struct GoogleAnalyticsRunner {
    config: GoogleAnalyticsConfig,
    api: Arc<dyn ReportingApi>,
}

impl GoogleAnalyticsRunner {
    /// Validate configuration and build a runner.
    ///
    /// Configuration errors raised here propagate to the host's setup flow;
    /// they are not part of the query execution error contract.
    pub fn try_new(config: GoogleAnalyticsConfig) -> Result<GoogleAnalyticsRunner> {
        Self::with_api(config, Arc::new(HttpReportingApi))
    }

    fn with_api(
        config: GoogleAnalyticsConfig,
        api: Arc<dyn ReportingApi>,
    ) -> Result<GoogleAnalyticsRunner> {
        if config.credentials_path.is_empty() {
            return Err(GoogleAnalyticsError::MissingConfig("credentialsPath"));
        }
        if config.profile.is_empty() {
            return Err(GoogleAnalyticsError::MissingConfig("profile"));
        }
        Ok(GoogleAnalyticsRunner { config, api })
    }

    async fn run_query_inner(&self, query: &str, cancel: CancellationToken) -> Result<String> {
        let request: QueryRequest = serde_json::from_str(query)?;

        let report_query = ReportQuery {
            ids: format!("ga:{}", self.config.profile),
            start_date: request.start_date,
            end_date: request.end_date,
            metrics: request.metrics,
            dimensions: request.dimensions,
            segment: request.segment,
        };

        // The fetch is the only blocking step; a host-delivered cancellation
        // during it discards the query entirely.
        let report = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(GoogleAnalyticsError::Cancelled),
            report = self
                .api
                .fetch_report(&self.config.credentials_path, &report_query) => report?,
        };

        let raw = report.rows.ok_or(GoogleAnalyticsError::NoRows)?;
        let records = Records::from_raw_rows(request.columns, raw)?;

        Ok(records.to_json()?)
    }
}

#[async_trait]
impl QueryRunner for GoogleAnalyticsRunner {
    fn name(&self) -> &'static str {
        RUNNER_NAME
    }

    async fn run_query(
        &self,
        query: &str,
        cancel: CancellationToken,
    ) -> Result<String, RunnerCommonError> {
        self.run_query_inner(query, cancel).await.map_err(Into::into)
    }
}

pub fn config_schema() -> ConfigSchema {
    let mut properties = IndexMap::new();
    properties.insert(
        "profile",
        ConfigProperty {
            datatype: "string",
            title: "GA view profile id",
        },
    );
    properties.insert(
        "credentialsPath",
        ConfigProperty {
            datatype: "string",
            title: "Path to the json file with credentials",
        },
    );
    ConfigSchema::object(properties, vec!["profile", "credentialsPath"])
}

/// Register this runner so the host can instantiate it from stored
/// configuration.
pub fn register_runner(registry: &RunnerRegistry) {
    registry.register(
        RUNNER_NAME,
        config_schema(),
        Box::new(|config| {
            let config: GoogleAnalyticsConfig = serde_json::from_value(config)?;
            let runner = GoogleAnalyticsRunner::try_new(config)?;
            Ok(Arc::new(runner))
        }),
    );
}
