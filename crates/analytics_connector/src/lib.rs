//! Thin client for the Google Analytics Core Reporting API (v3).
//!
//! Covers exactly what a query runner needs: service-account authentication
//! scoped to readonly report access, and a single report-data fetch. No
//! pagination, no retries; a hung request hangs the caller.
use std::path::Path;
use std::time::Duration;

use crate::errors::Result;
use crate::req::AnalyticsClient;

mod auth;
mod req;

pub mod errors;
pub mod query;

pub use auth::ANALYTICS_READONLY_SCOPE;
pub use query::{ColumnHeader, ReportData, ReportQuery};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

#[derive(Debug, Default)]
pub struct ConnectionBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ConnectionBuilder {
    /// Override the API host, mainly for pointing tests at a local server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = Some(connect_timeout);
        self
    }

    /// Authenticate and build a connection.
    ///
    /// Reads the service-account key file and performs the token exchange;
    /// both can fail before any report is requested.
    pub async fn connect(self, credentials_path: impl AsRef<Path>) -> Result<Connection> {
        let token = auth::access_token(credentials_path.as_ref()).await?;

        let mut builder = AnalyticsClient::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        let base_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let client = builder.build(base_url)?;

        Ok(Connection { client, token })
    }
}

/// An authenticated connection to the reporting API.
///
/// Holds one bearer token for its lifetime; callers wanting fresh credentials
/// build a new connection.
pub struct Connection {
    client: AnalyticsClient,
    token: String,
}

impl Connection {
    pub fn builder() -> ConnectionBuilder {
        ConnectionBuilder::default()
    }

    pub async fn connect(credentials_path: impl AsRef<Path>) -> Result<Connection> {
        Self::builder().connect(credentials_path).await
    }

    /// Issue a single synchronous report request.
    pub async fn fetch_report(&self, query: &ReportQuery) -> Result<ReportData> {
        query.fetch(&self.client, &self.token).await
    }
}
