//! Seam between the runner and the reporting API.
use analytics_connector::{Connection, ReportData, ReportQuery};
use async_trait::async_trait;
use tracing::debug;

use crate::errors::Result;

/// The one reporting operation the runner needs. Mocked in tests.
#[async_trait]
pub trait ReportingApi: Send + Sync {
    async fn fetch_report(&self, credentials_path: &str, query: &ReportQuery)
        -> Result<ReportData>;
}

/// Live API access. Authenticates per invocation; the authenticated client is
/// intentionally not cached across queries.
#[derive(Debug, Default)]
pub struct HttpReportingApi;

#[async_trait]
impl ReportingApi for HttpReportingApi {
    async fn fetch_report(
        &self,
        credentials_path: &str,
        query: &ReportQuery,
    ) -> Result<ReportData> {
        debug!(ids = %query.ids, "fetching report");
        let conn = Connection::connect(credentials_path).await?;
        Ok(conn.fetch_report(query).await?)
    }
}
