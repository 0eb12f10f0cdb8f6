use runner_common::errors::RunnerCommonError;

#[derive(Debug, thiserror::Error)]
pub enum GoogleAnalyticsError {
    /// Missing or empty required configuration field, by its wire name.
    #[error("{0} must be set")]
    MissingConfig(&'static str),

    #[error("Query cancelled by user.")]
    Cancelled,

    #[error("Failed to decode json: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Report response contains no rows")]
    NoRows,

    #[error(transparent)]
    Connector(#[from] analytics_connector::errors::ConnectorError),

    #[error(transparent)]
    Common(#[from] RunnerCommonError),
}

pub type Result<T, E = GoogleAnalyticsError> = std::result::Result<T, E>;

impl From<GoogleAnalyticsError> for RunnerCommonError {
    fn from(e: GoogleAnalyticsError) -> Self {
        RunnerCommonError::External(Box::new(e))
    }
}
