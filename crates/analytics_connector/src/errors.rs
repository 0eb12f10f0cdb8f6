#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),

    #[error("Failed to use provided service account key: {0}")]
    AuthKey(#[from] std::io::Error),

    #[error(transparent)]
    Auth(#[from] yup_oauth2::error::Error),

    #[error("Authenticator returned no access token")]
    MissingAccessToken,

    #[error("Invalid URL: {0}")]
    UrlParseError(String),

    #[error("Request errored with status code: {0}")]
    HttpError(reqwest::StatusCode),

    #[error("Analytics API error ({code}): {message}")]
    ApiError { code: i64, message: String },
}

pub type Result<T, E = ConnectorError> = std::result::Result<T, E>;
