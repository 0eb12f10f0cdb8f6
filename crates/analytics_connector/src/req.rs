use std::time::Duration;

use reqwest::{Client, IntoUrl, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::errors::{ConnectorError, Result};

const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Default)]
pub struct AnalyticsClientBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl AnalyticsClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = Some(connect_timeout);
        self
    }

    pub fn build<U: IntoUrl>(self, base_url: U) -> Result<AnalyticsClient> {
        let mut builder = Client::builder().user_agent(APP_USER_AGENT);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        let client = builder.build()?;
        Ok(AnalyticsClient {
            base_url: base_url.into_url()?,
            inner: client,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    base_url: Url,
    inner: Client,
}

impl AnalyticsClient {
    pub fn builder() -> AnalyticsClientBuilder {
        AnalyticsClientBuilder::default()
    }

    pub async fn get<P, R>(&self, path: &str, params: &P, token: &str) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ConnectorError::UrlParseError(format!("{e}")))?;

        let res = self
            .inner
            .get(url)
            .query(params)
            .bearer_auth(token)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(decode_error_response(status, &body));
        }

        let res = res.text().await?;
        trace!(%res, "response");

        let res: R = serde_json::from_str(&res)?;
        Ok(res)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: i64,
    message: String,
}

/// Decode an API error body, falling back to the bare status code when the
/// body isn't the documented error shape.
fn decode_error_response(status: reqwest::StatusCode, body: &str) -> ConnectorError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(res) => ConnectorError::ApiError {
            code: res.error.code,
            message: res.error.message,
        },
        Err(_) => ConnectorError::HttpError(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_documented_error_body() {
        let body = r#"{
            "error": {
                "errors": [{"domain": "global", "reason": "insufficientPermissions"}],
                "code": 403,
                "message": "User does not have sufficient permissions for this profile."
            }
        }"#;

        let err = decode_error_response(reqwest::StatusCode::FORBIDDEN, body);
        match err {
            ConnectorError::ApiError { code, message } => {
                assert_eq!(403, code);
                assert!(message.contains("sufficient permissions"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fall_back_to_status_code() {
        let err = decode_error_response(reqwest::StatusCode::BAD_GATEWAY, "<html>nope</html>");
        assert!(matches!(
            err,
            ConnectorError::HttpError(reqwest::StatusCode::BAD_GATEWAY)
        ));
    }
}
