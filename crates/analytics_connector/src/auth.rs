use std::path::Path;

use tracing::debug;
use yup_oauth2::ServiceAccountAuthenticator;

use crate::errors::{ConnectorError, Result};

/// Only report reads are ever issued; don't ask for more.
pub const ANALYTICS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";

/// Exchange a service account key file for a bearer token scoped to readonly
/// report access.
///
/// The key is read from disk on every call; tokens are not cached across
/// connections.
pub(crate) async fn access_token(credentials_path: &Path) -> Result<String> {
    let key = yup_oauth2::read_service_account_key(credentials_path).await?;
    debug!(client_email = %key.client_email, "authenticating service account");

    let auth = ServiceAccountAuthenticator::builder(key).build().await?;
    let token = auth.token(&[ANALYTICS_READONLY_SCOPE]).await?;
    token
        .token()
        .map(|t| t.to_string())
        .ok_or(ConnectorError::MissingAccessToken)
}
