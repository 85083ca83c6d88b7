use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Connection settings for the external backend.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("http status {0}")]
    HttpStatus(u16),
    /// The backend rejected the request and said why.
    #[error("{0}")]
    Api(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Row fields posted to the append endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendRequest {
    pub spreadsheet_id: String,
    pub company: String,
    pub role: String,
    pub application_link: String,
    pub stage: String,
    pub priority: String,
    pub notes: String,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
struct AuthStatusBody {
    authenticated: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MetadataRequest<'a> {
    spreadsheet_id: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetadataBody {
    sheet_name: String,
}

#[derive(Debug, Deserialize)]
struct AppendBody {
    sno: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the auth and sheets endpoints. Credentials ride on a cookie
/// store, matching the session-cookie contract of the backend.
pub struct BackendClient {
    client: reqwest::Client,
    settings: BackendSettings,
}

impl BackendClient {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .cookie_store(true)
            .build()
            .map_err(|err| BackendError::Network(err.to_string()))?;
        Ok(Self { client, settings })
    }

    /// The interactive OAuth page, opened in a separate window.
    pub fn login_url(&self) -> String {
        format!("{}/api/auth/login", self.settings.base_url)
    }

    pub async fn auth_status(&self) -> Result<bool, BackendError> {
        let response = self
            .client
            .get(format!("{}/api/auth/status", self.settings.base_url))
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::HttpStatus(status.as_u16()));
        }
        let body: AuthStatusBody = response
            .json()
            .await
            .map_err(|err| BackendError::Decode(err.to_string()))?;
        Ok(body.authenticated)
    }

    pub async fn logout(&self) -> Result<(), BackendError> {
        let response = self
            .client
            .post(format!("{}/api/auth/logout", self.settings.base_url))
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::HttpStatus(status.as_u16()));
        }
        Ok(())
    }

    /// Verifies sheet access and returns its display name.
    pub async fn sheet_metadata(&self, spreadsheet_id: &str) -> Result<String, BackendError> {
        let response = self
            .client
            .post(format!("{}/api/sheets/metadata", self.settings.base_url))
            .json(&MetadataRequest { spreadsheet_id })
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = into_api_result(response).await?;
        let body: MetadataBody = response
            .json()
            .await
            .map_err(|err| BackendError::Decode(err.to_string()))?;
        Ok(body.sheet_name)
    }

    /// Appends one row and returns its serial number.
    pub async fn append_job(&self, request: &AppendRequest) -> Result<u64, BackendError> {
        let response = self
            .client
            .post(format!("{}/api/sheets/append", self.settings.base_url))
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = into_api_result(response).await?;
        let body: AppendBody = response
            .json()
            .await
            .map_err(|err| BackendError::Decode(err.to_string()))?;
        Ok(body.sno)
    }
}

/// Non-2xx responses may carry an `{error}` body with a user-facing message;
/// surface it when present.
async fn into_api_result(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if let Ok(body) = response.json::<ErrorBody>().await {
        if let Some(message) = body.error {
            return Err(BackendError::Api(message));
        }
    }
    Err(BackendError::HttpStatus(status.as_u16()))
}

fn map_transport_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::Timeout;
    }
    BackendError::Network(err.to_string())
}
