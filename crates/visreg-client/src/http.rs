//! HTTP binding for the remote comparison service
//!
//! One request per operation, no retries. The request timeout is the only
//! bounded-wait mechanism; callers that need different behavior configure
//! it through [`ClientConfig`].

use crate::client::SessionClient;
use crate::types::{BaselineQuery, CheckResult, Session, SnapshotQuery};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::StatusCode;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use visreg_core::{Result, SessionParams, VisregError};

const APIKEY_HEADER: &str = "apikey";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Remote service base address
    pub endpoint: String,
    /// Overall per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_seconds: 30,
        }
    }
}

/// Session-scoped credentials held between open and close
struct ActiveSession {
    id: String,
    apikey: String,
}

/// Concrete [`SessionClient`] talking JSON over HTTP.
///
/// Holds the current session id internally: `open_session` stores it,
/// `close_session` consumes it, checks and queries require it.
pub struct HttpSessionClient {
    http: reqwest::Client,
    endpoint: String,
    active: Mutex<Option<ActiveSession>>,
}

impl HttpSessionClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                VisregError::Configuration(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            active: Mutex::new(None),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/v1/client/{}", self.endpoint, path)
    }

    async fn active_apikey(&self) -> Result<String> {
        let active = self.active.lock().await;
        active
            .as_ref()
            .map(|session| session.apikey.clone())
            .ok_or_else(|| VisregError::Other("no open test session".to_string()))
    }
}

#[async_trait]
impl SessionClient for HttpSessionClient {
    async fn open_session(&self, params: &SessionParams, apikey: &str) -> Result<Session> {
        debug!("opening test session for '{}'", params.test);

        let response = self
            .http
            .post(self.api_url("startSession"))
            .header(APIKEY_HEADER, apikey)
            .json(params)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, read_body(response).await));
        }

        let session: Session = response
            .json()
            .await
            .map_err(|e| VisregError::Unreachable(format!("malformed session response: {}", e)))?;

        let mut active = self.active.lock().await;
        if let Some(previous) = active.replace(ActiveSession {
            id: session.id.clone(),
            apikey: apikey.to_string(),
        }) {
            warn!("replacing session '{}' that was never closed", previous.id);
        }

        debug!("test session '{}' opened", session.id);
        Ok(session)
    }

    async fn submit_check(
        &self,
        check_name: &str,
        image: &[u8],
        options: &Map<String, Value>,
        dom_dump: Option<Value>,
    ) -> Result<CheckResult> {
        let apikey = self.active_apikey().await?;
        debug!("submitting check '{}' ({} bytes)", check_name, image.len());

        let mut body = json!({
            "name": check_name,
            "image": BASE64.encode(image),
        });
        if let Some(dump) = dom_dump {
            body["domdump"] = dump;
        }
        if let Some(object) = body.as_object_mut() {
            for (key, value) in options {
                object.insert(key.clone(), value.clone());
            }
        }

        let response = self
            .http
            .post(self.api_url("createCheck"))
            .header(APIKEY_HEADER, &apikey)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, read_body(response).await));
        }

        response
            .json()
            .await
            .map_err(|e| VisregError::Unreachable(format!("malformed check response: {}", e)))
    }

    async fn query_baselines(&self, params: &Map<String, Value>) -> Result<BaselineQuery> {
        let apikey = self.active_apikey().await?;

        let response = self
            .http
            .get(self.api_url("baselines"))
            .header(APIKEY_HEADER, &apikey)
            .query(&to_query_pairs(params))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, read_body(response).await));
        }

        response
            .json()
            .await
            .map_err(|e| VisregError::Unreachable(format!("malformed baselines response: {}", e)))
    }

    async fn query_snapshots(&self, params: &Map<String, Value>) -> Result<SnapshotQuery> {
        let apikey = self.active_apikey().await?;

        let response = self
            .http
            .get(self.api_url("snapshots"))
            .header(APIKEY_HEADER, &apikey)
            .query(&to_query_pairs(params))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, read_body(response).await));
        }

        response
            .json()
            .await
            .map_err(|e| VisregError::Unreachable(format!("malformed snapshots response: {}", e)))
    }

    async fn close_session(&self, apikey: &str) -> Result<()> {
        let session = {
            let mut active = self.active.lock().await;
            active.take()
        };
        let session = session
            .ok_or_else(|| VisregError::Other("no open test session to close".to_string()))?;

        debug!("closing test session '{}'", session.id);

        let response = self
            .http
            .post(self.api_url(&format!("stopSession/{}", session.id)))
            .header(APIKEY_HEADER, apikey)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, read_body(response).await));
        }

        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> VisregError {
    VisregError::Unreachable(err.to_string())
}

fn status_error(status: StatusCode, message: String) -> VisregError {
    match status.as_u16() {
        401 | 403 => VisregError::Authentication(message),
        400 | 422 => VisregError::Validation(message),
        code => VisregError::Remote {
            status: code,
            message,
        },
    }
}

async fn read_body(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable response body>".to_string())
}

/// Flatten a JSON params map into string query pairs.
fn to_query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_trailing_slash_is_trimmed() {
        let client =
            HttpSessionClient::new(ClientConfig::new("https://visreg.example/")).unwrap();
        assert_eq!(
            client.api_url("startSession"),
            "https://visreg.example/v1/client/startSession"
        );
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "bad key".to_string()),
            VisregError::Authentication(_)
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, "bad key".to_string()),
            VisregError::Authentication(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_REQUEST, "bad params".to_string()),
            VisregError::Validation(_)
        ));
        assert!(matches!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()),
            VisregError::Remote { status: 500, .. }
        ));
    }

    #[test]
    fn test_query_pairs_render_plain_strings() {
        let mut params = Map::new();
        params.insert("name".to_string(), json!("Scenario 1"));
        params.insert("limit".to_string(), json!(10));

        let pairs = to_query_pairs(&params);
        assert!(pairs.contains(&("name".to_string(), "Scenario 1".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "10".to_string())));
    }

    #[tokio::test]
    async fn test_check_without_open_session_is_rejected() {
        let client =
            HttpSessionClient::new(ClientConfig::new("https://visreg.example")).unwrap();
        let result = client
            .submit_check("name", b"img", &Map::new(), None)
            .await;
        assert!(matches!(result, Err(VisregError::Other(_))));
    }

    #[tokio::test]
    async fn test_close_without_open_session_is_rejected() {
        let client =
            HttpSessionClient::new(ClientConfig::new("https://visreg.example")).unwrap();
        let result = client.close_session("sekret").await;
        assert!(matches!(result, Err(VisregError::Other(_))));
    }
}
