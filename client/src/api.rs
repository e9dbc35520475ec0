//! HTTP client for the five endpoints of spec.md §6. A bounded 10s
//! timeout on every call (§5 "Timeouts"); `--insecure` permits plain
//! HTTP to non-localhost hosts, matching `reqwest`'s builder-style
//! configuration as `itsharex-aeroftp` uses it for its own clients.

use std::time::Duration;

use unquote_api_types::{CheckRequest, CheckResponse, PuzzlePayload, RegisterResponse, StatsResponse};

const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {0} timed out or failed to connect: {1}")]
    Transport(String, reqwest::Error),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("malformed server response: {0}")]
    Decode(reqwest::Error),
    #[error("{0} is not a valid URL")]
    InvalidUrl(String),
    #[error("refusing plain HTTP to non-localhost host {0}; pass --insecure to allow it")]
    InsecureHttp(String),
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String, insecure: bool) -> Result<Self, ApiError> {
        if !insecure {
            Self::require_secure_scheme(&base_url)?;
        }
        let http = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .build()
            .expect("static reqwest client configuration is always valid");
        Ok(Self { http, base_url })
    }

    /// Rejects plain HTTP to anything but a loopback host, matching the
    /// server's own `--insecure` gate on the opposite side of the wire.
    fn require_secure_scheme(base_url: &str) -> Result<(), ApiError> {
        let url = reqwest::Url::parse(base_url).map_err(|_| ApiError::InvalidUrl(base_url.to_owned()))?;
        if url.scheme() != "http" {
            return Ok(());
        }
        let is_loopback = url
            .host_str()
            .map(|host| {
                host == "localhost"
                    || host
                        .parse::<std::net::IpAddr>()
                        .map(|ip| ip.is_loopback())
                        .unwrap_or(false)
            })
            .unwrap_or(false);
        if is_loopback {
            Ok(())
        } else {
            Err(ApiError::InsecureHttp(base_url.to_owned()))
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(url.clone(), e))?;
        Self::decode(response).await
    }

    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(url.clone(), e))?;
        Self::decode(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_owned());
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }
        response.json().await.map_err(ApiError::Decode)
    }

    pub async fn today(&self) -> Result<PuzzlePayload, ApiError> {
        self.get_json("/game/today").await
    }

    pub async fn by_date(&self, date: &str) -> Result<PuzzlePayload, ApiError> {
        self.get_json(&format!("/game/{date}")).await
    }

    pub async fn check(
        &self,
        game_id: &str,
        solution: String,
        claim_code: Option<String>,
        completion_time: Option<u64>,
    ) -> Result<CheckResponse, ApiError> {
        let request = CheckRequest {
            solution,
            claim_code,
            completion_time,
        };
        self.post_json(&format!("/game/{game_id}/check"), &request).await
    }

    pub async fn register(&self) -> Result<RegisterResponse, ApiError> {
        self.post_json("/players", &()).await
    }

    pub async fn stats(&self, claim_code: &str) -> Result<StatsResponse, ApiError> {
        self.get_json(&format!("/players/{claim_code}/stats")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_http_is_accepted_without_insecure() {
        assert!(ApiClient::require_secure_scheme("http://localhost:3000").is_ok());
        assert!(ApiClient::require_secure_scheme("http://127.0.0.1:3000").is_ok());
    }

    #[test]
    fn remote_http_is_rejected_without_insecure() {
        let err = ApiClient::require_secure_scheme("http://example.com").unwrap_err();
        assert!(matches!(err, ApiError::InsecureHttp(_)));
    }

    #[test]
    fn https_to_any_host_is_always_accepted() {
        assert!(ApiClient::require_secure_scheme("https://example.com").is_ok());
    }
}
