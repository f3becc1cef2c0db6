//! Submission phases, failure taxonomy, and the HTTP transport for `/submit`.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::{
    error::{MSG_CONNECTION_ERROR, MSG_SUBMIT_FAILED},
    protocol::{SubmitRequest, SubmitResponse},
};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::{ClientSettings, ConfigError};

pub const SUBMITTING_LABEL: &str = "Sending...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Redirecting {
        target: String,
    },
}

impl SubmitPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The request never completed, or the body was not a decodable payload.
    #[error("submission transport failure: {detail}")]
    Transport { detail: String },
    #[error("server rejected submission: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },
}

impl SubmitError {
    pub fn transport(detail: impl ToString) -> Self {
        Self::Transport {
            detail: detail.to_string(),
        }
    }

    pub fn user_message(&self) -> &str {
        match self {
            Self::Transport { .. } => MSG_CONNECTION_ERROR,
            Self::Rejected {
                message: Some(message),
            } => message,
            Self::Rejected { message: None } => MSG_SUBMIT_FAILED,
        }
    }
}

#[async_trait]
pub trait SubmitTransport: Send + Sync {
    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse, SubmitError>;
}

pub struct HttpSubmitClient {
    http: Client,
    base_url: Url,
    endpoint: Url,
}

impl HttpSubmitClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ConfigError> {
        let base_url = settings.base_url()?;
        let endpoint = settings.submit_endpoint()?;

        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ConfigError::HttpClient)?;

        Ok(Self {
            http,
            base_url,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Resolves a possibly relative redirect target against the server url.
    pub fn resolve_redirect(&self, target: &str) -> Result<Url, url::ParseError> {
        resolve_redirect(&self.base_url, target)
    }
}

/// Only a body that is not JSON at all is a transport failure. Inside valid
/// JSON, `success` counts only when it is literally `true`, and non-string
/// `message`/`redirect` values are treated as absent.
pub fn decode_submit_response(body: &[u8]) -> Result<SubmitResponse, SubmitError> {
    let value: Value = serde_json::from_slice(body).map_err(SubmitError::transport)?;
    let text_field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);

    Ok(SubmitResponse {
        success: value.get("success").and_then(Value::as_bool).unwrap_or(false),
        message: text_field("message"),
        redirect: text_field("redirect"),
    })
}

pub fn resolve_redirect(base_url: &Url, target: &str) -> Result<Url, url::ParseError> {
    base_url.join(target.trim())
}

#[async_trait]
impl SubmitTransport for HttpSubmitClient {
    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse, SubmitError> {
        debug!(endpoint = %self.endpoint, games = request.games.len(), "posting games");
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(SubmitError::transport)?;

        // Status is not consulted: failure responses carry the same JSON shape.
        let status = res.status();
        let bytes = res.bytes().await.map_err(SubmitError::transport)?;
        let body = decode_submit_response(&bytes).map_err(|err| {
            warn!(%status, "submit response was not json: {err}");
            err
        })?;
        debug!(%status, success = body.success, "submit response received");
        Ok(body)
    }
}
