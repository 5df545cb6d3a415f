use crate::domain::errors::ApiError;
use crate::domain::ports::{AuthGateway, ChatGateway, OtpVerdict};
use crate::interface_adapters::protocol::{
    ChatRequest, ErrorResponse, SendOtpRequest, VerifyOtpRequest, VerifyOtpResponse,
};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use std::time::Duration;

// Thin wrapper around reqwest for the backend's auth and chat endpoints.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    pub base_url: String,
}

impl BackendClient {
    // A `None` timeout leaves requests unbounded.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let base_url: String = base_url.into();
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

// Keep upstream status/message so callers can tell a 401 from a 500.
async fn ensure_success(res: Response) -> Result<Response, ApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let message = res
        .json::<ErrorResponse>()
        .await
        .ok()
        .map(|payload| payload.message);
    Err(ApiError::Upstream {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl AuthGateway for BackendClient {
    #[tracing::instrument(name = "send_otp", skip_all)]
    async fn send_otp(&self, identifier: &str) -> Result<(), ApiError> {
        let res = self
            .http
            .post(self.url("/api/auth/send-otp"))
            .json(&SendOtpRequest { identifier })
            .send()
            .await
            .map_err(transport)?;

        // The body is informational only.
        ensure_success(res).await?;
        Ok(())
    }

    #[tracing::instrument(name = "verify_otp", skip_all)]
    async fn verify_otp(&self, identifier: &str, otp: &str) -> Result<OtpVerdict, ApiError> {
        let res = self
            .http
            .post(self.url("/api/auth/verify-otp"))
            .json(&VerifyOtpRequest { identifier, otp })
            .send()
            .await
            .map_err(transport)?;
        let res = ensure_success(res).await?;

        res.json::<VerifyOtpResponse>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))?
            .into_verdict()
    }
}

#[async_trait]
impl ChatGateway for BackendClient {
    #[tracing::instrument(name = "send_chat", skip_all, fields(authenticated = token.is_some()))]
    async fn send_message(&self, message: &str, token: Option<&str>) -> Result<String, ApiError> {
        let mut req = self
            .http
            .post(self.url("/api/chat"))
            .json(&ChatRequest { message });
        if let Some(token) = token {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let res = req.send().await.map_err(transport)?;
        let res = ensure_success(res).await?;

        // The reply is the raw body, not JSON.
        res.text().await.map_err(transport)
    }
}
