// Shared mock-backend helpers for the integration tests.
#![allow(dead_code)]

use genai_client::interface_adapters::clients::BackendClient;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Nothing listens on port 1, so connects fail fast.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

pub fn client_for(base_url: &str) -> BackendClient {
    BackendClient::new(base_url, Some(Duration::from_secs(5))).expect("client should build")
}

// Backend that accepts `identifier` with `otp` and answers chat with `reply`.
pub async fn happy_backend(identifier: &str, otp: &str, token: &str, reply: &str) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/send-otp"))
        .and(body_json(json!({ "identifier": identifier })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "OTP sent successfully"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/verify-otp"))
        .and(body_json(json!({ "identifier": identifier, "otp": otp })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": token
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string(reply))
        .mount(&server)
        .await;

    server
}
