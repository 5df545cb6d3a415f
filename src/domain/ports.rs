use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::errors::{ApiError, StoreError};

// Port for the single-slot session token store.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn set(&self, token: String) -> Result<(), StoreError>;
    async fn get(&self) -> Result<Option<String>, StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

// Backend answer to an OTP verification that parsed cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpVerdict {
    Accepted { token: String },
    Rejected { message: Option<String> },
}

// Port for the backend auth endpoints.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn send_otp(&self, identifier: &str) -> Result<(), ApiError>;
    async fn verify_otp(&self, identifier: &str, otp: &str) -> Result<OtpVerdict, ApiError>;
}

// Port for the backend chat endpoint. The reply is the raw response body.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn send_message(&self, message: &str, token: Option<&str>) -> Result<String, ApiError>;
}

// Shared handles are passed around as Arc<dyn Port>; forward through them.
#[async_trait]
impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    async fn set(&self, token: String) -> Result<(), StoreError> {
        (**self).set(token).await
    }

    async fn get(&self) -> Result<Option<String>, StoreError> {
        (**self).get().await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        (**self).clear().await
    }
}

#[async_trait]
impl<T: AuthGateway + ?Sized> AuthGateway for Arc<T> {
    async fn send_otp(&self, identifier: &str) -> Result<(), ApiError> {
        (**self).send_otp(identifier).await
    }

    async fn verify_otp(&self, identifier: &str, otp: &str) -> Result<OtpVerdict, ApiError> {
        (**self).verify_otp(identifier, otp).await
    }
}

#[async_trait]
impl<T: ChatGateway + ?Sized> ChatGateway for Arc<T> {
    async fn send_message(&self, message: &str, token: Option<&str>) -> Result<String, ApiError> {
        (**self).send_message(message, token).await
    }
}
