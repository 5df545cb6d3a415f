use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::errors::{ApiError, StoreError};
use crate::domain::ports::{AuthGateway, ChatGateway, OtpVerdict, TokenStore};

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub set: bool,
    pub get: bool,
    pub clear: bool,
}

// Token slot with per-operation failure toggles.
#[derive(Clone, Default)]
pub(crate) struct RecordingStore {
    token: Arc<Mutex<Option<String>>>,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        *store.token.lock().expect("token mutex poisoned") = Some(token.into());
        store
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn current(&self) -> Option<String> {
        self.token.lock().expect("token mutex poisoned").clone()
    }
}

#[async_trait]
impl TokenStore for RecordingStore {
    async fn set(&self, token: String) -> Result<(), StoreError> {
        if self.failures.set {
            return Err(StoreError::Io("set failed".to_string()));
        }
        *self.token.lock().expect("token mutex poisoned") = Some(token);
        Ok(())
    }

    async fn get(&self) -> Result<Option<String>, StoreError> {
        if self.failures.get {
            return Err(StoreError::Io("get failed".to_string()));
        }
        Ok(self.current())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        if self.failures.clear {
            return Err(StoreError::Io("clear failed".to_string()));
        }
        *self.token.lock().expect("token mutex poisoned") = None;
        Ok(())
    }
}

// Auth backend that answers with fixed results and records every call.
#[derive(Clone)]
pub(crate) struct ScriptedAuth {
    send: Result<(), ApiError>,
    verify: Result<OtpVerdict, ApiError>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedAuth {
    pub(crate) fn accepting(token: &str) -> Self {
        Self {
            send: Ok(()),
            verify: Ok(OtpVerdict::Accepted {
                token: token.to_string(),
            }),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn with_send(mut self, result: Result<(), ApiError>) -> Self {
        self.send = result;
        self
    }

    pub(crate) fn with_verify(mut self, result: Result<OtpVerdict, ApiError>) -> Self {
        self.verify = result;
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

#[async_trait]
impl AuthGateway for ScriptedAuth {
    async fn send_otp(&self, identifier: &str) -> Result<(), ApiError> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(format!("send-otp {identifier}"));
        self.send.clone()
    }

    async fn verify_otp(&self, identifier: &str, otp: &str) -> Result<OtpVerdict, ApiError> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(format!("verify-otp {identifier} {otp}"));
        self.verify.clone()
    }
}

// Chat backend that pops queued replies; an empty queue echoes the message.
#[derive(Clone, Default)]
pub(crate) struct ScriptedChat {
    replies: Arc<Mutex<VecDeque<Result<String, ApiError>>>>,
    sent: Arc<Mutex<Vec<(String, Option<String>)>>>,
    hang: bool,
}

impl ScriptedChat {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // Every request stays pending until the caller gives up on it.
    pub(crate) fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::default()
        }
    }

    pub(crate) fn reply(self, result: Result<String, ApiError>) -> Self {
        self.replies
            .lock()
            .expect("replies mutex poisoned")
            .push_back(result);
        self
    }

    pub(crate) fn sent(&self) -> Vec<(String, Option<String>)> {
        self.sent.lock().expect("sent mutex poisoned").clone()
    }
}

#[async_trait]
impl ChatGateway for ScriptedChat {
    async fn send_message(&self, message: &str, token: Option<&str>) -> Result<String, ApiError> {
        self.sent
            .lock()
            .expect("sent mutex poisoned")
            .push((message.to_string(), token.map(str::to_string)));
        if self.hang {
            std::future::pending::<()>().await;
        }
        let next = self
            .replies
            .lock()
            .expect("replies mutex poisoned")
            .pop_front();
        next.unwrap_or_else(|| Ok(format!("echo: {message}")))
    }
}
