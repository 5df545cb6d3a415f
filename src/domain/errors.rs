use std::fmt;

// User-visible notices for failed auth steps.
pub const SEND_FAILED_NOTICE: &str =
    "Failed to send OTP. Please check your connection or try again later.";
pub const INVALID_OTP_NOTICE: &str = "Invalid OTP";
pub const VERIFY_FAILED_NOTICE: &str = "Failed to verify OTP. Please try again.";

// Failure talking to the backend, split by where the exchange broke down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // No response: connection refused, DNS, timeout.
    Transport(String),
    // A response arrived with a non-2xx status.
    Upstream {
        status: u16,
        message: Option<String>,
    },
    // A 2xx response whose body did not match the contract.
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(err) => write!(f, "backend transport error: {err}"),
            ApiError::Upstream { status, message } => {
                if let Some(message) = message {
                    write!(f, "backend upstream error {status}: {message}")
                } else {
                    write!(f, "backend upstream error {status}")
                }
            }
            ApiError::Decode(err) => write!(f, "backend response decode error: {err}"),
        }
    }
}

impl std::error::Error for ApiError {}

// Failure reading or writing the persisted session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Io(String),
    Corrupt(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "session store io error: {err}"),
            StoreError::Corrupt(err) => write!(f, "session store is corrupt: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

// Domain-level errors for the two-step login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    EmptyIdentifier,
    EmptyCode,
    // Submission does not match the current step.
    WrongStep,
    SendFailed(ApiError),
    // Backend answered success=false.
    Rejected { message: Option<String> },
    VerifyFailed(ApiError),
    StorageFailure(StoreError),
}

impl AuthError {
    // Notice shown to the user, if any. Empty inputs are ignored silently.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            AuthError::EmptyIdentifier | AuthError::EmptyCode | AuthError::WrongStep => None,
            AuthError::SendFailed(_) => Some(SEND_FAILED_NOTICE),
            AuthError::Rejected { .. } => Some(INVALID_OTP_NOTICE),
            AuthError::VerifyFailed(_) | AuthError::StorageFailure(_) => {
                Some(VERIFY_FAILED_NOTICE)
            }
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::EmptyIdentifier => write!(f, "identifier is required"),
            AuthError::EmptyCode => write!(f, "code is required"),
            AuthError::WrongStep => write!(f, "submission does not match the current step"),
            AuthError::SendFailed(err) => write!(f, "failed to send otp: {err}"),
            AuthError::Rejected { message } => match message {
                Some(message) => write!(f, "otp rejected: {message}"),
                None => write!(f, "otp rejected"),
            },
            AuthError::VerifyFailed(err) => write!(f, "failed to verify otp: {err}"),
            AuthError::StorageFailure(err) => write!(f, "failed to store session: {err}"),
        }
    }
}

impl std::error::Error for AuthError {}
