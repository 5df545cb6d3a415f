use crate::domain::entities::{AuthMethod, AuthMode, AuthStep};

// Input cap applied to the OTP field.
pub const OTP_MAX_LEN: usize = 6;

// Form state behind the login screen. Holds no I/O; the auth flow drives it.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    mode: AuthMode,
    method: AuthMethod,
    identifier: String,
    code: String,
    step: AuthStep,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn method(&self) -> AuthMethod {
        self.method
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn step(&self) -> AuthStep {
        self.step
    }

    pub fn set_identifier(&mut self, identifier: impl Into<String>) {
        self.identifier = identifier.into();
    }

    pub fn set_code(&mut self, code: &str) {
        self.code = code.chars().take(OTP_MAX_LEN).collect();
    }

    // The method switch is only offered while collecting the identifier.
    pub fn set_method(&mut self, method: AuthMethod) {
        if self.step != AuthStep::Input {
            return;
        }
        self.method = method;
        self.identifier.clear();
    }

    pub fn set_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.step = AuthStep::Input;
    }

    // Back from the code prompt, keeping the identifier for editing.
    pub fn change_details(&mut self) {
        if self.step == AuthStep::AwaitingOtp {
            self.step = AuthStep::Input;
        }
    }

    pub(crate) fn code_requested(&mut self) {
        self.step = AuthStep::AwaitingOtp;
        self.code.clear();
    }

    pub(crate) fn authenticated(&mut self) {
        self.step = AuthStep::Authenticated;
        self.identifier.clear();
        self.code.clear();
    }
}
