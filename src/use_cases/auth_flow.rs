use tracing::{info, warn};

use crate::domain::entities::{AuthMethod, AuthMode, AuthStep};
use crate::domain::errors::AuthError;
use crate::domain::login::LoginForm;
use crate::domain::ports::{AuthGateway, OtpVerdict, TokenStore};

// Two-step login: request a code for an identifier, then trade the code for a token.
//
// Submissions borrow the flow mutably for the whole round trip, so a second
// submission cannot start while one is outstanding.
pub struct AuthFlow<A, S> {
    pub auth: A,
    pub store: S,
    form: LoginForm,
}

impl<A, S> AuthFlow<A, S>
where
    A: AuthGateway,
    S: TokenStore,
{
    pub fn new(auth: A, store: S) -> Self {
        Self {
            auth,
            store,
            form: LoginForm::new(),
        }
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn step(&self) -> AuthStep {
        self.form.step()
    }

    pub fn set_identifier(&mut self, identifier: impl Into<String>) {
        self.form.set_identifier(identifier);
    }

    pub fn set_code(&mut self, code: &str) {
        self.form.set_code(code);
    }

    pub fn set_method(&mut self, method: AuthMethod) {
        self.form.set_method(method);
    }

    pub fn set_mode(&mut self, mode: AuthMode) {
        self.form.set_mode(mode);
    }

    pub fn change_details(&mut self) {
        self.form.change_details();
    }

    #[tracing::instrument(name = "submit_identifier", skip_all, fields(method = ?self.form.method()))]
    pub async fn submit_identifier(&mut self) -> Result<(), AuthError> {
        if self.form.step() != AuthStep::Input {
            return Err(AuthError::WrongStep);
        }
        if self.form.identifier().is_empty() {
            return Err(AuthError::EmptyIdentifier);
        }

        self.auth
            .send_otp(self.form.identifier())
            .await
            .map_err(|err| {
                warn!(error = %err, "failed to send otp.");
                AuthError::SendFailed(err)
            })?;

        info!("otp requested.");
        self.form.code_requested();
        Ok(())
    }

    #[tracing::instrument(name = "submit_code", skip_all)]
    pub async fn submit_code(&mut self) -> Result<(), AuthError> {
        if self.form.step() != AuthStep::AwaitingOtp {
            return Err(AuthError::WrongStep);
        }
        if self.form.code().is_empty() {
            return Err(AuthError::EmptyCode);
        }

        let verdict = self
            .auth
            .verify_otp(self.form.identifier(), self.form.code())
            .await
            .map_err(|err| {
                warn!(error = %err, "failed to verify otp.");
                AuthError::VerifyFailed(err)
            })?;

        let token = match verdict {
            OtpVerdict::Accepted { token } => token,
            OtpVerdict::Rejected { message } => {
                info!(reason = ?message, "otp rejected.");
                return Err(AuthError::Rejected { message });
            }
        };

        self.store.set(token).await.map_err(|err| {
            warn!(error = %err, "failed to persist session token.");
            AuthError::StorageFailure(err)
        })?;

        info!("authenticated.");
        self.form.authenticated();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ApiError;
    use crate::use_cases::test_support::{FailureFlags, RecordingStore, ScriptedAuth};

    fn flow(auth: ScriptedAuth, store: RecordingStore) -> AuthFlow<ScriptedAuth, RecordingStore> {
        AuthFlow::new(auth, store)
    }

    async fn awaiting_otp(
        auth: ScriptedAuth,
        store: RecordingStore,
    ) -> AuthFlow<ScriptedAuth, RecordingStore> {
        let mut flow = flow(auth, store);
        flow.set_identifier("a@b.com");
        flow.submit_identifier()
            .await
            .expect("expected otp request to succeed");
        flow
    }

    #[tokio::test]
    async fn when_identifier_is_accepted_then_flow_awaits_otp() {
        let auth = ScriptedAuth::accepting("abc");
        let flow = awaiting_otp(auth.clone(), RecordingStore::new()).await;

        assert_eq!(flow.step(), AuthStep::AwaitingOtp);
        assert_eq!(auth.calls(), vec!["send-otp a@b.com".to_string()]);
    }

    #[tokio::test]
    async fn when_identifier_is_empty_then_no_request_is_sent() {
        let auth = ScriptedAuth::accepting("abc");
        let mut flow = flow(auth.clone(), RecordingStore::new());

        let result = flow.submit_identifier().await;

        assert!(matches!(result, Err(AuthError::EmptyIdentifier)));
        assert!(auth.calls().is_empty());
        assert_eq!(flow.step(), AuthStep::Input);
    }

    #[tokio::test]
    async fn when_send_otp_fails_then_flow_stays_in_input() {
        let auth = ScriptedAuth::accepting("abc").with_send(Err(ApiError::Upstream {
            status: 503,
            message: None,
        }));
        let mut flow = flow(auth, RecordingStore::new());
        flow.set_identifier("a@b.com");

        let result = flow.submit_identifier().await;

        assert!(matches!(result, Err(AuthError::SendFailed(_))));
        assert_eq!(flow.step(), AuthStep::Input);
        assert_eq!(flow.form().identifier(), "a@b.com");
    }

    #[tokio::test]
    async fn when_code_is_accepted_then_token_is_stored() {
        let store = RecordingStore::new();
        let mut flow = awaiting_otp(ScriptedAuth::accepting("abc"), store.clone()).await;
        flow.set_code("123456");

        flow.submit_code()
            .await
            .expect("expected verification to succeed");

        assert_eq!(store.current(), Some("abc".to_string()));
        assert_eq!(flow.step(), AuthStep::Authenticated);
        assert_eq!(flow.form().identifier(), "");
    }

    #[tokio::test]
    async fn when_code_is_rejected_then_store_is_unchanged() {
        let store = RecordingStore::with_token("old");
        let auth = ScriptedAuth::accepting("abc").with_verify(Ok(OtpVerdict::Rejected {
            message: Some("Invalid OTP".to_string()),
        }));
        let mut flow = awaiting_otp(auth, store.clone()).await;
        flow.set_code("000000");

        let result = flow.submit_code().await;

        assert!(matches!(result, Err(AuthError::Rejected { .. })));
        assert_eq!(store.current(), Some("old".to_string()));
        assert_eq!(flow.step(), AuthStep::AwaitingOtp);
    }

    #[tokio::test]
    async fn when_verify_response_is_malformed_then_flow_stays_awaiting_otp() {
        let store = RecordingStore::new();
        let auth = ScriptedAuth::accepting("abc")
            .with_verify(Err(ApiError::Decode("missing field `success`".to_string())));
        let mut flow = awaiting_otp(auth, store.clone()).await;
        flow.set_code("123456");

        let result = flow.submit_code().await;

        assert!(matches!(
            result,
            Err(AuthError::VerifyFailed(ApiError::Decode(_)))
        ));
        assert_eq!(store.current(), None);
        assert_eq!(flow.step(), AuthStep::AwaitingOtp);
    }

    #[tokio::test]
    async fn when_code_is_empty_then_no_request_is_sent() {
        let auth = ScriptedAuth::accepting("abc");
        let mut flow = awaiting_otp(auth.clone(), RecordingStore::new()).await;

        let result = flow.submit_code().await;

        assert!(matches!(result, Err(AuthError::EmptyCode)));
        assert_eq!(auth.calls().len(), 1);
    }

    #[tokio::test]
    async fn when_code_submitted_before_identifier_then_wrong_step() {
        let auth = ScriptedAuth::accepting("abc");
        let mut flow = flow(auth.clone(), RecordingStore::new());
        flow.set_code("123456");

        let result = flow.submit_code().await;

        assert!(matches!(result, Err(AuthError::WrongStep)));
        assert!(auth.calls().is_empty());
    }

    #[tokio::test]
    async fn when_token_cannot_be_stored_then_storage_failure_is_returned() {
        let store = RecordingStore::new().with_failures(FailureFlags {
            set: true,
            ..FailureFlags::default()
        });
        let mut flow = awaiting_otp(ScriptedAuth::accepting("abc"), store).await;
        flow.set_code("123456");

        let result = flow.submit_code().await;

        assert!(matches!(result, Err(AuthError::StorageFailure(_))));
        assert_eq!(flow.step(), AuthStep::AwaitingOtp);
    }

    #[tokio::test]
    async fn when_mode_toggles_then_flow_returns_to_input_without_requests() {
        let auth = ScriptedAuth::accepting("abc");
        let mut flow = awaiting_otp(auth.clone(), RecordingStore::new()).await;

        flow.set_mode(AuthMode::Signup);

        assert_eq!(flow.step(), AuthStep::Input);
        assert_eq!(auth.calls().len(), 1);
    }

    #[tokio::test]
    async fn when_code_is_submitted_then_identifier_and_code_are_sent_together() {
        let auth = ScriptedAuth::accepting("abc");
        let mut flow = awaiting_otp(auth.clone(), RecordingStore::new()).await;
        flow.set_code("1234567");

        flow.submit_code()
            .await
            .expect("expected verification to succeed");

        assert_eq!(
            auth.calls(),
            vec![
                "send-otp a@b.com".to_string(),
                "verify-otp a@b.com 123456".to_string(),
            ]
        );
    }
}
