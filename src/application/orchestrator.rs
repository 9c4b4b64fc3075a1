use serde_json::{Value, json};
use tokio::sync::RwLock;

use crate::domain::ports::{FormProcessorBox, SessionStoreBox, TransportBox};
use crate::domain::request::PaymentRequest;
use crate::domain::result::{FormStatus, PaymentResult, VerificationOutcome};
use crate::domain::session::PaymentSession;
use crate::error::{ErrorDetail, PaymentError, Result};
use crate::interfaces::reporter::ResultReporter;

pub const CREATE_PATH: &str = "/createPayment";
pub const VERIFY_PATH: &str = "/verifyResult";

/// Why a payment attempt ended in [`PaymentState::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    Create,
    Form,
    Verify,
    Cancelled,
}

/// Lifecycle state of a payment attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentState {
    Idle,
    CreatingSession,
    AwaitingForm,
    Verifying,
    Completed(VerificationOutcome),
    Failed {
        reason: FailureReason,
        error: PaymentError,
    },
}

impl PaymentState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentState::Completed(_) | PaymentState::Failed { .. })
    }
}

/// Drives a payment attempt through its full lifecycle, from session creation
/// on the merchant server to verification of the hosted form's result.
///
/// One orchestrator runs one payment attempt at a time; starting a second
/// while one is in flight is a conflict. The session store is cleared on
/// entry to every terminal state, and the result reporter is notified.
pub struct PaymentOrchestrator {
    transport: TransportBox,
    sessions: SessionStoreBox,
    form: FormProcessorBox,
    reporter: ResultReporter,
    state: RwLock<PaymentState>,
}

impl PaymentOrchestrator {
    pub fn new(
        transport: TransportBox,
        sessions: SessionStoreBox,
        form: FormProcessorBox,
        reporter: ResultReporter,
    ) -> Self {
        Self {
            transport,
            sessions,
            form,
            reporter,
            state: RwLock::new(PaymentState::Idle),
        }
    }

    /// Snapshot of the current lifecycle state.
    pub async fn state(&self) -> PaymentState {
        self.state.read().await.clone()
    }

    /// Runs a full payment attempt.
    ///
    /// Fails with a conflict, before any I/O, when an attempt is already in
    /// flight. On success the hosted form's result has been verified with the
    /// merchant server and the attempt is `Completed`.
    pub async fn start_payment(&self, request: PaymentRequest) -> Result<VerificationOutcome> {
        {
            let mut state = self.state.write().await;
            if !matches!(*state, PaymentState::Idle) {
                return Err(PaymentError::Conflict(
                    "a payment attempt is already in progress".to_string(),
                ));
            }
            *state = PaymentState::CreatingSession;
        }

        tracing::info!(order_id = %request.order_id(), "creating payment session");
        let payload = build_create_payload(&request, self.form.token_version());
        let body = match self.transport.post(CREATE_PATH, &payload).await {
            Ok(body) => body,
            Err(e) => return Err(self.fail(FailureReason::Create, e).await),
        };

        let form_token = match extract_form_token(&body) {
            Ok(token) => token,
            Err(e) => return Err(self.fail(FailureReason::Create, e).await),
        };

        let session = PaymentSession::new(form_token.clone(), request);
        if let Err(e) = self.sessions.set(session).await {
            return Err(self.fail(FailureReason::Create, e).await);
        }
        *self.state.write().await = PaymentState::AwaitingForm;
        tracing::debug!("session created, presenting hosted form");

        match self.form.present(&form_token).await {
            Ok(result) => match self.on_form_result(result).await? {
                Some(outcome) => Ok(outcome),
                // The state moved on while the form was up: either the
                // attempt was aborted, or an externally wired callback
                // already delivered the result.
                None => match self.state().await {
                    PaymentState::Completed(outcome) => Ok(outcome),
                    _ => Err(PaymentError::Cancelled),
                },
            },
            Err(failure) => Err(self
                .fail(
                    FailureReason::Form,
                    PaymentError::FormProcessor(failure.message),
                )
                .await),
        }
    }

    /// Resumption point for the hosted form's asynchronous result.
    ///
    /// Called by [`start_payment`](Self::start_payment) once the form
    /// processor resolves; exposed so an embedding application can wire an
    /// SDK callback to it directly. In any state other than `AwaitingForm`
    /// this is a no-op returning `None`, which makes duplicate callbacks
    /// harmless.
    pub async fn on_form_result(
        &self,
        result: PaymentResult,
    ) -> Result<Option<VerificationOutcome>> {
        {
            let mut state = self.state.write().await;
            if !matches!(*state, PaymentState::AwaitingForm) {
                return Ok(None);
            }
            *state = PaymentState::Verifying;
        }

        if result.status() == FormStatus::Failure {
            let message = result
                .error_message()
                .unwrap_or("hosted form reported failure")
                .to_string();
            return Err(self
                .fail(FailureReason::Form, PaymentError::FormProcessor(message))
                .await);
        }

        // The active session is consumed here, verified or not.
        let session = match self.sessions.get().await {
            Ok(session) => session,
            Err(e) => return Err(self.fail(FailureReason::Verify, e).await),
        };
        tracing::debug!(form_token = %session.form_token(), "verifying form result");

        let outcome = match self.verify(&result).await {
            Ok(outcome) => outcome,
            Err(e) => return Err(self.fail(FailureReason::Verify, e).await),
        };

        let state = PaymentState::Completed(outcome.clone());
        *self.state.write().await = state.clone();
        self.sessions.clear().await;
        self.reporter.report(&state);
        Ok(Some(outcome))
    }

    /// Relays the form's result to the merchant server for verification.
    ///
    /// The integrity check (hash validation against the platform signature)
    /// is the server's job; this call only surfaces its verdict. The response
    /// body is server-defined and is relayed verbatim in the outcome message.
    pub async fn verify(&self, result: &PaymentResult) -> Result<VerificationOutcome> {
        let body = self.transport.post(VERIFY_PATH, result.payload()).await?;
        Ok(VerificationOutcome {
            verified: true,
            message: body.to_string(),
        })
    }

    /// Abandons the current attempt from any non-terminal state.
    ///
    /// The session slot is released and the attempt ends in
    /// `Failed(Cancelled)`. Aborting a finished attempt changes nothing.
    pub async fn abort(&self) {
        let state = PaymentState::Failed {
            reason: FailureReason::Cancelled,
            error: PaymentError::Cancelled,
        };
        {
            let mut current = self.state.write().await;
            if current.is_terminal() {
                return;
            }
            *current = state.clone();
        }
        self.sessions.clear().await;
        self.reporter.report(&state);
        tracing::info!("payment attempt aborted");
    }

    /// Enters a terminal failure state, releasing the session slot and
    /// notifying the reporter. Hands the error back for the caller to
    /// propagate.
    async fn fail(&self, reason: FailureReason, error: PaymentError) -> PaymentError {
        tracing::warn!(?reason, %error, "payment attempt failed");
        let state = PaymentState::Failed {
            reason,
            error: error.clone(),
        };
        *self.state.write().await = state.clone();
        self.sessions.clear().await;
        self.reporter.report(&state);
        error
    }
}

/// Builds the create-session payload for the merchant server.
///
/// `formAction` is attached only when the request asks the hosted form to
/// offer card registration.
pub fn build_create_payload(request: &PaymentRequest, token_version: u32) -> Value {
    let mut payload = json!({
        "currency": request.currency(),
        "amount": request.amount(),
        "orderId": request.order_id(),
        "customer": request.customer(),
        "formTokenVersion": token_version,
        "mode": request.mode(),
    });
    if request.ask_register_pay() {
        payload["formAction"] = Value::String("ASK_REGISTER_PAY".to_string());
    }
    payload
}

/// Pulls the form token out of a create-session response.
///
/// A body without a well-formed `answer` object is a malformed response. A
/// well-formed answer whose `formToken` is missing or blank is a rejection by
/// the platform, surfaced with the answer's error detail so the caller can
/// tell a broken backend from a legitimate refusal.
pub fn extract_form_token(body: &Value) -> Result<String> {
    let answer = body
        .get("answer")
        .and_then(Value::as_object)
        .ok_or_else(|| PaymentError::Parse("response has no answer object".to_string()))?;

    let form_token = answer
        .get("formToken")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if form_token.is_empty() {
        return Err(PaymentError::Business(ErrorDetail {
            error_code: string_field(answer, "errorCode"),
            error_message: string_field(answer, "errorMessage"),
            detailed_error_code: string_field(answer, "detailedErrorCode"),
            detailed_error_message: string_field(answer, "detailedErrorMessage"),
        }));
    }
    Ok(form_token.to_string())
}

fn string_field(answer: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    answer.get(key).and_then(Value::as_str).map(str::to_string)
}
