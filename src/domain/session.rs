use chrono::{DateTime, Utc};

use crate::domain::request::PaymentRequest;

/// An in-flight payment session issued by the payment platform.
///
/// Carries the opaque form token required to render the hosted payment form,
/// together with the request that produced it. Owned by the orchestrator
/// through the session store; dropped once the attempt reaches a terminal
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSession {
    form_token: String,
    created_at: DateTime<Utc>,
    request: PaymentRequest,
}

impl PaymentSession {
    pub fn new(form_token: String, request: PaymentRequest) -> Self {
        Self {
            form_token,
            created_at: Utc::now(),
            request,
        }
    }

    pub fn form_token(&self) -> &str {
        &self.form_token
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn request(&self) -> &PaymentRequest {
        &self.request
    }
}
