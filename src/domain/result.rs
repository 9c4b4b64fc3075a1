use serde_json::Value;

/// Verdict reported by the hosted payment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Success,
    Failure,
}

/// The outcome handed back by the form processor once the customer is done
/// with the hosted form.
///
/// Consumed exactly once, for verification; never mutated afterward. The
/// payload is opaque to this core: the merchant server is the one that checks
/// its integrity.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentResult {
    status: FormStatus,
    payload: Value,
    error_code: Option<String>,
    error_message: Option<String>,
}

impl PaymentResult {
    pub fn success(payload: Value) -> Self {
        Self {
            status: FormStatus::Success,
            payload,
            error_code: None,
            error_message: None,
        }
    }

    pub fn failure(
        payload: Value,
        error_code: Option<String>,
        error_message: Option<String>,
    ) -> Self {
        Self {
            status: FormStatus::Failure,
            payload,
            error_code,
            error_message,
        }
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// Failure reported by the form processor, optionally carrying the partial
/// result it got as far as producing.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFailure {
    pub message: String,
    pub result: Option<PaymentResult>,
}

impl FormFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            result: None,
        }
    }
}

/// Terminal verdict of a completed payment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub verified: bool,
    pub message: String,
}
