use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

/// Structured error fields returned by the payment platform inside the
/// `answer` object when it rejects a create-session request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorDetail {
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    pub detailed_error_code: Option<String>,
    pub detailed_error_message: Option<String>,
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("errorCode", &self.error_code),
            ("errorMessage", &self.error_message),
            ("detailedErrorCode", &self.detailed_error_code),
            ("detailedErrorMessage", &self.detailed_error_message),
        ];
        let mut wrote = false;
        for (name, value) in fields {
            if let Some(value) = value {
                if wrote {
                    write!(f, ", ")?;
                }
                write!(f, "{name}={value}")?;
                wrote = true;
            }
        }
        if !wrote {
            write!(f, "no error detail provided")?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaymentError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned HTTP {status}")]
    Http { status: u16 },
    #[error("malformed server response: {0}")]
    Parse(String),
    #[error("payment platform rejected the request: {0}")]
    Business(ErrorDetail),
    #[error("lifecycle conflict: {0}")]
    Conflict(String),
    #[error("no active payment session")]
    NoActiveSession,
    #[error("payment form failed: {0}")]
    FormProcessor(String),
    #[error("payment cancelled")]
    Cancelled,
    #[error("validation error: {0}")]
    Validation(String),
}
