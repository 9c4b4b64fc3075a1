use crate::application::orchestrator::{FailureReason, PaymentState};
use crate::domain::ports::NotifierBox;

/// Maps terminal payment states to user-visible notifications.
///
/// Intermediate states produce no output; the mapping below is the whole of
/// this component's logic.
pub struct ResultReporter {
    sink: NotifierBox,
}

impl ResultReporter {
    pub fn new(sink: NotifierBox) -> Self {
        Self { sink }
    }

    /// Publishes a notification for `state` if it is terminal.
    pub fn report(&self, state: &PaymentState) {
        if let Some(message) = message_for(state) {
            self.sink.publish(&message);
        }
    }
}

fn message_for(state: &PaymentState) -> Option<String> {
    match state {
        PaymentState::Completed(outcome) if outcome.verified => {
            Some("payment success".to_string())
        }
        PaymentState::Completed(_) => Some("payment could not be verified".to_string()),
        PaymentState::Failed { reason, error } => Some(match reason {
            FailureReason::Create => format!("error creating payment: {error}"),
            FailureReason::Form => format!("payment failed: {error}"),
            FailureReason::Verify => format!("payment verification failed: {error}"),
            FailureReason::Cancelled => "payment cancelled".to_string(),
        }),
        PaymentState::Idle
        | PaymentState::CreatingSession
        | PaymentState::AwaitingForm
        | PaymentState::Verifying => None,
    }
}
