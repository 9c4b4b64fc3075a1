//! Console adapters used by the demo binary: a stdout notifier and a form
//! processor driven by pasted SDK output.

use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::{FormProcessor, Notifier};
use crate::domain::result::{FormFailure, PaymentResult};

/// Prints notifications to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn publish(&self, message: &str) {
        println!("{message}");
    }
}

/// Form token format version produced by the current hosted-form platform.
const FORM_TOKEN_VERSION: u32 = 4;

/// Stands in for the hosted payment form when running headless.
///
/// Prints the form token, then reads one line of JSON from stdin: the payload
/// the real SDK would hand back once the customer completes the form. An
/// empty or unparseable line counts as the customer abandoning the form.
pub struct StdinFormProcessor {
    public_key: String,
}

impl StdinFormProcessor {
    /// `public_key` identifies the shop to the payment platform, as the real
    /// SDK would be initialized with.
    pub fn new(public_key: String) -> Self {
        Self { public_key }
    }
}

#[async_trait]
impl FormProcessor for StdinFormProcessor {
    fn token_version(&self) -> u32 {
        FORM_TOKEN_VERSION
    }

    async fn present(
        &self,
        form_token: &str,
    ) -> std::result::Result<PaymentResult, FormFailure> {
        tracing::debug!(public_key = %self.public_key, "presenting hosted form");
        println!("form token: {form_token}");
        print!("paste the form result payload (JSON), or press enter to cancel: ");
        io::stdout().flush().ok();

        let line = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line).map(|_| line)
        })
        .await
        .map_err(|e| FormFailure::new(format!("stdin reader failed: {e}")))?
        .map_err(|e| FormFailure::new(format!("could not read form result: {e}")))?;

        let line = line.trim();
        if line.is_empty() {
            return Err(FormFailure::new("form abandoned by customer"));
        }
        match serde_json::from_str::<Value>(line) {
            Ok(payload) => Ok(PaymentResult::success(payload)),
            Err(e) => Err(FormFailure::new(format!("unparseable form result: {e}"))),
        }
    }
}
