use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use payflow::application::orchestrator::PaymentOrchestrator;
use payflow::domain::ports::{FormProcessor, Notifier};
use payflow::domain::request::{Amount, Customer, Mode, PaymentRequest};
use payflow::domain::result::{FormFailure, PaymentResult};
use payflow::infrastructure::http::HttpTransport;
use payflow::infrastructure::in_memory::InMemorySessionStore;
use payflow::interfaces::reporter::ResultReporter;
use serde_json::Value;

pub const AUTH_USER: &str = "user";
pub const AUTH_TOKEN: &str = "token";
/// base64("user:token"), as the merchant server expects it.
pub const BASIC_AUTH: &str = "Basic dXNlcjp0b2tlbg==";

pub fn sample_request() -> PaymentRequest {
    PaymentRequest::new(
        "PEN".to_string(),
        Amount::new(5095).unwrap(),
        "123".to_string(),
        Customer {
            email: "customeremail@domain.com".to_string(),
            reference: "customerReference".to_string(),
        },
        Mode::Test,
        false,
    )
    .unwrap()
}

enum Script {
    Success(Value),
    Failure(String),
    Hang,
}

/// Form processor scripted with a fixed resolution, standing in for the
/// hosted payment form.
pub struct ScriptedForm {
    script: Script,
}

impl ScriptedForm {
    pub fn success(payload: Value) -> Self {
        Self {
            script: Script::Success(payload),
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            script: Script::Failure(message.to_string()),
        }
    }

    /// Never resolves, holding the attempt in the awaiting-form state.
    pub fn hanging() -> Self {
        Self {
            script: Script::Hang,
        }
    }
}

#[async_trait]
impl FormProcessor for ScriptedForm {
    fn token_version(&self) -> u32 {
        4
    }

    async fn present(
        &self,
        _form_token: &str,
    ) -> std::result::Result<PaymentResult, FormFailure> {
        match &self.script {
            Script::Success(payload) => Ok(PaymentResult::success(payload.clone())),
            Script::Failure(message) => Err(FormFailure::new(message.clone())),
            Script::Hang => std::future::pending().await,
        }
    }
}

/// Notifier that records everything it publishes.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn publish(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Wires an orchestrator against `server_url`, handing back the store and
/// notifier so tests can observe both sides.
pub fn orchestrator_against(
    server_url: &str,
    form: ScriptedForm,
) -> (
    Arc<PaymentOrchestrator>,
    InMemorySessionStore,
    RecordingNotifier,
) {
    let store = InMemorySessionStore::new();
    let notifier = RecordingNotifier::default();
    let orchestrator = PaymentOrchestrator::new(
        Box::new(HttpTransport::with_credentials(
            server_url, AUTH_USER, AUTH_TOKEN,
        )),
        Box::new(store.clone()),
        Box::new(form),
        ResultReporter::new(Box::new(notifier.clone())),
    );
    (Arc::new(orchestrator), store, notifier)
}
