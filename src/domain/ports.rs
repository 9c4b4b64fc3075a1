use async_trait::async_trait;
use serde_json::Value;

use crate::domain::result::{FormFailure, PaymentResult};
use crate::domain::session::PaymentSession;
use crate::error::Result;

/// Authenticated JSON exchange with the merchant server.
///
/// Implementations perform a single attempt per call and surface every
/// failure to the caller; retry policy lives above this port.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `body` as a POST to `path` on the merchant server and returns
    /// the parsed JSON response.
    async fn post(&self, path: &str, body: &Value) -> Result<Value>;
}

/// Holds zero-or-one in-flight payment session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores `session`. Fails with a conflict when a session is already
    /// active.
    async fn set(&self, session: PaymentSession) -> Result<()>;

    /// Returns the active session, or `NoActiveSession` when empty.
    async fn get(&self) -> Result<PaymentSession>;

    /// Drops the active session, if any. Idempotent.
    async fn clear(&self);
}

/// Boundary to the external hosted payment form.
///
/// Stands in for the payment platform SDK: it receives a form token and
/// resolves, asynchronously, with whatever the customer did in the form.
#[async_trait]
pub trait FormProcessor: Send + Sync {
    /// Form token format version understood by this processor, sent to the
    /// merchant server when creating a session.
    fn token_version(&self) -> u32;

    /// Presents the hosted form for `form_token` and resolves with its
    /// result.
    async fn present(
        &self,
        form_token: &str,
    ) -> std::result::Result<PaymentResult, FormFailure>;
}

/// Sink for user-visible payment notifications.
pub trait Notifier: Send + Sync {
    fn publish(&self, message: &str);
}

pub type TransportBox = Box<dyn Transport>;
pub type SessionStoreBox = Box<dyn SessionStore>;
pub type FormProcessorBox = Box<dyn FormProcessor>;
pub type NotifierBox = Box<dyn Notifier>;
