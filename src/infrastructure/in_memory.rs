use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::SessionStore;
use crate::domain::session::PaymentSession;
use crate::error::{PaymentError, Result};

/// A thread-safe store holding at most one in-flight payment session.
///
/// Uses `Arc<RwLock<Option<PaymentSession>>>` to allow shared concurrent
/// access. The single slot is what enforces one payment at a time: a second
/// `set` without an intervening `clear` is a conflict.
#[derive(Default, Clone)]
pub struct InMemorySessionStore {
    slot: Arc<RwLock<Option<PaymentSession>>>,
}

impl InMemorySessionStore {
    /// Creates a new, empty session store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn set(&self, session: PaymentSession) -> Result<()> {
        let mut slot = self.slot.write().await;
        if slot.is_some() {
            return Err(PaymentError::Conflict(
                "a payment session is already active".to_string(),
            ));
        }
        *slot = Some(session);
        Ok(())
    }

    async fn get(&self) -> Result<PaymentSession> {
        let slot = self.slot.read().await;
        slot.clone().ok_or(PaymentError::NoActiveSession)
    }

    async fn clear(&self) {
        *self.slot.write().await = None;
    }
}
