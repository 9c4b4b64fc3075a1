//! Application layer: the payment lifecycle orchestration.
//!
//! This module defines the `PaymentOrchestrator`, the one component with real
//! sequencing logic. It owns the transport, session store, and form processor
//! ports and drives a payment attempt through create → form → verify.

pub mod orchestrator;
