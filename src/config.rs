use std::env;

use crate::domain::request::{Amount, Customer, Mode, PaymentRequest};
use crate::error::{PaymentError, Result};

/// Runtime configuration for the payment flow.
///
/// Carries the merchant server endpoint and credentials plus the default
/// payment parameters used when the caller does not override them. Scoped to
/// an orchestrator instance, not process-wide.
#[derive(Debug, Clone)]
pub struct Config {
    /// Merchant server base URL, without a trailing slash.
    pub server_url: String,
    /// Public key identifying the shop to the payment platform SDK.
    pub public_key: String,
    pub mode: Mode,
    pub currency: String,
    /// Amount in minor currency units.
    pub amount: u64,
    pub order_id: String,
    pub customer_email: String,
    pub customer_reference: String,
    /// Whether the hosted form should offer to register the card.
    pub ask_register_pay: bool,
    /// Basic auth user for the merchant server.
    pub auth_user: String,
    /// Basic auth token for the merchant server.
    pub auth_token: String,
}

impl Config {
    /// Loads configuration from `PAYFLOW_*` environment variables.
    ///
    /// `PAYFLOW_SERVER_URL`, `PAYFLOW_PUBLIC_KEY`, `PAYFLOW_AUTH_USER` and
    /// `PAYFLOW_AUTH_TOKEN` are required; the payment parameters fall back to
    /// test defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mode = match env::var("PAYFLOW_MODE") {
            Ok(raw) => raw.parse()?,
            Err(_) => Mode::Test,
        };

        Ok(Self {
            server_url: require("PAYFLOW_SERVER_URL")?,
            public_key: require("PAYFLOW_PUBLIC_KEY")?,
            mode,
            currency: env::var("PAYFLOW_CURRENCY").unwrap_or_else(|_| "PEN".to_string()),
            amount: env::var("PAYFLOW_AMOUNT")
                .ok()
                .and_then(|a| a.parse().ok())
                .unwrap_or(5095),
            order_id: env::var("PAYFLOW_ORDER_ID").unwrap_or_else(|_| "123".to_string()),
            customer_email: env::var("PAYFLOW_CUSTOMER_EMAIL")
                .unwrap_or_else(|_| "customeremail@domain.com".to_string()),
            customer_reference: env::var("PAYFLOW_CUSTOMER_REFERENCE")
                .unwrap_or_else(|_| "customerReference".to_string()),
            ask_register_pay: env::var("PAYFLOW_ASK_REGISTER_PAY")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            auth_user: require("PAYFLOW_AUTH_USER")?,
            auth_token: require("PAYFLOW_AUTH_TOKEN")?,
        })
    }

    /// Builds the payment request described by this configuration.
    pub fn payment_request(&self) -> Result<PaymentRequest> {
        PaymentRequest::new(
            self.currency.clone(),
            Amount::new(self.amount)?,
            self.order_id.clone(),
            Customer {
                email: self.customer_email.clone(),
                reference: self.customer_reference.clone(),
            },
            self.mode,
            self.ask_register_pay,
        )
    }
}

fn require(key: &str) -> Result<String> {
    env::var(key)
        .map_err(|_| PaymentError::Validation(format!("missing environment variable {key}")))
}
