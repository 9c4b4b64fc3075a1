use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PaymentError, Result};

/// Target environment of the payment platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Test,
    Production,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Test => write!(f, "TEST"),
            Mode::Production => write!(f, "PRODUCTION"),
        }
    }
}

impl FromStr for Mode {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "TEST" => Ok(Mode::Test),
            "PRODUCTION" => Ok(Mode::Production),
            other => Err(PaymentError::Validation(format!(
                "unknown payment mode: {other}"
            ))),
        }
    }
}

/// A payment amount in minor currency units.
///
/// Always positive; a zero amount cannot be charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(u64);

impl Amount {
    pub fn new(value: u64) -> Result<Self> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(PaymentError::Validation(
                "amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for Amount {
    type Error = PaymentError;

    fn try_from(value: u64) -> Result<Self> {
        Self::new(value)
    }
}

/// Customer details attached to a payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub email: String,
    pub reference: String,
}

/// A single payment to run against the merchant server.
///
/// Immutable once built; construction rejects empty currency or order id and
/// non-positive amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    currency: String,
    amount: Amount,
    order_id: String,
    customer: Customer,
    mode: Mode,
    ask_register_pay: bool,
}

impl PaymentRequest {
    pub fn new(
        currency: String,
        amount: Amount,
        order_id: String,
        customer: Customer,
        mode: Mode,
        ask_register_pay: bool,
    ) -> Result<Self> {
        if currency.trim().is_empty() {
            return Err(PaymentError::Validation(
                "currency must not be empty".to_string(),
            ));
        }
        if order_id.trim().is_empty() {
            return Err(PaymentError::Validation(
                "order id must not be empty".to_string(),
            ));
        }
        Ok(Self {
            currency,
            amount,
            order_id,
            customer,
            mode,
            ask_register_pay,
        })
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether the hosted form should offer to register the card.
    pub fn ask_register_pay(&self) -> bool {
        self.ask_register_pay
    }
}
