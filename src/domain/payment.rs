use super::money::{Amount, Currency};
use crate::error::CheckoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A primary account number.
///
/// Spaces and dashes are stripped on parse; what remains must be 12 to 19 digits and
/// pass the Luhn checksum. The full number never leaves this type: `Debug` and
/// `Display` only ever show the last four digits.
#[derive(Clone, PartialEq, Eq)]
pub struct CardNumber(String);

impl CardNumber {
    pub fn parse(raw: &str) -> Result<Self, CheckoutError> {
        let digits: String = raw.chars().filter(|c| *c != ' ' && *c != '-').collect();

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(CheckoutError::invalid("Card number must contain only digits"));
        }
        if !(12..=19).contains(&digits.len()) {
            return Err(CheckoutError::invalid(format!(
                "Card number must have 12 to 19 digits, got {}",
                digits.len()
            )));
        }
        if !luhn_valid(&digits) {
            return Err(CheckoutError::invalid("Card number fails checksum"));
        }
        Ok(Self(digits))
    }

    pub fn last4(&self) -> &str {
        &self.0[self.0.len() - 4..]
    }

    pub fn masked(&self) -> String {
        format!("****{}", self.last4())
    }
}

fn luhn_valid(digits: &str) -> bool {
    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CardNumber").field(&self.masked()).finish()
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

/// Caller-supplied token a gateway may use to collapse retried charges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    pub fn new(key: impl Into<String>) -> Result<Self, CheckoutError> {
        let key = key.into();
        if key.trim().is_empty() || key.len() > 255 {
            return Err(CheckoutError::invalid(
                "Idempotency key must be 1 to 255 characters",
            ));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A validated request to charge a card.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRequest {
    pub amount: Amount,
    pub card: CardNumber,
    pub currency: Currency,
    pub idempotency_key: Option<IdempotencyKey>,
}

impl ChargeRequest {
    pub fn new(amount: Amount, card: CardNumber, currency: Currency) -> Self {
        Self {
            amount,
            card,
            currency,
            idempotency_key: None,
        }
    }

    pub fn with_idempotency_key(mut self, key: IdempotencyKey) -> Self {
        self.idempotency_key = Some(key);
        self
    }
}

/// Status as reported by the payment collaborator.
///
/// A status this crate does not know is kept verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChargeStatus {
    Approved,
    Declined,
    Pending,
    Unknown(String),
}

impl ChargeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ChargeStatus::Approved => "approved",
            ChargeStatus::Declined => "declined",
            ChargeStatus::Pending => "pending",
            ChargeStatus::Unknown(raw) => raw,
        }
    }
}

impl From<String> for ChargeStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "approved" => ChargeStatus::Approved,
            "declined" => ChargeStatus::Declined,
            "pending" => ChargeStatus::Pending,
            _ => ChargeStatus::Unknown(raw),
        }
    }
}

impl From<ChargeStatus> for String {
    fn from(status: ChargeStatus) -> Self {
        match status {
            ChargeStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ChargeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw answer of the payment collaborator, before classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub status: ChargeStatus,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub decline_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl GatewayResponse {
    pub fn approved(reference: impl Into<String>) -> Self {
        Self {
            status: ChargeStatus::Approved,
            reference: Some(reference.into()),
            decline_code: None,
            message: None,
        }
    }

    pub fn declined(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: ChargeStatus::Declined,
            reference: None,
            decline_code: Some(code.into()),
            message: Some(message.into()),
        }
    }

    pub fn with_status(status: ChargeStatus) -> Self {
        Self {
            status,
            reference: None,
            decline_code: None,
            message: None,
        }
    }
}

/// A charge the collaborator approved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargeResult {
    pub reference: String,
    pub amount: Amount,
    pub currency: Currency,
    pub card: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<IdempotencyKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclineReason {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureCause {
    #[error("payment gateway did not answer within {0} ms")]
    TimedOut(u64),
    #[error("payment gateway error: {0}")]
    Gateway(String),
    #[error("malformed gateway response: {0}")]
    MalformedResponse(String),
    #[error("unrecognized charge status '{0}'")]
    UnrecognizedStatus(String),
}

/// Classified result of a charge attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum PaymentOutcome {
    Approved(ChargeResult),
    Declined(DeclineReason),
    Failed { cause: FailureCause },
}

impl PaymentOutcome {
    /// Collapses the outcome into a `Result`, turning declines and failures into errors.
    pub fn into_result(self) -> Result<ChargeResult, CheckoutError> {
        match self {
            PaymentOutcome::Approved(result) => Ok(result),
            PaymentOutcome::Declined(reason) => Err(CheckoutError::PaymentDeclined {
                code: reason.code,
                message: reason.message,
            }),
            PaymentOutcome::Failed { cause } => {
                Err(CheckoutError::CollaboratorFailure(cause.to_string()))
            }
        }
    }
}
