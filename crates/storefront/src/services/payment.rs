//! Payment simulation.
//!
//! Card field masks and validation, plus a [`PaymentGateway`] seam. The only
//! gateway shipped is [`SimulatedGateway`], which approves a fixed share of
//! charges at random after a delay.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use delicious_bites_core::{Money, PaymentMethod, PaymentStatus};

use crate::latency::Latency;

/// Share of simulated charges that are approved.
pub const DEFAULT_APPROVAL_RATE: f64 = 0.8;

const CARD_DIGITS: usize = 16;
const CVV_DIGITS: usize = 3;
const EXPIRY_LEN: usize = 5;

// =============================================================================
// Input masks
// =============================================================================

fn digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Group card digits in fours (`4242 4242 ...`).
///
/// Non-digits are dropped. Returns `None` if more than 16 digits remain, so
/// the caller keeps the previous value.
#[must_use]
pub fn format_card_number(input: &str) -> Option<String> {
    let digits = digits(input);
    if digits.len() > CARD_DIGITS {
        return None;
    }
    let groups: Vec<&str> = digits
        .as_bytes()
        .chunks(4)
        .filter_map(|chunk| std::str::from_utf8(chunk).ok())
        .collect();
    Some(groups.join(" "))
}

/// Mask expiry input as `MM/YY`.
#[must_use]
pub fn format_expiry(input: &str) -> String {
    let digits = digits(input);
    if digits.len() >= 2 {
        let (month, rest) = digits.split_at(2);
        let year: String = rest.chars().take(2).collect();
        format!("{month}/{year}")
    } else {
        digits
    }
}

/// Keep at most three CVV digits.
#[must_use]
pub fn format_cvv(input: &str) -> String {
    digits(input).chars().take(CVV_DIGITS).collect()
}

/// Card network, guessed from the first digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Unknown,
}

impl std::fmt::Display for CardBrand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Visa => write!(f, "Visa"),
            Self::Mastercard => write!(f, "Mastercard"),
            Self::Amex => write!(f, "Amex"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

#[must_use]
pub fn card_brand(number: &str) -> CardBrand {
    match digits(number).chars().next() {
        Some('4') => CardBrand::Visa,
        Some('5' | '2') => CardBrand::Mastercard,
        Some('3') => CardBrand::Amex,
        _ => CardBrand::Unknown,
    }
}

// =============================================================================
// Card details
// =============================================================================

/// A card form field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardField {
    Number,
    Expiry,
    Cvv,
    Name,
    Zip,
}

/// Card details failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please check your card details")]
pub struct CardError {
    pub fields: Vec<CardField>,
}

/// Card fields as entered.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CardDetails {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
    pub name: String,
    pub zip: String,
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("brand", &card_brand(&self.number))
            .field("number", &"[REDACTED]")
            .field("expiry", &self.expiry)
            .field("cvv", &"[REDACTED]")
            .field("name", &self.name)
            .field("zip", &self.zip)
            .finish()
    }
}

impl CardDetails {
    /// Check every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns `CardError` listing each field that is missing or malformed.
    pub fn validate(&self) -> Result<(), CardError> {
        let mut fields = Vec::new();
        if digits(&self.number).len() != CARD_DIGITS {
            fields.push(CardField::Number);
        }
        if self.expiry.trim().len() != EXPIRY_LEN {
            fields.push(CardField::Expiry);
        }
        let cvv = self.cvv.trim();
        if cvv.len() != CVV_DIGITS || !cvv.chars().all(|c| c.is_ascii_digit()) {
            fields.push(CardField::Cvv);
        }
        if self.name.trim().is_empty() {
            fields.push(CardField::Name);
        }
        if self.zip.trim().is_empty() {
            fields.push(CardField::Zip);
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(CardError { fields })
        }
    }
}

// =============================================================================
// Gateway
// =============================================================================

/// A charge to submit.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub amount: Money,
    pub method: PaymentMethod,
    /// Required when `method` is `Card`.
    pub card: Option<CardDetails>,
}

/// Record of an approved charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentReceipt {
    pub transaction_id: String,
    pub amount: Money,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub timestamp: DateTime<Utc>,
}

/// Errors from a charge attempt. All are retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error(transparent)]
    Card(#[from] CardError),

    #[error("Please check your card details")]
    MissingCard,

    #[error("Payment failed. Please try again.")]
    Declined,
}

/// Something that can take money.
#[async_trait]
pub trait PaymentGateway: Send + Sync + std::fmt::Debug {
    /// Submit a charge.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` if the details are invalid or the charge is
    /// declined.
    async fn charge(&self, request: PaymentRequest) -> Result<PaymentReceipt, PaymentError>;
}

/// Stand-in gateway: waits, then flips a weighted coin.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    latency: Latency,
    approval_rate: f64,
}

impl SimulatedGateway {
    #[must_use]
    pub const fn new(latency: Latency) -> Self {
        Self {
            latency,
            approval_rate: DEFAULT_APPROVAL_RATE,
        }
    }

    /// Override the approval probability, clamped to `0.0..=1.0`.
    ///
    /// `1.0` always approves and `0.0` always declines.
    #[must_use]
    pub fn with_approval_rate(mut self, rate: f64) -> Self {
        self.approval_rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
        self
    }

    #[must_use]
    pub const fn approval_rate(&self) -> f64 {
        self.approval_rate
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    #[tracing::instrument(skip(self, request), fields(amount = %request.amount, method = %request.method))]
    async fn charge(&self, request: PaymentRequest) -> Result<PaymentReceipt, PaymentError> {
        if request.method == PaymentMethod::Card {
            request.card.as_ref().ok_or(PaymentError::MissingCard)?.validate()?;
        }

        self.latency.wait().await;

        if !rand::random_bool(self.approval_rate) {
            tracing::warn!("Simulated charge declined");
            return Err(PaymentError::Declined);
        }

        let timestamp = Utc::now();
        let receipt = PaymentReceipt {
            transaction_id: format!("TXN_{}", timestamp.timestamp_millis()),
            amount: request.amount,
            method: request.method,
            status: PaymentStatus::Completed,
            timestamp,
        };
        tracing::info!(transaction_id = %receipt.transaction_id, "Simulated charge approved");
        Ok(receipt)
    }
}
