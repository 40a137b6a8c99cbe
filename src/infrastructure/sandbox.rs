use crate::domain::payment::{ChargeRequest, ChargeStatus, GatewayResponse};
use crate::domain::ports::PaymentGateway;
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Card endings with a scripted answer. Every other valid card is approved.
pub const DECLINE_CARD_SUFFIX: &str = "0002";
pub const INSUFFICIENT_FUNDS_CARD_SUFFIX: &str = "9995";
pub const PROCESSING_ERROR_CARD_SUFFIX: &str = "0119";
pub const PENDING_CARD_SUFFIX: &str = "0341";

/// A deterministic stand-in for a real payment gateway.
///
/// Answers are chosen by the last four digits of the card. Clones share the charge
/// counter, so a test can keep one clone and hand the other to the processor.
#[derive(Debug, Default, Clone)]
pub struct SandboxGateway {
    charges: Arc<AtomicU64>,
    latency: Option<Duration>,
}

impl SandboxGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every answer by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of charge attempts received so far.
    pub fn charge_count(&self) -> u64 {
        self.charges.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for SandboxGateway {
    async fn charge(&self, request: &ChargeRequest) -> Result<GatewayResponse> {
        let n = self.charges.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let response = match request.card.last4() {
            DECLINE_CARD_SUFFIX => {
                GatewayResponse::declined("card_declined", "Your card was declined")
            }
            INSUFFICIENT_FUNDS_CARD_SUFFIX => {
                GatewayResponse::declined("insufficient_funds", "Insufficient funds")
            }
            PROCESSING_ERROR_CARD_SUFFIX => {
                return Err(CheckoutError::collaborator(
                    "sandbox processing error",
                ));
            }
            PENDING_CARD_SUFFIX => GatewayResponse::with_status(ChargeStatus::Pending),
            _ => GatewayResponse::approved(format!("sbx_{n}")),
        };
        Ok(response)
    }
}
