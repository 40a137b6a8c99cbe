use crate::config::PaymentSettings;
use crate::domain::money::Amount;
use crate::domain::payment::{
    CardNumber, ChargeRequest, ChargeResult, ChargeStatus, DeclineReason, FailureCause,
    GatewayResponse, IdempotencyKey, PaymentOutcome,
};
use crate::domain::ports::PaymentGatewayBox;
use crate::error::Result;
use tokio::time::timeout;
use tracing::{info, warn};

/// Charges cards through the payment collaborator and classifies what comes back.
///
/// Each call is one charge attempt: nothing is deduplicated or retried here. Callers
/// that need retry safety pass an [`IdempotencyKey`], which the gateway honours.
pub struct PaymentProcessor {
    gateway: PaymentGatewayBox,
    settings: PaymentSettings,
}

impl PaymentProcessor {
    pub fn new(gateway: PaymentGatewayBox, settings: PaymentSettings) -> Self {
        Self { gateway, settings }
    }

    /// Charges `amount` to `card` in the configured currency.
    pub async fn process_payment(
        &self,
        amount: Amount,
        card: CardNumber,
    ) -> Result<PaymentOutcome> {
        let request = ChargeRequest::new(amount, card, self.settings.currency.clone());
        self.process(request).await
    }

    /// Validates raw caller input, then charges it.
    ///
    /// Validation failures are returned as `InvalidInput` before the gateway is called.
    pub async fn process_raw_payment(
        &self,
        amount: &str,
        card_number: &str,
        idempotency_key: Option<&str>,
    ) -> Result<PaymentOutcome> {
        let amount: Amount = amount.parse()?;
        let card = CardNumber::parse(card_number)?;
        let mut request = ChargeRequest::new(amount, card, self.settings.currency.clone());
        if let Some(key) = idempotency_key {
            request = request.with_idempotency_key(IdempotencyKey::new(key)?);
        }
        self.process(request).await
    }

    pub async fn process(&self, request: ChargeRequest) -> Result<PaymentOutcome> {
        let limit = self.settings.timeout();

        let outcome = match timeout(limit, self.gateway.charge(&request)).await {
            Err(_) => PaymentOutcome::Failed {
                cause: FailureCause::TimedOut(self.settings.timeout_ms),
            },
            Ok(Err(e)) => PaymentOutcome::Failed {
                cause: FailureCause::Gateway(e.to_string()),
            },
            Ok(Ok(response)) => classify(&request, response),
        };

        match &outcome {
            PaymentOutcome::Approved(result) => info!(
                amount = %request.amount,
                currency = %request.currency,
                card = %request.card,
                reference = %result.reference,
                "payment approved"
            ),
            PaymentOutcome::Declined(reason) => warn!(
                amount = %request.amount,
                currency = %request.currency,
                card = %request.card,
                code = %reason.code,
                "payment declined"
            ),
            PaymentOutcome::Failed { cause } => warn!(
                amount = %request.amount,
                currency = %request.currency,
                card = %request.card,
                cause = %cause,
                "payment failed"
            ),
        }

        Ok(outcome)
    }
}

/// Maps a gateway answer onto an outcome. Receiving a response is not success.
fn classify(request: &ChargeRequest, response: GatewayResponse) -> PaymentOutcome {
    match response.status {
        ChargeStatus::Approved => match response.reference {
            Some(reference) if !reference.trim().is_empty() => {
                PaymentOutcome::Approved(ChargeResult {
                    reference,
                    amount: request.amount,
                    currency: request.currency.clone(),
                    card: request.card.masked(),
                    idempotency_key: request.idempotency_key.clone(),
                })
            }
            _ => PaymentOutcome::Failed {
                cause: FailureCause::MalformedResponse(
                    "approved charge without a reference".to_string(),
                ),
            },
        },
        ChargeStatus::Declined => PaymentOutcome::Declined(DeclineReason {
            code: response
                .decline_code
                .unwrap_or_else(|| "declined".to_string()),
            message: response
                .message
                .unwrap_or_else(|| "The charge was declined".to_string()),
        }),
        status @ (ChargeStatus::Pending | ChargeStatus::Unknown(_)) => PaymentOutcome::Failed {
            cause: FailureCause::UnrecognizedStatus(status.to_string()),
        },
    }
}
