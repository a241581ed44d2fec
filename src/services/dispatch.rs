//! Per-channel message dispatch.
//!
//! Each recipient field triggers an independent, guarded send: a failed
//! channel is recorded and logged, never propagated, so it cannot block the
//! other channel or the overall response.

use crate::config::TemplateConfig;
use crate::models::{Channel, NormalizedAmount, NotifyRequest};
use crate::services::providers::{MessageData, MessageProvider, Recipient, TemplateMessage};

/// Outcome of one channel's send attempt.
#[derive(Debug, Clone)]
pub enum ChannelOutcome {
    Sent { channel: Channel, request_id: String },
    Failed { channel: Channel, reason: String },
}

/// Send attempts in order (email first, then SMS).
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    outcomes: Vec<ChannelOutcome>,
}

impl DispatchReport {
    pub fn outcomes(&self) -> &[ChannelOutcome] {
        &self.outcomes
    }

    /// Provider request identifiers of the successful sends, in attempt
    /// order. Failed channels are omitted.
    pub fn request_ids(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                ChannelOutcome::Sent { request_id, .. } => Some(request_id.clone()),
                ChannelOutcome::Failed { .. } => None,
            })
            .collect()
    }
}

pub async fn dispatch(
    provider: &dyn MessageProvider,
    request: &NotifyRequest,
    amount: &NormalizedAmount,
    templates: &TemplateConfig,
) -> DispatchReport {
    let mut report = DispatchReport::default();

    if let Some(email) = request.email() {
        let message = TemplateMessage {
            to: Recipient::Email(email.to_string()),
            template: templates.email.clone(),
            data: MessageData {
                amount: amount.to_string(),
                payer: request.payer.clone(),
            },
        };
        report
            .outcomes
            .push(attempt(provider, message, &request.idempotency_key).await);
    }

    if let Some(phone) = request.phone() {
        let message = TemplateMessage {
            to: Recipient::Phone(phone.to_string()),
            template: templates.sms.clone(),
            data: MessageData {
                amount: amount.to_string(),
                payer: request.payer.clone(),
            },
        };
        report
            .outcomes
            .push(attempt(provider, message, &request.idempotency_key).await);
    }

    report
}

async fn attempt(
    provider: &dyn MessageProvider,
    message: TemplateMessage,
    idempotency_key: &str,
) -> ChannelOutcome {
    let channel = message.to.channel();
    let key = format!("{}{}", idempotency_key, channel.idempotency_suffix());

    match provider.send(&message, &key).await {
        Ok(response) => {
            tracing::info!(
                channel = %channel,
                to = %message.to.address(),
                request_id = %response.request_id,
                "Notification sent"
            );
            ChannelOutcome::Sent {
                channel,
                request_id: response.request_id,
            }
        }
        Err(e) => {
            tracing::error!(
                channel = %channel,
                to = %message.to.address(),
                error = %e,
                "Failed to send notification"
            );
            ChannelOutcome::Failed {
                channel,
                reason: e.to_string(),
            }
        }
    }
}
