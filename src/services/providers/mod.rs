pub mod courier;

use crate::models::Channel;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub use courier::{CourierProvider, MockProvider};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not enabled: {0}")]
    NotEnabled(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Send error: {0}")]
    SendFailed(String),

    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),
}

/// Identifier the provider assigns to an accepted send request.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub request_id: String,
}

#[derive(Debug, Clone)]
pub enum Recipient {
    Email(String),
    Phone(String),
}

impl Recipient {
    pub fn channel(&self) -> Channel {
        match self {
            Recipient::Email(_) => Channel::Email,
            Recipient::Phone(_) => Channel::Sms,
        }
    }

    pub fn address(&self) -> &str {
        match self {
            Recipient::Email(addr) => addr,
            Recipient::Phone(number) => number,
        }
    }
}

/// Display data forwarded verbatim into the provider-hosted template.
#[derive(Debug, Clone, Serialize)]
pub struct MessageData {
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TemplateMessage {
    pub to: Recipient,
    pub template: String,
    pub data: MessageData,
}

#[async_trait]
pub trait MessageProvider: Send + Sync {
    /// Ask the provider to render the template for the recipient. The
    /// idempotency key guards against duplicate delivery on retried calls.
    async fn send(
        &self,
        message: &TemplateMessage,
        idempotency_key: &str,
    ) -> Result<ProviderResponse, ProviderError>;

    async fn health_check(&self) -> Result<(), ProviderError>;

    fn is_enabled(&self) -> bool;
}
