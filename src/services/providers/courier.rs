use super::{MessageProvider, ProviderError, ProviderResponse, Recipient, TemplateMessage};
use crate::config::CourierConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

pub struct CourierProvider {
    config: CourierConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct CourierSendRequest<'a> {
    message: CourierMessage<'a>,
}

#[derive(Debug, Serialize)]
struct CourierMessage<'a> {
    to: CourierTo<'a>,
    template: &'a str,
    data: &'a super::MessageData,
}

#[derive(Debug, Serialize)]
struct CourierTo<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct CourierSendResponse {
    #[serde(rename = "requestId")]
    request_id: String,
}

impl CourierProvider {
    pub fn new(config: CourierConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl MessageProvider for CourierProvider {
    async fn send(
        &self,
        message: &TemplateMessage,
        idempotency_key: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        if !self.config.enabled {
            return Err(ProviderError::NotEnabled(
                "Courier message provider is not enabled".to_string(),
            ));
        }

        if message.to.address().is_empty() {
            return Err(ProviderError::InvalidRecipient(
                "Recipient address is empty".to_string(),
            ));
        }

        let to = match &message.to {
            Recipient::Email(addr) => CourierTo {
                email: Some(addr),
                phone_number: None,
            },
            Recipient::Phone(number) => CourierTo {
                email: None,
                phone_number: Some(number),
            },
        };

        let request = CourierSendRequest {
            message: CourierMessage {
                to,
                template: &message.template,
                data: &message.data,
            },
        };

        let url = format!("{}/send", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.auth_token)
            .header("Idempotency-Key", idempotency_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ProviderError::Connection(format!("Failed to connect to Courier: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::SendFailed(format!(
                "Courier API returned error status {}: {}",
                status, body
            )));
        }

        let courier_response: CourierSendResponse = response.json().await.map_err(|e| {
            ProviderError::SendFailed(format!("Failed to parse Courier response: {}", e))
        })?;

        tracing::info!(
            to = %message.to.address(),
            channel = %message.to.channel(),
            request_id = %courier_response.request_id,
            "Message accepted by Courier"
        );

        Ok(ProviderResponse {
            request_id: courier_response.request_id,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if !self.config.enabled {
            return Ok(());
        }

        // Courier has no dedicated health endpoint; validate the config.
        if self.config.auth_token.is_empty() {
            return Err(ProviderError::Configuration(
                "Courier auth token is not configured".to_string(),
            ));
        }

        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }
}

/// Mock message provider for tests and disabled-provider environments
pub struct MockProvider {
    enabled: bool,
    send_count: AtomicU64,
}

impl MockProvider {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            send_count: AtomicU64::new(0),
        }
    }

    pub fn send_count(&self) -> u64 {
        self.send_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageProvider for MockProvider {
    async fn send(
        &self,
        message: &TemplateMessage,
        idempotency_key: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotEnabled(
                "Mock message provider is not enabled".to_string(),
            ));
        }

        let count = self.send_count.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::info!(
            to = %message.to.address(),
            channel = %message.to.channel(),
            template = %message.template,
            idempotency_key = %idempotency_key,
            "[MOCK] Message would be sent"
        );

        Ok(ProviderResponse {
            request_id: format!("mock-{}-{}", message.to.channel(), count),
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
