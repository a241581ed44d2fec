use async_trait::async_trait;
use notify_relay::config::{CommonConfig, CourierConfig, RelayConfig, TemplateConfig};
use notify_relay::models::Channel;
use notify_relay::services::{
    MessageProvider, ProviderError, ProviderResponse, TemplateMessage,
};
use notify_relay::startup::Application;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// One provider call as the provider saw it.
#[derive(Debug, Clone)]
pub struct RecordedSend {
    pub channel: Channel,
    pub to: String,
    pub template: String,
    pub amount: String,
    pub payer: Option<String>,
    pub idempotency_key: String,
}

/// Provider fake that records every call and can be told to fail
/// specific channels.
pub struct RecordingProvider {
    sends: Mutex<Vec<RecordedSend>>,
    failing: Vec<Channel>,
    counter: AtomicU64,
}

impl RecordingProvider {
    pub fn new() -> Arc<Self> {
        Self::failing(&[])
    }

    pub fn failing(channels: &[Channel]) -> Arc<Self> {
        Arc::new(Self {
            sends: Mutex::new(Vec::new()),
            failing: channels.to_vec(),
            counter: AtomicU64::new(0),
        })
    }

    pub fn sends(&self) -> Vec<RecordedSend> {
        self.sends.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageProvider for RecordingProvider {
    async fn send(
        &self,
        message: &TemplateMessage,
        idempotency_key: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        let channel = message.to.channel();

        self.sends.lock().unwrap().push(RecordedSend {
            channel,
            to: message.to.address().to_string(),
            template: message.template.clone(),
            amount: message.data.amount.clone(),
            payer: message.data.payer.clone(),
            idempotency_key: idempotency_key.to_string(),
        });

        if self.failing.contains(&channel) {
            return Err(ProviderError::SendFailed(format!(
                "simulated {} outage",
                channel
            )));
        }

        let count = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ProviderResponse {
            request_id: format!("req-{}-{}", channel, count),
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

pub struct TestApp {
    pub address: String,
    pub provider: Arc<RecordingProvider>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_provider(RecordingProvider::new()).await
    }

    pub async fn spawn_with_provider(provider: Arc<RecordingProvider>) -> Self {
        // Use random port for testing (port 0)
        let config = RelayConfig {
            common: CommonConfig { port: 0 },
            courier: CourierConfig {
                auth_token: "test-token".to_string(),
                base_url: "http://courier.test.local".to_string(),
                enabled: false, // Injected fake handles sends
            },
            templates: TemplateConfig {
                email: "EMAIL_TEMPLATE".to_string(),
                sms: "SMS_TEMPLATE".to_string(),
            },
        };

        let app = Application::build_with_provider(config, provider.clone())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, provider }
    }

    pub fn notify_url(&self) -> String {
        format!("{}/notify", self.address)
    }
}
