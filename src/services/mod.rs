pub mod dispatch;
pub mod providers;

pub use dispatch::{dispatch, ChannelOutcome, DispatchReport};
pub use providers::{
    CourierProvider, MessageData, MessageProvider, MockProvider, ProviderError, ProviderResponse,
    Recipient, TemplateMessage,
};
