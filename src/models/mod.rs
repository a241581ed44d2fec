pub mod notification;

pub use notification::{Channel, NormalizedAmount, NotifyRequest};
