use serde::Deserialize;
use std::num::ParseIntError;

/// Nano-units per whole currency unit: provider-side amounts carry 9
/// fixed decimal places.
const NANO_PER_UNIT: u64 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Email,
    Sms,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Email => write!(f, "email"),
            Channel::Sms => write!(f, "sms"),
        }
    }
}

impl Channel {
    /// Suffix appended to the caller's idempotency key for this channel's
    /// provider call.
    pub fn idempotency_suffix(&self) -> &'static str {
        match self {
            Channel::Email => "-email",
            Channel::Sms => "-sms",
        }
    }
}

/// The inbound payment notification payload. Field names are the wire
/// names; recipients are optional and an empty string counts as absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyRequest {
    pub idempotency_key: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub amount: String,
    #[serde(default)]
    pub payer: Option<String>,
}

impl NotifyRequest {
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|addr| !addr.is_empty())
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|number| !number.is_empty())
    }
}

/// A nano-unit amount rendered as a decimal string: whole numbers carry no
/// decimal point, fractional values keep only significant fractional digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAmount(String);

impl NormalizedAmount {
    pub fn parse(raw: &str) -> Result<Self, ParseIntError> {
        let nano: i64 = raw.parse()?;

        let sign = if nano < 0 { "-" } else { "" };
        let magnitude = nano.unsigned_abs();
        let whole = magnitude / NANO_PER_UNIT;
        let frac = magnitude % NANO_PER_UNIT;

        if frac == 0 {
            return Ok(Self(format!("{sign}{whole}")));
        }

        let frac = format!("{frac:09}");
        let frac = frac.trim_end_matches('0');
        Ok(Self(format!("{sign}{whole}.{frac}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NormalizedAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
