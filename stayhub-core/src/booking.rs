use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CoreError, CoreResult};

/// An amount in integer minor units (cents). No rounding is ever applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    pub const fn from_minor(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn from_major(units: i64) -> Self {
        Self(units * 100)
    }

    pub const fn minor_units(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> CoreResult<Self> {
        if to < from {
            return Err(CoreError::ValidationError(format!(
                "date range ends ({}) before it starts ({})",
                to, from
            )));
        }
        Ok(Self { from, to })
    }
}

/// What the guest is about to pay for. Immutable input to checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub room_id: String,
    pub price: Price,
    pub host_email: String,
    pub guest_email: String,
    pub guest_name: String,
    #[serde(flatten)]
    pub date_range: DateRange,
}

/// Booking payload stored by the backend once a payment succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedBooking {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub request: BookingRequest,
    pub transaction_id: String,
    pub date: DateTime<Utc>,
}

impl PersistedBooking {
    pub fn new(request: BookingRequest, transaction_id: String, date: DateTime<Utc>) -> Self {
        Self {
            id: None,
            request,
            transaction_id,
            date,
        }
    }
}

/// Insert acknowledgement. A missing id means nothing was stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    #[serde(default)]
    pub inserted_id: Option<String>,
}
