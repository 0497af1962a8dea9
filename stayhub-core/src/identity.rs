use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

pub const ANONYMOUS_NAME: &str = "anonymous";
pub const UNKNOWN_EMAIL: &str = "unknown";
pub const PLACEHOLDER_AVATAR: &str = "/assets/images/placeholder.jpg";

/// The signed-in user as reported by the authentication provider.
///
/// Passed explicitly into every flow that needs it; nothing reads it from
/// ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

/// Billing details sent with a card confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingDetails {
    pub email: String,
    pub name: String,
}

impl Identity {
    pub fn new(display_name: Option<&str>, email: Option<&str>) -> Self {
        Self {
            display_name: display_name.map(str::to_string),
            email: email.map(str::to_string),
            photo_url: None,
        }
    }

    pub fn billing_details(&self) -> BillingDetails {
        BillingDetails {
            email: non_empty(&self.email).unwrap_or(UNKNOWN_EMAIL).to_string(),
            name: non_empty(&self.display_name)
                .unwrap_or(ANONYMOUS_NAME)
                .to_string(),
        }
    }

    pub fn avatar_url(&self) -> &str {
        non_empty(&self.photo_url).unwrap_or(PLACEHOLDER_AVATAR)
    }

    /// Email used to key dashboard queries.
    pub fn require_email(&self) -> CoreResult<&str> {
        non_empty(&self.email)
            .ok_or_else(|| CoreError::IdentityError("signed-in user has no email".to_string()))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
