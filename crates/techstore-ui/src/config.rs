//! Storefront configuration.

use serde::{Deserialize, Serialize};

use techstore_commerce::CART_KEY;
use techstore_observability::{LogFormat, LogLevel};

use crate::error::UiError;

/// Id of the optional `<script type="application/json">` block holding
/// overrides for [`StorefrontConfig`].
pub const CONFIG_ELEMENT_ID: &str = "storefront-config";

/// Configuration for the storefront component.
///
/// Every field has a default, so a config block only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Storage key for the cart.
    pub cart_key: String,
    /// Storage key for the theme flag.
    pub theme_key: String,
    /// Endpoint listing registered users.
    pub users_endpoint: String,
    /// Id of the element showing the cart count, if the page has one.
    pub cart_badge_id: Option<String>,
    /// Id of the newsletter email input.
    pub newsletter_input_id: String,
    /// Id of the user list modal.
    pub user_modal_id: String,
    /// Id of the user list modal body.
    pub user_content_id: String,
    /// Body class enabling the dark theme.
    pub dark_theme_class: String,
    /// Class added to empty required fields.
    pub invalid_class: String,
    /// How long a notification stays on screen.
    pub notification_delay_ms: u32,
    /// How long a pressed button stays scaled down.
    pub press_revert_ms: u32,
    /// Minimum log level.
    pub log_level: LogLevel,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            cart_key: CART_KEY.to_string(),
            theme_key: "theme".to_string(),
            users_endpoint: "/api/users".to_string(),
            cart_badge_id: Some("cart-badge".to_string()),
            newsletter_input_id: "newsletter-email".to_string(),
            user_modal_id: "userListModal".to_string(),
            user_content_id: "userListContent".to_string(),
            dark_theme_class: "dark-theme".to_string(),
            invalid_class: "is-invalid".to_string(),
            notification_delay_ms: 3000,
            press_revert_ms: 150,
            log_level: LogLevel::Info,
            log_format: LogFormat::Json,
        }
    }
}

impl StorefrontConfig {
    /// Parse a JSON config block. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, UiError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the users endpoint.
    pub fn with_users_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.users_endpoint = endpoint.into();
        self
    }

    /// Set the notification lifetime.
    pub fn with_notification_delay(mut self, delay_ms: u32) -> Self {
        self.notification_delay_ms = delay_ms;
        self
    }

    /// Set or clear the cart badge element id.
    pub fn with_cart_badge(mut self, id: Option<String>) -> Self {
        self.cart_badge_id = id;
        self
    }

    /// Set the minimum log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}
