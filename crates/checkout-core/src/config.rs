//! # Trigger Configuration
//!
//! Endpoint paths and the element identifier the trigger binds to.

/// Default configuration endpoint
pub const DEFAULT_CONFIG_PATH: &str = "/config/";

/// Default session-creation endpoint
pub const DEFAULT_SESSION_PATH: &str = "/create-checkout-session/";

/// Default identifier of the checkout button
pub const DEFAULT_BUTTON_ID: &str = "submitBtn";

/// Checkout trigger configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerConfig {
    /// Path of the configuration endpoint (e.g., "/config/")
    pub config_path: String,
    /// Path of the session-creation endpoint
    pub session_path: String,
    /// Identifier of the element that starts checkout
    pub button_id: String,
}

impl TriggerConfig {
    pub fn new() -> Self {
        Self {
            config_path: DEFAULT_CONFIG_PATH.to_string(),
            session_path: DEFAULT_SESSION_PATH.to_string(),
            button_id: DEFAULT_BUTTON_ID.to_string(),
        }
    }

    /// Builder: set the configuration endpoint path
    pub fn with_config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = path.into();
        self
    }

    /// Builder: set the session endpoint path
    pub fn with_session_path(mut self, path: impl Into<String>) -> Self {
        self.session_path = path.into();
        self
    }

    /// Builder: set the button identifier
    pub fn with_button_id(mut self, id: impl Into<String>) -> Self {
        self.button_id = id.into();
        self
    }
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self::new()
    }
}
