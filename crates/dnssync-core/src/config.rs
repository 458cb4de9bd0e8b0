//! Configuration types for the dnssync system
//!
//! Configuration is always an explicit value handed to a provider factory;
//! nothing is read from process-wide state, so several accounts can be served
//! side by side.

use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS provider configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Tecnocratica control panel (Neodigit, Virtualname)
    Tecnocratica {
        /// Control-panel API token
        api_token: String,
        /// API base URL (optional, defaults to the Neodigit endpoint)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_url: Option<String>,
    },

    /// Custom provider
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl ProviderConfig {
    /// Tecnocratica configuration with the default endpoint
    pub fn tecnocratica(api_token: impl Into<String>) -> Self {
        ProviderConfig::Tecnocratica {
            api_token: api_token.into(),
            api_url: None,
        }
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Tecnocratica { api_token, api_url } => {
                if api_token.is_empty() {
                    return Err(crate::Error::config("Tecnocratica API token cannot be empty"));
                }
                if api_url.as_ref().is_some_and(|u| u.trim().is_empty()) {
                    return Err(crate::Error::config(
                        "Tecnocratica API URL cannot be empty when set",
                    ));
                }
                Ok(())
            }
            ProviderConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom provider factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom provider config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Tecnocratica { .. } => "tecnocratica",
            ProviderConfig::Custom { factory, .. } => factory,
        }
    }
}

// The API token never shows up in Debug output
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderConfig::Tecnocratica { api_url, .. } => f
                .debug_struct("Tecnocratica")
                .field("api_token", &"<REDACTED>")
                .field("api_url", api_url)
                .finish(),
            ProviderConfig::Custom { factory, config } => f
                .debug_struct("Custom")
                .field("factory", factory)
                .field("config", config)
                .finish(),
        }
    }
}
