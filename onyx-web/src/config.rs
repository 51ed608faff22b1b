//! Frontend configuration module
//!
//! This module provides configuration for frontend-specific URLs and settings.

/// Frontend configuration for URLs and external links
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    /// Base URL every API path is joined onto.
    pub api_base_url: String,
    /// Support contact shown when checkout verification fails.
    pub support_email: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("ONYX_API_BASE_URL")
                .unwrap_or("/api")
                .to_string(),
            support_email: option_env!("ONYX_SUPPORT_EMAIL")
                .unwrap_or("support@onyx.app")
                .to_string(),
        }
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the API base URL
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Get the support contact address
    #[must_use]
    pub fn support_email(&self) -> &str {
        &self.support_email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontend_config_default() {
        let config = FrontendConfig::default();
        assert!(!config.api_base_url.is_empty());
        assert!(config.api_base_url.starts_with('/') || config.api_base_url.starts_with("http"));
    }

    #[test]
    fn test_frontend_config_new() {
        let config = FrontendConfig::new();
        assert!(!config.api_base_url().is_empty());
        assert!(config.support_email().contains('@'));
    }

    #[test]
    fn test_frontend_config_clone() {
        let config1 = FrontendConfig::new();
        let config2 = config1.clone();
        assert_eq!(config1.api_base_url(), config2.api_base_url());
    }
}
