//! Application configuration loaded from the environment.
//!
//! The configuration is built once in `main` and shared read-only with every
//! handler through [`crate::server::AppState`].
//!
//! # Security Notes
//! - Sensitive fields are marked and must never be logged
//! - `APP_SECRET` is optional outside production; without it inbound webhook
//!   signatures are not enforced

use envconfig::Envconfig;

/// Relay configuration.
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(from = "ENV", default = "local")]
    pub env: String,

    /// Host address for web server binding (NON-SENSITIVE)
    #[envconfig(from = "HOST", default = "0.0.0.0")]
    pub host: String,

    /// Port for web server binding (NON-SENSITIVE)
    #[envconfig(from = "PORT", default = "3000")]
    pub port: u16,

    /// 🔒 SENSITIVE: Page access token used as bearer credential for the Graph API
    #[envconfig(from = "PAGE_ACCESS_TOKEN")]
    pub page_access_token: String,

    /// 🔒 SENSITIVE: Shared secret for the webhook verification handshake
    #[envconfig(from = "VERIFY_TOKEN")]
    pub verify_token: String,

    /// 🔒 SENSITIVE: App secret used to sign webhook payloads (HMAC-SHA256)
    #[envconfig(from = "APP_SECRET")]
    pub app_secret: Option<String>,

    /// Graph API host (NON-SENSITIVE)
    #[envconfig(from = "GRAPH_API_BASE_URL", default = "https://graph.facebook.com")]
    pub graph_api_base_url: String,

    /// Graph API version prefix (NON-SENSITIVE)
    #[envconfig(from = "GRAPH_API_VERSION", default = "v21.0")]
    pub graph_api_version: String,

    /// 🔒 SENSITIVE: Logfire write token, traces stay local when unset
    #[envconfig(from = "LOGFIRE_TOKEN")]
    pub logfire_token: Option<String>,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    /// App secret, with an empty value treated as unset
    pub fn app_secret(&self) -> Option<&str> {
        self.app_secret.as_deref().filter(|s| !s.is_empty())
    }

    /// Versioned Graph API root, e.g. `https://graph.facebook.com/v21.0`
    pub fn graph_api_url(&self) -> String {
        format!(
            "{base}/{version}",
            base = self.graph_api_base_url.trim_end_matches('/'),
            version = self.graph_api_version.trim_matches('/')
        )
    }

    /// Rejects configurations that cannot serve traffic safely.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.page_access_token.trim().is_empty() {
            anyhow::bail!("PAGE_ACCESS_TOKEN must not be empty");
        }
        if self.verify_token.trim().is_empty() {
            anyhow::bail!("VERIFY_TOKEN must not be empty");
        }
        if self.is_prod() && self.app_secret().is_none() {
            anyhow::bail!("APP_SECRET is required when ENV=prod");
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> AppConfig {
    AppConfig {
        env: "local".into(),
        host: "127.0.0.1".into(),
        port: 3000,
        page_access_token: "page-token".into(),
        verify_token: "verify-secret".into(),
        app_secret: Some("app-secret".into()),
        graph_api_base_url: "https://graph.facebook.com".into(),
        graph_api_version: "v21.0".into(),
        logfire_token: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::init_from_hashmap(&env(&[
            ("PAGE_ACCESS_TOKEN", "token"),
            ("VERIFY_TOKEN", "verify"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.app_secret().is_none());
        assert_eq!(config.graph_api_url(), "https://graph.facebook.com/v21.0");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_required_values() {
        assert!(AppConfig::init_from_hashmap(&env(&[("VERIFY_TOKEN", "verify")])).is_err());
        assert!(AppConfig::init_from_hashmap(&env(&[("PAGE_ACCESS_TOKEN", "t")])).is_err());
    }

    #[test]
    fn test_empty_app_secret_is_unset() {
        let mut config = test_config();
        config.app_secret = Some(String::new());
        assert!(config.app_secret().is_none());
    }

    #[test]
    fn test_prod_requires_app_secret() {
        let mut config = test_config();
        config.env = "PROD".into();
        config.app_secret = None;
        assert!(config.validate().is_err());

        config.app_secret = Some("secret".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_graph_api_url_trims_slashes() {
        let mut config = test_config();
        config.graph_api_base_url = "http://localhost:9000/".into();
        config.graph_api_version = "/v19.0/".into();
        assert_eq!(config.graph_api_url(), "http://localhost:9000/v19.0");
    }
}
