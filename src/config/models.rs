use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

/// Archive endpoint and the headers sent with every submission
#[derive(Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Submission endpoint; status endpoints hang off `<base_url>/status/...`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Headers attached to submissions (not to status queries)
    #[serde(default = "default_fixed_headers")]
    pub fixed_headers: BTreeMap<String, String>,
    /// Archive access key (loaded from environment, not from config file)
    #[serde(skip)]
    pub access_key: Option<String>,
    /// Archive secret key (loaded from environment, not from config file)
    #[serde(skip)]
    pub secret_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            fixed_headers: default_fixed_headers(),
            access_key: None,
            secret_key: None,
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("fixed_headers", &self.fixed_headers)
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn default_base_url() -> String {
    "https://web.archive.org/save".to_string()
}

fn default_fixed_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("accept".to_string(), mime::APPLICATION_JSON.to_string()),
        (
            "content-type".to_string(),
            mime::APPLICATION_WWW_FORM_URLENCODED.to_string(),
        ),
    ])
}

/// Access/secret key pair for the archive account.
///
/// Immutable once a client is built; shared read-only by every call on it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// `LOW <access>:<secret>` value for the `authorization` header.
    pub fn authorization(&self) -> String {
        format!("LOW {}:{}", self.access_key, self.secret_key)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "https://web.archive.org/save");
        assert_eq!(config.api.fixed_headers["accept"], "application/json");
        assert_eq!(
            config.api.fixed_headers["content-type"],
            "application/x-www-form-urlencoded"
        );
        assert!(config.api.access_key.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[api]
base_url = "http://localhost:8080/save"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://localhost:8080/save");
        assert_eq!(config.api.fixed_headers, default_fixed_headers());
    }

    #[test]
    fn test_authorization_value() {
        let credentials = Credentials::new("abc", "xyz");
        assert_eq!(credentials.authorization(), "LOW abc:xyz");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials::new("abc", "xyz");
        assert!(!format!("{credentials:?}").contains("xyz"));

        let api = ApiConfig {
            secret_key: Some("xyz".to_string()),
            ..ApiConfig::default()
        };
        assert!(!format!("{api:?}").contains("xyz"));
    }
}
