use crate::{ConfigError, FromEnv, env_or_default, env_parse_or};

/// Elasticsearch connection configuration
#[derive(Clone, Debug)]
pub struct ElasticsearchConfig {
    pub url: String,
    pub index: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,
}

impl ElasticsearchConfig {
    pub fn new(url: String, index: String) -> Self {
        Self {
            url,
            index,
            username: None,
            password: None,
            timeout_secs: 30,
        }
    }

    pub fn with_credentials(mut self, username: String, password: String) -> Self {
        self.username = Some(username);
        self.password = Some(password);
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

impl FromEnv for ElasticsearchConfig {
    /// Reads from environment variables with defaults:
    /// - ELASTICSEARCH_URL: defaults to http://localhost:9200
    /// - ELASTICSEARCH_INDEX: defaults to "paintings"
    /// - ELASTICSEARCH_USERNAME / ELASTICSEARCH_PASSWORD: optional, both or neither
    /// - ELASTICSEARCH_TIMEOUT_SECS: defaults to 30
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_or_default("ELASTICSEARCH_URL", "http://localhost:9200");
        let index = env_or_default("ELASTICSEARCH_INDEX", "paintings");
        let timeout_secs = env_parse_or("ELASTICSEARCH_TIMEOUT_SECS", 30u64)?;

        let username = std::env::var("ELASTICSEARCH_USERNAME").ok();
        let password = std::env::var("ELASTICSEARCH_PASSWORD").ok();
        match (&username, &password) {
            (Some(_), None) => {
                return Err(ConfigError::MissingEnvVar("ELASTICSEARCH_PASSWORD".to_string()));
            }
            (None, Some(_)) => {
                return Err(ConfigError::MissingEnvVar("ELASTICSEARCH_USERNAME".to_string()));
            }
            _ => {}
        }

        Ok(Self {
            url,
            index,
            username,
            password,
            timeout_secs,
        })
    }
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self::new("http://localhost:9200".to_string(), "paintings".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 5] = [
        "ELASTICSEARCH_URL",
        "ELASTICSEARCH_INDEX",
        "ELASTICSEARCH_USERNAME",
        "ELASTICSEARCH_PASSWORD",
        "ELASTICSEARCH_TIMEOUT_SECS",
    ];

    #[test]
    fn test_elasticsearch_config_from_env_with_defaults() {
        temp_env::with_vars_unset(KEYS, || {
            let config = ElasticsearchConfig::from_env().unwrap();
            assert_eq!(config.url, "http://localhost:9200");
            assert_eq!(config.index, "paintings");
            assert_eq!(config.username, None);
            assert_eq!(config.timeout_secs, 30);
        });
    }

    #[test]
    fn test_elasticsearch_config_from_env_with_custom_values() {
        temp_env::with_vars(
            [
                ("ELASTICSEARCH_URL", Some("https://search.internal:9243/")),
                ("ELASTICSEARCH_INDEX", Some("paintings-v2")),
                ("ELASTICSEARCH_USERNAME", Some("gallery")),
                ("ELASTICSEARCH_PASSWORD", Some("secret")),
                ("ELASTICSEARCH_TIMEOUT_SECS", Some("5")),
            ],
            || {
                let config = ElasticsearchConfig::from_env().unwrap();
                assert_eq!(config.base_url(), "https://search.internal:9243");
                assert_eq!(config.index, "paintings-v2");
                assert_eq!(config.username.as_deref(), Some("gallery"));
                assert_eq!(config.password.as_deref(), Some("secret"));
                assert_eq!(config.timeout_secs, 5);
            },
        );
    }

    #[test]
    fn test_elasticsearch_config_username_without_password() {
        temp_env::with_vars(
            [
                ("ELASTICSEARCH_USERNAME", Some("gallery")),
                ("ELASTICSEARCH_PASSWORD", None),
            ],
            || {
                let err = ElasticsearchConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("ELASTICSEARCH_PASSWORD"));
            },
        );
    }

    #[test]
    fn test_elasticsearch_config_invalid_timeout() {
        temp_env::with_var("ELASTICSEARCH_TIMEOUT_SECS", Some("soon"), || {
            let err = ElasticsearchConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("ELASTICSEARCH_TIMEOUT_SECS"));
        });
    }

    #[test]
    fn test_elasticsearch_config_builders() {
        let config = ElasticsearchConfig::default()
            .with_credentials("elastic".to_string(), "changeme".to_string())
            .with_timeout(10);
        assert_eq!(config.username.as_deref(), Some("elastic"));
        assert_eq!(config.timeout_secs, 10);
    }
}
