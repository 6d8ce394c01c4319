use core_config::{AppInfo, FromEnv, app_info, elasticsearch::ElasticsearchConfig, server::ServerConfig};
use domain_paintings::SimilaritySettings;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub elasticsearch: ElasticsearchConfig,
    pub similarity: SimilaritySettings,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let elasticsearch = ElasticsearchConfig::from_env()?; // Defaults to localhost:9200/paintings
        let similarity = SimilaritySettings::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            elasticsearch,
            similarity,
            environment,
        })
    }
}
