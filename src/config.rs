use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::model::Credentials;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub admin: AdminConfig,
    pub seed: SeedOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Staging,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Environment::Dev => write!(f, "dev"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub environment: Environment,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedOptions {
    /// Password given to the generated merchant user.
    pub merchant_password: String,
    /// Issue the tax-rate and modifier-set creations concurrently.
    pub parallel_taxonomy: bool,
    /// Seed an in-memory backend instead of the remote API.
    pub dry_run: bool,
    /// Fixed seed for the identity generator.
    pub rng_seed: Option<u64>,
    /// Where to write the run outcome as JSON.
    pub output_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            admin: AdminConfig::default(),
            seed: SeedOptions::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Dev,
            base_url: None,
            timeout_secs: 30,
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
        }
    }
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            merchant_password: "o".to_string(),
            parallel_taxonomy: false,
            dry_run: false,
            rng_seed: None,
            output_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional `pt-seed` config file and
    /// `PTSEED_` environment variables (`__` separates nested keys).
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        config = config.add_source(config::File::with_name("pt-seed").required(false));

        config = config.add_source(
            config::Environment::with_prefix("PTSEED")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// Administrator credentials for merchant creation. A dry run accepts
    /// missing credentials.
    pub fn admin_credentials(&self) -> anyhow::Result<Credentials> {
        match (&self.admin.username, &self.admin.password) {
            (Some(username), Some(password)) => Ok(Credentials::new(username, password)),
            _ if self.seed.dry_run => Ok(Credentials::new("dry-run-admin", "")),
            (None, _) => Err(anyhow!("admin.username is not set (PTSEED_ADMIN__USERNAME)")),
            (_, None) => Err(anyhow!("admin.password is not set (PTSEED_ADMIN__PASSWORD)")),
        }
    }
}

impl ApiConfig {
    /// The API root for the selected environment.
    pub fn base_url(&self) -> anyhow::Result<String> {
        if let Some(base_url) = &self.base_url {
            return Ok(base_url.clone());
        }

        match self.environment {
            // Default for local development
            Environment::Dev => Ok("http://localhost:8080".to_string()),
            other => Err(anyhow!(
                "no api.base_url configured for the {} environment (PTSEED_API__BASE_URL)",
                other
            )),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
