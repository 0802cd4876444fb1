pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod seed;

pub use client::{CommerceApi, HttpClient, InMemoryBackend};
pub use config::{AppConfig, SeedOptions};
pub use error::SeedError;
pub use model::*;
pub use seed::{SeedLedger, SeedOutcome, Seeder, Stage};

use anyhow::Context;

/// Seed one tenant as described by `config` and return the outcome.
pub async fn run(config: &AppConfig) -> anyhow::Result<SeedOutcome> {
    let admin = config.admin_credentials()?;

    let outcome = if config.seed.dry_run {
        log::info!("dry run: seeding an in-memory backend");
        let backend = InMemoryBackend::new();
        seed::seed(&backend, &admin, &config.seed).await?
    } else {
        let base_url = config.api.base_url()?;
        log::info!("seeding the {} environment at {}", config.api.environment, base_url);
        let client = HttpClient::new(base_url, config.api.timeout())
            .context("Failed to build the API client")?;
        seed::seed(&client, &admin, &config.seed).await?
    };

    if let Some(path) = &config.seed.output_path {
        write_outcome(&outcome, path)?;
    }

    Ok(outcome)
}

pub fn write_outcome(outcome: &SeedOutcome, path: &str) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(outcome)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write seed outcome to {}", path))?;
    log::info!("seed outcome written to {}", path);
    Ok(())
}
