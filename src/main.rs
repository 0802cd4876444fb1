use anyhow::Context;
use pt_seed::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Info by default, quiet HTTP internals; RUST_LOG still applies on top
    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("reqwest", LevelFilter::Warn)
        .filter_module("hyper", LevelFilter::Warn)
        .parse_default_env()
        .init();

    println!("pt-seed: test merchant seeder");

    let config = AppConfig::load()?;
    if config.seed.dry_run {
        println!("Configuration loaded: dry run (in-memory backend)");
    } else {
        println!("Configuration loaded: environment={}", config.api.environment);
    }

    let outcome = pt_seed::run(&config).await.context("Seeding failed")?;

    println!("Seeded location {}", outcome.location_id);
    println!("username: {}", outcome.credentials.username);
    println!("password: {}", outcome.credentials.password);

    Ok(())
}
