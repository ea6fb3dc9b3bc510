use anyhow::Context;
use dotenv::dotenv;
use log::info;
use sqlx::sqlite::SqlitePool;

mod config;
mod db;
mod domain;
mod error;
mod server;
#[cfg(test)]
mod test_support;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;

    let pool = SqlitePool::connect(&config.database_url)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;
    db::schema::verify(&pool)
        .await
        .context("database does not match the declared schema")?;
    info!(
        "connected to {} (schema v{})",
        config.database_url,
        db::schema::SCHEMA_VERSION
    );

    server::run(pool.clone(), config.bind_address).await;

    info!("shutting down");
    pool.close().await;

    Ok(())
}
