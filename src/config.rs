use std::env;
use std::net::SocketAddr;

use anyhow::Context;

const DEFAULT_DATABASE_URL: &str = "sqlite:hawaii.sqlite";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3030";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: SocketAddr,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let bind_address =
            env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_address = bind_address
            .parse()
            .with_context(|| format!("invalid bind address: {}", bind_address))?;

        Ok(Config {
            database_url,
            bind_address,
        })
    }
}
