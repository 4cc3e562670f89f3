//! jwtmint: issue and verify HS256 claim tokens over HTTP.
//! Used by: binary entrypoint.

use jwtmint::config::Config;
use jwtmint::{console, server, state};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    tracing::info!(?config, "starting jwtmint on {}", config.bind_addr);

    let state = state::build_state(&config);
    console::print_banner();
    console::print_startup(&config.bind_addr, &config.cookie_name);

    server::run(state, &config.bind_addr).await?;
    Ok(())
}
