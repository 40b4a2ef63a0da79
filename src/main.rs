use anyhow::Context;
use catalog::config::AppConfig;
use catalog::{Server, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init(&config.logging);

    let addr = config.server.socket_addr().context("invalid server address")?;
    tracing::info!(demo = %config.demo, "starting");

    Server::bind(addr)
        .serve(config.demo.router())
        .await
        .context("server error")
}
