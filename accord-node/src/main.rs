use accord_node::cli::Args;
use accord_node::{build_runtime, Config};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> accord_common::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::resolve(&args)?;
    info!(
        "accord node starting, {} peers provided",
        config.peers.len()
    );

    let runtime = build_runtime(config).await?;
    info!("accord node listening at http://{}", runtime.addr);

    runtime.wait().await
}
