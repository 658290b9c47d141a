use clap::Parser;
use relay_server::{ServerArgs, ServerConfig, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_args(ServerArgs::parse())?;
    telemetry::init_tracing(&config.log_level);

    relay_server::run(config).await
}
