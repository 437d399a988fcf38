//! Search gateway binary.

use clap::Parser;
use search_gateway::{create_app, init_logging, Dependencies, GatewayError, ServerConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), GatewayError> {
    dotenv::dotenv().ok();

    let config = ServerConfig::parse();
    init_logging(&config.log_level, config.log_format);

    let addr = config.socket_addr();
    let deps = Dependencies::new(config).inspect_err(|e| error!(error = %e, "Startup failed"))?;
    let app = create_app(deps.state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Search gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Search gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
