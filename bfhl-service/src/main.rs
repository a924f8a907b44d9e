use bfhl_service::config::BfhlConfig;
use bfhl_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = BfhlConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        "bfhl-service",
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    );

    tracing::info!("GET  /health");
    tracing::info!("POST /bfhl (fibonacci | prime | lcm | hcf | AI)");

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
