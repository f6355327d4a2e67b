use std::sync::Arc;

use fit_coach::api::routes::create_routes;
use fit_coach::config::AppConfig;
use fit_coach::services::{OpenAiClient, PlanGenerationService};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    if config.openai.usable_api_key().is_none() {
        warn!("OPENAI_API_KEY is not set; plan requests will fail until it is configured");
    }

    let provider = OpenAiClient::new(config.openai.base_url.clone())?;
    let plan_generation_service = PlanGenerationService::new(config.openai.clone(), Arc::new(provider));

    // Create the application routes
    let app = create_routes(plan_generation_service);

    // Start the server
    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Fit Coach server starting on http://{}", address);
    info!("Plan endpoint available at http://{}/functions/v1/plan-week", address);

    axum::serve(listener, app).await?;

    Ok(())
}
