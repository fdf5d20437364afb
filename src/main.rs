use std::sync::Arc;
use reqwest::Client;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use url_summarizer::{
    config::Config,
    api::routes::create_router,
    llm::{BedrockClient, ModelInvoker},
    scraper::PageFetcher,
    summary::Summarizer,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;

    // One client for the whole process, shared by the fetcher and the model backend
    let client = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let backend = BedrockClient::new(
        client.clone(),
        config.bedrock_endpoint.clone(),
        config.bedrock_api_key.clone(),
    );
    let invoker = ModelInvoker::new(Arc::new(backend), config.model_id.clone());
    tracing::info!(
        model_id = invoker.model_id(),
        region = %config.region,
        endpoint = %config.bedrock_endpoint,
        "model backend configured"
    );
    let summarizer = Summarizer::new(PageFetcher::new(client), invoker);

    // Create application state
    let app_state = AppState {
        config: Arc::new(config),
        summarizer: Arc::new(summarizer),
    };

    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;

    tracing::info!(%server_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
