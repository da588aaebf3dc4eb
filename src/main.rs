use tokio::net::TcpListener;
use tracing::{info, warn};
use text_summarizer::{
    config::Config,
    api::routes::create_router,
    logging,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    logging::init(config.log_format);

    let server_addr = config.server_addr;
    if !config.provider.is_configured() {
        warn!("OPENAI_API_KEY is not set, summaries will be placeholders");
    }
    info!(model = %config.provider.model, "Starting server on {}", server_addr);

    let app = create_router(AppState::new(config));

    let listener = TcpListener::bind(server_addr).await?;
    info!("Listening on {}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
