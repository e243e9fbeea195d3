use std::net::SocketAddr;

use clap::Parser;
use tracing::info;

use neo_intercept::cli::Args;
use neo_intercept::config::Config;
use neo_intercept::http::{create_router, AppState};
use neo_intercept::neo::NeoClient;
use neo_intercept::pipeline::Pipeline;
use neo_intercept::{log, provider};

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log::init(&args.log_level);

    let cfg = Config::from_args(&args);
    info!(
        provider = ?cfg.provider,
        model = %cfg.model,
        nasa_key_configured = cfg.nasa_api_key.is_some(),
        ai_available = cfg.ai_available(),
        "starting neo-intercept"
    );

    // One HTTP client for the whole process; per-call timeouts are set by each user.
    let client = reqwest::Client::builder().build()?;
    let provider = provider::make_provider(&cfg, client.clone());
    let pipeline = Pipeline::new(provider, cfg.narrative_fallback);
    let neo = NeoClient::new(client, &cfg);

    let app = create_router(AppState::new(pipeline, neo, &cfg));

    let addr: SocketAddr = cfg.bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
