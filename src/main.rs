use clap::Parser; // for cli
use std::sync::Arc;

use chat_gateway::config::Args;
use chat_gateway::rate_limit::window_sweeper;
use chat_gateway::state::AppState;
use chat_gateway::{RateLimiter, UpstreamClient, app, logger};

// this is main async function with tokio
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_tracing();

    // parse cli arguments
    let args = Args::parse();

    let upstream = UpstreamClient::new(
        &args.upstream_url,
        &args.model,
        args.api_key.clone(),
        args.upstream_timeout(),
    )?;
    if !upstream.has_api_key() {
        tracing::error!("GEMINI_API_KEY not configured, chat requests will fail with 500");
    }

    let rate_limiter = RateLimiter::new(args.rate_limit, args.rate_window());
    let state = Arc::new(AppState::new(upstream, rate_limiter));

    // spawn the background sweeper
    if let Some(sweep_interval) = args.sweep_interval() {
        let rate_limiter = Arc::clone(&state.rate_limiter);
        tokio::spawn(async move {
            window_sweeper(rate_limiter, sweep_interval).await;
        });
    }

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        address = %listener.local_addr()?,
        upstream = %args.upstream_url,
        model = %args.model,
        rate_limit = args.rate_limit,
        rate_window_secs = args.rate_window,
        upstream_timeout_secs = args.upstream_timeout,
        "chat gateway running"
    );

    axum::serve(listener, app(state)).await?;
    Ok(())
}
