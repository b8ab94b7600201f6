use anyhow::{Context, Result};
use clap::Parser;
use rmcp::ServiceExt;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kitesurf_forecast_mcp::config::{Args, Transport};
use kitesurf_forecast_mcp::{http, KitesurfService};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries MCP frames on the stdio transport, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kitesurf_forecast_mcp=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let service = KitesurfService::new(args.endpoints.clone())?;

    match args.transport {
        Transport::Http => serve_http(service, &args.listen).await?,
        Transport::Stdio => serve_stdio(service).await?,
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn serve_http(service: KitesurfService, listen: &str) -> Result<()> {
    let addr: SocketAddr = listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", listen))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Starting kitesurf forecast gateway on http://{}", addr);
    axum::serve(listener, http::router(service)).await?;
    Ok(())
}

async fn serve_stdio(service: KitesurfService) -> Result<()> {
    tracing::info!("Starting kitesurf forecast MCP server on stdio");

    let server = service.serve(rmcp::transport::stdio()).await?;
    server.waiting().await?;
    Ok(())
}
