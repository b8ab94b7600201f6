//! Command-line and environment configuration.

use clap::{Parser, ValueEnum};

use crate::constants::{NOAA_DATAGETTER_URL, OPEN_METEO_MARINE_URL};

/// Inbound transport the gateway serves on
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// JSON routes over HTTP
    Http,
    /// MCP tools over stdin/stdout
    Stdio,
}

/// Kitesurf forecast gateway
#[derive(Parser, Debug, Clone)]
#[command(name = "kitesurf-forecast-mcp")]
#[command(about = "Marine forecast and tide prediction gateway for tool-calling clients")]
pub struct Args {
    /// Inbound transport
    #[arg(long, value_enum, default_value = "http", env = "KITESURF_TRANSPORT")]
    pub transport: Transport,

    /// Listen address for the HTTP transport
    #[arg(short, long, default_value = "0.0.0.0:3000", env = "KITESURF_LISTEN_ADDR")]
    pub listen: String,

    #[command(flatten)]
    pub endpoints: UpstreamEndpoints,
}

/// Provider endpoints the adapters call
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct UpstreamEndpoints {
    /// Open-Meteo Marine forecast endpoint
    #[arg(long, default_value = OPEN_METEO_MARINE_URL, env = "KITESURF_MARINE_API_URL")]
    pub marine_api_url: String,

    /// NOAA CO-OPS data getter endpoint
    #[arg(long, default_value = NOAA_DATAGETTER_URL, env = "KITESURF_TIDES_API_URL")]
    pub tides_api_url: String,
}

impl Default for UpstreamEndpoints {
    fn default() -> Self {
        Self {
            marine_api_url: OPEN_METEO_MARINE_URL.to_string(),
            tides_api_url: NOAA_DATAGETTER_URL.to_string(),
        }
    }
}
