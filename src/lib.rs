//! Kitesurf forecast gateway.
//!
//! Relays the Open-Meteo Marine forecast and NOAA tide predictions, reshaped
//! into a flat JSON schema for tool-calling clients. The same adapters are
//! served as HTTP routes ([`http`]) and as MCP tools ([`service`]).

pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod http;
pub mod models;
pub mod query;
pub mod service;

pub use error::GatewayError;
pub use service::KitesurfService;
