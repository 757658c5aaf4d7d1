mod cooldown;
mod core;
mod destination;
mod gateway;
mod ingest;
mod upstream;

pub use cooldown::{CooldownConfig, CorruptStatePolicy};
pub use core::Config;
pub use destination::DestinationConfig;
pub use gateway::GatewayConfig;
pub use ingest::IngestConfig;
pub use upstream::UpstreamConfig;
