pub mod schema;

pub use schema::{
    Config, CooldownConfig, CorruptStatePolicy, DestinationConfig, GatewayConfig, IngestConfig,
    UpstreamConfig,
};
