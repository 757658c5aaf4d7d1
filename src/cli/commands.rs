use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `delaygate` - control panel for a delayed live stream.
#[derive(Parser, Debug)]
#[command(name = "delaygate")]
#[command(version)]
#[command(about = "Cooldown-gated censorship and stream control for a delay engine.", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.delaygate/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP control panel
    Serve {
        /// Port to listen on (use 0 for random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Show stream, censorship, lock and destination state
    Status {
        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Turn censorship on or off (subject to the toggle cooldown)
    Censor {
        #[command(subcommand)]
        censor_command: CensorCommands,
    },

    /// Start or stop the outgoing stream
    Stream {
        #[command(subcommand)]
        stream_command: StreamCommands,
    },

    /// Manage the outgoing stream destination
    Destination {
        #[command(subcommand)]
        destination_command: DestinationCommands,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CensorCommands {
    On,
    Off,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamCommands {
    Start,
    Stop,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DestinationCommands {
    /// Store a new stream key and reload the streaming service
    Set {
        /// Stream key appended to the configured base URI
        key: String,
    },
    /// Remove the stream key (stream start is refused afterwards)
    Clear,
    /// Show the masked stream key
    Show,
}
