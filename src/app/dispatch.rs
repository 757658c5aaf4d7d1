use crate::app::status::render_status;
use crate::cli::commands::{
    CensorCommands, Cli, Commands, DestinationCommands, StreamCommands,
};
use anyhow::{Result, bail};
use chrono::Utc;
use delaygate::Config;
use delaygate::destination::SecretUpdate;
use delaygate::panel::{CensorOutcome, ControlPanel, StreamOutcome};
use tracing::info;

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            let (host, port) = config.gateway.bind_target(host, port);
            if port == 0 {
                info!("Starting control panel on {host} (random port)");
            } else {
                info!("Starting control panel on {host}:{port}");
            }
            delaygate::gateway::run_gateway(&host, port, &config).await
        }

        Commands::Status { json } => {
            let view = ControlPanel::from_config(&config).view(Utc::now()).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("{}", render_status(&config, &view));
            }
            Ok(())
        }

        Commands::Censor { censor_command } => {
            let on = censor_command == CensorCommands::On;
            let outcome = ControlPanel::from_config(&config)
                .set_censorship(on, Utc::now())
                .await;
            report_censor(&outcome)
        }

        Commands::Stream { stream_command } => {
            let running = stream_command == StreamCommands::Start;
            let outcome = ControlPanel::from_config(&config)
                .set_stream_running(running)
                .await;
            report_stream(&outcome)
        }

        Commands::Destination {
            destination_command,
        } => {
            let panel = ControlPanel::from_config(&config);
            match destination_command {
                DestinationCommands::Set { key } => {
                    report_destination(&panel.set_destination_secret(&key).await?);
                }
                DestinationCommands::Clear => {
                    report_destination(&panel.set_destination_secret("").await?);
                }
                DestinationCommands::Show => {
                    let destination = panel.destination();
                    if destination.is_configured() {
                        println!("Destination: configured ({})", destination.masked_secret());
                    } else {
                        println!("Destination: not configured");
                    }
                }
            }
            Ok(())
        }
    }
}

fn report_censor(outcome: &CensorOutcome) -> Result<()> {
    match outcome {
        CensorOutcome::Applied { censored } => {
            println!("Censorship {}", if *censored { "ON" } else { "OFF" });
            Ok(())
        }
        CensorOutcome::Locked { window } => bail!(
            "Censorship toggle locked: {}s remaining ({}%)",
            window.seconds_remaining,
            window.progress_percent
        ),
        CensorOutcome::PatchFailed { error, .. } => {
            bail!("Toggle recorded but the delay engine refused it: {error}")
        }
        CensorOutcome::StoreFailed { error } => bail!("Could not record toggle: {error}"),
    }
}

fn report_stream(outcome: &StreamOutcome) -> Result<()> {
    match outcome {
        StreamOutcome::Applied { running } => {
            println!("Stream {}", if *running { "started" } else { "stopped" });
            Ok(())
        }
        StreamOutcome::DestinationMissing => {
            bail!("No destination configured. Run `delaygate destination set <key>` first.")
        }
        StreamOutcome::PatchFailed { error, .. } => {
            bail!("Delay engine refused the stream change: {error}")
        }
    }
}

fn report_destination(update: &SecretUpdate) {
    if update.configured {
        println!("Destination saved ({})", update.masked_secret);
    } else {
        println!("Destination cleared");
    }
    if update.reload_pending {
        println!("Streaming service reload is still running");
    }
    if let Some(error) = &update.reload_error {
        eprintln!("Warning: streaming service reload failed: {error}");
    }
}
