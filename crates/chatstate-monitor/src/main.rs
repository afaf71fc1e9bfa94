//! Chat-state monitor entry point
//!
//! Run with:
//! ```bash
//! cargo run -p chatstate-monitor
//! ```
//!
//! Conversation events are read from stdin, one command per line (see `commands`).
//! Chat-state notifications are written to the log. Configuration is loaded from
//! environment variables.

mod commands;
mod input;

use std::sync::Arc;

use chatstate_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};
use chatstate_registry::ChatStateRegistry;
use chatstate_service::{ChatStateService, IdleMonitor, LoggingNotifier};
use commands::Command;
use tokio::sync::watch;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = try_init_tracing();
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    let tracing_config = TracingConfig::from_settings(config.app.env, &config.logging);
    if let Err(e) = try_init_tracing_with_config(&tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, "Monitor failed");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        app = %config.app.name,
        env = ?config.app.env,
        poll_interval_ms = config.monitor.poll_interval_ms,
        "Configuration loaded"
    );

    let registry = ChatStateRegistry::new_shared();
    let service = Arc::new(ChatStateService::new(registry, Arc::new(LoggingNotifier)));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let monitor = IdleMonitor::from_config(service.clone(), &config.monitor).spawn(shutdown_rx);

    let mut lines = input::spawn_stdin_reader()?;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    info!("Input closed");
                    break;
                };
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => handle_command(&service, command).await,
                    Err(e) => warn!(error = %e, "Ignoring command"),
                }
            }
            signal = &mut ctrl_c => {
                signal?;
                info!("Shutdown signal received");
                break;
            }
        }
    }

    let _ = shutdown_tx.send(true);
    monitor.await?;

    // Tell supporting peers we are gone before exiting
    let recipients = service.registry().lock().recipients();
    for recipient in recipients {
        service.conversation_closed(&recipient).await;
    }

    Ok(())
}

async fn handle_command(service: &ChatStateService, command: Command) {
    match command {
        Command::Open {
            recipient,
            supports,
        } => service.conversation_opened(&recipient, supports),
        Command::Received {
            recipient,
            supports,
        } => service.incoming_message(&recipient, supports),
        Command::Input { recipient } => {
            service.user_input(&recipient).await;
        }
        Command::Sent { recipient } => service.message_sent(&recipient),
        Command::Close { recipient } => {
            service.conversation_closed(&recipient).await;
        }
        Command::Status => {
            let registry = service.registry().lock();
            let mut recipients = registry.recipients();
            recipients.sort();

            info!(tracked = recipients.len(), "Chat sessions");
            for recipient in recipients {
                info!(
                    recipient = %recipient,
                    state = ?registry.state(&recipient),
                    peer_supports = registry.get_peer_supports(&recipient),
                    notification_sent = registry.get_notification_sent(&recipient),
                    "Chat session"
                );
            }
        }
        Command::Quit => {}
    }
}
