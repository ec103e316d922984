//! # relayhubd — relayhub daemon
//!
//! Composition root that wires the adapters into the control loop and runs it.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize tracing
//! - Construct the sensor, relay driver, and session client adapters
//! - Build the control loop, injecting adapters via port traits
//! - Drive the loop at the configured tick interval
//! - Handle graceful shutdown (SIGINT) and restart requests
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::time::Instant;

use relayhub_adapter_mqtt::MqttSession;
use relayhub_adapter_virtual::{VirtualRelayBank, VirtualSensor, VirtualSession};
use relayhub_app::control_loop::{ControlLoop, TickOutcome};
use relayhub_app::ports::SessionClient;

use crate::config::{Config, SessionMode};

/// Exit code a supervisor treats as "relaunch me". Anything else is a
/// normal stop or a failure.
const RESTART_EXIT_CODE: i32 = 3;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    let sensor = VirtualSensor::wandering(
        config.simulation.temp_low,
        config.simulation.temp_high,
        config.simulation.temp_step,
    );
    let relays = VirtualRelayBank::default();

    match config.session.mode {
        SessionMode::Virtual => {
            tracing::info!("starting with in-memory session");
            run(VirtualSession::default(), sensor, relays, &config).await
        }
        SessionMode::Mqtt => {
            tracing::info!(
                host = %config.mqtt.broker_host,
                port = config.mqtt.broker_port,
                base_topic = %config.mqtt.base_topic,
                "starting with MQTT session"
            );
            let session = MqttSession::connect(&config.mqtt);
            run(session, sensor, relays, &config).await
        }
    }
}

/// Drive the control loop until shutdown or a restart request.
async fn run<S: SessionClient>(
    session: S,
    sensor: VirtualSensor,
    relays: VirtualRelayBank,
    config: &Config,
) -> anyhow::Result<()> {
    let mut control = ControlLoop::new(config.loop_settings()?, session, sensor, relays);
    control.start().await?;
    tracing::info!("controller started");

    let tick = config.tick_interval();
    loop {
        tokio::select! {
            () = tokio::time::sleep(tick) => {
                match control.tick(Instant::now()).await {
                    Ok(TickOutcome::Continue) => {}
                    Ok(TickOutcome::Restart) => {
                        tracing::warn!("restart requested, exiting for supervisor relaunch");
                        std::process::exit(RESTART_EXIT_CODE);
                    }
                    // The session adapter owns reconnection; a failed publish
                    // is not fatal to the loop.
                    Err(err) => tracing::error!(%err, "tick failed"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown signal received");
                return Ok(());
            }
        }
    }
}
