//! # relayhub-adapter-mqtt
//!
//! MQTT-backed session client — bridges relayhub channels to MQTT topics.
//!
//! ## Topic layout
//!
//! | Direction | Topic | Payload |
//! |-----------|-------|---------|
//! | Outbound state/telemetry | `<base>/<channel>` | plain value text |
//! | Inbound commands | `<base>/<channel>/set` | plain value text |
//!
//! Commands arrive only on `/set` topics, so the controller's own state
//! echoes never loop back as commands. The rumqttc event loop runs in a
//! background task; it tracks connectivity and queues inbound publishes for
//! the control loop's pump. Reconnection is owned entirely by this adapter:
//! sessions are clean, the broker forgets subscriptions on every reconnect,
//! so the command topics are re-subscribed on each `ConnAck`.
//!
//! ## Dependency rule
//! Depends on `relayhub-app` (port traits) and `relayhub-domain` only.

mod config;
mod error;

pub use config::MqttConfig;
pub use error::MqttError;

use std::collections::VecDeque;
use std::future::Future;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};

use relayhub_app::ports::SessionClient;
use relayhub_domain::channel::Channel;
use relayhub_domain::command::InboundMessage;
use relayhub_domain::error::RelayHubError;
use relayhub_domain::value::ChannelValue;

/// Session client backed by an MQTT broker.
pub struct MqttSession {
    client: AsyncClient,
    base_topic: String,
    inbound: Arc<Mutex<VecDeque<InboundMessage>>>,
    connected: Arc<AtomicBool>,
}

impl MqttSession {
    /// Open the session: spawn the event-loop task that connects to the
    /// broker, subscribes to every command topic on each `ConnAck`, and
    /// queues decoded inbound publishes.
    ///
    /// The returned session is usable immediately; requests issued before
    /// the broker acknowledges the connection are queued by the client.
    #[must_use]
    pub fn connect(config: &MqttConfig) -> Self {
        let mut options = MqttOptions::new(
            &config.client_id,
            &config.broker_host,
            config.broker_port,
        );
        options.set_keep_alive(Duration::from_secs(u64::from(config.keep_alive_secs)));

        let (client, mut event_loop) = AsyncClient::new(options, 64);
        let inbound: Arc<Mutex<VecDeque<InboundMessage>>> = Arc::default();
        let connected = Arc::new(AtomicBool::new(false));
        let session = Self {
            client: client.clone(),
            base_topic: config.base_topic.clone(),
            inbound: Arc::clone(&inbound),
            connected: Arc::clone(&connected),
        };

        let base = config.base_topic.clone();
        let topics = command_topics(&base);
        tokio::spawn(async move {
            loop {
                match event_loop.poll().await {
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        tracing::info!("MQTT session connected");
                        for topic in &topics {
                            if let Err(err) =
                                client.subscribe(topic.clone(), QoS::AtLeastOnce).await
                            {
                                tracing::warn!(%err, topic = %topic, "subscribe failed");
                            }
                        }
                        connected.store(true, Ordering::SeqCst);
                    }
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        let payload = String::from_utf8_lossy(&publish.payload);
                        match decode_command(&base, &publish.topic, &payload) {
                            Some(message) => {
                                inbound
                                    .lock()
                                    .expect("inbound queue poisoned")
                                    .push_back(message);
                            }
                            None => {
                                tracing::debug!(topic = %publish.topic, "ignoring non-command publish");
                            }
                        }
                    }
                    Ok(_) => {}
                    Err(err) => {
                        connected.store(false, Ordering::SeqCst);
                        tracing::warn!(%err, "MQTT event loop error, retrying");
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                }
            }
        });

        session
    }
}

impl SessionClient for MqttSession {
    fn publish(
        &self,
        channel: Channel,
        value: ChannelValue,
    ) -> impl Future<Output = Result<(), RelayHubError>> + Send {
        let client = self.client.clone();
        let topic = state_topic(&self.base_topic, channel);
        let payload = value.to_string();
        async move {
            client
                .publish(topic, QoS::AtLeastOnce, false, payload)
                .await
                .map_err(|err| MqttError::from(err).into_domain())
        }
    }

    fn pump(&self) -> impl Future<Output = Result<Vec<InboundMessage>, RelayHubError>> + Send {
        let drained: Vec<_> = self
            .inbound
            .lock()
            .expect("inbound queue poisoned")
            .drain(..)
            .collect();
        async { Ok(drained) }
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

/// Outbound topic for a channel's state or telemetry.
fn state_topic(base: &str, channel: Channel) -> String {
    format!("{base}/{channel}")
}

/// Inbound topic commands for a channel arrive on.
fn command_topic(base: &str, channel: Channel) -> String {
    format!("{base}/{channel}/set")
}

/// Every topic the session must hold a subscription for.
fn command_topics(base: &str) -> Vec<String> {
    Channel::COMMAND_CHANNELS
        .into_iter()
        .map(|channel| command_topic(base, channel))
        .collect()
}

/// Decode a broker publish into an inbound message, or `None` when the topic
/// is not one of our command topics.
fn decode_command(base: &str, topic: &str, payload: &str) -> Option<InboundMessage> {
    let name = topic
        .strip_prefix(base)?
        .strip_prefix('/')?
        .strip_suffix("/set")?;
    let channel = Channel::from_str(name).ok()?;
    if !Channel::COMMAND_CHANNELS.contains(&channel) {
        return None;
    }
    Some(InboundMessage::new(channel, ChannelValue::parse(payload)))
}
