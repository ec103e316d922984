//! Session client port — the externally-owned cloud bridge.
//!
//! The session client maintains the connection to the remote
//! control/telemetry service, delivers inbound command messages and accepts
//! outbound state updates. Connection establishment and reconnection are
//! owned entirely by the adapter; the control loop only detects a lost
//! connection through [`is_connected`](SessionClient::is_connected) at its
//! health-check cadence.

use std::future::Future;

use relayhub_domain::channel::Channel;
use relayhub_domain::command::InboundMessage;
use relayhub_domain::error::RelayHubError;
use relayhub_domain::value::ChannelValue;

/// Connection to the remote control/telemetry service.
pub trait SessionClient: Send + Sync {
    /// Publish an outbound value on a channel.
    fn publish(
        &self,
        channel: Channel,
        value: ChannelValue,
    ) -> impl Future<Output = Result<(), RelayHubError>> + Send;

    /// Drain every inbound message queued since the last pump.
    ///
    /// Non-blocking by contract: returns an empty vec when nothing arrived.
    fn pump(&self) -> impl Future<Output = Result<Vec<InboundMessage>, RelayHubError>> + Send;

    /// Whether the session currently holds a live connection.
    fn is_connected(&self) -> bool;
}
