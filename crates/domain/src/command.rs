//! Command — the dispatch table from inbound channel messages to actions.
//!
//! The session service delivers raw `(channel, value)` pairs; this module is
//! the single place that decides what each pair means to the control loop.

use crate::channel::{Channel, RelayChannel};
use crate::relay::RelayState;
use crate::value::ChannelValue;

/// One raw inbound message from the session service.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    /// Channel the value arrived on.
    pub channel: Channel,
    /// Payload value.
    pub value: ChannelValue,
}

impl InboundMessage {
    /// Convenience constructor.
    #[must_use]
    pub fn new(channel: Channel, value: ChannelValue) -> Self {
        Self { channel, value }
    }
}

/// A control action decoded from an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Drive one relay to the given state.
    SetRelay {
        relay: RelayChannel,
        state: RelayState,
    },
    /// Force every relay off and clear the trigger flag.
    EmergencyAllOff,
    /// Run a sensor read/publish cycle immediately.
    Refresh,
    /// Restart the process unconditionally.
    Restart,
}

impl Command {
    /// Decode an inbound message, or `None` when it carries no action.
    ///
    /// One-shot channels are edge-triggered: a falsy value (including the
    /// loop's own clear republish) decodes to no command. Messages on
    /// outbound-only channels are ignored.
    #[must_use]
    pub fn decode(message: &InboundMessage) -> Option<Self> {
        match message.channel {
            Channel::Relay(relay) => message
                .value
                .as_switch()
                .map(|state| Self::SetRelay { relay, state }),
            Channel::EmergencyIn if message.value.is_asserted() => Some(Self::EmergencyAllOff),
            Channel::RefreshIn if message.value.is_asserted() => Some(Self::Refresh),
            Channel::ResetIn if message.value.is_asserted() => Some(Self::Restart),
            _ => None,
        }
    }
}
