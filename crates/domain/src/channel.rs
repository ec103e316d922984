//! Channel — a named logical I/O point exchanged with the session service.
//!
//! The identifiers are stable across the system: adapters map them to
//! whatever addressing their transport uses (MQTT topics, virtual pins, …).

use std::fmt;
use std::str::FromStr;

/// A controllable relay output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayChannel {
    /// Fan relay, driven by the temperature automation.
    Fan,
    /// Light relay.
    Led,
    /// Charger relay.
    Charger,
    /// Auxiliary relay.
    Aux,
}

impl RelayChannel {
    /// Every relay, in driver order.
    pub const ALL: [Self; 4] = [Self::Fan, Self::Led, Self::Charger, Self::Aux];

    /// The in/out channel carrying this relay's switch state.
    #[must_use]
    pub fn channel(self) -> Channel {
        Channel::Relay(self)
    }

    /// The free-form status channel paired with this relay.
    #[must_use]
    pub fn status_channel(self) -> Channel {
        Channel::Status(match self {
            Self::Fan => StatusChannel::Fan,
            Self::Led => StatusChannel::Led,
            Self::Charger => StatusChannel::Charger,
            Self::Aux => StatusChannel::Aux,
        })
    }

    /// Human-readable label used in status notices.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Fan => "Fan",
            Self::Led => "Led",
            Self::Charger => "Charger",
            Self::Aux => "Aux",
        }
    }
}

/// A free-form status-text channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusChannel {
    Fan,
    Led,
    Charger,
    Aux,
    /// Automation evaluator notices ("High Temp", "Cool Temp", sensor faults).
    Automation,
    /// Periodic connectivity notices ("Online" / "Disconnected").
    Connectivity,
    /// Emergency all-off notices.
    Emergency,
    /// Process lifecycle notices.
    Online,
}

/// A named logical I/O point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Latest temperature sample, °C.
    TemperatureOut,
    /// Latest humidity sample, %.
    HumidityOut,
    /// Simulated battery percentage.
    BatteryOut,
    /// Relay switch state, inbound command and outbound echo.
    Relay(RelayChannel),
    /// One-shot emergency all-off trigger.
    EmergencyIn,
    /// One-shot manual sensor refresh trigger.
    RefreshIn,
    /// One-shot process restart trigger.
    ResetIn,
    /// Free-form status text.
    Status(StatusChannel),
}

impl Channel {
    /// Every channel the controller accepts inbound messages on.
    pub const COMMAND_CHANNELS: [Self; 7] = [
        Self::Relay(RelayChannel::Fan),
        Self::Relay(RelayChannel::Led),
        Self::Relay(RelayChannel::Charger),
        Self::Relay(RelayChannel::Aux),
        Self::EmergencyIn,
        Self::RefreshIn,
        Self::ResetIn,
    ];

    /// Stable kebab-case identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TemperatureOut => "temperature-out",
            Self::HumidityOut => "humidity-out",
            Self::BatteryOut => "battery-out",
            Self::Relay(RelayChannel::Fan) => "fan-inout",
            Self::Relay(RelayChannel::Led) => "led-inout",
            Self::Relay(RelayChannel::Charger) => "charger-inout",
            Self::Relay(RelayChannel::Aux) => "aux-inout",
            Self::EmergencyIn => "emergency-in",
            Self::RefreshIn => "refresh-in",
            Self::ResetIn => "reset-in",
            Self::Status(StatusChannel::Fan) => "fan-status",
            Self::Status(StatusChannel::Led) => "led-status",
            Self::Status(StatusChannel::Charger) => "charger-status",
            Self::Status(StatusChannel::Aux) => "aux-status",
            Self::Status(StatusChannel::Automation) => "automation-status",
            Self::Status(StatusChannel::Connectivity) => "connectivity-status",
            Self::Status(StatusChannel::Emergency) => "emergency-status",
            Self::Status(StatusChannel::Online) => "online-status",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised channel identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown channel identifier: {0}")]
pub struct UnknownChannel(pub String);

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temperature-out" => Ok(Self::TemperatureOut),
            "humidity-out" => Ok(Self::HumidityOut),
            "battery-out" => Ok(Self::BatteryOut),
            "fan-inout" => Ok(Self::Relay(RelayChannel::Fan)),
            "led-inout" => Ok(Self::Relay(RelayChannel::Led)),
            "charger-inout" => Ok(Self::Relay(RelayChannel::Charger)),
            "aux-inout" => Ok(Self::Relay(RelayChannel::Aux)),
            "emergency-in" => Ok(Self::EmergencyIn),
            "refresh-in" => Ok(Self::RefreshIn),
            "reset-in" => Ok(Self::ResetIn),
            "fan-status" => Ok(Self::Status(StatusChannel::Fan)),
            "led-status" => Ok(Self::Status(StatusChannel::Led)),
            "charger-status" => Ok(Self::Status(StatusChannel::Charger)),
            "aux-status" => Ok(Self::Status(StatusChannel::Aux)),
            "automation-status" => Ok(Self::Status(StatusChannel::Automation)),
            "connectivity-status" => Ok(Self::Status(StatusChannel::Connectivity)),
            "emergency-status" => Ok(Self::Status(StatusChannel::Emergency)),
            "online-status" => Ok(Self::Status(StatusChannel::Online)),
            other => Err(UnknownChannel(other.to_string())),
        }
    }
}
