//! Relay state — the logical on/off position of each controllable relay.

use serde::{Deserialize, Serialize};

use crate::channel::RelayChannel;

/// Logical switch position of a relay.
///
/// Defaults to [`Off`](Self::Off): every relay is cleared on process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayState {
    On,
    #[default]
    Off,
}

impl RelayState {
    /// Whether the relay is asserted.
    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// The `0`/`1` switch value the session protocol uses.
    #[must_use]
    pub fn as_switch(self) -> i64 {
        match self {
            Self::On => 1,
            Self::Off => 0,
        }
    }

    /// Interpret a switch value: zero is off, anything else is on.
    #[must_use]
    pub fn from_switch(value: i64) -> Self {
        if value == 0 { Self::Off } else { Self::On }
    }
}

impl std::fmt::Display for RelayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// The full set of relay channel states.
///
/// This is in-memory only: there is no persistence, and a fresh bank starts
/// with every relay off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelayBank {
    states: [RelayState; RelayChannel::ALL.len()],
}

impl RelayBank {
    /// Current state of one relay.
    #[must_use]
    pub fn get(&self, relay: RelayChannel) -> RelayState {
        self.states[Self::index(relay)]
    }

    /// Record a new state for one relay.
    pub fn set(&mut self, relay: RelayChannel, state: RelayState) {
        self.states[Self::index(relay)] = state;
    }

    /// Force every relay off.
    pub fn all_off(&mut self) {
        self.states = [RelayState::Off; RelayChannel::ALL.len()];
    }

    /// Iterate over every relay and its current state.
    pub fn iter(&self) -> impl Iterator<Item = (RelayChannel, RelayState)> + '_ {
        RelayChannel::ALL
            .into_iter()
            .map(|relay| (relay, self.get(relay)))
    }

    fn index(relay: RelayChannel) -> usize {
        match relay {
            RelayChannel::Fan => 0,
            RelayChannel::Led => 1,
            RelayChannel::Charger => 2,
            RelayChannel::Aux => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_off() {
        assert_eq!(RelayState::default(), RelayState::Off);
        let bank = RelayBank::default();
        for (_, state) in bank.iter() {
            assert_eq!(state, RelayState::Off);
        }
    }

    #[test]
    fn should_map_states_to_switch_values() {
        assert_eq!(RelayState::On.as_switch(), 1);
        assert_eq!(RelayState::Off.as_switch(), 0);
    }

    #[test]
    fn should_treat_any_nonzero_switch_value_as_on() {
        assert_eq!(RelayState::from_switch(0), RelayState::Off);
        assert_eq!(RelayState::from_switch(1), RelayState::On);
        assert_eq!(RelayState::from_switch(255), RelayState::On);
    }

    #[test]
    fn should_store_state_per_relay() {
        let mut bank = RelayBank::default();
        bank.set(RelayChannel::Fan, RelayState::On);
        assert_eq!(bank.get(RelayChannel::Fan), RelayState::On);
        assert_eq!(bank.get(RelayChannel::Led), RelayState::Off);
    }

    #[test]
    fn should_clear_every_relay_on_all_off() {
        let mut bank = RelayBank::default();
        bank.set(RelayChannel::Fan, RelayState::On);
        bank.set(RelayChannel::Charger, RelayState::On);

        bank.all_off();
        for (_, state) in bank.iter() {
            assert_eq!(state, RelayState::Off);
        }
    }

    #[test]
    fn should_keep_clear_bank_clear_on_all_off() {
        let mut bank = RelayBank::default();
        bank.all_off();
        for (_, state) in bank.iter() {
            assert_eq!(state, RelayState::Off);
        }
    }

    #[test]
    fn should_display_lowercase_state_names() {
        assert_eq!(RelayState::On.to_string(), "on");
        assert_eq!(RelayState::Off.to_string(), "off");
    }

    #[test]
    fn should_roundtrip_state_through_serde_json() {
        let json = serde_json::to_string(&RelayState::On).unwrap();
        assert_eq!(json, "\"on\"");
        let parsed: RelayState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, RelayState::On);
    }
}
