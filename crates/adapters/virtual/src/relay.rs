//! Virtual relay bank — records digital writes instead of driving GPIO.

use std::sync::{Arc, Mutex};

use relayhub_app::ports::RelayDriver;
use relayhub_domain::channel::RelayChannel;
use relayhub_domain::relay::RelayState;

/// A simulated relay driver.
///
/// Every write is recorded; clones share the same log so tests can hand the
/// bank to the control loop and keep a handle for inspection.
#[derive(Clone, Default)]
pub struct VirtualRelayBank {
    writes: Arc<Mutex<Vec<(RelayChannel, RelayState)>>>,
}

impl VirtualRelayBank {
    /// Every write so far, in order.
    #[must_use]
    pub fn writes(&self) -> Vec<(RelayChannel, RelayState)> {
        self.writes.lock().expect("relay log poisoned").clone()
    }

    /// The most recent write to one relay, if any.
    #[must_use]
    pub fn last(&self, relay: RelayChannel) -> Option<RelayState> {
        self.writes()
            .into_iter()
            .rev()
            .find(|(ch, _)| *ch == relay)
            .map(|(_, state)| state)
    }
}

impl RelayDriver for VirtualRelayBank {
    fn set(&mut self, relay: RelayChannel, state: RelayState) {
        self.writes
            .lock()
            .expect("relay log poisoned")
            .push((relay, state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_record_writes_in_order() {
        let mut bank = VirtualRelayBank::default();
        bank.set(RelayChannel::Fan, RelayState::On);
        bank.set(RelayChannel::Led, RelayState::On);
        bank.set(RelayChannel::Fan, RelayState::Off);

        assert_eq!(
            bank.writes(),
            vec![
                (RelayChannel::Fan, RelayState::On),
                (RelayChannel::Led, RelayState::On),
                (RelayChannel::Fan, RelayState::Off),
            ]
        );
    }

    #[test]
    fn should_return_most_recent_write_per_relay() {
        let mut bank = VirtualRelayBank::default();
        bank.set(RelayChannel::Fan, RelayState::On);
        bank.set(RelayChannel::Fan, RelayState::Off);

        assert_eq!(bank.last(RelayChannel::Fan), Some(RelayState::Off));
        assert_eq!(bank.last(RelayChannel::Led), None);
    }

    #[test]
    fn should_share_log_between_clones() {
        let mut bank = VirtualRelayBank::default();
        let handle = bank.clone();
        bank.set(RelayChannel::Aux, RelayState::On);

        assert_eq!(handle.last(RelayChannel::Aux), Some(RelayState::On));
    }
}
