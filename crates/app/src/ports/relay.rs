//! Relay driver port — fire-and-forget digital writes.

use relayhub_domain::channel::RelayChannel;
use relayhub_domain::relay::RelayState;

/// Physical relay output lines.
///
/// A pure digital-write abstraction: no read-back, no debounce, no fault
/// detection. `set` returns immediately.
pub trait RelayDriver: Send {
    /// Drive one relay's output line.
    fn set(&mut self, relay: RelayChannel, state: RelayState);
}
