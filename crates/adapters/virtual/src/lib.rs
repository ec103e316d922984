//! # relayhub-adapter-virtual
//!
//! Virtual/demo adapter that provides simulated port implementations for
//! testing and demonstration purposes.
//!
//! ## Provided implementations
//!
//! | Type | Port | Behaviour |
//! |------|------|-----------|
//! | [`VirtualSensor`] | `SensorReader` | Scripted readings, injectable faults, optional wandering demo profile |
//! | [`VirtualRelayBank`] | `RelayDriver` | Records every write; shared inspection handle |
//! | [`VirtualSession`] | `SessionClient` | Records publishes, queued inbound injection, settable connectivity |
//!
//! ## Dependency rule
//!
//! Depends on `relayhub-app` (port traits) and `relayhub-domain` only.

mod relay;
mod sensor;
mod session;

pub use relay::VirtualRelayBank;
pub use sensor::VirtualSensor;
pub use session::VirtualSession;
