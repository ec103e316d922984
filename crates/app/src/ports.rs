//! Ports — IO boundaries expressed as traits.
//!
//! Adapters implement these; the control loop only ever sees the traits.

pub mod relay;
pub mod sensor;
pub mod session;

pub use relay::RelayDriver;
pub use sensor::SensorReader;
pub use session::SessionClient;
