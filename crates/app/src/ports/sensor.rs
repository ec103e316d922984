//! Sensor reader port — one synchronous read per invocation.

use relayhub_domain::reading::{Reading, SensorFault};

/// Physical temperature/humidity sensor.
pub trait SensorReader: Send {
    /// Attempt one read.
    ///
    /// # Errors
    ///
    /// Returns [`SensorFault`] when the sensor reports an invalid numeric
    /// value. The caller skips publication for that cycle and keeps
    /// scheduling future attempts — no retry backoff, no fault counter.
    fn read(&mut self) -> Result<Reading, SensorFault>;
}
