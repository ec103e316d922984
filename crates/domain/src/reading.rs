//! Reading — one validated temperature/humidity sample.
//!
//! A reading is produced by the sensor poller, overwrites the previous one,
//! and is never retained historically.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// UTC capture time attached to each sample.
pub type Timestamp = DateTime<Utc>;

/// A validated sensor sample.
///
/// Construction guarantees both values are finite numbers; a sensor that
/// returns NaN or infinity yields a [`SensorFault`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    temperature_c: f64,
    humidity_pct: f64,
    taken_at: Timestamp,
}

impl Reading {
    /// Validate raw sensor output into a reading with an explicit capture
    /// time.
    ///
    /// # Errors
    ///
    /// Returns [`SensorFault`] when either value is not a finite number.
    pub fn new(
        temperature_c: f64,
        humidity_pct: f64,
        taken_at: Timestamp,
    ) -> Result<Self, SensorFault> {
        if temperature_c.is_finite() && humidity_pct.is_finite() {
            Ok(Self {
                temperature_c,
                humidity_pct,
                taken_at,
            })
        } else {
            Err(SensorFault {
                temperature_c,
                humidity_pct,
            })
        }
    }

    /// Validate raw sensor output into a reading stamped with the current
    /// time. This is what sensor drivers call at the moment of capture.
    ///
    /// # Errors
    ///
    /// Returns [`SensorFault`] when either value is not a finite number.
    pub fn sample(temperature_c: f64, humidity_pct: f64) -> Result<Self, SensorFault> {
        Self::new(temperature_c, humidity_pct, Utc::now())
    }

    /// Temperature in degrees Celsius.
    #[must_use]
    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    /// Relative humidity percentage.
    #[must_use]
    pub fn humidity_pct(&self) -> f64 {
        self.humidity_pct
    }

    /// When the sample was taken.
    #[must_use]
    pub fn taken_at(&self) -> Timestamp {
        self.taken_at
    }
}

/// An invalid numeric reading from the physical sensor.
///
/// The control loop reports the fault once, skips publication for the cycle,
/// and keeps scheduling future attempts — no retry backoff, no fault counter.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("invalid sensor reading (temperature: {temperature_c}, humidity: {humidity_pct})")]
pub struct SensorFault {
    /// Raw temperature value as reported.
    pub temperature_c: f64,
    /// Raw humidity value as reported.
    pub humidity_pct: f64,
}
