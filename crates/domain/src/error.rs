//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`RelayHubError`] at the port boundary. Transport errors from session
//! adapters arrive boxed through the `Session` variant.

use crate::reading::SensorFault;

/// Top-level error for the relayhub workspace.
#[derive(Debug, thiserror::Error)]
pub enum RelayHubError {
    /// A sensor produced an invalid reading.
    #[error("sensor fault")]
    Sensor(#[from] SensorFault),

    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The session client failed to publish or pump.
    #[error("session error")]
    Session(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The hysteresis band is empty or inverted.
    #[error("hysteresis on-threshold {on_above} must be above off-threshold {off_below}")]
    InvertedHysteresis {
        /// Configured on-transition threshold.
        on_above: f64,
        /// Configured off-transition threshold.
        off_below: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_inverted_hysteresis_with_thresholds() {
        let err = ValidationError::InvertedHysteresis {
            on_above: 20.0,
            off_below: 25.0,
        };
        assert_eq!(
            err.to_string(),
            "hysteresis on-threshold 20 must be above off-threshold 25"
        );
    }

    #[test]
    fn should_convert_sensor_fault_into_top_level_error() {
        let fault = SensorFault {
            temperature_c: f64::NAN,
            humidity_pct: 40.0,
        };
        let err: RelayHubError = fault.into();
        assert!(matches!(err, RelayHubError::Sensor(_)));
    }
}
