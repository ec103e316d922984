//! Hysteresis — the temperature band driving the fan automation.
//!
//! The evaluator turns the fan on above the upper threshold, off below the
//! lower one, and holds its last decision anywhere inside the band so the
//! relay never chatters around a single set point.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::relay::RelayState;

/// A two-threshold temperature band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hysteresis {
    on_above: f64,
    off_below: f64,
}

impl Hysteresis {
    /// Build a band, rejecting empty or inverted threshold pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvertedHysteresis`] when `on_above` is not
    /// strictly above `off_below`.
    pub fn new(on_above: f64, off_below: f64) -> Result<Self, ValidationError> {
        if on_above > off_below {
            Ok(Self {
                on_above,
                off_below,
            })
        } else {
            Err(ValidationError::InvertedHysteresis {
                on_above,
                off_below,
            })
        }
    }

    /// Upper threshold: the fan turns on strictly above this temperature.
    #[must_use]
    pub fn on_above(&self) -> f64 {
        self.on_above
    }

    /// Lower threshold: the fan turns off strictly below this temperature.
    #[must_use]
    pub fn off_below(&self) -> f64 {
        self.off_below
    }

    /// Decide the transition to apply for `temperature_c`, or `None` to hold
    /// the current state.
    ///
    /// Idempotent by construction: a temperature that matches the current
    /// state never produces a transition.
    #[must_use]
    pub fn evaluate(&self, current: RelayState, temperature_c: f64) -> Option<RelayState> {
        match current {
            RelayState::Off if temperature_c > self.on_above => Some(RelayState::On),
            RelayState::On if temperature_c < self.off_below => Some(RelayState::Off),
            _ => None,
        }
    }
}

impl Default for Hysteresis {
    /// The fixed thresholds of the stock controller: on above 30°C, off
    /// below 25°C.
    fn default() -> Self {
        Self {
            on_above: 30.0,
            off_below: 25.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_turn_on_above_upper_threshold_when_off() {
        let band = Hysteresis::default();
        assert_eq!(
            band.evaluate(RelayState::Off, 31.2),
            Some(RelayState::On)
        );
    }

    #[test]
    fn should_turn_off_below_lower_threshold_when_on() {
        let band = Hysteresis::default();
        assert_eq!(
            band.evaluate(RelayState::On, 24.0),
            Some(RelayState::Off)
        );
    }

    #[test]
    fn should_hold_inside_band_when_off() {
        let band = Hysteresis::default();
        assert_eq!(band.evaluate(RelayState::Off, 27.0), None);
    }

    #[test]
    fn should_hold_inside_band_when_on() {
        let band = Hysteresis::default();
        assert_eq!(band.evaluate(RelayState::On, 27.0), None);
    }

    #[test]
    fn should_hold_at_exact_thresholds() {
        let band = Hysteresis::default();
        assert_eq!(band.evaluate(RelayState::Off, 30.0), None);
        assert_eq!(band.evaluate(RelayState::On, 25.0), None);
    }

    #[test]
    fn should_not_retrigger_when_already_on_above_upper_threshold() {
        let band = Hysteresis::default();
        assert_eq!(band.evaluate(RelayState::On, 35.0), None);
    }

    #[test]
    fn should_not_retrigger_when_already_off_below_lower_threshold() {
        let band = Hysteresis::default();
        assert_eq!(band.evaluate(RelayState::Off, 20.0), None);
    }

    #[test]
    fn should_reject_inverted_thresholds() {
        let result = Hysteresis::new(20.0, 25.0);
        assert!(matches!(
            result,
            Err(ValidationError::InvertedHysteresis { .. })
        ));
    }

    #[test]
    fn should_reject_equal_thresholds() {
        assert!(Hysteresis::new(25.0, 25.0).is_err());
    }

    #[test]
    fn should_accept_custom_band() {
        let band = Hysteresis::new(28.0, 22.0).unwrap();
        assert_eq!(
            band.evaluate(RelayState::Off, 28.5),
            Some(RelayState::On)
        );
        assert_eq!(band.evaluate(RelayState::Off, 27.5), None);
    }
}
