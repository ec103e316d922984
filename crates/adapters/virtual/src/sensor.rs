//! Virtual temperature/humidity sensor.

use std::collections::VecDeque;

use relayhub_app::ports::SensorReader;
use relayhub_domain::reading::{Reading, SensorFault};

/// A simulated sensor.
///
/// Scripted readings (including faults) are served first; once the script is
/// exhausted the sensor falls back to a steady value, or ping-pongs between
/// two bounds when built with [`wandering`](Self::wandering) so demos
/// exercise the fan automation.
pub struct VirtualSensor {
    script: VecDeque<(f64, f64)>,
    temperature_c: f64,
    humidity_pct: f64,
    wander: Option<Wander>,
}

struct Wander {
    low: f64,
    high: f64,
    step: f64,
    rising: bool,
}

impl VirtualSensor {
    /// A sensor that always reports the same values.
    #[must_use]
    pub fn steady(temperature_c: f64, humidity_pct: f64) -> Self {
        Self {
            script: VecDeque::new(),
            temperature_c,
            humidity_pct,
            wander: None,
        }
    }

    /// A sensor whose temperature ramps between `low` and `high` by `step`
    /// per read, reversing at each bound.
    #[must_use]
    pub fn wandering(low: f64, high: f64, step: f64) -> Self {
        Self {
            script: VecDeque::new(),
            temperature_c: low,
            humidity_pct: 45.0,
            wander: Some(Wander {
                low,
                high,
                step,
                rising: true,
            }),
        }
    }

    /// Queue one scripted reading to serve before the steady behaviour.
    pub fn push_reading(&mut self, temperature_c: f64, humidity_pct: f64) {
        self.script.push_back((temperature_c, humidity_pct));
    }

    /// Queue one scripted fault (a NaN reading).
    pub fn push_fault(&mut self) {
        self.script.push_back((f64::NAN, f64::NAN));
    }
}

impl SensorReader for VirtualSensor {
    fn read(&mut self) -> Result<Reading, SensorFault> {
        if let Some((temperature_c, humidity_pct)) = self.script.pop_front() {
            return Reading::sample(temperature_c, humidity_pct);
        }
        if let Some(wander) = &mut self.wander {
            if wander.rising {
                self.temperature_c += wander.step;
                if self.temperature_c >= wander.high {
                    wander.rising = false;
                }
            } else {
                self.temperature_c -= wander.step;
                if self.temperature_c <= wander.low {
                    wander.rising = true;
                }
            }
        }
        Reading::sample(self.temperature_c, self.humidity_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serve_steady_values() {
        let mut sensor = VirtualSensor::steady(21.5, 40.0);
        let reading = sensor.read().unwrap();
        assert!((reading.temperature_c() - 21.5).abs() < f64::EPSILON);
        assert!((reading.humidity_pct() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_serve_scripted_readings_before_fallback() {
        let mut sensor = VirtualSensor::steady(21.5, 40.0);
        sensor.push_reading(31.2, 55.0);

        let first = sensor.read().unwrap();
        assert!((first.temperature_c() - 31.2).abs() < f64::EPSILON);

        let second = sensor.read().unwrap();
        assert!((second.temperature_c() - 21.5).abs() < f64::EPSILON);
    }

    #[test]
    fn should_fault_on_scripted_fault() {
        let mut sensor = VirtualSensor::steady(21.5, 40.0);
        sensor.push_fault();

        assert!(sensor.read().is_err());
        assert!(sensor.read().is_ok());
    }

    #[test]
    fn should_ramp_upwards_when_wandering() {
        let mut sensor = VirtualSensor::wandering(22.0, 33.0, 0.5);
        let first = sensor.read().unwrap();
        let second = sensor.read().unwrap();
        assert!(second.temperature_c() > first.temperature_c());
    }

    #[test]
    fn should_reverse_at_upper_bound_when_wandering() {
        let mut sensor = VirtualSensor::wandering(22.0, 23.0, 0.6);
        let mut temps = Vec::new();
        for _ in 0..6 {
            temps.push(sensor.read().unwrap().temperature_c());
        }
        // The ramp must come back down after crossing the upper bound.
        let max = temps.iter().copied().fold(f64::MIN, f64::max);
        assert!(temps.last().copied().unwrap() < max);
    }

    #[test]
    fn should_stay_within_reasonable_bounds_when_wandering() {
        let mut sensor = VirtualSensor::wandering(22.0, 33.0, 0.7);
        for _ in 0..200 {
            let t = sensor.read().unwrap().temperature_c();
            assert!(t > 20.0 && t < 35.0);
        }
    }
}
