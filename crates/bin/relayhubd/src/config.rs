//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `relayhub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use relayhub_adapter_mqtt::MqttConfig;
use relayhub_app::control_loop::LoopSettings;
use relayhub_domain::hysteresis::Hysteresis;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Control-loop timing settings.
    pub control: ControlConfig,
    /// Fan automation thresholds.
    pub automation: AutomationConfig,
    /// Session client selection.
    pub session: SessionConfig,
    /// MQTT broker settings (used when `session.mode = "mqtt"`).
    pub mqtt: MqttConfig,
    /// Simulated sensor settings.
    pub simulation: SimulationConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Control-loop timing.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Loop tick interval in milliseconds.
    pub tick_millis: u64,
    /// Sensor poll interval in seconds.
    pub sensor_poll_secs: u64,
    /// Health report interval in seconds.
    pub health_interval_secs: u64,
    /// Battery drain per health report, in percentage points.
    pub battery_step: u8,
}

/// Fan automation thresholds, in degrees Celsius.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AutomationConfig {
    /// Turn the fan on above this temperature.
    pub fan_on_above: f64,
    /// Turn the fan off below this temperature.
    pub fan_off_below: f64,
}

/// Which session client to wire in.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session backend.
    pub mode: SessionMode,
}

/// Session backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// In-memory session, no broker required.
    #[default]
    Virtual,
    /// MQTT broker session.
    Mqtt,
}

/// Simulated sensor ramp bounds.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Lower temperature bound of the ramp.
    pub temp_low: f64,
    /// Upper temperature bound of the ramp.
    pub temp_high: f64,
    /// Degrees the ramp moves per sensor read.
    pub temp_step: f64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `relayhub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("relayhub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("RELAYHUB_SESSION_MODE") {
            match val.to_lowercase().as_str() {
                "virtual" => self.session.mode = SessionMode::Virtual,
                "mqtt" => self.session.mode = SessionMode::Mqtt,
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("RELAYHUB_MQTT_HOST") {
            self.mqtt.broker_host = val;
        }
        if let Ok(val) = std::env::var("RELAYHUB_MQTT_PORT") {
            if let Ok(port) = val.parse() {
                self.mqtt.broker_port = port;
            }
        }
        if let Ok(val) = std::env::var("RELAYHUB_BASE_TOPIC") {
            self.mqtt.base_topic = val;
        }
        if let Ok(val) = std::env::var("RELAYHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.control.tick_millis == 0 {
            return Err(ConfigError::Validation(
                "control.tick_millis must be non-zero".to_string(),
            ));
        }
        if self.control.battery_step == 0 {
            return Err(ConfigError::Validation(
                "control.battery_step must be non-zero".to_string(),
            ));
        }
        if self.automation.fan_on_above <= self.automation.fan_off_below {
            return Err(ConfigError::Validation(format!(
                "automation.fan_on_above ({}) must exceed fan_off_below ({})",
                self.automation.fan_on_above, self.automation.fan_off_below
            )));
        }
        Ok(())
    }

    /// Loop tick interval as a [`Duration`].
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.control.tick_millis)
    }

    /// Build the control-loop settings from the timing and automation
    /// sections.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the hysteresis thresholds are
    /// inverted. `load` has already checked this, so only hand-built
    /// configs can trip it.
    pub fn loop_settings(&self) -> Result<LoopSettings, ConfigError> {
        let hysteresis =
            Hysteresis::new(self.automation.fan_on_above, self.automation.fan_off_below)
                .map_err(|err| ConfigError::Validation(err.to_string()))?;
        Ok(LoopSettings {
            sensor_poll: Duration::from_secs(self.control.sensor_poll_secs),
            health_interval: Duration::from_secs(self.control.health_interval_secs),
            hysteresis,
            battery_step: self.control.battery_step,
        })
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            tick_millis: 100,
            sensor_poll_secs: 2,
            health_interval_secs: 5,
            battery_step: 1,
        }
    }
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            fan_on_above: 30.0,
            fan_off_below: 25.0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            temp_low: 22.0,
            temp_high: 33.0,
            temp_step: 0.4,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "relayhubd=info,relayhub=info,rumqttc=warn".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
