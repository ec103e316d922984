//! Control loop — the single-threaded heart of the controller.
//!
//! One `tick` runs, in fixed order: the inbound command pump, the timer
//! dispatcher (sensor poll, health report), then the automation evaluator.
//! All state lives in the loop context; handlers never block each other and
//! no task preemption exists.

use std::time::{Duration, Instant};

use relayhub_domain::battery::BatteryLevel;
use relayhub_domain::channel::{Channel, RelayChannel, StatusChannel};
use relayhub_domain::command::Command;
use relayhub_domain::error::RelayHubError;
use relayhub_domain::hysteresis::Hysteresis;
use relayhub_domain::reading::Reading;
use relayhub_domain::relay::{RelayBank, RelayState};
use relayhub_domain::value::ChannelValue;

use crate::ports::{RelayDriver, SensorReader, SessionClient};
use crate::schedule::Cadence;

/// Timing and threshold settings for the loop.
#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    /// How often the sensor is polled.
    pub sensor_poll: Duration,
    /// How often the health reporter runs.
    pub health_interval: Duration,
    /// Fan automation thresholds.
    pub hysteresis: Hysteresis,
    /// Battery drain per health tick, in percentage points.
    pub battery_step: u8,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            sensor_poll: Duration::from_secs(2),
            health_interval: Duration::from_secs(5),
            hysteresis: Hysteresis::default(),
            battery_step: 1,
        }
    }
}

/// What the caller should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking.
    Continue,
    /// A restart command arrived: terminate the process unconditionally.
    Restart,
}

/// The control-loop context: every mutable piece of controller state plus
/// the three port implementations.
pub struct ControlLoop<S, R, D> {
    session: S,
    sensor: R,
    relays: D,
    bank: RelayBank,
    latest: Option<Reading>,
    fresh: bool,
    battery: BatteryLevel,
    hysteresis: Hysteresis,
    battery_step: u8,
    sensor_cadence: Cadence,
    health_cadence: Cadence,
}

impl<S, R, D> ControlLoop<S, R, D>
where
    S: SessionClient,
    R: SensorReader,
    D: RelayDriver,
{
    /// Build a loop context. All relays start off; nothing is published yet.
    pub fn new(settings: LoopSettings, session: S, sensor: R, relays: D) -> Self {
        Self {
            session,
            sensor,
            relays,
            bank: RelayBank::default(),
            latest: None,
            fresh: false,
            battery: BatteryLevel::default(),
            hysteresis: settings.hysteresis,
            battery_step: settings.battery_step,
            sensor_cadence: Cadence::new(settings.sensor_poll),
            health_cadence: Cadence::new(settings.health_interval),
        }
    }

    /// Reset every relay off through the driver, echo the cleared states and
    /// announce the controller on the online-status channel.
    ///
    /// # Errors
    ///
    /// Propagates session publish failures.
    pub async fn start(&mut self) -> Result<(), RelayHubError> {
        for relay in RelayChannel::ALL {
            self.relays.set(relay, RelayState::Off);
            self.session
                .publish(relay.channel(), RelayState::Off.into())
                .await?;
        }
        self.session
            .publish(
                Channel::Status(StatusChannel::Online),
                ChannelValue::Text("Controller online".to_string()),
            )
            .await
    }

    /// Run one loop iteration at monotonic time `now`.
    ///
    /// # Errors
    ///
    /// Propagates session publish/pump failures. Sensor faults are handled
    /// internally and never surface here.
    pub async fn tick(&mut self, now: Instant) -> Result<TickOutcome, RelayHubError> {
        if self.pump_commands().await? == TickOutcome::Restart {
            return Ok(TickOutcome::Restart);
        }
        if self.sensor_cadence.poll(now) {
            self.sample_sensor().await?;
        }
        if self.health_cadence.poll(now) {
            self.report_health().await?;
        }
        if self.fresh {
            self.fresh = false;
            self.evaluate_automation().await?;
        }
        Ok(TickOutcome::Continue)
    }

    /// Current logical state of one relay.
    #[must_use]
    pub fn relay_state(&self, relay: RelayChannel) -> RelayState {
        self.bank.get(relay)
    }

    /// Current simulated battery level.
    #[must_use]
    pub fn battery(&self) -> BatteryLevel {
        self.battery
    }

    /// The most recent valid reading, if any.
    #[must_use]
    pub fn latest_reading(&self) -> Option<Reading> {
        self.latest
    }

    async fn pump_commands(&mut self) -> Result<TickOutcome, RelayHubError> {
        for message in self.session.pump().await? {
            let Some(command) = Command::decode(&message) else {
                tracing::debug!(channel = %message.channel, "inbound message carried no action");
                continue;
            };
            match command {
                Command::SetRelay { relay, state } => self.apply_relay(relay, state).await?,
                Command::EmergencyAllOff => self.emergency_all_off().await?,
                Command::Refresh => self.manual_refresh().await?,
                Command::Restart => {
                    tracing::warn!("restart command received, terminating");
                    return Ok(TickOutcome::Restart);
                }
            }
        }
        Ok(TickOutcome::Continue)
    }

    async fn apply_relay(
        &mut self,
        relay: RelayChannel,
        state: RelayState,
    ) -> Result<(), RelayHubError> {
        tracing::info!(relay = relay.label(), %state, "relay command");
        self.relays.set(relay, state);
        self.bank.set(relay, state);
        self.session.publish(relay.channel(), state.into()).await?;
        let note = format!(
            "{} {}",
            relay.label(),
            if state.is_on() { "ON" } else { "OFF" }
        );
        self.session
            .publish(relay.status_channel(), ChannelValue::Text(note))
            .await
    }

    async fn emergency_all_off(&mut self) -> Result<(), RelayHubError> {
        tracing::warn!("emergency all-off triggered");
        self.bank.all_off();
        for relay in RelayChannel::ALL {
            self.relays.set(relay, RelayState::Off);
            self.session
                .publish(relay.channel(), RelayState::Off.into())
                .await?;
        }
        self.session
            .publish(
                Channel::Status(StatusChannel::Emergency),
                ChannelValue::Text("Emergency Stop - All Relays OFF".to_string()),
            )
            .await?;
        // The trigger is a self-resetting toggle: clear it for the next use.
        self.session
            .publish(Channel::EmergencyIn, ChannelValue::Int(0))
            .await
    }

    async fn manual_refresh(&mut self) -> Result<(), RelayHubError> {
        tracing::info!("manual refresh requested");
        // The timer dispatcher runs right after the pump in the same tick,
        // so forcing the cadence samples the sensor immediately.
        self.sensor_cadence.force();
        self.session
            .publish(Channel::RefreshIn, ChannelValue::Int(0))
            .await
    }

    async fn sample_sensor(&mut self) -> Result<(), RelayHubError> {
        match self.sensor.read() {
            Ok(reading) => {
                tracing::debug!(
                    temperature = reading.temperature_c(),
                    humidity = reading.humidity_pct(),
                    taken_at = %reading.taken_at(),
                    "sensor sample"
                );
                self.session
                    .publish(
                        Channel::TemperatureOut,
                        ChannelValue::Float(reading.temperature_c()),
                    )
                    .await?;
                self.session
                    .publish(
                        Channel::HumidityOut,
                        ChannelValue::Float(reading.humidity_pct()),
                    )
                    .await?;
                self.latest = Some(reading);
                self.fresh = true;
                Ok(())
            }
            Err(fault) => {
                tracing::warn!(%fault, "sensor read failed, skipping cycle");
                self.session
                    .publish(
                        Channel::Status(StatusChannel::Automation),
                        ChannelValue::Text("Sensor Fault".to_string()),
                    )
                    .await
            }
        }
    }

    async fn evaluate_automation(&mut self) -> Result<(), RelayHubError> {
        let Some(reading) = self.latest else {
            return Ok(());
        };
        let current = self.bank.get(RelayChannel::Fan);
        let Some(next) = self.hysteresis.evaluate(current, reading.temperature_c()) else {
            return Ok(());
        };
        tracing::info!(
            temperature = reading.temperature_c(),
            fan = %next,
            "automation transition"
        );
        self.relays.set(RelayChannel::Fan, next);
        self.bank.set(RelayChannel::Fan, next);
        self.session
            .publish(RelayChannel::Fan.channel(), next.into())
            .await?;
        let note = if next.is_on() {
            "High Temp - Fan ON"
        } else {
            "Cool Temp - Fan OFF"
        };
        self.session
            .publish(
                Channel::Status(StatusChannel::Automation),
                ChannelValue::Text(note.to_string()),
            )
            .await
    }

    async fn report_health(&mut self) -> Result<(), RelayHubError> {
        self.battery = self.battery.drain(self.battery_step);
        self.session
            .publish(
                Channel::BatteryOut,
                ChannelValue::Int(i64::from(self.battery.percent())),
            )
            .await?;
        let note = if self.session.is_connected() {
            "Online"
        } else {
            tracing::warn!("session reports disconnected");
            "Disconnected"
        };
        self.session
            .publish(
                Channel::Status(StatusChannel::Connectivity),
                ChannelValue::Text(note.to_string()),
            )
            .await
    }
}
