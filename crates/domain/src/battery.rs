//! Battery level — simulated, floor-clamped telemetry.
//!
//! There is no real battery. The level starts full, drains by a fixed step on
//! every health tick, and never drops below the floor. Purely cosmetic.

use serde::{Deserialize, Serialize};

/// Simulated battery percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryLevel(u8);

impl BatteryLevel {
    /// A full battery.
    pub const FULL: Self = Self(100);

    /// The level never drains below this percentage.
    pub const FLOOR: u8 = 10;

    /// Current percentage.
    #[must_use]
    pub fn percent(self) -> u8 {
        self.0
    }

    /// Drain by `step` percentage points, clamped at [`FLOOR`](Self::FLOOR).
    #[must_use]
    pub fn drain(self, step: u8) -> Self {
        Self(self.0.saturating_sub(step).max(Self::FLOOR))
    }
}

impl Default for BatteryLevel {
    fn default() -> Self {
        Self::FULL
    }
}

impl std::fmt::Display for BatteryLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}
