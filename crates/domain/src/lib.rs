//! # relayhub-domain
//!
//! Pure domain model for the relayhub edge controller.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, wire values
//! - Define **Channels** (the stable logical I/O points exchanged with the
//!   session service: telemetry outputs, relay in/outs, one-shot commands,
//!   status text lines)
//! - Define **Relay state** (on/off per controllable relay, reset to off on
//!   process start)
//! - Define **Readings** (validated, timestamped temperature/humidity
//!   samples)
//! - Define **Battery level** (simulated, floor-clamped telemetry)
//! - Define **Hysteresis** (the fan automation thresholds and the hold band)
//! - Define **Commands** (the dispatch table from inbound channel messages to
//!   control actions)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod battery;
pub mod channel;
pub mod command;
pub mod hysteresis;
pub mod reading;
pub mod relay;
pub mod value;
