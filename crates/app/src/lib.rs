//! # relayhub-app
//!
//! Application layer for the relayhub edge controller.
//!
//! ## Responsibilities
//! - Define the **ports** (traits) through which the controller talks to the
//!   outside world: session client, sensor reader, relay driver
//! - Run the **control loop**: inbound command pump, timer dispatcher,
//!   sensor poller, automation evaluator, health reporter
//!
//! ## Dependency rule
//! Depends on `relayhub-domain` only. Adapters implement the ports; the
//! binary crate wires everything together.

pub mod control_loop;
pub mod ports;
pub mod schedule;
