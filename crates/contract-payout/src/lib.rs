//! Contract payout calculator.
//!
//! Maps a contract type, client type, and producer type to a fee/tax deduction chain and
//! renders the resulting payout the way the input form shows it.

pub mod config;
pub mod error;
pub mod payout;
pub mod telemetry;
