//! Environment diagnosis.
//!
//! [`Doctor`] ties the probes and the Android SDK resolver together and
//! turns one snapshot into an ordered list of [`Warning`]s.

pub mod checks;
pub mod evaluator;

pub use checks::{run_checks, Check, CHECKS};
pub use evaluator::Doctor;
pub use crate::warning::Warning;
