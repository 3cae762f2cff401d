//! mobile-doctor - Detects the toolchains needed to build mobile apps.
//!
//! mobile-doctor probes the local machine for the Android SDK, JDK, Xcode,
//! CocoaPods and friends, and reports what is missing or outdated along
//! with how to fix it.
//!
//! # Modules
//!
//! - [`android`] - Android SDK discovery and validation
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - User configuration loading
//! - [`doctor`] - Health checks and build readiness
//! - [`error`] - Error types and result aliases
//! - [`platform`] - Supported mobile platforms
//! - [`probe`] - Memoized tool version probes
//! - [`sys`] - Process, filesystem and registry access
//! - [`ui`] - Terminal output
//! - [`version`] - Version parsing and range matching
//! - [`warning`] - Problems reported to the user
//!
//! # Example
//!
//! ```
//! use mobile_doctor::version::{Version, VersionRange};
//!
//! let range = VersionRange::parse(">=23 <=25").unwrap();
//! let installed: Vec<Version> = ["22.0.1", "23.0.3", "25.0.2", "26.0.0"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//! let best = range.max_satisfying(&installed);
//! assert_eq!(best, Some(Version::new(25, 0, 2)));
//! ```

pub mod android;
pub mod cli;
pub mod config;
pub mod doctor;
pub mod error;
pub mod platform;
pub mod probe;
pub mod sys;
pub mod ui;
pub mod version;
pub mod warning;

pub use doctor::Doctor;
pub use error::{DoctorError, Result};
pub use platform::MobilePlatform;
pub use warning::Warning;
