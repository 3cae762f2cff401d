//! Android SDK component resolution.
//!
//! [`AndroidToolsInfo`] finds the compile target, build tools and support
//! repository under `ANDROID_HOME` and reports what is missing.

pub mod matching;
pub mod tools_info;

pub use tools_info::{AndroidToolsInfo, SdkCapabilityData};
