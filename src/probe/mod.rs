//! Detection of installed tools and their versions.
//!
//! [`SysInfo`] exposes one memoized accessor per tool. An
//! [`EnvironmentSnapshot`] gathers all of them for a single evaluation.

pub mod cache;
pub mod cocoapods;
pub mod snapshot;
pub mod sys_info;

pub use cache::{ProbeCache, ProbeKey, XcprojInfo};
pub use snapshot::EnvironmentSnapshot;
pub use sys_info::SysInfo;
