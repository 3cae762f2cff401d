//! Diagnostic records produced by the doctor.

use crate::platform::MobilePlatform;
use serde::Serialize;
use std::collections::BTreeSet;

/// A problem found on the machine, with a suggested fix.
///
/// An empty `platforms` set means the warning applies to every platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub message: String,
    pub remediation: String,
    pub platforms: BTreeSet<MobilePlatform>,
}

impl Warning {
    /// Create a warning scoped to the given platforms.
    pub fn new(
        message: impl Into<String>,
        remediation: impl Into<String>,
        platforms: &[MobilePlatform],
    ) -> Self {
        Self {
            message: message.into(),
            remediation: remediation.into(),
            platforms: platforms.iter().copied().collect(),
        }
    }

    /// Create a warning that applies to every platform.
    pub fn universal(message: impl Into<String>, remediation: impl Into<String>) -> Self {
        Self::new(message, remediation, &[])
    }

    /// Whether this warning is relevant when building for `platform`.
    pub fn applies_to(&self, platform: MobilePlatform) -> bool {
        self.platforms.is_empty() || self.platforms.contains(&platform)
    }
}
