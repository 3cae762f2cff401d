//! Configuration schema.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::sys::HostFamily;

/// Root of `config.yml`.
///
/// ```yaml
/// cache: true
/// host: darwin
/// env:
///   ANDROID_HOME: /opt/android-sdk
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DoctorConfig {
    /// Memoize probe results within one run.
    pub cache: bool,

    /// Evaluate checks as if running on this host family.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<HostFamily>,

    /// Variables layered over the process environment.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,
}

impl Default for DoctorConfig {
    fn default() -> Self {
        Self {
            cache: true,
            host: None,
            env: HashMap::new(),
        }
    }
}
