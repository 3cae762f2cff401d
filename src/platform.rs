//! Mobile platforms a project can be built for.

use crate::error::DoctorError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A mobile build target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MobilePlatform {
    Android,
    Ios,
}

impl MobilePlatform {
    /// Every supported platform, in display order.
    pub const ALL: [MobilePlatform; 2] = [MobilePlatform::Android, MobilePlatform::Ios];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            MobilePlatform::Android => "android",
            MobilePlatform::Ios => "ios",
        }
    }

    /// Comma-separated list of supported names, as shown in error messages.
    pub fn supported_names() -> String {
        Self::ALL
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for MobilePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MobilePlatform {
    type Err = DoctorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DoctorError::MissingPlatform {
                supported: Self::supported_names(),
            });
        }

        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DoctorError::UnsupportedPlatform {
                platform: trimmed.to_string(),
                supported: Self::supported_names(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("ANDROID".parse::<MobilePlatform>().unwrap(), MobilePlatform::Android);
        assert_eq!("iOS".parse::<MobilePlatform>().unwrap(), MobilePlatform::Ios);
    }

    #[test]
    fn parse_empty_is_missing_platform() {
        let err = "".parse::<MobilePlatform>().unwrap_err();
        assert!(matches!(err, DoctorError::MissingPlatform { .. }));
    }

    #[test]
    fn parse_unknown_lists_supported() {
        let err = "blackberry".parse::<MobilePlatform>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("blackberry"));
        assert!(msg.contains("android, ios"));
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&MobilePlatform::Ios).unwrap();
        assert_eq!(json, "\"ios\"");
    }
}
