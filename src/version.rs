//! Dotted numeric versions and the small range matcher used for SDK components.
//!
//! Tool output is normalized to `major.minor.patch` by [`extract_version`].
//! Ranges such as `>=23 <=25` are handled by [`VersionRange`], whose bounds
//! may name fewer components than the versions they are compared against.

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static RE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").unwrap());

static RE_VERSION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)\.(\d+)").unwrap());

/// A `major.minor.patch` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a version from its components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    fn components(&self) -> [u32; 3] {
        [self.major, self.minor, self.patch]
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        extract_version(s).ok_or_else(|| format!("No version found in '{}'", s))
    }
}

/// Find the first `major.minor[.patch]` in `output`.
///
/// A missing patch component defaults to `0`, and anything after the patch
/// (`_211`, `-beta`) is dropped.
pub fn extract_version(output: &str) -> Option<Version> {
    let caps = RE_VERSION.captures(output)?;

    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = caps.get(2)?.as_str().parse().ok()?;
    let patch = match caps.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    Some(Version::new(major, minor, patch))
}

/// [`extract_version`] rendered as a string.
pub fn normalize_version(output: &str) -> Option<String> {
    extract_version(output).map(|v| v.to_string())
}

/// Find a full three-component version token inside a directory name.
///
/// `25.0.2` and `android-25.0.2-rc1` both yield `25.0.2`; `25.0` yields nothing.
pub fn extract_version_token(name: &str) -> Option<Version> {
    let caps = RE_VERSION_TOKEN.captures(name)?;
    Some(Version::new(
        caps.get(1)?.as_str().parse().ok()?,
        caps.get(2)?.as_str().parse().ok()?,
        caps.get(3)?.as_str().parse().ok()?,
    ))
}

/// Whether `version` parses and is strictly below `minimum`.
pub fn is_below(version: &str, minimum: Version) -> bool {
    extract_version(version).is_some_and(|v| v < minimum)
}

/// A version bound naming one to three components (`23`, `25.0`, `1.8.0`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialVersion {
    components: Vec<u32>,
}

impl PartialVersion {
    /// A bound naming only the major component.
    pub fn major(major: u32) -> Self {
        Self {
            components: vec![major],
        }
    }

    /// Parse `N`, `N.N` or `N.N.N`.
    pub fn parse(text: &str) -> Option<Self> {
        let components = text
            .split('.')
            .map(|part| part.parse::<u32>().ok())
            .collect::<Option<Vec<_>>>()?;
        if components.is_empty() || components.len() > 3 {
            return None;
        }
        Some(Self { components })
    }

    /// Compare `version` against this bound using only the named components.
    fn compare(&self, version: &Version) -> Ordering {
        let full = version.components();
        full[..self.components.len()].cmp(&self.components[..])
    }
}

impl fmt::Display for PartialVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.components.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Upper end of a [`VersionRange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    pub version: PartialVersion,
    pub inclusive: bool,
}

/// An inclusive lower bound with an optional upper bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    pub lower: PartialVersion,
    pub upper: Option<Bound>,
}

impl VersionRange {
    /// `>=lower <=upper`
    pub fn inclusive(lower: PartialVersion, upper: PartialVersion) -> Self {
        Self {
            lower,
            upper: Some(Bound {
                version: upper,
                inclusive: true,
            }),
        }
    }

    /// `>=major <major+1`
    pub fn same_major(major: u32) -> Self {
        Self {
            lower: PartialVersion::major(major),
            upper: Some(Bound {
                version: PartialVersion::major(major.saturating_add(1)),
                inclusive: false,
            }),
        }
    }

    /// Parse a range such as `>=23 <=25` or `≥25 <26`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut lower = None;
        let mut upper = None;

        for token in text.split_whitespace() {
            if let Some(rest) = token.strip_prefix(">=").or_else(|| token.strip_prefix('≥')) {
                lower = Some(PartialVersion::parse(rest)?);
            } else if let Some(rest) = token.strip_prefix("<=").or_else(|| token.strip_prefix('≤')) {
                upper = Some(Bound {
                    version: PartialVersion::parse(rest)?,
                    inclusive: true,
                });
            } else if let Some(rest) = token.strip_prefix('<') {
                upper = Some(Bound {
                    version: PartialVersion::parse(rest)?,
                    inclusive: false,
                });
            } else {
                return None;
            }
        }

        Some(Self {
            lower: lower?,
            upper,
        })
    }

    /// Whether `version` lies inside the range.
    pub fn satisfies(&self, version: &Version) -> bool {
        if self.lower.compare(version) == Ordering::Less {
            return false;
        }
        match &self.upper {
            Some(bound) if bound.inclusive => bound.version.compare(version) != Ordering::Greater,
            Some(bound) => bound.version.compare(version) == Ordering::Less,
            None => true,
        }
    }

    /// Highest candidate inside the range.
    pub fn max_satisfying<'a>(
        &self,
        candidates: impl IntoIterator<Item = &'a Version>,
    ) -> Option<Version> {
        candidates
            .into_iter()
            .filter(|v| self.satisfies(v))
            .max()
            .copied()
    }

    /// The single version this range pins, when both bounds name the same one.
    pub fn single_version(&self) -> Option<String> {
        match &self.upper {
            Some(bound) if bound.inclusive && bound.version == self.lower => {
                Some(self.lower.to_string())
            }
            _ => None,
        }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ">={}", self.lower)?;
        if let Some(bound) = &self.upper {
            let op = if bound.inclusive { "<=" } else { "<" };
            write!(f, " {}{}", op, bound.version)?;
        }
        Ok(())
    }
}
