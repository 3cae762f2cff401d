//! Memoization of probe results.
//!
//! Each probe has a [`ProbeKey`]. A key with no slot has never been
//! computed; a key with a slot has been computed, even if the stored value
//! is an absent version or a negative flag.

use serde::Serialize;
use std::collections::HashMap;

/// Identity of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKey {
    JavacVersion,
    NodeVersion,
    NpmVersion,
    NodeGypVersion,
    XcodeVersion,
    XcodeprojVersion,
    ItunesInstalled,
    CocoapodsVersion,
    OsName,
    AdbVersion,
    AndroidInstalled,
    MonoVersion,
    GitVersion,
    GradleVersion,
    CocoapodsWorking,
    XcprojInfo,
}

/// Whether the `xcproj` bridging tool is needed and present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct XcprojInfo {
    /// CocoaPods is older than 1.0.0 while Xcode is 7.3 or newer.
    pub should_use_xcproj: bool,
    /// `xcproj --version` succeeded.
    pub xcproj_available: bool,
}

/// A stored probe result.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeValue {
    Text(Option<String>),
    Flag(bool),
    TriState(Option<bool>),
    Xcproj(XcprojInfo),
}

/// Conversion between a probe's return type and its stored form.
pub trait CachedValue: Clone {
    fn into_value(self) -> ProbeValue;
    fn from_value(value: &ProbeValue) -> Option<Self>;
}

impl CachedValue for Option<String> {
    fn into_value(self) -> ProbeValue {
        ProbeValue::Text(self)
    }

    fn from_value(value: &ProbeValue) -> Option<Self> {
        match value {
            ProbeValue::Text(text) => Some(text.clone()),
            _ => None,
        }
    }
}

impl CachedValue for bool {
    fn into_value(self) -> ProbeValue {
        ProbeValue::Flag(self)
    }

    fn from_value(value: &ProbeValue) -> Option<Self> {
        match value {
            ProbeValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl CachedValue for Option<bool> {
    fn into_value(self) -> ProbeValue {
        ProbeValue::TriState(self)
    }

    fn from_value(value: &ProbeValue) -> Option<Self> {
        match value {
            ProbeValue::TriState(state) => Some(*state),
            _ => None,
        }
    }
}

impl CachedValue for XcprojInfo {
    fn into_value(self) -> ProbeValue {
        ProbeValue::Xcproj(self)
    }

    fn from_value(value: &ProbeValue) -> Option<Self> {
        match value {
            ProbeValue::Xcproj(info) => Some(*info),
            _ => None,
        }
    }
}

/// Slots for computed probe results.
///
/// While disabled, lookups miss and stores are dropped. Slots filled before
/// disabling are kept and become visible again once caching is re-enabled.
#[derive(Debug, Clone)]
pub struct ProbeCache {
    enabled: bool,
    slots: HashMap<ProbeKey, ProbeValue>,
}

impl Default for ProbeCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeCache {
    /// Create an empty, enabled cache.
    pub fn new() -> Self {
        Self {
            enabled: true,
            slots: HashMap::new(),
        }
    }

    /// Whether lookups and stores are active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn caching on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Stored result for `key`, if caching is enabled and the probe has run.
    pub fn lookup<T: CachedValue>(&self, key: ProbeKey) -> Option<T> {
        if !self.enabled {
            return None;
        }
        self.slots.get(&key).and_then(T::from_value)
    }

    /// Store a computed result. Ignored while caching is disabled.
    pub fn store<T: CachedValue>(&mut self, key: ProbeKey, value: T) {
        if self.enabled {
            self.slots.insert(key, value.into_value());
        }
    }

    /// Whether `key` has a computed slot, regardless of the enabled flag.
    #[cfg(test)]
    fn is_computed(&self, key: ProbeKey) -> bool {
        self.slots.contains_key(&key)
    }

    /// Number of computed slots.
    #[cfg(test)]
    fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no probe has been stored yet.
    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_result_is_a_computed_slot() {
        let mut cache = ProbeCache::new();
        assert_eq!(cache.lookup::<Option<String>>(ProbeKey::GitVersion), None);

        cache.store::<Option<String>>(ProbeKey::GitVersion, None);

        assert!(cache.is_computed(ProbeKey::GitVersion));
        assert_eq!(
            cache.lookup::<Option<String>>(ProbeKey::GitVersion),
            Some(None)
        );
    }

    #[test]
    fn negative_flag_is_distinct_from_uncomputed() {
        let mut cache = ProbeCache::new();
        cache.store(ProbeKey::ItunesInstalled, false);
        assert_eq!(cache.lookup::<bool>(ProbeKey::ItunesInstalled), Some(false));
        assert_eq!(cache.lookup::<bool>(ProbeKey::AndroidInstalled), None);
    }

    #[test]
    fn disabled_cache_misses_and_drops_stores() {
        let mut cache = ProbeCache::new();
        cache.store(ProbeKey::NodeVersion, Some("18.17.0".to_string()));
        cache.set_enabled(false);

        assert_eq!(cache.lookup::<Option<String>>(ProbeKey::NodeVersion), None);
        cache.store(ProbeKey::NpmVersion, Some("9.6.7".to_string()));
        assert!(!cache.is_computed(ProbeKey::NpmVersion));

        cache.set_enabled(true);
        assert_eq!(
            cache.lookup::<Option<String>>(ProbeKey::NodeVersion),
            Some(Some("18.17.0".to_string()))
        );
    }

    #[test]
    fn mismatched_type_is_a_miss() {
        let mut cache = ProbeCache::new();
        cache.store(ProbeKey::CocoapodsWorking, Some(true));
        assert_eq!(cache.lookup::<bool>(ProbeKey::CocoapodsWorking), None);
        assert_eq!(
            cache.lookup::<Option<bool>>(ProbeKey::CocoapodsWorking),
            Some(Some(true))
        );
    }
}
