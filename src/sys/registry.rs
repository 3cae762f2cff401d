//! Windows registry reads.
//!
//! On Windows values come from `winreg`; on other hosts no registry exists
//! and [`NoRegistry`] answers every read with `None`.

/// Registry root key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hive {
    /// `HKEY_LOCAL_MACHINE`
    LocalMachine,
}

/// Reads single string values from the registry.
pub trait RegistryReader: Send + Sync {
    /// Read `name` under `hive\key_path`, or `None` if it cannot be read.
    fn read_value(&self, hive: Hive, key_path: &str, name: &str) -> Option<String>;
}

/// Registry reader backed by the Windows registry API.
#[cfg(windows)]
#[derive(Debug, Clone, Copy, Default)]
pub struct WinRegReader;

#[cfg(windows)]
impl RegistryReader for WinRegReader {
    fn read_value(&self, hive: Hive, key_path: &str, name: &str) -> Option<String> {
        use winreg::enums::HKEY_LOCAL_MACHINE;
        use winreg::RegKey;

        let root = match hive {
            Hive::LocalMachine => RegKey::predef(HKEY_LOCAL_MACHINE),
        };
        let value = root
            .open_subkey(key_path)
            .and_then(|key| key.get_value::<String, _>(name));
        match value {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!("Registry read {}\\{} failed: {}", key_path, name, e);
                None
            }
        }
    }
}

/// Registry reader for hosts without a registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRegistry;

impl RegistryReader for NoRegistry {
    fn read_value(&self, _hive: Hive, _key_path: &str, _name: &str) -> Option<String> {
        None
    }
}
