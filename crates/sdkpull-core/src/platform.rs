//! Target platform keys.

use std::fmt;
use std::str::FromStr;

use crate::SetupError;

/// A platform an SDK can be installed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Mac,
    Linux,
    Windows,
}

impl Platform {
    /// Every supported platform, in the order they are listed to users.
    pub const ALL: [Platform; 3] = [Platform::Mac, Platform::Linux, Platform::Windows];

    /// The key used on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Mac => "mac",
            Platform::Linux => "linux",
            Platform::Windows => "windows",
        }
    }

    /// Comma-separated list of valid keys, for error messages and usage text
    pub fn supported_keys() -> String {
        Self::ALL
            .iter()
            .map(|p| p.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Platform {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.key() == s)
            .ok_or_else(|| SetupError::UnsupportedPlatform {
                platform: s.to_string(),
                supported: Self::supported_keys(),
            })
    }
}
