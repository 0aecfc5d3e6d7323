use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Header carrying the protocol version, `major.minor`.
pub const VERSION_HEADER: &str = "X-Broker-API-Version";

/// Only major 2 is spoken.
pub const SUPPORTED_MAJOR: u32 = 2;

/// First minor that exposes GetInstance, GetBinding, LastBindingOperation and
/// async bind.
pub const MIN_FETCH_MINOR: u32 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("X-Broker-API-Version Header not set")]
    Missing,
    #[error("X-Broker-API-Version Header must contain a version")]
    Malformed,
    #[error("X-Broker-API-Version Header must be 2.x")]
    UnsupportedMajor,
}

impl ApiVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Validates a raw header value. `None` means the header was absent.
    pub fn from_header(raw: Option<&str>) -> Result<Self, VersionError> {
        let raw = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(VersionError::Missing)?;
        let version: Self = raw.parse()?;
        if version.major != SUPPORTED_MAJOR {
            return Err(VersionError::UnsupportedMajor);
        }
        Ok(version)
    }

    pub fn at_least_minor(&self, minor: u32) -> bool {
        self.minor >= minor
    }

    /// Legacy bind responses use the experimental volume-mount encoding.
    pub fn uses_experimental_volume_mounts(&self) -> bool {
        matches!(self.minor, 8 | 9)
    }
}

impl FromStr for ApiVersion {
    type Err = VersionError;

    // Scans like `%d.%d`: trailing text after the minor digits is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (major, rest) = s.split_once('.').ok_or(VersionError::Malformed)?;
        let major = major.parse().map_err(|_| VersionError::Malformed)?;

        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .map_or(rest, |end| &rest[..end]);
        let minor = digits.parse().map_err(|_| VersionError::Malformed)?;

        Ok(Self { major, minor })
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
