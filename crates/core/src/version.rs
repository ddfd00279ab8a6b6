//! NDK version numbers
//!
//! Versions have the shape `MAJOR.MINOR[.BUILD[.REVISION]]`. Missing trailing
//! components compare as zero, so `2.0` and `2.0.0.0` are the same version.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::VersionError;

/// Component-wise comparable NDK version
#[derive(Debug, Clone, Copy)]
pub struct NdkVersion {
    components: [u32; 4],
    len: usize,
}

impl NdkVersion {
    /// Create a four-component version
    pub fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            components: [major, minor, build, revision],
            len: 4,
        }
    }

    /// Parse `MAJOR.MINOR[.BUILD[.REVISION]]`
    pub fn parse(s: &str) -> Result<Self, VersionError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(VersionError::Empty);
        }

        let parts: Vec<&str> = s.split('.').collect();
        if !(2..=4).contains(&parts.len()) {
            return Err(VersionError::ComponentCount(parts.len()));
        }

        let mut components = [0u32; 4];
        for (slot, part) in components.iter_mut().zip(&parts) {
            // u32::from_str accepts a leading '+', versions don't
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(VersionError::InvalidComponent(part.to_string()));
            }
            *slot = part
                .parse()
                .map_err(|_| VersionError::InvalidComponent(part.to_string()))?;
        }

        Ok(Self {
            components,
            len: parts.len(),
        })
    }

    pub fn major(&self) -> u32 {
        self.components[0]
    }

    pub fn minor(&self) -> u32 {
        self.components[1]
    }

    /// Build number, if the version string carried one
    pub fn build(&self) -> Option<u32> {
        (self.len > 2).then_some(self.components[2])
    }

    /// Revision number, if the version string carried one
    pub fn revision(&self) -> Option<u32> {
        (self.len > 3).then_some(self.components[3])
    }
}

impl Ord for NdkVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components.cmp(&other.components)
    }
}

impl PartialOrd for NdkVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NdkVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NdkVersion {}

impl fmt::Display for NdkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components[..self.len].iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", component)?;
        }
        Ok(())
    }
}

impl FromStr for NdkVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for NdkVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NdkVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_components() {
        let v = NdkVersion::parse("10.2.0.1155").unwrap();
        assert_eq!(v.major(), 10);
        assert_eq!(v.minor(), 2);
        assert_eq!(v.build(), Some(0));
        assert_eq!(v.revision(), Some(1155));

        let short = NdkVersion::parse(" 2.1 ").unwrap();
        assert_eq!(short.build(), None);
        assert_eq!(short.to_string(), "2.1");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(NdkVersion::parse(""), Err(VersionError::Empty));
        assert_eq!(NdkVersion::parse("10"), Err(VersionError::ComponentCount(1)));
        assert_eq!(NdkVersion::parse("1.2.3.4.5"), Err(VersionError::ComponentCount(5)));
        assert!(matches!(NdkVersion::parse("1.x"), Err(VersionError::InvalidComponent(_))));
        assert!(matches!(NdkVersion::parse("1.+2"), Err(VersionError::InvalidComponent(_))));
        assert!(matches!(NdkVersion::parse("1..2"), Err(VersionError::InvalidComponent(_))));
        assert!(matches!(NdkVersion::parse("1.99999999999"), Err(VersionError::InvalidComponent(_))));
    }

    #[test]
    fn test_ordering_is_numeric() {
        let a: NdkVersion = "10.2.0.9".parse().unwrap();
        let b: NdkVersion = "10.2.0.10".parse().unwrap();
        let c: NdkVersion = "10.10".parse().unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_missing_components_are_zero() {
        let short: NdkVersion = "2.0".parse().unwrap();
        let long = NdkVersion::new(2, 0, 0, 0);
        assert_eq!(short, long);
        assert!(short < NdkVersion::new(2, 0, 0, 1));
    }

    #[test]
    fn test_serde_as_string() {
        let v: NdkVersion = "2.1.0".parse().unwrap();
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "\"2.1.0\"");
        let back: NdkVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), "2.1.0");
        assert!(serde_json::from_str::<NdkVersion>("\"two\"").is_err());
    }
}
