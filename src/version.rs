//! Configuration schema versions.
//!
//! Versions are compared as an explicit `(major, minor, patch)` triple
//! rather than as strings, so `1.10.0` correctly sorts after `1.9.0`.

use std::fmt;

/// A parsed configuration schema version.
///
/// Ordering is the usual lexicographic order on the three components,
/// which is what gates each migration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConfigVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl ConfigVersion {
    /// The version every migration threshold is below: used for absent
    /// or unreadable configs so that all migrations run.
    pub const ZERO: Self = Self::new(0, 0, 0);

    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self { major, minor, patch }
    }

    /// Parse a version string leniently.
    ///
    /// Missing or non-numeric components degrade to `0`; a component's
    /// numeric prefix is honored so `"1.2.2-beta"` parses as `1.2.2`.
    /// This never fails: an unparseable version means "older than
    /// everything" and all migrations run.
    pub fn parse(text: &str) -> Self {
        let mut parts = text.trim().split('.');
        let mut next = || parts.next().map_or(0, numeric_prefix);
        let major = next();
        let minor = next();
        let patch = next();
        Self::new(major, minor, patch)
    }
}

impl fmt::Display for ConfigVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Parse the leading digits of a version component, ignoring any
/// pre-release suffix such as `"2-beta"`.
fn numeric_prefix(component: &str) -> u16 {
    let digits: String = component.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// The running application's version, used for the final config stamp.
pub fn current_version() -> ConfigVersion {
    ConfigVersion::parse(env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        assert_eq!(ConfigVersion::parse("1.2.3"), ConfigVersion::new(1, 2, 3));
    }

    #[test]
    fn test_parse_partial() {
        assert_eq!(ConfigVersion::parse("1.2"), ConfigVersion::new(1, 2, 0));
        assert_eq!(ConfigVersion::parse("2"), ConfigVersion::new(2, 0, 0));
        assert_eq!(ConfigVersion::parse(""), ConfigVersion::ZERO);
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(ConfigVersion::parse("beta"), ConfigVersion::ZERO);
        assert_eq!(
            ConfigVersion::parse("1.2.2-beta"),
            ConfigVersion::new(1, 2, 2)
        );
        assert_eq!(ConfigVersion::parse("1.x.3"), ConfigVersion::new(1, 0, 3));
    }

    #[test]
    fn test_ordering() {
        assert!(ConfigVersion::new(0, 4, 0) < ConfigVersion::new(1, 2, 2));
        assert!(ConfigVersion::new(1, 2, 2) < ConfigVersion::new(1, 3, 0));
        assert!(ConfigVersion::new(1, 9, 0) < ConfigVersion::new(1, 10, 0));
        assert!(ConfigVersion::ZERO < ConfigVersion::new(0, 0, 1));
    }

    #[test]
    fn test_display_round_trip() {
        let v = ConfigVersion::new(1, 4, 0);
        assert_eq!(ConfigVersion::parse(&v.to_string()), v);
    }

    #[test]
    fn test_current_version_is_recent() {
        // The package version gates the final stamp, so it must exceed
        // every migration threshold.
        assert!(current_version() >= ConfigVersion::new(1, 4, 0));
    }
}
