//! Debian package filename parsing
//!
//! Derives package name, version and architecture from asset names following
//! the `name_version_arch.deb` convention.

use crate::config::ShortNamePolicy;
use crate::{Error, Result};

pub const DEB_SUFFIX: &str = ".deb";

/// Version used when a filename carries no version segment
pub const FALLBACK_VERSION: &str = "1.0";

/// Architecture used when a filename carries no architecture segment
pub const FALLBACK_ARCHITECTURE: &str = "all";

/// Package identity parsed from a `.deb` filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub architecture: String,
}

impl PackageInfo {
    /// Parse `name_version[_...]_arch.deb`.
    ///
    /// Only the first, second and last `_`-separated segments are used; any
    /// segments in between are ignored. Names with fewer than three segments
    /// are rejected or mapped to [`FALLBACK_VERSION`]/[`FALLBACK_ARCHITECTURE`]
    /// depending on `policy`.
    pub fn from_filename(filename: &str, policy: ShortNamePolicy) -> Result<Self> {
        let stem = filename
            .strip_suffix(DEB_SUFFIX)
            .ok_or_else(|| Error::InvalidFilename(format!("{filename}: not a .deb file")))?;

        let parts: Vec<&str> = stem.split('_').collect();
        check_segment(filename, "package name", parts[0])?;

        if parts.len() >= 3 {
            let version = parts[1];
            let architecture = parts[parts.len() - 1];
            check_segment(filename, "version", version)?;
            check_segment(filename, "architecture", architecture)?;

            return Ok(Self {
                name: parts[0].to_string(),
                version: version.to_string(),
                architecture: architecture.to_string(),
            });
        }

        match policy {
            ShortNamePolicy::Skip => Err(Error::InvalidFilename(format!(
                "{filename}: expected name_version_arch.deb"
            ))),
            ShortNamePolicy::Fallback => {
                check_segment(filename, "package name", stem)?;
                Ok(Self {
                    name: stem.to_string(),
                    version: FALLBACK_VERSION.to_string(),
                    architecture: FALLBACK_ARCHITECTURE.to_string(),
                })
            }
        }
    }
}

/// Control field values must be non-empty single tokens
fn check_segment(filename: &str, field: &str, segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(Error::InvalidFilename(format!("{filename}: empty {field}")));
    }
    if segment.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(Error::InvalidFilename(format!("{filename}: whitespace in {field}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_name() {
        let info =
            PackageInfo::from_filename("mypkg_1.2.3_amd64.deb", ShortNamePolicy::Skip).unwrap();
        assert_eq!(info.name, "mypkg");
        assert_eq!(info.version, "1.2.3");
        assert_eq!(info.architecture, "amd64");
    }

    #[test]
    fn test_parse_extra_segments() {
        // Middle segments are dropped, not joined into the version
        let info =
            PackageInfo::from_filename("nova_2.0_beta_1_arm64.deb", ShortNamePolicy::Skip).unwrap();
        assert_eq!(info.name, "nova");
        assert_eq!(info.version, "2.0");
        assert_eq!(info.architecture, "arm64");
    }

    #[test]
    fn test_short_name_skip() {
        assert!(matches!(
            PackageInfo::from_filename("weird.deb", ShortNamePolicy::Skip),
            Err(Error::InvalidFilename(_))
        ));
        assert!(matches!(
            PackageInfo::from_filename("tool_1.0.deb", ShortNamePolicy::Skip),
            Err(Error::InvalidFilename(_))
        ));
    }

    #[test]
    fn test_short_name_fallback() {
        let expected = PackageInfo {
            name: "weird".to_string(),
            version: "1.0".to_string(),
            architecture: "all".to_string(),
        };
        for _ in 0..3 {
            assert_eq!(
                PackageInfo::from_filename("weird.deb", ShortNamePolicy::Fallback).unwrap(),
                expected
            );
        }

        let info = PackageInfo::from_filename("tool_2.1.deb", ShortNamePolicy::Fallback).unwrap();
        assert_eq!(info.name, "tool_2.1");
        assert_eq!(info.version, "1.0");
    }

    #[test]
    fn test_rejects_non_deb_and_empty_name() {
        assert!(PackageInfo::from_filename("readme.txt", ShortNamePolicy::Fallback).is_err());
        assert!(PackageInfo::from_filename(".deb", ShortNamePolicy::Fallback).is_err());
        assert!(PackageInfo::from_filename("_1.0_amd64.deb", ShortNamePolicy::Fallback).is_err());
    }

    #[test]
    fn test_rejects_empty_segments() {
        for name in ["nova__arm64.deb", "nova_1.0_.deb", "nova__.deb", "__.deb"] {
            assert!(
                matches!(
                    PackageInfo::from_filename(name, ShortNamePolicy::Fallback),
                    Err(Error::InvalidFilename(_))
                ),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_whitespace_in_segments() {
        for name in [
            "nova_1.0\nDepends: evil_arm64.deb",
            "nova_1.0_arm 64.deb",
            "no va_1.0_arm64.deb",
            "nova_1.0_arm64\t.deb",
            "bad\nname.deb",
        ] {
            assert!(
                PackageInfo::from_filename(name, ShortNamePolicy::Fallback).is_err(),
                "{name:?} should be rejected"
            );
        }
    }
}
