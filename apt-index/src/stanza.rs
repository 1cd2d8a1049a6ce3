//! Debian control stanza rendering
//!
//! One stanza per package in the order APT tooling conventionally expects.

use std::fmt;

use crate::checksum::Checksums;
use crate::config::IndexConfig;
use crate::deb::PackageInfo;
use crate::release::{Asset, Release};

const ELLIPSIS: &str = "...";

/// A single entry of a `Packages` index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageStanza {
    pub package: String,
    pub version: String,
    pub architecture: String,
    pub maintainer: String,
    /// Size in KiB
    pub installed_size: u64,
    pub description: String,
    pub homepage: String,
    pub filename: String,
    /// Size in bytes
    pub size: u64,
    pub md5sum: String,
    pub sha256: String,
}

impl PackageStanza {
    pub fn new(
        info: PackageInfo,
        checksums: Checksums,
        release: &Release,
        asset: &Asset,
        config: &IndexConfig,
    ) -> Self {
        let description = describe(&release.body, &info.name, config.description_limit);

        Self {
            installed_size: checksums.installed_size(),
            size: checksums.size,
            md5sum: checksums.md5,
            sha256: checksums.sha256,
            package: info.name,
            version: info.version,
            architecture: info.architecture,
            maintainer: config.maintainer.clone(),
            description,
            homepage: config.homepage.clone(),
            filename: asset.browser_download_url.clone(),
        }
    }
}

/// First line of the release notes, or `Package <name>` when there is none.
/// Control fields are single-line, so only that line is ever used.
fn describe(body: &str, package: &str, limit: usize) -> String {
    let first_line = body.lines().next().unwrap_or("").trim();

    if first_line.is_empty() {
        return format!("Package {}", package);
    }

    if first_line.chars().count() > limit {
        let mut truncated: String = first_line.chars().take(limit).collect();
        truncated.push_str(ELLIPSIS);
        truncated
    } else {
        first_line.to_string()
    }
}

impl fmt::Display for PackageStanza {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Package: {}", self.package)?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "Architecture: {}", self.architecture)?;
        writeln!(f, "Maintainer: {}", self.maintainer)?;
        writeln!(f, "Installed-Size: {}", self.installed_size)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Homepage: {}", self.homepage)?;
        writeln!(f, "Filename: {}", self.filename)?;
        writeln!(f, "Size: {}", self.size)?;
        writeln!(f, "MD5sum: {}", self.md5sum)?;
        writeln!(f, "SHA256: {}", self.sha256)?;
        writeln!(f)
    }
}
