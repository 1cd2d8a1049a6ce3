//! Packages index generation
//!
//! Walks the release listing in order and turns every eligible `.deb` asset
//! into a stanza. Failures are isolated per asset: a broken asset is recorded
//! and skipped, the rest of the batch carries on.

use std::io::Write;

use tracing::{info, warn};

use crate::checksum::Fetch;
use crate::config::IndexConfig;
use crate::deb::PackageInfo;
use crate::release::{parse_releases, Asset, Release};
use crate::stanza::PackageStanza;
use crate::{Error, Result};

/// Written instead of stanzas when nothing could be indexed
pub const EMPTY_INDEX: &str = "\
# No packages found
# The release listing contained no downloadable .deb assets.
";

/// An asset that was left out of the index and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedAsset {
    pub release: String,
    pub asset: String,
    pub reason: String,
}

/// Outcome of one index run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    pub stanzas: Vec<PackageStanza>,
    pub skipped: Vec<SkippedAsset>,
}

/// Build stanzas for every eligible asset, in listing order
pub fn build_index<F: Fetch + ?Sized>(
    releases: &[Release],
    config: &IndexConfig,
    fetcher: &F,
) -> IndexReport {
    let mut report = IndexReport::default();

    for release in releases {
        if let Some(reason) = release.skip_reason(config.include_prereleases) {
            info!("Skipping {} release {}", reason, release.tag_name);
            continue;
        }

        for asset in release.deb_assets() {
            match build_stanza(release, asset, config, fetcher) {
                Ok(stanza) => {
                    info!(
                        "Indexed {} {} ({})",
                        stanza.package, stanza.version, stanza.architecture
                    );
                    report.stanzas.push(stanza);
                }
                Err(e) => {
                    warn!("Skipping {} from {}: {}", asset.name, release.tag_name, e);
                    report.skipped.push(SkippedAsset {
                        release: release.tag_name.clone(),
                        asset: asset.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    report
}

fn build_stanza<F: Fetch + ?Sized>(
    release: &Release,
    asset: &Asset,
    config: &IndexConfig,
    fetcher: &F,
) -> Result<PackageStanza> {
    let info = PackageInfo::from_filename(&asset.name, config.short_names)?;

    let checksums = fetcher.fetch(&asset.browser_download_url)?;
    if checksums.size == 0 {
        return Err(Error::EmptyDownload(asset.browser_download_url.clone()));
    }

    if asset.size != 0 && asset.size != checksums.size {
        warn!(
            "{}: listing reports {} bytes but {} were downloaded",
            asset.name, asset.size, checksums.size
        );
    }

    Ok(PackageStanza::new(info, checksums, release, asset, config))
}

/// Write the index. An empty report produces a comment block so the file is
/// never blank.
pub fn write_index<W: Write>(out: &mut W, report: &IndexReport) -> std::io::Result<()> {
    if report.stanzas.is_empty() {
        out.write_all(EMPTY_INDEX.as_bytes())?;
    }

    for stanza in &report.stanzas {
        write!(out, "{}", stanza)?;
    }

    out.flush()
}

/// Parse `input`, build the index and write it to `out`.
///
/// Only input errors are returned; per-asset problems end up in
/// [`IndexReport::skipped`]. Nothing is written when the input is rejected.
pub fn run<F: Fetch + ?Sized, W: Write>(
    input: &str,
    config: &IndexConfig,
    fetcher: &F,
    out: &mut W,
) -> Result<IndexReport> {
    let releases = parse_releases(input)?;
    info!("Loaded {} releases", releases.len());

    let report = build_index(&releases, config, fetcher);
    write_index(out, &report)?;

    if !report.skipped.is_empty() {
        warn!("Skipped {} assets", report.skipped.len());
    }
    info!("Processed {} packages", report.stanzas.len());

    Ok(report)
}
