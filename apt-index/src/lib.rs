//! apt-index: APT Packages index generator for GitHub release assets
//!
//! This crate provides:
//! - Parsing of GitHub release listings (JSON)
//! - Draft/prerelease filtering
//! - Debian filename parsing (`name_version_arch.deb`)
//! - Streaming MD5/SHA-256 checksums of downloaded assets
//! - Rendering of Debian control stanzas for a `Packages` file

pub mod checksum;
pub mod config;
pub mod deb;
pub mod error;
pub mod index;
pub mod release;
pub mod stanza;

pub use checksum::{Checksums, Fetch, HttpFetcher};
pub use config::{IndexConfig, ShortNamePolicy};
pub use deb::PackageInfo;
pub use error::{Error, Result};
pub use index::{build_index, run, write_index, IndexReport, SkippedAsset};
pub use release::{parse_releases, Asset, Release};
pub use stanza::PackageStanza;
