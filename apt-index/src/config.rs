//! Index generation settings
//!
//! Everything the pipeline needs to know besides the release listing itself.

use std::time::Duration;

use clap::ValueEnum;

pub const DEFAULT_MAINTAINER: &str = "Nova IDE <alexnova205@gmail.com>";
pub const DEFAULT_HOMEPAGE: &str = "https://github.com/nova-ide/novaide-packages";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DESCRIPTION_LIMIT: usize = 200;

/// What to do with `.deb` names that lack `_version_arch` segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ShortNamePolicy {
    /// Leave the asset out of the index
    #[default]
    Skip,
    /// Use the whole stem as name with version `1.0` and architecture `all`
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Value of the `Maintainer` field
    pub maintainer: String,

    /// Value of the `Homepage` field
    pub homepage: String,

    /// Index prereleases as well as full releases. Drafts are always skipped.
    pub include_prereleases: bool,

    pub short_names: ShortNamePolicy,

    /// Maximum description length in characters before truncation
    pub description_limit: usize,

    /// Per-download timeout
    pub timeout: Duration,

    pub user_agent: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            maintainer: DEFAULT_MAINTAINER.to_string(),
            homepage: DEFAULT_HOMEPAGE.to_string(),
            include_prereleases: false,
            short_names: ShortNamePolicy::default(),
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }
}

pub fn default_user_agent() -> String {
    format!("apt-index/{}", env!("CARGO_PKG_VERSION"))
}
