//! GitHub release listing parsing
//!
//! Reads the JSON array returned by the releases API and decides which
//! releases are eligible for the index.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{info, warn};

use crate::deb::DEB_SUFFIX;
use crate::{Error, Result};

/// Number of characters of raw input echoed back on a parse failure
const PREVIEW_CHARS: usize = 200;

/// Treat an explicit `null` the same as a missing field
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A file attached to a release. Does not contain all fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Asset {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,

    #[serde(default, deserialize_with = "nullable")]
    pub browser_download_url: String,

    /// Size in bytes as reported by GitHub
    #[serde(default, deserialize_with = "nullable")]
    pub size: u64,
}

impl Asset {
    /// Whether the asset is a Debian binary package (case-sensitive suffix)
    pub fn is_deb(&self) -> bool {
        self.name.ends_with(DEB_SUFFIX)
    }
}

/// A GitHub release. Does not contain all fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Release {
    #[serde(default, deserialize_with = "nullable")]
    pub tag_name: String,

    #[serde(default, deserialize_with = "nullable")]
    pub draft: bool,

    #[serde(default, deserialize_with = "nullable")]
    pub prerelease: bool,

    /// Release notes; the first line becomes the package description
    #[serde(default, deserialize_with = "nullable")]
    pub body: String,

    #[serde(default, deserialize_with = "nullable")]
    pub assets: Vec<Asset>,
}

impl Release {
    /// Reason this release is excluded from the index, if any
    pub fn skip_reason(&self, include_prereleases: bool) -> Option<&'static str> {
        if self.draft {
            Some("draft")
        } else if self.prerelease && !include_prereleases {
            Some("prerelease")
        } else {
            None
        }
    }

    /// Assets whose names end in `.deb`, in listing order
    pub fn deb_assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter().filter(|asset| {
            let keep = asset.is_deb();
            if !keep {
                info!("Ignoring non-deb asset {} in {}", asset.name, self.tag_name);
            }
            keep
        })
    }
}

/// Parse a release listing.
///
/// Empty input, invalid JSON and non-array JSON are fatal. Array elements that
/// do not look like a release are skipped with a warning.
pub fn parse_releases(input: &str) -> Result<Vec<Release>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }

    let value: Value = serde_json::from_str(input).map_err(|source| Error::MalformedInput {
        source,
        preview: input.chars().take(PREVIEW_CHARS).collect(),
    })?;

    let entries = match value {
        Value::Array(entries) => entries,
        other => return Err(Error::WrongShape(json_kind(&other))),
    };

    let mut releases = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<Release>(entry) {
            Ok(release) => releases.push(release),
            Err(e) => warn!("Skipping release entry #{}: {}", index, e),
        }
    }

    Ok(releases)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
