//! Checksum generation for remote assets
//!
//! Streams a download once through MD5 and SHA256 while counting bytes, so
//! no payload is held in memory beyond a single chunk.

use std::io::{ErrorKind, Read};

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::IndexConfig;
use crate::{Error, Result};

const CHUNK_SIZE: usize = 8192;
const MAX_REDIRECTS: usize = 10;

/// Digests and length of a downloaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksums {
    /// Lowercase hex, 32 characters
    pub md5: String,
    /// Lowercase hex, 64 characters
    pub sha256: String,
    /// Number of bytes hashed
    pub size: u64,
}

impl Checksums {
    /// `Installed-Size` in KiB (floor division)
    pub fn installed_size(&self) -> u64 {
        self.size / 1024
    }
}

struct MultiHasher {
    md5: md5::Context,
    sha256: Sha256,
    size: u64,
}

impl MultiHasher {
    fn new() -> Self {
        Self {
            md5: md5::Context::new(),
            sha256: Sha256::new(),
            size: 0,
        }
    }

    fn update(&mut self, data: &[u8]) {
        self.size += data.len() as u64;
        self.md5.consume(data);
        self.sha256.update(data);
    }

    fn finalize(self) -> Checksums {
        Checksums {
            md5: format!("{:x}", self.md5.compute()),
            sha256: format!("{:x}", self.sha256.finalize()),
            size: self.size,
        }
    }
}

/// Compute MD5, SHA256 and length of everything `reader` yields
pub fn hash_reader<R: Read>(mut reader: R) -> std::io::Result<Checksums> {
    let mut hasher = MultiHasher::new();

    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize())
}

/// Source of checksums for an asset URL.
///
/// Implementations must release any connection before returning, on success
/// and failure alike.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Checksums>;
}

/// Downloads assets over HTTP(S), following redirects
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &IndexConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Checksums> {
        debug!("Downloading {}", url);
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status,
            });
        }

        let checksums = hash_reader(response).map_err(|source| Error::Read {
            url: url.to_string(),
            source,
        })?;

        if checksums.size == 0 {
            return Err(Error::EmptyDownload(url.to_string()));
        }

        debug!("Hashed {} bytes from {}", checksums.size, url);
        Ok(checksums)
    }
}
