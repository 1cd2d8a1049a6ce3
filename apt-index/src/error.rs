use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No input data received")]
    EmptyInput,

    #[error("JSON parsing failed: {source} (input: {preview}...)")]
    MalformedInput {
        source: serde_json::Error,
        preview: String,
    },

    #[error("Expected JSON array, got {0}")]
    WrongShape(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download of {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Reading {url} failed: {source}")]
    Read {
        url: String,
        source: std::io::Error,
    },

    #[error("Download of {0} returned no data")]
    EmptyDownload(String),

    #[error("Cannot derive package info from filename: {0}")]
    InvalidFilename(String),
}

pub type Result<T> = std::result::Result<T, Error>;
