//! Error types for multidiff

use std::path::PathBuf;

use thiserror::Error;

/// Failures talking to the diff server.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not build HTTP client: {0}")]
    Setup(#[source] reqwest::Error),
}

/// A content fetch that did not produce content. Local to one side of one pair.
pub type FetchError = ClientError;

/// Failures loading a `--file` list of pairs.
#[derive(Error, Debug)]
pub enum PairsFileError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} must contain a JSON array of file pairs", path.display())]
    NotAList { path: PathBuf },
}
