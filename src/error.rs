use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Fatal conditions. Anything of this type reaching `main` terminates the
/// process with exit code 1; transient request failures never become a
/// `WilmaError` inside the fetch loop, they are retried instead.
#[derive(Debug, Error)]
pub enum WilmaError {
    #[error("Wilma URL {0} is not valid")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("no SessionID field in the index_json response")]
    MissingSessionId,

    #[error("login failed, status code {0}")]
    LoginRejected(StatusCode),

    #[error("date {0} is not a valid dd.mm.yyyy date")]
    InvalidDate(String),

    #[error("resource type {0} is not valid")]
    InvalidResourceType(String),

    #[error("writing output file {} failed: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("giving up after {0} failed attempts")]
    RetriesExhausted(u32),
}
