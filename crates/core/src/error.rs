//! Error types for YAPI retrieval, schema parsing, persistence and batches.

use std::path::PathBuf;

use thiserror::Error;

/// An embedded schema string could not be parsed.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The text is not valid JSON
    #[error("Invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from talking to the YAPI server.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport or decoding failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// YAPI answered with a non-zero `errcode`
    #[error("YAPI error {errcode}: {message}")]
    Api {
        /// Non-zero YAPI status code
        errcode: i64,
        /// `errmsg` from the envelope
        message: String,
    },

    /// The `data` payload did not have the expected shape
    #[error("Unexpected YAPI payload: {0}")]
    Decode(#[source] serde_json::Error),

    /// The envelope had no usable `data` payload
    #[error("YAPI response is missing {0}")]
    MissingData(&'static str),

    /// The configured base URL could not be joined with an endpoint path
    #[error("Invalid YAPI URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Errors from the persistence capability.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Creating a directory failed
    #[error("Failed to create directory '{}': {source}", path.display())]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing a file failed
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        /// File that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort a whole batch before any module is written.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Nothing was selected
    #[error("No interfaces selected")]
    EmptySelection,

    /// The destination path is empty
    #[error("Output directory is not set")]
    UnresolvedDestination,

    /// The destination directory could not be created
    #[error(transparent)]
    CreateDirectory(StoreError),

    /// The run was cancelled before any module was written
    #[error("Generation cancelled")]
    Cancelled,
}

/// Errors from resolving a caller selection against the category index.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// A requested category does not exist
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    /// A requested interface id does not exist
    #[error("Unknown interface id {0}")]
    UnknownInterface(u64),
}
