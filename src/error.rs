//! Error types for loading a person export.
//!
//! Only a missing or unreadable input is a hard failure. Encoding and
//! tokenizer problems are absorbed by the loader's fallback chain, and
//! unresolved column roles degrade to empty results.

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The lossy last-resort decode could not be tokenised. Lenient parsing of
    /// valid UTF-8 cannot fail, so reaching this is a bug.
    #[error("no decoding of {} could be parsed, including the lossy fallback", path.display())]
    Unparsable { path: PathBuf },
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;
