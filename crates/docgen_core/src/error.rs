use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::frontmatter::FrontMatterError;

/// Fatal errors while assembling a manual. Each names the offending path.
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("manual directory {path:?} doesn't exist")]
    DirectoryNotFound { path: PathBuf },
    #[error("malformed front matter in {path:?}: {source}")]
    MalformedFrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
    #[error("unknown content type {content_type:?} in {path:?}")]
    UnknownContentType { path: PathBuf, content_type: String },
    #[error("multiple coversheets detected: {path:?} (first was {first:?})")]
    DuplicateCoversheet { path: PathBuf, first: PathBuf },
    #[error("no coversheet found in {directory:?}; exactly one document must have `Type: Coversheet`")]
    MissingCoversheet { directory: PathBuf },
    #[error("invalid metadata in {path:?}: {message}")]
    InvalidField { path: PathBuf, message: String },
    #[error("path {path:?} is not valid UTF-8")]
    NonUtf8Path { path: PathBuf },
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AssembleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
