use std::path::PathBuf;

use thiserror::Error;
use tracecheck_format::ParseError;

use crate::TraceSide;

/// Trace validation errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid UTF-8: {source}")]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },
    #[error("failed to parse {side} line {line} ({text:?}): {source}")]
    Parse {
        side: TraceSide,
        line: usize,
        text: String,
        #[source]
        source: ParseError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
