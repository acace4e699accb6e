//! Trace files on disk.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Instant;

use tracing::debug;

use crate::{Error, Result};

/// Which side of the comparison a trace belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceSide {
    /// Trace written by the emulator under test.
    Output,
    /// nestest reference log.
    Nestest,
}

impl fmt::Display for TraceSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output => write!(f, "output"),
            Self::Nestest => write!(f, "nestest"),
        }
    }
}

/// Read a whole trace into trimmed lines.
///
/// Files ending in `.zst` are decompressed first. Blank lines at the end of
/// the file are dropped so a trailing newline never becomes a record.
pub fn load_trace(path: &Path) -> Result<Vec<String>> {
    let start = Instant::now();
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let mut bytes = Vec::new();
    if path.extension().is_some_and(|ext| ext == "zst") {
        zstd::stream::Decoder::new(file)
            .and_then(|mut decoder| decoder.read_to_end(&mut bytes))
            .map_err(io_err)?;
    } else {
        BufReader::new(file).read_to_end(&mut bytes).map_err(io_err)?;
    }

    let text = String::from_utf8(bytes).map_err(|source| Error::Encoding {
        path: path.to_path_buf(),
        source,
    })?;

    let mut lines: Vec<String> = text.lines().map(|line| line.trim().to_string()).collect();
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }

    let elapsed = start.elapsed();
    crate::metrics::record_load(elapsed);
    debug!(path = %path.display(), lines = lines.len(), "trace loaded");
    Ok(lines)
}
