pub mod capacity;
pub mod compare;
pub mod compress;
pub mod hide;
pub mod unveil;

use std::io::Write;
use std::path::Path;

use lzsteg_core::{Format, LzStegError};

use crate::CliResult;

/// the `--format` flag if given, otherwise what the file extension says
pub(crate) fn format_for(format: Option<Format>, file: &Path) -> CliResult<Format> {
    match format {
        Some(format) => Ok(format),
        None => Format::from_path(file),
    }
}

/// writes raw bytes to stdout, used when no output file is given
pub(crate) fn write_stdout(bytes: &[u8]) -> CliResult<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(bytes)
        .and_then(|_| stdout.flush())
        .map_err(|source| LzStegError::WriteError { source })
}
