//! Builder style entry points working on cover files.

pub mod hide;
pub mod scan;
pub mod unveil;

use std::fs;
use std::path::Path;

use log::error;

use crate::{Format, LzStegError, Result};

/// the explicitly chosen format or the one the file extension suggests
pub(crate) fn format_of(format: Option<Format>, cover: &Path) -> Result<Format> {
    match format {
        Some(format) => Ok(format),
        None => Format::from_path(cover),
    }
}

pub(crate) fn read_cover(cover: &Path) -> Result<Vec<u8>> {
    fs::read(cover).map_err(|source| {
        error!("Error reading cover {cover:?}: {source}");
        LzStegError::ReadError { source }
    })
}

pub(crate) fn write_file(target: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(target, bytes).map_err(|source| {
        error!("Error writing file {target:?}: {source}");
        LzStegError::WriteError { source }
    })
}
