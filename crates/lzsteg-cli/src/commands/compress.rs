use std::fs;
use std::path::PathBuf;

use clap::Args;
use log::info;
use lzsteg_core::{Format, LzStegError};

use super::{format_for, write_stdout};
use crate::codec;
use crate::CliResult;

/// Compresses a plain file into a cover stream
#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Plain file to compress
    #[arg(short = 'i', long = "in", value_name = "plain file", required = true)]
    pub plain: PathBuf,

    /// Compressed output, its extension picks the format unless --format is given.
    /// Written to stdout otherwise, then --format or the plain file name picks the format
    #[arg(short = 'o', long = "out", value_name = "cover file")]
    pub cover: Option<PathBuf>,
}

impl CompressArgs {
    pub fn run(self, format: Option<Format>) -> CliResult<()> {
        let format = format_for(format, self.cover.as_deref().unwrap_or(self.plain.as_path()))?;
        let plain = fs::read(&self.plain).map_err(|source| LzStegError::ReadError { source })?;
        let cover = codec::compress(format, &plain)?;
        info!(
            "compressed {} bytes into {} bytes of {format}",
            plain.len(),
            cover.len()
        );

        match self.cover {
            Some(file) => fs::write(file, cover).map_err(|source| LzStegError::WriteError { source }),
            None => write_stdout(&cover),
        }
    }
}
