use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use lzsteg_core::{Format, LzStegError};

use super::format_for;
use crate::codec;
use crate::CliResult;

/// Compares two compressed files as encodings and by their decompressed content
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First compressed file, its extension picks the format unless --format is given
    #[arg(value_name = "cover file")]
    pub first: PathBuf,

    /// Second compressed file
    #[arg(value_name = "cover file")]
    pub second: PathBuf,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Comparison {
    pub encodings_differ: bool,
    pub contents_match: bool,
}

pub fn compare(format: Format, first: &[u8], second: &[u8]) -> CliResult<Comparison> {
    Ok(Comparison {
        encodings_differ: first != second,
        contents_match: codec::decompress(format, first)? == codec::decompress(format, second)?,
    })
}

fn read(file: &Path) -> CliResult<Vec<u8>> {
    fs::read(file).map_err(|source| LzStegError::ReadError { source })
}

impl CompareArgs {
    pub fn run(self, format: Option<Format>) -> CliResult<()> {
        let format = format_for(format, &self.first)?;
        let comparison = compare(format, &read(&self.first)?, &read(&self.second)?)?;

        if comparison.encodings_differ {
            println!("{format} encodings differ");
        } else {
            println!("{format} encodings are identical");
        }
        if comparison.contents_match {
            println!("Decompressed files match");
        } else {
            println!("Decompressed files differ");
        }

        Ok(())
    }
}
