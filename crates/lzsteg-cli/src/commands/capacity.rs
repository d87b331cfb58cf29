use std::path::PathBuf;

use clap::Args;
use lzsteg_core::Format;

use crate::CliResult;

/// Shows how many bytes can be hidden in a compressed file
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Compressed file to scan
    #[arg(short = 'i', long = "in", value_name = "cover file", required = true)]
    pub cover: PathBuf,
}

impl CapacityArgs {
    pub fn run(self, format: Option<Format>) -> CliResult<()> {
        let report = lzsteg_core::commands::capacity(&self.cover, format)?;
        println!("{report}");

        Ok(())
    }
}
