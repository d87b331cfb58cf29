use std::path::PathBuf;

use clap::Args;
use lzsteg_core::Format;

use super::write_stdout;
use crate::cli::FramingArgs;
use crate::CliResult;

/// Unveils a message hidden in an LZ4 or Snappy compressed file
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Compressed file that contains the hidden message
    #[arg(
        short = 'i',
        long = "in",
        value_name = "cover file",
        required = true
    )]
    pub secret_cover: PathBuf,

    /// The message will be stored in that file, printed to stdout otherwise
    #[arg(short = 'o', long = "out", value_name = "output file")]
    pub output_file: Option<PathBuf>,

    #[command(flatten)]
    pub framing: FramingArgs,
}

impl UnveilArgs {
    pub fn run(self, format: Option<Format>) -> CliResult<()> {
        let message = lzsteg_core::commands::unveil(
            &self.secret_cover,
            self.output_file.as_deref(),
            format,
            self.framing.into(),
        )?;

        if self.output_file.is_none() {
            write_stdout(&message)?;
        }

        Ok(())
    }
}
