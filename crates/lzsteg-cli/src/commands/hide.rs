use std::path::PathBuf;

use clap::Args;
use lzsteg_core::Format;

use super::write_stdout;
use crate::cli::FramingArgs;
use crate::CliResult;

/// Hides a message in an LZ4 or Snappy compressed file
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Compressed file that carries the message, used readonly unless --in-place is given
    #[arg(short = 'i', long = "in", value_name = "cover file", required = true)]
    pub cover: PathBuf,

    /// Compressed file with the hidden message, written to stdout otherwise
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output file",
        conflicts_with = "in_place"
    )]
    pub write_to_file: Option<PathBuf>,

    /// Rewrite the cover file itself
    #[arg(long)]
    pub in_place: bool,

    /// A text message that will be hidden
    #[arg(short, long, value_name = "text message", required = true)]
    pub message: String,

    #[command(flatten)]
    pub framing: FramingArgs,
}

impl HideArgs {
    pub fn run(self, format: Option<Format>) -> CliResult<()> {
        let target = if self.in_place {
            Some(self.cover.clone())
        } else {
            self.write_to_file
        };

        let secret = lzsteg_core::commands::hide(
            &self.cover,
            target.as_deref(),
            &self.message,
            format,
            self.framing.into(),
        )?;
        match secret {
            Some(stream) => write_stdout(&stream),
            None => Ok(()),
        }
    }
}
