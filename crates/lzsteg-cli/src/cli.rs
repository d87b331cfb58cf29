use clap::{Args, Parser, Subcommand};
use lzsteg_core::{EmbedOptions, Format};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Cover stream format (lz4 or snappy), derived from the file extension if omitted
    #[arg(short, long, global = true, value_name = "format")]
    pub format: Option<Format>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    Capacity(capacity::CapacityArgs),
    Compress(compress::CompressArgs),
    Compare(compare::CompareArgs),
}

/// How the message is framed inside the cover, hide and unveil must use the same
#[derive(Args, Debug, Clone, Copy)]
pub struct FramingArgs {
    /// Store the message length in front of the message
    #[arg(long)]
    pub length_prefix: bool,

    /// Do not terminate the message with a zero byte
    #[arg(long)]
    pub no_terminator: bool,
}

impl From<FramingArgs> for EmbedOptions {
    fn from(args: FramingArgs) -> Self {
        EmbedOptions::default()
            .with_length_prefix(args.length_prefix)
            .with_null_terminator(!args.no_terminator)
    }
}
