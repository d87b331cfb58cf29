mod cli;
mod codec;
mod commands;

use clap::Parser;
use lzsteg_core::LzStegError;

use crate::cli::{CliArgs, Commands};

pub type CliResult<T> = Result<T, LzStegError>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();
    let format = args.format;

    match args.command {
        Commands::Hide(hide) => hide.run(format),
        Commands::Unveil(unveil) => unveil.run(format),
        Commands::Capacity(capacity) => capacity.run(format),
        Commands::Compress(compress) => compress.run(format),
        Commands::Compare(compare) => compare.run(format),
    }
}
