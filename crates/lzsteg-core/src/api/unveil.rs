use std::path::{Path, PathBuf};

use super::{format_of, read_cover, write_file};
use crate::{EmbedOptions, Format, LzSteg, LzStegError};

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    secret_cover: Option<PathBuf>,
    output_file: Option<PathBuf>,
    format: Option<Format>,
    options: EmbedOptions,
}

impl UnveilApi {
    /// Use the message framing the message was hidden with
    pub fn with_options(mut self, options: EmbedOptions) -> Self {
        self.options = options;
        self
    }

    /// This is the compressed stream that contains the message to be unveiled
    pub fn from_secret_file(mut self, secret_cover: impl AsRef<Path>) -> Self {
        self.secret_cover = Some(secret_cover.as_ref().to_path_buf());
        self
    }

    /// The message will be saved to this file as well
    pub fn into_output_file(mut self, output_file: impl AsRef<Path>) -> Self {
        self.output_file = Some(output_file.as_ref().to_path_buf());
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// If `None` is passed, the format is derived from the file extension
    pub fn use_format(mut self, format: Option<Format>) -> Self {
        self.format = format;
        self
    }

    /// Execute the unveil process and return the message
    pub fn execute(self) -> Result<Vec<u8>, LzStegError> {
        let Some(secret_cover) = self.secret_cover else {
            return Err(LzStegError::CarrierNotSet);
        };

        let format = format_of(self.format, &secret_cover)?;
        let stream = read_cover(&secret_cover)?;
        let message = LzSteg::new(format)
            .with_options(self.options)
            .retrieve(&stream)?;

        if let Some(output_file) = self.output_file {
            write_file(&output_file, &message)?;
        }

        Ok(message)
    }
}
