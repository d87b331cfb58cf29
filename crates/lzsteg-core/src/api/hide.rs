use std::path::{Path, PathBuf};

use super::{format_of, read_cover, write_file};
use crate::{EmbedOptions, Format, LzSteg, LzStegError};

pub fn prepare() -> HideApi {
    HideApi::default()
}

#[derive(Default, Debug)]
pub struct HideApi {
    message: Option<Vec<u8>>,
    cover: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Option<Format>,
    options: EmbedOptions,
}

impl HideApi {
    pub fn with_options(mut self, options: EmbedOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.as_bytes().to_vec());
        self
    }

    /// hide arbitrary bytes instead of a text message
    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.message = Some(data.into());
        self
    }

    /// The compressed stream that carries the message, used readonly.
    pub fn with_cover<A: AsRef<Path>>(mut self, cover: A) -> Self {
        self.cover = Some(cover.as_ref().to_path_buf());
        self
    }

    /// Where the cover with the hidden message goes, may be the cover itself.
    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the cover format
    /// If `None` is passed, the format is derived from the cover file extension
    pub fn use_format(mut self, format: Option<Format>) -> Self {
        self.format = format;
        self
    }

    pub fn execute(mut self) -> Result<(), LzStegError> {
        let output = self.output.take();
        if self.message.is_none() {
            return Err(LzStegError::MissingMessage);
        }
        if self.cover.is_none() {
            return Err(LzStegError::CarrierNotSet);
        }
        let Some(output) = output else {
            return Err(LzStegError::TargetNotSet);
        };

        let stream = self.execute_in_memory()?;
        write_file(&output, &stream)
    }

    /// Hides the message and returns the cover stream with the message.
    /// An output file set with [`HideApi::with_output`] is ignored.
    pub fn execute_in_memory(self) -> Result<Vec<u8>, LzStegError> {
        let Some(message) = self.message else {
            return Err(LzStegError::MissingMessage);
        };
        let Some(cover) = self.cover else {
            return Err(LzStegError::CarrierNotSet);
        };

        let format = format_of(self.format, &cover)?;
        let mut stream = read_cover(&cover)?;
        LzSteg::new(format)
            .with_options(self.options)
            .store(&mut stream, &message)?;

        Ok(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixtures;
    use tempfile::tempdir;

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let cover = fixtures::lz4_cover(temp_dir.path(), "cover.lz4");

        crate::api::hide::prepare()
            .with_message("Hello, World!")
            .with_cover(&cover)
            .with_output(temp_dir.path().join("cover-with-secret.lz4"))
            .execute()
            .expect("Failed to hide message in cover");

        let original = std::fs::read(&cover).unwrap();
        let secret = std::fs::read(temp_dir.path().join("cover-with-secret.lz4")).unwrap();
        assert_eq!(original.len(), secret.len());
        assert_ne!(original, secret);
    }

    #[test]
    fn should_return_the_cover_without_an_output_file() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let cover = fixtures::snappy_cover(temp_dir.path(), "cover.sz");

        let secret = prepare()
            .with_message("in memory")
            .with_cover(&cover)
            .execute_in_memory()
            .expect("Failed to hide message in cover");

        let original = std::fs::read(&cover).unwrap();
        assert_eq!(secret.len(), original.len());
        assert_ne!(secret, original);
        assert_eq!(
            LzSteg::new(Format::Snappy).retrieve(&secret).unwrap(),
            b"in memory"
        );
    }

    #[test]
    fn should_complain_about_missing_parts() {
        assert!(matches!(
            prepare().with_cover("cover.lz4").with_output("out.lz4").execute(),
            Err(LzStegError::MissingMessage)
        ));
        assert!(matches!(
            prepare().with_message("hi").with_output("out.lz4").execute(),
            Err(LzStegError::CarrierNotSet)
        ));
        assert!(matches!(
            prepare().with_message("hi").with_cover("cover.lz4").execute(),
            Err(LzStegError::TargetNotSet)
        ));
    }

    #[test]
    fn should_need_a_format_for_unknown_extensions() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let cover = fixtures::snappy_cover(temp_dir.path(), "cover.bin");

        let result = prepare()
            .with_message("hi")
            .with_cover(&cover)
            .with_output(temp_dir.path().join("out.bin"))
            .execute();
        assert!(matches!(result, Err(LzStegError::UnsupportedFormat(_))));

        prepare()
            .with_message("hi")
            .with_cover(&cover)
            .with_format(Format::Snappy)
            .with_output(temp_dir.path().join("out.bin"))
            .execute()
            .expect("Failed to hide message in snappy cover");
    }

    #[test]
    fn should_report_unreadable_covers() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");

        assert!(matches!(
            prepare()
                .with_message("hi")
                .with_cover(temp_dir.path().join("missing.lz4"))
                .with_output(temp_dir.path().join("out.lz4"))
                .execute(),
            Err(LzStegError::ReadError { .. })
        ));
    }
}
