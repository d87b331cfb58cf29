use std::fmt;
use std::path::{Path, PathBuf};

use super::{format_of, read_cover};
use crate::{Capacity, Format, LzSteg, LzStegError};

pub fn prepare() -> ScanApi {
    ScanApi::default()
}

#[derive(Default, Debug)]
pub struct ScanApi {
    cover: Option<PathBuf>,
    format: Option<Format>,
}

/// Sizes and hidden capacity of one cover
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    pub format: Format,
    pub decoded_len: u64,
    pub compressed_len: u64,
    pub capacity: Capacity,
}

impl ScanReport {
    /// compressed size relative to the decoded size
    pub fn compression_ratio(&self) -> f64 {
        ratio(self.compressed_len as f64, self.decoded_len as f64)
    }

    /// guaranteed capacity relative to the compressed size
    pub fn capacity_ratio(&self) -> f64 {
        ratio(self.capacity.bytes() as f64, self.compressed_len as f64)
    }

    pub fn fractional_capacity_ratio(&self) -> f64 {
        ratio(self.capacity.fractional_bytes(), self.compressed_len as f64)
    }
}

fn ratio(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole
    } else {
        0.0
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Format:              {}", self.format)?;
        writeln!(f, "Decoded size:        {} bytes", self.decoded_len)?;
        writeln!(
            f,
            "Compressed size:     {} bytes ({:.2}%)",
            self.compressed_len,
            self.compression_ratio() * 100.0
        )?;
        writeln!(f, "Embeddable matches:  {}", self.capacity.sites)?;
        writeln!(
            f,
            "Capacity:            {} bytes ({:.2}%)",
            self.capacity.bytes(),
            self.capacity_ratio() * 100.0
        )?;
        write!(
            f,
            "Fractional capacity: {:.2} bytes ({:.2}%)",
            self.capacity.fractional_bytes(),
            self.fractional_capacity_ratio() * 100.0
        )
    }
}

impl ScanApi {
    pub fn from_cover(mut self, cover: impl AsRef<Path>) -> Self {
        self.cover = Some(cover.as_ref().to_path_buf());
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

    pub fn execute(self) -> Result<ScanReport, LzStegError> {
        let Some(cover) = self.cover else {
            return Err(LzStegError::CarrierNotSet);
        };

        let format = format_of(self.format, &cover)?;
        let stream = read_cover(&cover)?;
        let steg = LzSteg::new(format);

        Ok(ScanReport {
            format,
            decoded_len: steg.decoded_len(&stream)?,
            compressed_len: stream.len() as u64,
            capacity: steg.scan(&stream)?,
        })
    }
}
