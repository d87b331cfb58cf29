use std::path::Path;

use crate::api::scan::ScanReport;
use crate::{EmbedOptions, Format, LzStegError};

/// hide the message and save the result to `write_to_file`, or hand it back without one
pub fn hide(
    cover: &Path,
    write_to_file: Option<&Path>,
    message: &str,
    format: Option<Format>,
    options: EmbedOptions,
) -> Result<Option<Vec<u8>>, LzStegError> {
    let api = crate::api::hide::prepare()
        .with_options(options)
        .with_cover(cover)
        .use_format(format)
        .with_message(message);

    match write_to_file {
        Some(file) => api.with_output(file).execute().map(|_| None),
        None => api.execute_in_memory().map(Some),
    }
}

/// unveil the message and optionally save it to `destination_file`
pub fn unveil(
    secret_cover: &Path,
    destination_file: Option<&Path>,
    format: Option<Format>,
    options: EmbedOptions,
) -> Result<Vec<u8>, LzStegError> {
    let api = crate::api::unveil::prepare()
        .with_options(options)
        .from_secret_file(secret_cover)
        .use_format(format);

    match destination_file {
        Some(file) => api.into_output_file(file).execute(),
        None => api.execute(),
    }
}

pub fn capacity(cover: &Path, format: Option<Format>) -> Result<ScanReport, LzStegError> {
    crate::api::scan::prepare()
        .from_cover(cover)
        .use_format(format)
        .execute()
}
