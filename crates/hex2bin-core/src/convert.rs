use std::path::Path;

use crate::error::{Error, Result};
use crate::image::{FINAL_SIZE, FileImage, ImageSink};
use crate::report::{ByteCounts, ConversionReport, sha256_padded_hex};
use crate::token::{ByteStream, decode_listing, decode_stream};

/// Converter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Size the finished image is padded to.
    pub final_size: u64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            final_size: FINAL_SIZE,
        }
    }
}

/// Convert the hex listing at `input` into a padded image at `output`.
///
/// Order of checks:
/// - `output` must not exist (checked first, nothing is read or written)
/// - every token must decode
/// - decoded length must fit in `final_size`
/// - then decode/write, count check, pad, final size check
///
/// Once `output` is created it is left on disk whatever happens.
pub fn convert(input: &Path, output: &Path, opts: ConvertOptions) -> Result<ConversionReport> {
    convert_with_progress(input, output, opts, |_| {})
}

/// Like [`convert`], calling `on_counts` once N_in and N_out are known.
///
/// The callback runs before the count gate, so it sees mismatching counts too,
/// and it has run by the time padding can fail.
pub fn convert_with_progress<F>(
    input: &Path,
    output: &Path,
    opts: ConvertOptions,
    on_counts: F,
) -> Result<ConversionReport>
where
    F: FnMut(&ByteCounts),
{
    if output.exists() {
        return Err(Error::DestinationExists {
            path: output.to_path_buf(),
        });
    }

    let raw = std::fs::read(input).map_err(|source| Error::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;

    let stream = decode_listing(&raw)?;
    check_fits(&stream, opts)?;

    let mut image = FileImage::create(output)?;
    let report = write_image(&stream, &mut image, opts, on_counts)?;

    log::info!(
        "wrote {} ({} data bytes, {} padding)",
        output.display(),
        report.bytes_written,
        report.padding_bytes
    );
    Ok(report)
}

/// Run the whole pipeline against an arbitrary sink.
pub fn convert_into<S: ImageSink>(
    text: &str,
    sink: &mut S,
    opts: ConvertOptions,
) -> Result<ConversionReport> {
    convert_into_with_progress(text, sink, opts, |_| {})
}

pub fn convert_into_with_progress<S, F>(
    text: &str,
    sink: &mut S,
    opts: ConvertOptions,
    on_counts: F,
) -> Result<ConversionReport>
where
    S: ImageSink,
    F: FnMut(&ByteCounts),
{
    let stream = decode_stream(text)?;
    check_fits(&stream, opts)?;
    write_image(&stream, sink, opts, on_counts)
}

fn check_fits(stream: &ByteStream, opts: ConvertOptions) -> Result<()> {
    if stream.len() > opts.final_size {
        return Err(Error::InputTooLarge {
            len: stream.len(),
            limit: opts.final_size,
        });
    }
    Ok(())
}

fn write_image<S, F>(
    stream: &ByteStream,
    sink: &mut S,
    opts: ConvertOptions,
    mut on_counts: F,
) -> Result<ConversionReport>
where
    S: ImageSink,
    F: FnMut(&ByteCounts),
{
    sink.append(&stream.bytes).map_err(Error::Write)?;

    let counts = ByteCounts {
        input_tokens: stream.token_count,
        output_bytes: sink.len().map_err(Error::CountRetrievalFailed)?,
    };
    log::debug!(
        "input tokens: {}, output bytes: {}",
        counts.input_tokens,
        counts.output_bytes
    );
    on_counts(&counts);

    if !counts.matches() {
        return Err(Error::ByteCountMismatch {
            input_tokens: counts.input_tokens,
            output_bytes: counts.output_bytes,
        });
    }

    sink.extend_to(opts.final_size).map_err(Error::Write)?;

    let final_size = sink.len().map_err(Error::CountRetrievalFailed)?;
    if final_size != opts.final_size {
        return Err(Error::PaddingFailed {
            expected: opts.final_size,
            actual: final_size,
        });
    }

    let padding_bytes = final_size - counts.output_bytes;
    Ok(ConversionReport {
        input_tokens: counts.input_tokens,
        bytes_written: counts.output_bytes,
        padding_bytes,
        final_size,
        sha256: sha256_padded_hex(&stream.bytes, padding_bytes),
    })
}
