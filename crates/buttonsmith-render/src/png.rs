//! Deterministic PNG codec.
//!
//! Encoding uses fixed compression settings so the same bitmap always yields
//! byte-identical output. Decoding normalises every supported color type to
//! 8-bit RGBA.

use std::io::{Cursor, Write};
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Decoder, Encoder, FilterType, Transformations};
use thiserror::Error;

use crate::bitmap::Bitmap;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("PNG decoding error: {0}")]
    Decoding(#[from] png::DecodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Unsupported PNG layout: {0}")]
    Unsupported(String),
}

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Use a fixed value for determinism.
    pub compression: Compression,
    /// Filter type. Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

impl PngConfig {
    /// Create config optimized for file size (slower, but deterministic).
    pub fn best_compression() -> Self {
        Self {
            compression: Compression::Best,
            filter: FilterType::Paeth,
        }
    }
}

/// Write an RGBA bitmap to any writer.
pub fn write_rgba_to_writer<W: Write>(
    bitmap: &Bitmap,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    if bitmap.width == 0 || bitmap.height == 0 {
        return Err(PngError::InvalidDimensions(format!(
            "{}x{} bitmap cannot be encoded",
            bitmap.width, bitmap.height
        )));
    }

    let mut encoder = Encoder::new(writer, bitmap.width, bitmap.height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(bitmap.as_rgba8())?;

    Ok(())
}

/// Encode a bitmap to PNG bytes.
pub fn encode_rgba(bitmap: &Bitmap, config: &PngConfig) -> Result<Vec<u8>, PngError> {
    let mut data = Vec::new();
    write_rgba_to_writer(bitmap, &mut data, config)?;
    Ok(data)
}

/// Write an RGBA bitmap to a PNG file.
pub fn write_rgba(bitmap: &Bitmap, path: &Path, config: &PngConfig) -> Result<(), PngError> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);

    write_rgba_to_writer(bitmap, writer, config)
}

/// Compute the BLAKE3 hash of PNG data.
pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Encode to a Vec<u8> and return the hash.
pub fn write_rgba_to_vec_with_hash(
    bitmap: &Bitmap,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    let data = encode_rgba(bitmap, config)?;
    let hash = hash_png(&data);
    Ok((data, hash))
}

/// Decode PNG bytes into an RGBA bitmap.
pub fn decode_rgba(data: &[u8]) -> Result<Bitmap, PngError> {
    let mut decoder = Decoder::new(Cursor::new(data));
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != BitDepth::Eight {
        return Err(PngError::Unsupported(format!(
            "bit depth {:?} after expansion",
            info.bit_depth
        )));
    }

    let rgba: Vec<u8> = match info.color_type {
        ColorType::Rgba => buf,
        ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        ColorType::Indexed => {
            return Err(PngError::Unsupported(
                "indexed color was not expanded".to_string(),
            ))
        }
    };

    Bitmap::from_rgba8(info.width, info.height, rgba).ok_or_else(|| {
        PngError::InvalidDimensions(format!(
            "decoded buffer does not match {}x{}",
            info.width, info.height
        ))
    })
}
