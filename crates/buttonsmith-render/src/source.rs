//! Loading nine-patch source images.
//!
//! A source reference is either a `data:image/png;base64,` URL or a file
//! path. Relative paths resolve against a caller-supplied base directory,
//! normally the directory of the configuration document.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::bitmap::Bitmap;
use crate::png::{decode_rgba, encode_rgba, PngConfig, PngError};

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Errors raised while loading a source image.
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid base64 in data URL: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unsupported data URL (only data:image/png;base64 is accepted)")]
    UnsupportedDataUrl,

    #[error("image has no pixels")]
    Empty,

    #[error(transparent)]
    Png(#[from] PngError),
}

/// Load and decode a source image reference.
pub fn load_source(reference: &str, base_dir: Option<&Path>) -> Result<Bitmap, ImageLoadError> {
    let reference = reference.trim();

    let bytes = if let Some(payload) = strip_data_url(reference)? {
        STANDARD.decode(payload.trim())?
    } else {
        let path = resolve_path(reference, base_dir);
        std::fs::read(&path).map_err(|source| ImageLoadError::Io { path, source })?
    };

    let bitmap = decode_rgba(&bytes)?;
    if bitmap.width == 0 || bitmap.height == 0 {
        return Err(ImageLoadError::Empty);
    }
    Ok(bitmap)
}

/// Encode a bitmap as a `data:image/png;base64,` URL.
pub fn to_data_url(bitmap: &Bitmap) -> Result<String, PngError> {
    let bytes = encode_rgba(bitmap, &PngConfig::default())?;
    Ok(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(bytes)))
}

/// Payload of a PNG data URL, `None` when the reference is not a data URL.
fn strip_data_url(reference: &str) -> Result<Option<&str>, ImageLoadError> {
    if !reference.starts_with("data:") {
        return Ok(None);
    }
    match reference.get(..DATA_URL_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(DATA_URL_PREFIX) => {
            Ok(Some(&reference[DATA_URL_PREFIX.len()..]))
        }
        _ => Err(ImageLoadError::UnsupportedDataUrl),
    }
}

fn resolve_path(reference: &str, base_dir: Option<&Path>) -> PathBuf {
    let path = Path::new(reference);
    match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}
