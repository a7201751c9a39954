use std::{
    fs::{self, OpenOptions},
    io::{self, Cursor, Write},
    path::{Path, PathBuf},
};

use image::{DynamicImage, ImageError, ImageFormat};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    encoder::{encode, EncodeError},
    render::{load_logo, overlay_logo, render_matrix, LogoError, TooLargeError},
    types::{GenerationRequest, LogoOverlayRequest},
};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Logo(#[from] LogoError),
    #[error(transparent)]
    TooLarge(#[from] TooLargeError),
    #[error("failed to encode PNG for {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Encode, rasterize and write a black on white QR code. Returns the written path.
pub fn generate_plain(request: &GenerationRequest) -> Result<PathBuf, GenerateError> {
    let matrix = encode(request.payload.as_str(), request.error_correction)?;
    let img = render_matrix(&matrix, request.module_size, request.border_modules)?;
    save_png(&DynamicImage::ImageLuma8(img), &request.output_path)?;
    info!(
        path = %request.output_path.display(),
        version = matrix.version(),
        level = %request.error_correction,
        "QR code written"
    );
    Ok(request.output_path.clone())
}

/// Same as [`generate_plain`] with a logo composited at the center.
///
/// The logo is loaded first so that a missing or corrupt logo leaves the file system untouched.
pub fn generate_with_logo(request: &LogoOverlayRequest) -> Result<PathBuf, GenerateError> {
    let logo = load_logo(&request.logo_path)?;
    let base = &request.base;

    let matrix = encode(base.payload.as_str(), base.error_correction)?;
    let img = render_matrix(&matrix, base.module_size, base.border_modules)?;
    let composited = overlay_logo(&img, &logo, request.logo_size_ratio);

    save_png(&DynamicImage::ImageRgb8(composited), &base.output_path)?;
    info!(
        path = %base.output_path.display(),
        logo = %request.logo_path.display(),
        version = matrix.version(),
        level = %base.error_correction,
        "QR code with logo written"
    );
    Ok(base.output_path.clone())
}

// Never overwrites: a file created since the name was picked is reported as a write error.
fn save_png(img: &DynamicImage, path: &Path) -> Result<(), GenerateError> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)
        .map_err(|source| GenerateError::Image {
            path: path.to_path_buf(),
            source,
        })?;

    let write_err = |source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(write_err)?;

    if let Err(source) = file.write_all(buffer.get_ref()).and_then(|_| file.sync_all()) {
        drop(file);
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), "Failed to remove partial file: {e}");
        }
        return Err(write_err(source));
    }
    Ok(())
}
