use std::path::{Path, PathBuf};

use image::{
    imageops::{self, FilterType},
    DynamicImage, GrayImage, ImageError, Luma, RgbImage,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    constants::MAX_IMAGE_SIDE,
    encoder::QrMatrix,
    types::{LogoRatio, ModuleSize},
};

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

#[derive(Debug, Error, PartialEq)]
#[error(
    "a {modules}x{modules} QR code at {module_size} px per module with a {border} module border \
     exceeds {} px per side",
    MAX_IMAGE_SIDE
)]
pub struct TooLargeError {
    pub modules: u32,
    pub module_size: u32,
    pub border: u32,
}

#[derive(Debug, Error)]
pub enum LogoError {
    #[error("logo not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to load logo {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

/// Pixels per side of the rendered image, `None` past [`MAX_IMAGE_SIDE`].
pub fn image_side(modules: u32, module_size: ModuleSize, border: u32) -> Option<u32> {
    border
        .checked_mul(2)
        .and_then(|b| b.checked_add(modules))
        .and_then(|m| m.checked_mul(module_size.get()))
        .filter(|&side| side <= MAX_IMAGE_SIDE)
}

/// Rasterize `matrix` in black on white, `module_size` pixels per module and `border` light
/// modules on every side.
pub fn render_matrix(
    matrix: &QrMatrix,
    module_size: ModuleSize,
    border: u32,
) -> Result<GrayImage, TooLargeError> {
    let scale = module_size.get();
    let width = matrix.width() as u32;
    let side = image_side(width, module_size, border).ok_or(TooLargeError {
        modules: width,
        module_size: scale,
        border,
    })?;
    let mut img = GrayImage::from_pixel(side, side, LIGHT);

    for y in 0..width {
        for x in 0..width {
            if matrix.is_dark(x as usize, y as usize) {
                let px = (border + x) * scale;
                let py = (border + y) * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        img.put_pixel(px + dx, py + dy, DARK);
                    }
                }
            }
        }
    }

    Ok(img)
}

/// Logo size for a base image: each side scaled by `ratio`, rounded, at least one pixel.
pub fn logo_dimensions(base_width: u32, base_height: u32, ratio: LogoRatio) -> (u32, u32) {
    let scale = |side: u32| ((side as f32 * ratio.get()).round() as u32).max(1);
    (scale(base_width), scale(base_height))
}

pub fn load_logo(path: &Path) -> Result<DynamicImage, LogoError> {
    if !path.exists() {
        return Err(LogoError::NotFound(path.to_path_buf()));
    }
    let logo = image::open(path).map_err(|source| LogoError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), width = logo.width(), height = logo.height(), "Logo loaded");
    Ok(logo)
}

/// Composite `logo` at the center of `base`, using the logo's alpha channel as mask.
///
/// The canvas keeps the size of `base`.
pub fn overlay_logo(base: &GrayImage, logo: &DynamicImage, ratio: LogoRatio) -> RgbImage {
    let (base_width, base_height) = base.dimensions();
    let (logo_width, logo_height) = logo_dimensions(base_width, base_height, ratio);

    let logo = imageops::resize(
        &logo.to_rgba8(),
        logo_width,
        logo_height,
        FilterType::Lanczos3,
    );

    let mut canvas = DynamicImage::ImageLuma8(base.clone()).to_rgba8();
    let x = i64::from(base_width / 2) - i64::from(logo_width / 2);
    let y = i64::from(base_height / 2) - i64::from(logo_height / 2);
    debug!(logo_width, logo_height, x, y, "Compositing logo");
    imageops::overlay(&mut canvas, &logo, x, y);

    DynamicImage::ImageRgba8(canvas).to_rgb8()
}
