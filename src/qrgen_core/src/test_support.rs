use image::GrayImage;

use crate::{encoder::QrMatrix, render::render_matrix, types::ModuleSize};

/// Every payload a standard reader finds in `img`.
pub(crate) fn decode_gray(img: &GrayImage) -> Vec<String> {
    let (width, height) = img.dimensions();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        width as usize,
        height as usize,
        |x, y| img.get_pixel(x as u32, y as u32).0[0],
    );
    prepared
        .detect_grids()
        .into_iter()
        .map(|grid| grid.decode().expect("grid should decode").1)
        .collect()
}

pub(crate) fn decode_matrix(matrix: &QrMatrix) -> String {
    let img = render_matrix(matrix, ModuleSize::new(4).unwrap(), 4).unwrap();
    let mut decoded = decode_gray(&img);
    assert_eq!(decoded.len(), 1, "expected exactly one QR code");
    decoded.remove(0)
}
