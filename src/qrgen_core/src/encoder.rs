use qrcode::{types::QrError, Color, QrCode, Version};
use thiserror::Error;
use tracing::debug;

use crate::{
    constants::{MAX_VERSION, MIN_VERSION},
    types::ErrorCorrection,
};

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("payload of {len} bytes does not fit any QR version at error correction level {level}")]
    TooLong { len: usize, level: ErrorCorrection },
    #[error("QR encoding failed: {0}")]
    Library(QrError),
}

/// Square grid of modules, `true` for dark.
#[derive(Debug, Clone, PartialEq)]
pub struct QrMatrix {
    width: usize,
    version: i16,
    modules: Vec<bool>,
}

impl QrMatrix {
    /// Number of modules per side, without the quiet zone
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn version(&self) -> i16 {
        self.version
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.width + x]
    }
}

/// Encode `payload` at the smallest version, starting from [`MIN_VERSION`], that holds it.
pub fn encode(payload: &str, level: ErrorCorrection) -> Result<QrMatrix, EncodeError> {
    encode_from(payload, level, MIN_VERSION)
}

pub fn encode_from(
    payload: &str,
    level: ErrorCorrection,
    min_version: i16,
) -> Result<QrMatrix, EncodeError> {
    for version in min_version.max(1)..=MAX_VERSION {
        match QrCode::with_version(payload.as_bytes(), Version::Normal(version), level.into()) {
            Ok(code) => {
                debug!(version, %level, width = code.width(), "Encoded payload");
                let modules = code
                    .to_colors()
                    .into_iter()
                    .map(|c| c == Color::Dark)
                    .collect();
                return Ok(QrMatrix {
                    width: code.width(),
                    version,
                    modules,
                });
            }
            Err(QrError::DataTooLong) => continue,
            Err(e) => return Err(EncodeError::Library(e)),
        }
    }
    Err(EncodeError::TooLong {
        len: payload.len(),
        level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::decode_matrix;
    use clap::ValueEnum;

    #[test]
    fn test_round_trip_every_level() {
        for &level in ErrorCorrection::value_variants() {
            for payload in ["https://example.com", "Olá, QR!", "12345"] {
                let matrix = encode(payload, level).unwrap();
                assert_eq!(decode_matrix(&matrix), payload, "level {level}");
            }
        }
    }

    #[test]
    fn test_smallest_version_first() {
        let matrix = encode("hi", ErrorCorrection::L).unwrap();
        assert_eq!(matrix.version(), 1);
        assert_eq!(matrix.width(), 21);
    }

    #[test]
    fn test_grows_to_fit() {
        let payload = "x".repeat(200);
        let low = encode(&payload, ErrorCorrection::L).unwrap();
        let high = encode(&payload, ErrorCorrection::H).unwrap();
        assert!(low.version() > 1);
        assert!(high.version() > low.version());
        assert_eq!(low.width(), 17 + 4 * low.version() as usize);
    }

    #[test]
    fn test_min_version_is_honoured() {
        let matrix = encode_from("hi", ErrorCorrection::M, 5).unwrap();
        assert_eq!(matrix.version(), 5);
    }

    #[test]
    fn test_too_long() {
        let payload = "x".repeat(4000);
        match encode(&payload, ErrorCorrection::H) {
            Err(EncodeError::TooLong { len, level }) => {
                assert_eq!(len, 4000);
                assert_eq!(level, ErrorCorrection::H);
            }
            other => panic!("expected TooLong, got {:?}", other),
        }
    }
}
