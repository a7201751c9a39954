pub const DEFAULT_PAYLOAD: &str = "https://github.com/ICE3BR";
pub const DEFAULT_LOGO_PATH: &str = "./logo_padrao.png";
pub const DOWNLOADS_DIR: &str = "Downloads";

pub const DEFAULT_MODULE_SIZE: u32 = 10;
pub const DEFAULT_BORDER_MODULES: u32 = 4;
pub const DEFAULT_LOGO_SIZE_RATIO: f32 = 0.2;
/// Largest rendered side, in pixels.
pub const MAX_IMAGE_SIDE: u32 = 8_192;

/// Smallest QR version tried before growing to fit the payload.
pub const MIN_VERSION: i16 = 1;
pub const MAX_VERSION: i16 = 40;

pub const FILENAME_TAG: &str = "_QRCode";
pub const FILENAME_EXTENSION: &str = "png";
pub const FALLBACK_BASE_NAME: &str = "qrcode";
pub const MAX_BASE_NAME_CHARS: usize = 64;
/// Upper bound of the numeric suffix search in `naming::unique_filename`.
pub const MAX_SUFFIX: u32 = 10_000;
