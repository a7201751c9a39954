use std::path::PathBuf;

use directories::UserDirs;
use tracing::warn;

use crate::{
    constants::{DEFAULT_LOGO_PATH, DEFAULT_PAYLOAD, DOWNLOADS_DIR},
    types::Payload,
};

/// The user's downloads folder, `<home>/Downloads`.
///
/// Existence is not checked here, a missing folder surfaces when the image is written.
pub fn default_output_directory() -> PathBuf {
    match UserDirs::new() {
        Some(user_dirs) => user_dirs.home_dir().join(DOWNLOADS_DIR),
        None => {
            warn!("Could not determine the home directory, falling back to ./{DOWNLOADS_DIR}");
            PathBuf::from(DOWNLOADS_DIR)
        }
    }
}

pub fn default_logo_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOGO_PATH)
}

pub fn default_payload() -> &'static str {
    DEFAULT_PAYLOAD
}

/// Values substituted for blank user input.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub output_directory: PathBuf,
    pub logo_path: PathBuf,
    pub payload: Payload,
}

impl Defaults {
    pub fn resolve() -> Self {
        Self {
            output_directory: default_output_directory(),
            logo_path: default_logo_path(),
            payload: Payload(default_payload().to_string()),
        }
    }
}
