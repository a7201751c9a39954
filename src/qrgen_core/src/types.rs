use std::{fmt, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_BORDER_MODULES, DEFAULT_LOGO_SIZE_RATIO, DEFAULT_MODULE_SIZE,
};

#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    #[error("invalid payload: must be a non-empty string")]
    Payload,
    #[error("invalid module size: must be a positive integer")]
    ModuleSize,
    #[error("invalid logo size ratio: must be a number strictly between 0 and 1")]
    LogoRatio,
    #[error("invalid error correction level: must be one of L, M, Q, H")]
    ErrorCorrection,
}

/// Text or URL encoded into the QR code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Payload(pub(crate) String);
impl Payload {
    pub fn new(s: &str) -> Result<Self, ValueError> {
        if s.trim().is_empty() {
            Err(ValueError::Payload)
        } else {
            Ok(Self(s.into()))
        }
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pixel width of one module once rasterized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleSize(u32);
impl ModuleSize {
    pub fn new(v: u32) -> Result<Self, ValueError> {
        if v >= 1 {
            Ok(Self(v))
        } else {
            Err(ValueError::ModuleSize)
        }
    }
    pub fn get(self) -> u32 {
        self.0
    }
}
impl Default for ModuleSize {
    fn default() -> Self {
        Self(DEFAULT_MODULE_SIZE)
    }
}
impl FromStr for ModuleSize {
    type Err = ValueError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v: u32 = s.trim().parse().map_err(|_| ValueError::ModuleSize)?;
        Self::new(v)
    }
}

/// Size of the logo relative to the QR image, applied to width and height independently
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoRatio(f32);
impl LogoRatio {
    pub fn new(v: f32) -> Result<Self, ValueError> {
        if v.is_finite() && v > 0.0 && v < 1.0 {
            Ok(Self(v))
        } else {
            Err(ValueError::LogoRatio)
        }
    }
    pub fn get(self) -> f32 {
        self.0
    }
}
impl Default for LogoRatio {
    fn default() -> Self {
        Self(DEFAULT_LOGO_SIZE_RATIO)
    }
}
impl FromStr for LogoRatio {
    type Err = ValueError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v: f32 = s.trim().parse().map_err(|_| ValueError::LogoRatio)?;
        Self::new(v)
    }
}

/// QR error correction level, from lowest to highest redundancy
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[value(rename_all = "UPPER")]
pub enum ErrorCorrection {
    /// ~7% of the modules can be restored
    L,
    /// ~15%
    M,
    /// ~25%
    Q,
    /// ~30%
    H,
}

impl ErrorCorrection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCorrection::L => "L",
            ErrorCorrection::M => "M",
            ErrorCorrection::Q => "Q",
            ErrorCorrection::H => "H",
        }
    }
}

impl From<ErrorCorrection> for qrcode::EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => qrcode::EcLevel::L,
            ErrorCorrection::M => qrcode::EcLevel::M,
            ErrorCorrection::Q => qrcode::EcLevel::Q,
            ErrorCorrection::H => qrcode::EcLevel::H,
        }
    }
}

impl FromStr for ErrorCorrection {
    type Err = ValueError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(ErrorCorrection::L),
            "M" => Ok(ErrorCorrection::M),
            "Q" => Ok(ErrorCorrection::Q),
            "H" => Ok(ErrorCorrection::H),
            _ => Err(ValueError::ErrorCorrection),
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering parameters shared by every request of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderProfile {
    pub module_size: ModuleSize,
    pub border_modules: u32,
    /// Level used by the plain generation path
    pub plain_error_correction: ErrorCorrection,
    /// Level used when a logo is composited on top of the code
    pub logo_error_correction: ErrorCorrection,
    pub logo_size_ratio: LogoRatio,
}

impl Default for RenderProfile {
    fn default() -> Self {
        Self {
            module_size: ModuleSize::default(),
            border_modules: DEFAULT_BORDER_MODULES,
            plain_error_correction: ErrorCorrection::Q,
            logo_error_correction: ErrorCorrection::M,
            logo_size_ratio: LogoRatio::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub payload: Payload,
    pub output_path: PathBuf,
    pub module_size: ModuleSize,
    pub border_modules: u32,
    pub error_correction: ErrorCorrection,
}

impl GenerationRequest {
    /// Plain request using the profile's plain error correction level.
    pub fn plain(payload: Payload, output_path: PathBuf, profile: &RenderProfile) -> Self {
        Self {
            payload,
            output_path,
            module_size: profile.module_size,
            border_modules: profile.border_modules,
            error_correction: profile.plain_error_correction,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogoOverlayRequest {
    pub base: GenerationRequest,
    pub logo_path: PathBuf,
    pub logo_size_ratio: LogoRatio,
}

impl LogoOverlayRequest {
    pub fn new(
        payload: Payload,
        output_path: PathBuf,
        logo_path: PathBuf,
        profile: &RenderProfile,
    ) -> Self {
        Self {
            base: GenerationRequest {
                payload,
                output_path,
                module_size: profile.module_size,
                border_modules: profile.border_modules,
                error_correction: profile.logo_error_correction,
            },
            logo_path,
            logo_size_ratio: profile.logo_size_ratio,
        }
    }
}
