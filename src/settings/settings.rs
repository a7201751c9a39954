use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::{from_str, to_string_pretty};
use std::{fs, io::ErrorKind, path::PathBuf};

use crate::settings::consts::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, SETTINGS_FILE};
use qrgen_core::{
    types::{ErrorCorrection, LogoRatio, ModuleSize, Payload, RenderProfile},
    Defaults,
};

/// User overrides, every field falls back to the built-in default when unset.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub output_directory: Option<PathBuf>,
    pub logo_path: Option<PathBuf>,
    pub payload: Option<String>,
    pub module_size: Option<u32>,
    pub border_modules: Option<u32>,
    pub plain_error_correction: Option<ErrorCorrection>,
    pub logo_error_correction: Option<ErrorCorrection>,
    pub logo_size_ratio: Option<f32>,
}

/// Session configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub defaults: Defaults,
    pub profile: RenderProfile,
}

impl Settings {
    /// Overwrite every field that is set in `overrides`.
    pub fn apply(&mut self, overrides: Settings) {
        let Settings {
            output_directory,
            logo_path,
            payload,
            module_size,
            border_modules,
            plain_error_correction,
            logo_error_correction,
            logo_size_ratio,
        } = overrides;

        self.output_directory = output_directory.or(self.output_directory.take());
        self.logo_path = logo_path.or(self.logo_path.take());
        self.payload = payload.or(self.payload.take());
        self.module_size = module_size.or(self.module_size);
        self.border_modules = border_modules.or(self.border_modules);
        self.plain_error_correction = plain_error_correction.or(self.plain_error_correction);
        self.logo_error_correction = logo_error_correction.or(self.logo_error_correction);
        self.logo_size_ratio = logo_size_ratio.or(self.logo_size_ratio);
    }

    pub fn is_empty(&self) -> bool {
        self == &Settings::default()
    }

    /// Merge over the platform defaults and validate.
    pub fn resolve(&self) -> Result<AppConfig> {
        self.resolve_over(Defaults::resolve())
    }

    pub fn resolve_over(&self, mut defaults: Defaults) -> Result<AppConfig> {
        if let Some(dir) = &self.output_directory {
            defaults.output_directory = dir.clone();
        }
        if let Some(logo) = &self.logo_path {
            defaults.logo_path = logo.clone();
        }
        if let Some(payload) = &self.payload {
            defaults.payload =
                Payload::new(payload).context("Invalid default payload in settings")?;
        }

        let mut profile = RenderProfile::default();
        if let Some(size) = self.module_size {
            profile.module_size =
                ModuleSize::new(size).context("Invalid module size in settings")?;
        }
        if let Some(border) = self.border_modules {
            profile.border_modules = border;
        }
        if let Some(level) = self.plain_error_correction {
            profile.plain_error_correction = level;
        }
        if let Some(level) = self.logo_error_correction {
            profile.logo_error_correction = level;
        }
        if let Some(ratio) = self.logo_size_ratio {
            profile.logo_size_ratio =
                LogoRatio::new(ratio).context("Invalid logo size ratio in settings")?;
        }

        Ok(AppConfig { defaults, profile })
    }
}

pub trait SettingsStore {
    fn load(&self) -> Result<Settings>;
    fn save(&self, settings: &Settings) -> Result<()>;
    fn location(&self) -> PathBuf;
}

pub struct FileSettingsStore {
    directory: PathBuf, // platform config directory (from ProjectDirs)
    file: &'static str, // "settings.json"
}

impl FileSettingsStore {
    /// Build from ProjectDirs config directory:
    ///   - Windows:   %APPDATA%\<org>\<app>\config\settings.json
    ///   - macOS:     ~/Library/Application Support/<qualifier>.<org>.<app>/settings.json
    ///   - Linux:     ~/.config/<app>/settings.json
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .ok_or_else(|| anyhow!("Could not determine project directories"))?;

        Ok(Self::in_directory(project_dirs.config_dir().to_path_buf()))
    }

    pub fn in_directory(directory: PathBuf) -> Self {
        Self {
            directory,
            file: SETTINGS_FILE,
        }
    }

    fn path(&self) -> PathBuf {
        self.directory.join(self.file)
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<Settings> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!(
                "Failed to create settings directory: {}",
                self.directory.display()
            )
        })?;
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let defaults = Settings::default();
                self.save(&defaults)?;
                return Ok(defaults);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read settings file: {}", path.display()))
            }
        };
        from_str(&content).context("Failed to deserialize settings")
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!(
                "Failed to create settings directory: {}",
                self.directory.display()
            )
        })?;
        fs::write(self.path(), to_string_pretty(settings)?)
            .with_context(|| format!("Failed to persist settings file: {}", self.path().display()))
    }

    fn location(&self) -> PathBuf {
        self.path()
    }
}

/// Settings file given explicitly on the command line. A missing file reads as empty settings.
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn load(&self) -> Result<Settings> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read settings file: {}", self.path.display())
                })
            }
        };
        from_str(&content).context("Failed to deserialize settings")
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        fs::write(&self.path, to_string_pretty(settings)?)
            .with_context(|| format!("Failed to persist settings file: {}", self.path.display()))
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
