use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use qrgen_core::types::{ErrorCorrection, LogoRatio, ModuleSize};

#[derive(Parser)]
#[command(name = "qrgen", version, about, long_about = None)]
pub struct Cli {
    /// Optional path to a settings JSON file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub settings: Option<PathBuf>,

    /// Defaults to the interactive menu
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive menu
    Menu,

    /// Generate a single QR code without prompting
    Generate(GenerateArgs),

    /// Show or change the stored defaults
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Text or URL to encode, the configured default payload when omitted
    pub text: Option<String>,

    /// Overlay the configured default logo
    #[arg(long)]
    pub with_logo: bool,

    /// Overlay this logo image (implies --with-logo)
    #[arg(long, value_name = "PATH")]
    pub logo: Option<PathBuf>,

    /// Directory the PNG is written to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Pixels per module
    #[arg(long, value_name = "PX")]
    pub module_size: Option<ModuleSize>,

    /// Width of the white margin, in modules
    #[arg(long, value_name = "MODULES")]
    pub border: Option<u32>,

    /// Error correction level, overrides the level configured for the chosen path
    #[arg(short, long, value_enum, ignore_case = true)]
    pub error_correction: Option<ErrorCorrection>,

    /// Logo size relative to the QR image, strictly between 0 and 1
    #[arg(long, value_name = "RATIO")]
    pub logo_ratio: Option<LogoRatio>,
}

impl GenerateArgs {
    pub fn wants_logo(&self) -> bool {
        self.with_logo || self.logo.is_some()
    }
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Default output directory
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Default logo image
    #[arg(long, value_name = "PATH")]
    pub logo: Option<PathBuf>,

    /// Payload used when none is entered
    #[arg(long, value_name = "TEXT")]
    pub payload: Option<String>,

    /// Pixels per module
    #[arg(long, value_name = "PX")]
    pub module_size: Option<ModuleSize>,

    /// Width of the white margin, in modules
    #[arg(long, value_name = "MODULES")]
    pub border: Option<u32>,

    /// Error correction level of plain QR codes
    #[arg(long, value_enum, ignore_case = true)]
    pub plain_ec: Option<ErrorCorrection>,

    /// Error correction level of QR codes with a logo
    #[arg(long, value_enum, ignore_case = true)]
    pub logo_ec: Option<ErrorCorrection>,

    /// Logo size relative to the QR image, strictly between 0 and 1
    #[arg(long, value_name = "RATIO")]
    pub logo_ratio: Option<LogoRatio>,

    /// Forget every stored value before applying the flags above
    #[arg(long)]
    pub reset: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command_means_menu() {
        let cli = Cli::try_parse_from(["qrgen"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.settings.is_none());
    }

    #[test]
    fn test_generate_args() {
        let cli = Cli::try_parse_from([
            "qrgen",
            "generate",
            "https://example.com",
            "--logo",
            "brand.png",
            "-e",
            "h",
            "--module-size",
            "6",
            "--logo-ratio",
            "0.3",
            "--settings",
            "custom.json",
        ])
        .unwrap();
        assert_eq!(cli.settings, Some(PathBuf::from("custom.json")));
        let Some(Commands::Generate(args)) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.text.as_deref(), Some("https://example.com"));
        assert!(args.wants_logo());
        assert_eq!(args.error_correction, Some(ErrorCorrection::H));
        assert_eq!(args.module_size.map(ModuleSize::get), Some(6));
        assert_eq!(args.logo_ratio.map(LogoRatio::get), Some(0.3));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Cli::try_parse_from(["qrgen", "generate", "--module-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["qrgen", "generate", "--logo-ratio", "1"]).is_err());
        assert!(Cli::try_parse_from(["qrgen", "config", "--plain-ec", "X"]).is_err());
    }
}
