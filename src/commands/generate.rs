use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::{cli::GenerateArgs, services::shell::PendingJob, settings::AppConfig, AppCtx};
use qrgen_core::{
    generate_plain, generate_with_logo,
    types::{GenerationRequest, LogoOverlayRequest, Payload},
    unique_filename,
};

pub fn handle(args: GenerateArgs, ctx: &AppCtx) -> Result<()> {
    let config = ctx.load_config()?;
    let job = build_job(args, &config)?;

    let path = match &job {
        PendingJob::Plain(request) => generate_plain(request),
        PendingJob::Logo(request) => generate_with_logo(request),
    }
    .context("QR code generation failed")?;

    info!(path = %path.display(), "QR code generated successfully ✅");
    println!("{}", path.display());
    Ok(())
}

fn build_job(args: GenerateArgs, config: &AppConfig) -> Result<PendingJob> {
    let wants_logo = args.wants_logo();
    let mut profile = config.profile.clone();
    if let Some(size) = args.module_size {
        profile.module_size = size;
    }
    if let Some(border) = args.border {
        profile.border_modules = border;
    }
    if let Some(ratio) = args.logo_ratio {
        profile.logo_size_ratio = ratio;
    }
    if let Some(level) = args.error_correction {
        if wants_logo {
            profile.logo_error_correction = level;
        } else {
            profile.plain_error_correction = level;
        }
    }

    let payload = match args.text {
        Some(text) => Payload::new(&text)?,
        None => config.defaults.payload.clone(),
    };
    let output_dir: PathBuf = args
        .output_dir
        .unwrap_or_else(|| config.defaults.output_directory.clone());
    let output_path = unique_filename(&output_dir, payload.as_str())?;

    Ok(if wants_logo {
        let logo_path = args
            .logo
            .unwrap_or_else(|| config.defaults.logo_path.clone());
        PendingJob::Logo(LogoOverlayRequest::new(
            payload,
            output_path,
            logo_path,
            &profile,
        ))
    } else {
        PendingJob::Plain(GenerationRequest::plain(payload, output_path, &profile))
    })
}
