use anyhow::{Context, Result};
use tracing::info;

use crate::{cli::ConfigArgs, settings::Settings, AppCtx};

pub fn handle(args: ConfigArgs, ctx: &AppCtx) -> Result<()> {
    let reset = args.reset;
    let overrides = overrides(args);

    if overrides.is_empty() && !reset {
        let settings = ctx.settings_store.load()?;
        println!(
            "{}",
            serde_json::to_string_pretty(&settings).context("Failed to serialize settings")?
        );
        info!(path = %ctx.settings_store.location().display(), "Settings file");
        return Ok(());
    }

    let mut settings = if reset {
        Settings::default()
    } else {
        ctx.settings_store.load()?
    };
    settings.apply(overrides);
    settings.resolve().context("Refusing to save invalid settings")?;

    ctx.settings_store.save(&settings)?;
    info!(path = %ctx.settings_store.location().display(), "Configuration saved successfully ✅");
    Ok(())
}

fn overrides(args: ConfigArgs) -> Settings {
    Settings {
        output_directory: args.output_dir,
        logo_path: args.logo,
        payload: args.payload,
        module_size: args.module_size.map(|size| size.get()),
        border_modules: args.border,
        plain_error_correction: args.plain_ec,
        logo_error_correction: args.logo_ec,
        logo_size_ratio: args.logo_ratio.map(|ratio| ratio.get()),
    }
}
