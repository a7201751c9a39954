use anyhow::Result;
use tracing::info;

use crate::{
    services::{Shell, StdioPrompter},
    AppCtx,
};

pub fn handle(ctx: &AppCtx) -> Result<()> {
    let config = ctx.load_config()?;
    info!(
        output_directory = %config.defaults.output_directory.display(),
        logo = %config.defaults.logo_path.display(),
        "Starting interactive menu"
    );

    let mut prompter = StdioPrompter;
    Shell::new(&config, &mut prompter).run()
}
