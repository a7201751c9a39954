use anyhow::Result;
use clap::Parser;

use qrgen_cli::settings::init_logger;

fn main() -> Result<()> {
    init_logger()?;
    let cli = qrgen_cli::cli::Cli::parse();
    qrgen_cli::run(cli)?;
    Ok(())
}
