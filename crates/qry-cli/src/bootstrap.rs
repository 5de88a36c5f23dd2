use anyhow::Context;
use qry_config::QryConfig;

use crate::cli::GlobalFlags;

/// Load `.env` from the working directory, then the layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<QryConfig> {
    load_dotenv()?;

    match &flags.config {
        Some(path) => QryConfig::load_file(path)
            .with_context(|| format!("failed to load config file {}", path.display())),
        None => QryConfig::load().context("failed to load qry configuration"),
    }
}

fn load_dotenv() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(error) if error.not_found() => Ok(()),
        Err(error) => Err(error).context("failed to load .env"),
    }
}
