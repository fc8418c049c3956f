use std::path::PathBuf;

use anyhow::Context;
use vin_config::{ENV_PREFIX, VinConfig};

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered config with CLI flags forwarded as
/// `VINVENTORY_*` overrides. The process environment still wins over them.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<VinConfig> {
    load_dotenv()?;
    VinConfig::load_with_env_overrides(&flag_overrides(flags)).map_err(anyhow::Error::from)
}

fn flag_overrides(flags: &GlobalFlags) -> Vec<(String, String)> {
    let mut overrides = Vec::new();
    if let Some(url) = &flags.api_url {
        overrides.push((format!("{ENV_PREFIX}API__BASE_URL"), url.clone()));
    }
    overrides
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;

    // A project-local `.vinventory/.env` beats a plain `.env` next to it.
    let project_env = cwd.join(".vinventory").join(".env");
    if project_env.exists() {
        return load_from(project_env);
    }

    dotenvy::dotenv().ok();
    Ok(())
}

fn load_from(path: PathBuf) -> anyhow::Result<()> {
    dotenvy::from_path(&path)
        .with_context(|| format!("failed to load dotenv file at {}", path.display()))?;
    Ok(())
}
