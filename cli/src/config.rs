// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use timetab_catalog::CatalogConfig;
use timetab_core::{APP_NAME, Config as CoreConfig, get_config_dir};

pub const TIMETAB_CONFIG_ENV: &str = "TIMETAB_CONFIG";

/// Configuration for the timetab application.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Engine settings.
    pub core: CoreConfig,

    /// Lecture catalog, when one is configured.
    pub catalog: Option<CatalogConfig>,
}

/// Loads the configuration from `--config`, then `TIMETAB_CONFIG`, then the
/// user config directory. A missing default file yields the defaults; an
/// explicitly requested file must exist.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(TIMETAB_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config found, use defaults");
            let mut config = Config::default();
            config.core.normalize()?;
            return Ok(config);
        }
        config
    };

    let mut config = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<Config>()?;
    config.core.normalize()?;
    Ok(config)
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,
    catalog: Option<CatalogConfig>,
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: ConfigRaw = toml::from_str(s)?;
        Ok(Self {
            core: raw.core,
            catalog: raw.catalog,
        })
    }
}
