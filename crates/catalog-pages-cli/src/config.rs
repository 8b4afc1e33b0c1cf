use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use catalog_pages::OutputLayout;
use serde::{Deserialize, Serialize};

/// Environment variable that can supply the store key.
pub const STORE_KEY_ENV: &str = "CATALOG_PAGES_STORE_KEY";

const DEFAULT_OUTPUT: &str = "./output";
const DEFAULT_PRODUCT_BASE: &str = "product";
const DEFAULT_CATEGORY_BASE: &str = "category";

/// Settings read from the config file. Every field is optional; command
/// line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub store_key: Option<String>,
    pub output: Option<PathBuf>,
    pub product_base: Option<String>,
    pub category_base: Option<String>,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub store_key: Option<String>,
    pub output: Option<PathBuf>,
    pub product_base: Option<String>,
    pub category_base: Option<String>,
}

/// Fully resolved inputs for a generate run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSettings {
    pub endpoint: String,
    pub store_key: String,
    pub layout: OutputLayout,
}

/// Config file path: `~/.config/catalog-pages/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("catalog-pages").join("config.toml"))
}

/// Load the config file.
///
/// An explicitly given path must exist and parse. The default path is
/// optional; if it fails to parse, a warning is printed and defaults apply.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig> {
    if let Some(path) = explicit {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        return toml::from_str(&contents)
            .with_context(|| format!("failed to parse config at {}", path.display()));
    }

    if let Some(path) = config_path()
        && let Ok(contents) = std::fs::read_to_string(&path)
    {
        if let Ok(config) = toml::from_str::<FileConfig>(&contents) {
            return Ok(config);
        }
        eprintln!(
            "warning: failed to parse config at {}, using defaults",
            path.display()
        );
    }

    Ok(FileConfig::default())
}

/// Merge flags, environment and config file, in that order of precedence.
pub fn resolve(
    overrides: Overrides,
    env_store_key: Option<String>,
    file: FileConfig,
) -> Result<GenerateSettings> {
    let endpoint = overrides
        .endpoint
        .or(file.endpoint)
        .filter(|s| !s.is_empty())
        .context("no API endpoint given; pass --endpoint or set `endpoint` in the config file")?;

    let store_key = overrides
        .store_key
        .or(env_store_key)
        .or(file.store_key)
        .filter(|s| !s.is_empty())
        .with_context(|| {
            format!("no store key given; pass --storekey, set {STORE_KEY_ENV}, or set `store_key` in the config file")
        })?;

    let output = overrides
        .output
        .or(file.output)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let category_base = overrides
        .category_base
        .or(file.category_base)
        .unwrap_or_else(|| DEFAULT_CATEGORY_BASE.into());
    let product_base = overrides
        .product_base
        .or(file.product_base)
        .unwrap_or_else(|| DEFAULT_PRODUCT_BASE.into());

    Ok(GenerateSettings {
        endpoint,
        store_key,
        layout: OutputLayout::new(output, category_base, product_base),
    })
}
