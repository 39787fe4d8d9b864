use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolymerLintConfig {
    #[serde(default)]
    pub lints: LintsConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintsConfig {
    /// Rules to leave out of the registry.
    #[serde(default)]
    pub disabled: Vec<String>,
}

pub const DEFAULT_CONFIG_FILE_NAME: &str = "polymer-lint.toml";

/// Nearest `polymer-lint.toml` in `start_dir` or one of its ancestors.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(DEFAULT_CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

pub fn load_config_file(path: &Path) -> Result<PolymerLintConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid polymer-lint config in {}", path.display()))
}

/// Load the config named on the command line, or else the nearest one above
/// `start_dir`. `Ok(None)` means there is no config to apply.
pub fn load_config(
    explicit_path: Option<&Path>,
    start_dir: &Path,
) -> Result<Option<(PathBuf, PolymerLintConfig)>> {
    let Some(path) = explicit_path
        .map(Path::to_path_buf)
        .or_else(|| find_config_file(start_dir))
    else {
        return Ok(None);
    };
    let cfg = load_config_file(&path)?;
    Ok(Some((path, cfg)))
}
