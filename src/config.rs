//! User configuration (`config.toml`).
//!
//! Problems with the config file never stop the program; they are returned as
//! warnings and the defaults are used instead.

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Extra Rhai functions files, loaded after `default.rhai`.
    /// Relative paths are resolved against the config file's directory.
    #[serde(default)]
    pub functions: Vec<PathBuf>,
    /// Print `input │ result` columns instead of results only.
    #[serde(default)]
    pub side_by_side: bool,
}

pub(crate) fn config_dir() -> Option<PathBuf> {
    let proj = ProjectDirs::from("me", "shoryuken", "calcsheet")?;
    Some(proj.config_dir().to_path_buf())
}

fn user_config_path() -> Option<PathBuf> {
    let mut path = config_dir()?;
    path.push("config.toml");
    Some(path)
}

/// Load the config from `config_file`, or from the user config dir when `None`.
/// A missing default config is not a warning; a missing explicit one is.
pub fn load_config(config_file: Option<&PathBuf>) -> (Config, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let Some(path) = config_file.cloned().or_else(user_config_path) else {
        return (Config::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    let config = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            None
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<Config>(&content) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                    None
                }
            },
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                None
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            None
        }
    };

    let mut config = config.unwrap_or_default();
    if let Some(base) = path.parent() {
        resolve_relative(&mut config.functions, base);
    }
    (config, warnings)
}

fn resolve_relative(paths: &mut [PathBuf], base: &Path) {
    for path in paths.iter_mut() {
        if path.is_relative() {
            *path = base.join(&*path);
        }
    }
}
