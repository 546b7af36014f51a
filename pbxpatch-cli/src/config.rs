//! Configuration file loading for pbxpatch.
//!
//! Discovers and loads `pbxpatch.toml` from the project root.
//! Merges config file settings with CLI arguments (CLI takes precedence).
//! The patch target itself is fixed and cannot be configured.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "pbxpatch.toml";

/// Top-level configuration from pbxpatch.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PbxpatchConfig {
    pub run: RunConfig,
    pub artifacts: ArtifactsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Preview the patch without writing the manifest.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Where to write report.json, report.md and patch.diff.
    /// Relative paths resolve against the project root.
    pub out_dir: Option<Utf8PathBuf>,
}

/// Discover the pbxpatch.toml config file in the project root.
pub fn discover_config(project_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = project_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

pub fn load_config(path: &Utf8Path) -> anyhow::Result<PbxpatchConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<PbxpatchConfig> {
    let config: PbxpatchConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the project root, or return default if not found.
pub fn load_or_default(project_root: &Utf8Path) -> anyhow::Result<PbxpatchConfig> {
    match discover_config(project_root) {
        Some(path) => load_config(&path),
        None => Ok(PbxpatchConfig::default()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedConfig {
    pub dry_run: bool,
    pub out_dir: Option<Utf8PathBuf>,
}

pub struct ConfigMerger {
    config: PbxpatchConfig,
}

impl ConfigMerger {
    pub fn new(config: PbxpatchConfig) -> Self {
        Self { config }
    }

    /// `--dry-run` turns dry-run on but cannot turn a configured dry-run
    /// off. `--out-dir` replaces the configured directory.
    pub fn merge_run_args(
        self,
        project_root: &Utf8Path,
        cli_dry_run: bool,
        cli_out_dir: Option<Utf8PathBuf>,
    ) -> MergedConfig {
        let out_dir = cli_out_dir.or_else(|| {
            self.config.artifacts.out_dir.map(|dir| {
                if dir.is_absolute() {
                    dir
                } else {
                    project_root.join(dir)
                }
            })
        });

        MergedConfig {
            dry_run: cli_dry_run || self.config.run.dry_run,
            out_dir,
        }
    }
}
