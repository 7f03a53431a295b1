// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

/// Command-line flags for the access node binary.
#[derive(Parser, Debug)]
#[command(name = "tinyim-access", about = "IM access-tier edge server")]
pub struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, default_value = "config/access.yaml")]
    pub config: String,

    /// Path to the YAML logger configuration file.
    #[arg(long, default_value = "config/logger.yaml")]
    pub logger_config: String,
}

/// Resolves a possibly-relative path against the current working directory
/// and canonicalizes it.
pub fn resolve_config_path(rel: &str) -> Result<PathBuf> {
    let p = Path::new(rel);

    let abs = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()
            .context("cannot get current working dir")?
            .join(p)
    };

    abs.canonicalize()
        .with_context(|| format!("failed to canonicalize path {abs:?}"))
}
