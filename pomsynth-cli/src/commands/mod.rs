//! Command handlers -- one module per subcommand

pub mod config;
pub mod generate;

use std::path::{Path, PathBuf};

use pomsynth_core::config::PomsynthConfig;
use pomsynth_core::error::PomsynthError;

use crate::cli::DEFAULT_CONFIG_PATH;

/// Where the configuration comes from.
///
/// An explicit `--config` path must exist. The implicit default
/// (`pomsynth.toml` in the working directory) is optional.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    path: PathBuf,
    explicit: bool,
}

impl ConfigSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self {
                path,
                explicit: true,
            },
            None => Self {
                path: PathBuf::from(DEFAULT_CONFIG_PATH),
                explicit: false,
            },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// Load the file with env overrides applied, then validate.
    pub async fn load(&self) -> Result<PomsynthConfig, PomsynthError> {
        if self.explicit {
            PomsynthConfig::load(&self.path).await
        } else {
            PomsynthConfig::load_or_default(&self.path).await
        }
    }

    pub(crate) fn display(&self) -> String {
        self.path.display().to_string()
    }
}
