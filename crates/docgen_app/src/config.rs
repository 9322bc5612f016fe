use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use docgen_export::{ExportOptions, HttpHostSettings};
use docgen_logging::docgen_info;
use serde::{Deserialize, Serialize};

/// Looked up in the content directory when `--config` is not given.
pub const CONFIG_FILENAME: &str = "docgen.ron";

/// Export settings read from a RON file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub concurrency: usize,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
    /// Routes served by the host in addition to the manual's own routes,
    /// e.g. `"/prince/output.pdf"`.
    pub extra_paths: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let host = HttpHostSettings::default();
        Self {
            concurrency: ExportOptions::default().concurrency,
            connect_timeout_secs: host.connect_timeout.as_secs(),
            request_timeout_secs: host.request_timeout.as_secs(),
            redirect_limit: host.redirect_limit,
            extra_paths: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            concurrency: self.concurrency,
        }
    }

    pub fn host_settings(&self) -> HttpHostSettings {
        HttpHostSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            redirect_limit: self.redirect_limit,
        }
    }
}

/// Load the config. An explicit path must exist; the implicit
/// `<content>/docgen.ron` falls back to defaults when absent.
pub fn load(explicit: Option<&Path>, content_dir: &Path) -> anyhow::Result<AppConfig> {
    let (path, required): (PathBuf, bool) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (content_dir.join(CONFIG_FILENAME), false),
    };

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()))
        }
    };

    let config: AppConfig = ron::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    docgen_info!("Loaded config from {:?}", path);
    Ok(config)
}
