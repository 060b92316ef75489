//! Configuration loading and parsing.
//!
//! Parses `quill.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [editor]
//! tab_stop = 2
//! [status]
//! enabled = true
//! ```
//!
//! Missing files, missing tables and unknown fields all fall back to defaults.
//! A file that fails to parse is reported with a `warn!` and ignored. The raw
//! `tab_stop` is retained; the effective value (never 0) is computed by
//! `Config::normalize`, which logs on target `config` when it had to clamp.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "quill.toml";
pub const DEFAULT_TAB_STOP: usize = 2;

/// Terminal dimensions plus the rows reserved below the text area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigContext {
    pub terminal_columns: u16,
    pub terminal_rows: u16,
    pub status_rows: u16,
}

impl ConfigContext {
    pub fn new(terminal_columns: u16, terminal_rows: u16, status_rows: u16) -> Self {
        Self {
            terminal_columns,
            terminal_rows,
            status_rows,
        }
    }

    /// Rows available to document text. May be 0 on a tiny terminal; the
    /// viewport treats that as 1.
    pub fn text_rows(&self) -> u16 {
        self.terminal_rows.saturating_sub(self.status_rows)
    }

    pub fn text_columns(&self) -> u16 {
        self.terminal_columns
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_tab_stop")]
    pub tab_stop: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_stop: Self::default_tab_stop(),
        }
    }
}

impl EditorConfig {
    const fn default_tab_stop() -> usize {
        DEFAULT_TAB_STOP
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StatusConfig {
    #[serde(default = "StatusConfig::default_enabled")]
    pub enabled: bool,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
        }
    }
}

impl StatusConfig {
    const fn default_enabled() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub status: StatusConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: Option<PathBuf>, // file the values came from, if any
    pub file: ConfigFile,
    pub effective_tab_stop: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            file: ConfigFile::default(),
            effective_tab_stop: DEFAULT_TAB_STOP,
        }
    }
}

/// Config path: `quill.toml` in the working directory, else the platform
/// config dir (`<config_dir>/quill/quill.toml`).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("quill").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    let mut cfg = match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Config {
            source: Some(path),
            file,
            effective_tab_stop: DEFAULT_TAB_STOP,
        },
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Config::default()
        }
    };
    cfg.normalize();
    Ok(cfg)
}

impl Config {
    /// Compute effective values from the raw file values. Returns the
    /// effective tab stop.
    pub fn normalize(&mut self) -> usize {
        let raw = self.file.editor.tab_stop;
        let clamped = raw.max(1);
        if clamped != raw {
            info!(target: "config", raw, clamped, "tab_stop_clamped");
        }
        self.effective_tab_stop = clamped;
        clamped
    }

    pub fn status_rows(&self) -> u16 {
        u16::from(self.file.status.enabled)
    }

    /// Layout context for a terminal of the given size.
    pub fn context(&self, terminal_columns: u16, terminal_rows: u16) -> ConfigContext {
        ConfigContext::new(terminal_columns, terminal_rows, self.status_rows())
    }
}
