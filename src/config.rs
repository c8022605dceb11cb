use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::lang::Lang;
use crate::translator::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

pub const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub from_lang: Lang,
    pub to_lang: Lang,
    pub data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            from_lang: Lang::Auto,
            to_lang: Lang::Zh,
            data_dir: None,
        }
    }
}

const DEFAULT_SETTINGS: &str = "\
# fanyi-desk settings

# Translation endpoint
# endpoint = \"https://fanyi-api.baidu.com/api/trans/vip/translate\"

# Request timeout in seconds
# timeout_secs = 10

# Default source language (\"auto\" for auto-detection)
# from_lang = \"auto\"

# Default target language
# to_lang = \"zh\"

# Directory for config.json and translation_history.json
# data_dir = \"\"
";

impl Settings {
    pub fn app_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".into());
            PathBuf::from(appdata).join("fanyi-desk")
        }
        #[cfg(target_os = "macos")]
        {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("fanyi-desk")
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            let base = std::env::var_os("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| {
                    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
                    PathBuf::from(home).join(".config")
                });
            base.join("fanyi-desk")
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::app_dir())
    }

    /// Reads `settings.toml` from `dir`, writing a commented template when absent.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(SETTINGS_FILE);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let settings: Settings = toml::from_str(&contents)?;
            tracing::info!("Loaded settings from {}", path.display());
            return Ok(settings);
        }

        if let Err(e) = std::fs::create_dir_all(dir) {
            tracing::warn!("Failed to create settings directory: {}", e);
        } else if let Err(e) = std::fs::write(&path, DEFAULT_SETTINGS) {
            tracing::warn!("Failed to write default settings: {}", e);
        } else {
            tracing::info!("Created default settings at {}", path.display());
        }
        Ok(Settings::default())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// `debug.log` sits next to the data files.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir()
    }

    /// Where credentials and history live.
    pub fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir.clone(),
            _ => Self::app_dir(),
        }
    }
}
