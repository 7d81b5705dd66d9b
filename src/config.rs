use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_dirs::AppDirs;
use crate::passage::DEFAULT_PASSAGE_WORDS;
use crate::session::DEFAULT_DURATION_SECS;
use crate::TICK_RATE_MS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub number_of_secs: u64,
    pub number_of_words: usize,
    pub tick_rate_ms: u64,
    pub words_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            number_of_secs: DEFAULT_DURATION_SECS,
            number_of_words: DEFAULT_PASSAGE_WORDS,
            tick_rate_ms: TICK_RATE_MS,
            words_file: None,
        }
    }
}

impl Config {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.number_of_secs)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing file means defaults; a broken file is logged and ignored.
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Config::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read config");
                return Config::default();
            }
        };

        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring invalid config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
