use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "typesprint";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("typesprint_config.json"))
    }

    /// Directory for the log file. Prefers `~/.local/state`, which is where
    /// logs belong on Linux and is not exposed by `ProjectDirs`.
    pub fn log_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
        } else {
            ProjectDirs::from("", "", APP_NAME)
                .map(|pd| pd.data_local_dir().to_path_buf())
                .unwrap_or_else(std::env::temp_dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_is_json() {
        let path = AppDirs::config_path();
        assert_eq!(path.file_name().unwrap(), "config.json");
    }

    #[test]
    fn log_dir_is_app_specific() {
        let dir = AppDirs::log_dir();
        assert!(dir.to_string_lossy().contains(APP_NAME) || dir == std::env::temp_dir());
    }
}
