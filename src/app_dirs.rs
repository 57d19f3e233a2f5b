use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "adivina";

/// Centralized application file locations
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    }

    pub fn statistics_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.data_local_dir().join("statistics.txt"))
            .unwrap_or_else(|| PathBuf::from("statistics.txt"))
    }

    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
                .join("debug.log")
        } else {
            Self::project()
                .map(|pd| pd.data_local_dir().join("debug.log"))
                .unwrap_or_else(|| PathBuf::from("debug.log"))
        }
    }
}
