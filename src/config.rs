use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATASET: &str = "ufc_top35_stats.csv";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    pub export_dir: PathBuf,
    pub tick_rate: Duration,
}

impl AppConfig {
    /// Reads `UFC_DATASET_PATH`, `UFC_EXPORT_DIR` and `UFC_TICK_MS`.
    pub fn from_env() -> Self {
        let dataset_path = env::var("UFC_DATASET_PATH")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET));
        let export_dir = env::var("UFC_EXPORT_DIR")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let tick_ms = env::var("UFC_TICK_MS")
            .ok()
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(250)
            .max(50);
        Self {
            dataset_path,
            export_dir,
            tick_rate: Duration::from_millis(tick_ms),
        }
    }

    /// First positional argument wins over the environment.
    pub fn with_args(mut self, mut args: impl Iterator<Item = String>) -> Self {
        if let Some(path) = args.find(|arg| !arg.starts_with('-')) {
            self.dataset_path = PathBuf::from(path);
        }
        self
    }

    pub fn export_path(&self, stamp: &str) -> PathBuf {
        self.export_dir.join(format!("ufc_views_{stamp}.xlsx"))
    }
}
