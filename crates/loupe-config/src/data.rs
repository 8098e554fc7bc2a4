use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_items_file() -> PathBuf {
    PathBuf::from("items.ndjson")
}

fn default_stats_file() -> PathBuf {
    PathBuf::from("stats.ndjson")
}

/// Locations of the two static catalogues.
///
/// `items_file`/`stats_file` join onto `dir`; an absolute file path
/// replaces the join entirely (`PathBuf::join` keeps absolute paths
/// whole), which is how CLI overrides land here. Reload reads these same
/// fields, so startup and reload always agree on the files.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DataConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_items_file")]
    pub items_file: PathBuf,
    #[serde(default = "default_stats_file")]
    pub stats_file: PathBuf,
}

impl DataConfig {
    pub fn new() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = env::var("LOUPE_DATA_DIR") {
            config.dir = PathBuf::from(dir);
        }
        config
    }

    pub fn items_path(&self) -> PathBuf {
        self.dir.join(&self.items_file)
    }

    pub fn stats_path(&self) -> PathBuf {
        self.dir.join(&self.stats_file)
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            items_file: default_items_file(),
            stats_file: default_stats_file(),
        }
    }
}
