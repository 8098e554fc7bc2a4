use std::env;

use serde::{Deserialize, Serialize};

use self::data::DataConfig;

pub mod data;

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,

    /// Channel capacity for text blocks arriving from the capture side
    pub input_capacity: usize,
}

impl Config {
    pub fn new() -> Self {
        let input_capacity = env::var("LOUPE_INPUT_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(256); // OCR burst capacity

        Config {
            data: DataConfig::new(),
            input_capacity,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
