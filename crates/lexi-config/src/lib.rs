use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use self::network::NetworkConfig;
use self::search::SearchConfig;

pub mod network;
pub mod search;

fn default_preferences_path() -> String {
    let base = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|home| PathBuf::from(home).join(".config")));

    match base {
        Ok(dir) => dir.join("lexi").join("preferences.json").to_string_lossy().into_owned(),
        Err(_) => "lexi-preferences.json".to_string(),
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub search: SearchConfig,

    /// JSON file backing the preference store
    #[serde(default = "default_preferences_path")]
    pub preferences_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            search: SearchConfig::default(),
            preferences_path: default_preferences_path(),
        }
    }
}

impl Config {
    /// Defaults overridden by `LEXI_*` environment variables
    pub fn new() -> Self {
        let preferences_path =
            env::var("LEXI_PREFERENCES_PATH").unwrap_or_else(|_| default_preferences_path());

        Config {
            network: NetworkConfig::new(),
            search: SearchConfig::new(),
            preferences_path,
        }
    }
}
