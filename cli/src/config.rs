//! JSON config files for the dataset and convert commands.
//!
//! A missing config file is generated with defaults and the command exits
//! so the user can fill it in; both commands refuse to run on a freshly
//! generated file.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DATASET_CONFIG_FILE: &str = "coh3-dataset.config";
pub const CONVERT_CONFIG_FILE: &str = "coh3-convert.config";

/// Source roots searched by the dataset command.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub data_sources: Vec<PathBuf>,
}

/// Location of the external EDF converter.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertConfig {
    pub path_to_executable: PathBuf,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig {
            path_to_executable: default_config_path("coh3toEDF.exe"),
        }
    }
}

/// Default config location: next to the executable, falling back to the
/// working directory.
pub fn default_config_path(name: &str) -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .map(|dir| dir.join(name))
        .unwrap_or_else(|| PathBuf::from(name))
}

/// Load a config file, or generate it with defaults and bail out.
pub fn load_or_init<T>(path: &Path) -> Result<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    if path.is_file() {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        return serde_json::from_str(&content).map_err(|source| Error::ParseConfig {
            path: path.to_path_buf(),
            source,
        });
    }

    let default = T::default();
    let content =
        serde_json::to_string_pretty(&default).expect("default config is serializable");
    std::fs::write(path, content).map_err(|source| Error::WriteConfig {
        path: path.to_path_buf(),
        source,
    })?;

    Err(Error::GeneratedConfig {
        path: path.to_path_buf(),
    })
}
