use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_VAR: &str = "UPLOADER_CONFIG";
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 32 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    /// Directory accepted images are stored in.
    pub upload_dir: PathBuf,
    /// Directory request bodies are spooled to before validation.
    pub spool_dir: PathBuf,
    pub address: SocketAddr,
    pub max_upload_size: usize,
    pub create_upload_dir: bool,
    /// Root of the image dataset exposed under `/dataset`. Browsing is off
    /// when unset.
    pub dataset_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            upload_dir: PathBuf::from("uploads"),
            spool_dir: env::temp_dir(),
            address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            create_upload_dir: true,
            dataset_root: None,
        }
    }
}

impl Config {
    /// Defaults, then the YAML file named by `UPLOADER_CONFIG` if set, then
    /// `UPLOADER_*` environment overrides.
    pub fn new() -> Result<Config, ConfigError> {
        let config = match env::var(CONFIG_FILE_VAR) {
            Ok(path) => Config::from_file(path)?,
            Err(_) => Config::default(),
        };
        config.with_overrides(|key| env::var(key).ok())
    }

    pub fn from_file(input_file: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = input_file.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("UPLOADER_UPLOAD_DIR") {
            self.upload_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("UPLOADER_SPOOL_DIR") {
            self.spool_dir = PathBuf::from(dir);
        }
        if let Some(addr) = lookup("UPLOADER_ADDRESS") {
            self.address = parse_value("UPLOADER_ADDRESS", addr)?;
        }
        if let Some(size) = lookup("UPLOADER_MAX_UPLOAD_SIZE") {
            self.max_upload_size = parse_value("UPLOADER_MAX_UPLOAD_SIZE", size)?;
        }
        if let Some(flag) = lookup("UPLOADER_CREATE_UPLOAD_DIR") {
            self.create_upload_dir = parse_value("UPLOADER_CREATE_UPLOAD_DIR", flag)?;
        }
        if let Some(root) = lookup("UPLOADER_DATASET_ROOT") {
            self.dataset_root = Some(PathBuf::from(root));
        }
        Ok(self)
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
