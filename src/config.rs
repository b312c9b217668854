use std::{
    fs::{create_dir_all, File},
    io::{BufReader, Write},
    path::PathBuf,
};

use home::home_dir;
use serde::{Deserialize, Serialize};
use tabsync::document::assembler::DEFAULT_OFFSET;
use tabsync::{OutputFormat, TabSyncError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Audio lead-in in seconds, written as the document offset
    offset: f64,
    output_format: OutputFormat,
    base_tone: Option<String>,
    output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            output_format: OutputFormat::default(),
            base_tone: None,
            output_dir: None,
        }
    }
}

impl Config {
    // folder placed in $HOME directory
    const FOLDER: &'static str = ".tabsync";

    pub const fn offset(&self) -> f64 {
        self.offset
    }

    pub const fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn base_tone(&self) -> Option<String> {
        self.base_tone.clone()
    }

    pub fn output_dir(&self) -> Option<PathBuf> {
        self.output_dir.clone()
    }

    fn get_base_path() -> Result<PathBuf, TabSyncError> {
        let home = home_dir().ok_or_else(|| {
            TabSyncError::ConfigurationError("Could not find home directory".to_string())
        })?;
        let path = home.join(Self::FOLDER);
        Ok(path)
    }

    fn get_path() -> Result<PathBuf, TabSyncError> {
        let base = Self::get_base_path()?;
        Ok(base.join("config.json"))
    }

    /// Creates config if it does not exist
    pub fn read_config() -> Result<Self, TabSyncError> {
        let base_path = Self::get_base_path()?;
        if !base_path.exists() {
            create_dir_all(base_path)?;
        }
        let config_path = Self::get_path()?;
        if !config_path.exists() {
            // create default config
            Config::default().save_config()?;
        }
        let file = File::open(config_path)?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader).map_err(|err| {
            TabSyncError::ConfigurationError(format!("Could not read local configuration {err:}"))
        })?;
        Ok(config)
    }

    /// Assumes the config folder exists
    pub fn save_config(&self) -> Result<(), TabSyncError> {
        let config_path = Self::get_path()?;
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            TabSyncError::ConfigurationError(format!("Could not save local configuration {err:}"))
        })?;
        let mut file = File::create(config_path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
