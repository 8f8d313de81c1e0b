use std::{
    io,
    path::{Path, PathBuf},
};

use fs_err as fs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static CONFIG_FILENAME: &str = "padder.toml";

/// Defaults for padder, contained in a padder.toml file. Anything given on the
/// command line takes precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// The radius of the window that RGB values are averaged over.
    #[serde(default)]
    pub radius: Option<u32>,

    /// The spread of the Gaussian used to fade alpha outwards.
    #[serde(default)]
    pub sigma: Option<f64>,

    /// Whether to pick parameters from each image's resolution.
    #[serde(default)]
    pub auto: bool,

    /// Appended to the input's file stem to name the output.
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// The extension, and so the format, of generated output paths.
    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    /// The path that this config came from, if any.
    #[serde(skip)]
    pub file_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            radius: None,
            sigma: None,
            auto: false,
            output_suffix: default_output_suffix(),
            output_extension: default_output_extension(),
            file_path: None,
        }
    }
}

impl Config {
    pub fn read_from_folder<P: AsRef<Path>>(folder_path: P) -> Result<Self, ConfigError> {
        let folder_path = folder_path.as_ref();
        let file_path = &folder_path.join(CONFIG_FILENAME);

        Self::read_from_file(file_path)
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path)?;

        let mut config = Self::from_toml(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_owned(),
            source,
        })?;
        config.file_path = Some(path.to_owned());

        log::debug!("Read config from {}", path.display());

        Ok(config)
    }

    fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

fn default_output_suffix() -> String {
    "_padded".to_owned()
}

fn default_output_extension() -> String {
    "tga".to_owned()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{source} in {}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ConfigError {
    /// Tells whether this ConfigError originated because of a path not
    /// existing.
    ///
    /// This is intended for use with methods like `Config::read_from_folder` in
    /// order to avoid needing to check if a file with the right name exists.
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
