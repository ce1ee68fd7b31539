use std::io::Error as IOError;
use thiserror::Error;
use toml::de::Error as TomlDeError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid toml: {0}")]
    TomlFormatError(#[from] TomlDeError),
    #[error("invalid configuration: {0}")]
    ConfigFormatError(String),
    #[error("unable to read configuration: {0}")]
    IOError(#[from] IOError),
}
