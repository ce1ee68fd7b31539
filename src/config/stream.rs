use crate::config::ConfigError;
use crate::error::Result;
use crate::handle::{MemoryHandle, DEFAULT_MEMORY_LIMIT};
use crate::stream::{Options, Source, Stream};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::PathBuf;

/// Resource behind a stream built from a [`StreamConfig`].
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    /// A [`TempHandle`](../handle/struct.TempHandle.html).
    Temp,
    /// A [`MemoryHandle`](../handle/struct.MemoryHandle.html).
    Memory,
    /// A [`FileHandle`](../handle/struct.FileHandle.html) on `path`.
    File,
}

/// Configuration format for [`Stream`](../struct.Stream.html).
///
/// This configuration format is composed of an `id` field where the
/// `id` value must be "StreamConfig", a `kind` field among `temp`,
/// `memory` and `file`, and optional fields:
/// * `contents`: initial content of `temp` and `memory` streams,
/// * `mode`: access mode of `memory` (default `r+b`) and `file`
/// (default `r`) streams,
/// * `path`: file of `file` streams, mandatory for this kind,
/// * `memory_limit`: bytes a `temp` stream keeps in memory.
///
/// Below is an example of the configuration of a read-only in-memory
/// stream.
/// ```
/// use iostream::config::StreamConfig;
///
/// let config_str = "
/// id='StreamConfig'
/// kind='memory'
/// mode='r'
/// contents='abc'
/// ";
///
/// let mut stream = StreamConfig::from_string(config_str)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert!(!stream.is_writable().unwrap());
/// ```
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct StreamConfig {
    id: String,
    kind: StreamKind,
    contents: Option<String>,
    mode: Option<String>,
    path: Option<PathBuf>,
    memory_limit: Option<usize>,
}

impl StreamConfig {
    pub fn id() -> &'static str {
        "StreamConfig"
    }

    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    /// Parse a configuration from a string.
    pub fn from_string(s: &str) -> std::result::Result<Self, ConfigError> {
        let value = toml::from_str::<toml::Value>(s)?;
        Self::from_toml(&value)
    }

    /// Parse a configuration from a file.
    pub fn from_file<P: AsRef<std::path::Path>>(
        path: P,
    ) -> std::result::Result<Self, ConfigError> {
        let mut file = std::fs::File::open(path)?;
        let mut s = String::new();
        file.read_to_string(&mut s)?;
        Self::from_string(s.as_str())
    }

    pub fn from_toml(
        value: &toml::Value,
    ) -> std::result::Result<Self, ConfigError> {
        let config: StreamConfig = value.clone().try_into().map_err(|e| {
            ConfigError::ConfigFormatError(format!(
                "Invalid StreamConfig: {}\n{:?}",
                value, e
            ))
        })?;

        if config.id != Self::id() {
            return Err(ConfigError::ConfigFormatError(format!(
                "Invalid id {:?}, expected {:?}.",
                config.id,
                Self::id()
            )));
        }
        match config.kind {
            StreamKind::Temp if config.mode.is_some() => {
                Err(ConfigError::ConfigFormatError(String::from(
                    "Temporary streams are always opened in mode 'w+b'.",
                )))
            }
            StreamKind::Temp | StreamKind::Memory if config.path.is_some() => {
                Err(ConfigError::ConfigFormatError(String::from(
                    "Only 'file' streams have a path.",
                )))
            }
            StreamKind::Memory | StreamKind::File
                if config.memory_limit.is_some() =>
            {
                Err(ConfigError::ConfigFormatError(String::from(
                    "Only 'temp' streams have a memory limit.",
                )))
            }
            StreamKind::File if config.path.is_none() => {
                Err(ConfigError::ConfigFormatError(String::from(
                    "'file' streams require a path.",
                )))
            }
            StreamKind::File if config.contents.is_some() => {
                Err(ConfigError::ConfigFormatError(String::from(
                    "'file' streams cannot have contents.",
                )))
            }
            _ => Ok(config),
        }
    }

    /// Open the configured resource and wrap it into a stream.
    pub fn build(self) -> Result<Stream> {
        let contents = self.contents.unwrap_or_default().into_bytes();
        match (self.kind, self.path) {
            (StreamKind::Memory, _) => {
                let mode = self.mode.as_deref().unwrap_or("r+b");
                let handle = MemoryHandle::from_bytes(contents, mode)?;
                Stream::new(Source::from(handle))
            }
            (StreamKind::File, Some(path)) => {
                Stream::open(path, self.mode.as_deref().unwrap_or("r"))
            }
            _ => {
                let limit = self.memory_limit.unwrap_or(DEFAULT_MEMORY_LIMIT);
                let options = Options::default().memory_limit(limit);
                Stream::with_options(Source::Bytes(contents), options)
            }
        }
    }
}
