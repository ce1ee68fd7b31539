//! Module to instantiate a stream from a configuration file.
//!
//! Configuration file/strings describe the resource behind a
//! [`Stream`](../struct.Stream.html) using the
//! [`toml`](https://toml.io/en/) format.
//! The [`StreamConfig`] structure is the entry point to create a
//! stream instance from a configuration string or file:
//! ```
//! use iostream::config::StreamConfig;
//!
//! let config_str = "
//! id='StreamConfig'
//! kind='temp'
//! contents='hello'
//! memory_limit=1024
//! ";
//! let mut stream = StreamConfig::from_string(config_str)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! assert_eq!(stream.to_bytes(), b"hello");
//! ```
//!
//! See [`StreamConfig`] for the list of accepted fields.

mod error;
pub use error::ConfigError;
mod stream;
pub use stream::{StreamConfig, StreamKind};
