use crate::error::{Error, Result};
use crate::handle::{FileHandle, Handle, MemoryHandle, TempHandle};
use crate::handle::DEFAULT_MEMORY_LIMIT;
use crate::metadata::MetaValue;
use std::any::Any;
use std::collections::BTreeMap;
use std::io::SeekFrom;

#[allow(clippy::module_inception)]
mod stream;
pub use stream::{Stream, DEFAULT_READ_SIZE};
mod io;

/// What a [`Stream`] is built from.
pub enum Source {
    /// Seed a new temporary resource with these bytes.
    Bytes(Vec<u8>),
    /// Adopt an already open resource.
    Handle(Box<dyn Handle>),
}

impl Source {
    /// Resolve a dynamically typed value into a [`Source`].
    ///
    /// Byte sequences (`Vec<u8>`, `String`, `&'static [u8]`,
    /// `&'static str`), the handles of this crate, boxed handles and
    /// sources are accepted. Anything else is an
    /// [`InvalidType`](enum.ErrorCode.html) error.
    pub fn from_any(value: Box<dyn Any>) -> Result<Self> {
        let value = match value.downcast::<Source>() {
            Ok(source) => return Ok(*source),
            Err(value) => value,
        };
        let value = match value.downcast::<Vec<u8>>() {
            Ok(bytes) => return Ok(Source::Bytes(*bytes)),
            Err(value) => value,
        };
        let value = match value.downcast::<String>() {
            Ok(s) => return Ok(Source::from(*s)),
            Err(value) => value,
        };
        let value = match value.downcast::<&'static str>() {
            Ok(s) => return Ok(Source::from(*s)),
            Err(value) => value,
        };
        let value = match value.downcast::<&'static [u8]>() {
            Ok(bytes) => return Ok(Source::from(*bytes)),
            Err(value) => value,
        };
        let value = match value.downcast::<Box<dyn Handle>>() {
            Ok(handle) => return Ok(Source::Handle(*handle)),
            Err(value) => value,
        };
        let value = match value.downcast::<FileHandle>() {
            Ok(handle) => return Ok(Source::Handle(handle)),
            Err(value) => value,
        };
        let value = match value.downcast::<MemoryHandle>() {
            Ok(handle) => return Ok(Source::Handle(handle)),
            Err(value) => value,
        };
        match value.downcast::<TempHandle>() {
            Ok(handle) => Ok(Source::Handle(handle)),
            Err(_) => Err(Error::InvalidType(String::from(
                "expected a byte sequence or a resource handle",
            ))),
        }
    }
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Bytes(bytes) => {
                f.debug_tuple("Bytes").field(&bytes.len()).finish()
            }
            Source::Handle(handle) => {
                f.debug_tuple("Handle").field(&handle.kind()).finish()
            }
        }
    }
}

impl From<Vec<u8>> for Source {
    fn from(bytes: Vec<u8>) -> Self {
        Source::Bytes(bytes)
    }
}

impl From<&[u8]> for Source {
    fn from(bytes: &[u8]) -> Self {
        Source::Bytes(bytes.to_vec())
    }
}

impl From<String> for Source {
    fn from(s: String) -> Self {
        Source::Bytes(s.into_bytes())
    }
}

impl From<&str> for Source {
    fn from(s: &str) -> Self {
        Source::Bytes(s.as_bytes().to_vec())
    }
}

impl From<Box<dyn Handle>> for Source {
    fn from(handle: Box<dyn Handle>) -> Self {
        Source::Handle(handle)
    }
}

impl From<FileHandle> for Source {
    fn from(handle: FileHandle) -> Self {
        Source::Handle(Box::new(handle))
    }
}

impl From<MemoryHandle> for Source {
    fn from(handle: MemoryHandle) -> Self {
        Source::Handle(Box::new(handle))
    }
}

impl From<TempHandle> for Source {
    fn from(handle: TempHandle) -> Self {
        Source::Handle(Box::new(handle))
    }
}

/// Origin of a [`Stream::seek()`](struct.Stream.html#method.seek) offset.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Whence {
    Start,
    Current,
    End,
}

impl Whence {
    pub(crate) fn seek_from(self, offset: i64) -> std::io::Result<SeekFrom> {
        match self {
            Whence::Start => match u64::try_from(offset) {
                Ok(offset) => Ok(SeekFrom::Start(offset)),
                Err(_) => Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("negative offset {} from start", offset),
                )),
            },
            Whence::Current => Ok(SeekFrom::Current(offset)),
            Whence::End => Ok(SeekFrom::End(offset)),
        }
    }
}

/// Construction options of a [`Stream`].
#[derive(Debug, Clone)]
pub struct Options {
    /// Known size of an adopted handle. Ignored for byte sources.
    pub size: Option<u64>,
    /// Entries added to, or overriding, the stream metadata.
    pub metadata: BTreeMap<String, MetaValue>,
    /// Bytes a temporary resource keeps in memory before moving to a file.
    pub memory_limit: usize,
}

impl Options {
    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn metadata<K: Into<String>, V: Into<MetaValue>>(
        mut self,
        key: K,
        value: V,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn memory_limit(mut self, limit: usize) -> Self {
        self.memory_limit = limit;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            size: None,
            metadata: BTreeMap::new(),
            memory_limit: DEFAULT_MEMORY_LIMIT,
        }
    }
}
