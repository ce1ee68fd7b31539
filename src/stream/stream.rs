use crate::error::{Error, Result};
use crate::handle::{is_readable_mode, is_writable_mode};
use crate::handle::{FileHandle, Handle, Mode, TempHandle};
use crate::metadata::{MetaValue, Metadata};
use crate::stream::{Options, Source, Whence};
use std::collections::BTreeMap;
use std::io::{Read, Seek, Write};
use std::path::Path;
use tracing::{debug, trace, warn};

/// Default amount of bytes returned by
/// [`read_default()`](struct.Stream.html#method.read_default).
pub const DEFAULT_READ_SIZE: i64 = 8192;

/// A stream of bytes over exactly one resource [`Handle`].
///
/// A stream is usable from construction until it is either
/// [closed](struct.Stream.html#method.close) or
/// [detached](struct.Stream.html#method.detach) from its handle.
/// Once unusable, every operation fails with
/// [`Unusable`](enum.ErrorCode.html), except for observing that the stream
/// is neither readable, writable nor seekable.
///
/// The size of the resource, its readability, writability and metadata are
/// computed on first use and cached. The cached size is dropped on every
/// write.
///
/// If the stream is dropped while still usable, its handle is closed.
///
/// ## Example
///
/// ```
/// use iostream::{Stream, Whence};
///
/// let mut stream = Stream::new("hello world !".into()).unwrap();
/// assert_eq!(stream.size().unwrap(), Some(13));
/// stream.seek(6, Whence::Start).unwrap();
/// assert_eq!(stream.read(5).unwrap(), b"world");
/// assert_eq!(stream.to_bytes(), b"hello world !");
/// stream.close();
/// assert!(stream.read(5).is_err());
/// ```
pub struct Stream {
    handle: Option<Box<dyn Handle>>,
    size: Option<u64>,
    readable: Option<bool>,
    writable: Option<bool>,
    metadata: Option<Metadata>,
    custom_metadata: BTreeMap<String, MetaValue>,
    usable: bool,
}

impl Stream {
    pub fn new(source: Source) -> Result<Self> {
        Stream::with_options(source, Options::default())
    }

    /// Build a stream from `source`.
    ///
    /// Byte sources are written into a new [`TempHandle`]. The stream
    /// position is left at the end of the written bytes. A payload larger
    /// than the memory limit goes to a temporary file created up front.
    /// Adopted handles must have a valid access mode.
    pub fn with_options(source: Source, options: Options) -> Result<Self> {
        match source {
            Source::Bytes(bytes) => {
                let handle =
                    TempHandle::with_capacity(options.memory_limit, bytes.len())?;
                let mut stream = Stream::adopt(Box::new(handle), options);
                if !bytes.is_empty() {
                    stream.write(&bytes)?;
                }
                stream.size = Some(bytes.len() as u64);
                Ok(stream)
            }
            Source::Handle(handle) => {
                Mode::parse(handle.mode())?;
                debug!(
                    kind = handle.kind(),
                    mode = handle.mode(),
                    "adopted stream handle"
                );
                let size = options.size;
                let mut stream = Stream::adopt(handle, options);
                stream.size = size;
                Ok(stream)
            }
        }
    }

    /// Build a stream from a dynamically typed value.
    /// See [`Source::from_any()`](enum.Source.html#method.from_any).
    pub fn from_any(value: Box<dyn std::any::Any>) -> Result<Self> {
        Stream::new(Source::from_any(value)?)
    }

    /// Open the file at `path` with an fopen-style `mode`.
    pub fn open<P: AsRef<Path>>(path: P, mode: &str) -> Result<Self> {
        Stream::new(Source::Handle(Box::new(FileHandle::open(path, mode)?)))
    }

    fn adopt(handle: Box<dyn Handle>, options: Options) -> Self {
        Stream {
            handle: Some(handle),
            size: None,
            readable: None,
            writable: None,
            metadata: None,
            custom_metadata: options.metadata,
            usable: true,
        }
    }

    pub(crate) fn handle(&self) -> Result<&(dyn Handle + 'static)> {
        if !self.usable {
            return Err(Error::Unusable);
        }
        self.handle.as_deref().ok_or(Error::Unusable)
    }

    pub(crate) fn handle_mut(
        &mut self,
    ) -> Result<&mut (dyn Handle + 'static)> {
        if !self.usable {
            return Err(Error::Unusable);
        }
        self.handle.as_deref_mut().ok_or(Error::Unusable)
    }

    /// Drop the size cache. Called after every write.
    pub(crate) fn invalidate_size(&mut self) {
        self.size = None;
    }

    /// Whether the stream was neither closed nor detached.
    pub fn is_usable(&self) -> bool {
        self.usable
    }

    /// Size of the resource in bytes, if it can be known.
    pub fn size(&mut self) -> Result<Option<u64>> {
        self.handle()?;
        if let Some(size) = self.size {
            return Ok(Some(size));
        }
        let size = self.handle()?.size();
        trace!(?size, "computed stream size");
        self.size = size;
        Ok(size)
    }

    pub fn metadata(&mut self) -> Result<&Metadata> {
        self.handle()?;
        if self.metadata.is_none() {
            let mut metadata = Metadata::from_handle(self.handle()?);
            metadata.extend(
                self.custom_metadata
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone())),
            );
            self.metadata = Some(metadata);
        }
        self.metadata.as_ref().ok_or(Error::Unusable)
    }

    /// Look up a single metadata entry.
    pub fn metadata_value(&mut self, key: &str) -> Result<Option<MetaValue>> {
        Ok(self.metadata()?.get(key).cloned())
    }

    /// Whether the stream can seek. Always `false` once unusable.
    pub fn is_seekable(&mut self) -> Result<bool> {
        if !self.usable {
            return Ok(false);
        }
        Ok(self.metadata()?.seekable())
    }

    /// Move the position to `offset` bytes from `whence`.
    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<()> {
        self.handle()?;
        if !self.is_seekable()? {
            return Err(Error::Seek(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "stream is not seekable",
            )));
        }
        let pos = whence.seek_from(offset).map_err(Error::Seek)?;
        self.handle_mut()?.seek(pos).map_err(Error::Seek)?;
        Ok(())
    }

    pub fn rewind(&mut self) -> Result<()> {
        self.seek(0, Whence::Start)
    }

    /// Current position in the resource.
    pub fn tell(&mut self) -> Result<u64> {
        self.handle_mut()?.stream_position().map_err(Error::Tell)
    }

    /// Whether the last read reached the end of the resource.
    ///
    /// A stream positioned at the end of its resource is not at
    /// end-of-stream until a read attempt comes back short.
    pub fn eof(&self) -> Result<bool> {
        Ok(self.handle()?.eof())
    }

    pub fn is_readable(&mut self) -> Result<bool> {
        if let Some(readable) = self.readable {
            return Ok(readable);
        }
        let readable = is_readable_mode(self.handle()?.mode());
        self.readable = Some(readable);
        Ok(readable)
    }

    pub fn is_writable(&mut self) -> Result<bool> {
        if let Some(writable) = self.writable {
            return Ok(writable);
        }
        let writable = is_writable_mode(self.handle()?.mode());
        self.writable = Some(writable);
        Ok(writable)
    }

    /// Read up to `max` bytes.
    ///
    /// A `max` below 1 returns no bytes without touching the resource.
    /// Returning fewer bytes than requested is not an error.
    pub fn read(&mut self, max: i64) -> Result<Vec<u8>> {
        if max < 1 {
            return Ok(Vec::new());
        }
        let handle = self.handle_mut()?;
        let mut buf = Vec::new();
        handle
            .take(max as u64)
            .read_to_end(&mut buf)
            .map_err(Error::Read)?;
        Ok(buf)
    }

    /// Read up to [`DEFAULT_READ_SIZE`] bytes.
    pub fn read_default(&mut self) -> Result<Vec<u8>> {
        self.read(DEFAULT_READ_SIZE)
    }

    /// Read the next line, terminator included.
    ///
    /// With `Some(max)`, at most `max - 1` bytes are read and a `max`
    /// below 1 returns no bytes.
    pub fn read_line(&mut self, max: Option<i64>) -> Result<Vec<u8>> {
        let limit = match max {
            Some(max) if max < 1 => return Ok(Vec::new()),
            Some(max) => Some((max - 1) as usize),
            None => None,
        };
        self.handle_mut()?.read_line(limit).map_err(Error::Read)
    }

    /// Read everything from the current position to the end.
    pub fn remaining_contents(&mut self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.handle_mut()?
            .read_to_end(&mut buf)
            .map_err(Error::Read)?;
        Ok(buf)
    }

    /// The whole content of the stream, read from the start.
    ///
    /// Unlike every other operation this one never fails: any error
    /// yields an empty vector.
    pub fn to_bytes(&mut self) -> Vec<u8> {
        match self.rewind().and_then(|_| self.remaining_contents()) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "unable to read stream contents");
                Vec::new()
            }
        }
    }

    /// Write all of `data` at the current position.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.handle_mut()?.write_all(data).map_err(Error::Write)?;
        self.invalidate_size();
        Ok(data.len())
    }

    /// Release the resource. The stream is unusable afterwards.
    pub fn close(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            if let Err(e) = handle.flush() {
                debug!(error = %e, "flush failed while closing stream");
            }
            debug!(kind = handle.kind(), "closed stream");
        }
        self.set_unusable();
    }

    /// Give the resource back to the caller without releasing it.
    /// The stream is unusable afterwards.
    pub fn detach(&mut self) -> Result<Option<Box<dyn Handle>>> {
        if !self.usable {
            return Err(Error::Unusable);
        }
        let handle = self.handle.take();
        self.set_unusable();
        debug!(detached = handle.is_some(), "detached stream");
        Ok(handle)
    }

    fn set_unusable(&mut self) {
        self.usable = false;
        self.size = None;
        self.readable = Some(false);
        self.writable = Some(false);
        self.metadata = None;
    }
}

impl Drop for Stream {
    fn drop(&mut self) {
        if self.handle.is_some() {
            trace!("closing stream on drop");
            self.close();
        }
    }
}

impl std::fmt::Debug for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream")
            .field("kind", &self.handle.as_ref().map(|h| h.kind()))
            .field("usable", &self.usable)
            .field("size", &self.size)
            .field("readable", &self.readable)
            .field("writable", &self.writable)
            .finish()
    }
}
