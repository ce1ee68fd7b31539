use crate::error::Result;
use crate::handle::{FileHandle, Handle, MemoryHandle};
use std::io::{Read, Seek, SeekFrom, Write};
use tracing::debug;

/// Memory limit of a [`TempHandle`] when none is given: 2 MiB.
pub const DEFAULT_MEMORY_LIMIT: usize = 2 * 1024 * 1024;

enum Storage {
    Memory(MemoryHandle),
    File(FileHandle),
}

/// A private read and write [`Handle`](trait.Handle.html) for scratch
/// data.
///
/// Data is kept in a [`MemoryHandle`] until a write would grow it past
/// the memory limit. The content is then moved into an anonymous
/// temporary [`FileHandle`] which serves all subsequent operations.
/// With a memory limit of 0, the temporary file is created up front.
pub struct TempHandle {
    storage: Storage,
    memory_limit: usize,
}

impl TempHandle {
    pub fn new(memory_limit: usize) -> Result<Self> {
        TempHandle::with_capacity(memory_limit, 0)
    }

    /// A handle about to receive `len` bytes. The temporary file is
    /// created right away when they do not fit under `memory_limit`, so
    /// that failing to create it is an open error rather than a write
    /// error.
    pub fn with_capacity(memory_limit: usize, len: usize) -> Result<Self> {
        let storage = if memory_limit == 0 || len > memory_limit {
            Storage::File(FileHandle::temporary()?)
        } else {
            Storage::Memory(MemoryHandle::new())
        };
        Ok(TempHandle {
            storage,
            memory_limit,
        })
    }

    pub fn memory_limit(&self) -> usize {
        self.memory_limit
    }

    /// Whether the content lives in a temporary file.
    pub fn is_spilled(&self) -> bool {
        matches!(self.storage, Storage::File(_))
    }

    /// Move the in-memory content into a temporary file, keeping the
    /// current position.
    fn spill(&mut self) -> std::io::Result<()> {
        let memory = match &self.storage {
            Storage::Memory(m) => m,
            Storage::File(_) => return Ok(()),
        };
        let mut file = tempfile::tempfile()?;
        file.write_all(memory.as_slice())?;
        file.seek(SeekFrom::Start(memory.position() as u64))?;
        debug!(
            size = memory.as_slice().len(),
            limit = self.memory_limit,
            "temporary handle spilled to file"
        );
        self.storage = Storage::File(FileHandle::anonymous(file));
        Ok(())
    }

    fn handle(&self) -> &dyn Handle {
        match &self.storage {
            Storage::Memory(m) => m as &dyn Handle,
            Storage::File(f) => f as &dyn Handle,
        }
    }

    fn handle_mut(&mut self) -> &mut dyn Handle {
        match &mut self.storage {
            Storage::Memory(m) => m as &mut dyn Handle,
            Storage::File(f) => f as &mut dyn Handle,
        }
    }
}

impl Default for TempHandle {
    fn default() -> Self {
        TempHandle {
            storage: Storage::Memory(MemoryHandle::new()),
            memory_limit: DEFAULT_MEMORY_LIMIT,
        }
    }
}

impl std::fmt::Debug for TempHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TempHandle")
            .field("memory_limit", &self.memory_limit)
            .field("spilled", &self.is_spilled())
            .finish()
    }
}

impl Read for TempHandle {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.handle_mut().read(buf)
    }
}

impl Write for TempHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Storage::Memory(m) = &self.storage {
            if m.position() + buf.len() > self.memory_limit {
                self.spill()?;
            }
        }
        self.handle_mut().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.handle_mut().flush()
    }
}

impl Seek for TempHandle {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.handle_mut().seek(pos)
    }
}

impl Handle for TempHandle {
    fn mode(&self) -> &str {
        self.handle().mode()
    }

    fn kind(&self) -> &'static str {
        "TEMP"
    }

    fn size(&self) -> Option<u64> {
        self.handle().size()
    }

    fn eof(&self) -> bool {
        self.handle().eof()
    }

    fn read_line(&mut self, limit: Option<usize>) -> std::io::Result<Vec<u8>> {
        self.handle_mut().read_line(limit)
    }
}
