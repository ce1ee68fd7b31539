mod contract;
use iostream::handle::FileHandle;
use iostream::{ErrorCode, MetaValue, Stream, Whence};
use std::cell::Cell;
use std::io::Write;

#[test]
fn file_stream_test_anonymous() {
    contract::test_stream(|bytes| {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(bytes).unwrap();
        let mut stream =
            Stream::new(FileHandle::from_file(file, "w+b").unwrap().into())
                .unwrap();
        stream.rewind().unwrap();
        stream
    });
}

#[test]
fn file_stream_test_path() {
    let dir = tempfile::tempdir().unwrap();
    let count = Cell::new(0usize);
    contract::test_stream(|bytes| {
        count.set(count.get() + 1);
        let path = dir.path().join(format!("stream-{}", count.get()));
        std::fs::write(&path, bytes).unwrap();
        Stream::open(&path, "r+b").unwrap()
    });
}

#[test]
fn file_stream_test_modes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("modes");

    let mut stream = Stream::open(&path, "x").unwrap();
    assert!(!stream.is_readable().unwrap());
    assert!(stream.is_writable().unwrap());
    stream.write(b"created").unwrap();
    stream.close();

    let e = Stream::open(&path, "x+").unwrap_err();
    assert_eq!(e.code(), ErrorCode::OpenFailed);
    let e = Stream::open(&path, "rw").unwrap_err();
    assert_eq!(e.code(), ErrorCode::InvalidType);

    let mut stream = Stream::open(&path, "a+").unwrap();
    stream.write(b" twice").unwrap();
    assert_eq!(stream.to_bytes(), b"created twice");
    assert_eq!(
        stream.metadata_value("mode").unwrap(),
        Some(MetaValue::from("a+"))
    );
    stream.close();

    let mut stream = Stream::open(&path, "w+").unwrap();
    assert_eq!(stream.size().unwrap(), Some(0));
    stream.write(b"new").unwrap();
    stream.seek(1, Whence::Start).unwrap();
    assert_eq!(stream.remaining_contents().unwrap(), b"ew");
}

#[test]
fn file_stream_test_read_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ro");
    std::fs::write(&path, b"fixed").unwrap();

    let mut stream = Stream::open(&path, "rb").unwrap();
    assert_eq!(stream.write(b"x").unwrap_err().code(), ErrorCode::WriteFailed);
    assert_eq!(stream.to_bytes(), b"fixed");
    assert_eq!(std::fs::read(&path).unwrap(), b"fixed");
}

#[cfg(unix)]
#[test]
fn file_stream_test_fifo() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fifo");
    let status = std::process::Command::new("mkfifo")
        .arg(&path)
        .status()
        .unwrap();
    assert!(status.success());

    let mut stream = Stream::open(&path, "r+").unwrap();
    assert!(!stream.is_seekable().unwrap());
    assert_eq!(
        stream.metadata_value("seekable").unwrap(),
        Some(MetaValue::Bool(false))
    );
    assert_eq!(
        stream.seek(0, Whence::Start).unwrap_err().code(),
        ErrorCode::SeekFailed
    );
    assert_eq!(stream.tell().unwrap_err().code(), ErrorCode::TellFailed);
    assert!(stream.to_bytes().is_empty());

    stream.write(b"ping\n").unwrap();
    assert_eq!(stream.read_line(None).unwrap(), b"ping\n");
    assert!(stream.is_usable());
}
