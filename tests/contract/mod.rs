use iostream::{ErrorCode, Stream, Whence};
use rand::random;

pub fn rand_bytes(n: usize) -> Vec<u8> {
    (0..n).map(|_| random::<u8>()).collect()
}

/// Content of a readable, writable and seekable stream must round trip
/// through writes, seeks and reads.
pub fn test_stream<F>(make: F)
where
    F: Fn(&[u8]) -> Stream,
{
    test_contents(&make);
    test_size(&make);
    test_seek_and_read(&make);
    test_read_line(&make);
    test_eof(&make);
    test_random_writes(&make);
    test_close(&make);
    test_detach(&make);
}

fn test_contents<F: Fn(&[u8]) -> Stream>(make: &F) {
    let mut stream = make(b"");
    assert!(stream.to_bytes().is_empty());

    let mut stream = make(b"hello world !");
    assert_eq!(stream.to_bytes(), b"hello world !");
    stream.seek(0, Whence::Start).unwrap();
    assert_eq!(stream.remaining_contents().unwrap(), b"hello world !");
    assert!(stream.remaining_contents().unwrap().is_empty());
}

fn test_size<F: Fn(&[u8]) -> Stream>(make: &F) {
    let mut stream = make(b"");
    assert_eq!(stream.size().unwrap(), Some(0));
    stream.write(b"abc").unwrap();
    assert_eq!(stream.size().unwrap(), Some(3));
    stream.write(b"defg").unwrap();
    assert_eq!(stream.size().unwrap(), Some(7));
}

fn test_seek_and_read<F: Fn(&[u8]) -> Stream>(make: &F) {
    let mut stream = make(b"0123456789");
    assert!(stream.is_seekable().unwrap());
    stream.seek(2, Whence::Start).unwrap();
    assert_eq!(stream.tell().unwrap(), 2);
    assert_eq!(stream.read(3).unwrap(), b"234");
    stream.seek(2, Whence::Current).unwrap();
    assert_eq!(stream.tell().unwrap(), 7);
    stream.seek(-1, Whence::End).unwrap();
    assert_eq!(stream.read_default().unwrap(), b"9");
    stream.rewind().unwrap();
    assert_eq!(stream.tell().unwrap(), 0);

    for n in [0, -1, i64::MIN] {
        assert!(stream.read(n).unwrap().is_empty());
    }
    assert_eq!(stream.tell().unwrap(), 0);

    let e = stream.seek(-1, Whence::Start).unwrap_err();
    assert_eq!(e.code(), ErrorCode::SeekFailed);
}

fn test_read_line<F: Fn(&[u8]) -> Stream>(make: &F) {
    let mut stream = make(b"first\nsecond line\n\nlast");
    stream.rewind().unwrap();
    assert_eq!(stream.read_line(None).unwrap(), b"first\n");
    assert_eq!(stream.read_line(Some(4)).unwrap(), b"sec");
    assert_eq!(stream.read_line(None).unwrap(), b"ond line\n");
    assert!(stream.read_line(Some(-3)).unwrap().is_empty());
    assert_eq!(stream.read_line(Some(100)).unwrap(), b"\n");
    assert_eq!(stream.read_line(None).unwrap(), b"last");
    assert!(stream.read_line(None).unwrap().is_empty());
}

fn test_eof<F: Fn(&[u8]) -> Stream>(make: &F) {
    let mut stream = make(b"abc");
    stream.rewind().unwrap();
    assert!(!stream.eof().unwrap());
    assert_eq!(stream.read(3).unwrap(), b"abc");
    assert!(!stream.eof().unwrap());
    assert!(stream.read(1).unwrap().is_empty());
    assert!(stream.eof().unwrap());
    stream.rewind().unwrap();
    assert!(!stream.eof().unwrap());
}

fn test_random_writes<F: Fn(&[u8]) -> Stream>(make: &F) {
    let mut expected = Vec::new();
    let mut stream = make(b"");
    for i in 0..16 {
        let chunk = rand_bytes(1 + i * 37);
        assert_eq!(stream.write(&chunk).unwrap(), chunk.len());
        expected.extend_from_slice(&chunk);
    }
    assert_eq!(stream.size().unwrap(), Some(expected.len() as u64));
    assert_eq!(stream.to_bytes(), expected);

    let offset = expected.len() / 2;
    stream.seek(offset as i64, Whence::Start).unwrap();
    stream.write(b"patch").unwrap();
    expected[offset..offset + 5].copy_from_slice(b"patch");
    assert_eq!(stream.to_bytes(), expected);
}

fn test_close<F: Fn(&[u8]) -> Stream>(make: &F) {
    let mut stream = make(b"data");
    stream.close();
    assert!(!stream.is_usable());

    let unusable = |e: iostream::Error| e.code() == ErrorCode::Unusable;
    assert!(unusable(stream.read(1).unwrap_err()));
    assert!(unusable(stream.read_line(None).unwrap_err()));
    assert!(unusable(stream.remaining_contents().unwrap_err()));
    assert!(unusable(stream.write(b"x").unwrap_err()));
    assert!(unusable(stream.seek(0, Whence::Start).unwrap_err()));
    assert!(unusable(stream.rewind().unwrap_err()));
    assert!(unusable(stream.tell().unwrap_err()));
    assert!(unusable(stream.eof().unwrap_err()));
    assert!(unusable(stream.size().unwrap_err()));
    assert!(unusable(stream.metadata().unwrap_err()));
    assert!(unusable(stream.detach().unwrap_err()));

    assert!(!stream.is_readable().unwrap());
    assert!(!stream.is_writable().unwrap());
    assert!(!stream.is_seekable().unwrap());
    assert!(stream.to_bytes().is_empty());
    assert!(stream.read(0).unwrap().is_empty());
    stream.close();
}

fn test_detach<F: Fn(&[u8]) -> Stream>(make: &F) {
    let mut stream = make(b"kept");
    let mut handle = stream.detach().unwrap().expect("live handle");
    assert!(!stream.is_usable());
    assert_eq!(stream.read(1).unwrap_err().code(), ErrorCode::Unusable);
    assert_eq!(stream.detach().unwrap_err().code(), ErrorCode::Unusable);
    drop(stream);

    // The resource outlives the stream it was detached from.
    let mut content = Vec::new();
    std::io::Seek::rewind(&mut handle).unwrap();
    std::io::Read::read_to_end(&mut handle, &mut content).unwrap();
    assert_eq!(content, b"kept");

    let mut stream = Stream::new(handle.into()).unwrap();
    assert_eq!(stream.to_bytes(), b"kept");
}
