mod contract;
use iostream::{Options, Source, Stream};

#[test]
fn temp_stream_test_default() {
    contract::test_stream(|bytes| Stream::new(Source::from(bytes)).unwrap());
}

#[test]
fn temp_stream_test_spill() {
    contract::test_stream(|bytes| {
        let options = Options::default().memory_limit(16);
        Stream::with_options(bytes.into(), options).unwrap()
    });
}

#[test]
fn temp_stream_test_file() {
    contract::test_stream(|bytes| {
        let options = Options::default().memory_limit(0);
        Stream::with_options(bytes.into(), options).unwrap()
    });
}

#[test]
fn temp_stream_test_large_payload() {
    let payload = contract::rand_bytes(64 * 1024);
    let options = Options::default().memory_limit(1024);
    let mut stream =
        Stream::with_options(payload.clone().into(), options).unwrap();
    assert_eq!(stream.size().unwrap(), Some(payload.len() as u64));
    assert_eq!(stream.tell().unwrap(), payload.len() as u64);
    assert_eq!(stream.to_bytes(), payload);
}
