// tests/tee_passthrough.rs

use std::error::Error;
use std::io::{ErrorKind, Write};

use streamtap::intercept::{Tee, from_fn};
use streamtap_test_utils::{CaptureSink, FailingConsumer, FailingSink, Recorder, init_tracing};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn each_write_reaches_sink_then_consumer() -> TestResult {
    init_tracing();

    let sink = CaptureSink::new();
    let recorder = Recorder::new();
    let mut tee = Tee::new(sink.clone(), recorder.clone());

    tee.write_str("Hello, World!")?;
    tee.write_str("\n")?;

    assert_eq!(sink.text(), "Hello, World!\n");
    assert_eq!(recorder.calls(), vec!["Hello, World!", "\n"]);
    Ok(())
}

#[test]
fn byte_writes_are_forwarded_unbuffered() -> TestResult {
    let sink = CaptureSink::new();
    let recorder = Recorder::new();
    let mut tee = Tee::new(sink.clone(), recorder.clone());

    tee.write_all(b"a\nb")?;
    assert_eq!(recorder.calls(), vec!["a\nb"]);
    assert_eq!(sink.bytes(), b"a\nb");
    Ok(())
}

#[test]
fn split_character_reaches_consumer_once_whole() -> TestResult {
    let sink = CaptureSink::new();
    let recorder = Recorder::new();
    let mut tee = Tee::new(sink.clone(), recorder.clone());

    let bytes = "é".as_bytes();
    tee.write_all(&bytes[..1])?;
    assert!(recorder.is_empty());
    assert_eq!(sink.bytes(), &bytes[..1]);

    tee.write_all(&bytes[1..])?;
    assert_eq!(recorder.calls(), vec!["é"]);
    assert_eq!(sink.bytes(), bytes);
    Ok(())
}

#[test]
fn sink_error_propagates_and_skips_consumer() {
    let recorder = Recorder::new();
    let mut tee = Tee::new(FailingSink, recorder.clone());

    let err = tee.write_str("lost").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BrokenPipe);
    assert!(recorder.is_empty());
}

#[test]
fn consumer_error_propagates_after_sink_write() {
    let sink = CaptureSink::new();
    let mut tee = Tee::new(sink.clone(), FailingConsumer);

    let err = tee.write_all(b"seen").unwrap_err();
    assert_eq!(err.to_string(), "console unavailable");
    assert_eq!(sink.text(), "seen");
}

#[test]
fn flush_delegates_to_sink() -> TestResult {
    let sink = CaptureSink::new();
    let mut tee = Tee::new(sink.clone(), Recorder::new());

    tee.flush()?;
    assert_eq!(sink.flushes(), 1);

    let returned = tee.into_inner();
    assert_eq!(returned.flushes(), 1);
    Ok(())
}

#[test]
fn closures_work_as_consumers() -> TestResult {
    let mut seen = Vec::new();
    {
        let mut tee = Tee::new(Vec::new(), from_fn(|text| seen.push(text.len())));
        tee.write_str("abc")?;
        tee.write_str("")?;
        assert_eq!(tee.get_ref(), b"abc");
    }
    assert_eq!(seen, vec![3, 0]);
    Ok(())
}

#[test]
fn flush_hands_unfinished_character_to_consumer() -> TestResult {
    let sink = CaptureSink::new();
    let recorder = Recorder::new();
    let mut tee = Tee::new(sink.clone(), recorder.clone());

    tee.write_all(b"ab\xE2")?;
    assert_eq!(recorder.calls(), vec!["ab"]);

    tee.flush()?;
    assert_eq!(recorder.calls(), vec!["ab", "\u{FFFD}"]);
    assert_eq!(sink.bytes(), b"ab\xE2");

    tee.flush()?;
    assert_eq!(recorder.calls().len(), 2);
    Ok(())
}
