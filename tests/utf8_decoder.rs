// tests/utf8_decoder.rs

use streamtap::intercept::Utf8Decoder;

#[test]
fn character_split_across_three_chunks() {
    let mut decoder = Utf8Decoder::new();
    let euro = "€".as_bytes();
    assert_eq!(euro.len(), 3);

    assert_eq!(decoder.decode(&euro[..1]), "");
    assert!(decoder.has_pending());
    assert_eq!(decoder.decode(&euro[1..2]), "");
    assert_eq!(decoder.decode(&euro[2..]), "€");
    assert!(!decoder.has_pending());
}

#[test]
fn invalid_bytes_become_replacement_characters() {
    let mut decoder = Utf8Decoder::new();
    assert_eq!(decoder.decode(b"a\xFFb"), "a\u{FFFD}b");
}

#[test]
fn interrupted_sequence_is_replaced_and_decoding_resumes() {
    let mut decoder = Utf8Decoder::new();
    assert_eq!(decoder.decode(b"x\xC3"), "x");
    assert_eq!(decoder.decode(b"\n"), "\u{FFFD}\n");
}

#[test]
fn finish_reports_dangling_tail() {
    let mut decoder = Utf8Decoder::new();
    decoder.decode(b"\xE2\x82");
    assert_eq!(decoder.finish(), "\u{FFFD}");
    assert_eq!(decoder.finish(), "");
}
