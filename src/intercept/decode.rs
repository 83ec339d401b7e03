// src/intercept/decode.rs

//! Incremental UTF-8 decoding for byte-oriented writes.
//!
//! `io::Write` hands interceptors arbitrary byte slices, and a formatter is
//! free to split a multi-byte character across two calls. The decoder keeps
//! the incomplete tail until the rest arrives.

/// Stateful UTF-8 decoder.
///
/// Invalid sequences are replaced with U+FFFD, same as
/// [`String::from_utf8_lossy`].
#[derive(Debug, Default, Clone)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `bytes`, prefixed by any tail held back from the previous call.
    ///
    /// A trailing incomplete sequence is held back and not returned.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        let mut input = std::mem::take(&mut self.pending);
        input.extend_from_slice(bytes);

        let mut out = String::with_capacity(input.len());
        let mut rest = input.as_slice();

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            self.pending = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }

        out
    }

    /// True when part of a character is waiting for more bytes.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Give up on a held-back tail, returning a replacement character for it.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            char::REPLACEMENT_CHARACTER.to_string()
        }
    }
}
