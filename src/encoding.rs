// Copyright 2013 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The WHATWG Encoding Standard label registry, and the idempotent
//! percent-encoder built on top of it.
//!
//! Grounded on the `encoding_rs`-backed override this crate's teacher
//! used for the same purpose (see DESIGN.md); unlike the teacher, this
//! crate does not also carry a legacy `rust-encoding` code path, since
//! the `encoding_rs` path is the one the teacher itself settled on.

use crate::error::{ParseError, UNKNOWN_ENCODING_LABEL};
use percent_encoding::PercentEncodeSet;
use std::fmt::Write as _;

/// A resolved WHATWG encoding, or `None` for UTF-8 (the common case,
/// kept unboxed so the hot path allocates nothing).
#[derive(Clone, Copy, Debug)]
pub(crate) struct QueryEncoding {
    encoding: Option<&'static encoding_rs::Encoding>,
}

impl QueryEncoding {
    pub(crate) const UTF8: QueryEncoding = QueryEncoding { encoding: None };

    /// Look up a WHATWG encoding label (case- and whitespace-insensitive,
    /// per the Encoding Standard). Returns an error for an unrecognised
    /// label rather than silently falling back to UTF-8.
    pub(crate) fn for_label(label: &str) -> Result<Self, ParseError> {
        let trimmed = label.trim();
        match encoding_rs::Encoding::for_label(trimmed.as_bytes()) {
            Some(encoding) => Ok(QueryEncoding::from_encoding(encoding)),
            None => Err(UNKNOWN_ENCODING_LABEL),
        }
    }

    fn from_encoding(encoding: &'static encoding_rs::Encoding) -> Self {
        QueryEncoding {
            encoding: if encoding == encoding_rs::UTF_8 {
                None
            } else {
                Some(encoding)
            },
        }
    }

    /// The "get an output encoding" algorithm: UTF-16LE/BE are never used
    /// as an output encoding, only as a decode encoding, and are
    /// substituted with UTF-8.
    pub(crate) fn to_output_encoding(self) -> Self {
        match self.encoding {
            Some(encoding) if encoding == encoding_rs::UTF_16LE || encoding == encoding_rs::UTF_16BE => {
                QueryEncoding::UTF8
            }
            _ => self,
        }
    }

    pub(crate) fn is_utf8(self) -> bool {
        self.encoding.is_none()
    }

    /// Encode `input` into this encoding's bytes. Code points the target
    /// encoding cannot represent are replaced with an XML numeric
    /// character reference (`&#N;`), per the query percent-encoder's
    /// fallback rule, so non-UTF-8 queries still round-trip losslessly
    /// through ASCII.
    pub(crate) fn encode(self, input: &str) -> Vec<u8> {
        match self.encoding {
            None => input.as_bytes().to_vec(),
            Some(encoding) => {
                let mut encoder = encoding.new_encoder();
                let mut output = Vec::with_capacity(input.len());
                let mut remaining = input;
                loop {
                    let max_len = encoder
                        .max_buffer_length_from_utf8_without_replacement(remaining.len())
                        .unwrap_or(remaining.len() * 4 + 4);
                    let mut buf = vec![0u8; max_len.max(16)];
                    let (result, read, written) = encoder
                        .encode_from_utf8_without_replacement(remaining, &mut buf, true);
                    output.extend_from_slice(&buf[..written]);
                    match result {
                        encoding_rs::EncoderResult::InputEmpty => break,
                        encoding_rs::EncoderResult::OutputFull => {
                            remaining = &remaining[read..];
                        }
                        encoding_rs::EncoderResult::Unmappable(c) => {
                            remaining = &remaining[read..];
                            write!(output_as_string(&mut output), "&#{};", c as u32).ok();
                        }
                    }
                }
                output
            }
        }
    }
}

/// Adapts a `Vec<u8>` so `write!` can append ASCII text to it; every
/// character written here is ASCII (digits, `&`, `#`, `;`), so pushing
/// UTF-8 bytes directly is always valid.
struct ByteSink<'a>(&'a mut Vec<u8>);

impl std::fmt::Write for ByteSink<'_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

fn output_as_string(output: &mut Vec<u8>) -> ByteSink<'_> {
    ByteSink(output)
}

/// Percent-encode `input`, transcoding through `encoding` first, escaping
/// bytes that `set` contains. Applies the idempotency rule: a `%` in
/// `input` that is already followed by two ASCII hex digits is emitted
/// literally rather than becoming `%25`, so re-running this on an
/// already-escaped string is a no-op.
pub(crate) fn percent_encode_idempotent(
    input: &str,
    encoding: QueryEncoding,
    set: &PercentEncodeSet,
) -> String {
    let bytes = encoding.encode(input);
    percent_encode_idempotent_bytes(&bytes, set)
}

pub(crate) fn percent_encode_idempotent_bytes(bytes: &[u8], set: &PercentEncodeSet) -> String {
    let mut output = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        if set.contains(byte) {
            if byte == b'%' && percent_encoding::starts_with_two_hex(&bytes[i + 1..]) {
                output.push('%');
            } else {
                output.push('%');
                output.push(HEX_UPPER[(byte >> 4) as usize] as char);
                output.push(HEX_UPPER[(byte & 0xf) as usize] as char);
            }
        } else {
            output.push(byte as char);
        }
        i += 1;
    }
    output
}

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Percent-encode a single code point `c` into `buffer`, applying the
/// idempotency rule for a literal `%`. `next_two_are_hex` tells the
/// caller's lookahead into the *original* input immediately following
/// `c`: this is what the per-code-point path/fragment/userinfo encoders
/// use (unlike the query encoder, they escape one code point at a time
/// as the state machine's cursor advances, so the lookahead has to come
/// from the caller rather than from a byte buffer already in hand).
pub(crate) fn push_percent_encoded_char(buffer: &mut String, c: char, set: &PercentEncodeSet, next_two_are_hex: bool) {
    if c == '%' && set.contains(b'%') {
        if next_two_are_hex {
            buffer.push('%');
        } else {
            buffer.push_str("%25");
        }
        return;
    }
    let mut encoded = [0u8; 4];
    for &byte in c.encode_utf8(&mut encoded).as_bytes() {
        if set.contains(byte) {
            buffer.push('%');
            buffer.push(HEX_UPPER[(byte >> 4) as usize] as char);
            buffer.push(HEX_UPPER[(byte & 0xf) as usize] as char);
        } else {
            buffer.push(byte as char);
        }
    }
}
