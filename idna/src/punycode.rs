// Copyright 2013 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Punycode ([RFC 3492](http://tools.ietf.org/html/rfc3492)) implementation.
//!
//! Since Punycode fundamentally works on unicode code points,
//! `encode` and `decode` take and return slices and vectors of `char`.
//! `encode_str` and `decode_to_string` provide convenience wrappers
//! that convert from and to Rust's UTF-8 based `str` and `String` types.

use alloc::string::String;
use alloc::vec::Vec;
use core::char;
use core::fmt::Write;

// Bootstring parameters for Punycode
const BASE: u32 = 36;
const T_MIN: u32 = 1;
const T_MAX: u32 = 26;
const SKEW: u32 = 38;
const DAMP: u32 = 700;
const INITIAL_BIAS: u32 = 72;
const INITIAL_N: u32 = 0x80;

#[inline]
fn adapt(mut delta: u32, num_points: u32, first_time: bool) -> u32 {
    delta /= if first_time { DAMP } else { 2 };
    delta += delta / num_points;
    let mut k = 0;
    while delta > ((BASE - T_MIN) * T_MAX) / 2 {
        delta /= BASE - T_MIN;
        k += BASE;
    }
    k + (((BASE - T_MIN + 1) * delta) / (delta + SKEW))
}

/// Convert Punycode to a Unicode `String`.
///
/// Returns `None` on malformed input or overflow. Overflow can only happen
/// on inputs that would take more than 63 encoded bytes, the DNS limit on
/// domain name labels.
pub fn decode_to_string(input: &str) -> Option<String> {
    Some(decode(input)?.into_iter().collect())
}

/// Convert Punycode to a vector of `char`s.
///
/// Returns `None` on malformed input or overflow.
pub fn decode(input: &str) -> Option<Vec<char>> {
    let input = input.as_bytes();

    // Handle "basic" (ASCII) code points.
    // They are encoded as-is before the last delimiter, if any.
    let (base, input) = match input.iter().rposition(|&b| b == b'-') {
        Some(position) => (
            &input[..position],
            if position > 0 {
                &input[position + 1..]
            } else {
                input
            },
        ),
        None => (&input[..0], input),
    };

    if !base.is_ascii() {
        return None;
    }
    let mut output: Vec<char> = base.iter().map(|&b| b as char).collect();

    let base_len = output.len();
    let mut length = base_len as u32;
    let mut code_point = INITIAL_N;
    let mut bias = INITIAL_BIAS;
    let mut i = 0;
    let mut iter = input.iter();
    loop {
        let previous_i = i;
        let mut weight = 1;
        let mut k = BASE;
        let mut byte = match iter.next() {
            None => break,
            Some(byte) => *byte,
        };

        // Decode a generalized variable-length integer into delta,
        // which gets added to i.
        loop {
            let digit = digit_value(byte)?;
            if digit > (u32::MAX - i) / weight {
                return None; // Overflow
            }
            i += digit * weight;
            let t = if k <= bias {
                T_MIN
            } else if k >= bias + T_MAX {
                T_MAX
            } else {
                k - bias
            };
            if digit < t {
                break;
            }
            if weight > u32::MAX / (BASE - t) {
                return None; // Overflow
            }
            weight *= BASE - t;
            k += BASE;
            byte = match iter.next() {
                None => return None, // End of input before the end of this delta
                Some(byte) => *byte,
            };
        }

        bias = adapt(i - previous_i, length + 1, previous_i == 0);
        if i / (length + 1) > u32::MAX - code_point {
            return None; // Overflow
        }

        // i was supposed to wrap around from length+1 to 0,
        // incrementing code_point each time.
        code_point += i / (length + 1);
        i %= length + 1;
        let c = char::from_u32(code_point)?;

        output.insert(i as usize, c);
        length += 1;
        i += 1;
    }
    Some(output)
}

fn digit_value(byte: u8) -> Option<u32> {
    Some(match byte {
        b'0'..=b'9' => byte as u32 - b'0' as u32 + 26,
        b'A'..=b'Z' => byte as u32 - b'A' as u32,
        b'a'..=b'z' => byte as u32 - b'a' as u32,
        _ => return None,
    })
}

/// Convert a Unicode `str` to Punycode.
///
/// Returns `None` on overflow, which can only happen on inputs that would
/// take more than 63 encoded bytes, the DNS limit on domain name labels.
pub fn encode_str(input: &str) -> Option<String> {
    encode(&input.chars().collect::<Vec<char>>())
}

/// Convert Unicode to Punycode.
///
/// Returns `None` on overflow.
pub fn encode(input: &[char]) -> Option<String> {
    let mut buf = String::with_capacity(input.len());
    encode_into(input.iter().copied(), &mut buf).ok()?;
    Some(buf)
}

enum PunycodeEncodeError {
    Overflow,
    Sink,
}

impl From<core::fmt::Error> for PunycodeEncodeError {
    fn from(_: core::fmt::Error) -> Self {
        PunycodeEncodeError::Sink
    }
}

fn encode_into<I, W>(input: I, output: &mut W) -> Result<(), PunycodeEncodeError>
where
    I: Iterator<Item = char> + Clone,
    W: Write + ?Sized,
{
    // Handle "basic" (ASCII) code points. They are encoded as-is.
    let (mut input_length, mut basic_length) = (0u32, 0);
    for c in input.clone() {
        input_length = input_length
            .checked_add(1)
            .ok_or(PunycodeEncodeError::Overflow)?;
        if c.is_ascii() {
            output.write_char(c)?;
            basic_length += 1;
        }
    }

    if basic_length > 0 {
        output.write_char('-')?;
    }
    let mut code_point = INITIAL_N;
    let mut delta = 0;
    let mut bias = INITIAL_BIAS;
    let mut processed = basic_length;
    while processed < input_length {
        // All code points < code_point have been handled already.
        // Find the next larger one.
        let min_code_point = input
            .clone()
            .map(|c| c as u32)
            .filter(|&c| c >= code_point)
            .min()
            .unwrap();
        if min_code_point - code_point > (u32::MAX - delta) / (processed + 1) {
            return Err(PunycodeEncodeError::Overflow);
        }
        // Increase delta to advance the decoder's <code_point,i> state to <min_code_point,0>
        delta += (min_code_point - code_point) * (processed + 1);
        code_point = min_code_point;
        for c in input.clone() {
            let c = c as u32;
            if c < code_point {
                delta = delta.checked_add(1).ok_or(PunycodeEncodeError::Overflow)?;
            }
            if c == code_point {
                // Represent delta as a generalized variable-length integer:
                let mut q = delta;
                let mut k = BASE;
                loop {
                    let t = if k <= bias {
                        T_MIN
                    } else if k >= bias + T_MAX {
                        T_MAX
                    } else {
                        k - bias
                    };
                    if q < t {
                        break;
                    }
                    let value = t + ((q - t) % (BASE - t));
                    output.write_char(value_to_digit(value))?;
                    q = (q - t) / (BASE - t);
                    k += BASE;
                }
                output.write_char(value_to_digit(q))?;
                bias = adapt(delta, processed + 1, processed == basic_length);
                delta = 0;
                processed += 1;
            }
        }
        delta += 1;
        code_point += 1;
    }
    Ok(())
}

#[inline]
fn value_to_digit(value: u32) -> char {
    match value {
        0..=25 => (value as u8 + b'a') as char,
        26..=35 => (value as u8 - 26 + b'0') as char,
        _ => unreachable!("digit value out of range"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_ascii() {
        assert_eq!(encode_str("example").unwrap(), "example-");
        assert_eq!(decode_to_string("example-").unwrap(), "example");
    }

    #[test]
    fn roundtrip_non_ascii() {
        let encoded = encode_str("例え").unwrap();
        assert_eq!(encoded, "r8jz45g");
        assert_eq!(decode_to_string(&encoded).unwrap(), "例え");
    }

    #[test]
    fn decode_rejects_malformed_input() {
        assert!(decode_to_string("\u{FF}-").is_none());
    }
}
