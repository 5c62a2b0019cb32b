// Copyright 2013 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Named ASCII code-point predicates from the WHATWG Infra Standard that
//! the state machine and host parser both need.

#[inline]
pub(crate) fn is_ascii_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

#[inline]
pub(crate) fn is_ascii_alphanumeric(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

#[inline]
pub(crate) fn is_ascii_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

#[inline]
pub(crate) fn is_c0_control(c: char) -> bool {
    (c as u32) < 0x20
}

#[inline]
pub(crate) fn is_c0_control_or_space(c: char) -> bool {
    is_c0_control(c) || c == ' '
}

#[inline]
pub(crate) fn is_ascii_tab_or_newline(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
}

/// Code points forbidden in any host, special or not (WHATWG URL Standard
/// "forbidden host code point").
#[inline]
pub(crate) fn is_forbidden_host_code_point(c: char) -> bool {
    matches!(
        c,
        '\0' | '\t' | '\n' | '\r' | ' ' | '#' | '/' | ':' | '<' | '>' | '?' | '@' | '[' | '\\'
            | ']' | '^' | '|'
    )
}

/// Forbidden host code points, plus C0 controls, `%` and DEL -- the set
/// checked after IDNA `to_ascii` has run on a domain.
#[inline]
pub(crate) fn is_forbidden_domain_code_point(c: char) -> bool {
    is_forbidden_host_code_point(c) || is_c0_control(c) || c == '%' || c == '\u{7f}'
}

/// `true` if scheme is one of the six schemes the standard calls "special".
#[inline]
pub(crate) fn is_special_scheme(scheme: &str) -> bool {
    matches!(scheme, "ftp" | "file" | "http" | "https" | "ws" | "wss")
}

/// The default port for a special scheme, or `None` for `file` (and for
/// any non-special scheme, which has no concept of a default port).
#[inline]
pub(crate) fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "ftp" => Some(21),
        "http" | "ws" => Some(80),
        "https" | "wss" => Some(443),
        _ => None,
    }
}
