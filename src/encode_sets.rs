// Copyright 2013 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Named percent-encode sets: the WHATWG URL Standard's own sets, and the
//! looser RFC 2396 / RFC 3986 sets the safe-URL facade unions them with
//! (see [`crate::safe_url`]).

use percent_encoding::PercentEncodeSet;

const C0_CONTROLS: &[u8] = &[
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E,
    0x0F, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x1B, 0x1C, 0x1D,
    0x1E, 0x1F,
];

/// The C0 control percent-encode set: C0 controls and everything above
/// U+007E (every non-ASCII byte, via this crate's threshold mechanism).
pub(crate) const C0_CONTROL: PercentEncodeSet = PercentEncodeSet::empty(0x7E).add(C0_CONTROLS);

pub(crate) const FRAGMENT: PercentEncodeSet = C0_CONTROL.add(b" \"<>`");

pub(crate) const QUERY: PercentEncodeSet = C0_CONTROL.add(b" \"#<>");

pub(crate) const SPECIAL_QUERY: PercentEncodeSet = QUERY.add(b"'");

pub(crate) const PATH: PercentEncodeSet = QUERY.add(b"?`{}");

pub(crate) const USERINFO: PercentEncodeSet = PATH.add(b"/:;=@[\\]^|");

/// `component` in the standard: userinfo plus a few characters reserved
/// by `application/x-www-form-urlencoded` consumers. Used for literal
/// path/query/fragment components supplied programmatically rather than
/// parsed, which this crate does not otherwise expose, but which several
/// of the WHATWG-adjacent percent-encode-set tests exercise.
pub(crate) const COMPONENT: PercentEncodeSet = USERINFO.add(b"$%&+,");

/// RFC 3986 `pchar` (unreserved / sub-delims / `:` / `@`): everything a
/// path segment may contain unescaped.
const RFC3986_PCHAR: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~!$&'()*+,;=:@";

/// RFC 3986's path percent-encode set: everything outside `pchar`.
pub(crate) const RFC3986_PATH: PercentEncodeSet = PercentEncodeSet::excluding(0x7E, RFC3986_PCHAR);

/// RFC 3986's query/fragment percent-encode set: `pchar` plus `/` and `?`.
pub(crate) const RFC3986_QUERY_OR_FRAGMENT: PercentEncodeSet =
    PercentEncodeSet::excluding(
        0x7E,
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~!$&'()*+,;=:@/?",
    );

/// RFC 3986's userinfo percent-encode set: unreserved / sub-delims / `:`.
pub(crate) const RFC3986_USERINFO: PercentEncodeSet = PercentEncodeSet::excluding(
    0x7E,
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~!$&'()*+,;=:",
);

/// RFC 2396's percent-encode set (pre-3986, slightly looser `reserved`
/// and `mark` sets, and IPv6-literal brackets allowed unescaped per
/// RFC 2732): everything outside `unreserved | reserved`.
pub(crate) const RFC2396: PercentEncodeSet = PercentEncodeSet::excluding(
    0x7E,
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_.!~*'();/?:@&=+$,[]",
);

/// The "safest" set for a path: the union of the WHATWG path set with the
/// RFC 3986 and RFC 2396 path-shaped sets, per the safe-URL facade.
pub(crate) const SAFE_PATH: PercentEncodeSet = PATH.union(RFC3986_PATH).union(RFC2396);

pub(crate) const SAFE_QUERY: PercentEncodeSet =
    QUERY.union(RFC3986_QUERY_OR_FRAGMENT).union(RFC2396);

pub(crate) const SAFE_SPECIAL_QUERY: PercentEncodeSet =
    SPECIAL_QUERY.union(RFC3986_QUERY_OR_FRAGMENT).union(RFC2396);

pub(crate) const SAFE_FRAGMENT: PercentEncodeSet =
    FRAGMENT.union(RFC3986_QUERY_OR_FRAGMENT).union(RFC2396);

pub(crate) const SAFE_USERINFO: PercentEncodeSet =
    USERINFO.union(RFC3986_USERINFO).union(RFC2396);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c0_control_set_covers_controls_and_non_ascii() {
        assert!(C0_CONTROL.contains(0x00));
        assert!(C0_CONTROL.contains(0x1F));
        assert!(!C0_CONTROL.contains(b' '));
        assert!(C0_CONTROL.contains(0xFF));
    }

    #[test]
    fn path_set_extends_query_set() {
        assert!(PATH.contains(b'?'));
        assert!(PATH.contains(b'{'));
        assert!(!PATH.contains(b'a'));
    }

    #[test]
    fn userinfo_set_extends_path_set() {
        assert!(USERINFO.contains(b'@'));
        assert!(USERINFO.contains(b'?'));
        assert!(!USERINFO.contains(b'a'));
    }

    #[test]
    fn rfc3986_path_allows_pchar() {
        assert!(!RFC3986_PATH.contains(b'a'));
        assert!(!RFC3986_PATH.contains(b':'));
        assert!(!RFC3986_PATH.contains(b'~'));
        assert!(RFC3986_PATH.contains(b' '));
    }

    #[test]
    fn safe_path_is_a_superset_of_both_component_sets() {
        assert!(SAFE_PATH.contains(b'{'));
        assert!(SAFE_PATH.contains(b' '));
        assert!(!SAFE_PATH.contains(b'a'));
    }
}
