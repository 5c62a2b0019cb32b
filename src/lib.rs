// Copyright 2013 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A WHATWG URL Standard parser, serializer, and safe-URL sanitiser.
//!
//! ```
//! let url = weburl::parse_url("https://example.com/a/b?c#d", None, None).unwrap();
//! assert_eq!(url.host(), &weburl::Host::Domain("example.com".into()));
//! assert_eq!(weburl::serialize_url(&url, None, None), "https://example.com/a/b?c#d");
//! ```
//!
//! Domain names are converted to their ASCII form via [UTS #46][idna]
//! (IDNA), and every component is percent-encoded per the encode set the
//! standard assigns it. [`safe_url`] composes the same parser with a
//! looser, RFC-2396/3986-unioned set of encode sets, for sanitising
//! URL-shaped strings that did not necessarily come from a conforming
//! producer.
//!
//! [idna]: https://www.unicode.org/reports/tr46/

mod encode_sets;
mod encoding;
mod error;
mod host;
mod infra;
mod parser;
mod safe_url;
mod serializer;
mod url;

pub use crate::error::{ParseError, ParseResult};
pub use crate::host::Host;
pub use crate::safe_url::safe_url;
pub use crate::serializer::Canonicalize;
pub use crate::url::{Path, Url};

use crate::encoding::QueryEncoding;
use crate::parser::EncodeSets;

/// Parse `input` as a URL, resolving it against `base` if given.
///
/// `encoding` is a WHATWG encoding label (e.g. `"shift-jis"`) applied to
/// the query component; `None` means UTF-8, the common case. An
/// unrecognised label is an error, as is a missing scheme with no base to
/// resolve against, or any other hard syntax failure the standard defines.
pub fn parse_url(input: &str, base: Option<&str>, encoding: Option<&str>) -> ParseResult<Url> {
    let base_url = base.map(|b| parser::parse(b, None)).transpose()?;
    let query_encoding = match encoding {
        Some(label) => QueryEncoding::for_label(label)?,
        None => QueryEncoding::UTF8,
    };
    parser::parse_with(input, base_url.as_ref(), query_encoding, EncodeSets::STANDARD)
}

/// Serialize `url` back to a string.
///
/// `exclude_fragment` (default `false`) drops a trailing `#fragment` even
/// if present. `canonicalize` selects how much of the original syntactic
/// shape to preserve; see [`Canonicalize`]. `None` defers to the
/// standard's own serialization algorithm ([`Canonicalize::Standard`]).
pub fn serialize_url(url: &Url, exclude_fragment: Option<bool>, canonicalize: Option<bool>) -> String {
    let canonicalize = match canonicalize {
        Some(true) => Canonicalize::Full,
        Some(false) => Canonicalize::Preserve,
        None => Canonicalize::Standard,
    };
    serializer::serialize(url, exclude_fragment.unwrap_or(false), canonicalize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_serialize_round_trip() {
        let url = parse_url("https://example.com/a/b?c#d", None, None).unwrap();
        assert_eq!(serialize_url(&url, None, None), "https://example.com/a/b?c#d");
    }

    #[test]
    fn parse_resolves_relative_against_base() {
        let url = parse_url("../c", Some("http://example.com/a/b"), None).unwrap();
        assert_eq!(serialize_url(&url, None, None), "http://example.com/c");
    }

    #[test]
    fn file_url_drive_letter_round_trips() {
        let url = parse_url("file:///C|/x", None, None).unwrap();
        assert_eq!(serialize_url(&url, None, None), "file:///C:/x");
    }

    #[test]
    fn ipv6_host_round_trips() {
        let url = parse_url("http://[::1]:8080/", None, None).unwrap();
        assert_eq!(url.host(), &Host::Ipv6([0, 0, 0, 0, 0, 0, 0, 1]));
        assert_eq!(serialize_url(&url, None, None), "http://[::1]:8080/");
    }

    #[test]
    fn excluding_fragment_on_serialize() {
        let url = parse_url("http://example.com/#frag", None, None).unwrap();
        assert_eq!(serialize_url(&url, Some(true), None), "http://example.com/");
    }

    #[test]
    fn unknown_query_encoding_label_is_rejected() {
        assert!(parse_url("http://example.com/?q", None, Some("not-a-real-encoding")).is_err());
    }

    #[test]
    fn safe_url_is_reexported_at_the_crate_root() {
        assert_eq!(
            crate::safe_url("http://example.com/a%2Fb?x=%26", "utf-8").unwrap(),
            "http://example.com/a%2Fb?x=%26"
        );
    }
}
