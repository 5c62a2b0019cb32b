// Copyright 2013 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turning a [`Url`] record back into a string.
//!
//! Grounded on the serialization half of `examples/servo-rust-url/src/url.rs`
//! (`Url::to_string`/the `Display` impl it builds on `SchemeType`), adapted
//! to this crate's `canonicalize`/`exclude_fragment` switches, which the
//! teacher's own `Url` does not need since it always serializes in
//! canonical form.

use crate::host::Host;
use crate::url::{Path, Url};

/// How much of the input's original syntactic shape to preserve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Canonicalize {
    /// Drop every syntactic-shadow hint: no bare `:` for an empty password
    /// or elided port, no explicit default port, no `/.` path quirks beyond
    /// what correctness requires.
    Full,
    /// Preserve the shadow fields the parser recorded, reproducing the
    /// original delimiters exactly (subject to still being a valid URL).
    Preserve,
    /// Defer to the standard's own serialization algorithm, which is
    /// equivalent to [`Canonicalize::Preserve`] -- the standard always
    /// consults whatever shadow state the record carries.
    #[default]
    Standard,
}

/// Serialize `url` to a string.
///
/// `exclude_fragment` drops a trailing `#fragment` even if present (used by
/// callers that need a fragment-less form for comparison or storage).
/// `canonicalize` controls whether syntactic shadow information -- an
/// elided default port, an empty password's `:`, a lone path `/` -- is
/// reproduced; see [`Canonicalize`].
pub(crate) fn serialize(url: &Url, exclude_fragment: bool, canonicalize: Canonicalize) -> String {
    let preserve = !matches!(canonicalize, Canonicalize::Full);

    let mut output = String::with_capacity(32);
    output.push_str(&url.scheme);
    output.push(':');

    if !url.host.is_none() {
        output.push_str("//");
        push_userinfo(&mut output, url, preserve);
        push_host_and_port(&mut output, url, preserve);
    } else if is_ambiguous_authority_looking_path(url) {
        output.push_str("/.");
    }

    push_path(&mut output, url, preserve);

    if let Some(query) = &url.query {
        output.push('?');
        output.push_str(query);
    }

    if !exclude_fragment {
        if let Some(fragment) = &url.fragment {
            output.push('#');
            output.push_str(fragment);
        }
    }

    output
}

fn push_userinfo(output: &mut String, url: &Url, preserve: bool) {
    if url.username.is_empty() && url.password.is_empty() && !(preserve && url.shadow.password_token_seen)
    {
        return;
    }
    output.push_str(&url.username);
    if !url.password.is_empty() || (preserve && url.shadow.password_token_seen) {
        output.push(':');
        output.push_str(&url.password);
    }
    output.push('@');
}

fn push_host_and_port(output: &mut String, url: &Url, preserve: bool) {
    match &url.host {
        Host::None => {}
        host => {
            use std::fmt::Write as _;
            write!(output, "{host}").expect("writing to a String never fails");
        }
    }
    if let Some(port) = url.port {
        output.push(':');
        output.push_str(&port.to_string());
    } else if preserve {
        if url.shadow.default_port_seen {
            if let Some(port) = crate::infra::default_port(&url.scheme) {
                output.push(':');
                output.push_str(&port.to_string());
            }
        } else if url.shadow.port_token_seen {
            output.push(':');
        }
    }
}

/// `true` when the host is absent, the path is structured, and serializing
/// the path as-is would make its first (empty) segment followed by a
/// second segment read back as an authority on re-parse (a path like
/// `//evil.com` with no host would otherwise parse its `evil.com` as a
/// host). Inserting a lone `/.` segment first defuses that.
fn is_ambiguous_authority_looking_path(url: &Url) -> bool {
    if !url.host.is_none() {
        return false;
    }
    match &url.path {
        Path::Segments(segments) => segments.len() > 1 && segments[0].is_empty(),
        Path::Opaque(_) => false,
    }
}

fn push_path(output: &mut String, url: &Url, preserve: bool) {
    match &url.path {
        Path::Opaque(opaque) => output.push_str(opaque),
        Path::Segments(segments) => {
            if segments.is_empty() {
                if preserve && url.shadow.path_token_seen {
                    output.push('/');
                }
                return;
            }
            for segment in segments {
                output.push('/');
                output.push_str(segment);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn round_trip(input: &str) -> String {
        let url = parser::parse(input, None).unwrap_or_else(|e| panic!("{input:?}: {e}"));
        serialize(&url, false, Canonicalize::Standard)
    }

    #[test]
    fn simple_http_url_round_trips() {
        assert_eq!(round_trip("http://example.com/path?query#frag"), "http://example.com/path?query#frag");
    }

    #[test]
    fn default_port_is_elided_in_canonical_form() {
        let url = parser::parse("http://example.com:80/", None).unwrap();
        assert_eq!(serialize(&url, false, Canonicalize::Full), "http://example.com/");
    }

    #[test]
    fn default_port_is_restored_when_preserving_shadow() {
        let url = parser::parse("http://example.com:80/", None).unwrap();
        assert_eq!(
            serialize(&url, false, Canonicalize::Preserve),
            "http://example.com:80/"
        );
    }

    #[test]
    fn ipv6_host_round_trips_with_brackets() {
        assert_eq!(round_trip("http://[::1]:8080/"), "http://[::1]:8080/");
    }

    #[test]
    fn opaque_path_round_trips() {
        assert_eq!(round_trip("mailto:a@b.com"), "mailto:a@b.com");
    }

    #[test]
    fn exclude_fragment_drops_trailing_hash() {
        let url = parser::parse("http://example.com/#frag", None).unwrap();
        assert_eq!(serialize(&url, true, Canonicalize::Standard), "http://example.com/");
    }

    #[test]
    fn file_url_with_drive_letter_round_trips() {
        assert_eq!(round_trip("file:///C|/x"), "file:///C:/x");
    }
}
