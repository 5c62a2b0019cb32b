// Copyright 2013 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `Url` record: the semantic fields the standard defines, plus a
//! small shadow of "as-written" hints that only matter when serializing
//! with `canonicalize=false`.
//!
//! Grounded on `examples/servo-rust-url/src/url.rs`'s field layout
//! (scheme / scheme_data / query / fragment, with scheme-relative data
//! split into username/password/host/port/path) for which fields belong
//! on the record versus get threaded through as parser-local state; the
//! actual types are this crate's own (a single `Path` enum rather than
//! the teacher's separate `RelativeSchemeData`/`OtherSchemeData` split,
//! since `is_special` alone already determines most of that distinction
//! here, and the two code paths converged once IDNA and IPv4 are real).

use crate::host::Host;
use crate::infra::{default_port, is_special_scheme};

/// A URL's path: either a list of already-percent-encoded segments (the
/// ordinary case), or a single opaque already-percent-encoded string
/// (produced when a non-special scheme's body doesn't start with `//`,
/// e.g. `mailto:a@b`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Path {
    Segments(Vec<String>),
    Opaque(String),
}

impl Path {
    pub(crate) fn is_opaque(&self) -> bool {
        matches!(self, Path::Opaque(_))
    }
}

/// Syntactic shadow fields: delimiters the input actually contained even
/// though the component that followed them turned out to be empty (or,
/// for the port, equal to the scheme's default). Consulted only when
/// serializing with `canonicalize = false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Shadow {
    pub(crate) password_token_seen: bool,
    pub(crate) port_token_seen: bool,
    pub(crate) default_port_seen: bool,
    pub(crate) path_token_seen: bool,
    pub(crate) query_token_seen: bool,
    pub(crate) fragment_token_seen: bool,
}

/// A parsed URL. Created by [`crate::parse_url`], immutable thereafter;
/// re-serialize with [`crate::serialize_url`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Url {
    pub(crate) scheme: String,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) host: Host,
    pub(crate) port: Option<u16>,
    pub(crate) path: Path,
    pub(crate) query: Option<String>,
    pub(crate) fragment: Option<String>,
    pub(crate) shadow: Shadow,
}

impl Url {
    pub(crate) fn new(scheme: String) -> Self {
        Url {
            scheme,
            username: String::new(),
            password: String::new(),
            host: Host::None,
            port: None,
            path: Path::Segments(Vec::new()),
            query: None,
            fragment: None,
            shadow: Shadow::default(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// `true` if `scheme` is one of the six schemes the standard calls
    /// "special" (`ftp`, `file`, `http`, `https`, `ws`, `wss`).
    pub fn is_special(&self) -> bool {
        is_special_scheme(&self.scheme)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    /// The port as written, or `None` if absent (including when it was
    /// elided because it equalled the scheme's default).
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// The port as written, falling back to the scheme's default port.
    pub fn port_or_default(&self) -> Option<u16> {
        self.port.or_else(|| default_port(&self.scheme))
    }

    pub fn has_opaque_path(&self) -> bool {
        self.path.is_opaque()
    }

    /// The path's segments, or `None` if the path is opaque.
    pub fn path_segments(&self) -> Option<impl Iterator<Item = &str>> {
        match &self.path {
            Path::Segments(segments) => Some(segments.iter().map(String::as_str)),
            Path::Opaque(_) => None,
        }
    }

    /// The path as an opaque string, or `None` if the path is structured.
    pub fn opaque_path(&self) -> Option<&str> {
        match &self.path {
            Path::Opaque(value) => Some(value),
            Path::Segments(_) => None,
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}
