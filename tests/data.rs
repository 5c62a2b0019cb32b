// Copyright 2013 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Data-driven tests against a JSON fixture, in the shape of (a curated
//! subset of) the web-platform-tests `url/urltestdata.json` suite, scoped
//! to this crate's own `parse_url`/`serialize_url` pair rather than the
//! full upstream test vector set.

use serde_json::Value;
use weburl::{parse_url, serialize_url};

struct Expected {
    scheme: String,
    username: String,
    password: String,
    host: Option<String>,
    port: String,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

fn take_string(entry: &mut Value, key: &str) -> String {
    entry
        .as_object_mut()
        .unwrap()
        .remove(key)
        .and_then(|v| v.as_str().map(str::to_owned))
        .unwrap_or_default()
}

fn take_opt_string(entry: &mut Value, key: &str) -> Option<String> {
    match entry.as_object_mut().unwrap().remove(key) {
        Some(Value::Null) | None => None,
        Some(v) => Some(v.as_str().unwrap().to_owned()),
    }
}

#[test]
fn urltestdata() {
    let mut json: Value =
        serde_json::from_str(include_str!("urltestdata.json")).expect("JSON parse error");
    let mut failures = Vec::new();

    for entry in json.as_array_mut().unwrap() {
        if entry.is_string() {
            continue; // a leading comment entry, same convention as upstream
        }
        let base = take_string(entry, "base");
        let input = take_string(entry, "input");
        let is_failure = entry
            .as_object_mut()
            .unwrap()
            .remove("failure")
            .is_some();

        let expected = if is_failure {
            None
        } else {
            Some(Expected {
                scheme: take_string(entry, "scheme"),
                username: take_string(entry, "username"),
                password: take_string(entry, "password"),
                host: take_opt_string(entry, "host"),
                port: take_string(entry, "port"),
                path: take_string(entry, "path"),
                query: take_opt_string(entry, "query"),
                fragment: take_opt_string(entry, "fragment"),
            })
        };

        let result = parse_url(&input, Some(&base), None);
        match (result, expected) {
            (Err(_), None) => {}
            (Ok(url), None) => {
                failures.push(format!("{input:?}: expected a parse failure, got {url:?}"));
            }
            (Err(e), Some(_)) => {
                failures.push(format!("{input:?}: expected success, got error: {e}"));
            }
            (Ok(url), Some(expected)) => {
                let host = match url.host() {
                    weburl::Host::None => None,
                    host => Some(host.to_string()),
                };
                let port = url.port().map(|p| p.to_string()).unwrap_or_default();
                let path = match url.path_segments() {
                    Some(segments) => segments.collect::<Vec<_>>().join("/"),
                    None => url.opaque_path().unwrap_or_default().to_owned(),
                };

                let mut mismatches = Vec::new();
                if url.scheme() != expected.scheme {
                    mismatches.push(format!("scheme: {:?} != {:?}", url.scheme(), expected.scheme));
                }
                if url.username() != expected.username {
                    mismatches.push(format!("username: {:?} != {:?}", url.username(), expected.username));
                }
                if url.password() != expected.password {
                    mismatches.push(format!("password: {:?} != {:?}", url.password(), expected.password));
                }
                if host != expected.host {
                    mismatches.push(format!("host: {host:?} != {:?}", expected.host));
                }
                if port != expected.port {
                    mismatches.push(format!("port: {port:?} != {:?}", expected.port));
                }
                if path != expected.path {
                    mismatches.push(format!("path: {path:?} != {:?}", expected.path));
                }
                if url.query() != expected.query.as_deref() {
                    mismatches.push(format!("query: {:?} != {:?}", url.query(), expected.query));
                }
                if url.fragment() != expected.fragment.as_deref() {
                    mismatches.push(format!("fragment: {:?} != {:?}", url.fragment(), expected.fragment));
                }

                // Round trip: re-parsing the canonical serialization must
                // produce byte-identical output (§8 "round trip" invariant).
                let serialized = serialize_url(&url, None, None);
                let reparsed = parse_url(&serialized, None, None)
                    .unwrap_or_else(|e| panic!("{input:?}: canonical form {serialized:?} failed to reparse: {e}"));
                let reserialized = serialize_url(&reparsed, None, None);
                if serialized != reserialized {
                    mismatches.push(format!(
                        "round trip: {serialized:?} != {reserialized:?} after reparsing"
                    ));
                }

                if !mismatches.is_empty() {
                    failures.push(format!("{input:?}: {}", mismatches.join(", ")));
                }
            }
        }
    }

    assert!(failures.is_empty(), "{} failures:\n{}", failures.len(), failures.join("\n"));
}
