// Copyright 2013 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

//! IDNA (Internationalizing Domain Names in Applications) per
//! [UTS #46](http://www.unicode.org/reports/tr46/), with a
//! [Punycode](http://tools.ietf.org/html/rfc3492) codec.
//!
//! The two entry points most callers want are [`domain_to_ascii`] and
//! [`domain_to_unicode`], which apply UTS #46 with this crate's default
//! [`Config`]. [`Config`] exposes the individual processing flags (STD3
//! rules, transitional processing, the bidi/joiner/hyphen checks, DNS
//! length verification) for callers that need non-default behavior.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod mapping_table;
pub mod punycode;
mod uts46;

pub use uts46::{Config, Errors};

/// Convert a domain name to ASCII, as the WHATWG URL Standard's "domain to
/// ASCII" algorithm does, using this crate's default [`Config`].
#[cfg(feature = "alloc")]
pub fn domain_to_ascii(domain: &str) -> Result<alloc::string::String, Errors> {
    Config::default().to_ascii(domain)
}

/// Convert a domain name to ASCII with `use_std3_ascii_rules` set, as the
/// WHATWG URL Standard's "domain to ASCII" algorithm does when called in
/// "be strict" mode.
#[cfg(feature = "alloc")]
pub fn domain_to_ascii_strict(domain: &str) -> Result<alloc::string::String, Errors> {
    Config::default().use_std3_ascii_rules(true).to_ascii(domain)
}

/// Convert a domain name to Unicode, as the WHATWG URL Standard's "domain
/// to Unicode" algorithm does, using this crate's default [`Config`].
#[cfg(feature = "alloc")]
pub fn domain_to_unicode(domain: &str) -> (alloc::string::String, Result<(), Errors>) {
    Config::default().to_unicode(domain)
}
