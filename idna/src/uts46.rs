// Copyright 2013 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The UTS #46 processing algorithm: mapping, normalization, label
//! validation and Punycode (de)encoding, driving [`crate::domain_to_ascii`]
//! and [`crate::domain_to_unicode`].

use crate::mapping_table::{self, Status};
use crate::punycode;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use unicode_normalization::UnicodeNormalization;

const ACE_PREFIX: &str = "xn--";

/// Processing flags, set by the [`Config`] builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    use_std3_ascii_rules: bool,
    transitional_processing: bool,
    verify_dns_length: bool,
    check_hyphens: bool,
    check_bidi: bool,
    check_joiners: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            use_std3_ascii_rules: false,
            transitional_processing: false,
            verify_dns_length: false,
            check_hyphens: false,
            check_bidi: true,
            check_joiners: true,
        }
    }
}

impl Config {
    pub const fn new() -> Self {
        Config {
            use_std3_ascii_rules: false,
            transitional_processing: false,
            verify_dns_length: false,
            check_hyphens: false,
            check_bidi: true,
            check_joiners: true,
        }
    }

    pub const fn use_std3_ascii_rules(mut self, value: bool) -> Self {
        self.use_std3_ascii_rules = value;
        self
    }

    pub const fn transitional_processing(mut self, value: bool) -> Self {
        self.transitional_processing = value;
        self
    }

    pub const fn verify_dns_length(mut self, value: bool) -> Self {
        self.verify_dns_length = value;
        self
    }

    pub const fn check_hyphens(mut self, value: bool) -> Self {
        self.check_hyphens = value;
        self
    }

    pub const fn check_bidi(mut self, value: bool) -> Self {
        self.check_bidi = value;
        self
    }

    pub const fn check_joiners(mut self, value: bool) -> Self {
        self.check_joiners = value;
        self
    }

    pub fn to_ascii(&self, domain: &str) -> Result<String, Errors> {
        let mut errors = Errors::default();
        let mapped = map_and_normalize(domain, *self, &mut errors);
        let is_bidi_domain = self.check_bidi && domain_has_bidi_label(&mapped);
        let mut result = String::with_capacity(mapped.len());
        let mut first = true;
        for label in mapped.split('.') {
            if !first {
                result.push('.');
            }
            first = false;
            result.push_str(&label_to_ascii(label, *self, is_bidi_domain, &mut errors));
        }
        if self.verify_dns_length {
            verify_dns_length(&result, &mut errors);
        }
        if errors.is_empty() {
            Ok(result)
        } else {
            Err(errors)
        }
    }

    pub fn to_unicode(&self, domain: &str) -> (String, Result<(), Errors>) {
        let mut errors = Errors::default();
        let mapped = map_and_normalize(domain, *self, &mut errors);
        let is_bidi_domain = self.check_bidi && domain_has_bidi_label(&mapped);
        let mut result = String::with_capacity(mapped.len());
        let mut first = true;
        for label in mapped.split('.') {
            if !first {
                result.push('.');
            }
            first = false;
            result.push_str(&label_to_unicode(label, *self, is_bidi_domain, &mut errors));
        }
        if errors.is_empty() {
            (result, Ok(()))
        } else {
            (result, Err(errors))
        }
    }
}

/// Whether any label of `mapped` (after mapping/normalization, before
/// Punycode encoding) would classify the domain as a "Bidi domain name"
/// per RFC 5893 section 1.4: it contains at least one code point of
/// bidi class R, AL or AN. `xn--` labels are decoded first so a
/// previously-encoded RTL label is still detected.
fn domain_has_bidi_label(mapped: &str) -> bool {
    mapped.split('.').any(|label| match label.strip_prefix(ACE_PREFIX) {
        Some(suffix) => punycode::decode_to_string(suffix)
            .map(|decoded| label_has_bidi_class(&decoded))
            .unwrap_or(false),
        None => label_has_bidi_class(label),
    })
}

fn label_has_bidi_class(label: &str) -> bool {
    use unicode_bidi::BidiClass;
    label
        .chars()
        .any(|c| matches!(unicode_bidi::bidi_class(c), BidiClass::R | BidiClass::AL | BidiClass::AN))
}

/// The set of validation failures accumulated while processing a domain.
///
/// Mirrors the shape of the upstream `idna` crate's error type: rather
/// than stopping at the first problem, every label is processed and every
/// failure kind encountered is recorded, so a caller can report all of
/// them at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Errors {
    pub punycode: bool,
    pub disallowed_character: bool,
    pub too_long: bool,
    pub too_short: bool,
    pub check_hyphens: bool,
    pub check_bidi: bool,
    pub check_joiners: bool,
    pub empty_label: bool,
}

impl Errors {
    fn is_empty(&self) -> bool {
        *self == Errors::default()
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IDNA errors:")?;
        if self.punycode {
            write!(f, " punycode")?;
        }
        if self.disallowed_character {
            write!(f, " disallowed_character")?;
        }
        if self.too_long {
            write!(f, " too_long")?;
        }
        if self.too_short {
            write!(f, " too_short")?;
        }
        if self.check_hyphens {
            write!(f, " check_hyphens")?;
        }
        if self.check_bidi {
            write!(f, " check_bidi")?;
        }
        if self.check_joiners {
            write!(f, " check_joiners")?;
        }
        if self.empty_label {
            write!(f, " empty_label")?;
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Errors {}

fn map_and_normalize(domain: &str, config: Config, errors: &mut Errors) -> String {
    let mut mapped = String::with_capacity(domain.len());
    for c in domain.chars() {
        let (status, mapping) = mapping_table::lookup(c as u32);
        match status {
            Status::Disallowed => errors.disallowed_character = true,
            Status::Ignored => {}
            Status::Mapped => push_mapping(&mut mapped, c, mapping),
            Status::DisallowedStd3Valid => {
                if config.use_std3_ascii_rules {
                    errors.disallowed_character = true;
                } else {
                    mapped.push(c);
                }
            }
            Status::DisallowedStd3Mapped => {
                if config.use_std3_ascii_rules {
                    errors.disallowed_character = true;
                } else {
                    push_mapping(&mut mapped, c, mapping);
                }
            }
            Status::Deviation => {
                if config.transitional_processing {
                    push_mapping(&mut mapped, c, mapping);
                } else {
                    mapped.push(c);
                }
            }
            Status::Valid => mapped.push(c),
        }
    }
    mapped.nfc().collect()
}

fn push_mapping(output: &mut String, original: char, mapping: Option<&[char]>) {
    match mapping {
        Some(chars) => output.extend(chars.iter()),
        None => output.push(original),
    }
}

fn label_to_ascii(label: &str, config: Config, is_bidi_domain: bool, errors: &mut Errors) -> String {
    if label.is_empty() {
        return String::new();
    }
    if let Some(suffix) = label.strip_prefix(ACE_PREFIX) {
        match punycode::decode_to_string(suffix) {
            Some(decoded) => {
                validate_label(&decoded, config, is_bidi_domain, errors);
                return label.into();
            }
            None => {
                errors.punycode = true;
                return label.into();
            }
        }
    }
    if label.is_ascii() {
        validate_ascii_label(label, config, errors);
        return label.into();
    }
    validate_label(label, config, is_bidi_domain, errors);
    match punycode::encode_str(label) {
        Some(encoded) => {
            let mut ace = String::with_capacity(ACE_PREFIX.len() + encoded.len());
            ace.push_str(ACE_PREFIX);
            ace.push_str(&encoded);
            ace
        }
        None => {
            errors.punycode = true;
            label.into()
        }
    }
}

fn label_to_unicode(label: &str, config: Config, is_bidi_domain: bool, errors: &mut Errors) -> String {
    if label.is_empty() {
        return String::new();
    }
    if let Some(suffix) = label.strip_prefix(ACE_PREFIX) {
        return match punycode::decode_to_string(suffix) {
            Some(decoded) => {
                validate_label(&decoded, config, is_bidi_domain, errors);
                decoded
            }
            None => {
                errors.punycode = true;
                label.into()
            }
        };
    }
    if !label.is_ascii() {
        validate_label(label, config, is_bidi_domain, errors);
    } else {
        validate_ascii_label(label, config, errors);
    }
    label.into()
}

fn validate_ascii_label(label: &str, config: Config, errors: &mut Errors) {
    if config.check_hyphens {
        check_hyphens(label, errors);
    }
    for b in label.bytes() {
        let (status, _) = mapping_table::lookup(b as u32);
        if status == Status::Disallowed
            || (config.use_std3_ascii_rules && status == Status::DisallowedStd3Valid)
        {
            errors.disallowed_character = true;
        }
    }
}

fn validate_label(label: &str, config: Config, is_bidi_domain: bool, errors: &mut Errors) {
    if label.is_empty() {
        errors.empty_label = true;
        return;
    }
    if config.check_hyphens {
        check_hyphens(label, errors);
    }
    for c in label.chars() {
        let (status, _) = mapping_table::lookup(c as u32);
        match status {
            Status::Valid | Status::Deviation => {}
            Status::DisallowedStd3Valid if !config.use_std3_ascii_rules => {}
            _ => errors.disallowed_character = true,
        }
    }
    if config.check_joiners {
        check_contextj(label, errors);
    }
    // The bidi rule only applies to "Bidi domain names" (RFC 5893 section
    // 1.4): a domain with at least one RTL label. `is_bidi_domain` is
    // computed once for the whole domain before any label is validated, so
    // a label with no RTL characters of its own doesn't fail spuriously
    // just because `check_bidi` is enabled.
    if is_bidi_domain {
        check_bidi(label, errors);
    }
}

fn check_hyphens(label: &str, errors: &mut Errors) {
    let bytes = label.as_bytes();
    if bytes.first() == Some(&b'-') || bytes.last() == Some(&b'-') {
        errors.check_hyphens = true;
    }
    if bytes.len() >= 4 && bytes[2] == b'-' && bytes[3] == b'-' && !label.starts_with(ACE_PREFIX) {
        errors.check_hyphens = true;
    }
}

/// Code points with the Unicode `Virama` combining class, used by the
/// CONTEXTJ rule below. This is a representative subset of the scripts
/// that use a virama/halant-like combiner, not the exhaustive Unicode
/// `Canonical_Combining_Class=Virama` derivation -- see SPEC_FULL.md.
const VIRAMA: &[u32] = &[
    0x094D, 0x09CD, 0x0A4D, 0x0ACD, 0x0B4D, 0x0BCD, 0x0C4D, 0x0CCD, 0x0D4D, 0x0DCA, 0x0E3A, 0x0F84,
    0x1039, 0x17D2,
];

fn is_virama(c: char) -> bool {
    VIRAMA.contains(&(c as u32))
}

/// RFC 5892 Appendix A rules for the two join-control code points
/// permitted in IDNA labels, ZWNJ (U+200C) and ZWJ (U+200D). The full
/// rule allows ZWNJ between code points of `Joining_Type` `{L,D}` and
/// `{R,D}` with only transparent `T` joiners between; we approximate
/// that with the simpler, always-sufficient "preceded by Virama" case
/// and otherwise reject the joiner, which only rejects this rule's less
/// common clause rather than accepting invalid labels -- see
/// SPEC_FULL.md section 4.3.1.
fn check_contextj(label: &str, errors: &mut Errors) {
    let chars: Vec<char> = label.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if c as u32 == 0x200C || c as u32 == 0x200D {
            let preceded_by_virama = i > 0 && is_virama(chars[i - 1]);
            if !preceded_by_virama {
                errors.check_joiners = true;
            }
        }
    }
}

/// RFC 5893 bidi rule, implemented against `unicode_bidi`'s per-character
/// class classification rather than a full bidi algorithm run (IDNA only
/// needs the per-label directional-consistency check, not line breaking
/// or reordering).
fn check_bidi(label: &str, errors: &mut Errors) {
    use unicode_bidi::BidiClass;

    let classes: Vec<BidiClass> = label.chars().map(unicode_bidi::bidi_class).collect();
    let first = match classes.first() {
        Some(c) => *c,
        None => return,
    };

    let rtl = match first {
        BidiClass::R | BidiClass::AL => true,
        BidiClass::L => false,
        _ => {
            errors.check_bidi = true;
            return;
        }
    };

    let last_significant = classes
        .iter()
        .rev()
        .find(|c| **c != BidiClass::NSM)
        .copied();

    if rtl {
        let mut seen_en = false;
        let mut seen_an = false;
        for class in &classes {
            match class {
                BidiClass::R
                | BidiClass::AL
                | BidiClass::AN
                | BidiClass::EN
                | BidiClass::ES
                | BidiClass::CS
                | BidiClass::ET
                | BidiClass::ON
                | BidiClass::BN
                | BidiClass::NSM => {}
                _ => errors.check_bidi = true,
            }
            if *class == BidiClass::EN {
                seen_en = true;
            }
            if *class == BidiClass::AN {
                seen_an = true;
            }
        }
        if seen_en && seen_an {
            errors.check_bidi = true;
        }
        match last_significant {
            Some(BidiClass::R) | Some(BidiClass::AL) | Some(BidiClass::EN) | Some(BidiClass::AN) => {}
            _ => errors.check_bidi = true,
        }
    } else {
        for class in &classes {
            match class {
                BidiClass::L
                | BidiClass::EN
                | BidiClass::ES
                | BidiClass::CS
                | BidiClass::ET
                | BidiClass::ON
                | BidiClass::BN
                | BidiClass::NSM => {}
                _ => errors.check_bidi = true,
            }
        }
        match last_significant {
            Some(BidiClass::L) | Some(BidiClass::EN) => {}
            _ => errors.check_bidi = true,
        }
    }
}

fn verify_dns_length(domain: &str, errors: &mut Errors) {
    if domain.is_empty() {
        errors.too_short = true;
        return;
    }
    let trimmed = domain.strip_suffix('.').unwrap_or(domain);
    if trimmed.len() > 253 {
        errors.too_long = true;
    }
    for label in trimmed.split('.') {
        if label.is_empty() {
            errors.empty_label = true;
        } else if label.len() > 63 {
            errors.too_long = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_domain_is_unchanged() {
        let config = Config::default();
        assert_eq!(config.to_ascii("example.com").unwrap(), "example.com");
    }

    #[test]
    fn uppercase_ascii_is_lowercased() {
        let config = Config::default();
        assert_eq!(config.to_ascii("EXAMPLE.COM").unwrap(), "example.com");
    }

    #[test]
    fn unicode_label_is_punycode_encoded() {
        let config = Config::default();
        assert_eq!(
            config.to_ascii("\u{4f8b}\u{3048}.\u{30c6}\u{30b9}\u{30c8}").unwrap(),
            "xn--r8jz45g.xn--zckzah"
        );
    }

    #[test]
    fn ace_label_round_trips_to_unicode() {
        let config = Config::default();
        let (unicode, result) = config.to_unicode("xn--r8jz45g.xn--zckzah");
        assert!(result.is_ok());
        assert_eq!(unicode, "\u{4f8b}\u{3048}.\u{30c6}\u{30b9}\u{30c8}");
    }

    #[test]
    fn malformed_punycode_label_is_an_error() {
        let config = Config::default();
        assert!(config.to_ascii("xn--").is_err());
    }

    #[test]
    fn leading_hyphen_is_allowed_by_default() {
        // Non-strict processing (the default, matching
        // url.spec.whatwg.org/#idna) does not check hyphen placement.
        let config = Config::default();
        assert!(config.to_ascii("-abc.com").is_ok());
    }

    #[test]
    fn leading_hyphen_is_rejected_with_check_hyphens() {
        let config = Config::default().check_hyphens(true);
        assert!(config.to_ascii("-abc.com").is_err());
    }

    #[test]
    fn long_label_is_allowed_by_default() {
        let config = Config::default();
        let label: String = core::iter::repeat('a').take(64).collect();
        assert!(config.to_ascii(&label).is_ok());
    }

    #[test]
    fn label_too_long_is_rejected_with_verify_dns_length() {
        let config = Config::default().verify_dns_length(true);
        let label: String = core::iter::repeat('a').take(64).collect();
        assert!(config.to_ascii(&label).unwrap_err().too_long);
    }

    #[test]
    fn disallowed_character_is_rejected() {
        let config = Config::default();
        assert!(config
            .to_ascii("exa\u{007F}mple.com")
            .unwrap_err()
            .disallowed_character);
    }

    #[test]
    fn non_bidi_domain_is_unaffected_by_check_bidi() {
        // A domain with no RTL (R/AL/AN) code point anywhere is not a
        // "Bidi domain name" (RFC 5893 section 1.4), so `check_bidi`
        // doesn't run against it even though this label is non-ASCII.
        let config = Config::default();
        assert_eq!(
            config.to_ascii("\u{4f8b}\u{3048}.com").unwrap(),
            "xn--r8jz45g.com"
        );
    }

    #[test]
    fn bidi_domain_with_mixed_direction_label_is_rejected() {
        // Once any label makes the domain a Bidi domain name, every label
        // (including a plain ASCII one) is checked. A numeral-only ASCII
        // label following an RTL label still passes, but an RTL label
        // itself must obey the RTL label rule (AN and EN can't mix).
        let config = Config::default();
        assert!(config.to_ascii("\u{0627}\u{0660}\u{0031}.com").is_err());
    }
}
