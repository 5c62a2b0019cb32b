// Copyright 2013 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 or the MIT license,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The UTS #46 code point mapping table: loaded once per process from an
//! embedded data file and looked up by binary search.
//!
//! The table itself is compiled into the binary with `include_str!` (a
//! library cannot assume a writable, discoverable filesystem path for a
//! data file at runtime) and parsed into a sorted range table the first
//! time it is needed, behind a [`once_cell::race::OnceBox`] so concurrent
//! readers on different threads never race the one-time parse.

use alloc::vec::Vec;
use once_cell::race::OnceBox;

const MAPPING_TABLE_SOURCE: &str = include_str!("../data/mapping_table.txt");

/// The disposition UTS #46 assigns to a code point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Disallowed,
    DisallowedStd3Valid,
    DisallowedStd3Mapped,
    Ignored,
    Mapped,
    Deviation,
    Valid,
}

pub struct Entry {
    pub start: u32,
    pub end: u32,
    pub status: Status,
    pub mapping: Option<Vec<char>>,
}

static TABLE: OnceBox<Vec<Entry>> = OnceBox::new();

fn table() -> &'static Vec<Entry> {
    TABLE.get_or_init(|| alloc::boxed::Box::new(parse_table(MAPPING_TABLE_SOURCE)))
}

fn parse_table(source: &str) -> Vec<Entry> {
    let mut entries = Vec::new();
    for line in source.lines() {
        let line = match line.find('#') {
            Some(i) => &line[..i],
            None => line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(entry) = parse_line(line) {
            entries.push(entry);
        }
    }
    entries.sort_by_key(|e| e.start);
    entries
}

fn parse_line(line: &str) -> Option<Entry> {
    let mut fields = line.split(';').map(str::trim);
    let range = fields.next()?;
    let status = fields.next()?;
    let mapping_field = fields.next();

    let (start, end) = match range.split_once("..") {
        Some((a, b)) => (parse_hex(a)?, parse_hex(b)?),
        None => {
            let cp = parse_hex(range)?;
            (cp, cp)
        }
    };

    let status = match status {
        "disallowed" => Status::Disallowed,
        "disallowed_STD3_valid" => Status::DisallowedStd3Valid,
        "disallowed_STD3_mapped" => Status::DisallowedStd3Mapped,
        "ignored" => Status::Ignored,
        "mapped" => Status::Mapped,
        "deviation" => Status::Deviation,
        "valid" => Status::Valid,
        _ => return None,
    };

    let mapping = match mapping_field {
        Some(field) if !field.is_empty() => {
            let mut chars = Vec::new();
            for hex in field.split_whitespace() {
                chars.push(char::from_u32(parse_hex(hex)?)?);
            }
            Some(chars)
        }
        _ => None,
    };

    Some(Entry {
        start,
        end,
        status,
        mapping,
    })
}

fn parse_hex(s: &str) -> Option<u32> {
    u32::from_str_radix(s, 16).ok()
}

/// Look up the disposition of a code point. Code points with no entry in
/// the embedded table (see its header comment for why it is a curated
/// subset) default to `valid`, rather than failing, so domains using
/// scripts outside the curated set are still accepted unmodified.
pub fn lookup(cp: u32) -> (Status, Option<&'static [char]>) {
    let table = table();
    match table.binary_search_by(|e| {
        if cp < e.start {
            core::cmp::Ordering::Greater
        } else if cp > e.end {
            core::cmp::Ordering::Less
        } else {
            core::cmp::Ordering::Equal
        }
    }) {
        Ok(i) => (table[i].status, table[i].mapping.as_deref()),
        Err(_) => (Status::Valid, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_uppercase_is_mapped_to_lowercase() {
        let (status, mapping) = lookup('A' as u32);
        assert_eq!(status, Status::Mapped);
        assert_eq!(mapping, Some(&['a'][..]));
    }

    #[test]
    fn ascii_lowercase_is_valid() {
        let (status, mapping) = lookup('a' as u32);
        assert_eq!(status, Status::Valid);
        assert_eq!(mapping, None);
    }

    #[test]
    fn sharp_s_is_a_deviation_mapping_to_ss() {
        let (status, mapping) = lookup(0x00DF);
        assert_eq!(status, Status::Deviation);
        assert_eq!(mapping, Some(&['s', 's'][..]));
    }

    #[test]
    fn soft_hyphen_is_ignored() {
        let (status, _) = lookup(0x00AD);
        assert_eq!(status, Status::Ignored);
    }

    #[test]
    fn unclassified_code_point_defaults_to_valid() {
        // Not present in the curated table; must not be treated as an error.
        let (status, mapping) = lookup(0x1_0000 - 1);
        assert_eq!(status, Status::Valid);
        assert_eq!(mapping, None);
    }

    #[test]
    fn private_use_area_is_disallowed() {
        let (status, _) = lookup(0xE000);
        assert_eq!(status, Status::Disallowed);
    }
}
