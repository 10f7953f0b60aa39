//! Faculty records and lookups over static faculty tables.
//!
//! # Design
//! Faculty tables are compiled-in constants, so a `Faculty` borrows only
//! `'static` strings and is `Copy`. Lookups are linear scans; a miss is a
//! normal outcome and is returned as `None`.

use std::fmt;

/// An academic sub-unit of an institution.
///
/// The numeric `id` is the record's identity and is what goes over the wire
/// as the `fakulta` parameter. The short codes are only used for lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Faculty {
    pub en_name: &'static str,
    pub cz_name: &'static str,
    pub en_short: &'static str,
    pub cz_short: &'static str,
    pub id: u32,
}

impl Faculty {
    pub const fn new(
        en_name: &'static str,
        cz_name: &'static str,
        en_short: &'static str,
        cz_short: &'static str,
        id: u32,
    ) -> Self {
        Self {
            en_name,
            cz_name,
            en_short,
            cz_short,
            id,
        }
    }
}

impl fmt::Display for Faculty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.en_name)
    }
}

/// Find the faculty whose English short code is `en_short`.
pub fn find_by_en_short<'a>(faculties: &'a [Faculty], en_short: &str) -> Option<&'a Faculty> {
    faculties.iter().find(|f| f.en_short == en_short)
}

/// Find the faculty whose Czech short code is `cz_short`.
pub fn find_by_cz_short<'a>(faculties: &'a [Faculty], cz_short: &str) -> Option<&'a Faculty> {
    faculties.iter().find(|f| f.cz_short == cz_short)
}

pub fn find_by_id(faculties: &[Faculty], id: u32) -> Option<&Faculty> {
    faculties.iter().find(|f| f.id == id)
}
