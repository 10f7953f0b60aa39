//! Institutions exposing the notebook API.
//!
//! # Design
//! An institution is a capability set: an API URL plus a faculty table.
//! New institutions are added as new `Institution` implementations; the
//! lookup methods are provided once on the trait.

use crate::faculty::{self, Faculty};

/// An organization that serves the notebook API.
pub trait Institution {
    /// Absolute URL every request is sent to.
    fn api_url(&self) -> &str;

    fn faculties(&self) -> &[Faculty];

    fn faculty_by_en_short(&self, en_short: &str) -> Option<&Faculty> {
        faculty::find_by_en_short(self.faculties(), en_short)
    }

    fn faculty_by_cz_short(&self, cz_short: &str) -> Option<&Faculty> {
        faculty::find_by_cz_short(self.faculties(), cz_short)
    }

    fn faculty_by_id(&self, id: u32) -> Option<&Faculty> {
        faculty::find_by_id(self.faculties(), id)
    }
}

pub const MUNI_API_URL: &str = "https://is.muni.cz/export/pb_blok_api";

pub static MUNI_FACULTIES: [Faculty; 9] = [
    Faculty::new("Faculty of Medicine", "Lékařská fakulta", "medicine", "LF", 1411),
    Faculty::new("Faculty of Pharmacy", "Farmaceutická fakulta", "pharmacy", "FaF", 1416),
    Faculty::new("Faculty of Arts", "Filozofická fakulta", "arts", "FF", 1421),
    Faculty::new("Faculty of Social Studies", "Fakulta sociálních studií", "social", "FSS", 1423),
    Faculty::new("Faculty of Science", "Přírodovědecká fakulta", "science", "PřF", 1431),
    Faculty::new("Faculty of Informatics", "Fakulta informatiky", "informatics", "FI", 1433),
    Faculty::new("Faculty of Education", "Pedagogická fakulta", "education", "PdF", 1441),
    Faculty::new("Faculty of Sports Studies", "Fakulta sportovních studií", "sports", "FSpS", 1451),
    Faculty::new(
        "Faculty of Economics and Administration",
        "Ekonomicko-správní fakulta",
        "economics",
        "ESF",
        1456,
    ),
];

/// Masaryk University, Brno.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MasarykUniversity;

impl Institution for MasarykUniversity {
    fn api_url(&self) -> &str {
        MUNI_API_URL
    }

    fn faculties(&self) -> &[Faculty] {
        &MUNI_FACULTIES
    }
}
