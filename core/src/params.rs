//! Query parameter vocabulary and the ordered parameter builder.
//!
//! # Design
//! Two kinds of boolean options exist on the wire and must not be mixed up:
//! include flags (`zareg`, `vcukonc`, `vcneaktiv`) are sent as `a` only when
//! set and are otherwise absent, while yes/no markers (`nahlizi`,
//! `nedoplnovat`, `statistika`, `prepis`) are always sent, as `a` or `n`.
//! The remote side treats an absent marker differently from an explicit `n`.

use std::fmt;

/// Wire keys understood by the notebook API.
pub mod keys {
    pub const OPERATION: &str = "operace";
    pub const API_KEY: &str = "klic";
    pub const FACULTY: &str = "fakulta";
    pub const COURSE: &str = "kod";

    pub const REGISTERED: &str = "zareg";
    pub const ENDED_STUDY: &str = "vcukonc";
    pub const INACTIVE_STUDY: &str = "vcneaktiv";
    pub const SEMINAR: &str = "seminar";

    pub const NAME: &str = "jmeno";
    pub const SHORT_NAME: &str = "zkratka";
    pub const VISIBLE: &str = "nahlizi";
    pub const NO_FILL_IN: &str = "nedoplnovat";
    pub const STATISTICS: &str = "statistika";

    pub const UCO: &str = "uco";
    pub const CONTENT: &str = "obsah";
    pub const OVERWRITE: &str = "prepis";
    pub const LAST_EDITED: &str = "poslzmeneno";
}

pub const YES: &str = "a";
pub const NO: &str = "n";

/// The remote operation selected by the `operace` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CourseInfo,
    Students,
    SeminarStudents,
    SeminarTeachers,
    Notebooks,
    NewNotebook,
    NotebookContent,
    EditNotebook,
    ExamDates,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::CourseInfo,
        Operation::Students,
        Operation::SeminarStudents,
        Operation::SeminarTeachers,
        Operation::Notebooks,
        Operation::NewNotebook,
        Operation::NotebookContent,
        Operation::EditNotebook,
        Operation::ExamDates,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::CourseInfo => "predmet-info",
            Operation::Students => "predmet-seznam",
            Operation::SeminarStudents => "seminar-seznam",
            Operation::SeminarTeachers => "seminar-cvicici-seznam",
            Operation::Notebooks => "bloky-seznam",
            Operation::NewNotebook => "blok-novy",
            Operation::NotebookContent => "blok-dej-obsah",
            Operation::EditNotebook => "blok-pis-student-obsah",
            Operation::ExamDates => "terminy-seznam",
        }
    }

    pub fn from_wire(value: &str) -> Option<Operation> {
        Operation::ALL.into_iter().find(|op| op.as_str() == value)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a boolean to the explicit yes/no marker value.
pub fn marker(value: bool) -> &'static str {
    if value {
        YES
    } else {
        NO
    }
}

/// Ordered list of operation-specific parameters, starting with `operace`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new(operation: Operation) -> Self {
        Self {
            pairs: vec![(keys::OPERATION.to_string(), operation.as_str().to_string())],
        }
    }

    pub fn push(mut self, key: &str, value: impl Into<String>) -> Self {
        self.pairs.push((key.to_string(), value.into()));
        self
    }

    /// Emit `key=a` when `set`, nothing otherwise.
    pub fn flag(self, key: &str, set: bool) -> Self {
        if set {
            self.push(key, YES)
        } else {
            self
        }
    }

    /// Always emit `key`, as `a` or `n`.
    pub fn marker(self, key: &str, value: bool) -> Self {
        self.push(key, marker(value))
    }

    /// One `key=value` pair per item, in iteration order.
    pub fn repeat<V: ToString>(mut self, key: &str, values: impl IntoIterator<Item = V>) -> Self {
        self.pairs
            .extend(values.into_iter().map(|v| (key.to_string(), v.to_string())));
        self
    }

    pub fn optional(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Merge with the fixed context parameters; the context always wins.
    ///
    /// Operation pairs whose key is a context key are dropped, then the
    /// context pairs are appended, so each context key appears exactly once.
    pub fn overlay(self, context: &[(String, String)]) -> Vec<(String, String)> {
        let mut merged: Vec<(String, String)> = self
            .pairs
            .into_iter()
            .filter(|(key, _)| !context.iter().any(|(ctx, _)| ctx == key))
            .collect();
        merged.extend(context.iter().cloned());
        merged
    }
}
