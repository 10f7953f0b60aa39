//! Operation inputs for the notebook API.
//!
//! # Design
//! Every boolean defaults to `false`, so `Default` gives the plain form of
//! each request. The structs deserialize from JSON so test vectors can carry
//! them directly.

use serde::Deserialize;

/// Which students whose study is no longer running to include.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StudyFilter {
    pub ended_study: bool,
    pub inactive_study: bool,
}

/// Options for the course roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StudentFilter {
    /// Include students who are registered but not yet enrolled.
    pub registered: bool,
    pub ended_study: bool,
    pub inactive_study: bool,
}

/// Request payload for creating a notebook.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewNotebook {
    pub name: String,
    pub short_name: String,
    /// Students can see their own entry.
    #[serde(default)]
    pub visible: bool,
    /// Teachers may not fill the notebook in through the web interface.
    #[serde(default)]
    pub no_fill_in: bool,
    /// Students see statistics over all entries.
    #[serde(default)]
    pub statistics: bool,
}

impl NewNotebook {
    pub fn new(name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_name: short_name.into(),
            visible: false,
            no_fill_in: false,
            statistics: false,
        }
    }
}

/// Request payload for writing one student's notebook entry.
///
/// `last_edited` is the change stamp the caller last saw; when given, the
/// server refuses the write if the entry changed since.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotebookEntry {
    pub short_name: String,
    pub uco: u64,
    pub content: String,
    #[serde(default)]
    pub last_edited: Option<String>,
    #[serde(default)]
    pub overwrite: bool,
}

impl NotebookEntry {
    pub fn new(short_name: impl Into<String>, uco: u64, content: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            uco,
            content: content.into(),
            last_edited: None,
            overwrite: false,
        }
    }
}
