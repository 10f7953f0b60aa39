//! Client for the Masaryk University IS notebook API.
//!
//! # Overview
//! Queries course rosters, seminar groups, notebooks ("poznámkové bloky")
//! and exam dates, and creates and edits notebook entries. Every operation
//! is one GET to the institution's export endpoint with a flat set of query
//! parameters; the XML reply is handed back as a parsed element tree.
//!
//! # Design
//! - `IsClient` is stateless beyond its fixed context (institution,
//!   faculty, course, API key).
//! - Each operation has a pure `build_*` form returning an `HttpRequest`, so
//!   the wire parameters can be inspected or sent by the host.
//! - Network I/O sits behind the `Transport` trait; `UreqTransport` is the
//!   blocking default.
//! - Responses are not interpreted: status codes and the API's own error
//!   documents reach the caller inside `ApiResponse`.
//!
//! ```no_run
//! use is_notebooks::{Institution, IsClient, MasarykUniversity, NewNotebook};
//!
//! # fn main() -> Result<(), is_notebooks::ApiError> {
//! let muni = MasarykUniversity;
//! let fi = *muni.faculty_by_cz_short("FI").unwrap();
//! let client = IsClient::new(muni, fi, "PB071", "api-key");
//! client.new_notebook(&NewNotebook::new("Homework 1", "hw1"))?;
//! let notebooks = client.notebooks()?;
//! println!("{}", notebooks.text());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod faculty;
pub mod http;
pub mod institution;
pub mod params;
pub mod response;
pub mod transport;
pub mod types;

pub use client::IsClient;
pub use error::ApiError;
pub use faculty::Faculty;
pub use http::{HttpRequest, HttpResponse};
pub use institution::{Institution, MasarykUniversity};
pub use params::Operation;
pub use response::ApiResponse;
pub use transport::{Transport, UreqTransport};
pub use types::{NewNotebook, NotebookEntry, StudentFilter, StudyFilter};
