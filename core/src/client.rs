//! Typed client for the notebook API.
//!
//! # Design
//! `IsClient` holds an institution, a faculty, a course code, and an API key,
//! and carries no mutable state between calls. Every operation exists as a
//! pure `build_*` method producing an `HttpRequest`, and as a method of the
//! same name without the prefix that sends that request through the
//! client's `Transport` and wraps the reply in an `ApiResponse`.
//!
//! The context parameters (`klic`, `fakulta`, `kod`) are computed once at
//! construction and overlaid on every request last, so an operation can
//! never override them.

use std::fmt;

use tracing::debug;

use crate::error::ApiError;
use crate::faculty::Faculty;
use crate::http::HttpRequest;
use crate::institution::{Institution, MasarykUniversity};
use crate::params::{keys, Operation, QueryParams};
use crate::response::ApiResponse;
use crate::transport::{Transport, UreqTransport};
use crate::types::{NewNotebook, NotebookEntry, StudentFilter, StudyFilter};

pub struct IsClient<I = MasarykUniversity, T = UreqTransport> {
    institution: I,
    faculty: Faculty,
    course: String,
    context: Vec<(String, String)>,
    transport: T,
}

impl<I: Institution> IsClient<I, UreqTransport> {
    /// Create a client that talks to `institution` over blocking HTTP.
    pub fn new(
        institution: I,
        faculty: Faculty,
        course: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self::with_transport(institution, faculty, course, api_key, UreqTransport::new())
    }
}

impl<I: Institution, T: Transport> IsClient<I, T> {
    pub fn with_transport(
        institution: I,
        faculty: Faculty,
        course: impl Into<String>,
        api_key: impl Into<String>,
        transport: T,
    ) -> Self {
        let course = course.into();
        let context = vec![
            (keys::API_KEY.to_string(), api_key.into()),
            (keys::FACULTY.to_string(), faculty.id.to_string()),
            (keys::COURSE.to_string(), course.clone()),
        ];
        Self {
            institution,
            faculty,
            course,
            context,
            transport,
        }
    }

    pub fn institution(&self) -> &I {
        &self.institution
    }

    pub fn faculty(&self) -> &Faculty {
        &self.faculty
    }

    pub fn course(&self) -> &str {
        &self.course
    }

    /// The `klic`, `fakulta`, and `kod` pairs attached to every request.
    pub fn context_params(&self) -> &[(String, String)] {
        &self.context
    }

    fn request(&self, params: QueryParams) -> HttpRequest {
        HttpRequest {
            url: self.institution.api_url().to_string(),
            query: params.overlay(&self.context),
        }
    }

    fn send(&self, request: HttpRequest) -> Result<ApiResponse, ApiError> {
        debug!(
            operation = request.operation().unwrap_or_default(),
            faculty = self.faculty.id,
            course = %self.course,
            "sending request"
        );
        let response = self.transport.get(&request)?;
        ApiResponse::from_http(response)
    }

    // -----------------------------------------------------------------------
    // Request builders
    // -----------------------------------------------------------------------

    pub fn build_info(&self) -> HttpRequest {
        self.request(QueryParams::new(Operation::CourseInfo))
    }

    pub fn build_students(&self, filter: &StudentFilter) -> HttpRequest {
        self.request(
            QueryParams::new(Operation::Students)
                .flag(keys::REGISTERED, filter.registered)
                .flag(keys::ENDED_STUDY, filter.ended_study)
                .flag(keys::INACTIVE_STUDY, filter.inactive_study),
        )
    }

    pub fn build_seminar_students<S: AsRef<str>>(
        &self,
        seminars: &[S],
        filter: &StudyFilter,
    ) -> HttpRequest {
        self.request(
            QueryParams::new(Operation::SeminarStudents)
                .repeat(keys::SEMINAR, seminars.iter().map(|s| AsRef::<str>::as_ref(s)))
                .flag(keys::ENDED_STUDY, filter.ended_study)
                .flag(keys::INACTIVE_STUDY, filter.inactive_study),
        )
    }

    pub fn build_seminar_teachers<S: AsRef<str>>(&self, seminars: &[S]) -> HttpRequest {
        self.request(
            QueryParams::new(Operation::SeminarTeachers)
                .repeat(keys::SEMINAR, seminars.iter().map(|s| AsRef::<str>::as_ref(s))),
        )
    }

    pub fn build_notebooks(&self) -> HttpRequest {
        self.request(QueryParams::new(Operation::Notebooks))
    }

    pub fn build_new_notebook(&self, notebook: &NewNotebook) -> HttpRequest {
        self.request(
            QueryParams::new(Operation::NewNotebook)
                .push(keys::NAME, notebook.name.as_str())
                .push(keys::SHORT_NAME, notebook.short_name.as_str())
                .marker(keys::VISIBLE, notebook.visible)
                .marker(keys::NO_FILL_IN, notebook.no_fill_in)
                .marker(keys::STATISTICS, notebook.statistics),
        )
    }

    /// Read a notebook; with no `ucos` the server returns every student.
    pub fn build_notebook(&self, short_name: &str, ucos: &[u64]) -> HttpRequest {
        self.request(
            QueryParams::new(Operation::NotebookContent)
                .push(keys::SHORT_NAME, short_name)
                .repeat(keys::UCO, ucos),
        )
    }

    pub fn build_edit_notebook(&self, entry: &NotebookEntry) -> HttpRequest {
        self.request(
            QueryParams::new(Operation::EditNotebook)
                .push(keys::SHORT_NAME, entry.short_name.as_str())
                .push(keys::UCO, entry.uco.to_string())
                .push(keys::CONTENT, entry.content.as_str())
                .marker(keys::OVERWRITE, entry.overwrite)
                .optional(keys::LAST_EDITED, entry.last_edited.as_deref()),
        )
    }

    pub fn build_exam_dates(&self, filter: &StudyFilter) -> HttpRequest {
        self.request(
            QueryParams::new(Operation::ExamDates)
                .flag(keys::ENDED_STUDY, filter.ended_study)
                .flag(keys::INACTIVE_STUDY, filter.inactive_study),
        )
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    pub fn info(&self) -> Result<ApiResponse, ApiError> {
        self.send(self.build_info())
    }

    pub fn students(&self, filter: &StudentFilter) -> Result<ApiResponse, ApiError> {
        self.send(self.build_students(filter))
    }

    pub fn seminar_students<S: AsRef<str>>(
        &self,
        seminars: &[S],
        filter: &StudyFilter,
    ) -> Result<ApiResponse, ApiError> {
        self.send(self.build_seminar_students(seminars, filter))
    }

    pub fn seminar_teachers<S: AsRef<str>>(&self, seminars: &[S]) -> Result<ApiResponse, ApiError> {
        self.send(self.build_seminar_teachers(seminars))
    }

    pub fn notebooks(&self) -> Result<ApiResponse, ApiError> {
        self.send(self.build_notebooks())
    }

    pub fn new_notebook(&self, notebook: &NewNotebook) -> Result<ApiResponse, ApiError> {
        self.send(self.build_new_notebook(notebook))
    }

    pub fn notebook(&self, short_name: &str, ucos: &[u64]) -> Result<ApiResponse, ApiError> {
        self.send(self.build_notebook(short_name, ucos))
    }

    pub fn edit_notebook(&self, entry: &NotebookEntry) -> Result<ApiResponse, ApiError> {
        self.send(self.build_edit_notebook(entry))
    }

    pub fn exam_dates(&self, filter: &StudyFilter) -> Result<ApiResponse, ApiError> {
        self.send(self.build_exam_dates(filter))
    }
}

impl<I: fmt::Debug, T> fmt::Debug for IsClient<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IsClient")
            .field("institution", &self.institution)
            .field("faculty", &self.faculty.id)
            .field("course", &self.course)
            .finish_non_exhaustive()
    }
}
