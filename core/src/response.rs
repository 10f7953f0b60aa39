//! The response envelope handed back by every client operation.
//!
//! # Design
//! The envelope keeps the raw `HttpResponse` next to an owned XML tree built
//! from its body. Building the tree is the only validation performed: the
//! root element and the API's error encoding are left to the caller.

use std::borrow::Cow;

use xmltree::Element;

use crate::error::ApiError;
use crate::http::HttpResponse;

#[derive(Debug, Clone)]
pub struct ApiResponse {
    response: HttpResponse,
    xml: Element,
}

impl ApiResponse {
    /// Parse the body of `response` as XML.
    ///
    /// Fails with `ApiError::Parse` when the body is not well-formed,
    /// whatever the status code.
    pub fn from_http(response: HttpResponse) -> Result<Self, ApiError> {
        let xml = Element::parse(response.body.as_slice())?;
        Ok(Self { response, xml })
    }

    pub fn status(&self) -> u16 {
        self.response.status
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.response.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.response.body
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.response.body)
    }

    /// Root element of the parsed document.
    pub fn xml(&self) -> &Element {
        &self.xml
    }

    pub fn into_parts(self) -> (HttpResponse, Element) {
        (self.response, self.xml)
    }
}
