//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! client builds `HttpRequest` values without touching the network; a
//! `Transport` (or any other host) executes them and hands back an
//! `HttpResponse`.
//!
//! The notebook API only ever takes a GET with query parameters, so a
//! request is just a URL plus an ordered list of pairs. Keys may repeat
//! (seminar codes, student ids) and their order is kept on the wire.

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    /// First value of `key`, if present.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value of `key`, in wire order.
    pub fn values(&self, key: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// The `operace` selector of this request.
    pub fn operation(&self) -> Option<&str> {
        self.value(crate::params::keys::OPERATION)
    }
}

/// An HTTP response described as plain data.
///
/// The body is kept as raw bytes; decoding is left to the response wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}
