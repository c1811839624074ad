use std::collections::HashMap;

/// HTTP request methods.
///
/// Only the two verbs the request-line grammar admits. Anything else on the
/// wire fails to parse and is answered by the 404 fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    Get,
    /// POST - Create or submit data
    Post,
}

impl Method {
    /// Parses an HTTP method token, case-insensitively.
    ///
    /// # Example
    ///
    /// ```
    /// # use courier::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Some(Method::Get));
    /// assert_eq!(Method::from_token("post"), Some(Method::Post));
    /// assert_eq!(Method::from_token("PUT"), None);
    /// ```
    pub fn from_token(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("GET") {
            Some(Method::Get)
        } else if s.eq_ignore_ascii_case("POST") {
            Some(Method::Post)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Represents a parsed HTTP request from a client.
///
/// Immutable once constructed; built once per connection from the bytes of a
/// single request and discarded after the response is written.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET or POST)
    pub method: Method,
    /// The request path as written on the wire, not decoded
    pub url: String,
    /// Trailing protocol token from the request line (e.g. "HTTP/1.1");
    /// stored but not interpreted
    pub protocol: String,
    /// Request headers; keys are stored lowercased, first occurrence wins
    pub headers: HashMap<String, String>,
    /// Request body, trimmed; empty string means no body
    pub body: String,
}

impl Request {
    /// Retrieves a header value by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Whether the `Accept-Encoding` header lists the given coding.
    ///
    /// The header value is split on commas, each token trimmed and compared
    /// case-insensitively. Exact-token matching only, no quality values.
    pub fn accepts_encoding(&self, coding: &str) -> bool {
        self.header("Accept-Encoding")
            .map(|v| {
                v.split(',')
                    .any(|token| token.trim().eq_ignore_ascii_case(coding))
            })
            .unwrap_or(false)
    }
}

/// Builder for constructing Request values, mainly in tests.
pub struct RequestBuilder {
    method: Method,
    url: String,
    protocol: String,
    headers: HashMap<String, String>,
    body: String,
}

impl RequestBuilder {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            protocol: "HTTP/1.1".to_string(),
            headers: HashMap::new(),
            body: String::new(),
        }
    }

    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Adds a header; the key is lowercased to match parser storage.
    pub fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.insert(key.to_ascii_lowercase(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            protocol: self.protocol,
            headers: self.headers,
            body: self.body,
        }
    }
}
