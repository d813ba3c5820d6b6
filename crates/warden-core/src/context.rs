//! The request/response collaborator supplied by the transport layer.
//!
//! Warden never touches HTTP directly. Everything it needs from the current
//! request (host, attributes, parameters, session) and everything it writes
//! back (attributes, cookies) goes through [`WebContext`].
//!
//! [`MemoryWebContext`] is a self-contained implementation backed by maps,
//! used by tests and by embedders that adapt their own request types.

use std::collections::HashMap;

use serde_json::Value;

/// Request/response operations consumed by authenticators and authorizers.
///
/// A context is created per request and is never shared between requests,
/// so implementations need no internal locking.
pub trait WebContext {
    /// Host name of the current request; used as the CSRF cookie domain.
    fn server_name(&self) -> String;

    /// HTTP method of the current request, upper-case (e.g. `"POST"`).
    fn request_method(&self) -> String;

    /// Full URL of the current request.
    fn full_request_url(&self) -> String;

    /// A request parameter (query string or form field).
    fn request_parameter(&self, name: &str) -> Option<String>;

    /// A request header, looked up case-insensitively.
    fn request_header(&self, name: &str) -> Option<String>;

    /// A request-scoped attribute.
    fn request_attribute(&self, key: &str) -> Option<Value>;

    /// Stores a request-scoped attribute, replacing any previous value.
    fn set_request_attribute(&mut self, key: &str, value: Value);

    /// A session attribute.
    fn session_attribute(&self, key: &str) -> Option<Value>;

    /// Stores a session attribute, replacing any previous value.
    fn set_session_attribute(&mut self, key: &str, value: Value);

    /// Adds a cookie to the response.
    fn add_response_cookie(&mut self, cookie: Cookie);
}

/// A cookie projected onto the response.
///
/// Only `name` and `value` are mandatory; unset optional fields are left to
/// the cookie-issuing collaborator's defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// Domain the cookie is bound to.
    pub domain: Option<String>,
    /// Path the cookie is bound to.
    pub path: Option<String>,
    /// Lifetime in seconds.
    pub max_age: Option<i64>,
    /// Only sent over HTTPS.
    pub secure: bool,
    /// Not readable from scripts.
    pub http_only: bool,
}

impl Cookie {
    /// Create a cookie with the given name and value and no other settings.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
            max_age: None,
            secure: false,
            http_only: false,
        }
    }

    /// Bind the cookie to a domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Bind the cookie to a path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the cookie lifetime in seconds.
    pub fn with_max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    /// Mark the cookie secure.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Mark the cookie HTTP-only.
    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }
}

/// In-memory [`WebContext`].
#[derive(Debug, Clone)]
pub struct MemoryWebContext {
    server_name: String,
    method: String,
    url: String,
    parameters: HashMap<String, String>,
    headers: HashMap<String, String>,
    request_attributes: HashMap<String, Value>,
    session: HashMap<String, Value>,
    cookies: Vec<Cookie>,
}

impl MemoryWebContext {
    /// Create a `GET` context for the given host.
    pub fn new(server_name: impl Into<String>) -> Self {
        let server_name = server_name.into();
        let url = format!("http://{server_name}/");
        Self {
            server_name,
            method: "GET".to_string(),
            url,
            parameters: HashMap::new(),
            headers: HashMap::new(),
            request_attributes: HashMap::new(),
            session: HashMap::new(),
            cookies: Vec::new(),
        }
    }

    /// Set the request method.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into().to_uppercase();
        self
    }

    /// Set the full request URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Add a request parameter.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Add a request header.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_lowercase(), value.into());
        self
    }

    /// Cookies added to the response so far, in insertion order.
    pub fn response_cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// The last response cookie with the given name.
    pub fn response_cookie(&self, name: &str) -> Option<&Cookie> {
        self.cookies.iter().rev().find(|c| c.name == name)
    }
}

impl WebContext for MemoryWebContext {
    fn server_name(&self) -> String {
        self.server_name.clone()
    }

    fn request_method(&self) -> String {
        self.method.clone()
    }

    fn full_request_url(&self) -> String {
        self.url.clone()
    }

    fn request_parameter(&self, name: &str) -> Option<String> {
        self.parameters.get(name).cloned()
    }

    fn request_header(&self, name: &str) -> Option<String> {
        self.headers.get(&name.to_lowercase()).cloned()
    }

    fn request_attribute(&self, key: &str) -> Option<Value> {
        self.request_attributes.get(key).cloned()
    }

    fn set_request_attribute(&mut self, key: &str, value: Value) {
        self.request_attributes.insert(key.to_string(), value);
    }

    fn session_attribute(&self, key: &str) -> Option<Value> {
        self.session.get(key).cloned()
    }

    fn set_session_attribute(&mut self, key: &str, value: Value) {
        self.session.insert(key.to_string(), value);
    }

    fn add_response_cookie(&mut self, cookie: Cookie) {
        self.cookies.push(cookie);
    }
}
