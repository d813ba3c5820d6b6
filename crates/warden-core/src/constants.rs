//! Well-known attribute keys shared with the transport and session layers.
//!
//! These strings are a persisted contract: sessions written by one release
//! must remain readable by the next, so values never change.

/// Original requested URL, saved before redirecting to a login page.
pub const REQUESTED_URL: &str = "wardenRequestedUrl";

/// Verified user profile, saved in the request or session.
pub const USER_PROFILE: &str = "wardenUserProfile";

/// CSRF token, saved in the request, the session and a response cookie.
pub const CSRF_TOKEN: &str = "wardenCsrfToken";

/// Session CSRF token as it was before this request issued a new one.
/// Saved in the request only; `null` when the session had none.
pub const PREVIOUS_CSRF_TOKEN: &str = "wardenPreviousCsrfToken";

/// Session identifier.
pub const SESSION_ID: &str = "wardenSessionId";

/// Separator between names in an authorizer or client list.
pub const ELEMENT_SEPARATOR: &str = ",";

/// Form parameter carrying the username.
pub const USERNAME: &str = "username";

/// Form parameter carrying the password.
pub const PASSWORD: &str = "password";
