//! CSRF token issuance and verification across two requests.

use serde_json::Value;
use warden::constants::CSRF_TOKEN;
use warden::{
    AuthorizationChecker, CsrfAuthorizer, CsrfTokenGeneratorAuthorizer, IsAuthenticatedAuthorizer,
    MemoryWebContext, UserProfile, WebContext,
};

fn checker() -> AuthorizationChecker {
    AuthorizationChecker::new()
        .with_authorizer("csrfToken", CsrfTokenGeneratorAuthorizer::default())
        .with_authorizer("csrfCheck", CsrfAuthorizer)
        .with_authorizer("authenticated", IsAuthenticatedAuthorizer)
}

#[test]
fn test_form_render_then_submit() {
    let checker = checker();
    let profile = UserProfile::new("jdoe");

    let mut render = MemoryWebContext::new("shop.example.org");
    assert!(checker
        .is_authorized(&mut render, Some(&profile), "csrfToken,authenticated")
        .unwrap());

    let issued = render.request_attribute(CSRF_TOKEN).unwrap();
    let cookie = render.response_cookie(CSRF_TOKEN).unwrap();
    assert_eq!(Value::String(cookie.value.clone()), issued);
    assert_eq!(cookie.domain.as_deref(), Some("shop.example.org"));

    let token = issued.as_str().unwrap().to_string();
    let mut submit = MemoryWebContext::new("shop.example.org")
        .with_method("POST")
        .with_parameter(CSRF_TOKEN, token);
    submit.set_session_attribute(CSRF_TOKEN, render.session_attribute(CSRF_TOKEN).unwrap());
    assert!(checker
        .is_authorized(&mut submit, Some(&profile), "csrfCheck,authenticated")
        .unwrap());

    let mut forged = MemoryWebContext::new("shop.example.org")
        .with_method("POST")
        .with_parameter(CSRF_TOKEN, "forged");
    forged.set_session_attribute(CSRF_TOKEN, render.session_attribute(CSRF_TOKEN).unwrap());
    assert!(!checker
        .is_authorized(&mut forged, Some(&profile), "csrfCheck,authenticated")
        .unwrap());
}

#[test]
fn test_token_issued_even_when_request_denied() {
    let checker = checker();
    let mut context = MemoryWebContext::new("shop.example.org");

    let granted = checker
        .is_authorized(&mut context, None, "csrfToken, authenticated")
        .unwrap();
    assert!(!granted);
    assert!(context.request_attribute(CSRF_TOKEN).is_some());
    assert_eq!(context.response_cookies().len(), 1);
}

#[test]
fn test_submit_verified_in_either_list_order() {
    let checker = checker();
    let profile = UserProfile::new("jdoe");

    let mut render = MemoryWebContext::new("shop.example.org");
    checker
        .is_authorized(&mut render, Some(&profile), "csrfToken")
        .unwrap();
    let token = render
        .request_attribute(CSRF_TOKEN)
        .unwrap()
        .as_str()
        .unwrap()
        .to_string();
    let session_token = render.session_attribute(CSRF_TOKEN).unwrap();

    for names in ["csrfToken,csrfCheck", "csrfCheck,csrfToken"] {
        let mut submit = MemoryWebContext::new("shop.example.org")
            .with_method("POST")
            .with_parameter(CSRF_TOKEN, token.clone());
        submit.set_session_attribute(CSRF_TOKEN, session_token.clone());

        assert!(
            checker.is_authorized(&mut submit, Some(&profile), names).unwrap(),
            "{names}"
        );
        let rotated = submit.request_attribute(CSRF_TOKEN).unwrap();
        assert_ne!(rotated, Value::String(token.clone()));
        assert_eq!(submit.session_attribute(CSRF_TOKEN).unwrap(), rotated);
    }
}

#[test]
fn test_forged_submit_denied_when_issued_first() {
    let checker = checker();
    let mut submit = MemoryWebContext::new("shop.example.org")
        .with_method("POST")
        .with_parameter(CSRF_TOKEN, "forged");
    submit.set_session_attribute(CSRF_TOKEN, Value::String("real".to_string()));

    assert!(!checker
        .is_authorized(&mut submit, None, "csrfToken,csrfCheck")
        .unwrap());
}
