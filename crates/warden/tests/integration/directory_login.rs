//! Username/password login through a directory.

use std::sync::Arc;

use warden::constants::{PASSWORD, REQUESTED_URL, USERNAME, USER_PROFILE};
use warden::{
    AuthOutcome, Authenticator, AuthorizationChecker, Credentials, DirectoryAuthenticator,
    DirectoryClient, Error,
    HttpAction, MemoryWebContext, ProfileAttribute, RequireElementsAuthorizer, SecurityPipeline,
    UserProfile, UsernamePasswordCredentials, WebContext,
};

use crate::common::sample_directory;

fn login(username: &str, password: &str) -> UsernamePasswordCredentials {
    UsernamePasswordCredentials::new(username, password, "FormClient")
}

#[test]
fn test_attribute_merge_shapes() {
    let authenticator =
        DirectoryAuthenticator::new(sample_directory().shared(), "cn,mail,givenName");
    let mut credentials = login("jdoe", "s3cret");

    authenticator.validate(&mut credentials).unwrap();

    let profile = credentials.user_profile().unwrap();
    assert_eq!(profile.id(), "jdoe");
    assert_eq!(profile.attribute_as_str("cn"), Some("John Doe"));
    assert_eq!(
        profile.attribute("mail"),
        Some(&ProfileAttribute::Multi(vec![
            "jdoe@example.org".to_string(),
            "john.doe@example.org".to_string(),
        ]))
    );
    // Absent from the entry: not present at all.
    assert!(profile.attribute("givenName").is_none());
    // Present in the entry but not requested.
    assert!(profile.attribute("telephoneNumber").is_none());
}

#[test]
fn test_three_way_failure_taxonomy() {
    let directory = sample_directory().shared();
    let authenticator = DirectoryAuthenticator::new(directory.clone(), "cn");

    let missing = authenticator
        .validate(&mut login("nobody", "x"))
        .unwrap_err();
    assert!(matches!(missing, Error::AccountNotFound(_)));

    let wrong = authenticator
        .validate(&mut login("jdoe", "guess"))
        .unwrap_err();
    assert!(matches!(wrong, Error::BadCredentials(_)));
    assert!(!wrong.to_string().contains("guess"));

    let offline = DirectoryAuthenticator::new(sample_directory().offline().shared(), "cn");
    let fault = offline.validate(&mut login("jdoe", "s3cret")).unwrap_err();
    assert!(fault.is_technical());

    assert_eq!(directory.calls(), 2);
}

#[test]
fn test_misconfiguration_fails_before_backend_call() {
    let directory = sample_directory().shared();
    let client: Arc<dyn DirectoryClient> = directory.clone();
    let authenticator = DirectoryAuthenticator::from_parts(Some(client), None);

    let err = authenticator
        .validate(&mut login("jdoe", "s3cret"))
        .unwrap_err();
    assert!(err.is_technical());
    assert_eq!(directory.calls(), 0);
}

#[test]
fn test_login_pipeline_with_redirect_and_roles() {
    let directory = sample_directory().shared();
    let checker = AuthorizationChecker::new()
        .with_authorizer("staff", RequireElementsAuthorizer::any_role("staff"));
    let pipeline = SecurityPipeline::new(DirectoryAuthenticator::new(directory, "cn"))
        .with_checker(checker)
        .with_login_url("https://sso.example.org/login");

    let mut rejected = MemoryWebContext::new("app.example.org")
        .with_method("POST")
        .with_url("https://app.example.org/reports");
    let outcome = pipeline
        .run(&mut rejected, login("jdoe", "wrong"))
        .unwrap();
    assert_eq!(
        outcome,
        AuthOutcome::ActionRequired(HttpAction::Redirect {
            location: "https://sso.example.org/login".to_string()
        })
    );
    assert_eq!(
        rejected.session_attribute(REQUESTED_URL).unwrap(),
        "https://app.example.org/reports"
    );

    let mut accepted = MemoryWebContext::new("app.example.org")
        .with_method("POST")
        .with_parameter(USERNAME, "jdoe")
        .with_parameter(PASSWORD, "s3cret");
    let credentials = UsernamePasswordCredentials::from_form(&accepted, "FormClient").unwrap();
    let outcome = pipeline.run(&mut accepted, credentials).unwrap();
    assert!(outcome.is_success());
    let stored = UserProfile::from_value(accepted.request_attribute(USER_PROFILE).unwrap()).unwrap();
    assert_eq!(stored.attribute_as_str("cn"), Some("John Doe"));

    let restricted = pipeline.with_authorizers("staff");
    let mut forbidden = MemoryWebContext::new("app.example.org");
    let outcome = restricted.run(&mut forbidden, login("jdoe", "s3cret")).unwrap();
    assert!(outcome.is_denied());
}
