//! IP allow-listing end to end.

use warden::{
    AuthOutcome, Authenticator, Credentials, Error, InitState, IpRegexAuthenticator,
    MemoryWebContext, SecurityPipeline, TokenCredentials,
};

const GOOD_IP: &str = "127.0.0.1";
const BAD_IP: &str = "192.168.0.1";

#[test]
fn test_matching_ip_yields_profile_with_ip_as_id() {
    let authenticator = IpRegexAuthenticator::new(GOOD_IP);
    let mut credentials = TokenCredentials::new(GOOD_IP, "IpClient");

    authenticator.validate(&mut credentials).unwrap();
    assert_eq!(credentials.user_profile().unwrap().id(), GOOD_IP);
}

#[test]
fn test_rejected_ip_message_is_exact() {
    let authenticator = IpRegexAuthenticator::new(GOOD_IP);
    let mut credentials = TokenCredentials::new(BAD_IP, "IpClient");

    let err = authenticator.validate(&mut credentials).unwrap_err();
    assert!(matches!(err, Error::BadCredentials(_)));
    assert_eq!(err.to_string(), "Unauthorized IP address: 192.168.0.1");
}

#[test]
fn test_missing_pattern_fails_every_time() {
    let authenticator = IpRegexAuthenticator::unconfigured();
    for _ in 0..3 {
        let mut credentials = TokenCredentials::new(GOOD_IP, "IpClient");
        assert!(authenticator.validate(&mut credentials).unwrap_err().is_technical());
    }
    assert_eq!(authenticator.state(), InitState::Failed);
}

#[test]
fn test_pipeline_outcomes() {
    let pipeline = SecurityPipeline::new(IpRegexAuthenticator::new("10\\.0\\.0\\.[0-9]+"));
    let mut context = MemoryWebContext::new("intranet.example.org");

    let ok = pipeline
        .run(&mut context, TokenCredentials::new("10.0.0.42", "IpClient"))
        .unwrap();
    assert!(matches!(ok, AuthOutcome::Success(ref p) if p.id() == "10.0.0.42"));

    let denied = pipeline
        .run(&mut context, TokenCredentials::new("10.0.1.42", "IpClient"))
        .unwrap();
    assert_eq!(denied, AuthOutcome::denied("Unauthorized IP address: 10.0.1.42"));
}
