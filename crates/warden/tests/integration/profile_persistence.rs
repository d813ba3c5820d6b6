//! Profiles survive serialization with exactly the fields they had.

use warden::{BearerAccessToken, Scope, UserProfile};

fn oidc_profile() -> UserProfile {
    let mut profile = UserProfile::new("jdoe");
    profile.add_attribute("email", "jdoe@example.org");
    profile.add_role("user");
    profile.set_access_token(Some(
        BearerAccessToken::new("opaque-access-token")
            .with_lifetime(3600)
            .with_scope(Scope::parse("openid email")),
    ));
    profile.set_id_token(Some("header.payload.signature".to_string()));
    profile
}

#[test]
fn test_round_trip_with_secrets() {
    let profile = oidc_profile();
    let restored = UserProfile::from_json(&profile.to_json().unwrap()).unwrap();
    assert_eq!(restored, profile);
    let token = restored.access_token().unwrap();
    assert_eq!(token.lifetime(), Some(3600));
    assert!(token.scope().unwrap().contains("email"));
}

#[test]
fn test_clear_before_persisting() {
    let mut profile = oidc_profile();
    profile.clear_sensitive_data();

    let json = profile.to_json().unwrap();
    assert!(!json.contains("opaque-access-token"));
    assert!(!json.contains("header.payload.signature"));

    let restored = UserProfile::from_json(&json).unwrap();
    assert!(restored.access_token().is_none());
    assert!(restored.id_token().is_none());
    assert_eq!(restored.id(), "jdoe");
    assert_eq!(restored.attribute_as_str("email"), Some("jdoe@example.org"));
    assert!(restored.has_role("user"));
}

#[test]
fn test_generated_access_token_round_trip() {
    let mut profile = UserProfile::new("svc");
    profile.set_access_token(Some(BearerAccessToken::generate(32, Some(600), None).unwrap()));

    let restored = UserProfile::from_json(&profile.to_json().unwrap()).unwrap();
    assert_eq!(restored.access_token(), profile.access_token());
    assert!(restored.id_token().is_none());
}
