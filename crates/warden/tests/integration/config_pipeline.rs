//! Pipelines assembled from TOML configuration.

use std::io::Write;

use warden::{AuthOutcome, HttpAction, MemoryWebContext, TokenCredentials, WardenConfig};

const CONFIG: &str = r#"
[static_tokens]
tokens = [
    { token = "tok-deploy", id = "ci-bot", permissions = ["deploy"] },
    { token = "tok-read", id = "dashboard", permissions = ["read"] },
]

[authorizers.deployer]
kind = "require_any_permission"
elements = ["deploy", "admin"]

[authorizers.authenticated]
kind = "is_authenticated"

[pipeline]
authorizers = "authenticated, deployer"
login_url = "/login"
"#;

fn load() -> WardenConfig {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();
    WardenConfig::load(file.path()).unwrap()
}

#[test]
fn test_static_token_pipeline_from_file() {
    let config = load();
    let pipeline = config.pipeline(config.static_token_authenticator());

    let mut context = MemoryWebContext::new("api.example.org");
    let outcome = pipeline
        .run(&mut context, TokenCredentials::new("tok-deploy", "HeaderClient"))
        .unwrap();
    assert!(matches!(outcome, AuthOutcome::Success(ref p) if p.id() == "ci-bot"));

    let mut context = MemoryWebContext::new("api.example.org");
    let outcome = pipeline
        .run(&mut context, TokenCredentials::new("tok-read", "HeaderClient"))
        .unwrap();
    assert_eq!(outcome, AuthOutcome::denied("Access denied for dashboard"));

    let mut context = MemoryWebContext::new("api.example.org");
    let outcome = pipeline
        .run(&mut context, TokenCredentials::new("stolen", "HeaderClient"))
        .unwrap();
    assert_eq!(
        outcome.action(),
        Some(&HttpAction::Redirect {
            location: "/login".to_string()
        })
    );
}

#[test]
fn test_ip_section_missing_is_technical_fault() {
    let config = load();
    let pipeline = config.pipeline(config.ip_authenticator());
    let mut context = MemoryWebContext::new("api.example.org");

    let err = pipeline
        .run(&mut context, TokenCredentials::new("127.0.0.1", "IpClient"))
        .unwrap_err();
    assert!(err.is_technical());
}
