//! Shared authenticators under concurrent first use.

use std::sync::Arc;
use std::thread;

use warden::{
    Authenticator, Credentials, DirectoryAuthenticator, InitState, IpRegexAuthenticator,
    TokenCredentials, UsernamePasswordCredentials,
};

use crate::common::sample_directory;

#[test]
fn test_ip_authenticator_shared_between_threads() {
    let authenticator = Arc::new(IpRegexAuthenticator::new("10\\.0\\.0\\.[0-9]+"));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let authenticator = authenticator.clone();
            thread::spawn(move || {
                let ip = format!("10.0.0.{i}");
                let mut credentials = TokenCredentials::new(ip.clone(), "IpClient");
                authenticator.validate(&mut credentials).unwrap();
                assert_eq!(credentials.user_profile().unwrap().id(), ip);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(authenticator.state(), InitState::Initialized);
}

#[test]
fn test_failed_initialization_seen_identically_by_all_threads() {
    let authenticator = Arc::new(DirectoryAuthenticator::from_parts(None, Some("cn".to_string())));

    let messages: Vec<String> = (0..8)
        .map(|_| {
            let authenticator = authenticator.clone();
            thread::spawn(move || {
                let mut credentials = UsernamePasswordCredentials::new("jdoe", "s3cret", "Form");
                authenticator.validate(&mut credentials).unwrap_err().to_string()
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect();

    assert!(messages.iter().all(|m| m == "Technical error: directoryClient cannot be null"));
    assert_eq!(authenticator.state(), InitState::Failed);
}

#[test]
fn test_directory_authenticator_shared_between_threads() {
    let directory = sample_directory().shared();
    let authenticator = Arc::new(DirectoryAuthenticator::new(directory.clone(), "cn,mail"));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let authenticator = authenticator.clone();
            thread::spawn(move || {
                let mut credentials = UsernamePasswordCredentials::new("jdoe", "s3cret", "Form");
                authenticator.validate(&mut credentials).unwrap();
                credentials.take_user_profile().unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().attribute_as_str("cn"), Some("John Doe"));
    }
    assert_eq!(directory.calls(), 8);
}
