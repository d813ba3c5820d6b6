//! Shared fixtures for the integration tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use warden::{
    DirectoryClient, DirectoryEntry, DirectoryRequest, DirectoryResponse, DirectoryResultCode,
};

/// One account in [`InMemoryDirectory`].
pub struct Account {
    pub password: String,
    pub entry: DirectoryEntry,
}

/// A directory backed by a map of accounts.
///
/// Unknown usernames resolve to `DnResolutionFailure`; a wrong password is
/// `InvalidCredential`. `offline` makes every call fail at client level.
#[derive(Default)]
pub struct InMemoryDirectory {
    accounts: HashMap<String, Account>,
    offline: bool,
    calls: AtomicUsize,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, username: &str, password: &str, entry: DirectoryEntry) -> Self {
        self.accounts.insert(
            username.to_string(),
            Account {
                password: password.to_string(),
                entry,
            },
        );
        self
    }

    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl DirectoryClient for InMemoryDirectory {
    fn authenticate(
        &self,
        request: &DirectoryRequest,
    ) -> Result<DirectoryResponse, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err("connection refused".into());
        }
        let Some(account) = self.accounts.get(&request.username) else {
            return Ok(DirectoryResponse::failure(
                DirectoryResultCode::DnResolutionFailure,
            ));
        };
        if account.password != request.password {
            return Ok(DirectoryResponse::failure(
                DirectoryResultCode::InvalidCredential,
            ));
        }
        Ok(DirectoryResponse::success(account.entry.clone()))
    }
}

/// A directory with `jdoe` / `s3cret`, single-valued `cn` and multi-valued
/// `mail`.
pub fn sample_directory() -> InMemoryDirectory {
    InMemoryDirectory::new().with_account(
        "jdoe",
        "s3cret",
        DirectoryEntry::new("uid=jdoe,ou=people,dc=example,dc=org")
            .with_attribute("cn", ["John Doe"])
            .with_attribute("mail", ["jdoe@example.org", "john.doe@example.org"])
            .with_attribute("telephoneNumber", ["555-0100"]),
    )
}
