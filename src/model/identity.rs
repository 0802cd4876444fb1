use serde::{Deserialize, Serialize};

/// The human behind a seeded merchant. Generated once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl Identity {
    /// Build an identity whose email is derived from the names:
    /// `ordering.<first>-<last>@example.com`, lowercased.
    pub fn new(first_name: String, last_name: String, password: String) -> Self {
        let email = Self::email_for(&first_name, &last_name);
        Self {
            first_name,
            last_name,
            email,
            password,
        }
    }

    pub fn email_for(first_name: &str, last_name: &str) -> String {
        let slug = format!("{}-{}", first_name, last_name).to_lowercase();
        format!("ordering.{}@example.com", slug)
    }
}

/// Username/password pair that authenticates against the management API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl From<&Identity> for Credentials {
    fn from(identity: &Identity) -> Self {
        Self::new(identity.email.clone(), identity.password.clone())
    }
}
