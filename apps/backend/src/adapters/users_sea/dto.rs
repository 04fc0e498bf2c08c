//! DTOs for the users adapter.

/// DTO for creating a new user row.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub sub: String,
    pub username: Option<String>,
    pub is_admin: bool,
}

impl UserCreate {
    pub fn new(sub: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            username: None,
            is_admin: false,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// DTO for creating a credentials row linked to a user.
#[derive(Debug, Clone)]
pub struct CredentialsCreate {
    pub user_id: i64,
    pub email: String,
    pub password_hash: Option<String>,
    pub google_sub: Option<String>,
}

impl CredentialsCreate {
    pub fn new(user_id: i64, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            password_hash: None,
            google_sub: None,
        }
    }

    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    pub fn with_google_sub(mut self, google_sub: impl Into<String>) -> Self {
        self.google_sub = Some(google_sub.into());
        self
    }
}
