use lazy_regex::regex_is_match;
use sea_orm::DatabaseTransaction;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::adapters::users_sea::{CredentialsCreate, UserCreate};
use crate::auth::password::{check_password_strength, hash_password, verify_password};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::repos::users::{self, User};

/// Redacts a google_sub value for logging purposes.
/// Shows only the first 4 characters followed by asterisks.
fn redact_google_sub(google_sub: &str) -> String {
    if google_sub.len() <= 4 {
        "*".repeat(google_sub.len())
    } else {
        format!("{}***", &google_sub[..4])
    }
}

fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_ascii_lowercase();
    if !regex_is_match!(r"^[^@\s]+@[^@\s]+\.[^@\s]+$", &email) {
        return Err(AppError::bad_request(
            ErrorCode::InvalidEmail,
            format!("Not a valid email address: {email}"),
        ));
    }
    Ok(email)
}

/// Derives a username from the provided name or email local-part.
fn derive_username(name: Option<&str>, email: &str) -> Option<String> {
    if let Some(name) = name {
        let clean_name = name.trim();
        if !clean_name.is_empty() {
            return Some(clean_name.to_string());
        }
    }

    // Fall back to email local-part (before @)
    let local_part = email.split('@').next().unwrap_or_default();
    if !local_part.is_empty() {
        return Some(local_part.to_string());
    }

    None
}

/// Register a new account with email and password.
///
/// The email must be unused; a duplicate surfaces as a `UNIQUE_EMAIL`
/// conflict from the credentials insert.
pub async fn register_email_user(
    txn: &DatabaseTransaction,
    email: &str,
    password: &str,
    name: Option<&str>,
) -> Result<User, AppError> {
    let email = normalize_email(email)?;
    check_password_strength(password)?;

    let sub = Uuid::new_v4().to_string();
    let mut user_create = UserCreate::new(sub);
    if let Some(username) = derive_username(name, &email) {
        user_create = user_create.with_username(username);
    }
    let user = users::create_user(txn, user_create).await?;

    let password_hash = hash_password(password);
    users::create_credentials(
        txn,
        CredentialsCreate::new(user.id, email.clone()).with_password_hash(password_hash),
    )
    .await?;

    info!(user_id = user.id, email = %Redacted(&email), "Registered new user");
    Ok(user)
}

/// Verify an email/password pair and record the login.
pub async fn login_email_user(
    txn: &DatabaseTransaction,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let email = normalize_email(email)?;

    let credential = users::find_credentials_by_email(txn, &email).await?;

    // Unknown email, federated-only account and wrong password all return
    // the same error body.
    let credential = match credential {
        Some(c) => c,
        None => {
            debug!(email = %Redacted(&email), "Login for unknown email");
            return Err(AppError::bad_request(
                ErrorCode::InvalidCredentials,
                "Invalid email or password",
            ));
        }
    };

    let stored = credential.password_hash.as_deref().unwrap_or_default();
    if stored.is_empty() || !verify_password(password, stored) {
        debug!(user_id = credential.user_id, "Login with wrong password");
        return Err(AppError::bad_request(
            ErrorCode::InvalidCredentials,
            "Invalid email or password",
        ));
    }

    users::touch_login(txn, credential.id, None).await?;

    let user = users::find_user_by_id(txn, credential.user_id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "User not found"))?;

    debug!(user_id = user.id, email = %Redacted(&email), "Login succeeded");
    Ok(user)
}

/// Ensures a user exists for Google sign-in, creating one if necessary.
///
/// Idempotent: repeated calls with the same email return the same user.
/// An email already linked to a *different* Google account is a conflict.
pub async fn ensure_google_user(
    txn: &DatabaseTransaction,
    email: &str,
    name: Option<&str>,
    google_sub: &str,
) -> Result<User, AppError> {
    let email = normalize_email(email)?;

    let existing_credential = users::find_credentials_by_email(txn, &email).await?;

    match existing_credential {
        Some(credential) => {
            if let Some(existing_google_sub) = &credential.google_sub {
                if existing_google_sub != google_sub {
                    warn!(
                        user_id = credential.user_id,
                        email = %Redacted(&email),
                        incoming_google_sub = %redact_google_sub(google_sub),
                        existing_google_sub = %redact_google_sub(existing_google_sub),
                        "Google sub mismatch detected"
                    );
                    return Err(AppError::conflict(
                        ErrorCode::GoogleSubMismatch,
                        "This email is already linked to a different Google account.",
                    ));
                }
            }

            // Only link google_sub when it is currently NULL.
            let link = if credential.google_sub.is_none() {
                info!(
                    user_id = credential.user_id,
                    email = %Redacted(&email),
                    google_sub = %redact_google_sub(google_sub),
                    "Linking google_sub to existing user"
                );
                Some(google_sub.to_string())
            } else {
                None
            };
            users::touch_login(txn, credential.id, link).await?;

            let user = users::find_user_by_id(txn, credential.user_id)
                .await?
                .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "User not found"))?;

            debug!(user_id = user.id, email = %Redacted(&email), "Repeat Google login");
            Ok(user)
        }
        None => {
            // Use google_sub as the external identifier for federated users.
            let mut user_create = UserCreate::new(google_sub);
            if let Some(username) = derive_username(name, &email) {
                user_create = user_create.with_username(username);
            }
            let user = users::create_user(txn, user_create).await?;

            users::create_credentials(
                txn,
                CredentialsCreate::new(user.id, email.clone()).with_google_sub(google_sub),
            )
            .await?;

            info!(
                user_id = user.id,
                email = %Redacted(&email),
                google_sub = %redact_google_sub(google_sub),
                "First user creation via Google sign-in"
            );
            Ok(user)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{derive_username, normalize_email};

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(
            normalize_email("  Jo.Bloggs@Example.COM ").unwrap(),
            "jo.bloggs@example.com"
        );
    }

    #[test]
    fn bad_emails_are_rejected() {
        assert!(normalize_email("not-an-email").is_err());
        assert!(normalize_email("a@b").is_err());
        assert!(normalize_email("two words@example.com").is_err());
    }

    #[test]
    fn username_prefers_name_then_local_part() {
        assert_eq!(
            derive_username(Some("Jo Bloggs"), "jo@example.com"),
            Some("Jo Bloggs".to_string())
        );
        assert_eq!(
            derive_username(Some("   "), "jo@example.com"),
            Some("jo".to_string())
        );
        assert_eq!(
            derive_username(None, "jo@example.com"),
            Some("jo".to_string())
        );
    }
}
