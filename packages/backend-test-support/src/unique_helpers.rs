//! Test helpers for generating unique test data
//!
//! ULID-based generators keep parallel test runs from colliding on
//! unique columns (emails, team names, season names).

use ulid::Ulid;

/// Generate a unique string in the format `{prefix}-{ulid}`.
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique email address in the format `{prefix}-{ulid}@example.test`.
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new())
}

#[cfg(test)]
mod tests {
    use super::{unique_email, unique_str};

    #[test]
    fn unique_str_differs_between_calls() {
        let a = unique_str("team");
        let b = unique_str("team");
        assert_ne!(a, b);
        assert!(a.starts_with("team-"));
    }

    #[test]
    fn unique_email_shape() {
        let email = unique_email("player");
        assert!(email.starts_with("player-"));
        assert!(email.ends_with("@example.test"));
    }
}
