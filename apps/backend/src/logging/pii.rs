//! PII-safe logging wrappers.
//!
//! Wrap user-identifying values in `Redacted` before putting them into a
//! tracing field so raw emails and phone numbers never land in log output.

use std::fmt;

/// Display wrapper that redacts the inner value.
///
/// Emails keep the first character of the local part and the domain
/// (`j***@example.com`); everything else keeps the first two characters.
pub struct Redacted<T>(pub T);

impl<T: AsRef<str>> fmt::Display for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.as_ref();
        match s.find('@') {
            Some(at) if at > 0 => {
                let first = &s[..s.char_indices().nth(1).map(|(i, _)| i).unwrap_or(at).min(at)];
                write!(f, "{first}***{}", &s[at..])
            }
            _ => {
                let keep = s
                    .char_indices()
                    .nth(2)
                    .map(|(i, _)| i)
                    .unwrap_or(s.len());
                write!(f, "{}***", &s[..keep])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Redacted;

    #[test]
    fn redacts_email_local_part() {
        assert_eq!(
            format!("{}", Redacted("john@example.com")),
            "j***@example.com"
        );
    }

    #[test]
    fn redacts_plain_string() {
        assert_eq!(format!("{}", Redacted("07700900123")), "07***");
    }

    #[test]
    fn short_values_do_not_panic() {
        assert_eq!(format!("{}", Redacted("a")), "a***");
        assert_eq!(format!("{}", Redacted("")), "***");
    }
}
