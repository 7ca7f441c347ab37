//! Origin validation for a loopback-bound transport.
//!
//! Browsers can be tricked into sending requests to 127.0.0.1 through DNS
//! rebinding; rejecting non-loopback origins before any message processing
//! closes that hole. Non-browser clients send no Origin header at all and
//! are always allowed.

const ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:8080",
    "http://127.0.0.1:8080",
    "http://localhost",
    "http://127.0.0.1",
    // File-based pages and some tooling send a literal null origin.
    "null",
];

const ALLOWED_PREFIXES: &[&str] = &["http://localhost:", "http://127.0.0.1:"];

/// Allow/deny policy for the `Origin` request header.
#[derive(Debug, Clone, Default)]
pub struct OriginPolicy {
    extra: Vec<String>,
}

impl OriginPolicy {
    /// Policy extended with additional exact-match origins from config.
    pub fn new(extra: Vec<String>) -> Self {
        Self { extra }
    }

    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        let Some(origin) = origin else {
            return true;
        };

        if ALLOWED_ORIGINS.contains(&origin) || self.extra.iter().any(|o| o == origin) {
            return true;
        }

        ALLOWED_PREFIXES
            .iter()
            .any(|prefix| origin.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_origin_is_allowed() {
        assert!(OriginPolicy::default().is_allowed(None));
    }

    #[test]
    fn loopback_origins_are_allowed() {
        let policy = OriginPolicy::default();
        assert!(policy.is_allowed(Some("http://localhost:8080")));
        assert!(policy.is_allowed(Some("http://127.0.0.1:9999")));
        assert!(policy.is_allowed(Some("http://localhost")));
        assert!(policy.is_allowed(Some("null")));
    }

    #[test]
    fn remote_origins_are_denied() {
        let policy = OriginPolicy::default();
        assert!(!policy.is_allowed(Some("http://evil.example.com")));
        assert!(!policy.is_allowed(Some("https://localhost:8080")));
        assert!(!policy.is_allowed(Some("http://localhost.evil.com")));
    }

    #[test]
    fn configured_extra_origins_are_exact_matches() {
        let policy = OriginPolicy::new(vec!["https://app.internal".to_string()]);
        assert!(policy.is_allowed(Some("https://app.internal")));
        assert!(!policy.is_allowed(Some("https://app.internal.evil.com")));
    }
}
