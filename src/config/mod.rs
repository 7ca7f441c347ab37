//! Configuration loading and resolution.

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Resolve the listen address: explicit flag, then `MCP_HTTP_ADDR`, then
/// the loopback default. The transport is meant to be bound to a local
/// interface; the origin policy assumes as much.
pub fn resolve_bind_addr(explicit: Option<&str>) -> String {
    if let Some(addr) = explicit {
        return addr.to_string();
    }

    if let Ok(env_addr) = std::env::var("MCP_HTTP_ADDR") {
        return env_addr;
    }

    DEFAULT_ADDR.to_string()
}

/// Extra exact-match origins, combined from flags and the comma-separated
/// `MCP_ALLOWED_ORIGINS` environment variable.
pub fn resolve_allowed_origins(mut explicit: Vec<String>) -> Vec<String> {
    if let Ok(env_origins) = std::env::var("MCP_ALLOWED_ORIGINS") {
        explicit.extend(
            env_origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned),
        );
    }

    explicit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_addr_wins() {
        assert_eq!(resolve_bind_addr(Some("0.0.0.0:9000")), "0.0.0.0:9000");
    }

    #[test]
    fn explicit_origins_are_kept() {
        let origins = resolve_allowed_origins(vec!["https://app.internal".into()]);
        assert!(origins.contains(&"https://app.internal".to_string()));
    }
}
