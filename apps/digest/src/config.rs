/// Application configuration loaded from environment variables.
///
/// Nothing here is required: without an API key the run still writes the
/// card list and skips resume-point generation.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }
}

/// Unset and blank variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_env_blank_is_absent() {
        std::env::set_var("DIGEST_TEST_BLANK_VAR", "   ");
        assert_eq!(optional_env("DIGEST_TEST_BLANK_VAR"), None);
    }

    #[test]
    fn test_optional_env_trims_value() {
        std::env::set_var("DIGEST_TEST_SET_VAR", " sk-test \n");
        assert_eq!(
            optional_env("DIGEST_TEST_SET_VAR").as_deref(),
            Some("sk-test")
        );
    }

    #[test]
    fn test_optional_env_unset_is_absent() {
        assert_eq!(optional_env("DIGEST_TEST_NEVER_SET_VAR"), None);
    }
}
