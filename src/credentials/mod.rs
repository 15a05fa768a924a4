use std::fmt;

/// Environment variable GitHub tooling conventionally reads a token from
pub const ENV_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Tool-specific override, checked when `GITHUB_TOKEN` is unset
pub const ENV_FALLBACK_TOKEN_VAR: &str = "PR_REVIEW_TIME_GH_TOKEN";

#[derive(Debug, PartialEq, Eq)]
pub enum CredentialError {
    TokenNotFound,
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::TokenNotFound => write!(
                f,
                "{} environment variable is required (or set {})",
                ENV_TOKEN_VAR, ENV_FALLBACK_TOKEN_VAR
            ),
        }
    }
}

impl std::error::Error for CredentialError {}

/// Trimmed, non-empty value of an environment variable
fn non_empty_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(val) => {
            let trimmed = val.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

/// Pick the token from already-read variable values.
fn select_token(
    primary: Option<String>,
    fallback: Option<String>,
) -> Result<String, CredentialError> {
    primary.or(fallback).ok_or(CredentialError::TokenNotFound)
}

/// Read the GitHub token from the environment.
pub fn get_token() -> Result<String, CredentialError> {
    select_token(
        non_empty_var(ENV_TOKEN_VAR),
        non_empty_var(ENV_FALLBACK_TOKEN_VAR),
    )
}
