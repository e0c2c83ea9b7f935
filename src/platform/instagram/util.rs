use std::sync::LazyLock;

use regex::Regex;

use super::InstagramError;

static INSTAGRAM_USERNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9._]*[^.]$|^[A-Za-z0-9]$").expect("Failed to create Instagram username regex")
});

pub fn validate_instagram_username(username: &str) -> bool {
    INSTAGRAM_USERNAME_REGEX.is_match(username)
}

pub fn normalize_instagram_username(input: &str) -> String {
    // escaped underscores come from markdown-aware terminals and chats
    input.replace("\\_", "_").trim().to_string()
}

/// Cleans a profile argument (`@name`, profile URL or bare name) down to the
/// username used in the feed URL.
pub fn process_instagram_username(input: &str) -> Result<String, InstagramError> {
    let normalized = normalize_instagram_username(input);
    let cleaned = normalized.trim();

    let username = if let Some(name) = cleaned.strip_prefix('@') {
        name
    } else if let Some((_, rest)) = cleaned.split_once("instagram.com/") {
        rest.split(['?', '/']).next().unwrap_or(rest)
    } else {
        cleaned
    };

    let username = username.trim();

    if username.is_empty() {
        return Err(InstagramError::InvalidUsername("Username cannot be empty".into()));
    }

    if !validate_instagram_username(username) {
        return Err(InstagramError::InvalidUsername(format!(
            "Invalid Instagram username format: {}",
            username
        )));
    }

    Ok(username.to_string())
}
