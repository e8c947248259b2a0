//! Username extraction from profile URLs

use persona_core::AnalysisError;
use regex::Regex;
use std::sync::OnceLock;

static PROFILE_URL_RE: OnceLock<Regex> = OnceLock::new();
static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

/// Reddit usernames are 3 to 20 letters, digits, `_` or `-`
fn is_valid_username(name: &str) -> bool {
    USERNAME_RE
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{3,20}$").unwrap())
        .is_match(name)
}

/// Accept a bare username or a `reddit.com/user/<name>` / `reddit.com/u/<name>` URL
pub fn extract_username(input: &str) -> Result<String, AnalysisError> {
    let input = input.trim();
    let re = PROFILE_URL_RE
        .get_or_init(|| Regex::new(r"reddit\.com/(?:user|u)/([^/?#\s]+)").unwrap());

    let candidate = match re.captures(input) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        None if !input.contains("reddit.com") => input,
        None => "",
    };

    if is_valid_username(candidate) {
        Ok(candidate.to_string())
    } else {
        Err(AnalysisError::InvalidProfile(input.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_username() {
        assert_eq!(extract_username("spez").unwrap(), "spez");
        assert_eq!(extract_username("  spez \n").unwrap(), "spez");
    }

    #[test]
    fn test_profile_urls() {
        for url in [
            "https://www.reddit.com/user/kojied/",
            "https://reddit.com/u/kojied",
            "www.reddit.com/user/kojied/comments/",
            "https://old.reddit.com/user/kojied?sort=top",
        ] {
            assert_eq!(extract_username(url).unwrap(), "kojied", "{url}");
        }
    }

    #[test]
    fn test_unrecognized_urls_rejected() {
        for input in ["https://reddit.com/r/rust", "example.com/someone", ""] {
            assert!(matches!(
                extract_username(input),
                Err(AnalysisError::InvalidProfile(_))
            ));
        }
    }

    #[test]
    fn test_username_characters_checked() {
        assert_eq!(extract_username("Old-Timer_42").unwrap(), "Old-Timer_42");
        assert_eq!(extract_username("abc").unwrap(), "abc");
        assert_eq!(extract_username(&"x".repeat(20)).unwrap(), "x".repeat(20));

        for input in [
            "spez?x",
            "a b",
            "ab",
            "u/spez",
            "name.with.dots",
            "x".repeat(21).as_str(),
            "https://reddit.com/user/bad%20name",
            "https://reddit.com/u/ab",
        ] {
            assert!(
                matches!(extract_username(input), Err(AnalysisError::InvalidProfile(_))),
                "{input}"
            );
        }
    }
}
