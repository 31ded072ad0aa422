//! Compilation of normalized route templates into anchored regexes.

use accord_core::errors::PatternError;
use regex::Regex;

use super::normalize::{tokenize, TemplateToken};

/// One path segment, no slash.
const PARAM_CAPTURE: &str = "([^/]+)";

/// Compile a normalized template: each placeholder becomes a one-segment
/// wildcard, everything else matches literally, and the whole URL must match.
pub fn compile_pattern(normalized_path: &str) -> Result<Regex, PatternError> {
    let mut source = String::with_capacity(normalized_path.len() + 16);
    source.push('^');
    for token in tokenize(normalized_path) {
        match token {
            TemplateToken::Literal(text) => source.push_str(&regex::escape(&text)),
            TemplateToken::Param(_) => source.push_str(PARAM_CAPTURE),
        }
    }
    source.push('$');

    Regex::new(&source).map_err(|e| PatternError::InvalidRegex {
        path: normalized_path.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_matches_single_segment() {
        let re = compile_pattern("/api/users/:id").unwrap();
        assert_eq!(re.as_str(), "^/api/users/([^/]+)$");
        assert!(re.is_match("/api/users/123"));
        assert!(!re.is_match("/api/users/123/posts"));
        assert!(!re.is_match("/api/users/"));
    }

    #[test]
    fn test_literals_are_escaped() {
        let re = compile_pattern("/files/:name.json").unwrap();
        assert!(re.is_match("/files/report.json"));
        assert!(!re.is_match("/files/reportxjson"));
    }
}
