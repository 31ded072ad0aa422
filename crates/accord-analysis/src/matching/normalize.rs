//! Canonical forms for HTTP methods, route templates, and call URLs.
//!
//! Every placeholder syntax collapses to `:name`:
//! `:name`, `{name}`, `${name}`, `<name>`, plus the typed variants
//! `{name:int}` and `<int:name>`.

use accord_core::constants::METHOD_ANY;
use accord_core::types::collections::SmallVec4;

/// A piece of a route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    Literal(String),
    Param(String),
}

/// Upper-case a method; an empty or unknown method becomes `ANY`.
pub fn normalize_method(method: &str) -> String {
    let method = method.trim();
    if method.is_empty() {
        METHOD_ANY.to_string()
    } else {
        method.to_ascii_uppercase()
    }
}

/// Normalize a route template: `:name` placeholders, exactly one leading
/// slash, no trailing slash (except the root `/`).
pub fn normalize_path(path: &str) -> String {
    let rendered = render(&tokenize(path.trim()));
    let mut normalized = format!("/{}", rendered.trim_start_matches('/'));
    let trimmed_len = normalized
        .trim_end_matches(|c: char| c == '/' || c.is_whitespace())
        .len();
    normalized.truncate(trimmed_len);
    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}

/// Normalize a call URL: drop any fragment, query string, and
/// `scheme://host` origin, then normalize the remaining path.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    let url = url.split(['?', '#']).next().unwrap_or_default();
    normalize_path(strip_origin(url))
}

fn strip_origin(url: &str) -> &str {
    if let Some((scheme, rest)) = url.split_once("://") {
        let is_scheme = !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if is_scheme {
            return rest.find('/').map_or("/", |idx| &rest[idx..]);
        }
    }
    url
}

/// Non-empty `/`-delimited segments.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Whether a normalized segment is a `:name` placeholder.
pub fn is_param_segment(segment: &str) -> bool {
    segment
        .strip_prefix(':')
        .and_then(|rest| rest.chars().next())
        .is_some_and(is_ident_start)
}

/// Placeholder names of a template, in declaration order.
pub fn param_names(path: &str) -> SmallVec4<String> {
    tokenize(path)
        .into_iter()
        .filter_map(|token| match token {
            TemplateToken::Param(name) => Some(name),
            TemplateToken::Literal(_) => None,
        })
        .collect()
}

/// Split a template into literal runs and placeholders.
pub fn tokenize(path: &str) -> Vec<TemplateToken> {
    let chars: Vec<char> = path.chars().collect();
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        let placeholder = match chars[i] {
            ':' => scan_colon(&chars, i),
            '{' => scan_braced(&chars, i + 1),
            '$' if chars.get(i + 1) == Some(&'{') => scan_braced(&chars, i + 2),
            '<' => scan_angled(&chars, i + 1),
            _ => None,
        }
        // `{a}b` would render as `:ab`, so a delimited placeholder glued to
        // identifier characters stays literal.
        .filter(|(_, next)| {
            chars[i] == ':' || !chars.get(*next).copied().is_some_and(is_ident_continue)
        });

        match placeholder {
            Some((name, next)) => {
                if !literal.is_empty() {
                    tokens.push(TemplateToken::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(TemplateToken::Param(name));
                i = next;
            }
            None => {
                literal.push(chars[i]);
                i += 1;
            }
        }
    }

    if !literal.is_empty() {
        tokens.push(TemplateToken::Literal(literal));
    }
    tokens
}

fn render(tokens: &[TemplateToken]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            TemplateToken::Literal(text) => out.push_str(text),
            TemplateToken::Param(name) => {
                out.push(':');
                out.push_str(name);
            }
        }
    }
    out
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Read an identifier at `start`; returns it and the index after it.
fn scan_ident(chars: &[char], start: usize) -> Option<(String, usize)> {
    let first = *chars.get(start)?;
    if !is_ident_start(first) {
        return None;
    }
    let end = chars[start..]
        .iter()
        .position(|c| !is_ident_continue(*c))
        .map_or(chars.len(), |offset| start + offset);
    Some((chars[start..end].iter().collect(), end))
}

/// `:name`
fn scan_colon(chars: &[char], colon: usize) -> Option<(String, usize)> {
    scan_ident(chars, colon + 1)
}

/// `{name}` or `{name:constraint}`; `start` is just past the opening brace.
fn scan_braced(chars: &[char], start: usize) -> Option<(String, usize)> {
    let (name, after) = scan_ident(chars, start)?;
    match chars.get(after)? {
        '}' => Some((name, after + 1)),
        ':' => {
            let close = chars[after..].iter().position(|c| *c == '}')? + after;
            if chars[after..close].contains(&'/') {
                return None;
            }
            Some((name, close + 1))
        }
        _ => None,
    }
}

/// `<name>` or `<converter:name>`; `start` is just past the `<`.
fn scan_angled(chars: &[char], start: usize) -> Option<(String, usize)> {
    let (first, after) = scan_ident(chars, start)?;
    match chars.get(after)? {
        '>' => Some((first, after + 1)),
        ':' => {
            let (name, end) = scan_ident(chars, after + 1)?;
            (chars.get(end) == Some(&'>')).then_some((name, end + 1))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_syntaxes_converge() {
        assert_eq!(normalize_path("/x/{name}"), "/x/:name");
        assert_eq!(normalize_path("/x/:name"), "/x/:name");
        assert_eq!(normalize_path("/x/<name>"), "/x/:name");
        assert_eq!(normalize_path("/x/${name}"), "/x/:name");
        assert_eq!(normalize_path("/x/<int:name>"), "/x/:name");
        assert_eq!(normalize_path("/x/{name:int}"), "/x/:name");
    }

    #[test]
    fn test_slashes() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("api/users"), "/api/users");
        assert_eq!(normalize_path("/api/users/"), "/api/users");
        assert_eq!(normalize_path("/api/users//"), "/api/users");
        assert_eq!(normalize_path("//api/users"), "/api/users");
        assert_eq!(normalize_path("///"), "/");
        assert_eq!(normalize_path(&normalize_path("//api//users")), "/api//users");
    }

    #[test]
    fn test_glued_placeholder_stays_literal() {
        assert_eq!(normalize_path("/x/{a}b"), "/x/{a}b");
        assert_eq!(normalize_path(&normalize_path("/x/{a}b")), "/x/{a}b");
        assert_eq!(normalize_path("/files/{name}.json"), "/files/:name.json");
    }

    #[test]
    fn test_non_identifier_colon_is_literal() {
        assert_eq!(normalize_path("/time/12:30"), "/time/12:30");
        assert!(param_names("/time/12:30").is_empty());
    }

    #[test]
    fn test_param_names_in_order() {
        let names = param_names("/orgs/{org}/repos/:repo/<int:issue>");
        assert_eq!(names.as_slice(), ["org", "repo", "issue"]);
    }

    #[test]
    fn test_normalize_url_strips_origin_and_query() {
        assert_eq!(normalize_url("https://api.example.com/v1/users?page=2"), "/v1/users");
        assert_eq!(normalize_url("/api/users#top"), "/api/users");
        assert_eq!(normalize_url("http://localhost:3000"), "/");
        assert_eq!(normalize_url("/redirect?to=http://x/y"), "/redirect");
        assert_eq!(normalize_url("https://api.example.com//v1/users"), "/v1/users");
    }

    #[test]
    fn test_normalize_method() {
        assert_eq!(normalize_method("get"), "GET");
        assert_eq!(normalize_method(""), "ANY");
        assert_eq!(normalize_method("  post "), "POST");
    }

    #[test]
    fn test_is_param_segment() {
        assert!(is_param_segment(":id"));
        assert!(!is_param_segment(":"));
        assert!(!is_param_segment(":1"));
        assert!(!is_param_segment("users"));
    }
}
