//! Property tests for normalization, schema comparison, and scoring.

use accord_analysis::matching::{match_confidence, normalize_path, normalize_url, PathMatcher};
use accord_analysis::schema::compare;
use accord_analysis::{MismatchKind, SchemaKind, TypeSchema};
use proptest::prelude::*;

fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}"
}

fn literal() -> impl Strategy<Value = String> {
    "[a-z0-9][a-z0-9-]{0,6}"
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Param(String),
}

fn segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        literal().prop_map(Segment::Literal),
        ident().prop_map(Segment::Param),
    ]
}

fn render(segments: &[Segment], style: u8) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Param(name) => match style {
                0 => out.push_str(&format!(":{name}")),
                1 => out.push_str(&format!("{{{name}}}")),
                2 => out.push_str(&format!("<{name}>")),
                _ => out.push_str(&format!("${{{name}}}")),
            },
        }
    }
    out
}

fn leaf() -> impl Strategy<Value = TypeSchema> {
    prop_oneof![
        Just(TypeSchema::string()),
        Just(TypeSchema::number()),
        Just(TypeSchema::integer()),
        Just(TypeSchema::boolean()),
        Just(TypeSchema::null()),
        Just(TypeSchema::unknown()),
    ]
}

fn schema() -> impl Strategy<Value = TypeSchema> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(TypeSchema::array),
            prop::collection::btree_map(ident(), (inner, any::<bool>(), any::<bool>()), 0..4)
                .prop_map(|fields| {
                    fields
                        .into_iter()
                        .fold(TypeSchema::object_builder(), |builder, (name, (s, req, null))| {
                            let s = s.with_nullable(null);
                            if req {
                                builder.required(name, s)
                            } else {
                                builder.optional(name, s)
                            }
                        })
                        .build()
                }),
        ]
    })
}

proptest! {
    #[test]
    fn prop_normalize_path_is_idempotent(raw in "[ -~]{0,30}") {
        let once = normalize_path(&raw);
        prop_assert_eq!(normalize_path(&once), once.clone());
        prop_assert!(once.starts_with('/'));
        prop_assert!(!once.starts_with("//"));
        prop_assert!(once == "/" || !once.ends_with('/'));
    }

    #[test]
    fn prop_normalize_url_is_idempotent(raw in "[ -~]{0,30}") {
        let once = normalize_url(&raw);
        prop_assert_eq!(normalize_url(&once), once);
    }

    #[test]
    fn prop_placeholder_syntaxes_converge(segments in prop::collection::vec(segment(), 0..5)) {
        let colon = normalize_path(&render(&segments, 0));
        for style in 1..4 {
            prop_assert_eq!(normalize_path(&render(&segments, style)), colon.clone());
        }
    }

    #[test]
    fn prop_route_matches_its_own_concrete_urls(
        segments in prop::collection::vec(segment(), 0..5),
        value in literal(),
    ) {
        let template = render(&segments, 1);
        let url: String = if segments.is_empty() {
            "/".to_string()
        } else {
            segments
                .iter()
                .map(|s| match s {
                    Segment::Literal(text) => format!("/{text}"),
                    Segment::Param(_) => format!("/{value}"),
                })
                .collect()
        };

        let mut matcher = PathMatcher::new();
        matcher.add_endpoint("GET", &template);
        let found = matcher.match_request("GET", &url);
        prop_assert!(found.is_some());
        let confidence = found.map(|m| m.confidence).unwrap_or_default();
        prop_assert!((0.0..=1.0).contains(&confidence));
    }

    #[test]
    fn prop_confidence_is_bounded(a in "[ -~]{0,20}", b in "[ -~]{0,20}") {
        let c = match_confidence(&normalize_url(&a), &normalize_path(&b));
        prop_assert!((0.0..=1.0).contains(&c));
    }

    #[test]
    fn prop_identical_schemas_never_mismatch(s in schema()) {
        prop_assert!(compare(Some(&s), Some(&s), "$").is_empty());
    }

    #[test]
    fn prop_absent_sides_are_symmetric(s in schema()) {
        let only_backend = compare(Some(&s), None, "$");
        let only_frontend = compare(None, Some(&s), "$");
        prop_assert_eq!(only_backend.len(), 1);
        prop_assert_eq!(only_frontend.len(), 1);
        prop_assert_eq!(only_backend[0].kind, MismatchKind::MissingInFrontend);
        prop_assert_eq!(only_frontend[0].kind, MismatchKind::MissingInBackend);
        prop_assert_eq!(&only_backend[0].backend_type, &only_frontend[0].frontend_type);
    }

    #[test]
    fn prop_any_absorbs_its_node(s in schema()) {
        prop_assert!(compare(Some(&TypeSchema::any()), Some(&s), "$").is_empty());
        prop_assert!(compare(Some(&s), Some(&TypeSchema::any()), "$").is_empty());
    }

    #[test]
    fn prop_mismatch_severity_follows_kind(a in schema(), b in schema()) {
        for mismatch in compare(Some(&a), Some(&b), "$") {
            prop_assert_eq!(mismatch.severity, mismatch.kind.severity());
            prop_assert!(mismatch.field_path.starts_with('$'));
        }
    }
}

#[test]
fn test_numeric_kinds_widen_both_ways() {
    let number = TypeSchema::number();
    let integer = TypeSchema::integer();
    assert!(compare(Some(&number), Some(&integer), "$").is_empty());
    assert!(compare(Some(&integer), Some(&number), "$").is_empty());
    assert!(SchemaKind::Integer.is_compatible_with(SchemaKind::Number));
}
