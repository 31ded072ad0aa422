//! Path matcher: normalizes route templates and call URLs, compiles them to
//! anchored patterns, and scores method + path matches.

pub mod confidence;
pub mod matcher;
pub mod normalize;
pub mod pattern;

pub use confidence::match_confidence;
pub use matcher::{
    methods_compatible, CallSite, EndpointMatch, MatchableEndpoint, MatcherOptions, PathMatcher,
};
pub use normalize::{normalize_method, normalize_path, normalize_url};
pub use pattern::compile_pattern;
