//! Deterministic path-match confidence.

use accord_core::constants::{
    MATCH_BASE_CONFIDENCE, MATCH_EXACT_CONFIDENCE, MATCH_SEGMENT_COUNT_PENALTY,
    MATCH_STATIC_SEGMENT_BONUS,
};

use super::normalize::{is_param_segment, segments};

/// Confidence that `url` belongs to `endpoint_path`, given that the
/// endpoint's pattern already matched. Both inputs are normalized.
///
/// Verbatim equality scores 1.0. Otherwise start at 0.8, subtract 0.1 when
/// the segment counts differ, and add up to 0.1 for static segments that
/// match literally at the same position. Clamped to `[0, 1]`.
pub fn match_confidence(url: &str, endpoint_path: &str) -> f64 {
    if url == endpoint_path {
        return MATCH_EXACT_CONFIDENCE;
    }

    let url_segments = segments(url);
    let endpoint_segments = segments(endpoint_path);

    let mut score = MATCH_BASE_CONFIDENCE;
    if url_segments.len() != endpoint_segments.len() {
        score -= MATCH_SEGMENT_COUNT_PENALTY;
    }

    let static_positions: Vec<(usize, &str)> = endpoint_segments
        .iter()
        .enumerate()
        .filter(|(_, seg)| !is_param_segment(seg))
        .map(|(i, seg)| (i, *seg))
        .collect();

    if !static_positions.is_empty() {
        let literal_hits = static_positions
            .iter()
            .filter(|(i, seg)| url_segments.get(*i) == Some(seg))
            .count();
        score += MATCH_STATIC_SEGMENT_BONUS * literal_hits as f64 / static_positions.len() as f64;
    }

    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_one() {
        assert_eq!(match_confidence("/api/users", "/api/users"), 1.0);
        assert_eq!(match_confidence("/", "/"), 1.0);
    }

    #[test]
    fn test_param_match_with_all_statics() {
        let c = match_confidence("/api/users/123", "/api/users/:id");
        assert!((c - 0.9).abs() < 1e-9, "got {c}");
    }

    #[test]
    fn test_all_param_endpoint() {
        let c = match_confidence("/anything", "/:slug");
        assert!((c - 0.8).abs() < 1e-9, "got {c}");
    }

    #[test]
    fn test_segment_count_penalty() {
        let c = match_confidence("/x/b", "/a");
        assert!((c - 0.7).abs() < 1e-9, "got {c}");
        let c = match_confidence("/a/b", "/a");
        assert!((c - 0.8).abs() < 1e-9, "got {c}");
    }
}
