//! Method + path matching of call URLs against registered route templates.

use std::collections::BTreeMap;

use accord_core::constants::{DEFAULT_MIN_MATCH_CONFIDENCE, METHOD_ANY, METHOD_USE};
use accord_core::config::MatchingConfig;
use accord_core::types::collections::SmallVec4;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::confidence::match_confidence;
use super::normalize::{normalize_method, normalize_path, normalize_url, param_names};
use super::pattern::compile_pattern;

/// A registered endpoint, ready for matching.
#[derive(Debug, Clone)]
pub struct MatchableEndpoint {
    /// Upper-cased method.
    pub method: String,
    pub path: String,
    pub pattern: Regex,
    pub param_names: SmallVec4<String>,
    /// Registration order; ties between equal-confidence matches go to the lowest.
    pub index: usize,
}

/// The outcome of matching one call against one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointMatch {
    pub endpoint_method: String,
    pub endpoint_path: String,
    /// The normalized URL that matched.
    pub url: String,
    pub confidence: f64,
    pub params: BTreeMap<String, String>,
    pub endpoint_index: usize,
}

impl EndpointMatch {
    /// `METHOD:path` key of the matched endpoint.
    pub fn endpoint_key(&self) -> String {
        format!("{}:{}", self.endpoint_method, self.endpoint_path)
    }
}

/// Anything with a method and a URL that can be matched.
pub trait CallSite {
    fn method(&self) -> &str;
    fn url(&self) -> &str;
}

impl CallSite for (&str, &str) {
    fn method(&self) -> &str {
        self.0
    }

    fn url(&self) -> &str {
        self.1
    }
}

/// Matcher tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherOptions {
    /// Matches scoring below this floor are dropped.
    pub min_confidence: f64,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_MATCH_CONFIDENCE,
        }
    }
}

impl From<&MatchingConfig> for MatcherOptions {
    fn from(config: &MatchingConfig) -> Self {
        Self {
            min_confidence: config.effective_min_confidence(),
        }
    }
}

/// Whether a backend method accepts a call method. Both are normalized.
pub fn methods_compatible(endpoint_method: &str, call_method: &str) -> bool {
    endpoint_method == call_method
        || endpoint_method == METHOD_ANY
        || call_method == METHOD_ANY
        || endpoint_method == METHOD_USE
}

/// Holds the compiled endpoints of one analysis run.
#[derive(Debug, Clone, Default)]
pub struct PathMatcher {
    endpoints: Vec<MatchableEndpoint>,
    options: MatcherOptions,
}

impl PathMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: MatcherOptions) -> Self {
        Self {
            endpoints: Vec::new(),
            options,
        }
    }

    /// Register an endpoint. Returns its registration index, or `None` if the
    /// template did not compile (the endpoint is skipped).
    pub fn add_endpoint(&mut self, method: &str, path: &str) -> Option<usize> {
        let path = normalize_path(path);
        let pattern = match compile_pattern(&path) {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::warn!(error = %e, "skipping endpoint with uncompilable route");
                return None;
            }
        };

        let index = self.endpoints.len();
        self.endpoints.push(MatchableEndpoint {
            method: normalize_method(method),
            param_names: param_names(&path),
            path,
            pattern,
            index,
        });
        Some(index)
    }

    pub fn endpoints(&self) -> &[MatchableEndpoint] {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// The highest-confidence match for a call; the first registered endpoint
    /// wins a tie.
    pub fn match_request(&self, method: &str, url: &str) -> Option<EndpointMatch> {
        let mut best: Option<EndpointMatch> = None;
        for candidate in self.candidates(method, url) {
            if best
                .as_ref()
                .map_or(true, |current| candidate.confidence > current.confidence)
            {
                best = Some(candidate);
            }
        }
        best
    }

    /// Every compatible match, in registration order.
    pub fn match_all(&self, method: &str, url: &str) -> Vec<EndpointMatch> {
        self.candidates(method, url).collect()
    }

    /// Endpoints that are not the best match of any call.
    pub fn find_unmatched_endpoints<C: CallSite>(&self, calls: &[C]) -> Vec<&MatchableEndpoint> {
        let mut hit = vec![false; self.endpoints.len()];
        for call in calls {
            if let Some(m) = self.match_request(call.method(), call.url()) {
                hit[m.endpoint_index] = true;
            }
        }
        self.endpoints
            .iter()
            .filter(|endpoint| !hit[endpoint.index])
            .collect()
    }

    /// Calls that match no endpoint at all.
    pub fn find_unmatched_calls<'c, C: CallSite>(&self, calls: &'c [C]) -> Vec<&'c C> {
        calls
            .iter()
            .filter(|call| self.match_request(call.method(), call.url()).is_none())
            .collect()
    }

    fn candidates<'a>(
        &'a self,
        method: &str,
        url: &str,
    ) -> impl Iterator<Item = EndpointMatch> + 'a {
        let method = normalize_method(method);
        let url = normalize_url(url);
        let min_confidence = self.options.min_confidence;

        self.endpoints
            .iter()
            .filter(move |endpoint| methods_compatible(&endpoint.method, &method))
            .filter_map(move |endpoint| {
                if !endpoint.pattern.is_match(&url) {
                    return None;
                }
                let confidence = match_confidence(&url, &endpoint.path);
                if confidence < min_confidence {
                    return None;
                }
                Some(EndpointMatch {
                    endpoint_method: endpoint.method.clone(),
                    endpoint_path: endpoint.path.clone(),
                    params: extract_params(endpoint, &url),
                    url: url.clone(),
                    confidence,
                    endpoint_index: endpoint.index,
                })
            })
    }
}

/// Bind placeholder names to the pattern's capture groups, which follow
/// declaration order one-to-one.
fn extract_params(endpoint: &MatchableEndpoint, url: &str) -> BTreeMap<String, String> {
    let Some(captures) = endpoint.pattern.captures(url) else {
        return BTreeMap::new();
    };
    endpoint
        .param_names
        .iter()
        .zip(captures.iter().skip(1))
        .filter_map(|(name, value)| Some((name.clone(), value?.as_str().to_string())))
        .collect()
}
