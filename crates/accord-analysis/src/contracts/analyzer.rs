//! Contract analyzer: resolves frontend calls to backend endpoints, groups
//! them into contracts, and diffs their schemas.

use accord_core::config::AccordConfig;
use accord_core::constants::DEFAULT_ROOT_MARKER;
use accord_core::errors::PatternError;
use accord_core::types::{CallId, ContractId, FxHashMap, FxHashSet};
use chrono::Utc;

use super::confidence::{contract_confidence, contract_health};
use super::types::*;
use crate::matching::{normalize_method, normalize_path, MatcherOptions, PathMatcher};
use crate::schema::compare;

/// Knobs for one analyzer.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Prefix of every mismatch field path.
    pub root_marker: String,
    /// Endpoints whose normalized path matches any of these are left out.
    pub ignore_endpoints: Vec<glob::Pattern>,
    pub report_unmatched_backend: bool,
    pub report_unmatched_frontend: bool,
    pub matcher: MatcherOptions,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            root_marker: DEFAULT_ROOT_MARKER.to_string(),
            ignore_endpoints: Vec::new(),
            report_unmatched_backend: true,
            report_unmatched_frontend: true,
            matcher: MatcherOptions::default(),
        }
    }
}

impl AnalysisOptions {
    /// Build options from resolved configuration.
    pub fn from_config(config: &AccordConfig) -> Result<Self, PatternError> {
        let ignore_endpoints = config
            .analysis
            .ignore_endpoints
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern).map_err(|e| PatternError::InvalidGlob {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            root_marker: config.analysis.effective_root_marker().to_string(),
            ignore_endpoints,
            report_unmatched_backend: config.analysis.effective_report_unmatched_backend(),
            report_unmatched_frontend: config.analysis.effective_report_unmatched_frontend(),
            matcher: MatcherOptions::from(&config.matching),
        })
    }

    fn is_ignored(&self, normalized_path: &str) -> bool {
        self.ignore_endpoints
            .iter()
            .any(|pattern| pattern.matches(normalized_path))
    }
}

/// Runs contract analysis over one batch of endpoints and calls.
///
/// Each run builds its own matcher and contract table, so one analyzer can
/// serve concurrent runs.
#[derive(Debug, Clone, Default)]
pub struct ContractAnalyzer {
    options: AnalysisOptions,
}

/// Identity of a call site within a run.
type CallSiteKey = (String, String, String, u32);

impl ContractAnalyzer {
    pub fn new(options: AnalysisOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &AccordConfig) -> Result<Self, PatternError> {
        AnalysisOptions::from_config(config).map(Self::new)
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Analyze one batch. Never fails: bad routes are skipped, missing
    /// schemas skip the comparison.
    #[tracing::instrument(skip_all, fields(endpoints = endpoints.len(), calls = calls.len()))]
    pub fn analyze(&self, endpoints: &[EndpointInput], calls: &[CallInput]) -> AnalysisResult {
        let analyzed_at = Utc::now();
        let mut matcher = PathMatcher::with_options(self.options.matcher);
        let mut index: FxHashMap<String, &EndpointInput> = FxHashMap::default();

        for endpoint in endpoints {
            let path = normalize_path(&endpoint.path);
            if self.options.is_ignored(&path) {
                tracing::debug!(
                    method = %endpoint.method,
                    path = %path,
                    "endpoint ignored by config"
                );
                continue;
            }
            if matcher.add_endpoint(&endpoint.method, &endpoint.path).is_some() {
                index
                    .entry(endpoint_key(&endpoint.method, &path))
                    .or_insert(endpoint);
            }
        }

        let mut contracts: Vec<Contract> = Vec::new();
        let mut contract_positions: FxHashMap<String, usize> = FxHashMap::default();
        let mut matched_keys: FxHashSet<String> = FxHashSet::default();
        let mut seen_calls: FxHashSet<CallSiteKey> = FxHashSet::default();
        let mut unmatched_frontend = Vec::new();

        for call in calls {
            let site = (
                normalize_method(&call.method),
                call.url.clone(),
                call.file.clone(),
                call.line,
            );
            if !seen_calls.insert(site) {
                tracing::debug!(file = %call.file, line = call.line, "duplicate call site skipped");
                continue;
            }

            let Some(found) = matcher.match_request(&call.method, &call.url) else {
                if self.options.report_unmatched_frontend {
                    unmatched_frontend.push(UnmatchedCall {
                        method: normalize_method(&call.method),
                        url: call.url.clone(),
                        file: call.file.clone(),
                        line: call.line,
                        is_dynamic: call.is_dynamic,
                    });
                }
                continue;
            };

            let key = found.endpoint_key();
            let Some(endpoint) = index.get(&key).copied() else {
                continue;
            };
            matched_keys.insert(key.clone());

            let position = *contract_positions.entry(key).or_insert_with(|| {
                let pattern = matcher.endpoints()[found.endpoint_index].pattern.as_str();
                contracts.push(new_contract(
                    &found.endpoint_method,
                    &found.endpoint_path,
                    pattern,
                    endpoint,
                    analyzed_at,
                ));
                contracts.len() - 1
            });
            let contract = &mut contracts[position];

            contract.frontend_calls.push(FrontendCall {
                id: CallId::generate(),
                method: normalize_method(&call.method),
                url: call.url.clone(),
                file: call.file.clone(),
                line: call.line,
                is_dynamic: call.is_dynamic,
                variables: call.variables.clone(),
                match_confidence: found.confidence,
                params: found.params,
                expected_schema: call.expected_schema.clone(),
            });

            if let (Some(response), Some(expected)) =
                (&contract.backend.response_schema, &call.expected_schema)
            {
                let found = compare(Some(response), Some(expected), &self.options.root_marker);
                contract.mismatches.extend(found);
            }
        }

        let mut unmatched_backend = Vec::new();
        if self.options.report_unmatched_backend {
            for endpoint in endpoints {
                let path = normalize_path(&endpoint.path);
                if self.options.is_ignored(&path) {
                    continue;
                }
                if !matched_keys.contains(&endpoint_key(&endpoint.method, &path)) {
                    unmatched_backend.push(UnmatchedEndpoint {
                        method: normalize_method(&endpoint.method),
                        path,
                        file: endpoint.file.clone(),
                        line: endpoint.line,
                        framework: endpoint.framework.clone(),
                    });
                }
            }
        }

        for contract in &mut contracts {
            if contract.has_mismatches() {
                contract.status = ContractStatus::Mismatch;
            }
            contract.confidence = contract_confidence(
                contract.frontend_calls.len(),
                contract.backend.response_schema.is_some(),
                contract.backend.request_schema.is_some(),
            );
            contract.health = contract_health(&contract.mismatches);
        }

        let total_mismatches = contracts.iter().map(|c| c.mismatches.len()).sum();

        tracing::info!(
            contracts = contracts.len(),
            unmatched_backend = unmatched_backend.len(),
            unmatched_frontend = unmatched_frontend.len(),
            total_mismatches,
            "contract analysis complete"
        );

        AnalysisResult {
            contracts,
            unmatched_backend,
            unmatched_frontend,
            total_mismatches,
            analyzed_at,
        }
    }
}

/// Analyze with default options.
pub fn analyze(endpoints: &[EndpointInput], calls: &[CallInput]) -> AnalysisResult {
    ContractAnalyzer::default().analyze(endpoints, calls)
}

fn endpoint_key(method: &str, normalized_path: &str) -> String {
    format!("{}:{}", normalize_method(method), normalized_path)
}

fn new_contract(
    method: &str,
    path: &str,
    pattern: &str,
    endpoint: &EndpointInput,
    seen_at: chrono::DateTime<Utc>,
) -> Contract {
    Contract {
        id: ContractId::for_endpoint(method, path),
        method: method.to_string(),
        endpoint_path: path.to_string(),
        path_pattern: pattern.to_string(),
        backend: BackendEndpoint {
            method: method.to_string(),
            path: path.to_string(),
            file: endpoint.file.clone(),
            line: endpoint.line,
            handler: endpoint.handler.clone(),
            framework: endpoint.framework.clone(),
            request_schema: endpoint.request_schema.clone(),
            response_schema: endpoint.response_schema.clone(),
        },
        frontend_calls: Vec::new(),
        mismatches: Vec::new(),
        status: ContractStatus::Discovered,
        confidence: 0.0,
        health: 1.0,
        first_seen: seen_at,
        last_seen: seen_at,
    }
}
