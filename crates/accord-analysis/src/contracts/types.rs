//! Contract tracking types: analysis inputs, contracts, and run results.

use std::collections::BTreeMap;

use accord_core::types::{CallId, ContractId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::matching::CallSite;
use crate::schema::{FieldMismatch, TypeSchema};

/// A backend route as reported by an extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointInput {
    pub method: String,
    /// Route template using `:name`, `{name}` or `<name>` placeholders.
    pub path: String,
    pub file: String,
    pub line: u32,
    #[serde(default)]
    pub handler: String,
    /// Framework that declared the route (e.g., "express", "fastapi").
    #[serde(default)]
    pub framework: String,
    #[serde(default)]
    pub request_schema: Option<TypeSchema>,
    #[serde(default)]
    pub response_schema: Option<TypeSchema>,
}

/// A frontend call site as reported by an extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallInput {
    /// Empty when the method could not be determined statically.
    #[serde(default)]
    pub method: String,
    pub url: String,
    pub file: String,
    pub line: u32,
    #[serde(default)]
    pub is_dynamic: bool,
    /// Variable names interpolated into the URL.
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default)]
    pub expected_schema: Option<TypeSchema>,
}

impl CallSite for CallInput {
    fn method(&self) -> &str {
        &self.method
    }

    fn url(&self) -> &str {
        &self.url
    }
}

/// Backend side of a contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendEndpoint {
    pub method: String,
    pub path: String,
    pub file: String,
    pub line: u32,
    pub handler: String,
    pub framework: String,
    pub request_schema: Option<TypeSchema>,
    pub response_schema: Option<TypeSchema>,
}

/// One frontend call site resolved to a contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendCall {
    pub id: CallId,
    pub method: String,
    pub url: String,
    pub file: String,
    pub line: u32,
    pub is_dynamic: bool,
    pub variables: Vec<String>,
    /// Path match confidence for this call.
    pub match_confidence: f64,
    /// Path parameters bound from the URL.
    pub params: BTreeMap<String, String>,
    pub expected_schema: Option<TypeSchema>,
}

/// Contract lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Discovered,
    Mismatch,
    /// Set outside the analyzer.
    Verified,
    /// Set outside the analyzer.
    Ignored,
}

impl ContractStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Mismatch => "mismatch",
            Self::Verified => "verified",
            Self::Ignored => "ignored",
        }
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One backend endpoint bound to every frontend call resolved to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub method: String,
    /// Normalized endpoint path.
    pub endpoint_path: String,
    /// Anchored regex the path compiled to.
    pub path_pattern: String,
    pub backend: BackendEndpoint,
    pub frontend_calls: Vec<FrontendCall>,
    pub mismatches: Vec<FieldMismatch>,
    pub status: ContractStatus,
    /// How sure we are that these calls belong to this endpoint.
    pub confidence: f64,
    /// How healthy the contract is; drops with every mismatch.
    pub health: f64,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Contract {
    pub fn has_mismatches(&self) -> bool {
        !self.mismatches.is_empty()
    }
}

/// A backend endpoint no call resolved to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmatchedEndpoint {
    pub method: String,
    pub path: String,
    pub file: String,
    pub line: u32,
    pub framework: String,
}

/// A frontend call that resolved to no endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmatchedCall {
    pub method: String,
    pub url: String,
    pub file: String,
    pub line: u32,
    pub is_dynamic: bool,
}

/// Everything one analysis run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub contracts: Vec<Contract>,
    pub unmatched_backend: Vec<UnmatchedEndpoint>,
    pub unmatched_frontend: Vec<UnmatchedCall>,
    pub total_mismatches: usize,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn empty() -> Self {
        Self {
            contracts: Vec::new(),
            unmatched_backend: Vec::new(),
            unmatched_frontend: Vec::new(),
            total_mismatches: 0,
            analyzed_at: Utc::now(),
        }
    }

    /// Find the contract for a method and (unnormalized) path.
    pub fn contract_for(&self, method: &str, path: &str) -> Option<&Contract> {
        let method = crate::matching::normalize_method(method);
        let path = crate::matching::normalize_path(path);
        self.contracts
            .iter()
            .find(|c| c.method == method && c.endpoint_path == path)
    }
}
