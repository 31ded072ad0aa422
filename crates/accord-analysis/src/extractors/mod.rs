//! Extractor registry.
//!
//! Source extraction lives outside this crate. Hosts implement
//! `FactExtractor` per language/framework, register each one once at startup
//! on an `ExtractorRegistry`, and feed the resulting facts to the analyzer.

use serde::{Deserialize, Serialize};

use crate::contracts::{CallInput, EndpointInput};

/// Flat structural facts pulled out of one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedFacts {
    pub endpoints: Vec<EndpointInput>,
    pub calls: Vec<CallInput>,
}

impl ExtractedFacts {
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty() && self.calls.is_empty()
    }

    pub fn extend(&mut self, other: ExtractedFacts) {
        self.endpoints.extend(other.endpoints);
        self.calls.extend(other.calls);
    }
}

/// Pulls endpoints and call sites out of source files.
pub trait FactExtractor: Send + Sync {
    /// Stable identifier (e.g., "express", "fetch").
    fn id(&self) -> &str;
    /// Languages this extractor understands.
    fn supported_languages(&self) -> &[&str];
    /// Whether this extractor applies to the given file.
    fn can_extract(&self, file_path: &str, content: &str) -> bool;
    fn extract(&self, file_path: &str, content: &str) -> ExtractedFacts;
}

/// An explicit, host-owned set of extractors.
#[derive(Default)]
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn FactExtractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an extractor. A second extractor with an already-registered id
    /// replaces the first.
    pub fn register(&mut self, extractor: Box<dyn FactExtractor>) {
        if let Some(slot) = self
            .extractors
            .iter_mut()
            .find(|existing| existing.id() == extractor.id())
        {
            tracing::debug!(id = extractor.id(), "replacing registered extractor");
            *slot = extractor;
        } else {
            self.extractors.push(extractor);
        }
    }

    /// Run every extractor that claims the file and merge their facts.
    pub fn extract_all(&self, file_path: &str, content: &str) -> ExtractedFacts {
        let mut facts = ExtractedFacts::default();
        for extractor in self
            .extractors
            .iter()
            .filter(|e| e.can_extract(file_path, content))
        {
            facts.extend(extractor.extract(file_path, content));
        }
        facts
    }

    /// Extractors that declare support for `language`.
    pub fn for_language<'a>(
        &'a self,
        language: &'a str,
    ) -> impl Iterator<Item = &'a dyn FactExtractor> + 'a {
        self.extractors
            .iter()
            .filter(move |e| e.supported_languages().iter().any(|l| *l == language))
            .map(|e| e.as_ref())
    }

    pub fn ids(&self) -> Vec<&str> {
        self.extractors.iter().map(|e| e.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("extractors", &self.ids())
            .finish()
    }
}
