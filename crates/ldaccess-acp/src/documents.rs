//! Fetched policy and rule documents, keyed by document URL.

use std::collections::BTreeMap;

use ldaccess_model::url::strip_fragment;
use ldaccess_model::Graph;

/// The documents available while evaluating an ACR.
#[derive(Debug, Clone, Default)]
pub struct PolicyDocuments {
    graphs: BTreeMap<String, Graph>,
}

impl PolicyDocuments {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document under its own URL.
    pub fn insert(&mut self, graph: Graph) {
        self.graphs.insert(strip_fragment(graph.url()).to_string(), graph);
    }

    /// Return a copy with one more document.
    pub fn with(mut self, graph: Graph) -> Self {
        self.insert(graph);
        self
    }

    /// Check whether the document holding `iri` is present.
    pub fn has_document_for(&self, iri: &str) -> bool {
        self.graphs.contains_key(strip_fragment(iri))
    }

    /// The document holding `iri`, if it was fetched and describes `iri`.
    pub fn describing(&self, iri: &str) -> Option<&Graph> {
        self.graphs
            .get(strip_fragment(iri))
            .filter(|graph| graph.contains_subject(iri))
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    /// Check if no document is present.
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}
