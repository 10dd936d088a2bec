//! # Graph snapshots
//!
//! An immutable, in-memory triple collection as produced by whatever
//! parses a fetched Linked-Data document. The resolvers only read from it.

use serde::{Deserialize, Serialize};

use crate::vocab::RDF_TYPE;

/// The object position of a triple.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Term {
    /// A named node.
    Iri(String),
    /// A blank node label.
    BlankNode(String),
    /// A literal's lexical form.
    Literal(String),
}

impl Term {
    /// Create an IRI term.
    pub fn iri(value: impl Into<String>) -> Self {
        Term::Iri(value.into())
    }

    /// Create a literal term.
    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal(value.into())
    }

    /// Get the IRI if this term is a named node.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Get the node identifier if this term can be a subject.
    pub fn as_node(&self) -> Option<&str> {
        match self {
            Term::Iri(id) | Term::BlankNode(id) => Some(id),
            Term::Literal(_) => None,
        }
    }
}

/// A subject-predicate-object statement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject IRI or blank node label.
    pub subject: String,
    /// Predicate IRI.
    pub predicate: String,
    /// Object term.
    pub object: Term,
}

impl Triple {
    /// Create a triple.
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }

    /// Create a triple whose object is an IRI.
    pub fn iri(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self::new(subject, predicate, Term::Iri(object.into()))
    }
}

/// A parsed document: its URL and the triples it contains.
///
/// # Example
///
/// ```
/// use ldaccess_model::{Graph, Triple};
///
/// let graph = Graph::new("https://pod.example/doc")
///     .with(Triple::iri("#it", "http://example.org/p", "https://pod.example/o"));
///
/// assert_eq!(graph.query(Some("#it"), None).count(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Graph {
    url: String,
    triples: Vec<Triple>,
}

impl Graph {
    /// Create an empty graph for the document at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            triples: Vec::new(),
        }
    }

    /// Create a graph from existing triples.
    pub fn from_triples<I>(url: impl Into<String>, triples: I) -> Self
    where
        I: IntoIterator<Item = Triple>,
    {
        Self {
            url: url.into(),
            triples: triples.into_iter().collect(),
        }
    }

    /// Return a copy with one more triple.
    pub fn with(mut self, triple: Triple) -> Self {
        self.triples.push(triple);
        self
    }

    /// The URL of the document this graph was parsed from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// All triples.
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Number of triples.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the graph holds no triples.
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Pattern query; `None` matches anything.
    pub fn query<'a>(
        &'a self,
        subject: Option<&'a str>,
        predicate: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples.iter().filter(move |t| {
            subject.map_or(true, |s| t.subject == s) && predicate.map_or(true, |p| t.predicate == p)
        })
    }

    /// Objects of `subject predicate ?o`.
    pub fn objects<'a>(
        &'a self,
        subject: &'a str,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.query(Some(subject), Some(predicate)).map(|t| &t.object)
    }

    /// IRI objects of `subject predicate ?o`, deduplicated in document order.
    pub fn iri_objects(&self, subject: &str, predicate: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for iri in self.objects(subject, predicate).filter_map(Term::as_iri) {
            if !out.iter().any(|existing| existing == iri) {
                out.push(iri.to_string());
            }
        }
        out
    }

    /// Check for the exact statement `subject predicate <object>`.
    pub fn has_iri(&self, subject: &str, predicate: &str, object: &str) -> bool {
        self.objects(subject, predicate)
            .any(|term| term.as_iri() == Some(object))
    }

    /// Subjects declared `rdf:type class`, deduplicated in document order.
    pub fn subjects_of_type(&self, class: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for triple in self.query(None, Some(RDF_TYPE)) {
            if triple.object.as_iri() == Some(class) && !out.contains(&triple.subject) {
                out.push(triple.subject.clone());
            }
        }
        out
    }

    /// Check whether any triple has `subject` as its subject.
    pub fn contains_subject(&self, subject: &str) -> bool {
        self.query(Some(subject), None).next().is_some()
    }
}

impl Extend<Triple> for Graph {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        self.triples.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: &str = "http://example.org/p";
    const Q: &str = "http://example.org/q";

    fn sample() -> Graph {
        Graph::new("https://pod.example/doc")
            .with(Triple::iri("https://pod.example/doc#a", RDF_TYPE, "http://example.org/T"))
            .with(Triple::iri("https://pod.example/doc#a", P, "https://pod.example/x"))
            .with(Triple::iri("https://pod.example/doc#a", P, "https://pod.example/x"))
            .with(Triple::new("https://pod.example/doc#a", Q, Term::literal("hello")))
            .with(Triple::iri("https://pod.example/doc#b", RDF_TYPE, "http://example.org/T"))
    }

    #[test]
    fn test_query_filters() {
        let graph = sample();
        assert_eq!(graph.query(None, None).count(), 5);
        assert_eq!(graph.query(Some("https://pod.example/doc#a"), None).count(), 4);
        assert_eq!(graph.query(None, Some(P)).count(), 2);
        assert_eq!(graph.query(Some("https://pod.example/doc#b"), Some(P)).count(), 0);
    }

    #[test]
    fn test_iri_objects_dedup_and_skip_literals() {
        let graph = sample();
        assert_eq!(
            graph.iri_objects("https://pod.example/doc#a", P),
            vec!["https://pod.example/x".to_string()]
        );
        assert!(graph.iri_objects("https://pod.example/doc#a", Q).is_empty());
    }

    #[test]
    fn test_subjects_of_type() {
        let graph = sample();
        assert_eq!(
            graph.subjects_of_type("http://example.org/T"),
            vec![
                "https://pod.example/doc#a".to_string(),
                "https://pod.example/doc#b".to_string()
            ]
        );
    }

    #[test]
    fn test_has_iri() {
        let graph = sample();
        assert!(graph.has_iri("https://pod.example/doc#a", P, "https://pod.example/x"));
        assert!(!graph.has_iri("https://pod.example/doc#a", P, "https://pod.example/y"));
    }
}
