//! Keyword search over object property annotations.
//!
//! Matching is a case-insensitive substring test. Labels are always
//! searched; comments and IRI local names can be switched off.

use std::collections::BTreeSet;

use crate::config::SearchConfig;
use crate::entity::Entity;
use crate::ontology::Ontology;

/// What to look for and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordQuery {
    needle: String,
    pub match_iri: bool,
    pub match_comments: bool,
}

impl KeywordQuery {
    /// A query matching labels, comments and local names.
    pub fn new(keyword: &str) -> Self {
        Self {
            needle: keyword.to_lowercase(),
            match_iri: true,
            match_comments: true,
        }
    }

    pub fn with_iri(mut self, on: bool) -> Self {
        self.match_iri = on;
        self
    }

    pub fn with_comments(mut self, on: bool) -> Self {
        self.match_comments = on;
        self
    }

    /// The lower-cased keyword.
    pub fn keyword(&self) -> &str {
        &self.needle
    }

    fn hit(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.needle)
    }

    /// Whether `property` matches in `ontology`.
    pub fn matches(&self, ontology: &Ontology, property: &Entity) -> bool {
        ontology.labels(property).any(|l| self.hit(l))
            || (self.match_comments && ontology.comments(property).any(|c| self.hit(c)))
            || (self.match_iri && self.hit(property.local_name()))
    }
}

impl From<&SearchConfig> for KeywordQuery {
    fn from(cfg: &SearchConfig) -> Self {
        Self::new(&cfg.keyword)
            .with_iri(cfg.match_iri)
            .with_comments(cfg.match_comments)
    }
}

/// Object properties of `ontology` matching `query`.
pub fn find_by_keyword(ontology: &Ontology, query: &KeywordQuery) -> BTreeSet<Entity> {
    let found: BTreeSet<Entity> = ontology
        .object_properties()
        .into_iter()
        .filter(|p| query.matches(ontology, p))
        .collect();
    tracing::debug!(keyword = query.keyword(), found = found.len(), "keyword search");
    found
}
