//! Line-oriented seed files.
//!
//! One IRI per line. Lines are trimmed; blank lines and lines starting with
//! `#` or `//` are ignored. A line that is not a valid absolute IRI is
//! skipped with a warning rather than failing the run.

use std::path::Path;

use oxigraph::model::NamedNode;

use crate::entity::{Entity, EntityKind};
use crate::error::SeedError;

/// Trimmed, non-empty, non-comment lines of `text`.
pub fn clean_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .filter(|l| !l.starts_with('#') && !l.starts_with("//"))
}

/// Valid IRIs from `text`, in file order. `origin` only labels warnings.
pub fn parse_iris(text: &str, origin: &str) -> Vec<String> {
    clean_lines(text)
        .filter_map(|line| match NamedNode::new(line) {
            Ok(node) => Some(node.into_string()),
            Err(e) => {
                tracing::warn!(file = origin, line, error = %e, "skipping malformed seed line");
                None
            }
        })
        .collect()
}

/// Read a seed file as entities of one kind.
pub fn read_entities(path: &Path, kind: EntityKind) -> Result<Vec<Entity>, SeedError> {
    let text = std::fs::read_to_string(path).map_err(|e| SeedError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    let entities: Vec<Entity> = parse_iris(&text, &path.display().to_string())
        .into_iter()
        .map(|iri| Entity::new(kind, iri))
        .collect();
    tracing::debug!(path = %path.display(), %kind, count = entities.len(), "read seed file");
    Ok(entities)
}

/// Read a file of class IRIs.
pub fn read_classes(path: &Path) -> Result<Vec<Entity>, SeedError> {
    read_entities(path, EntityKind::Class)
}

/// Read a file of object property IRIs.
pub fn read_properties(path: &Path) -> Result<Vec<Entity>, SeedError> {
    read_entities(path, EntityKind::ObjectProperty)
}
