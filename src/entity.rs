//! Core entity types.
//!
//! An [`Entity`] is an IRI tagged with its [`EntityKind`]. Identity is by
//! value: two entities are equal when their kinds and IRI strings are equal.
//! Entities are immutable and cheap to clone (the IRI is shared).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ontology::vocab::owl;

/// Classification of an entity in an ontology signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    /// A named class (category/concept).
    Class,
    /// A named object property (binary relation between individuals).
    ObjectProperty,
    /// A named data property (relation from individuals to literals).
    DataProperty,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Class => write!(f, "Class"),
            EntityKind::ObjectProperty => write!(f, "ObjectProperty"),
            EntityKind::DataProperty => write!(f, "DataProperty"),
        }
    }
}

/// A named ontology entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    kind: EntityKind,
    iri: Arc<str>,
}

impl Entity {
    /// Create an entity of the given kind.
    pub fn new(kind: EntityKind, iri: impl Into<Arc<str>>) -> Self {
        Self {
            kind,
            iri: iri.into(),
        }
    }

    /// Shorthand for a class entity.
    pub fn class(iri: impl Into<Arc<str>>) -> Self {
        Self::new(EntityKind::Class, iri)
    }

    /// Shorthand for an object property entity.
    pub fn object_property(iri: impl Into<Arc<str>>) -> Self {
        Self::new(EntityKind::ObjectProperty, iri)
    }

    /// Shorthand for a data property entity.
    pub fn data_property(iri: impl Into<Arc<str>>) -> Self {
        Self::new(EntityKind::DataProperty, iri)
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn iri(&self) -> &str {
        &self.iri
    }

    pub fn is_class(&self) -> bool {
        self.kind == EntityKind::Class
    }

    pub fn is_property(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::ObjectProperty | EntityKind::DataProperty
        )
    }

    /// The local name of the IRI: the part after the last `#` or `/`.
    ///
    /// Falls back to the full IRI when the separator is the last character.
    pub fn local_name(&self) -> &str {
        local_name(&self.iri)
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.iri)
    }
}

/// Local name of an IRI string (after the last `#` or `/`).
pub fn local_name(iri: &str) -> &str {
    match iri.rfind(['#', '/']) {
        Some(idx) if idx + 1 < iri.len() => &iri[idx + 1..],
        _ => iri,
    }
}

/// The universal and empty object properties.
///
/// Neither carries entailments useful for module extraction, so closure
/// algorithms that are handed a `Sentinels` value drop both from every
/// input and result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinels {
    pub top: Entity,
    pub bottom: Entity,
}

impl Sentinels {
    /// `owl:topObjectProperty` and `owl:bottomObjectProperty`.
    pub fn owl() -> Self {
        Self {
            top: Entity::object_property(owl::TOP_OBJECT_PROPERTY),
            bottom: Entity::object_property(owl::BOTTOM_OBJECT_PROPERTY),
        }
    }

    /// Check whether `entity` is one of the two sentinels.
    pub fn contains(&self, entity: &Entity) -> bool {
        *entity == self.top || *entity == self.bottom
    }
}

impl Default for Sentinels {
    fn default() -> Self {
        Self::owl()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_kind_and_iri() {
        let a = Entity::class("http://example.org/zoo#Dog");
        let b = Entity::class(String::from("http://example.org/zoo#Dog"));
        let p = Entity::object_property("http://example.org/zoo#Dog");
        assert_eq!(a, b);
        assert_ne!(a, p);
    }

    #[test]
    fn local_names() {
        assert_eq!(local_name("http://example.org/zoo#Dog"), "Dog");
        assert_eq!(local_name("http://example.org/zoo/causes"), "causes");
        assert_eq!(local_name("http://example.org/zoo/"), "http://example.org/zoo/");
        assert_eq!(local_name("urn:x"), "urn:x");
    }

    #[test]
    fn sentinels_match_owl_vocabulary() {
        let sentinels = Sentinels::owl();
        assert!(sentinels.contains(&Entity::object_property(
            "http://www.w3.org/2002/07/owl#topObjectProperty"
        )));
        assert!(sentinels.contains(&Entity::object_property(
            "http://www.w3.org/2002/07/owl#bottomObjectProperty"
        )));
        assert!(!sentinels.contains(&Entity::object_property(
            "http://example.org/causes"
        )));
    }
}
