//! Axiom Store: a read-only, indexed snapshot of an OWL ontology.
//!
//! Documents are parsed into an `oxigraph` store, then mapped onto two
//! structures:
//!
//! - **Relation graph** (`petgraph`): one node per named entity, edges for
//!   generalisation, domain, range and property-to-property relations. The
//!   node indices double as the entity arena used by the closure algorithms.
//! - **Axiom table**: the logical axioms with the triples encoding them, used
//!   by the module extractor.
//!
//! All queries are total: unknown entities simply have no neighbours.

pub mod axiom;
pub mod expr;
pub mod format;
mod parse;
pub mod vocab;

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::Triple;
use oxigraph::store::Store;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::entity::{Entity, EntityKind};
use crate::error::OntologyError;

use self::axiom::Axiom;

/// Result type for axiom store operations.
pub type OntologyResult<T> = std::result::Result<T, OntologyError>;

/// Index of an entity in the store's arena.
pub type EntityId = NodeIndex;

/// The relation graph: entities as nodes, asserted relations as edges.
pub type RelationGraph = DiGraph<Entity, Relation>;

/// Edge labels of the relation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `sub → super`; equivalent classes get an edge in each direction.
    SubClassOf,
    /// `property → class` for each class in the domain expression.
    Domain,
    /// `property → class` for each class in the range expression.
    Range,
    /// `sub → super` between named properties.
    SubPropertyOf,
    /// Stored in both directions.
    EquivalentProperty,
    /// Stored in both directions.
    InverseOf,
}

/// A literal-valued annotation on an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Annotation property IRI.
    pub property: String,
    /// Lexical form of the literal.
    pub value: String,
}

/// Read-only axiom store over one ontology document.
pub struct Ontology {
    iri: Option<String>,
    source: Option<PathBuf>,
    triples: Vec<Triple>,
    graph: RelationGraph,
    nodes: HashMap<Entity, EntityId>,
    axioms: Vec<Axiom>,
    declarations: HashMap<EntityId, Vec<usize>>,
    annotation_triples: HashMap<EntityId, Vec<usize>>,
    annotations: HashMap<EntityId, Vec<Annotation>>,
}

impl Ontology {
    /// Load an ontology document, choosing the RDF syntax from its extension.
    pub fn load(path: &Path) -> OntologyResult<Self> {
        let format = format::format_for_path(path).ok_or_else(|| OntologyError::UnknownFormat {
            path: path.display().to_string(),
        })?;
        let file = File::open(path).map_err(|e| OntologyError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let base = std::path::absolute(path)
            .ok()
            .map(|abs| format!("file://{}", abs.display()));
        let mut ontology = Self::parse(format, BufReader::new(file), base.as_deref(), path)?;
        ontology.source = Some(path.to_path_buf());
        tracing::info!(
            path = %path.display(),
            triples = ontology.triple_count(),
            axioms = ontology.axiom_count(),
            entities = ontology.entity_count(),
            "loaded ontology"
        );
        Ok(ontology)
    }

    /// Load an ontology from an in-memory reader.
    pub fn from_reader(format: RdfFormat, reader: impl Read) -> OntologyResult<Self> {
        Self::parse(format, reader, None, Path::new("<memory>"))
    }

    fn parse(
        format: RdfFormat,
        reader: impl Read,
        base: Option<&str>,
        path: &Path,
    ) -> OntologyResult<Self> {
        let unreadable = |message: String| OntologyError::Unreadable {
            path: path.display().to_string(),
            message,
        };

        // An unusable base only matters for documents with relative IRIs,
        // which then fail below with a parse error.
        let parser = match base.map(|b| RdfParser::from_format(format).with_base_iri(b)) {
            Some(Ok(parser)) => parser,
            _ => RdfParser::from_format(format),
        };

        let store = Store::new().map_err(|e| unreadable(format!("failed to create store: {e}")))?;
        store
            .load_from_reader(parser, reader)
            .map_err(|e| unreadable(e.to_string()))?;

        let mut triples = Vec::new();
        for quad in store.iter() {
            let quad = quad.map_err(|e| unreadable(e.to_string()))?;
            triples.push(Triple::new(quad.subject, quad.predicate, quad.object));
        }

        Ok(parse::build(triples))
    }

    /// The ontology IRI from the `owl:Ontology` header, if any.
    pub fn iri(&self) -> Option<&str> {
        self.iri.as_deref()
    }

    /// Path the ontology was loaded from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn triple_count(&self) -> usize {
        self.triples.len()
    }

    pub fn axiom_count(&self) -> usize {
        self.axioms.len()
    }

    pub fn entity_count(&self) -> usize {
        self.graph.node_count()
    }

    // -----------------------------------------------------------------------
    // Arena access
    // -----------------------------------------------------------------------

    /// Look up the arena index of an entity.
    pub fn resolve(&self, entity: &Entity) -> Option<EntityId> {
        self.nodes.get(entity).copied()
    }

    /// Whether the entity occurs in the ontology.
    pub fn contains(&self, entity: &Entity) -> bool {
        self.nodes.contains_key(entity)
    }

    /// The entity stored at an arena index.
    ///
    /// Panics if `id` did not come from this ontology.
    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.graph[id]
    }

    pub(crate) fn graph(&self) -> &RelationGraph {
        &self.graph
    }

    fn entities_of(&self, kind: EntityKind) -> BTreeSet<Entity> {
        self.graph
            .node_weights()
            .filter(|e| e.kind() == kind)
            .cloned()
            .collect()
    }

    /// All named classes in the signature.
    pub fn classes(&self) -> BTreeSet<Entity> {
        self.entities_of(EntityKind::Class)
    }

    /// All named object properties in the signature.
    pub fn object_properties(&self) -> BTreeSet<Entity> {
        self.entities_of(EntityKind::ObjectProperty)
    }

    /// All named data properties in the signature.
    pub fn data_properties(&self) -> BTreeSet<Entity> {
        self.entities_of(EntityKind::DataProperty)
    }

    // -----------------------------------------------------------------------
    // Index-based relation lookups
    // -----------------------------------------------------------------------

    fn targets(&self, id: EntityId, relation: Relation) -> impl Iterator<Item = EntityId> + '_ {
        self.graph
            .edges_directed(id, Direction::Outgoing)
            .filter(move |e| *e.weight() == relation)
            .map(|e| e.target())
    }

    fn sources(&self, id: EntityId, relation: Relation) -> impl Iterator<Item = EntityId> + '_ {
        self.graph
            .edges_directed(id, Direction::Incoming)
            .filter(move |e| *e.weight() == relation)
            .map(|e| e.source())
    }

    pub(crate) fn superclass_ids(&self, id: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        self.targets(id, Relation::SubClassOf)
    }

    pub(crate) fn domain_ids(&self, id: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        self.targets(id, Relation::Domain)
    }

    pub(crate) fn range_ids(&self, id: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        self.targets(id, Relation::Range)
    }

    pub(crate) fn equivalent_property_ids(
        &self,
        id: EntityId,
    ) -> impl Iterator<Item = EntityId> + '_ {
        self.targets(id, Relation::EquivalentProperty)
    }

    pub(crate) fn inverse_property_ids(&self, id: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        self.targets(id, Relation::InverseOf)
    }

    pub(crate) fn subproperty_ids(&self, id: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        self.sources(id, Relation::SubPropertyOf)
    }

    // -----------------------------------------------------------------------
    // Entity-valued query surface
    // -----------------------------------------------------------------------

    fn lookup<I>(&self, entity: &Entity, f: impl FnOnce(EntityId) -> I) -> BTreeSet<Entity>
    where
        I: Iterator<Item = EntityId>,
    {
        match self.resolve(entity) {
            Some(id) => f(id).map(|n| self.graph[n].clone()).collect(),
            None => BTreeSet::new(),
        }
    }

    /// Direct superclasses, with equivalent classes folded in (minus `class` itself).
    pub fn superclasses_of(&self, class: &Entity) -> BTreeSet<Entity> {
        self.lookup(class, |id| self.superclass_ids(id))
    }

    /// Classes in the asserted domains of `property`.
    pub fn domain_of(&self, property: &Entity) -> BTreeSet<Entity> {
        self.lookup(property, |id| self.domain_ids(id))
    }

    /// Classes in the asserted ranges of `property`.
    pub fn range_of(&self, property: &Entity) -> BTreeSet<Entity> {
        self.lookup(property, |id| self.range_ids(id))
    }

    /// Properties asserted equivalent to `property`.
    pub fn equivalent_properties(&self, property: &Entity) -> BTreeSet<Entity> {
        self.lookup(property, |id| self.equivalent_property_ids(id))
    }

    /// Properties asserted inverse of `property`, in either direction.
    pub fn inverse_properties(&self, property: &Entity) -> BTreeSet<Entity> {
        self.lookup(property, |id| self.inverse_property_ids(id))
    }

    /// Properties declared as sub-properties of `property`.
    pub fn subproperties_of(&self, property: &Entity) -> BTreeSet<Entity> {
        self.lookup(property, |id| self.subproperty_ids(id))
    }

    // -----------------------------------------------------------------------
    // Annotations
    // -----------------------------------------------------------------------

    /// Literal annotations attached to an entity.
    pub fn annotations(&self, entity: &Entity) -> &[Annotation] {
        self.resolve(entity)
            .and_then(|id| self.annotations.get(&id))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    fn annotation_values<'a>(
        &'a self,
        entity: &Entity,
        property: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.annotations(entity)
            .iter()
            .filter(move |a| a.property == property)
            .map(|a| a.value.as_str())
    }

    /// `rdfs:label` values of an entity.
    pub fn labels<'a>(&'a self, entity: &Entity) -> impl Iterator<Item = &'a str> + 'a {
        self.annotation_values(entity, vocab::rdfs::LABEL)
    }

    /// `rdfs:comment` values of an entity.
    pub fn comments<'a>(&'a self, entity: &Entity) -> impl Iterator<Item = &'a str> + 'a {
        self.annotation_values(entity, vocab::rdfs::COMMENT)
    }

    // -----------------------------------------------------------------------
    // Raw material for module extraction
    // -----------------------------------------------------------------------

    pub(crate) fn axioms(&self) -> &[Axiom] {
        &self.axioms
    }

    pub(crate) fn triple(&self, index: usize) -> &Triple {
        &self.triples[index]
    }

    pub(crate) fn declaration_triples(&self, id: EntityId) -> &[usize] {
        self.declarations.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub(crate) fn annotation_triples(&self, id: EntityId) -> &[usize] {
        self.annotation_triples
            .get(&id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

impl std::fmt::Debug for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ontology")
            .field("iri", &self.iri)
            .field("triples", &self.triple_count())
            .field("axioms", &self.axiom_count())
            .field("entities", &self.entity_count())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub const ZOO: &str = r#"
        @prefix : <http://example.org/zoo#> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

        <http://example.org/zoo> a owl:Ontology .

        :Animal a owl:Class .
        :Mammal a owl:Class ; rdfs:subClassOf :Animal .
        :Dog a owl:Class ; rdfs:subClassOf :Mammal ; rdfs:label "Dog" .
        :Plant a owl:Class .

        :hasParent a owl:ObjectProperty ;
            rdfs:domain :Dog ;
            rdfs:range :Mammal ;
            rdfs:comment "the parent that causes this animal to exist" .
    "#;

    pub fn turtle(doc: &str) -> Ontology {
        Ontology::from_reader(RdfFormat::Turtle, doc.as_bytes()).unwrap()
    }

    pub fn zoo(name: &str) -> String {
        format!("http://example.org/zoo#{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn header_and_counts() {
        let onto = turtle(ZOO);
        assert_eq!(onto.iri(), Some("http://example.org/zoo"));
        assert_eq!(onto.classes().len(), 4);
        assert_eq!(onto.object_properties().len(), 1);
        assert!(onto.data_properties().is_empty());
    }

    #[test]
    fn superclass_lookup() {
        let onto = turtle(ZOO);
        let supers = onto.superclasses_of(&Entity::class(zoo("Dog")));
        assert_eq!(supers, [Entity::class(zoo("Mammal"))].into());
        assert!(onto.superclasses_of(&Entity::class(zoo("Animal"))).is_empty());
    }

    #[test]
    fn domain_and_range_lookup() {
        let onto = turtle(ZOO);
        let p = Entity::object_property(zoo("hasParent"));
        assert_eq!(onto.domain_of(&p), [Entity::class(zoo("Dog"))].into());
        assert_eq!(onto.range_of(&p), [Entity::class(zoo("Mammal"))].into());
    }

    #[test]
    fn unknown_entities_have_empty_neighbourhoods() {
        let onto = turtle(ZOO);
        let ghost = Entity::class(zoo("Unicorn"));
        assert!(!onto.contains(&ghost));
        assert!(onto.superclasses_of(&ghost).is_empty());
        assert!(onto.domain_of(&Entity::object_property(zoo("ghost"))).is_empty());
    }

    #[test]
    fn labels_and_comments() {
        let onto = turtle(ZOO);
        let dog = Entity::class(zoo("Dog"));
        assert_eq!(onto.labels(&dog).collect::<Vec<_>>(), vec!["Dog"]);
        let p = Entity::object_property(zoo("hasParent"));
        assert!(onto.comments(&p).any(|c| c.contains("causes")));
    }

    #[test]
    fn malformed_document_is_unreadable() {
        let err = Ontology::from_reader(RdfFormat::Turtle, "this is not turtle".as_bytes())
            .unwrap_err();
        assert!(matches!(err, OntologyError::Unreadable { .. }));
    }

    #[test]
    fn load_reports_unknown_extension() {
        let err = Ontology::load(Path::new("ontology.docx")).unwrap_err();
        assert!(matches!(err, OntologyError::UnknownFormat { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("zoo.ttl");
        std::fs::write(&path, ZOO).unwrap();
        let onto = Ontology::load(&path).unwrap();
        assert_eq!(onto.source(), Some(path.as_path()));
        assert_eq!(onto.classes().len(), 4);
    }
}
