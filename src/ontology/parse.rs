//! Mapping from RDF triples to the relation graph and axiom table.
//!
//! Follows the OWL 2 RDF mapping closely enough for locality: named entities
//! become graph nodes, anonymous class expressions are rebuilt from their
//! blank-node structure, and each axiom records the triples encoding it.

use std::collections::{HashMap, HashSet};

use oxigraph::model::{BlankNode, Term, Triple};

use crate::entity::{Entity, EntityKind};

use super::axiom::{Axiom, AxiomKind};
use super::expr::{ClassExpr, PropertyExpr};
use super::vocab::{self, owl, rdf, rdfs};
use super::{Annotation, EntityId, Ontology, Relation, RelationGraph};

/// Build the axiom store from the triples of one document.
pub(super) fn build(triples: Vec<Triple>) -> Ontology {
    let subjects: Vec<Term> = triples.iter().map(|t| t.subject.clone().into()).collect();
    let parts = {
        let mut builder = Builder::new(&triples, &subjects);
        builder.run();
        builder.finish()
    };
    Ontology {
        iri: parts.iri,
        source: None,
        triples,
        graph: parts.graph,
        nodes: parts.nodes,
        axioms: parts.axioms,
        declarations: parts.declarations,
        annotation_triples: parts.annotation_triples,
        annotations: parts.annotations,
    }
}

fn named(term: &Term) -> Option<&str> {
    match term {
        Term::NamedNode(n) => Some(n.as_str()),
        _ => None,
    }
}

/// Entity kinds fixed by `rdf:type` declarations.
#[derive(Default)]
struct Declared {
    ontology: Option<String>,
    data_properties: HashSet<String>,
    annotation_properties: HashSet<String>,
    datatypes: HashSet<String>,
}

impl Declared {
    fn scan(triples: &[Triple], subjects: &[Term]) -> Self {
        let mut declared = Self::default();
        for (t, s) in triples.iter().zip(subjects) {
            if t.predicate.as_str() != rdf::TYPE {
                continue;
            }
            let (Some(s), Some(o)) = (named(s), named(&t.object)) else {
                continue;
            };
            match o {
                owl::ONTOLOGY if declared.ontology.is_none() => {
                    declared.ontology = Some(s.to_string());
                }
                owl::DATATYPE_PROPERTY => {
                    declared.data_properties.insert(s.to_string());
                }
                owl::ANNOTATION_PROPERTY => {
                    declared.annotation_properties.insert(s.to_string());
                }
                rdfs::DATATYPE => {
                    declared.datatypes.insert(s.to_string());
                }
                _ => {}
            }
        }
        declared
    }

    /// How a predicate IRI is interpreted; `None` for annotation properties
    /// and built-in vocabulary.
    fn property_kind(&self, iri: &str) -> Option<EntityKind> {
        if self.annotation_properties.contains(iri) || vocab::is_builtin_annotation(iri) {
            return None;
        }
        if iri == owl::TOP_OBJECT_PROPERTY || iri == owl::BOTTOM_OBJECT_PROPERTY {
            return Some(EntityKind::ObjectProperty);
        }
        if vocab::is_reserved(iri) {
            return None;
        }
        if self.data_properties.contains(iri) {
            Some(EntityKind::DataProperty)
        } else {
            Some(EntityKind::ObjectProperty)
        }
    }

    fn is_annotation(&self, iri: &str) -> bool {
        self.annotation_properties.contains(iri) || vocab::is_builtin_annotation(iri)
    }
}

struct Parts {
    iri: Option<String>,
    graph: RelationGraph,
    nodes: HashMap<Entity, EntityId>,
    axioms: Vec<Axiom>,
    declarations: HashMap<EntityId, Vec<usize>>,
    annotation_triples: HashMap<EntityId, Vec<usize>>,
    annotations: HashMap<EntityId, Vec<Annotation>>,
}

struct Builder<'a> {
    triples: &'a [Triple],
    subjects: &'a [Term],
    by_blank: HashMap<&'a BlankNode, Vec<usize>>,
    declared: Declared,
    graph: RelationGraph,
    nodes: HashMap<Entity, EntityId>,
    edges: HashSet<(EntityId, EntityId, Relation)>,
    axioms: Vec<Axiom>,
    declarations: HashMap<EntityId, Vec<usize>>,
    annotation_triples: HashMap<EntityId, Vec<usize>>,
    annotations: HashMap<EntityId, Vec<Annotation>>,
    /// Triples with a named subject and an annotation-like object, attached
    /// once every entity is known.
    pending_annotations: Vec<usize>,
}

impl<'a> Builder<'a> {
    fn new(triples: &'a [Triple], subjects: &'a [Term]) -> Self {
        let mut by_blank: HashMap<&'a BlankNode, Vec<usize>> = HashMap::new();
        for (i, s) in subjects.iter().enumerate() {
            if let Term::BlankNode(b) = s {
                by_blank.entry(b).or_default().push(i);
            }
        }
        Self {
            triples,
            subjects,
            by_blank,
            declared: Declared::scan(triples, subjects),
            graph: RelationGraph::new(),
            nodes: HashMap::new(),
            edges: HashSet::new(),
            axioms: Vec::new(),
            declarations: HashMap::new(),
            annotation_triples: HashMap::new(),
            annotations: HashMap::new(),
            pending_annotations: Vec::new(),
        }
    }

    fn run(&mut self) {
        let triples = self.triples;
        let subjects = self.subjects;
        for (i, (t, s)) in triples.iter().zip(subjects).enumerate() {
            let o = &t.object;
            match t.predicate.as_str() {
                rdfs::SUB_CLASS_OF => self.sub_class_of(i, s, o),
                owl::EQUIVALENT_CLASS => self.equivalent_class(i, s, o),
                owl::DISJOINT_WITH => {
                    let mut visiting = HashSet::new();
                    let a = self.class_expr(s, &mut visiting);
                    let b = self.class_expr(o, &mut visiting);
                    let encoding = self.encoding(i, &[s, o]);
                    self.push_axiom(AxiomKind::DisjointClasses(vec![a, b]), encoding);
                }
                p @ (rdfs::DOMAIN | rdfs::RANGE) => self.domain_or_range(i, p, s, o),
                rdfs::SUB_PROPERTY_OF => self.sub_property_of(i, s, o),
                p @ (owl::EQUIVALENT_PROPERTY | owl::INVERSE_OF | owl::PROPERTY_DISJOINT_WITH) => {
                    self.property_pair(i, p, s, o)
                }
                rdf::TYPE => self.typing(i, s, o),
                p => self.statement(i, s, p, o),
            }
        }
    }

    fn finish(mut self) -> Parts {
        self.attach_annotations();
        Parts {
            iri: self.declared.ontology.take(),
            graph: self.graph,
            nodes: self.nodes,
            axioms: self.axioms,
            declarations: self.declarations,
            annotation_triples: self.annotation_triples,
            annotations: self.annotations,
        }
    }

    // -------------------------------------------------------------------
    // Arena
    // -------------------------------------------------------------------

    fn intern(&mut self, entity: &Entity) -> EntityId {
        if let Some(&id) = self.nodes.get(entity) {
            return id;
        }
        let id = self.graph.add_node(entity.clone());
        self.nodes.insert(entity.clone(), id);
        id
    }

    fn edge(&mut self, from: &Entity, to: &Entity, relation: Relation) {
        let a = self.intern(from);
        let b = self.intern(to);
        if self.edges.insert((a, b, relation)) {
            self.graph.add_edge(a, b, relation);
        }
    }

    fn declare(&mut self, i: usize, entity: Entity) {
        let id = self.intern(&entity);
        self.declarations.entry(id).or_default().push(i);
    }

    fn push_axiom(&mut self, kind: AxiomKind, triples: Vec<usize>) {
        let axiom = Axiom::new(kind, triples);
        for entity in axiom.signature() {
            self.intern(&entity);
        }
        self.axioms.push(axiom);
    }

    // -------------------------------------------------------------------
    // Blank-node structure
    // -------------------------------------------------------------------

    /// First object of `predicate` on a blank node.
    fn value(&self, node: &BlankNode, predicate: &str) -> Option<&'a Term> {
        let triples = self.triples;
        self.by_blank
            .get(node)?
            .iter()
            .map(|&i| &triples[i])
            .find(|t| t.predicate.as_str() == predicate)
            .map(|t| &t.object)
    }

    /// Members of an `rdf:List`; stops at `rdf:nil`, a malformed tail or a cycle.
    fn list(&self, head: &'a Term) -> Vec<&'a Term> {
        let mut items = Vec::new();
        let mut seen: HashSet<&BlankNode> = HashSet::new();
        let mut cursor = head;
        while let Term::BlankNode(node) = cursor {
            if !seen.insert(node) {
                break;
            }
            if let Some(first) = self.value(node, rdf::FIRST) {
                items.push(first);
            }
            match self.value(node, rdf::REST) {
                Some(rest) => cursor = rest,
                None => break,
            }
        }
        items
    }

    /// Indices of every triple reachable from `term` through blank nodes.
    fn blank_closure(&self, term: &'a Term, out: &mut Vec<usize>) {
        let Term::BlankNode(start) = term else {
            return;
        };
        let triples = self.triples;
        let mut seen: HashSet<&BlankNode> = HashSet::from([start]);
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            let Some(indices) = self.by_blank.get(node) else {
                continue;
            };
            for &i in indices {
                out.push(i);
                if let Term::BlankNode(next) = &triples[i].object {
                    if seen.insert(next) {
                        stack.push(next);
                    }
                }
            }
        }
    }

    /// The main triple plus the blank-node structure behind `operands`.
    fn encoding(&self, i: usize, operands: &[&'a Term]) -> Vec<usize> {
        let mut out = vec![i];
        for term in operands {
            self.blank_closure(term, &mut out);
        }
        out
    }

    // -------------------------------------------------------------------
    // Expressions
    // -------------------------------------------------------------------

    fn class_iri(&self, iri: &str) -> ClassExpr {
        match iri {
            owl::THING => ClassExpr::Thing,
            owl::NOTHING => ClassExpr::Nothing,
            _ if vocab::is_reserved(iri) || self.declared.datatypes.contains(iri) => {
                ClassExpr::Datatype
            }
            _ => ClassExpr::Named(Entity::class(iri)),
        }
    }

    fn class_expr(&self, term: &'a Term, visiting: &mut HashSet<&'a BlankNode>) -> ClassExpr {
        match term {
            Term::NamedNode(n) => self.class_iri(n.as_str()),
            Term::BlankNode(node) => {
                if !visiting.insert(node) {
                    return ClassExpr::Unknown;
                }
                let expr = self.anonymous_class(node, visiting);
                visiting.remove(node);
                expr
            }
            _ => ClassExpr::Unknown,
        }
    }

    fn class_list(&self, head: &'a Term, visiting: &mut HashSet<&'a BlankNode>) -> Vec<ClassExpr> {
        self.list(head)
            .into_iter()
            .map(|t| self.class_expr(t, visiting))
            .collect()
    }

    fn anonymous_class(
        &self,
        node: &'a BlankNode,
        visiting: &mut HashSet<&'a BlankNode>,
    ) -> ClassExpr {
        if let Some(head) = self.value(node, owl::INTERSECTION_OF) {
            return ClassExpr::Intersection(self.class_list(head, visiting));
        }
        if let Some(head) = self.value(node, owl::UNION_OF) {
            return ClassExpr::Union(self.class_list(head, visiting));
        }
        if let Some(inner) = self.value(node, owl::COMPLEMENT_OF) {
            return ClassExpr::Complement(Box::new(self.class_expr(inner, visiting)));
        }
        if self.value(node, owl::ONE_OF).is_some() {
            return ClassExpr::OneOf;
        }
        if let Some(p) = self.value(node, owl::ON_PROPERTY) {
            return self.restriction(node, self.property_expr(p), visiting);
        }
        let is_datatype = self
            .value(node, rdf::TYPE)
            .and_then(named)
            .is_some_and(|t| t == rdfs::DATATYPE);
        if is_datatype || self.value(node, owl::ON_DATATYPE).is_some() {
            return ClassExpr::Datatype;
        }
        ClassExpr::Unknown
    }

    fn restriction(
        &self,
        node: &'a BlankNode,
        property: PropertyExpr,
        visiting: &mut HashSet<&'a BlankNode>,
    ) -> ClassExpr {
        let on_data = property
            .entity()
            .is_some_and(|e| e.kind() == EntityKind::DataProperty);
        let mut filler = |term: &'a Term| {
            if on_data {
                ClassExpr::Datatype
            } else {
                self.class_expr(term, visiting)
            }
        };

        if let Some(f) = self.value(node, owl::SOME_VALUES_FROM) {
            let filler = Box::new(filler(f));
            return ClassExpr::Some { property, filler };
        }
        if let Some(f) = self.value(node, owl::ALL_VALUES_FROM) {
            let filler = Box::new(filler(f));
            return ClassExpr::All { property, filler };
        }
        if self.value(node, owl::HAS_VALUE).is_some() {
            return ClassExpr::HasValue { property };
        }
        if self.value(node, owl::HAS_SELF).is_some() {
            return ClassExpr::HasSelf { property };
        }

        let qualifier = match (
            self.value(node, owl::ON_CLASS),
            self.value(node, owl::ON_DATA_RANGE),
        ) {
            (Some(c), _) => filler(c),
            (None, Some(_)) => ClassExpr::Datatype,
            (None, None) => ClassExpr::Thing,
        };
        let filler = Box::new(qualifier);
        let min = self.cardinality(node, owl::MIN_QUALIFIED_CARDINALITY, owl::MIN_CARDINALITY);
        if let Some(n) = min {
            return ClassExpr::Min {
                n,
                property,
                filler,
            };
        }
        let max = self.cardinality(node, owl::MAX_QUALIFIED_CARDINALITY, owl::MAX_CARDINALITY);
        if let Some(n) = max {
            return ClassExpr::Max {
                n,
                property,
                filler,
            };
        }
        if let Some(n) = self.cardinality(node, owl::QUALIFIED_CARDINALITY, owl::CARDINALITY) {
            return ClassExpr::Exact {
                n,
                property,
                filler,
            };
        }
        ClassExpr::Unknown
    }

    fn cardinality(&self, node: &BlankNode, qualified: &str, plain: &str) -> Option<u64> {
        let term = self
            .value(node, qualified)
            .or_else(|| self.value(node, plain))?;
        match term {
            Term::Literal(lit) => lit.value().trim().parse().ok(),
            _ => None,
        }
    }

    fn property_expr(&self, term: &'a Term) -> PropertyExpr {
        match term {
            Term::NamedNode(n) => match self.declared.property_kind(n.as_str()) {
                Some(kind) => PropertyExpr::Named(Entity::new(kind, n.as_str())),
                None => PropertyExpr::Anonymous,
            },
            Term::BlankNode(node) => match self.value(node, owl::INVERSE_OF).and_then(named) {
                Some(iri) => PropertyExpr::Inverse(Entity::object_property(iri)),
                None => PropertyExpr::Anonymous,
            },
            _ => PropertyExpr::Anonymous,
        }
    }

    // -------------------------------------------------------------------
    // Axioms
    // -------------------------------------------------------------------

    fn sub_class_of(&mut self, i: usize, s: &'a Term, o: &'a Term) {
        let mut visiting = HashSet::new();
        let sub = self.class_expr(s, &mut visiting);
        let sup = self.class_expr(o, &mut visiting);
        if let ClassExpr::Named(class) = &sub {
            for parent in sup.classes() {
                if parent != *class {
                    self.edge(class, &parent, Relation::SubClassOf);
                }
            }
        }
        let encoding = self.encoding(i, &[s, o]);
        self.push_axiom(AxiomKind::SubClassOf { sub, sup }, encoding);
    }

    fn equivalent_class(&mut self, i: usize, s: &'a Term, o: &'a Term) {
        let mut visiting = HashSet::new();
        let a = self.class_expr(s, &mut visiting);
        let b = self.class_expr(o, &mut visiting);
        for (named, other) in [(&a, &b), (&b, &a)] {
            if let ClassExpr::Named(class) = named {
                for parent in other.classes() {
                    if parent != *class {
                        self.edge(class, &parent, Relation::SubClassOf);
                    }
                }
            }
        }
        let encoding = self.encoding(i, &[s, o]);
        self.push_axiom(AxiomKind::EquivalentClasses(vec![a, b]), encoding);
    }

    fn domain_or_range(&mut self, i: usize, predicate: &str, s: &'a Term, o: &'a Term) {
        let property = self.property_expr(s);
        let Some(entity) = property.entity().cloned() else {
            return;
        };
        let is_range = predicate == rdfs::RANGE;
        let class = if is_range && entity.kind() == EntityKind::DataProperty {
            ClassExpr::Datatype
        } else {
            self.class_expr(o, &mut HashSet::new())
        };
        if matches!(property, PropertyExpr::Named(_)) {
            let relation = if is_range {
                Relation::Range
            } else {
                Relation::Domain
            };
            for c in class.classes() {
                self.edge(&entity, &c, relation);
            }
        }
        let encoding = self.encoding(i, &[s, o]);
        let kind = if is_range {
            AxiomKind::Range { property, class }
        } else {
            AxiomKind::Domain { property, class }
        };
        self.push_axiom(kind, encoding);
    }

    fn sub_property_of(&mut self, i: usize, s: &'a Term, o: &'a Term) {
        let sub = self.property_expr(s);
        let sup = self.property_expr(o);
        if sub.entity().is_none() && sup.entity().is_none() {
            return;
        }
        if let (PropertyExpr::Named(a), PropertyExpr::Named(b)) = (&sub, &sup) {
            if a != b {
                self.edge(a, b, Relation::SubPropertyOf);
            }
        }
        let encoding = self.encoding(i, &[s, o]);
        self.push_axiom(AxiomKind::SubPropertyOf { sub, sup }, encoding);
    }

    fn property_pair(&mut self, i: usize, predicate: &str, s: &'a Term, o: &'a Term) {
        if named(s).is_none() {
            // A blank subject here is itself an inverse property expression.
            return;
        }
        let a = self.property_expr(s);
        let b = self.property_expr(o);
        if a.entity().is_none() && b.entity().is_none() {
            return;
        }
        let relation = match predicate {
            owl::EQUIVALENT_PROPERTY => Some(Relation::EquivalentProperty),
            owl::INVERSE_OF => Some(Relation::InverseOf),
            _ => None,
        };
        if let (Some(relation), PropertyExpr::Named(x), PropertyExpr::Named(y)) = (relation, &a, &b)
        {
            if x != y {
                self.edge(x, y, relation);
                self.edge(y, x, relation);
            }
        }
        let kind = match predicate {
            owl::EQUIVALENT_PROPERTY => AxiomKind::EquivalentProperties(vec![a, b]),
            owl::INVERSE_OF => AxiomKind::InverseProperties(a, b),
            _ => AxiomKind::DisjointProperties(vec![a, b]),
        };
        let encoding = self.encoding(i, &[s, o]);
        self.push_axiom(kind, encoding);
    }

    fn typing(&mut self, i: usize, s: &'a Term, o: &'a Term) {
        let Some(ty) = named(o) else {
            return;
        };
        let subject = match s {
            Term::NamedNode(n) => n.as_str(),
            Term::BlankNode(node) if ty == owl::ALL_DISJOINT_CLASSES => {
                if let Some(head) = self.value(node, owl::MEMBERS) {
                    let members = self.class_list(head, &mut HashSet::new());
                    let encoding = self.encoding(i, &[s]);
                    self.push_axiom(AxiomKind::DisjointClasses(members), encoding);
                }
                return;
            }
            _ => return,
        };

        match ty {
            owl::CLASS | rdfs::CLASS => {
                if !vocab::is_reserved(subject) {
                    self.declare(i, Entity::class(subject));
                }
            }
            owl::OBJECT_PROPERTY | owl::DATATYPE_PROPERTY => {
                if let Some(kind) = self.declared.property_kind(subject) {
                    if !vocab::is_reserved(subject) {
                        self.declare(i, Entity::new(kind, subject));
                    }
                }
            }
            owl::FUNCTIONAL_PROPERTY
            | owl::INVERSE_FUNCTIONAL_PROPERTY
            | owl::TRANSITIVE_PROPERTY
            | owl::SYMMETRIC_PROPERTY
            | owl::ASYMMETRIC_PROPERTY
            | owl::REFLEXIVE_PROPERTY
            | owl::IRREFLEXIVE_PROPERTY => {
                let property = self.property_expr(s);
                if property.entity().is_some() {
                    let reflexive = ty == owl::REFLEXIVE_PROPERTY;
                    self.push_axiom(
                        AxiomKind::Characteristic {
                            property,
                            reflexive,
                        },
                        vec![i],
                    );
                }
            }
            _ if vocab::is_reserved(ty) => {}
            _ => {
                let class = self.class_iri(ty);
                self.push_axiom(AxiomKind::ClassAssertion { class }, vec![i]);
            }
        }
    }

    /// Any other triple: an annotation, a property assertion, or noise.
    fn statement(&mut self, i: usize, s: &'a Term, predicate: &str, o: &'a Term) {
        if named(s).is_none() {
            return;
        }
        if matches!(o, Term::Literal(_)) || self.declared.is_annotation(predicate) {
            self.pending_annotations.push(i);
            return;
        }
        if let (Some(EntityKind::ObjectProperty), Term::NamedNode(_)) =
            (self.declared.property_kind(predicate), o)
        {
            let property = PropertyExpr::Named(Entity::object_property(predicate));
            self.push_axiom(AxiomKind::PropertyAssertion { property }, vec![i]);
        }
    }

    fn attach_annotations(&mut self) {
        let triples = self.triples;
        let subjects = self.subjects;
        for i in std::mem::take(&mut self.pending_annotations) {
            let Some(subject) = named(&subjects[i]) else {
                continue;
            };
            let t = &triples[i];
            for kind in [
                EntityKind::Class,
                EntityKind::ObjectProperty,
                EntityKind::DataProperty,
            ] {
                let Some(&id) = self.nodes.get(&Entity::new(kind, subject)) else {
                    continue;
                };
                self.annotation_triples.entry(id).or_default().push(i);
                if let Term::Literal(lit) = &t.object {
                    self.annotations.entry(id).or_default().push(Annotation {
                        property: t.predicate.as_str().to_string(),
                        value: lit.value().to_string(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{turtle, zoo};
    use super::*;

    const SHAPES: &str = r#"
        @prefix : <http://example.org/zoo#> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

        :Cat a owl:Class ;
            rdfs:subClassOf [ a owl:Restriction ;
                              owl:onProperty :eats ;
                              owl:someValuesFrom :Mouse ] .
        :Pet a owl:Class ;
            owl:equivalentClass [ owl:intersectionOf ( :Animal :Tame ) ] .
        :eats a owl:ObjectProperty ; owl:inverseOf :eatenBy .
        :feeds a owl:ObjectProperty ; rdfs:subPropertyOf :eats .
        :weight a owl:DatatypeProperty ; rdfs:range xsd:decimal .
        :note a owl:AnnotationProperty .
        :Cat :note "purrs" .
        [] a owl:AllDisjointClasses ; owl:members ( :Cat :Mouse :Tame ) .
    "#;

    fn class(name: &str) -> Entity {
        Entity::class(zoo(name))
    }

    fn prop(name: &str) -> Entity {
        Entity::object_property(zoo(name))
    }

    #[test]
    fn restriction_filler_becomes_superclass_edge() {
        let onto = turtle(SHAPES);
        assert_eq!(onto.superclasses_of(&class("Cat")), [class("Mouse")].into());
    }

    #[test]
    fn owl_thing_is_a_class_node() {
        let onto = turtle(
            r#"
            @prefix : <http://example.org/zoo#> .
            @prefix owl: <http://www.w3.org/2002/07/owl#> .
            @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
            :Dog rdfs:subClassOf owl:Thing .
            :hasParent rdfs:range owl:Thing .
            "#,
        );
        let thing = Entity::class(owl::THING);
        assert!(onto.contains(&thing));
        assert_eq!(onto.superclasses_of(&class("Dog")), [thing.clone()].into());
        assert_eq!(onto.range_of(&prop("hasParent")), [thing].into());
    }

    #[test]
    fn intersection_operands_are_superclasses_of_equivalent() {
        let onto = turtle(SHAPES);
        assert_eq!(
            onto.superclasses_of(&class("Pet")),
            [class("Animal"), class("Tame")].into()
        );
    }

    #[test]
    fn subclass_axiom_keeps_its_blank_node_triples() {
        let onto = turtle(SHAPES);
        let axiom = onto
            .axioms()
            .iter()
            .find(|a| {
                matches!(
                    &a.kind,
                    AxiomKind::SubClassOf { sub: ClassExpr::Named(c), .. } if *c == class("Cat")
                )
            })
            .unwrap();
        // subClassOf + rdf:type Restriction + onProperty + someValuesFrom
        assert_eq!(axiom.triples.len(), 4);
        assert!(matches!(
            &axiom.kind,
            AxiomKind::SubClassOf { sup: ClassExpr::Some { .. }, .. }
        ));
    }

    #[test]
    fn property_relations() {
        let onto = turtle(SHAPES);
        assert_eq!(onto.inverse_properties(&prop("eats")), [prop("eatenBy")].into());
        assert_eq!(onto.inverse_properties(&prop("eatenBy")), [prop("eats")].into());
        assert_eq!(onto.subproperties_of(&prop("eats")), [prop("feeds")].into());
    }

    #[test]
    fn data_properties_and_annotation_properties() {
        let onto = turtle(SHAPES);
        let weight = Entity::data_property(zoo("weight"));
        assert!(onto.contains(&weight));
        assert!(onto.range_of(&weight).is_empty());
        assert!(!onto.contains(&prop("note")));
        let notes: Vec<_> = onto
            .annotations(&class("Cat"))
            .iter()
            .map(|a| a.value.as_str())
            .collect();
        assert_eq!(notes, vec!["purrs"]);
    }

    #[test]
    fn all_disjoint_classes_reads_member_list() {
        let onto = turtle(SHAPES);
        let disjoint = onto
            .axioms()
            .iter()
            .find_map(|a| match &a.kind {
                AxiomKind::DisjointClasses(ops) => Some(ops.len()),
                _ => None,
            })
            .unwrap();
        assert_eq!(disjoint, 3);
    }

    #[test]
    fn cyclic_list_terminates() {
        let onto = turtle(
            r#"
            @prefix : <http://example.org/zoo#> .
            @prefix owl: <http://www.w3.org/2002/07/owl#> .
            @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
            :A owl:equivalentClass _:x .
            _:x owl:unionOf _:l .
            _:l rdf:first :B ; rdf:rest _:l .
            "#,
        );
        assert_eq!(onto.superclasses_of(&class("A")), [class("B")].into());
    }
}
