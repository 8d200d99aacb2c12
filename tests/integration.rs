//! Closure and extraction tests through the public API.

use std::collections::BTreeSet;

use causal_prune::closure::{SignatureBuilder, expand_properties, upward_closure};
use causal_prune::entity::Entity;
use causal_prune::extract::{BottomLocalityExtractor, MODULE_IRI_PREFIX, ModuleExtractor};
use causal_prune::keyword::{KeywordQuery, find_by_keyword};
use causal_prune::ontology::Ontology;
use oxigraph::io::RdfFormat;

const ZOO: &str = r#"
    @prefix : <http://example.org/zoo#> .
    @prefix owl: <http://www.w3.org/2002/07/owl#> .
    @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

    <http://example.org/zoo> a owl:Ontology .

    :Animal a owl:Class .
    :Mammal a owl:Class ; rdfs:subClassOf :Animal .
    :Dog a owl:Class ; rdfs:subClassOf :Mammal .
    :Plant a owl:Class .

    :hasParent a owl:ObjectProperty ;
        rdfs:domain :Dog ;
        rdfs:range :Mammal ;
        rdfs:label "has parent" .

    :p1 a owl:ObjectProperty ; owl:equivalentProperty :p2 ; rdfs:comment "causes p2 to hold" .
    :p2 a owl:ObjectProperty .
    :p3 a owl:ObjectProperty ; owl:inverseOf :p1 .
    :p4 a owl:ObjectProperty ; rdfs:subPropertyOf :p1 .
"#;

fn zoo() -> Ontology {
    Ontology::from_reader(RdfFormat::Turtle, ZOO.as_bytes()).unwrap()
}

fn class(name: &str) -> Entity {
    Entity::class(format!("http://example.org/zoo#{name}"))
}

fn prop(name: &str) -> Entity {
    Entity::object_property(format!("http://example.org/zoo#{name}"))
}

#[test]
fn dog_signature_includes_has_parent() {
    let onto = zoo();
    let sig = SignatureBuilder::new(&onto).build(&[class("Dog")], &[prop("hasParent")]);
    let expected: BTreeSet<Entity> =
        [class("Dog"), class("Mammal"), class("Animal"), prop("hasParent")].into();
    assert_eq!(sig, expected);
}

#[test]
fn plant_signature_is_just_plant() {
    let onto = zoo();
    let sig = SignatureBuilder::new(&onto).build(&[class("Plant")], &[prop("hasParent")]);
    assert_eq!(sig, BTreeSet::from([class("Plant")]));
}

#[test]
fn property_closure_follows_equivalence_inverse_and_sub_properties() {
    let onto = zoo();
    let out = expand_properties(&onto, &[prop("p1")]);
    let expected: BTreeSet<Entity> = [prop("p1"), prop("p2"), prop("p3"), prop("p4")].into();
    assert_eq!(out, expected);
    assert_eq!(
        expand_properties(&onto, &[prop("p4")]),
        BTreeSet::from([prop("p4")])
    );
}

#[test]
fn upward_closure_of_several_seeds() {
    let onto = zoo();
    let up = upward_closure(&onto, &[class("Dog"), class("Plant")]);
    let expected: BTreeSet<Entity> =
        [class("Dog"), class("Mammal"), class("Animal"), class("Plant")].into();
    assert_eq!(up, expected);
}

#[test]
fn keyword_search_then_closure() {
    let onto = zoo();
    let hits = find_by_keyword(&onto, &KeywordQuery::new("Cause"));
    assert_eq!(hits, BTreeSet::from([prop("p1")]));
    let seeds: Vec<Entity> = hits.into_iter().collect();
    assert_eq!(expand_properties(&onto, &seeds).len(), 4);
}

#[test]
fn module_of_dog_signature() {
    let onto = zoo();
    let sig = SignatureBuilder::new(&onto).build(&[class("Dog")], &[prop("hasParent")]);
    let iri = format!("{MODULE_IRI_PREFIX}zoo-test");
    let module = BottomLocalityExtractor::new()
        .with_annotations(false)
        .extract(&onto, &sig, &iri)
        .unwrap();

    assert_eq!(module.iri(), iri);
    // Two subclass axioms plus the domain and range of hasParent.
    assert_eq!(module.axiom_count(), 4);
    assert!(module.signature().is_superset(&sig));
    assert!(!module.signature().contains(&class("Plant")));
}
