//! Syntactic ⊥-locality module extraction.
//!
//! The module for a signature Σ is the smallest set of axioms M such that
//! every axiom outside M is ⊥-local with respect to Σ ∪ sig(M). It is
//! computed as a fixed point: non-local axioms join the module, their
//! entities join Σ, and only axioms mentioning a newly added entity need
//! to be checked again (locality can only be lost by growing Σ).

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use oxigraph::model::{NamedNode, Triple};

use crate::closure::Signature;
use crate::entity::Entity;
use crate::error::ExtractError;
use crate::ontology::Ontology;
use crate::ontology::vocab::{owl, rdf};

/// IRI prefix for modules produced by plain extraction.
pub const MODULE_IRI_PREFIX: &str = "urn:causal-module:";

/// IRI prefix for modules produced by augmentation.
pub const AUGMENT_IRI_PREFIX: &str = "urn:augment:";

/// A fresh, collision-free module IRI under `prefix`.
pub fn fresh_module_iri(prefix: &str) -> String {
    format!("{prefix}{}", uuid::Uuid::new_v4())
}

/// An extracted sub-ontology, ready to be serialized.
#[derive(Debug, Clone)]
pub struct Module {
    iri: String,
    triples: Vec<Triple>,
    signature: BTreeSet<Entity>,
    axiom_count: usize,
}

impl Module {
    /// The module's ontology IRI.
    pub fn iri(&self) -> &str {
        &self.iri
    }

    /// All triples, starting with the `owl:Ontology` header.
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// The final signature: the requested one plus every entity the module
    /// axioms mention.
    pub fn signature(&self) -> &BTreeSet<Entity> {
        &self.signature
    }

    pub fn axiom_count(&self) -> usize {
        self.axiom_count
    }
}

/// Produces a module of an ontology for a signature.
pub trait ModuleExtractor {
    fn extract(
        &self,
        ontology: &Ontology,
        signature: &Signature,
        module_iri: &str,
    ) -> Result<Module, ExtractError>;
}

/// ⊥-module extractor over the axiom table of an [`Ontology`].
#[derive(Debug, Clone)]
pub struct BottomLocalityExtractor {
    include_annotations: bool,
}

impl Default for BottomLocalityExtractor {
    fn default() -> Self {
        Self {
            include_annotations: true,
        }
    }
}

impl BottomLocalityExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether annotation triples of module entities are copied.
    pub fn with_annotations(mut self, include: bool) -> Self {
        self.include_annotations = include;
        self
    }

    /// Indices of the axioms in the ⊥-module, and the grown signature.
    fn module_axioms(
        &self,
        ontology: &Ontology,
        signature: &Signature,
    ) -> (Vec<usize>, HashSet<Entity>) {
        let axioms = ontology.axioms();
        let signatures: Vec<Vec<Entity>> = axioms.iter().map(|a| a.signature()).collect();
        let mut mentions: HashMap<&Entity, Vec<usize>> = HashMap::new();
        for (i, sig) in signatures.iter().enumerate() {
            for entity in sig {
                mentions.entry(entity).or_default().push(i);
            }
        }

        let mut sigma: HashSet<Entity> = signature.iter().cloned().collect();
        let mut included = vec![false; axioms.len()];
        let mut queued = vec![true; axioms.len()];
        let mut queue: VecDeque<usize> = (0..axioms.len()).collect();

        while let Some(i) = queue.pop_front() {
            queued[i] = false;
            if included[i] || axioms[i].is_bottom_local(&sigma) {
                continue;
            }
            included[i] = true;
            for entity in &signatures[i] {
                if !sigma.insert(entity.clone()) {
                    continue;
                }
                for &j in mentions.get(entity).into_iter().flatten() {
                    if !included[j] && !queued[j] {
                        queued[j] = true;
                        queue.push_back(j);
                    }
                }
            }
        }

        let module = (0..axioms.len()).filter(|&i| included[i]).collect();
        (module, sigma)
    }
}

impl ModuleExtractor for BottomLocalityExtractor {
    fn extract(
        &self,
        ontology: &Ontology,
        signature: &Signature,
        module_iri: &str,
    ) -> Result<Module, ExtractError> {
        let header = NamedNode::new(module_iri).map_err(|e| ExtractError::InvalidModuleIri {
            iri: module_iri.to_string(),
            message: e.to_string(),
        })?;

        let (axioms, sigma) = self.module_axioms(ontology, signature);

        let mut indices: Vec<usize> = axioms
            .iter()
            .flat_map(|&i| ontology.axioms()[i].triples.iter().copied())
            .collect();
        for id in sigma.iter().filter_map(|e| ontology.resolve(e)) {
            indices.extend_from_slice(ontology.declaration_triples(id));
            if self.include_annotations {
                indices.extend_from_slice(ontology.annotation_triples(id));
            }
        }
        indices.sort_unstable();
        indices.dedup();

        let mut triples = Vec::with_capacity(indices.len() + 1);
        triples.push(Triple::new(
            header,
            NamedNode::new_unchecked(rdf::TYPE),
            NamedNode::new_unchecked(owl::ONTOLOGY),
        ));
        triples.extend(indices.into_iter().map(|i| ontology.triple(i).clone()));

        tracing::info!(
            iri = module_iri,
            signature = signature.len(),
            axioms = axioms.len(),
            triples = triples.len(),
            "extracted module"
        );

        Ok(Module {
            iri: module_iri.to_string(),
            triples,
            signature: sigma.into_iter().collect(),
            axiom_count: axioms.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::fixtures::{ZOO, turtle, zoo};

    fn class(name: &str) -> Entity {
        Entity::class(zoo(name))
    }

    fn prop(name: &str) -> Entity {
        Entity::object_property(zoo(name))
    }

    #[test]
    fn module_for_causal_signature() {
        let onto = turtle(ZOO);
        let sig: Signature =
            [class("Dog"), class("Mammal"), class("Animal"), prop("hasParent")].into();
        let module = BottomLocalityExtractor::new()
            .extract(&onto, &sig, "urn:causal-module:test")
            .unwrap();
        // 2 subclass + domain + range axioms
        assert_eq!(module.axiom_count(), 4);
        // header + 4 axioms + 4 declarations + label + comment
        assert_eq!(module.triples().len(), 11);
        assert_eq!(module.signature(), &sig);
        assert_eq!(module.iri(), "urn:causal-module:test");
    }

    #[test]
    fn annotations_can_be_left_out() {
        let onto = turtle(ZOO);
        let sig: Signature =
            [class("Dog"), class("Mammal"), class("Animal"), prop("hasParent")].into();
        let module = BottomLocalityExtractor::new()
            .with_annotations(false)
            .extract(&onto, &sig, "urn:causal-module:test")
            .unwrap();
        assert_eq!(module.triples().len(), 9);
    }

    #[test]
    fn signature_grows_along_superclasses_only() {
        let onto = turtle(ZOO);
        let module = BottomLocalityExtractor::new()
            .extract(&onto, &[class("Dog")].into(), "urn:causal-module:dog")
            .unwrap();
        // The domain axiom stays local: hasParent never enters Σ.
        assert_eq!(
            module.signature(),
            &[class("Dog"), class("Mammal"), class("Animal")].into()
        );
        assert_eq!(module.axiom_count(), 2);
    }

    #[test]
    fn isolated_class_gets_only_its_declaration() {
        let onto = turtle(ZOO);
        let module = BottomLocalityExtractor::new()
            .with_annotations(false)
            .extract(&onto, &[class("Plant")].into(), "urn:causal-module:plant")
            .unwrap();
        assert_eq!(module.axiom_count(), 0);
        assert_eq!(module.triples().len(), 2);
    }

    #[test]
    fn existential_restrictions_pull_in_their_filler() {
        let onto = turtle(
            r#"
            @prefix : <http://example.org/zoo#> .
            @prefix owl: <http://www.w3.org/2002/07/owl#> .
            @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
            :Cat rdfs:subClassOf [ a owl:Restriction ;
                                   owl:onProperty :eats ;
                                   owl:someValuesFrom :Mouse ] .
            :Mouse rdfs:subClassOf :Rodent .
            "#,
        );
        let module = BottomLocalityExtractor::new()
            .extract(&onto, &[class("Cat")].into(), "urn:causal-module:cat")
            .unwrap();
        assert!(module.signature().contains(&prop("eats")));
        assert!(module.signature().contains(&class("Rodent")));
        // header + subClassOf + 3 restriction triples + Mouse ⊑ Rodent
        assert_eq!(module.triples().len(), 6);
    }

    #[test]
    fn module_iri_must_be_absolute() {
        let onto = turtle(ZOO);
        let err = BottomLocalityExtractor::new()
            .extract(&onto, &Signature::new(), "not an iri")
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidModuleIri { .. }));
    }

    #[test]
    fn fresh_iris_are_unique() {
        let a = fresh_module_iri(MODULE_IRI_PREFIX);
        let b = fresh_module_iri(MODULE_IRI_PREFIX);
        assert!(a.starts_with("urn:causal-module:"));
        assert_ne!(a, b);
        assert!(NamedNode::new(a).is_ok());
    }
}
