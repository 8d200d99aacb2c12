//! Causal signature builder.
//!
//! Starting from the upward closure of the seed classes, a causal property
//! joins the signature as soon as its domain or range touches a class in the
//! closure; its domain and range classes are then closed upward too, which
//! may in turn qualify further properties.
//!
//! Rather than re-scanning every property on every pass, each run builds a
//! watcher index (class → causal properties mentioning it) and drives a work
//! queue of newly closed classes. The result is the same fixed point: a
//! property qualifies exactly when some class of its domain or range ever
//! enters the closure, and inclusion is never revoked.

use std::collections::{BTreeSet, HashMap, VecDeque};

use rayon::prelude::*;

use crate::entity::{Entity, Sentinels};
use crate::ontology::{EntityId, Ontology};

use super::hierarchy::extend_upward;
use super::set::EntitySet;

/// A finished signature: classes and causal properties, ordered by IRI.
pub type Signature = BTreeSet<Entity>;

/// Computes causal signatures against one read-only ontology.
///
/// The builder holds no per-run state, so a single instance can serve
/// concurrent runs.
#[derive(Debug, Clone)]
pub struct SignatureBuilder<'o> {
    ontology: &'o Ontology,
    sentinels: Sentinels,
}

impl<'o> SignatureBuilder<'o> {
    pub fn new(ontology: &'o Ontology) -> Self {
        Self {
            ontology,
            sentinels: Sentinels::owl(),
        }
    }

    /// Replace the sentinel properties excluded from every result.
    pub fn with_sentinels(mut self, sentinels: Sentinels) -> Self {
        self.sentinels = sentinels;
        self
    }

    /// Build the closed signature for `seeds` (classes) and `causal`
    /// (properties).
    ///
    /// Unknown seed classes are kept in the result with no neighbours;
    /// unknown causal properties never qualify.
    pub fn build(&self, seeds: &[Entity], causal: &[Entity]) -> Signature {
        let onto = self.ontology;
        let mut classes = EntitySet::new(onto);
        let mut unresolved = Signature::new();
        let mut start = Vec::new();
        for seed in seeds.iter().filter(|e| e.is_class()) {
            match onto.resolve(seed) {
                Some(id) => start.push(id),
                None => {
                    unresolved.insert(seed.clone());
                }
            }
        }

        let mut added = Vec::new();
        extend_upward(onto, &mut classes, start, &mut added);
        let mut queue: VecDeque<EntityId> = added.drain(..).collect();

        let properties = self.resolve_properties(causal);
        let watchers = self.watchers(&properties);
        let mut qualified = vec![false; properties.len()];

        while let Some(class) = queue.pop_front() {
            let Some(slots) = watchers.get(&class) else {
                continue;
            };
            for &slot in slots {
                if qualified[slot] {
                    continue;
                }
                qualified[slot] = true;
                let p = properties[slot];
                extend_upward(
                    onto,
                    &mut classes,
                    onto.domain_ids(p).chain(onto.range_ids(p)),
                    &mut added,
                );
                queue.extend(added.drain(..));
            }
        }

        let mut sigma = classes.to_entities(onto);
        sigma.extend(unresolved);
        let before = sigma.len();
        sigma.extend(
            properties
                .iter()
                .zip(&qualified)
                .filter(|(_, q)| **q)
                .map(|(&p, _)| onto.entity(p).clone()),
        );
        sigma.retain(|e| !self.sentinels.contains(e));

        tracing::debug!(
            seeds = seeds.len(),
            causal = causal.len(),
            classes = before,
            properties = sigma.len().saturating_sub(before),
            "built causal signature"
        );
        sigma
    }

    /// Build one signature per seed set, in parallel.
    pub fn build_many(&self, seed_sets: &[Vec<Entity>], causal: &[Entity]) -> Vec<Signature> {
        seed_sets
            .par_iter()
            .map(|seeds| self.build(seeds, causal))
            .collect()
    }

    /// Resolved, de-duplicated causal properties minus the sentinels.
    fn resolve_properties(&self, causal: &[Entity]) -> Vec<EntityId> {
        let mut seen = EntitySet::new(self.ontology);
        causal
            .iter()
            .filter(|p| p.is_property() && !self.sentinels.contains(p))
            .filter_map(|p| self.ontology.resolve(p))
            .filter(|&id| seen.insert(id))
            .collect()
    }

    /// Class → positions in `properties` whose domain or range mentions it.
    fn watchers(&self, properties: &[EntityId]) -> HashMap<EntityId, Vec<usize>> {
        let onto = self.ontology;
        let mut watchers: HashMap<EntityId, Vec<usize>> = HashMap::new();
        for (slot, &p) in properties.iter().enumerate() {
            for class in onto.domain_ids(p).chain(onto.range_ids(p)) {
                let entry = watchers.entry(class).or_default();
                if entry.last() != Some(&slot) {
                    entry.push(slot);
                }
            }
        }
        watchers
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

    /// The zoo plus a chain of causal properties that only qualify one
    /// after another.
    const CHAIN: &str = r#"
        @prefix : <http://example.org/zoo#> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

        :Animal a owl:Class .
        :Mammal a owl:Class ; rdfs:subClassOf :Animal .
        :Dog a owl:Class ; rdfs:subClassOf :Mammal .
        :Plant a owl:Class .
        :Seed a owl:Class ; rdfs:subClassOf :Plant .
        :Soil a owl:Class .
        :Rock a owl:Class .

        :hasParent a owl:ObjectProperty ; rdfs:domain :Dog ; rdfs:range :Mammal .
        :eats a owl:ObjectProperty ; rdfs:domain :Animal ; rdfs:range :Seed .
        :growsIn a owl:ObjectProperty ; rdfs:domain :Plant ; rdfs:range :Soil .
        :erodes a owl:ObjectProperty ; rdfs:domain :Rock ; rdfs:range :Rock .
    "#;

    fn all_causal() -> Vec<Entity> {
        ["hasParent", "eats", "growsIn", "erodes"]
            .iter()
            .map(|n| prop(n))
            .collect()
    }

    #[test]
    fn scenario_dog_pulls_in_has_parent() {
        let onto = turtle(ZOO);
        let sig = SignatureBuilder::new(&onto).build(&[class("Dog")], &[prop("hasParent")]);
        assert_eq!(
            sig,
            [class("Dog"), class("Mammal"), class("Animal"), prop("hasParent")].into()
        );
    }

    #[test]
    fn scenario_unrelated_seed_excludes_property() {
        let onto = turtle(ZOO);
        let sig = SignatureBuilder::new(&onto).build(&[class("Plant")], &[prop("hasParent")]);
        assert_eq!(sig, [class("Plant")].into());
    }

    #[test]
    fn properties_qualify_transitively() {
        let onto = turtle(CHAIN);
        let sig = SignatureBuilder::new(&onto).build(&[class("Dog")], &all_causal());
        // Dog → Animal qualifies eats → Seed ⊑ Plant qualifies growsIn → Soil.
        for e in [
            class("Dog"),
            class("Mammal"),
            class("Animal"),
            class("Seed"),
            class("Plant"),
            class("Soil"),
            prop("hasParent"),
            prop("eats"),
            prop("growsIn"),
        ] {
            assert!(sig.contains(&e), "missing {e}");
        }
        assert!(!sig.contains(&prop("erodes")));
        assert!(!sig.contains(&class("Rock")));
    }

    #[test]
    fn order_of_causal_properties_does_not_matter() {
        let onto = turtle(CHAIN);
        let builder = SignatureBuilder::new(&onto);
        let mut reversed = all_causal();
        reversed.reverse();
        assert_eq!(
            builder.build(&[class("Dog")], &all_causal()),
            builder.build(&[class("Dog")], &reversed)
        );
    }

    #[test]
    fn monotone_in_seeds_and_properties() {
        let onto = turtle(CHAIN);
        let builder = SignatureBuilder::new(&onto);
        let causal = all_causal();

        let small = builder.build(&[class("Plant")], &causal);
        let large = builder.build(&[class("Plant"), class("Rock")], &causal);
        assert!(small.is_subset(&large));

        let fewer = builder.build(&[class("Dog")], &causal[..1]);
        let more = builder.build(&[class("Dog")], &causal);
        assert!(fewer.is_subset(&more));
    }

    #[test]
    fn rebuilding_from_the_closed_classes_is_idempotent() {
        let onto = turtle(CHAIN);
        let builder = SignatureBuilder::new(&onto);
        let causal = all_causal();
        let first = builder.build(&[class("Dog")], &causal);
        let classes: Vec<Entity> = first.iter().filter(|e| e.is_class()).cloned().collect();
        assert_eq!(builder.build(&classes, &causal), first);
    }

    #[test]
    fn signature_is_superclass_closed() {
        let onto = turtle(CHAIN);
        let sig = SignatureBuilder::new(&onto).build(&[class("Dog")], &all_causal());
        for c in sig.iter().filter(|e| e.is_class()) {
            for sup in onto.superclasses_of(c) {
                assert!(sig.contains(&sup));
            }
        }
    }

    #[test]
    fn sentinels_never_qualify() {
        let onto = turtle(
            r#"
            @prefix : <http://example.org/zoo#> .
            @prefix owl: <http://www.w3.org/2002/07/owl#> .
            @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
            :Dog a owl:Class .
            owl:topObjectProperty rdfs:domain :Dog .
            "#,
        );
        let sig = SignatureBuilder::new(&onto).build(&[class("Dog")], &[Sentinels::owl().top]);
        assert_eq!(sig, [class("Dog")].into());
    }

    #[test]
    fn unknown_causal_property_is_ignored() {
        let onto = turtle(ZOO);
        let sig = SignatureBuilder::new(&onto).build(&[class("Dog")], &[prop("ghost")]);
        assert_eq!(sig, [class("Dog"), class("Mammal"), class("Animal")].into());
    }

    const TOP: &str = r#"
        @prefix : <http://example.org/zoo#> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

        :Dog a owl:Class ; rdfs:subClassOf owl:Thing .
        :Plant a owl:Class .
        :hasParent a owl:ObjectProperty ; rdfs:domain :Dog ; rdfs:range owl:Thing .
        :affects a owl:ObjectProperty ; rdfs:domain owl:Thing ; rdfs:range :Plant .
    "#;

    fn thing() -> Entity {
        Entity::class(crate::ontology::vocab::owl::THING)
    }

    #[test]
    fn owl_thing_in_range_cascades_to_properties_on_thing() {
        let onto = turtle(TOP);
        let sig = SignatureBuilder::new(&onto)
            .build(&[class("Dog")], &[prop("hasParent"), prop("affects")]);
        assert_eq!(
            sig,
            [
                class("Dog"),
                thing(),
                class("Plant"),
                prop("hasParent"),
                prop("affects")
            ]
            .into()
        );
    }

    #[test]
    fn owl_thing_seed_qualifies_properties_on_thing() {
        let onto = turtle(TOP);
        let sig = SignatureBuilder::new(&onto).build(&[thing()], &[prop("affects")]);
        assert_eq!(sig, [thing(), class("Plant"), prop("affects")].into());
    }

    #[test]
    fn build_many_matches_sequential_builds() {
        let onto = turtle(CHAIN);
        let builder = SignatureBuilder::new(&onto);
        let causal = all_causal();
        let seed_sets = vec![vec![class("Dog")], vec![class("Rock")], vec![]];
        let parallel = builder.build_many(&seed_sets, &causal);
        let sequential: Vec<Signature> = seed_sets
            .iter()
            .map(|s| builder.build(s, &causal))
            .collect();
        assert_eq!(parallel, sequential);
        assert!(parallel[2].is_empty());
    }
}
