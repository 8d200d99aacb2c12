//! Property relation closure.
//!
//! Expands a seed set of properties breadth-first along three relations:
//! equivalence, inversion (either direction of the assertion) and
//! sub-property. Sub-properties are only followed downward: a property's
//! super-properties are never added.

use std::collections::{BTreeSet, VecDeque};

use crate::entity::{Entity, Sentinels};
use crate::ontology::{EntityId, Ontology};

use super::set::EntitySet;

/// Breadth-first closure over property-to-property relations.
#[derive(Debug, Clone)]
pub struct PropertyClosure<'o> {
    ontology: &'o Ontology,
    sentinels: Sentinels,
}

/// A closure result together with the order properties were visited in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub properties: BTreeSet<Entity>,
    /// Each reachable property appears exactly once.
    pub visit_order: Vec<Entity>,
}

impl<'o> PropertyClosure<'o> {
    pub fn new(ontology: &'o Ontology, sentinels: Sentinels) -> Self {
        Self {
            ontology,
            sentinels,
        }
    }

    /// Close `seeds` under equivalence, inversion and sub-property edges.
    pub fn expand(&self, seeds: &[Entity]) -> BTreeSet<Entity> {
        self.expand_traced(seeds).properties
    }

    /// Like [`expand`](Self::expand), also reporting the visit order.
    pub fn expand_traced(&self, seeds: &[Entity]) -> Expansion {
        let onto = self.ontology;
        let mut visited = EntitySet::new(onto);
        let mut queue: VecDeque<EntityId> = VecDeque::new();
        let mut visit_order = Vec::new();
        let mut properties = BTreeSet::new();

        for seed in seeds.iter().filter(|e| !self.sentinels.contains(e)) {
            match onto.resolve(seed) {
                Some(id) => {
                    if visited.insert(id) {
                        queue.push_back(id);
                    }
                }
                // Unknown to the store: no neighbours, but still a seed.
                None => {
                    if properties.insert(seed.clone()) {
                        visit_order.push(seed.clone());
                    }
                }
            }
        }

        while let Some(cur) = queue.pop_front() {
            let entity = onto.entity(cur);
            visit_order.push(entity.clone());
            properties.insert(entity.clone());

            let neighbours = onto
                .equivalent_property_ids(cur)
                .chain(onto.inverse_property_ids(cur))
                .chain(onto.subproperty_ids(cur));
            for next in neighbours {
                if self.sentinels.contains(onto.entity(next)) {
                    continue;
                }
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        tracing::debug!(
            seeds = seeds.len(),
            expanded = properties.len(),
            "property closure"
        );
        Expansion {
            properties,
            visit_order,
        }
    }
}

/// Expand `seeds` with the OWL top/bottom object properties excluded.
pub fn expand_properties(ontology: &Ontology, seeds: &[Entity]) -> BTreeSet<Entity> {
    PropertyClosure::new(ontology, Sentinels::owl()).expand(seeds)
}
