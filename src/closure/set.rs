//! Index-based entity sets over an ontology's node arena.

use std::collections::BTreeSet;

use petgraph::visit::{VisitMap, Visitable};

use crate::entity::Entity;
use crate::ontology::{EntityId, Ontology, RelationGraph};

/// Append-only set of arena indices.
///
/// Membership is a bitset sized to the arena; `members` keeps insertion
/// order so callers can walk a frontier without re-scanning the bitset.
pub(crate) struct EntitySet {
    seen: <RelationGraph as Visitable>::Map,
    members: Vec<EntityId>,
}

impl EntitySet {
    pub(crate) fn new(ontology: &Ontology) -> Self {
        Self {
            seen: ontology.graph().visit_map(),
            members: Vec::new(),
        }
    }

    /// Insert `id`; returns `true` when it was not already present.
    pub(crate) fn insert(&mut self, id: EntityId) -> bool {
        if self.seen.visit(id) {
            self.members.push(id);
            true
        } else {
            false
        }
    }

    pub(crate) fn contains(&self, id: EntityId) -> bool {
        self.seen.is_visited(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.members.len()
    }

    /// Members in insertion order.
    pub(crate) fn ids(&self) -> &[EntityId] {
        &self.members
    }

    pub(crate) fn to_entities(&self, ontology: &Ontology) -> BTreeSet<Entity> {
        self.members
            .iter()
            .map(|&id| ontology.entity(id).clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::fixtures::{ZOO, turtle, zoo};

    #[test]
    fn insert_reports_novelty_and_keeps_order() {
        let onto = turtle(ZOO);
        let dog = onto.resolve(&Entity::class(zoo("Dog"))).unwrap();
        let plant = onto.resolve(&Entity::class(zoo("Plant"))).unwrap();

        let mut set = EntitySet::new(&onto);
        assert!(set.insert(plant));
        assert!(set.insert(dog));
        assert!(!set.insert(plant));
        assert_eq!(set.len(), 2);
        assert_eq!(set.ids(), &[plant, dog]);
        assert!(set.contains(dog));
        assert_eq!(
            set.to_entities(&onto),
            [Entity::class(zoo("Dog")), Entity::class(zoo("Plant"))].into()
        );
    }
}
