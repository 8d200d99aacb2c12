//! Hierarchy closure: upward saturation of a class set.
//!
//! Equivalent classes are folded into the superclass edges of the relation
//! graph, so one upward traversal covers both generalisation and
//! equivalence. Cycles are harmless: a class enters the set once.

use std::collections::{BTreeSet, VecDeque};

use crate::entity::Entity;
use crate::ontology::{EntityId, Ontology};

use super::set::EntitySet;

/// All classes reachable upward from `seeds`, the seeds included.
///
/// Seeds unknown to the ontology have no superclasses and are returned as
/// given. Non-class entities are ignored.
pub fn upward_closure<'a>(
    ontology: &Ontology,
    seeds: impl IntoIterator<Item = &'a Entity>,
) -> BTreeSet<Entity> {
    let mut closed = EntitySet::new(ontology);
    let mut unresolved = BTreeSet::new();
    let mut start = Vec::new();
    for seed in seeds.into_iter().filter(|e| e.is_class()) {
        match ontology.resolve(seed) {
            Some(id) => start.push(id),
            None => {
                unresolved.insert(seed.clone());
            }
        }
    }

    let seeds = start.len() + unresolved.len();
    let mut added = Vec::new();
    extend_upward(ontology, &mut closed, start, &mut added);
    tracing::debug!(seeds, closed = closed.len(), "upward closure");

    let mut out = closed.to_entities(ontology);
    out.extend(unresolved);
    out
}

/// Add `start` and everything above it to `closed`.
///
/// `closed` must already be superclass-closed; the traversal stops at
/// classes it contains. Newly added classes are appended to `added` in
/// breadth-first order.
pub(crate) fn extend_upward(
    ontology: &Ontology,
    closed: &mut EntitySet,
    start: impl IntoIterator<Item = EntityId>,
    added: &mut Vec<EntityId>,
) {
    let mut queue: VecDeque<EntityId> = VecDeque::new();
    for id in start {
        if closed.insert(id) {
            added.push(id);
            queue.push_back(id);
        }
    }
    while let Some(id) = queue.pop_front() {
        for sup in ontology.superclass_ids(id) {
            if closed.insert(sup) {
                added.push(sup);
                queue.push_back(sup);
            }
        }
    }
}
