//! Logical axioms recovered from the RDF encoding.
//!
//! Each [`Axiom`] remembers the indices of the triples that encode it (the
//! main triple plus every blank-node triple of its anonymous operands), so a
//! module can be written back out as the exact subset of the source graph.

use std::collections::HashSet;

use crate::entity::Entity;

use super::expr::{ClassExpr, PropertyExpr};

/// The axiom shapes relevant to locality-based module extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxiomKind {
    SubClassOf { sub: ClassExpr, sup: ClassExpr },
    EquivalentClasses(Vec<ClassExpr>),
    DisjointClasses(Vec<ClassExpr>),
    Domain { property: PropertyExpr, class: ClassExpr },
    Range { property: PropertyExpr, class: ClassExpr },
    SubPropertyOf { sub: PropertyExpr, sup: PropertyExpr },
    EquivalentProperties(Vec<PropertyExpr>),
    InverseProperties(PropertyExpr, PropertyExpr),
    DisjointProperties(Vec<PropertyExpr>),
    /// Functional, transitive, symmetric, ... A reflexivity axiom is never
    /// local, the others are local exactly when the property is ⊥.
    Characteristic { property: PropertyExpr, reflexive: bool },
    ClassAssertion { class: ClassExpr },
    PropertyAssertion { property: PropertyExpr },
}

/// An axiom together with the triples encoding it.
#[derive(Debug, Clone)]
pub struct Axiom {
    pub kind: AxiomKind,
    /// Sorted, de-duplicated indices into the ontology's triple table.
    pub triples: Vec<usize>,
}

impl Axiom {
    pub(crate) fn new(kind: AxiomKind, mut triples: Vec<usize>) -> Self {
        triples.sort_unstable();
        triples.dedup();
        Self { kind, triples }
    }

    /// Every class and property entity the axiom mentions.
    pub fn signature(&self) -> Vec<Entity> {
        let mut out = Vec::new();
        let props = |ps: &[&PropertyExpr], out: &mut Vec<Entity>| {
            out.extend(ps.iter().filter_map(|p| p.entity().cloned()));
        };
        match &self.kind {
            AxiomKind::SubClassOf { sub, sup } => {
                sub.collect_signature(&mut out);
                sup.collect_signature(&mut out);
            }
            AxiomKind::EquivalentClasses(ops) | AxiomKind::DisjointClasses(ops) => {
                for op in ops {
                    op.collect_signature(&mut out);
                }
            }
            AxiomKind::Domain { property, class } | AxiomKind::Range { property, class } => {
                props(&[property], &mut out);
                class.collect_signature(&mut out);
            }
            AxiomKind::SubPropertyOf { sub, sup } | AxiomKind::InverseProperties(sub, sup) => {
                props(&[sub, sup], &mut out);
            }
            AxiomKind::EquivalentProperties(ops) | AxiomKind::DisjointProperties(ops) => {
                let refs: Vec<&PropertyExpr> = ops.iter().collect();
                props(&refs, &mut out);
            }
            AxiomKind::Characteristic { property, .. }
            | AxiomKind::PropertyAssertion { property } => props(&[property], &mut out),
            AxiomKind::ClassAssertion { class } => class.collect_signature(&mut out),
        }
        out.sort();
        out.dedup();
        out
    }

    /// Whether the axiom becomes a tautology once every entity outside `sig`
    /// is replaced by ⊥.
    pub fn is_bottom_local(&self, sig: &HashSet<Entity>) -> bool {
        match &self.kind {
            AxiomKind::SubClassOf { sub, sup } => sub.is_bottom(sig) || sup.is_top(sig),
            AxiomKind::EquivalentClasses(ops) => {
                ops.iter().all(|op| op.is_bottom(sig)) || ops.iter().all(|op| op.is_top(sig))
            }
            AxiomKind::DisjointClasses(ops) => {
                ops.iter().filter(|op| !op.is_bottom(sig)).count() <= 1
            }
            AxiomKind::Domain { property, class } | AxiomKind::Range { property, class } => {
                property.is_bottom(sig) || class.is_top(sig)
            }
            AxiomKind::SubPropertyOf { sub, .. } => sub.is_bottom(sig),
            AxiomKind::EquivalentProperties(ops) => ops.iter().all(|p| p.is_bottom(sig)),
            AxiomKind::InverseProperties(a, b) => a.is_bottom(sig) && b.is_bottom(sig),
            AxiomKind::DisjointProperties(ops) => {
                ops.iter().filter(|p| !p.is_bottom(sig)).count() <= 1
            }
            AxiomKind::Characteristic {
                property,
                reflexive,
            } => !reflexive && property.is_bottom(sig),
            AxiomKind::ClassAssertion { class } => class.is_top(sig),
            AxiomKind::PropertyAssertion { .. } => false,
        }
    }
}
