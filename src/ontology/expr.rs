//! Class and property expressions with syntactic locality tests.
//!
//! Anonymous class expressions are parsed from their blank-node encoding by
//! [`super::parse`]. Locality follows the syntactic ⊥-locality rules: every
//! entity outside the signature Σ is replaced by ⊥, and an expression is
//! *⊥-equivalent* / *⊤-equivalent* when that substitution provably makes it
//! empty / universal.

use std::collections::HashSet;

use crate::entity::{Entity, EntityKind};

use super::vocab::owl;

/// A property expression: a named property or the inverse of one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyExpr {
    Named(Entity),
    Inverse(Entity),
    /// A blank-node property expression that could not be interpreted.
    Anonymous,
}

impl PropertyExpr {
    /// The named property underneath, if any.
    pub fn entity(&self) -> Option<&Entity> {
        match self {
            PropertyExpr::Named(e) | PropertyExpr::Inverse(e) => Some(e),
            PropertyExpr::Anonymous => None,
        }
    }

    /// Only a named property outside Σ (or its inverse) becomes the empty relation.
    pub fn is_bottom(&self, sig: &HashSet<Entity>) -> bool {
        self.entity().is_some_and(|e| !sig.contains(e))
    }
}

/// A class expression in the OWL 2 constructors that affect locality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassExpr {
    Thing,
    Nothing,
    Named(Entity),
    Intersection(Vec<ClassExpr>),
    Union(Vec<ClassExpr>),
    Complement(Box<ClassExpr>),
    /// Enumeration of individuals (`owl:oneOf`).
    OneOf,
    Some {
        property: PropertyExpr,
        filler: Box<ClassExpr>,
    },
    All {
        property: PropertyExpr,
        filler: Box<ClassExpr>,
    },
    HasValue {
        property: PropertyExpr,
    },
    HasSelf {
        property: PropertyExpr,
    },
    Min {
        n: u64,
        property: PropertyExpr,
        filler: Box<ClassExpr>,
    },
    Max {
        n: u64,
        property: PropertyExpr,
        filler: Box<ClassExpr>,
    },
    Exact {
        n: u64,
        property: PropertyExpr,
        filler: Box<ClassExpr>,
    },
    /// A datatype or data range used as a filler.
    Datatype,
    /// A structure the mapping does not understand.
    Unknown,
}

impl ClassExpr {
    /// Append every class and property entity in this expression to `out`.
    ///
    /// `owl:Thing` and `owl:Nothing` are reported as classes.
    pub fn collect_signature(&self, out: &mut Vec<Entity>) {
        match self {
            ClassExpr::Named(e) => out.push(e.clone()),
            ClassExpr::Intersection(ops) | ClassExpr::Union(ops) => {
                for op in ops {
                    op.collect_signature(out);
                }
            }
            ClassExpr::Complement(inner) => inner.collect_signature(out),
            ClassExpr::Some { property, filler }
            | ClassExpr::All { property, filler }
            | ClassExpr::Min {
                property, filler, ..
            }
            | ClassExpr::Max {
                property, filler, ..
            }
            | ClassExpr::Exact {
                property, filler, ..
            } => {
                out.extend(property.entity().cloned());
                filler.collect_signature(out);
            }
            ClassExpr::HasValue { property } | ClassExpr::HasSelf { property } => {
                out.extend(property.entity().cloned());
            }
            ClassExpr::Thing => out.push(Entity::class(owl::THING)),
            ClassExpr::Nothing => out.push(Entity::class(owl::NOTHING)),
            ClassExpr::OneOf | ClassExpr::Datatype | ClassExpr::Unknown => {}
        }
    }

    /// Classes occurring anywhere in this expression, `owl:Thing` and
    /// `owl:Nothing` included.
    pub fn classes(&self) -> Vec<Entity> {
        let mut sig = Vec::new();
        self.collect_signature(&mut sig);
        sig.retain(|e| e.kind() == EntityKind::Class);
        sig
    }

    /// The expression is empty once every entity outside `sig` is ⊥.
    pub fn is_bottom(&self, sig: &HashSet<Entity>) -> bool {
        match self {
            ClassExpr::Nothing => true,
            ClassExpr::Named(e) => !sig.contains(e),
            ClassExpr::Intersection(ops) => ops.iter().any(|op| op.is_bottom(sig)),
            ClassExpr::Union(ops) => ops.iter().all(|op| op.is_bottom(sig)),
            ClassExpr::Complement(inner) => inner.is_top(sig),
            ClassExpr::Some { property, filler } => {
                property.is_bottom(sig) || filler.is_bottom(sig)
            }
            ClassExpr::HasValue { property } | ClassExpr::HasSelf { property } => {
                property.is_bottom(sig)
            }
            ClassExpr::Min {
                n,
                property,
                filler,
            }
            | ClassExpr::Exact {
                n,
                property,
                filler,
            } => *n >= 1 && (property.is_bottom(sig) || filler.is_bottom(sig)),
            ClassExpr::Thing
            | ClassExpr::OneOf
            | ClassExpr::All { .. }
            | ClassExpr::Max { .. }
            | ClassExpr::Datatype
            | ClassExpr::Unknown => false,
        }
    }

    /// The expression is universal once every entity outside `sig` is ⊥.
    pub fn is_top(&self, sig: &HashSet<Entity>) -> bool {
        match self {
            ClassExpr::Thing => true,
            ClassExpr::Intersection(ops) => ops.iter().all(|op| op.is_top(sig)),
            ClassExpr::Union(ops) => ops.iter().any(|op| op.is_top(sig)),
            ClassExpr::Complement(inner) => inner.is_bottom(sig),
            ClassExpr::All { property, filler } => {
                property.is_bottom(sig) || filler.is_top(sig)
            }
            ClassExpr::Max {
                property, filler, ..
            } => property.is_bottom(sig) || filler.is_bottom(sig),
            ClassExpr::Min { n, .. } => *n == 0,
            ClassExpr::Exact {
                n,
                property,
                filler,
            } => *n == 0 && (property.is_bottom(sig) || filler.is_bottom(sig)),
            ClassExpr::Nothing
            | ClassExpr::Named(_)
            | ClassExpr::OneOf
            | ClassExpr::Some { .. }
            | ClassExpr::HasValue { .. }
            | ClassExpr::HasSelf { .. }
            | ClassExpr::Datatype
            | ClassExpr::Unknown => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> ClassExpr {
        ClassExpr::Named(Entity::class(format!("http://ex.org/{name}")))
    }

    fn prop(name: &str) -> PropertyExpr {
        PropertyExpr::Named(Entity::object_property(format!("http://ex.org/{name}")))
    }

    fn sig(entities: &[&str]) -> HashSet<Entity> {
        entities
            .iter()
            .flat_map(|n| {
                [
                    Entity::class(format!("http://ex.org/{n}")),
                    Entity::object_property(format!("http://ex.org/{n}")),
                ]
            })
            .collect()
    }

    #[test]
    fn named_class_is_bottom_outside_signature() {
        assert!(class("Dog").is_bottom(&sig(&[])));
        assert!(!class("Dog").is_bottom(&sig(&["Dog"])));
        assert!(!class("Dog").is_top(&sig(&["Dog"])));
    }

    #[test]
    fn existential_needs_property_and_filler() {
        let expr = ClassExpr::Some {
            property: prop("hasParent"),
            filler: Box::new(class("Mammal")),
        };
        assert!(expr.is_bottom(&sig(&["Mammal"])));
        assert!(expr.is_bottom(&sig(&["hasParent"])));
        assert!(!expr.is_bottom(&sig(&["hasParent", "Mammal"])));
    }

    #[test]
    fn universal_restriction_on_missing_property_is_top() {
        let expr = ClassExpr::All {
            property: prop("eats"),
            filler: Box::new(class("Plant")),
        };
        assert!(expr.is_top(&sig(&[])));
        assert!(!expr.is_top(&sig(&["eats"])));
    }

    #[test]
    fn boolean_constructors() {
        let both = ClassExpr::Intersection(vec![class("A"), class("B")]);
        let either = ClassExpr::Union(vec![class("A"), class("B")]);
        assert!(both.is_bottom(&sig(&["A"])));
        assert!(!either.is_bottom(&sig(&["A"])));
        assert!(either.is_bottom(&sig(&[])));

        let not_a = ClassExpr::Complement(Box::new(class("A")));
        assert!(not_a.is_top(&sig(&[])));
        assert!(!not_a.is_bottom(&sig(&[])));
    }

    #[test]
    fn signature_walks_nested_expressions() {
        let expr = ClassExpr::Intersection(vec![
            class("A"),
            ClassExpr::Some {
                property: PropertyExpr::Inverse(Entity::object_property("http://ex.org/p")),
                filler: Box::new(ClassExpr::Union(vec![class("B"), ClassExpr::Thing])),
            },
        ]);
        let classes = expr.classes();
        assert_eq!(classes.len(), 3);
        assert!(classes.contains(&Entity::class(owl::THING)));
        let mut all = Vec::new();
        expr.collect_signature(&mut all);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn unknown_is_neither_top_nor_bottom() {
        assert!(!ClassExpr::Unknown.is_bottom(&sig(&[])));
        assert!(!ClassExpr::Unknown.is_top(&sig(&[])));
    }
}
