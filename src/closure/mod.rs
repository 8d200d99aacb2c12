//! Signature closure engine.
//!
//! Three graph-reachability algorithms over the [`Ontology`](crate::ontology::Ontology)
//! arena:
//!
//! - [`upward_closure`]: a class set closed under superclass and
//!   equivalence edges.
//! - [`SignatureBuilder`]: the causal fixed point combining the hierarchy
//!   closure with domain/range propagation of causal properties.
//! - [`PropertyClosure`]: expansion of a property seed set along
//!   equivalence, inverse and (downward) sub-property edges.
//!
//! All three are total: they never fail and perform no I/O. Each run owns
//! its working sets, so independent runs may share one ontology across
//! threads.

pub mod causal;
pub mod hierarchy;
pub mod property;
mod set;

pub use causal::{Signature, SignatureBuilder};
pub use hierarchy::upward_closure;
pub use property::{Expansion, PropertyClosure, expand_properties};
