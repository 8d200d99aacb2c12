//! # causal-prune
//!
//! Causal signature closure and ⊥-locality module extraction for OWL
//! ontologies.
//!
//! Given seed classes and a set of "causal" object properties, the
//! [`closure::SignatureBuilder`] computes the smallest signature that is
//! closed under the class hierarchy and pulls in every causal property whose
//! domain or range touches an included class. The signature is handed to a
//! [`extract::ModuleExtractor`] and the resulting sub-ontology is written
//! back with a crash-safe replace.
//!
//! ## Architecture
//!
//! - **Axiom store** (`ontology`): RDF documents parsed with `oxigraph`,
//!   mapped onto a `petgraph` relation graph plus an axiom table
//! - **Closure engine** (`closure`): hierarchy closure, the causal fixed
//!   point and property relation closure over the graph's node arena
//! - **Extraction** (`extract`, `persist`): syntactic ⊥-modules, serialization
//!   and atomic replacement
//! - **Tooling** (`keyword`, `seeds`, `diff`, `workflow`): keyword property
//!   search, seed files, signature diff reports and the CLI workflows
//!
//! ## Library usage
//!
//! ```no_run
//! use std::path::Path;
//! use causal_prune::closure::SignatureBuilder;
//! use causal_prune::entity::Entity;
//! use causal_prune::ontology::Ontology;
//!
//! let onto = Ontology::load(Path::new("zoo.owl")).unwrap();
//! let signature = SignatureBuilder::new(&onto).build(
//!     &[Entity::class("http://example.org/zoo#Dog")],
//!     &[Entity::object_property("http://example.org/zoo#hasParent")],
//! );
//! for entity in &signature {
//!     println!("{entity}");
//! }
//! ```

// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

pub mod closure;
pub mod config;
pub mod diff;
pub mod entity;
pub mod error;
pub mod extract;
pub mod keyword;
pub mod ontology;
pub mod paths;
pub mod persist;
pub mod seeds;
pub mod workflow;
