//! Rich diagnostic error types for causal-prune.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains. The closure algorithms
//! themselves never fail; every error here originates at an I/O boundary.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, sources) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum PruneError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Ontology(#[from] OntologyError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Seed(#[from] SeedError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Report(#[from] ReportError),
}

// ---------------------------------------------------------------------------
// Ontology (axiom store) errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum OntologyError {
    #[error("unreadable ontology document {path}: {message}")]
    #[diagnostic(
        code(prune::ontology::unreadable),
        help(
            "The document could not be parsed as RDF. Only RDF serializations \
             (RDF/XML, Turtle, N-Triples, N-Quads, TriG, N3) are supported; \
             convert OWL/XML or Functional Syntax documents first."
        )
    )]
    Unreadable { path: String, message: String },

    #[error("failed to open ontology document {path}")]
    #[diagnostic(
        code(prune::ontology::io),
        help("Check that the file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot infer the RDF syntax of {path}")]
    #[diagnostic(
        code(prune::ontology::unknown_format),
        help("Use one of the extensions .owl, .rdf, .xml, .ttl, .nt, .nq, .trig or .n3.")
    )]
    UnknownFormat { path: String },
}

// ---------------------------------------------------------------------------
// Persistence errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum PersistError {
    #[error("failed to serialize module for {path}: {message}")]
    #[diagnostic(
        code(prune::persist::serialize),
        help("The module could not be encoded in the requested RDF syntax.")
    )]
    Serialize { path: String, message: String },

    #[error("failed to write temporary module file next to {path}")]
    #[diagnostic(
        code(prune::persist::write),
        help(
            "Check that the target directory exists, is writable and the disk is not full. \
             The previous target file was left untouched."
        )
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to replace {path}")]
    #[diagnostic(
        code(prune::persist::replace),
        help(
            "Neither the atomic rename nor the fallback copy succeeded. \
             The previous target file was left untouched."
        )
    )]
    Replace {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Seed file errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum SeedError {
    #[error("failed to read seed file {path}")]
    #[diagnostic(
        code(prune::seed::read),
        help("Seed files are plain text with one IRI per line; check the path.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid IRI {iri}: {message}")]
    #[diagnostic(
        code(prune::seed::invalid_iri),
        help("Pass an absolute IRI, e.g. http://example.org/onto#Dog.")
    )]
    InvalidIri { iri: String, message: String },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("cannot determine home directory")]
    #[diagnostic(
        code(prune::config::no_home),
        help("Set the HOME environment variable or pass --config explicitly.")
    )]
    NoHome,

    #[error("failed to read config file: {path}")]
    #[diagnostic(
        code(prune::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config file: {path}")]
    #[diagnostic(
        code(prune::config::write),
        help("Check that the config directory is writable.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    #[diagnostic(
        code(prune::config::parse),
        help("Check the TOML syntax; see the [search] and [extract] tables in the README.")
    )]
    Parse { path: String, message: String },
}

// ---------------------------------------------------------------------------
// Extraction errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ExtractError {
    #[error("invalid module IRI {iri}: {message}")]
    #[diagnostic(
        code(prune::extract::invalid_iri),
        help("Module identifiers must be absolute IRIs, e.g. urn:causal-module:<uuid>.")
    )]
    InvalidModuleIri { iri: String, message: String },
}

// ---------------------------------------------------------------------------
// Report errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    #[error("failed to write report {path}")]
    #[diagnostic(
        code(prune::report::write),
        help("Check that the output directory is writable.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for functions returning causal-prune results.
pub type PruneResult<T> = std::result::Result<T, PruneError>;
