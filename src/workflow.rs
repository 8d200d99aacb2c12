//! End-to-end workflows behind the command-line subcommands.
//!
//! Each workflow loads its inputs, runs the closure engine and hands the
//! result to the extractor, the writer or the report generator. All errors
//! come from the I/O boundary; the closure steps themselves cannot fail.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use oxigraph::model::NamedNode;
use serde::Serialize;

use crate::closure::{PropertyClosure, Signature, SignatureBuilder};
use crate::diff::{self, IriStyle, OntologyDiff};
use crate::entity::{Entity, EntityKind, Sentinels};
use crate::error::{PruneResult, SeedError};
use crate::extract::{
    AUGMENT_IRI_PREFIX, BottomLocalityExtractor, MODULE_IRI_PREFIX, ModuleExtractor,
    fresh_module_iri,
};
use crate::keyword::{KeywordQuery, find_by_keyword};
use crate::ontology::Ontology;
use crate::persist::{self, Saved};
use crate::seeds;

/// Log every entity the ontology does not know. Not an error: the closure
/// treats such entities as having no neighbours.
fn warn_unresolved(ontology: &Ontology, entities: &[Entity], role: &str) -> usize {
    let mut missing = 0;
    for entity in entities.iter().filter(|e| !ontology.contains(e)) {
        tracing::warn!(iri = entity.iri(), role, "not found in ontology");
        missing += 1;
    }
    missing
}

// ---------------------------------------------------------------------------
// extract
// ---------------------------------------------------------------------------

/// Inputs of the `extract` workflow.
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub ontology: PathBuf,
    pub classes: PathBuf,
    pub properties: PathBuf,
    pub output: PathBuf,
    pub include_annotations: bool,
}

/// What `extract` and `augment` produced.
#[derive(Debug, Clone)]
pub struct ModuleOutcome {
    pub signature: Signature,
    pub module_iri: String,
    pub axioms: usize,
    pub saved: Saved,
}

/// Build the causal signature for seed classes and save its ⊥-module.
pub fn extract(req: &ExtractRequest) -> PruneResult<ModuleOutcome> {
    let ontology = Ontology::load(&req.ontology)?;
    let classes = seeds::read_classes(&req.classes)?;
    let causal = seeds::read_properties(&req.properties)?;
    warn_unresolved(&ontology, &classes, "seed class");
    warn_unresolved(&ontology, &causal, "causal property");

    let signature = SignatureBuilder::new(&ontology).build(&classes, &causal);
    tracing::info!(
        seeds = classes.len(),
        causal = causal.len(),
        signature = signature.len(),
        "built signature"
    );

    module_to_file(
        &ontology,
        signature,
        MODULE_IRI_PREFIX,
        req.include_annotations,
        &req.output,
    )
}

fn module_to_file(
    ontology: &Ontology,
    signature: Signature,
    prefix: &str,
    include_annotations: bool,
    target: &Path,
) -> PruneResult<ModuleOutcome> {
    let module_iri = fresh_module_iri(prefix);
    let module = BottomLocalityExtractor::new()
        .with_annotations(include_annotations)
        .extract(ontology, &signature, &module_iri)?;
    let saved = persist::save_module(&module, target)?;
    Ok(ModuleOutcome {
        signature,
        module_iri,
        axioms: module.axiom_count(),
        saved,
    })
}

// ---------------------------------------------------------------------------
// augment
// ---------------------------------------------------------------------------

/// Inputs of the `augment` workflow.
#[derive(Debug, Clone)]
pub struct AugmentRequest {
    /// The original, unpruned ontology.
    pub full: PathBuf,
    /// The current module.
    pub module: PathBuf,
    /// IRI of the class to inject.
    pub add: String,
    pub properties: PathBuf,
    /// Where to write; `None` replaces `module` in place.
    pub output: Option<PathBuf>,
    pub include_annotations: bool,
}

impl AugmentRequest {
    pub fn target(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.module)
    }

    /// Whether the augmented module replaces the current one.
    pub fn in_place(&self) -> bool {
        let abs = |p: &Path| std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf());
        abs(self.target()) == abs(&self.module)
    }
}

/// Re-extract a module from the full ontology with one extra seed class.
///
/// The seeds are every class of the current module plus the added one; the
/// signature and module are computed against the full ontology, not the
/// pruned module.
pub fn augment(req: &AugmentRequest) -> PruneResult<ModuleOutcome> {
    NamedNode::new(req.add.as_str()).map_err(|e| SeedError::InvalidIri {
        iri: req.add.clone(),
        message: e.to_string(),
    })?;

    let full = Ontology::load(&req.full)?;
    let current = Ontology::load(&req.module)?;
    let causal = seeds::read_properties(&req.properties)?;

    let mut classes: Vec<Entity> = current.classes().into_iter().collect();
    let module_classes = classes.len();
    let added = Entity::class(req.add.as_str());
    if !classes.contains(&added) {
        classes.push(added);
    }
    warn_unresolved(&full, &classes, "seed class");
    warn_unresolved(&full, &causal, "causal property");

    let signature = SignatureBuilder::new(&full).build(&classes, &causal);
    tracing::info!(
        module_classes,
        signature = signature.len(),
        "built augmented signature"
    );

    module_to_file(
        &full,
        signature,
        AUGMENT_IRI_PREFIX,
        req.include_annotations,
        req.target(),
    )
}

// ---------------------------------------------------------------------------
// find-props
// ---------------------------------------------------------------------------

/// Inputs of the `find-props` workflow.
#[derive(Debug, Clone)]
pub struct FindRequest {
    pub ontology: PathBuf,
    pub output: PathBuf,
    pub query: KeywordQuery,
}

#[derive(Debug, Clone)]
pub struct FindOutcome {
    /// Direct keyword hits.
    pub matched: BTreeSet<Entity>,
    /// Hits closed under equivalence, inversion and sub-properties.
    pub properties: BTreeSet<Entity>,
    pub output: PathBuf,
}

/// Default output file of `find-props`.
pub const DEFAULT_PROPERTIES_FILE: &str = "causal_properties.txt";

/// Find causal candidate properties by keyword and write them one per line.
pub fn find_properties(req: &FindRequest) -> PruneResult<FindOutcome> {
    let ontology = Ontology::load(&req.ontology)?;
    let matched = find_by_keyword(&ontology, &req.query);
    let seeds: Vec<Entity> = matched.iter().cloned().collect();
    let properties = PropertyClosure::new(&ontology, Sentinels::owl()).expand(&seeds);
    tracing::info!(
        keyword = req.query.keyword(),
        matched = matched.len(),
        expanded = properties.len(),
        "found causal properties"
    );

    let iris: BTreeSet<&str> = properties.iter().map(|p| p.iri()).collect();
    let mut text = String::new();
    for iri in iris {
        text.push_str(iri);
        text.push('\n');
    }
    persist::replace_file(&req.output, text.as_bytes())?;

    Ok(FindOutcome {
        matched,
        properties,
        output: req.output.clone(),
    })
}

// ---------------------------------------------------------------------------
// diff
// ---------------------------------------------------------------------------

/// Inputs of the `diff` workflow.
#[derive(Debug, Clone)]
pub struct DiffRequest {
    pub a: PathBuf,
    pub b: PathBuf,
    pub style: IriStyle,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct DiffOutcome {
    pub diff: OntologyDiff,
    pub report: String,
    pub output: PathBuf,
}

/// Compare two ontologies and write the report.
pub fn diff(req: &DiffRequest) -> PruneResult<DiffOutcome> {
    let a = Ontology::load(&req.a)?;
    let b = Ontology::load(&req.b)?;
    let diff = OntologyDiff::compute(&a, &b, req.style);
    let report = diff.render(&req.a, &req.b, req.style);
    let output = req
        .output
        .clone()
        .unwrap_or_else(|| diff::default_report_path(&req.a, &req.b));
    diff::write_report(&output, &report)?;
    Ok(DiffOutcome {
        diff,
        report,
        output,
    })
}

// ---------------------------------------------------------------------------
// signature
// ---------------------------------------------------------------------------

/// Inputs of the `signature` workflow.
#[derive(Debug, Clone)]
pub struct SignatureRequest {
    pub ontology: PathBuf,
    /// One signature is computed per file.
    pub class_files: Vec<PathBuf>,
    pub properties: PathBuf,
}

/// A signature as printed by the `signature` subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureReport {
    pub classes_file: String,
    pub entities: Vec<EntityRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRecord {
    pub kind: EntityKind,
    pub iri: String,
}

impl From<&Entity> for EntityRecord {
    fn from(e: &Entity) -> Self {
        Self {
            kind: e.kind(),
            iri: e.iri().to_string(),
        }
    }
}

/// Compute one signature per seed class file, in parallel.
pub fn signatures(req: &SignatureRequest) -> PruneResult<Vec<SignatureReport>> {
    let ontology = Ontology::load(&req.ontology)?;
    let causal = seeds::read_properties(&req.properties)?;
    warn_unresolved(&ontology, &causal, "causal property");

    let mut seed_sets = Vec::with_capacity(req.class_files.len());
    for path in &req.class_files {
        let classes = seeds::read_classes(path)?;
        warn_unresolved(&ontology, &classes, "seed class");
        seed_sets.push(classes);
    }

    let built = SignatureBuilder::new(&ontology).build_many(&seed_sets, &causal);
    Ok(req
        .class_files
        .iter()
        .zip(built)
        .map(|(path, signature)| SignatureReport {
            classes_file: path.display().to_string(),
            entities: signature.iter().map(EntityRecord::from).collect(),
        })
        .collect())
}
