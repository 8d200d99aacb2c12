//! Module persistence with crash-safe replacement.
//!
//! A module is serialized in full before anything touches the target. The
//! bytes go to a temporary file in the target's directory, which is then
//! renamed over the target. Where the rename is refused (e.g. across
//! devices on some platforms) the temporary file is copied instead. Either
//! way a failure leaves the previous target as it was.

use std::io::Write;
use std::path::{Path, PathBuf};

use oxigraph::io::{RdfFormat, RdfSerializer};

use crate::error::PersistError;
use crate::extract::Module;
use crate::ontology::format::format_for_path;

/// How the target file was replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replacement {
    /// Atomic rename of the temporary file.
    Renamed,
    /// Non-atomic copy after the rename was refused.
    Copied,
}

/// Outcome of a successful save.
#[derive(Debug, Clone)]
pub struct Saved {
    pub path: PathBuf,
    pub bytes: usize,
    pub replacement: Replacement,
}

/// Serialize `module` in `format` into `writer`.
pub fn write_module<W: Write>(module: &Module, format: RdfFormat, writer: W) -> std::io::Result<W> {
    let mut serializer = RdfSerializer::from_format(format).for_writer(writer);
    for triple in module.triples() {
        serializer.serialize_triple(triple.as_ref())?;
    }
    serializer.finish()
}

/// Save `module` to `target`, choosing the syntax from its extension.
///
/// Unknown extensions are written as RDF/XML.
pub fn save_module(module: &Module, target: &Path) -> Result<Saved, PersistError> {
    let format = format_for_path(target).unwrap_or(RdfFormat::RdfXml);
    let bytes = write_module(module, format, Vec::new()).map_err(|e| PersistError::Serialize {
        path: target.display().to_string(),
        message: e.to_string(),
    })?;
    let replacement = replace_file(target, &bytes)?;
    tracing::info!(
        path = %target.display(),
        iri = module.iri(),
        triples = module.triples().len(),
        ?replacement,
        "saved module"
    );
    Ok(Saved {
        path: target.to_path_buf(),
        bytes: bytes.len(),
        replacement,
    })
}

/// Replace `target` with `contents` via a sibling temporary file.
pub fn replace_file(target: &Path, contents: &[u8]) -> Result<Replacement, PersistError> {
    let write_err = |e: std::io::Error| PersistError::Write {
        path: target.display().to_string(),
        source: e,
    };

    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let stem = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{stem}."))
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    match tmp.persist(target) {
        Ok(_) => Ok(Replacement::Renamed),
        Err(refused) => {
            tracing::warn!(
                path = %target.display(),
                error = %refused.error,
                "atomic rename refused, falling back to copy"
            );
            std::fs::copy(refused.file.path(), target).map_err(|e| PersistError::Replace {
                path: target.display().to_string(),
                source: e,
            })?;
            Ok(Replacement::Copied)
        }
    }
}
