//! RDF syntax selection from file extensions.

use std::path::Path;

use oxigraph::io::RdfFormat;

/// Pick the RDF syntax for a document path.
///
/// `.owl` documents are assumed to be RDF/XML, which is what ontology editors
/// write by default.
pub fn format_for_path(path: &Path) -> Option<RdfFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "owl" | "rdf" | "xml" => Some(RdfFormat::RdfXml),
        "ttl" => Some(RdfFormat::Turtle),
        "nt" => Some(RdfFormat::NTriples),
        "nq" => Some(RdfFormat::NQuads),
        "trig" => Some(RdfFormat::TriG),
        "n3" => Some(RdfFormat::N3),
        other => RdfFormat::from_extension(other),
    }
}
