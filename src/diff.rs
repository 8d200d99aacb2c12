//! Signature difference report between two ontologies.
//!
//! Compares the named classes and object properties of two documents and
//! renders the four set differences as a plain-text report.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::entity::{Entity, local_name};
use crate::error::ReportError;
use crate::ontology::Ontology;

/// How entities are printed in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IriStyle {
    #[default]
    Full,
    /// Local names only.
    Short,
}

impl IriStyle {
    fn render(self, entity: &Entity) -> String {
        match self {
            IriStyle::Full => entity.iri().to_string(),
            IriStyle::Short => local_name(entity.iri()).to_string(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            IriStyle::Full => "full IRIs",
            IriStyle::Short => "short forms",
        }
    }
}

/// The four set differences, as rendered strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OntologyDiff {
    pub classes_only_in_a: BTreeSet<String>,
    pub classes_only_in_b: BTreeSet<String>,
    pub properties_only_in_a: BTreeSet<String>,
    pub properties_only_in_b: BTreeSet<String>,
}

fn rendered(entities: BTreeSet<Entity>, style: IriStyle) -> BTreeSet<String> {
    entities.iter().map(|e| style.render(e)).collect()
}

impl OntologyDiff {
    /// Compare `a` against `b`.
    ///
    /// Differences are taken after rendering, so with [`IriStyle::Short`]
    /// two entities sharing a local name count as the same.
    pub fn compute(a: &Ontology, b: &Ontology, style: IriStyle) -> Self {
        let classes_a = rendered(a.classes(), style);
        let classes_b = rendered(b.classes(), style);
        let props_a = rendered(a.object_properties(), style);
        let props_b = rendered(b.object_properties(), style);
        Self {
            classes_only_in_a: classes_a.difference(&classes_b).cloned().collect(),
            classes_only_in_b: classes_b.difference(&classes_a).cloned().collect(),
            properties_only_in_a: props_a.difference(&props_b).cloned().collect(),
            properties_only_in_b: props_b.difference(&props_a).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.classes_only_in_a.is_empty()
            && self.classes_only_in_b.is_empty()
            && self.properties_only_in_a.is_empty()
            && self.properties_only_in_b.is_empty()
    }

    /// Render the report. `a` and `b` are the document paths shown in the
    /// header.
    pub fn render(&self, a: &Path, b: &Path, style: IriStyle) -> String {
        let mut out = String::new();
        out.push_str("=== Ontology Diff Report ===\n");
        let _ = writeln!(out, "A: {}", display_path(a));
        let _ = writeln!(out, "B: {}", display_path(b));
        // owl:imports are never followed.
        out.push_str("Imports: EXCLUDED\n");
        let _ = writeln!(out, "Format: {}", style.describe());
        out.push('\n');

        section(&mut out, "Classes in A \\ B", &self.classes_only_in_a);
        section(&mut out, "Classes in B \\ A", &self.classes_only_in_b);
        section(&mut out, "ObjectProperties in A \\ B", &self.properties_only_in_a);
        section(&mut out, "ObjectProperties in B \\ A", &self.properties_only_in_b);
        out
    }
}

fn section(out: &mut String, title: &str, items: &BTreeSet<String>) {
    let _ = writeln!(out, "[{title} ({})]", items.len());
    if items.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in items {
        let _ = writeln!(out, "  {item}");
    }
    out.push('\n');
}

fn display_path(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `<A stem>__vs__<B stem>__diff.txt` in the working directory.
pub fn default_report_path(a: &Path, b: &Path) -> PathBuf {
    PathBuf::from(format!("{}__vs__{}__diff.txt", stem(a), stem(b)))
}

/// Write `report` to `path`, creating parent directories.
pub fn write_report(path: &Path, report: &str) -> Result<(), ReportError> {
    let err = |e: std::io::Error| ReportError::Write {
        path: path.display().to_string(),
        source: e,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(err)?;
    }
    std::fs::write(path, report).map_err(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::fixtures::{ZOO, turtle};

    const SMALL: &str = r#"
        @prefix : <http://example.org/zoo#> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        :Animal a owl:Class .
        :Dog a owl:Class .
        :Fungus a owl:Class .
    "#;

    #[test]
    fn differences_in_both_directions() {
        let diff = OntologyDiff::compute(&turtle(ZOO), &turtle(SMALL), IriStyle::Short);
        assert_eq!(
            diff.classes_only_in_a,
            ["Mammal".to_string(), "Plant".to_string()].into()
        );
        assert_eq!(diff.classes_only_in_b, ["Fungus".to_string()].into());
        assert_eq!(diff.properties_only_in_a, ["hasParent".to_string()].into());
        assert!(diff.properties_only_in_b.is_empty());
    }

    #[test]
    fn identical_ontologies_have_empty_diff() {
        let diff = OntologyDiff::compute(&turtle(ZOO), &turtle(ZOO), IriStyle::Full);
        assert!(diff.is_empty());
    }

    #[test]
    fn report_layout() {
        let diff = OntologyDiff::compute(&turtle(ZOO), &turtle(SMALL), IriStyle::Full);
        let report = diff.render(
            Path::new("/tmp/a.owl"),
            Path::new("/tmp/b.owl"),
            IriStyle::Full,
        );
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "=== Ontology Diff Report ===");
        assert_eq!(lines[1], "A: /tmp/a.owl");
        assert_eq!(lines[2], "B: /tmp/b.owl");
        assert_eq!(lines[3], "Imports: EXCLUDED");
        assert_eq!(lines[4], "Format: full IRIs");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "[Classes in A \\ B (2)]");
        assert_eq!(lines[7], "  http://example.org/zoo#Mammal");
        assert_eq!(lines[8], "  http://example.org/zoo#Plant");
        assert_eq!(lines[9], "");
        assert!(report.contains("[ObjectProperties in B \\ A (0)]\n  (none)\n\n"));
    }

    #[test]
    fn default_name_uses_file_stems() {
        assert_eq!(
            default_report_path(Path::new("data/full.owl"), Path::new("out/module.ttl")),
            PathBuf::from("full__vs__module__diff.txt")
        );
    }

    #[test]
    fn write_report_creates_directories() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("reports").join("diff.txt");
        write_report(&path, "hello\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }
}
