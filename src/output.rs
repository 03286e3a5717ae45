//! CLI output formatting.
//!
//! Each stage has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Catalog
//!
//! ```text
//! Documents
//! 001 Component-Overview
//!     Source: Components/Component-Overview.md
//! 002 index
//!     Source: index.md
//! ```
//!
//! ## Relink
//!
//! ```text
//!   Remapped link [Quickstart](Setup-Quickstart#install) -> [Quickstart](../Setup/Setup-Quickstart#install)
//!  -- Auto-relinked links in Component-Overview.md
//! Auto-corrected links in 1 documents.
//! ```
//!
//! ## Check
//!
//! Same change lines, then unresolved targets per document:
//!
//! ```text
//!  -- Would relink links in Component-Overview.md
//! Unresolved
//! Component-Overview.md
//!     [Old page](Removed-Page)
//! 1 documents would be relinked, 1 unresolved links
//! ```

use crate::catalog::Catalog;
use crate::links::{LinkForm, UnresolvedLink};
use crate::relink::{DocumentRelink, RelinkReport, WriteMode};
use std::path::Path;

/// Prefix for detail lines under a heading line.
const DETAIL: &str = "    ";

fn unresolved_line(link: &UnresolvedLink) -> String {
    match link.form {
        LinkForm::Inline => format!("[{}]({})", link.label, link.target),
        LinkForm::Definition => format!("[{}]: {}", link.label, link.target),
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Every cataloged document, in reference-name order.
pub fn format_catalog_output(catalog: &Catalog) -> Vec<String> {
    let mut lines = vec!["Documents".to_string()];
    for (i, (name, reference)) in catalog.references().into_iter().enumerate() {
        lines.push(format!("{:03} {name}", i + 1));
        lines.push(format!("{DETAIL}Source: {reference}.md"));
    }
    lines
}

pub fn print_catalog_output(catalog: &Catalog) {
    for line in format_catalog_output(catalog) {
        println!("{}", line);
    }
}

// ============================================================================
// Relink
// ============================================================================

/// Change lines for one document, followed by its status line if it changed.
pub fn format_document_relink(doc: &DocumentRelink, mode: WriteMode) -> Vec<String> {
    let mut lines: Vec<String> = doc
        .changes
        .iter()
        .map(|change| format!("  Remapped link {}", change))
        .collect();
    if doc.modified {
        let verb = match mode {
            WriteMode::Write => "Auto-relinked",
            WriteMode::DryRun => "Would relink",
        };
        lines.push(format!(" -- {} links in {}", verb, doc.file_name));
    }
    lines
}

/// Per-document change lines and the closing count.
pub fn format_relink_output(report: &RelinkReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .documents
        .iter()
        .flat_map(|doc| format_document_relink(doc, report.mode))
        .collect();
    lines.push(format!(
        "Auto-corrected links in {} documents.",
        report.modified_count()
    ));
    lines
}

pub fn print_relink_output(report: &RelinkReport) {
    for line in format_relink_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Pending changes, unresolved targets grouped by document, and a summary.
pub fn format_check_output(report: &RelinkReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .documents
        .iter()
        .flat_map(|doc| format_document_relink(doc, report.mode))
        .collect();

    if report.unresolved_count() > 0 {
        lines.push("Unresolved".to_string());
        for doc in report.documents.iter().filter(|d| !d.unresolved.is_empty()) {
            lines.push(doc.file_name.clone());
            for link in &doc.unresolved {
                lines.push(format!("{DETAIL}{}", unresolved_line(link)));
            }
        }
    }

    lines.push(format!(
        "{} documents would be relinked, {} unresolved links",
        report.modified_count(),
        report.unresolved_count()
    ));
    lines
}

pub fn print_check_output(report: &RelinkReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Toc
// ============================================================================

pub fn format_toc_output(path: &Path, entries: usize) -> Vec<String> {
    vec![format!("Wrote {} ({} entries)", path.display(), entries)]
}

pub fn print_toc_output(path: &Path, entries: usize) {
    for line in format_toc_output(path, entries) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use crate::links::LinkChange;
    use crate::test_helpers::*;
    use std::path::PathBuf;

    fn doc(file_name: &str, changes: Vec<LinkChange>, unresolved: Vec<UnresolvedLink>) -> DocumentRelink {
        DocumentRelink {
            path: PathBuf::from(format!("/d/source/{file_name}")),
            file_name: file_name.to_string(),
            modified: !changes.is_empty(),
            changes,
            unresolved,
        }
    }

    fn change(form: LinkForm, from: &str, to: &str) -> LinkChange {
        LinkChange {
            form,
            old_label: "Quickstart".into(),
            old_target: from.into(),
            new_label: "Quickstart".into(),
            new_target: to.into(),
        }
    }

    fn sample_report(mode: WriteMode) -> RelinkReport {
        RelinkReport {
            mode,
            documents: vec![
                doc(
                    "Component-Overview.md",
                    vec![change(
                        LinkForm::Inline,
                        "Setup-Quickstart#install",
                        "../Setup/Setup-Quickstart#install",
                    )],
                    vec![UnresolvedLink {
                        form: LinkForm::Inline,
                        label: "Old page".into(),
                        target: "Removed-Page".into(),
                    }],
                ),
                doc("Objects.md", vec![], vec![]),
                doc(
                    "index.md",
                    vec![change(LinkForm::Definition, "Setup-Quickstart", "Setup/Setup-Quickstart")],
                    vec![],
                ),
            ],
        }
    }

    #[test]
    fn catalog_output_numbers_documents_by_name() {
        let tmp = setup_fixtures();
        let catalog = build_catalog(&source_root(&tmp), &ignored()).unwrap();
        assert_eq!(
            format_catalog_output(&catalog),
            vec![
                "Documents",
                "001 Component-Overview",
                "    Source: Components/Component-Overview.md",
                "002 Objects",
                "    Source: Components/Objects.md",
                "003 Setup-Quickstart",
                "    Source: Setup/Setup-Quickstart.md",
                "004 index",
                "    Source: index.md",
            ]
        );
    }

    #[test]
    fn relink_output_lists_changes_then_summary() {
        let lines = format_relink_output(&sample_report(WriteMode::Write));
        assert_eq!(
            lines,
            vec![
                "  Remapped link [Quickstart](Setup-Quickstart#install) -> [Quickstart](../Setup/Setup-Quickstart#install)",
                " -- Auto-relinked links in Component-Overview.md",
                "  Remapped link [Quickstart]: Setup-Quickstart -> [Quickstart]: Setup/Setup-Quickstart",
                " -- Auto-relinked links in index.md",
                "Auto-corrected links in 2 documents.",
            ]
        );
    }

    #[test]
    fn unchanged_documents_print_nothing() {
        let lines = format_document_relink(&doc("Objects.md", vec![], vec![]), WriteMode::Write);
        assert!(lines.is_empty());
    }

    #[test]
    fn check_output_lists_unresolved_by_document() {
        let lines = format_check_output(&sample_report(WriteMode::DryRun));
        assert_eq!(lines[1], " -- Would relink links in Component-Overview.md");
        let unresolved_at = lines.iter().position(|l| l == "Unresolved").unwrap();
        assert_eq!(lines[unresolved_at + 1], "Component-Overview.md");
        assert_eq!(lines[unresolved_at + 2], "    [Old page](Removed-Page)");
        assert_eq!(
            lines.last().unwrap(),
            "2 documents would be relinked, 1 unresolved links"
        );
    }

    #[test]
    fn check_output_without_unresolved_skips_section() {
        let report = RelinkReport {
            mode: WriteMode::DryRun,
            documents: vec![doc("Objects.md", vec![], vec![])],
        };
        assert_eq!(
            format_check_output(&report),
            vec!["0 documents would be relinked, 0 unresolved links"]
        );
    }

    #[test]
    fn toc_output_names_file_and_count() {
        let lines = format_toc_output(Path::new("/d/source/toc.md"), 4);
        assert_eq!(lines, vec!["Wrote /d/source/toc.md (4 entries)"]);
    }
}
