//! Shared test utilities for the toc-relink test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let catalog = build_catalog(&source_root(&tmp), &ignored()).unwrap();
//! let doc = find_document(&catalog, "Objects");
//! assert_eq!(doc.reference, "Components/Objects");
//! ```

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::catalog::{Catalog, Document};
use crate::relink::RelinkReport;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/source/` to `<tmp>/source` and return the temp dir.
///
/// The root keeps its `source` folder name so reference paths resolve the
/// same way they do in a real checkout.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/source");
    let root = source_root(&tmp);
    std::fs::create_dir_all(&root).unwrap();
    copy_tree(&fixtures, &root);
    tmp
}

/// The document root inside a fixture temp dir.
pub fn source_root(tmp: &TempDir) -> PathBuf {
    tmp.path().join("source")
}

/// Ignore list matching `fixtures/source/relink.toml`.
pub fn ignored() -> Vec<String> {
    vec!["README.md".to_string()]
}

/// Mirror every folder and file below `src` into `dst`.
fn copy_tree(src: &Path, dst: &Path) {
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.unwrap();
        let target = dst.join(entry.path().strip_prefix(src).unwrap());
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).unwrap();
        } else {
            std::fs::copy(entry.path(), &target).unwrap();
        }
    }
}

/// Write a document below `root`, creating parent folders.
pub fn write_doc(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// Read a fixture document by its path below the root.
pub fn read_doc(tmp: &TempDir, rel: &str) -> String {
    std::fs::read_to_string(source_root(tmp).join(rel))
        .unwrap_or_else(|e| panic!("cannot read {rel}: {e}"))
}

pub fn modified_time(tmp: &TempDir, rel: &str) -> SystemTime {
    std::fs::metadata(source_root(tmp).join(rel))
        .and_then(|m| m.modified())
        .unwrap()
}

// =========================================================================
// Lookups — panic with a clear message on miss
// =========================================================================

/// Find a document by reference name. Panics if not found.
pub fn find_document<'a>(catalog: &'a Catalog, name: &str) -> &'a Document {
    catalog.get(name).unwrap_or_else(|| {
        let names: Vec<&str> = catalog.documents.iter().map(|d| d.name.as_str()).collect();
        panic!("document '{name}' not found. Available: {names:?}")
    })
}

/// File names of the documents a relink pass modified, in processing order.
pub fn relinked_names(report: &RelinkReport) -> Vec<&str> {
    report.modified().map(|d| d.file_name.as_str()).collect()
}
