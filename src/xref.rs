//! Cross-reference index.
//!
//! For every ordered pair of documents below the root (a document paired
//! with itself included, ignored documents too) the index holds the relative link from the source's
//! folder to the target, extension stripped:
//!
//! ```text
//! source document                     target name          link
//! Components/Component-Overview.md    Setup-Quickstart  →  ../Setup/Setup-Quickstart
//! Components/Component-Overview.md    Objects           →  Objects
//! index.md                            Objects           →  Components/Objects
//! ```
//!
//! Built once from the catalog before any document is rewritten and only
//! read afterwards. All pairs means quadratic size, which is fine for
//! documentation-sized trees.

use crate::catalog::{Catalog, Document};
use crate::naming;
use std::collections::{BTreeMap, HashMap};
use std::path::{Component, Path, PathBuf};

/// Target reference name → relative link from one source document.
pub type TargetMap = BTreeMap<String, String>;

#[derive(Debug, Clone, Default)]
pub struct XrefIndex {
    entries: HashMap<PathBuf, TargetMap>,
}

impl XrefIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let documents = catalog.all_documents();
        let entries = documents
            .iter()
            .map(|source| (source.path.clone(), targets_from(source, &documents)))
            .collect();
        Self { entries }
    }

    /// Links from the document at `source` (absolute path) to every document.
    pub fn targets(&self, source: &Path) -> Option<&TargetMap> {
        self.entries.get(source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn targets_from(source: &Document, documents: &[&Document]) -> TargetMap {
    let from_dir = source.path.parent().unwrap_or(Path::new(""));
    documents
        .iter()
        .map(|target| (target.name.clone(), relative_link(from_dir, &target.path)))
        .collect()
}

/// Relative link from `from_dir` to the file `to`, `/`-separated, extension stripped.
///
/// Both paths must be absolute (or both relative to the same base).
pub fn relative_link(from_dir: &Path, to: &Path) -> String {
    let from: Vec<Component> = from_dir.components().collect();
    let to: Vec<Component> = to.components().collect();
    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    let segments: Vec<String> = std::iter::repeat_n("..".to_string(), from.len() - common)
        .chain(
            to[common..]
                .iter()
                .map(|c| c.as_os_str().to_string_lossy().into_owned()),
        )
        .collect();

    naming::strip_extension(&segments.join("/")).to_string()
}
