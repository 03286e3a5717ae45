//! Document cataloging.
//!
//! First stage of every run. Walks the document root for Markdown files and
//! records, for each one, its reference name (file stem) and its reference
//! path (location below the root, extension stripped, `/`-separated).
//!
//! ```text
//! source/                              reference name        reference path
//! ├── index.md                    →    index                 index
//! ├── Setup/
//! │   └── Setup-Quickstart.md     →    Setup-Quickstart      Setup/Setup-Quickstart
//! └── Components/
//!     ├── Component-Overview.md   →    Component-Overview    Components/Component-Overview
//!     └── Objects.md              →    Objects               Components/Objects
//! ```
//!
//! ## Validation
//!
//! Reference names must be unique across the whole tree, even in different
//! folders: the site generator cannot tell `a/Intro` from `b/Intro` by name.
//! A second document with an existing name aborts the catalog, and nothing
//! downstream runs on a partial catalog.
//!
//! Reference paths are found by locating the root's folder name among the
//! last [`MAX_REFERENCE_SEGMENTS`] folders above a document, so documents
//! may sit at most four folders below the root.
//!
//! ## Ignored Files
//!
//! Files named in the ignore list are kept out of the toc and the duplicate
//! check only. They are still link targets and still get relinked, so they
//! are held in [`Catalog::ignored`] and returned by [`Catalog::all_documents`].

use crate::naming;
use log::debug;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Number of ancestor folders searched for the root folder name.
pub const MAX_REFERENCE_SEGMENTS: usize = 5;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Document root has no folder name: {0}")]
    InvalidRoot(PathBuf),
    #[error(
        "Tried to add {second}, but a file {first} already exists. \
         Documents may not share the name '{name}', even in different folders. Rename one."
    )]
    DuplicateName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("{path} is nested more than {max_depth} folders below '{root_name}'")]
    NestedTooDeep {
        path: PathBuf,
        root_name: String,
        max_depth: usize,
    },
}

/// A Markdown file in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// File name including extension, e.g. `Setup-Quickstart.md`.
    pub file_name: String,
    /// Canonical link key: file name without extension.
    pub name: String,
    /// Path below the root without extension, `/`-separated.
    pub reference: String,
}

/// Every cataloged document, keyed by unique reference name.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Canonicalized document root.
    pub root: PathBuf,
    /// Cataloged documents in walk order (sorted by path).
    pub documents: Vec<Document>,
    /// Documents matching the ignore list, in walk order.
    pub ignored: Vec<Document>,
    by_name: BTreeMap<String, usize>,
}

impl Catalog {
    /// Look a document up by reference name.
    pub fn get(&self, name: &str) -> Option<&Document> {
        self.by_name.get(name).map(|&i| &self.documents[i])
    }

    /// Reference name → reference path, one entry per document.
    pub fn references(&self) -> BTreeMap<&str, &str> {
        self.documents
            .iter()
            .map(|d| (d.name.as_str(), d.reference.as_str()))
            .collect()
    }

    /// Cataloged and ignored documents together, in walk order.
    pub fn all_documents(&self) -> Vec<&Document> {
        let mut all: Vec<&Document> = self.documents.iter().chain(&self.ignored).collect();
        all.sort_by(|a, b| a.path.cmp(&b.path));
        all
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Catalog every `.md` file below `root`, setting file names in `ignore` apart.
///
/// Fails on the first duplicate reference name.
pub fn build_catalog(root: &Path, ignore: &[String]) -> Result<Catalog, CatalogError> {
    let root = root.canonicalize()?;
    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CatalogError::InvalidRoot(root.clone()))?;

    let mut documents: Vec<Document> = Vec::new();
    let mut ignored: Vec<Document> = Vec::new();
    let mut by_name: BTreeMap<String, usize> = BTreeMap::new();

    for path in markdown_files(&root)? {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = naming::strip_extension(&file_name).to_string();

        if ignore.contains(&file_name) {
            debug!("ignoring {} for the toc", path.display());
            let reference = reference_path(&path, &root_name)
                .unwrap_or_else(|| below_root(&path, &root));
            ignored.push(Document {
                path,
                file_name,
                name,
                reference,
            });
            continue;
        }

        let reference =
            reference_path(&path, &root_name).ok_or_else(|| CatalogError::NestedTooDeep {
                path: path.clone(),
                root_name: root_name.clone(),
                max_depth: MAX_REFERENCE_SEGMENTS - 1,
            })?;

        if let Some(&existing) = by_name.get(&name) {
            return Err(CatalogError::DuplicateName {
                name,
                first: documents[existing].path.clone(),
                second: path,
            });
        }

        debug!("cataloged {name} -> {reference}");
        by_name.insert(name.clone(), documents.len());
        documents.push(Document {
            path,
            file_name,
            name,
            reference,
        });
    }

    Ok(Catalog {
        root,
        documents,
        ignored,
        by_name,
    })
}

fn markdown_files(root: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "md") {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Reference path of a document: the folders after `root_name` plus the
/// file name, extension stripped.
///
/// Only the last [`MAX_REFERENCE_SEGMENTS`] folders above the file are
/// searched, and the first match in that window wins. Returns `None` when
/// the root folder is not among them.
pub fn reference_path(path: &Path, root_name: &str) -> Option<String> {
    let file_name = path.file_name()?.to_string_lossy();
    let folders: Vec<String> = path
        .parent()?
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let window = &folders[folders.len().saturating_sub(MAX_REFERENCE_SEGMENTS)..];
    let root_at = window.iter().position(|s| s == root_name)?;

    let mut segments: Vec<&str> = window[root_at + 1..].iter().map(String::as_str).collect();
    segments.push(&file_name);
    Some(naming::strip_extension(&segments.join("/")).to_string())
}

/// Fallback reference for ignored files too deep for [`reference_path`].
fn below_root(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    naming::strip_extension(&joined).to_string()
}
