//! Per-document link rewriting.
//!
//! Runs [`links::rewrite_links`] over every document below the root, ignored
//! ones included, alphabetically by file name. The cross-reference index was built from the original tree,
//! so no document's result depends on another having been rewritten first.
//!
//! A document is written back only when its text actually changed; unchanged
//! files are never touched, which keeps their timestamps stable. In
//! [`WriteMode::DryRun`] nothing is written and the report describes what a
//! real pass would do.

use crate::catalog::{Catalog, Document};
use crate::config::LinkRules;
use crate::links::{self, DocContext, LinkChange, UnresolvedLink};
use crate::xref::XrefIndex;
use log::debug;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Whether changed documents are written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Write,
    DryRun,
}

/// What happened to one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRelink {
    pub path: PathBuf,
    pub file_name: String,
    pub changes: Vec<LinkChange>,
    pub unresolved: Vec<UnresolvedLink>,
    /// Text differs from what was on disk.
    pub modified: bool,
}

/// Outcome of a relink pass, documents in processing order.
#[derive(Debug, Clone, PartialEq)]
pub struct RelinkReport {
    pub mode: WriteMode,
    pub documents: Vec<DocumentRelink>,
}

impl RelinkReport {
    /// Documents whose text changed (or would change, in a dry run).
    pub fn modified(&self) -> impl Iterator<Item = &DocumentRelink> {
        self.documents.iter().filter(|d| d.modified)
    }

    pub fn modified_count(&self) -> usize {
        self.modified().count()
    }

    pub fn unresolved_count(&self) -> usize {
        self.documents.iter().map(|d| d.unresolved.len()).sum()
    }
}

/// Rewrite the links of every document in `catalog`, ignored ones included.
pub fn relink(
    catalog: &Catalog,
    index: &XrefIndex,
    rules: &LinkRules,
    mode: WriteMode,
) -> Result<RelinkReport, RelinkError> {
    let mut ordered: Vec<&Document> = catalog.all_documents();
    ordered.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    let mut documents = Vec::with_capacity(ordered.len());
    for doc in ordered {
        let original = fs::read_to_string(&doc.path)?;
        let ctx = DocContext {
            path: &doc.path,
            targets: index.targets(&doc.path),
        };
        let rewrite = links::rewrite_links(&ctx, rules, &original);
        let modified = rewrite.is_changed(&original);

        for link in &rewrite.unresolved {
            debug!("{}: unresolved link target {}", doc.file_name, link.target);
        }
        if modified && mode == WriteMode::Write {
            fs::write(&doc.path, &rewrite.text)?;
            debug!("wrote {}", doc.path.display());
        }

        documents.push(DocumentRelink {
            path: doc.path.clone(),
            file_name: doc.file_name.clone(),
            changes: rewrite.changes,
            unresolved: rewrite.unresolved,
            modified,
        });
    }

    Ok(RelinkReport { mode, documents })
}
