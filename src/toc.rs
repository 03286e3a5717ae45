//! Toc page generation.
//!
//! The site generator requires every page to be reachable from a toctree.
//! Rather than maintaining one by hand, a single toc document lists every
//! cataloged reference path and ends with a hidden toctree directive that
//! includes the toc page itself:
//!
//! ~~~text
//! # Toc
//!
//! - [Components/Component Overview](Components/Component-Overview)
//! - [Setup/Setup Quickstart](Setup/Setup-Quickstart)
//! - [index](index)
//!
//! ```toctree::
//!   :hidden:
//!
//!   toc
//! ```
//! ~~~
//!
//! Entries are sorted by the byte order of the full reference path, so
//! uppercase folders sort before lowercase names.

use crate::catalog::Catalog;
use crate::naming;
use log::debug;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TocError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the toc document for `catalog`.
///
/// `toc_reference` (the toc's own reference path) is left out of the list;
/// the directive block names the toc page by its file stem.
pub fn render_toc(catalog: &Catalog, toc_reference: &str) -> String {
    let references: BTreeSet<&str> = catalog
        .documents
        .iter()
        .map(|d| d.reference.as_str())
        .filter(|r| *r != toc_reference)
        .collect();

    let mut out = String::from("# Toc\n");
    for reference in references {
        out.push_str(&format!(
            "\n- [{}]({})",
            naming::display_label(reference),
            reference
        ));
    }

    let own_name = naming::last_segment(toc_reference);
    out.push_str(&format!("\n\n```toctree::\n  :hidden:\n\n  {own_name}\n```"));
    out
}

/// Write the toc document to `<root>/<toc_file>`, replacing any previous one.
pub fn write_toc(catalog: &Catalog, toc_file: &str, toc_reference: &str) -> Result<PathBuf, TocError> {
    let path = catalog.root.join(Path::new(toc_file));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, render_toc(catalog, toc_reference))?;
    debug!("wrote {}", path.display());
    Ok(path)
}

/// Number of entries the toc lists for `catalog`.
pub fn entry_count(catalog: &Catalog, toc_reference: &str) -> usize {
    catalog
        .documents
        .iter()
        .map(|d| d.reference.as_str())
        .filter(|r| *r != toc_reference)
        .collect::<BTreeSet<_>>()
        .len()
}
