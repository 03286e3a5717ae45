//! Stage orchestration.
//!
//! Runs the stages in dependency order:
//!
//! ```text
//! 1. Catalog   source/   →  Catalog      (names, reference paths, duplicate check)
//! 2. Index     Catalog   →  XrefIndex    (all-pairs relative links)
//! 3. Relink    XrefIndex →  rewritten .md files
//! 4. Toc       Catalog   →  toc.md
//! ```
//!
//! The catalog is always built in full first, so a duplicate name aborts the
//! run before any file is touched. Relinking and toc generation are optional
//! per [`Steps`].

use crate::catalog::{self, Catalog, CatalogError};
use crate::config::RelinkConfig;
use crate::relink::{self, RelinkError, RelinkReport, WriteMode};
use crate::toc::{self, TocError};
use crate::xref::XrefIndex;
use log::info;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Relink(#[from] RelinkError),
    #[error(transparent)]
    Toc(#[from] TocError),
}

/// Which stages run after cataloging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Steps {
    /// Relink documents, writing or not.
    pub relink: Option<WriteMode>,
    /// Write the toc document.
    pub toc: bool,
}

impl Steps {
    /// Relink in place and write the toc.
    pub const BUILD: Steps = Steps {
        relink: Some(WriteMode::Write),
        toc: true,
    };
    pub const RELINK: Steps = Steps {
        relink: Some(WriteMode::Write),
        toc: false,
    };
    pub const TOC: Steps = Steps {
        relink: None,
        toc: true,
    };
    /// Compute the relink report without writing anything.
    pub const CHECK: Steps = Steps {
        relink: Some(WriteMode::DryRun),
        toc: false,
    };
    pub const CATALOG: Steps = Steps {
        relink: None,
        toc: false,
    };
}

#[derive(Debug)]
pub struct PipelineReport {
    pub catalog: Catalog,
    pub relink: Option<RelinkReport>,
    /// Path of the written toc document and its entry count.
    pub toc: Option<(PathBuf, usize)>,
}

/// Run the requested stages on the document tree at `root`.
pub fn run(root: &Path, config: &RelinkConfig, steps: Steps) -> Result<PipelineReport, PipelineError> {
    let catalog = catalog::build_catalog(root, &config.ignore)?;
    info!(
        "cataloged {} documents in {}",
        catalog.len(),
        catalog.root.display()
    );

    let relink = match steps.relink {
        Some(mode) => {
            let index = XrefIndex::build(&catalog);
            Some(relink::relink(&catalog, &index, &config.links, mode)?)
        }
        None => None,
    };

    let toc = if steps.toc {
        let toc_reference = config.toc_reference();
        let path = toc::write_toc(&catalog, &config.toc_file, &toc_reference)?;
        Some((path, toc::entry_count(&catalog, &toc_reference)))
    } else {
        None
    };

    Ok(PipelineReport {
        catalog,
        relink,
        toc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use crate::test_helpers::*;

    #[test]
    fn build_relinks_and_writes_toc() {
        let tmp = setup_fixtures();
        let root = source_root(&tmp);
        let config = load_config(&root).unwrap();

        let report = run(&root, &config, Steps::BUILD).unwrap();

        assert_eq!(report.catalog.len(), 4);
        assert_eq!(report.relink.unwrap().modified_count(), 4);
        let (path, entries) = report.toc.unwrap();
        assert!(path.ends_with("source/toc.md"));
        assert_eq!(entries, 4);
    }

    #[test]
    fn toc_only_leaves_documents_alone() {
        let tmp = setup_fixtures();
        let root = source_root(&tmp);
        let config = load_config(&root).unwrap();
        let before = read_doc(&tmp, "index.md");

        let report = run(&root, &config, Steps::TOC).unwrap();

        assert!(report.relink.is_none());
        assert!(report.toc.is_some());
        assert_eq!(read_doc(&tmp, "index.md"), before);
    }

    #[test]
    fn check_writes_nothing() {
        let tmp = setup_fixtures();
        let root = source_root(&tmp);
        let config = load_config(&root).unwrap();

        let report = run(&root, &config, Steps::CHECK).unwrap();

        assert_eq!(report.relink.unwrap().mode, WriteMode::DryRun);
        assert!(report.toc.is_none());
        assert!(!root.join("toc.md").exists());
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let tmp = setup_fixtures();
        let root = source_root(&tmp);
        let config = load_config(&root).unwrap();

        run(&root, &config, Steps::BUILD).unwrap();
        let toc_before = read_doc(&tmp, "toc.md");
        let second = run(&root, &config, Steps::BUILD).unwrap();

        assert_eq!(second.relink.unwrap().modified_count(), 0);
        assert_eq!(read_doc(&tmp, "toc.md"), toc_before);
        // The toc is cataloged on the second run but never lists itself
        assert_eq!(second.catalog.len(), 5);
        assert_eq!(second.toc.unwrap().1, 4);
    }
}
