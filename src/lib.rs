//! # toc-relink
//!
//! Keeps the internal links of a Markdown documentation tree valid and
//! generates the toc page a toctree-based site generator needs to reach
//! every document.
//!
//! Every document is addressed by its **reference name**, the file name
//! without extension. Authors link to `Setup-Quickstart` (or to a stale
//! `../Howto/Setup-Quickstart.md`) and the tool rewrites the target to the
//! correct relative path for the document the link sits in. Documents can
//! then move between folders without anyone fixing links by hand.
//!
//! # Architecture: One Pass, Four Stages
//!
//! ```text
//! 1. Catalog   source/   →  Catalog     (reference names and paths, duplicate check)
//! 2. Index     Catalog   →  XrefIndex   (relative link for every document pair)
//! 3. Relink    XrefIndex →  rewritten .md files
//! 4. Toc       Catalog   →  toc.md
//! ```
//!
//! Nothing persists between runs except the rewritten documents and the
//! toc file. The catalog and index are rebuilt from scratch each time.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Stage 1 — walks the root, records reference names/paths, rejects duplicate names |
//! | [`xref`] | Stage 2 — all-pairs relative links between documents |
//! | [`links`] | Link patterns and the pure `resolve_link` function |
//! | [`relink`] | Stage 3 — rewrites each document in place when its links change |
//! | [`toc`] | Stage 4 — renders and writes the toc document |
//! | [`pipeline`] | Runs the stages in order for each CLI command |
//! | [`config`] | `relink.toml` loading: remap tables, no-remap prefixes, ignore list |
//! | [`naming`] | Reference-name string helpers shared by every stage |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Unique Names, Not Paths
//!
//! Link keys are file stems, so two documents named `Intro.md` in different
//! folders cannot coexist. The catalog refuses such a tree outright instead
//! of guessing, and it does so before any file is rewritten.
//!
//! ## Permissive Resolution
//!
//! A link whose name matches no document is left exactly as written. The
//! `check` command lists these so a separate review can catch real breakage.
//!
//! ## Remaps as Data
//!
//! The text-remap and url-remap tables, the no-remap prefixes, and the
//! ignore list are plain configuration passed into each stage, never global
//! state. Each can be exercised in tests with its own values.

pub mod catalog;
pub mod config;
pub mod links;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod relink;
pub mod toc;
pub mod xref;

#[cfg(test)]
pub(crate) mod test_helpers;
