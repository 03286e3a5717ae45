//! Link matching and target resolution.
//!
//! Two link forms are recognized in document text:
//!
//! ```text
//! [label](target)        inline link, label and target may sit on different lines
//! [label]: target        reference definition at the start of a line
//! ```
//!
//! Each match goes through [`resolve_link`], a pure function of the current
//! document's index entry, the configured [`LinkRules`], and the written
//! label and target:
//!
//! 1. The label is looked up in the text-remap table.
//! 2. The written target is looked up in the url-remap table.
//! 3. Targets with a no-remap prefix pass through.
//! 4. Targets with a scheme (`http…://`) pass through.
//! 5. Anything else is reduced to a bare reference name (last segment,
//!    anchor and extension removed) and looked up in the index entry. A hit
//!    becomes the indexed relative link with the anchor re-attached; a miss
//!    leaves the target as written.
//!
//! Misses are not errors. They are reported as [`Outcome::Unresolved`] so a
//! checking pass can list them, but the text is left alone.

use crate::config::LinkRules;
use crate::naming;
use crate::xref::TargetMap;
use regex::{Captures, Regex};
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

static INLINE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\[(?P<label>[\w \-\[\]`]+?)\]\((?P<target>.+?)\)")
        .expect("inline link pattern is valid")
});

static DEFINITION_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\[(?P<label>[\w \-\[\]`]+?)\](?P<sep>:[ \t]+)(?P<target>\S(?:[^\r\n]*\S)?)")
        .expect("definition link pattern is valid")
});

/// Which syntax a link was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkForm {
    /// `[label](target)`
    Inline,
    /// `[label]: target`
    Definition,
}

/// How a target was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Starts with a no-remap prefix.
    Passthrough,
    /// Has an `http…://` scheme.
    External,
    /// Anchor within the same document (`#section`).
    Anchor,
    /// Found in the current document's index entry.
    Resolved,
    /// Local-looking target with no matching document.
    Unresolved,
}

/// The label and target a link should be written with.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub label: String,
    pub target: String,
    pub outcome: Outcome,
}

/// The document whose links are being resolved.
#[derive(Debug, Clone, Copy)]
pub struct DocContext<'a> {
    pub path: &'a Path,
    /// This document's row of the cross-reference index.
    pub targets: Option<&'a TargetMap>,
}

/// Resolve one link's label and target for the document in `ctx`.
pub fn resolve_link(ctx: &DocContext<'_>, rules: &LinkRules, label: &str, target: &str) -> Resolution {
    let label = rules.remap_text(label).to_string();
    let written = rules.remap_url(target);

    let (target, outcome) = if rules.is_no_remap(written) {
        (written.to_string(), Outcome::Passthrough)
    } else if written.contains("http") && written.contains("://") {
        (written.to_string(), Outcome::External)
    } else {
        let parsed = naming::parse_link_target(written);
        match ctx.targets.and_then(|t| t.get(parsed.name)) {
            _ if parsed.name.is_empty() => (written.to_string(), Outcome::Anchor),
            Some(link) => match parsed.anchor {
                Some(anchor) => (format!("{link}#{anchor}"), Outcome::Resolved),
                None => (link.clone(), Outcome::Resolved),
            },
            None => (written.to_string(), Outcome::Unresolved),
        }
    };

    Resolution {
        label,
        target,
        outcome,
    }
}

/// A link whose target was rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkChange {
    pub form: LinkForm,
    pub old_label: String,
    pub old_target: String,
    pub new_label: String,
    pub new_target: String,
}

impl fmt::Display for LinkChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.form {
            LinkForm::Inline => write!(
                f,
                "[{}]({}) -> [{}]({})",
                self.old_label, self.old_target, self.new_label, self.new_target
            ),
            LinkForm::Definition => write!(
                f,
                "[{}]: {} -> [{}]: {}",
                self.old_label, self.old_target, self.new_label, self.new_target
            ),
        }
    }
}

/// A target left as written because no document matched it.
#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedLink {
    pub form: LinkForm,
    pub label: String,
    pub target: String,
}

/// Result of rewriting one document's text.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewrite {
    pub text: String,
    pub changes: Vec<LinkChange>,
    pub unresolved: Vec<UnresolvedLink>,
}

impl Rewrite {
    pub fn is_changed(&self, original: &str) -> bool {
        self.text != original
    }
}

/// Rewrite every inline link, then every reference definition, in `text`.
pub fn rewrite_links(ctx: &DocContext<'_>, rules: &LinkRules, text: &str) -> Rewrite {
    let mut changes = Vec::new();
    let mut unresolved = Vec::new();

    let mut visit = |form: LinkForm, caps: &Captures| -> Resolution {
        let label = &caps["label"];
        let target = &caps["target"];
        let resolution = resolve_link(ctx, rules, label, target);

        if resolution.outcome == Outcome::Unresolved {
            unresolved.push(UnresolvedLink {
                form,
                label: label.to_string(),
                target: target.to_string(),
            });
        }
        // Label-only remaps still change the text but get no notice.
        if resolution.target != target {
            changes.push(LinkChange {
                form,
                old_label: label.to_string(),
                old_target: target.to_string(),
                new_label: resolution.label.clone(),
                new_target: resolution.target.clone(),
            });
        }
        resolution
    };

    let inline = INLINE_LINK.replace_all(text, |caps: &Captures| {
        let r = visit(LinkForm::Inline, caps);
        format!("[{}]({})", r.label, r.target)
    });
    let defined = DEFINITION_LINK.replace_all(&inline, |caps: &Captures| {
        let r = visit(LinkForm::Definition, caps);
        format!("[{}]{}{}", r.label, &caps["sep"], r.target)
    });

    Rewrite {
        text: defined.into_owned(),
        changes,
        unresolved,
    }
}
