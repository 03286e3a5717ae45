//! Reference-name helpers shared by the catalog, the index, and the link rewriter.
//!
//! Every document is addressed by its **reference name**: the file name with
//! its extension removed. Links are written against that name (optionally
//! behind folders and with an `#anchor`), so the same few string operations
//! show up at every stage:
//!
//! - `Setup/Setup-Quickstart.md` → name `Setup-Quickstart`
//! - `../Setup/Setup-Quickstart#install` → name `Setup-Quickstart`, anchor `install`
//! - `Component-Overview` → display label `Component Overview`
//!
//! Nothing here touches the filesystem.

/// Remove the extension from the last path segment, if it has one.
///
/// Only the final `.ext` is removed, and dots in parent folders are ignored:
/// - `"Setup-Quickstart.md"` → `"Setup-Quickstart"`
/// - `"api.v2.md"` → `"api.v2"`
/// - `"v1.2/Intro"` → `"v1.2/Intro"`
pub fn strip_extension(path: &str) -> &str {
    let segment_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[segment_start..].rfind('.') {
        Some(dot) => &path[..segment_start + dot],
        None => path,
    }
}

/// The part of a slash-separated path after its last `/`.
pub fn last_segment(path: &str) -> &str {
    path.rsplit_once('/').map(|(_, last)| last).unwrap_or(path)
}

/// Split a trailing `#anchor` off a link target.
///
/// The anchor is returned without its `#`. An empty anchor (`"Doc#"`) is kept
/// as `Some("")` so that rewriting reproduces the trailing `#`.
pub fn split_anchor(target: &str) -> (&str, Option<&str>) {
    match target.rsplit_once('#') {
        Some((path, anchor)) => (path, Some(anchor)),
        None => (target, None),
    }
}

/// A written link target broken into the parts resolution needs.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkTarget<'a> {
    /// Bare reference name: last segment, anchor and extension removed.
    pub name: &'a str,
    /// Fragment after `#`, if the target had one.
    pub anchor: Option<&'a str>,
}

/// Parse a local link target into its reference name and anchor.
///
/// The anchor is split off first so that dots inside a fragment
/// (`Release-Notes#v1.2`) never count as an extension.
pub fn parse_link_target(target: &str) -> LinkTarget<'_> {
    let (path, anchor) = split_anchor(target);
    LinkTarget {
        name: strip_extension(last_segment(path)),
        anchor,
    }
}

/// Label shown for a reference path in the toc: dashes become spaces.
pub fn display_label(reference: &str) -> String {
    reference.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_extension_removes_md() {
        assert_eq!(strip_extension("Setup-Quickstart.md"), "Setup-Quickstart");
    }

    #[test]
    fn strip_extension_only_removes_last_dot() {
        assert_eq!(strip_extension("api.v2.md"), "api.v2");
    }

    #[test]
    fn strip_extension_ignores_dots_in_folders() {
        assert_eq!(strip_extension("v1.2/Intro"), "v1.2/Intro");
        assert_eq!(strip_extension("../Setup/Intro.md"), "../Setup/Intro");
    }

    #[test]
    fn strip_extension_without_extension_is_identity() {
        assert_eq!(strip_extension("Intro"), "Intro");
    }

    #[test]
    fn last_segment_of_nested_path() {
        assert_eq!(last_segment("../Howto/Starting/Directory-Overview"), "Directory-Overview");
    }

    #[test]
    fn last_segment_of_bare_name() {
        assert_eq!(last_segment("Spawner"), "Spawner");
    }

    #[test]
    fn split_anchor_present() {
        assert_eq!(split_anchor("Doc#section"), ("Doc", Some("section")));
    }

    #[test]
    fn split_anchor_absent() {
        assert_eq!(split_anchor("Doc"), ("Doc", None));
    }

    #[test]
    fn split_anchor_empty_fragment_is_kept() {
        assert_eq!(split_anchor("Doc#"), ("Doc", Some("")));
    }

    #[test]
    fn parse_target_with_folders_extension_and_anchor() {
        let t = parse_link_target("../Components/Objects.md#typeclasses");
        assert_eq!(t.name, "Objects");
        assert_eq!(t.anchor, Some("typeclasses"));
    }

    #[test]
    fn parse_target_keeps_dots_in_anchor() {
        let t = parse_link_target("Release-Notes#v1.2");
        assert_eq!(t.name, "Release-Notes");
        assert_eq!(t.anchor, Some("v1.2"));
    }

    #[test]
    fn parse_anchor_only_target_has_empty_name() {
        let t = parse_link_target("#local");
        assert_eq!(t.name, "");
        assert_eq!(t.anchor, Some("local"));
    }

    #[test]
    fn display_label_replaces_dashes() {
        assert_eq!(display_label("Components/Component-Overview"), "Components/Component Overview");
    }
}
