//! Display names for renderer objects.
//!
//! The renderer decorates object names with suffixes such as ` [0.0.0]`,
//! `[0]` or `<...>`. [`clean_name`] strips them; [`NameMapping`] remembers the
//! mapping for the rest of the pass and keeps display names unique.

use std::collections::{HashMap, HashSet};

/// Length of the `_proxy` marker that ends proxy object names.
const PROXY_MARKER_LEN: usize = 6;

fn digits_run(s: &str, min: usize, max: usize) -> Option<usize> {
    let len = s.bytes().take_while(u8::is_ascii_digit).count();
    (min..=max).contains(&len).then_some(len)
}

/// Matches `[d.d.d]` (one to three digits each) at the start of `s`,
/// returning the matched length.
fn version_tag_len(s: &str) -> Option<usize> {
    let mut rest = s.strip_prefix('[')?;
    let mut matched = 1;

    for part in 0..3 {
        let len = digits_run(rest, 1, 3)?;
        rest = &rest[len..];
        matched += len;

        let separator = if part < 2 { '.' } else { ']' };
        rest = rest.strip_prefix(separator)?;
        matched += 1;
    }

    Some(matched)
}

/// Matches `[d]` (one to three digits) at the start of `s`.
fn index_tag_len(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('[')?;
    let len = digits_run(rest, 1, 3)?;
    rest[len..].strip_prefix(']')?;
    Some(len + 2)
}

/// Everything before the last position where `matches` succeeds.
fn before_last_match(name: &str, matches: impl Fn(&str) -> bool) -> Option<&str> {
    name.char_indices()
        .rev()
        .find(|&(index, _)| matches(&name[index..]))
        .map(|(index, _)| &name[..index])
}

/// Strips renderer decorations from an object name.
pub fn clean_name(name: &str) -> String {
    let mut cleaned =
        before_last_match(name, |rest| rest.strip_prefix(' ').and_then(version_tag_len).is_some())
            .unwrap_or(name);

    if let Some(stripped) = before_last_match(cleaned, |rest| index_tag_len(rest).is_some()) {
        cleaned = stripped;
    }

    if let Some(open) = cleaned.rfind('<') {
        if cleaned[open..].contains('>') {
            cleaned = cleaned[..open].trim_end();
        }
    }

    let cleaned = cleaned.trim_start_matches(' ');
    if cleaned.is_empty() {
        name.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Whether an object name marks it as a stand-in for a host group.
pub fn is_proxy_name(name: &str) -> bool {
    name.contains("proxy")
}

/// Host group name encoded in a proxy object name: the part before any
/// `#` suffix, minus the trailing `_proxy` marker.
pub fn proxy_group_name(name: &str) -> Option<&str> {
    let name = match name.rfind('#') {
        Some(hash) => &name[..hash],
        None => name,
    };

    let char_count = name.chars().count();
    if char_count <= PROXY_MARKER_LEN {
        return None;
    }

    let cut = name
        .char_indices()
        .nth(char_count - PROXY_MARKER_LEN)
        .map(|(index, _)| index)?;
    Some(&name[..cut])
}

/// Raw renderer name to display name, for one pass.
#[derive(Debug, Default)]
pub struct NameMapping {
    clean_by_raw: HashMap<String, String>,
    used: HashSet<String>,
}

impl NameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display name for `raw`. The same raw name always yields the same
    /// display name; different raw names never share one.
    pub fn cleanup(&mut self, raw: &str) -> String {
        if let Some(clean) = self.clean_by_raw.get(raw) {
            return clean.clone();
        }

        let mut clean = clean_name(raw);
        while self.used.contains(&clean) {
            clean.push('_');
        }

        log::debug!("Cleaned up name {:?} -> {:?}", raw, clean);
        self.used.insert(clean.clone());
        self.clean_by_raw.insert(raw.to_string(), clean.clone());
        clean
    }

    pub fn get(&self, raw: &str) -> Option<&str> {
        self.clean_by_raw.get(raw).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.clean_by_raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clean_by_raw.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_version_suffix() {
        assert_eq!(clean_name("Chair [1.0.12]"), "Chair");
        assert_eq!(clean_name("Chair [1.0.1234]"), "Chair [1.0.1234]");
    }

    #[test]
    fn strips_index_suffix() {
        assert_eq!(clean_name("Leg[3]"), "Leg");
        assert_eq!(clean_name("Leg [2.0.0][3]"), "Leg");
    }

    #[test]
    fn strips_angle_suffix_and_leading_spaces() {
        assert_eq!(clean_name("  Table <group>"), "Table");
        assert_eq!(clean_name("a<b"), "a<b");
    }

    #[test]
    fn keeps_undecorated_names() {
        assert_eq!(clean_name("Plain"), "Plain");
        assert_eq!(clean_name("[1]"), "[1]");
    }

    #[test]
    fn mapping_is_stable_and_unique() {
        let mut names = NameMapping::new();
        assert_eq!(names.cleanup("Box [0.0.0]"), "Box");
        assert_eq!(names.cleanup("Box [1.0.0]"), "Box_");
        assert_eq!(names.cleanup("Box [0.0.0]"), "Box");
        assert_eq!(names.get("Box [1.0.0]"), Some("Box_"));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn proxy_names_resolve_to_group() {
        assert!(is_proxy_name("tree_proxy"));
        assert_eq!(proxy_group_name("tree_proxy"), Some("tree"));
        assert_eq!(proxy_group_name("tree_proxy#12"), Some("tree"));
        assert_eq!(proxy_group_name("proxy"), None);
    }
}
