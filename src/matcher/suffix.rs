//! Label-aware suffix matching on top of [`NameSet`].
//!
//! A query walks from its most specific suffix to its least specific one,
//! one label per step:
//!
//! ```text
//! a.ads.example.com -> ads.example.com -> example.com -> com
//! ```
//!
//! Each step is a shard lookup plus an exact hit check. Only when the exact
//! check fails is the shard scanned for a stored parent of the candidate.

use super::name_set::NameSet;
use super::NameMatcher;
use crate::types::ShardKey;

/// Check whether `child` equals `parent` or lies below it on a label boundary.
///
/// `"sub.example.com"` is a subdomain of `"example.com"`, `"notexample.com"` is not.
pub fn is_subdomain(parent: &str, child: &str) -> bool {
    match child.strip_suffix(parent) {
        Some("") => true,
        Some(rest) => !parent.is_empty() && rest.ends_with('.'),
        None => false,
    }
}

impl NameSet {
    /// Check whether `child` or any of its parent domains is in the set.
    ///
    /// Assumes `child` is already canonical (lower-cased, no trailing dot).
    ///
    /// # Panics
    ///
    /// Panics if `child` is empty.
    pub fn matches(&self, child: &str) -> bool {
        assert!(!child.is_empty(), "match requested for an empty domain name");

        let mut child = child;
        loop {
            if let Some(shard) = self.shards.get(&ShardKey::of(child)) {
                // Fast path: full match
                if shard.contains(child) {
                    return true;
                }

                // Fallback: scan the shard for a parent of the candidate
                if shard.iter().any(|parent| is_subdomain(parent, child)) {
                    return true;
                }
            }

            match child.find('.') {
                Some(dot) if dot > 0 && dot + 1 < child.len() => child = &child[dot + 1..],
                _ => break,
            }
        }

        false
    }
}

impl NameMatcher for NameSet {
    fn matches(&self, name: &str) -> bool {
        NameSet::matches(self, name)
    }
}
