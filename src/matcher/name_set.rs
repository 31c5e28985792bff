//! Sharded domain name set.
//!
//! Names are bucketed by their [`ShardKey`] (first two characters), then stored
//! in a per-shard HashSet. Lookup works somewhat like an ordinary dictionary:
//! jump to the right page first, then search only that page.
//!
//! ```
//! use dnsredir_namelist::{NameSet, ShardKey};
//!
//! let names: NameSet = ["example.com", "example.net", "t"].into_iter().collect();
//! assert_eq!(names.shard_count(), 2);
//! assert_eq!(ShardKey::of("t").to_string(), "-t");
//! assert!(names.matches("www.example.net"));
//! ```
//!
//! [`ShardKey`]: crate::types::ShardKey

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::types::{to_domain, ShardKey};

/// Set of canonical domain names
#[derive(Debug, Clone, Default)]
pub struct NameSet {
    pub(super) shards: HashMap<ShardKey, HashSet<Box<str>>>,
}

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonicalize and insert a domain name.
    ///
    /// Returns false (nothing inserted) if `name` is not a domain name.
    pub fn add(&mut self, name: &str) -> bool {
        match to_domain(name) {
            Some(name) => {
                self.shards
                    .entry(ShardKey::of(&name))
                    .or_default()
                    .insert(name.into_boxed_str());
                true
            }
            None => false,
        }
    }

    /// Exact lookup of the canonical form of `name`
    pub fn contains(&self, name: &str) -> bool {
        match to_domain(name) {
            Some(name) => self
                .shards
                .get(&ShardKey::of(&name))
                .is_some_and(|shard| shard.contains(name.as_str())),
            None => false,
        }
    }

    /// Total number of names in the set
    pub fn len(&self) -> usize {
        self.shards.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.values().all(HashSet::is_empty)
    }

    /// Number of non-empty shards
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Iterate over every stored name, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.shards.values().flat_map(|shard| shard.iter().map(|name| &**name))
    }

    /// Visit every stored name. Stops at the first error returned by `visit`.
    pub fn for_each<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&str) -> Result<(), E>,
    {
        for name in self.iter() {
            visit(name)?;
        }
        Ok(())
    }
}

impl fmt::Display for NameSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NameSet[")?;
        for (i, name) in self.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
        }
        f.write_str("]")
    }
}

impl<'a> Extend<&'a str> for NameSet {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for name in iter {
            self.add(name);
        }
    }
}

impl<'a> FromIterator<&'a str> for NameSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
