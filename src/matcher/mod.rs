mod name_set;
mod suffix;

pub use name_set::NameSet;
pub use suffix::is_subdomain;

/// Trait for domain name matchers
pub trait NameMatcher: Send + Sync {
    /// Check if the canonical name (lower-cased, no trailing dot) matches.
    fn matches(&self, name: &str) -> bool;
}
