use std::fmt;
use std::fs::Metadata;
use std::time::SystemTime;

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length of a domain name in presentation form, without the root dot
pub const MAX_DOMAIN_LEN: usize = 253;

/// Single label: 1-63 chars, never starting with '-'.
/// Underscores are allowed since service names (`_dmarc`, `_sip`) show up in real lists.
static LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9_][a-z0-9_-]{0,62}$")
        .expect("LABEL_PATTERN: hardcoded regex is invalid")
});

/// Padding for single-character names. A valid label never begins with '-',
/// so padded keys never collide with keys of longer names.
const SHARD_PADDING: u8 = b'-';

/// Convert a raw string into a canonical domain name.
///
/// The canonical form is lower-cased, without surrounding whitespace and without
/// the trailing root dot. Returns `None` if the input is not a domain name.
pub fn to_domain(raw: &str) -> Option<String> {
    let name = raw.trim();
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() || name.len() > MAX_DOMAIN_LEN {
        return None;
    }

    let name = name.to_ascii_lowercase();
    if name.split('.').all(|label| LABEL_PATTERN.is_match(label)) {
        Some(name)
    } else {
        None
    }
}

/// Bucket key derived from the first two bytes of a canonical domain name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShardKey([u8; 2]);

impl ShardKey {
    /// Compute the shard key of a canonical name.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn of(name: &str) -> Self {
        match name.as_bytes() {
            [] => panic!("shard key requested for an empty domain name"),
            [only] => Self([SHARD_PADDING, *only]),
            [first, second, ..] => Self([*first, *second]),
        }
    }

    pub fn as_bytes(&self) -> [u8; 2] {
        self.0
    }
}

impl fmt::Display for ShardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0[0] as char, self.0[1] as char)
    }
}

/// Last observed modification time and size of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    /// `None` when the platform does not report modification times
    pub mtime: Option<SystemTime>,
    pub size: u64,
}

impl From<&Metadata> for FileStamp {
    fn from(meta: &Metadata) -> Self {
        Self {
            mtime: meta.modified().ok(),
            size: meta.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_domain_normalizes() {
        assert_eq!(to_domain("Example.COM"), Some("example.com".to_string()));
        assert_eq!(to_domain("example.com."), Some("example.com".to_string()));
        assert_eq!(to_domain("  ads.example.net \t"), Some("ads.example.net".to_string()));
        assert_eq!(to_domain("_dmarc.example.org"), Some("_dmarc.example.org".to_string()));
        assert_eq!(to_domain("x"), Some("x".to_string()));
    }

    #[test]
    fn test_to_domain_rejects_malformed() {
        assert_eq!(to_domain(""), None);
        assert_eq!(to_domain("   "), None);
        assert_eq!(to_domain("."), None);
        assert_eq!(to_domain("a..b"), None);
        assert_eq!(to_domain(".example.com"), None);
        assert_eq!(to_domain("-bad.example.com"), None);
        assert_eq!(to_domain("server=/bad/one/two"), None);
        assert_eq!(to_domain("has space.com"), None);
        assert_eq!(to_domain("bücher.de"), None);
        assert_eq!(to_domain(&format!("{}.com", "a".repeat(64))), None);
        assert_eq!(to_domain(&"a.".repeat(128)), None); // 255 chars once the root dot goes
    }

    #[test]
    fn test_shard_key_two_chars() {
        assert_eq!(ShardKey::of("example.com").as_bytes(), *b"ex");
        assert_eq!(ShardKey::of("ex").as_bytes(), *b"ex");
        assert_eq!(ShardKey::of("example.com"), ShardKey::of("exotic.org"));
        assert_ne!(ShardKey::of("example.com"), ShardKey::of("xe.com"));
    }

    #[test]
    fn test_shard_key_single_char_padded() {
        assert_eq!(ShardKey::of("x").as_bytes(), *b"-x");
        assert_ne!(ShardKey::of("x"), ShardKey::of("x.com"));
        assert_eq!(ShardKey::of("x").to_string(), "-x");
    }

    #[test]
    fn test_shard_key_deterministic() {
        let name = "tracker.example.net";
        let first = ShardKey::of(name);
        for _ in 0..100 {
            assert_eq!(ShardKey::of(name), first);
        }
        assert_eq!(ShardKey::of(&name.to_string()), first);
    }

    #[test]
    #[should_panic(expected = "empty domain name")]
    fn test_shard_key_empty_panics() {
        let _ = ShardKey::of("");
    }
}
