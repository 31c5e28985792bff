//! dnsredir-namelist - reloadable domain name lists for DNS redirection
//!
//! This library keeps domain lists loaded from text files in memory and answers
//! "does this query name match any entry" for every DNS lookup:
//! - Sharded name sets for large lists (hundreds of thousands of entries)
//! - Label-aware suffix matching (`example.com` matches `www.example.com`)
//! - Background reloading on a timer, skipped when files are unchanged
//! - Lock-per-file snapshots, so lookups never see a half-loaded list
//!
//! # Example
//!
//! ```rust
//! use std::io::Write;
//! use std::time::Duration;
//! use dnsredir_namelist::SourceList;
//!
//! let mut file = tempfile::NamedTempFile::new().unwrap();
//! writeln!(file, "server=/ads.example.com/114.114.114.114").unwrap();
//! writeln!(file, "tracker.example.net  # bare domain").unwrap();
//!
//! let list = SourceList::new([file.path()], Duration::ZERO);
//! list.start_reload().unwrap();
//!
//! assert!(list.matches("cdn.ads.example.com"));
//! assert!(list.matches("tracker.example.net"));
//! assert!(!list.matches("example.com"));
//! ```
//!
//! # List Format
//!
//! | Line | Meaning |
//! |------|---------|
//! | `example.com` | `example.com` and all its subdomains |
//! | `server=/example.com/1.2.3.4` | Same; the upstream field is ignored |
//! | `# comment` | Ignored, also as a trailing comment |
//!
//! Query names passed to `matches` must already be lower-cased and carry no
//! trailing dot.

pub mod config;
pub mod error;
pub mod logger;
pub mod matcher;
pub mod parser;
pub mod source;
pub mod types;

// Re-export commonly used items
pub use config::{parse_duration, SourceListConfig, DEFAULT_RELOAD_INTERVAL};
pub use error::{NamelistError, Result};
pub use logger::Logger;
pub use matcher::{is_subdomain, NameMatcher, NameSet};
pub use parser::{parse_file, parse_reader, Line, ParsedList};
pub use source::{RefreshOutcome, SourceItem, SourceList, SourceListBuilder};
pub use types::{to_domain, FileStamp, ShardKey};
